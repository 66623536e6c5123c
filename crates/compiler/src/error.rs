use ticker_common::TickError;

#[derive(Debug, thiserror::Error)]
pub enum CompileError {
    #[error("unsupported alert handler {0}")]
    UnsupportedHandler(String),
    #[error("invalid operator: {0} is unknown")]
    UnknownOperator(String),
    #[error("unknown trigger type: {0}")]
    UnknownTrigger(String),
    #[error("unknown trigger mechanism: {0}")]
    UnknownTriggerMechanism(String),
    #[error("unknown change type: {0}")]
    UnknownChange(String),
    #[error("{0} cannot be an empty string")]
    EmptyField(&'static str),
    #[error("invalid field: {0}")]
    InvalidField(String),
    #[error("invalid alert handlers: {0}")]
    InvalidHandlers(#[source] TickError),
    #[error("invalid TICKscript: {0}")]
    InvalidScript(#[source] TickError),
}
