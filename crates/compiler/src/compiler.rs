use tracing::{debug, debug_span, warn};

use crate::config::CompilerConfig;
use crate::error::CompileError;
use crate::rule::{AlertRule, TickScript};
use crate::{data, handlers, output, trigger, vars};

/// Turns alert rules into TICKscript tasks.
pub trait Ticker {
    fn generate(&self, rule: &AlertRule) -> Result<TickScript, CompileError>;
}

#[derive(Debug, Clone, Default)]
pub struct Compiler {
    config: CompilerConfig,
}

impl Compiler {
    pub fn new(config: CompilerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CompilerConfig {
        &self.config
    }

    pub fn compile(&self, rule: &AlertRule) -> Result<TickScript, CompileError> {
        let span = debug_span!("compile", rule = %rule.name, trigger = %rule.trigger);
        let _enter = span.enter();

        let trigger = trigger::trigger(rule)?;
        let vars = vars::vars(rule, &self.config.output)?;
        let data = data::data(rule)?;
        let services = handlers::alert_services(rule)?;
        let output = output::output(rule, &self.config);
        let script = format!("{vars}\n{data}\n{trigger}{services}\n\n{output}");

        let program = ticker_common::parse(&script).map_err(|err| {
            warn!(error = %err, "generated script does not parse");
            CompileError::InvalidScript(err)
        })?;
        if self.config.validate_program {
            ticker_common::validate(&program).map_err(|err| {
                warn!(error = %err, "generated script rejected");
                CompileError::InvalidScript(err)
            })?;
        }
        let formatted = ticker_common::format_program(&program);
        debug!(bytes = formatted.len(), "compiled");
        Ok(TickScript::new(formatted))
    }
}

impl Ticker for Compiler {
    fn generate(&self, rule: &AlertRule) -> Result<TickScript, CompileError> {
        self.compile(rule)
    }
}

/// Compiles with the default output configuration.
pub fn compile(rule: &AlertRule) -> Result<TickScript, CompileError> {
    Compiler::default().compile(rule)
}
