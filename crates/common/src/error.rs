use std::fmt;

use serde::Serialize;

use crate::catalog::Arity;

/// Position of a token in the script, 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Span {
    pub line: usize,
    pub column: usize,
}

impl Span {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {} char {}", self.line, self.column)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TickError {
    #[error("{span}: {message}")]
    Lex { span: Span, message: String },
    #[error("{span}: {message}")]
    Parse { span: Span, message: String },
    #[error("{span}: undefined variable {name}")]
    UndefinedVariable { span: Span, name: String },
    #[error("{span}: no node {name} can be chained from {from}")]
    UnknownNode { span: Span, name: String, from: String },
    #[error("{span}: no method or property {name} on {node}")]
    UnknownProperty { span: Span, name: String, node: String },
    #[error("{span}: unknown function {name}")]
    UnknownFunction { span: Span, name: String },
    #[error("{span}: {name} expects {expected} arguments, got {got}")]
    Arity {
        span: Span,
        name: String,
        expected: Arity,
        got: usize,
    },
    #[error("{span}: {message}")]
    InvalidChain { span: Span, message: String },
}

impl TickError {
    pub fn span(&self) -> Span {
        match self {
            Self::Lex { span, .. }
            | Self::Parse { span, .. }
            | Self::UndefinedVariable { span, .. }
            | Self::UnknownNode { span, .. }
            | Self::UnknownProperty { span, .. }
            | Self::UnknownFunction { span, .. }
            | Self::Arity { span, .. }
            | Self::InvalidChain { span, .. } => *span,
        }
    }
}
