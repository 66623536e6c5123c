//! Compiles alert rules into TICKscript tasks.

pub mod compiler;
pub mod config;
pub mod data;
pub mod error;
pub mod filter;
pub mod handlers;
pub mod operator;
pub mod output;
pub mod rule;
pub mod trigger;
pub mod value;
pub mod vars;

pub use compiler::{compile, Compiler, Ticker};
pub use config::{CompilerConfig, LoadError, OutputConfig};
pub use error::CompileError;
pub use rule::{AlertRule, TickScript};
