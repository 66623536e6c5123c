//! TICKscript language support: lexing, parsing, semantic validation and
//! canonical formatting.

pub mod ast;
pub mod catalog;
pub mod error;
pub mod format;
pub mod lexer;
pub mod parser;
pub mod token;
pub mod validate;

pub use ast::Program;
pub use error::{Span, TickError};
pub use format::format_program;
pub use parser::parse;
pub use validate::validate;

/// Parses and validates a complete script.
pub fn check(source: &str) -> Result<Program, TickError> {
    let program = parse(source)?;
    validate(&program)?;
    Ok(program)
}

/// Validates a fragment of alert node methods, such as `.slack().channel('#ops')`,
/// by attaching it to a minimal alert pipeline.
pub fn check_alert_chain(fragment: &str) -> Result<(), TickError> {
    check(&format!("stream|from()|alert(){fragment}")).map(|_| ())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn check_returns_program() {
        let program = check("var a = 1\nstream|from()").unwrap();
        assert_eq!(program.statements.len(), 2);
    }

    #[test]
    fn alert_chain_fragments() {
        check_alert_chain("").unwrap();
        check_alert_chain(".slack().channel('#ops').email('a@b.c')").unwrap();
        assert!(check_alert_chain(".slack(").is_err());
        assert!(check_alert_chain(".nope()").is_err());
    }
}
