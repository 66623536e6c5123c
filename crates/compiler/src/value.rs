//! TICKscript literals for user supplied values.

use ticker_common::token::TokenKind;

use crate::error::CompileError;

/// Backslash-escapes single quotes for use inside a `'...'` string.
/// Other backslashes stay literal.
pub fn escape(value: &str) -> String {
    value.replace('\'', "\\'")
}

/// A trailing backslash would escape the closing quote, so such values use
/// the raw triple-quoted form instead.
pub fn quote(value: &str) -> String {
    if value.ends_with('\\') && !value.contains("'''") {
        return format!("'''{value}'''");
    }
    format!("'{}'", escape(value))
}

/// Double-quoted field or tag reference.
pub fn reference(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\\\""))
}

/// Numbers and booleans are emitted bare, everything else as a string.
pub fn format_value(value: &str) -> String {
    if let Ok(number) = value.parse::<f64>() {
        if number.is_finite() {
            return if is_decimal_literal(value) {
                value.to_string()
            } else {
                number.to_string()
            };
        }
    }
    if value.eq_ignore_ascii_case("true") || value.eq_ignore_ascii_case("false") {
        return value.to_string();
    }
    quote(value)
}

/// Accepts `value` only when it reads back as a single duration literal.
pub fn duration<'a>(field: &str, value: &'a str) -> Result<&'a str, CompileError> {
    let tokens = ticker_common::lexer::tokenize(value).unwrap_or_default();
    let kinds: Vec<&TokenKind> = tokens.iter().map(|t| &t.kind).collect();
    if let [TokenKind::Duration(_), TokenKind::Eof] = kinds.as_slice() {
        return Ok(value);
    }
    Err(CompileError::InvalidField(format!(
        "{field} must be a duration, got {value:?}"
    )))
}

// Forms the lexer reads back as a number, optionally negated.
fn is_decimal_literal(value: &str) -> bool {
    let digits = value.strip_prefix('-').unwrap_or(value);
    let (int, frac) = match digits.split_once('.') {
        Some((int, frac)) => (int, Some(frac)),
        None => (digits, None),
    };
    let all_digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
    all_digits(int) && frac.map_or(true, all_digits)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers_are_bare() {
        assert_eq!(format_value("90"), "90");
        assert_eq!(format_value("-1.5"), "-1.5");
        assert_eq!(format_value("0.25"), "0.25");
    }

    #[test]
    fn exotic_floats_use_canonical_text() {
        assert_eq!(format_value("1e3"), "1000");
        assert_eq!(format_value("+2"), "2");
        assert_eq!(format_value(".5"), "0.5");
    }

    #[test]
    fn non_finite_values_are_strings() {
        assert_eq!(format_value("inf"), "'inf'");
        assert_eq!(format_value("NaN"), "'NaN'");
    }

    #[test]
    fn booleans_keep_case() {
        assert_eq!(format_value("TRUE"), "TRUE");
        assert_eq!(format_value("false"), "false");
    }

    #[test]
    fn strings_are_quoted_and_escaped() {
        assert_eq!(format_value("DOWN"), "'DOWN'");
        assert_eq!(format_value("it's"), r"'it\'s'");
        assert_eq!(format_value(""), "''");
    }

    #[test]
    fn escaped_value_reads_back_unchanged() {
        let literal = format_value("don't");
        let program = ticker_common::parse(&format!("var x = {literal}")).unwrap();
        let ticker_common::ast::Statement::Declaration { expr, .. } = &program.statements[0] else {
            panic!("expected declaration");
        };
        assert_eq!(
            *expr,
            ticker_common::ast::Expr::Str {
                value: "don't".into(),
                triple: false
            }
        );
    }

    #[test]
    fn durations_must_stand_alone() {
        assert_eq!(duration("every", "30s").unwrap(), "30s");
        assert_eq!(duration("shift", "1h").unwrap(), "1h");
        assert!(duration("shift", "42").is_err());
        assert!(duration("shift", "").is_err());
        assert!(duration("every", "30s\n\nstream|from()").is_err());
        let err = duration("period", "10m)|httpOut('x'").unwrap_err();
        assert!(err.to_string().starts_with("invalid field: period must be a duration"));
    }

    #[test]
    fn trailing_backslash_uses_triple_quotes() {
        assert_eq!(quote(r"C:\"), r"'''C:\'''");
        assert_eq!(quote(r"a\b"), r"'a\b'");
        let program = ticker_common::parse(&format!("var x = {}", quote(r"C:\"))).unwrap();
        let ticker_common::ast::Statement::Declaration { expr, .. } = &program.statements[0] else {
            panic!("expected declaration");
        };
        assert_eq!(
            *expr,
            ticker_common::ast::Expr::Str {
                value: r"C:\".into(),
                triple: true
            }
        );
    }

    #[test]
    fn references_escape_double_quotes() {
        assert_eq!(reference("host"), "\"host\"");
        assert_eq!(reference("a\"b"), "\"a\\\"b\"");
    }
}
