use std::fmt;

use crate::error::Span;

#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    Ident(String),
    Number(String),
    Duration(String),
    Str { value: String, triple: bool },
    Reference(String),
    Regex(String),

    Var,
    Lambda,
    True,
    False,
    And,
    Or,
    Dbrp,

    Pipe,
    Dot,
    At,
    Comma,
    LParen,
    RParen,
    LBracket,
    RBracket,
    Assign,

    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    Not,
    Eq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,
    RegexEq,
    RegexNotEq,

    Eof,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ident(s) => write!(f, "identifier {s}"),
            Self::Number(n) => write!(f, "number {n}"),
            Self::Duration(d) => write!(f, "duration {d}"),
            Self::Str { .. } => f.write_str("string"),
            Self::Reference(r) => write!(f, "reference \"{r}\""),
            Self::Regex(r) => write!(f, "regex /{r}/"),
            Self::Var => f.write_str("var"),
            Self::Lambda => f.write_str("lambda:"),
            Self::True => f.write_str("TRUE"),
            Self::False => f.write_str("FALSE"),
            Self::And => f.write_str("AND"),
            Self::Or => f.write_str("OR"),
            Self::Dbrp => f.write_str("dbrp"),
            Self::Pipe => f.write_str("|"),
            Self::Dot => f.write_str("."),
            Self::At => f.write_str("@"),
            Self::Comma => f.write_str(","),
            Self::LParen => f.write_str("("),
            Self::RParen => f.write_str(")"),
            Self::LBracket => f.write_str("["),
            Self::RBracket => f.write_str("]"),
            Self::Assign => f.write_str("="),
            Self::Plus => f.write_str("+"),
            Self::Minus => f.write_str("-"),
            Self::Star => f.write_str("*"),
            Self::Slash => f.write_str("/"),
            Self::Percent => f.write_str("%"),
            Self::Not => f.write_str("!"),
            Self::Eq => f.write_str("=="),
            Self::NotEq => f.write_str("!="),
            Self::Lt => f.write_str("<"),
            Self::LtEq => f.write_str("<="),
            Self::Gt => f.write_str(">"),
            Self::GtEq => f.write_str(">="),
            Self::RegexEq => f.write_str("=~"),
            Self::RegexNotEq => f.write_str("!~"),
            Self::Eof => f.write_str("end of script"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}
