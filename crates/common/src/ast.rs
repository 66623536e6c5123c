use std::fmt;

use crate::error::Span;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Program {
    pub statements: Vec<Statement>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    Declaration {
        span: Span,
        name: String,
        expr: Expr,
    },
    /// Template variable without a value, `var name type`.
    TypeDeclaration {
        span: Span,
        name: String,
        type_name: String,
    },
    Dbrp {
        span: Span,
        database: String,
        retention_policy: String,
    },
    Expression(Expr),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChainKind {
    /// `|node()` creates a new pipeline node.
    Pipe,
    /// `.property()` sets a property or attaches an alert handler.
    Dot,
    /// `@udf()` creates a user defined function node.
    At,
}

impl ChainKind {
    pub fn symbol(self) -> char {
        match self {
            Self::Pipe => '|',
            Self::Dot => '.',
            Self::At => '@',
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Or,
    And,
    Eq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,
    RegexEq,
    RegexNotEq,
    Add,
    Sub,
    Mul,
    Div,
    Mod,
}

impl BinaryOp {
    pub fn precedence(self) -> u8 {
        match self {
            Self::Or => 1,
            Self::And => 2,
            Self::Eq
            | Self::NotEq
            | Self::Lt
            | Self::LtEq
            | Self::Gt
            | Self::GtEq
            | Self::RegexEq
            | Self::RegexNotEq => 3,
            Self::Add | Self::Sub => 4,
            Self::Mul | Self::Div | Self::Mod => 5,
        }
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Or => "OR",
            Self::And => "AND",
            Self::Eq => "==",
            Self::NotEq => "!=",
            Self::Lt => "<",
            Self::LtEq => "<=",
            Self::Gt => ">",
            Self::GtEq => ">=",
            Self::RegexEq => "=~",
            Self::RegexNotEq => "!~",
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Mod => "%",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    Not,
    Neg,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    pub span: Span,
    pub name: String,
    pub args: Vec<Expr>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Number(String),
    Duration(String),
    Str { value: String, triple: bool },
    Bool(bool),
    Regex(String),
    Reference(String),
    Star,
    Ident { span: Span, name: String },
    List(Vec<Expr>),
    Lambda(Box<Expr>),
    Paren(Box<Expr>),
    Unary { op: UnaryOp, operand: Box<Expr> },
    Binary { op: BinaryOp, lhs: Box<Expr>, rhs: Box<Expr> },
    /// Stateless function call, only meaningful inside lambdas.
    Call(Call),
    Chain { source: Box<Expr>, kind: ChainKind, call: Call },
}

impl Expr {
    /// Flattens nested chains into the head expression and its links in order.
    pub fn chain_links(&self) -> (&Expr, Vec<(ChainKind, &Call)>) {
        let mut links = Vec::new();
        let mut current = self;
        while let Expr::Chain { source, kind, call } = current {
            links.push((*kind, call));
            current = source;
        }
        links.reverse();
        (current, links)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn call(name: &str) -> Call {
        Call {
            span: Span::default(),
            name: name.into(),
            args: vec![],
        }
    }

    #[test]
    fn chain_links_in_source_order() {
        let expr = Expr::Chain {
            source: Box::new(Expr::Chain {
                source: Box::new(Expr::Ident {
                    span: Span::default(),
                    name: "stream".into(),
                }),
                kind: ChainKind::Pipe,
                call: call("from"),
            }),
            kind: ChainKind::Dot,
            call: call("database"),
        };
        let (head, links) = expr.chain_links();
        assert!(matches!(head, Expr::Ident { name, .. } if name == "stream"));
        let names: Vec<_> = links.iter().map(|(k, c)| (k.symbol(), c.name.as_str())).collect();
        assert_eq!(names, vec![('|', "from"), ('.', "database")]);
    }

    #[test]
    fn precedence_orders_logical_below_comparison() {
        assert!(BinaryOp::Or.precedence() < BinaryOp::And.precedence());
        assert!(BinaryOp::And.precedence() < BinaryOp::Eq.precedence());
        assert!(BinaryOp::Add.precedence() < BinaryOp::Mul.precedence());
    }
}
