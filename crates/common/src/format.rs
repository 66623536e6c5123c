//! Canonical printing of a parsed program.

use crate::ast::{Call, ChainKind, Expr, Program, Statement, UnaryOp};

const NODE_INDENT: &str = "    ";
const PROPERTY_INDENT: &str = "        ";

pub fn format_program(program: &Program) -> String {
    let mut out = program
        .statements
        .iter()
        .map(format_statement)
        .collect::<Vec<_>>()
        .join("\n\n");
    out.push('\n');
    out
}

fn format_statement(statement: &Statement) -> String {
    match statement {
        Statement::Declaration { name, expr, .. } => format!("var {name} = {}", format_expr(expr)),
        Statement::TypeDeclaration {
            name, type_name, ..
        } => format!("var {name} {type_name}"),
        Statement::Dbrp {
            database,
            retention_policy,
            ..
        } => format!("dbrp {}.{}", reference(database), reference(retention_policy)),
        Statement::Expression(expr) => format_expr(expr),
    }
}

pub fn format_expr(expr: &Expr) -> String {
    match expr {
        Expr::Number(n) | Expr::Duration(n) => n.clone(),
        Expr::Str { value, triple: true } => format!("'''{value}'''"),
        Expr::Str { value, .. } => format!("'{}'", value.replace('\'', "\\'")),
        Expr::Bool(true) => "TRUE".into(),
        Expr::Bool(false) => "FALSE".into(),
        Expr::Regex(r) => format!("/{r}/"),
        Expr::Reference(r) => reference(r),
        Expr::Star => "*".into(),
        Expr::Ident { name, .. } => name.clone(),
        Expr::List(items) => format!("[{}]", join_args(items)),
        Expr::Lambda(body) => format!("lambda: {}", format_expr(body)),
        Expr::Paren(inner) => format!("({})", format_expr(inner)),
        Expr::Unary { op, operand } => {
            let sign = match op {
                UnaryOp::Not => '!',
                UnaryOp::Neg => '-',
            };
            format!("{sign}{}", format_expr(operand))
        }
        Expr::Binary { op, lhs, rhs } => {
            format!("{} {op} {}", format_expr(lhs), format_expr(rhs))
        }
        Expr::Call(call) => format_call(call),
        Expr::Chain { .. } => format_chain(expr),
    }
}

fn format_chain(expr: &Expr) -> String {
    let (head, links) = expr.chain_links();
    let mut out = format_expr(head);
    for (kind, call) in links {
        let indent = match kind {
            ChainKind::Dot => PROPERTY_INDENT,
            ChainKind::Pipe | ChainKind::At => NODE_INDENT,
        };
        out.push('\n');
        out.push_str(indent);
        out.push(kind.symbol());
        out.push_str(&format_call(call));
    }
    out
}

fn format_call(call: &Call) -> String {
    format!("{}({})", call.name, join_args(&call.args))
}

fn join_args(args: &[Expr]) -> String {
    args.iter().map(format_expr).collect::<Vec<_>>().join(", ")
}

fn reference(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\\\""))
}
