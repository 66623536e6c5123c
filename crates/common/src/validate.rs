//! Semantic checks over a parsed program: every variable is declared before
//! use, every chained node and property exists where it is chained, argument
//! counts match and lambdas only call known functions.

use std::collections::HashMap;

use tracing::trace;

use crate::ast::{Call, ChainKind, Expr, Program, Statement};
use crate::catalog::{self, Arity, NodeSpec};
use crate::error::{Span, TickError};

#[derive(Debug, Clone, Copy)]
enum NodeRef {
    Stream,
    Batch,
    Spec(&'static NodeSpec),
    /// Alert or deadman node, with the handler currently being configured.
    Alert(Option<&'static NodeSpec>),
    Udf,
}

impl NodeRef {
    fn name(self) -> &'static str {
        match self {
            Self::Stream => "stream",
            Self::Batch => "batch",
            Self::Spec(spec) => spec.name,
            Self::Alert(Some(handler)) => handler.name,
            Self::Alert(None) => "alert",
            Self::Udf => "udf",
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Binding {
    Scalar,
    Node(NodeRef),
}

#[derive(Default)]
pub struct Validator {
    scope: HashMap<String, Binding>,
}

impl Validator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn validate(mut self, program: &Program) -> Result<(), TickError> {
        for statement in &program.statements {
            match statement {
                Statement::Declaration { name, expr, .. } => {
                    let binding = self.expr(expr)?;
                    trace!(name = %name, "declared");
                    self.scope.insert(name.clone(), binding);
                }
                Statement::TypeDeclaration { name, .. } => {
                    self.scope.insert(name.clone(), Binding::Scalar);
                }
                Statement::Dbrp { .. } => {}
                Statement::Expression(expr) => {
                    self.expr(expr)?;
                }
            }
        }
        Ok(())
    }

    fn expr(&self, expr: &Expr) -> Result<Binding, TickError> {
        match expr {
            Expr::Number(_)
            | Expr::Duration(_)
            | Expr::Str { .. }
            | Expr::Bool(_)
            | Expr::Regex(_)
            | Expr::Reference(_)
            | Expr::Star => Ok(Binding::Scalar),
            Expr::Ident { span, name } => self.lookup(*span, name),
            Expr::List(items) => {
                for item in items {
                    self.expr(item)?;
                }
                Ok(Binding::Scalar)
            }
            Expr::Lambda(body) => {
                self.lambda(body)?;
                Ok(Binding::Scalar)
            }
            Expr::Paren(inner) => self.expr(inner),
            Expr::Unary { operand, .. } => {
                self.expr(operand)?;
                Ok(Binding::Scalar)
            }
            Expr::Binary { lhs, rhs, .. } => {
                self.expr(lhs)?;
                self.expr(rhs)?;
                Ok(Binding::Scalar)
            }
            Expr::Call(call) => {
                self.function(call, |e| self.expr(e).map(|_| ()))?;
                Ok(Binding::Scalar)
            }
            Expr::Chain { source, kind, call } => {
                let node = match self.expr(source)? {
                    Binding::Node(node) => node,
                    Binding::Scalar => {
                        return Err(TickError::InvalidChain {
                            span: call.span,
                            message: format!("cannot chain {}{} from a value", kind.symbol(), call.name),
                        })
                    }
                };
                for arg in &call.args {
                    self.expr(arg)?;
                }
                self.link(node, *kind, call).map(Binding::Node)
            }
        }
    }

    fn lookup(&self, span: Span, name: &str) -> Result<Binding, TickError> {
        match name {
            "stream" => Ok(Binding::Node(NodeRef::Stream)),
            "batch" => Ok(Binding::Node(NodeRef::Batch)),
            _ => self
                .scope
                .get(name)
                .copied()
                .ok_or_else(|| TickError::UndefinedVariable {
                    span,
                    name: name.to_string(),
                }),
        }
    }

    fn link(&self, node: NodeRef, kind: ChainKind, call: &Call) -> Result<NodeRef, TickError> {
        let got = call.args.len();
        match kind {
            ChainKind::Pipe => {
                let allowed = match node {
                    NodeRef::Stream => call.name == "from",
                    NodeRef::Batch => call.name == "query",
                    _ => call.name != "from" && call.name != "query",
                };
                let spec = catalog::node_spec(&call.name)
                    .filter(|_| allowed)
                    .ok_or_else(|| TickError::UnknownNode {
                        span: call.span,
                        name: call.name.clone(),
                        from: node.name().to_string(),
                    })?;
                check_arity(call, spec.args, got)?;
                Ok(match spec.name {
                    "alert" | "deadman" => NodeRef::Alert(None),
                    _ => NodeRef::Spec(spec),
                })
            }
            ChainKind::At => match node {
                NodeRef::Stream | NodeRef::Batch => Err(TickError::UnknownNode {
                    span: call.span,
                    name: call.name.clone(),
                    from: node.name().to_string(),
                }),
                _ => Ok(NodeRef::Udf),
            },
            ChainKind::Dot => match node {
                NodeRef::Udf => Ok(NodeRef::Udf),
                NodeRef::Spec(spec) => match spec.property(&call.name) {
                    Some(property) => {
                        check_arity(call, property.arity, got)?;
                        Ok(node)
                    }
                    None => Err(unknown_property(call, node)),
                },
                NodeRef::Alert(handler) => {
                    if let Some(property) = handler.and_then(|h| h.property(&call.name)) {
                        check_arity(call, property.arity, got)?;
                        return Ok(node);
                    }
                    if let Some(spec) = catalog::handler_spec(&call.name) {
                        check_arity(call, spec.args, got)?;
                        return Ok(NodeRef::Alert(Some(spec)));
                    }
                    if let Some(property) = catalog::alert_property(&call.name) {
                        check_arity(call, property.arity, got)?;
                        return Ok(node);
                    }
                    Err(unknown_property(call, node))
                }
                NodeRef::Stream | NodeRef::Batch => Err(unknown_property(call, node)),
            },
        }
    }

    fn lambda(&self, body: &Expr) -> Result<(), TickError> {
        match body {
            Expr::Number(_)
            | Expr::Duration(_)
            | Expr::Str { .. }
            | Expr::Bool(_)
            | Expr::Regex(_)
            | Expr::Reference(_)
            | Expr::Star => Ok(()),
            Expr::Ident { span, name } => match self.lookup(*span, name)? {
                Binding::Scalar => Ok(()),
                Binding::Node(_) => Err(TickError::InvalidChain {
                    span: *span,
                    message: format!("pipeline variable {name} cannot be used in a lambda"),
                }),
            },
            Expr::List(items) => items.iter().try_for_each(|item| self.lambda(item)),
            Expr::Lambda(inner) | Expr::Paren(inner) => self.lambda(inner),
            Expr::Unary { operand, .. } => self.lambda(operand),
            Expr::Binary { lhs, rhs, .. } => {
                self.lambda(lhs)?;
                self.lambda(rhs)
            }
            Expr::Call(call) => self.function(call, |e| self.lambda(e)),
            Expr::Chain { call, .. } => Err(TickError::InvalidChain {
                span: call.span,
                message: format!("{} cannot be chained inside a lambda", call.name),
            }),
        }
    }

    fn function(
        &self,
        call: &Call,
        mut check_arg: impl FnMut(&Expr) -> Result<(), TickError>,
    ) -> Result<(), TickError> {
        if !catalog::is_lambda_function(&call.name) {
            return Err(TickError::UnknownFunction {
                span: call.span,
                name: call.name.clone(),
            });
        }
        call.args.iter().try_for_each(|arg| check_arg(arg))
    }
}

fn check_arity(call: &Call, expected: Arity, got: usize) -> Result<(), TickError> {
    if expected.accepts(got) {
        Ok(())
    } else {
        Err(TickError::Arity {
            span: call.span,
            name: call.name.clone(),
            expected,
            got,
        })
    }
}

fn unknown_property(call: &Call, node: NodeRef) -> TickError {
    TickError::UnknownProperty {
        span: call.span,
        name: call.name.clone(),
        node: node.name().to_string(),
    }
}

pub fn validate(program: &Program) -> Result<(), TickError> {
    Validator::new().validate(program)
}
