//! Alert handler chain: `.handler(args).property(args)...` calls appended to
//! the alert node.

use std::collections::HashSet;

use tracing::{debug, warn};

use crate::error::CompileError;
use crate::rule::{AlertRule, HandlerKind, KapacitorProperty};
use crate::value::quote;

/// One handler instance after legacy and structured input are merged.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HandlerCall<'a> {
    pub kind: HandlerKind,
    pub args: &'a [String],
    pub properties: &'a [KapacitorProperty],
}

/// Merges the legacy `alerts` names and the structured `alertNodes` into one
/// ordered list.
///
/// Legacy names come first in input order, once each, and only for handlers
/// that have no structured instance. Structured instances follow in schema
/// order.
pub fn normalize(rule: &AlertRule) -> Result<Vec<HandlerCall<'_>>, CompileError> {
    let configured: HashSet<HandlerKind> = rule
        .alert_nodes
        .iter()
        .filter(|(_, nodes)| !nodes.is_empty())
        .map(|(kind, _)| kind)
        .collect();

    let mut calls = Vec::new();
    let mut seen = HashSet::new();
    for name in &rule.alerts {
        let kind = HandlerKind::from_name(name)
            .ok_or_else(|| CompileError::UnsupportedHandler(name.clone()))?;
        if !configured.contains(&kind) && seen.insert(kind) {
            calls.push(HandlerCall {
                kind,
                args: &[],
                properties: &[],
            });
        }
    }

    for (kind, nodes) in rule.alert_nodes.iter() {
        calls.extend(nodes.iter().map(|node| HandlerCall {
            kind,
            args: &node.args,
            properties: &node.properties,
        }));
    }
    Ok(calls)
}

/// `.method('arg1', 'arg2')` with every argument quoted as a string.
pub fn to_kapa_func(method: &str, args: &[String]) -> String {
    let args: Vec<_> = args.iter().map(|a| quote(a)).collect();
    format!(".{method}({})", args.join(", "))
}

pub fn handler_chain(rule: &AlertRule) -> Result<String, CompileError> {
    let mut out = String::new();
    for call in normalize(rule)? {
        out.push_str(&to_kapa_func(call.kind.method(), call.args));
        for property in call.properties {
            if !is_identifier(&property.name) {
                return Err(CompileError::InvalidField(format!(
                    "invalid property name {:?} on {}",
                    property.name,
                    call.kind.method()
                )));
            }
            out.push_str(&to_kapa_func(&property.name, &property.args));
        }
    }
    Ok(out)
}

/// The handler chain, checked against an alert node before use. Calls are
/// emitted back to back; layout is left to the formatter.
pub fn alert_services(rule: &AlertRule) -> Result<String, CompileError> {
    let chain = handler_chain(rule)?;
    if let Err(err) = ticker_common::check_alert_chain(&chain) {
        warn!(error = %err, "handler chain rejected");
        return Err(CompileError::InvalidHandlers(err));
    }
    debug!(bytes = chain.len(), "handler chain assembled");
    Ok(chain)
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
