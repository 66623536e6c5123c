//! The `data` stream every trigger reads from.

use tracing::debug;

use crate::error::CompileError;
use crate::filter::field_name;
use crate::rule::{AlertRule, Field, FieldKind, QueryConfig, TriggerKind};
use crate::value::{duration, quote, reference};

pub fn data(rule: &AlertRule) -> Result<String, CompileError> {
    let query = &rule.query;
    if let Some(raw) = query.raw_text() {
        return batch(query, raw);
    }

    let mut out = String::from(
        "var data = stream
    |from()
        .database(db)
        .retentionPolicy(rp)
        .measurement(measurement)
        .groupBy(groupBy)
        .where(whereFilter)",
    );
    if rule.trigger != TriggerKind::Deadman.as_str() {
        out.push_str(&projection(query)?);
    }
    debug!(aggregate = query.has_aggregate(), "data section assembled");
    Ok(out + "\n")
}

fn batch(query: &QueryConfig, raw: &str) -> Result<String, CompileError> {
    if raw.contains("'''") || raw.ends_with('\'') {
        return Err(CompileError::InvalidField(
            "raw query cannot contain ''' or end with a quote".into(),
        ));
    }
    let mut out = format!(
        "var data = batch
    |query('''{raw}''')
        .period(period)
        .every(every)
        .align()"
    );
    if let Some(time) = query.group_by.time() {
        let mut dims = vec![format!("time({})", duration("groupBy.time", time)?)];
        dims.extend(query.group_by.tags.iter().map(|t| quote(t)));
        out.push_str(&format!("\n        .groupBy({})", dims.join(", ")));
    }
    debug!("batch data section assembled");
    Ok(out + "\n")
}

/// Normalises the queried field into a `value` field.
fn projection(query: &QueryConfig) -> Result<String, CompileError> {
    if let Some(func) = query.fields.iter().find(|f| f.is_aggregate()) {
        return aggregate(func).map(|call| {
            format!(
                "
    |window()
        .period(period)
        .every(every)
        .align()
    |{call}
        .as('value')"
            )
        });
    }
    let field = field_name(query).unwrap_or("value");
    Ok(format!(
        "
    |eval(lambda: {})
        .as('value')",
        reference(field)
    ))
}

fn aggregate(func: &Field) -> Result<String, CompileError> {
    let name = func
        .name()
        .filter(|n| !n.is_empty() && n.chars().all(|c| c.is_ascii_alphanumeric()))
        .ok_or_else(|| {
            CompileError::InvalidField(format!("invalid function name {}", func.value))
        })?;
    let field = func
        .args
        .iter()
        .find(|arg| arg.kind == FieldKind::Field)
        .and_then(Field::name)
        .ok_or_else(|| CompileError::InvalidField(format!("{name} has no field argument")))?;

    let mut args = vec![quote(field)];
    for extra in func.args.iter().filter(|arg| arg.kind != FieldKind::Field) {
        args.push(literal(extra)?);
    }
    Ok(format!("{name}({})", args.join(", ")))
}

fn literal(arg: &Field) -> Result<String, CompileError> {
    match (&arg.kind, &arg.value) {
        (FieldKind::Number | FieldKind::Integer, serde_json::Value::Number(n)) => Ok(n.to_string()),
        (FieldKind::Number | FieldKind::Integer, serde_json::Value::String(s))
            if s.parse::<f64>().is_ok_and(f64::is_finite) =>
        {
            Ok(s.clone())
        }
        (_, serde_json::Value::String(s)) => Ok(quote(s)),
        (_, other) => Err(CompileError::InvalidField(format!(
            "unsupported function argument {other}"
        ))),
    }
}
