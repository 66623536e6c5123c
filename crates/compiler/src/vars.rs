//! Variable declarations that open every generated script.

use tracing::debug;

use crate::config::OutputConfig;
use crate::error::CompileError;
use crate::filter::{group_by, id_var, where_filter};
use crate::rule::{AlertRule, TriggerKind};
use crate::value::{duration, format_value, quote};

/// Common declarations followed by the ones the trigger kind needs.
pub fn vars(rule: &AlertRule, output: &OutputConfig) -> Result<String, CompileError> {
    let kind = TriggerKind::from_name(&rule.trigger)
        .ok_or_else(|| CompileError::UnknownTriggerMechanism(rule.trigger.clone()))?;
    let common = common_vars(rule, output)?;
    let values = &rule.values;

    let specific = match kind {
        TriggerKind::Threshold if values.range_value.is_empty() => {
            required("value", &values.value)?;
            vec![declare("crit", format_value(&values.value))]
        }
        TriggerKind::Threshold => {
            required("value", &values.value)?;
            vec![
                declare("lower", format_value(&values.value)),
                declare("upper", format_value(&values.range_value)),
            ]
        }
        TriggerKind::Relative => {
            required("shift", &values.shift)?;
            required("value", &values.value)?;
            vec![
                declare("shift", duration("shift", &values.shift)?),
                declare("crit", format_value(&values.value)),
            ]
        }
        TriggerKind::Deadman => vec![declare("threshold", "0.0")],
    };

    debug!(trigger = kind.as_str(), "variables assembled");
    Ok(format!("{common}\n{}\n", specific.join("\n")))
}

pub fn common_vars(rule: &AlertRule, output: &OutputConfig) -> Result<String, CompileError> {
    let query = &rule.query;
    if query.raw_text().is_none() {
        required("database", &query.database)?;
        required("retentionPolicy", &query.retention_policy)?;
        required("measurement", &query.measurement)?;
    }
    required("name", &rule.name)?;

    let mut lines = vec![
        declare("db", quote(&query.database)),
        declare("rp", quote(&query.retention_policy)),
        declare("measurement", quote(&query.measurement)),
        declare("groupBy", group_by(query)),
        declare("whereFilter", where_filter(query)),
    ];
    lines.extend(window(rule)?);
    lines.extend([
        declare("name", quote(&rule.name)),
        declare("idVar", id_var(query)),
        declare("message", quote(&rule.message)),
        declare("idTag", quote(&output.id_tag)),
        declare("levelTag", quote(&output.level_tag)),
        declare("messageField", quote(&output.message_field)),
        declare("durationField", quote(&output.duration_field)),
        declare("outputDB", quote(&output.database)),
        declare("outputRP", quote(&output.retention_policy)),
        declare("outputMeasurement", quote(&output.measurement)),
        declare("triggerType", quote(&rule.trigger)),
    ]);
    if let Some(details) = rule.details() {
        lines.push(declare("details", quote(details)));
    }
    Ok(lines.join("\n"))
}

/// `period` and `every` declarations, present only when the pipeline windows
/// its data or watches for silence.
fn window(rule: &AlertRule) -> Result<Vec<String>, CompileError> {
    let query = &rule.query;
    let deadman = rule.trigger == TriggerKind::Deadman.as_str();
    let batched = query.raw_text().is_some();
    let aggregate = query.has_aggregate();
    if !(deadman || batched || aggregate) {
        return Ok(Vec::new());
    }

    let period = if deadman {
        required("period", &rule.values.period)?;
        duration("period", &rule.values.period)?
    } else {
        let time = query
            .group_by
            .time()
            .ok_or(CompileError::EmptyField("groupBy.time"))?;
        duration("groupBy.time", time)?
    };
    let mut lines = vec![declare("period", period)];
    if batched || aggregate {
        required("every", &rule.every)?;
        lines.push(declare("every", duration("every", &rule.every)?));
    }
    Ok(lines)
}

fn declare(name: &str, value: impl AsRef<str>) -> String {
    format!("var {name} = {}", value.as_ref())
}

fn required(field: &'static str, value: &str) -> Result<(), CompileError> {
    if value.is_empty() {
        Err(CompileError::EmptyField(field))
    } else {
        Ok(())
    }
}
