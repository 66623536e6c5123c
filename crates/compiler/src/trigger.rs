//! Alert pipeline skeletons, one per trigger kind.

use tracing::debug;

use crate::error::CompileError;
use crate::operator::Operator;
use crate::rule::{AlertRule, ChangeKind, TriggerKind};

const THRESHOLD: &str = r#"var trigger = data
    |alert()
        .crit(lambda: "value" {op} crit)"#;

const THRESHOLD_RANGE: &str = r#"var trigger = data
    |alert()
        .crit(lambda: "value" {lower} lower {combinator} "value" {upper} upper)"#;

const RELATIVE_ABSOLUTE: &str = r#"var past = data
    |shift(shift)

var current = data

var trigger = past
    |join(current)
        .as('past', 'current')
    |eval(lambda: float("current.value" - "past.value"))
        .keep()
        .as('value')
    |alert()
        .crit(lambda: "value" {op} crit)"#;

const RELATIVE_PERCENT: &str = r#"var past = data
    |shift(shift)

var current = data

var trigger = past
    |join(current)
        .as('past', 'current')
    |eval(lambda: abs(float("current.value" - "past.value")) / float("past.value") * 100.0)
        .keep()
        .as('value')
    |alert()
        .crit(lambda: "value" {op} crit)"#;

const DEADMAN: &str = "var trigger = data
    |deadman(threshold, period)";

/// The trigger body followed by the alert settings every rule shares.
pub fn trigger(rule: &AlertRule) -> Result<String, CompileError> {
    let body = trigger_body(rule)?;
    Ok(format!("{body}{}", all_alerts(rule)))
}

pub fn trigger_body(rule: &AlertRule) -> Result<String, CompileError> {
    let kind = TriggerKind::from_name(&rule.trigger)
        .ok_or_else(|| CompileError::UnknownTrigger(rule.trigger.clone()))?;
    let values = &rule.values;

    let body = match kind {
        TriggerKind::Deadman => DEADMAN.to_string(),
        TriggerKind::Threshold if values.range_value.is_empty() => {
            let op = values.operator.parse::<Operator>()?.symbol()?;
            THRESHOLD.replace("{op}", op)
        }
        TriggerKind::Threshold => {
            let range = values.operator.parse::<Operator>()?.range_symbols()?;
            THRESHOLD_RANGE
                .replace("{lower}", range.lower)
                .replace("{combinator}", range.combinator)
                .replace("{upper}", range.upper)
        }
        TriggerKind::Relative => {
            let template = match ChangeKind::from_name(&values.change) {
                Some(ChangeKind::Percent) => RELATIVE_PERCENT,
                Some(ChangeKind::Absolute) => RELATIVE_ABSOLUTE,
                None => return Err(CompileError::UnknownChange(values.change.clone())),
            };
            let op = values.operator.parse::<Operator>()?.symbol()?;
            template.replace("{op}", op)
        }
    };
    debug!(trigger = kind.as_str(), "trigger selected");
    Ok(body)
}

fn all_alerts(rule: &AlertRule) -> String {
    let mut out = String::new();
    if rule.state_changes_only {
        out.push_str("\n        .stateChangesOnly()");
    }
    out.push_str(
        "\n        .message(message)\
         \n        .id(idVar)\
         \n        .idTag(idTag)\
         \n        .levelTag(levelTag)\
         \n        .messageField(messageField)\
         \n        .durationField(durationField)",
    );
    if rule.details().is_some() {
        out.push_str("\n        .details(details)");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rule::TriggerValues;

    fn rule(trigger: &str, values: TriggerValues) -> AlertRule {
        AlertRule {
            trigger: trigger.into(),
            values,
            ..Default::default()
        }
    }

    fn values(operator: &str) -> TriggerValues {
        TriggerValues {
            operator: operator.into(),
            value: "90".into(),
            ..Default::default()
        }
    }

    #[test]
    fn plain_threshold() {
        let body = trigger_body(&rule("threshold", values("equal to"))).unwrap();
        assert!(body.contains(r#".crit(lambda: "value" == crit)"#));
    }

    #[test]
    fn range_threshold() {
        let mut v = values("outside range");
        v.range_value = "100".into();
        let body = trigger_body(&rule("threshold", v)).unwrap();
        assert!(body.contains(r#".crit(lambda: "value" < lower OR "value" > upper)"#));
    }

    #[test]
    fn range_with_plain_operator_fails() {
        let mut v = values("greater than");
        v.range_value = "100".into();
        assert!(matches!(
            trigger_body(&rule("threshold", v)),
            Err(CompileError::UnknownOperator(_))
        ));
    }

    #[test]
    fn relative_percent_and_absolute() {
        let mut v = values("greater than");
        v.change = "% change".into();
        let percent = trigger_body(&rule("relative", v.clone())).unwrap();
        assert!(percent.contains("abs(float(\"current.value\" - \"past.value\")) / float(\"past.value\") * 100.0"));
        v.change = "change".into();
        let absolute = trigger_body(&rule("relative", v)).unwrap();
        assert!(absolute.contains("|eval(lambda: float(\"current.value\" - \"past.value\"))"));
        assert!(!absolute.contains("abs("));
        assert!(absolute.contains(r#".crit(lambda: "value" > crit)"#));
    }

    #[test]
    fn unknown_change() {
        let mut v = values("greater than");
        v.change = "delta".into();
        let err = trigger_body(&rule("relative", v)).unwrap_err();
        assert_eq!(err.to_string(), "unknown change type: delta");
    }

    #[test]
    fn deadman_ignores_operator() {
        let body = trigger_body(&rule("deadman", values("nonsense"))).unwrap();
        assert_eq!(body, DEADMAN);
    }

    #[test]
    fn unknown_trigger() {
        assert!(matches!(
            trigger_body(&rule("sometimes", values("equal to"))),
            Err(CompileError::UnknownTrigger(t)) if t == "sometimes"
        ));
    }

    #[test]
    fn unknown_operator_propagates() {
        assert!(matches!(
            trigger_body(&rule("threshold", values("roughly"))),
            Err(CompileError::UnknownOperator(op)) if op == "roughly"
        ));
    }

    #[test]
    fn epilogue_toggles() {
        let mut r = rule("threshold", values("greater than"));
        let plain = trigger(&r).unwrap();
        assert!(!plain.contains("stateChangesOnly"));
        assert!(plain.ends_with(".durationField(durationField)"));
        r.state_changes_only = true;
        r.details = Some("body".into());
        let full = trigger(&r).unwrap();
        assert!(full.contains("\n        .stateChangesOnly()\n        .message(message)"));
        assert!(full.ends_with(".details(details)"));
    }
}
