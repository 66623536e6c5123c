use tracing::debug;

use crate::config::CompilerConfig;
use crate::rule::{AlertRule, TriggerKind};
use crate::value::quote;

const DEADMAN_RENAME: &str = r#"
    |eval(lambda: "emitted")
        .as('value')
        .keep('value', messageField, durationField)"#;

/// Alert history written back to InfluxDB, and the HTTP endpoint exposing
/// the latest alert.
pub fn output(rule: &AlertRule, config: &CompilerConfig) -> String {
    let rename = if rule.trigger == TriggerKind::Deadman.as_str() {
        DEADMAN_RENAME
    } else {
        ""
    };
    debug!(endpoint = %config.http_endpoint, "output section assembled");
    format!(
        r#"trigger{rename}
    |eval(lambda: float("value"))
        .as('value')
        .keep()
    |influxDBOut()
        .create()
        .database(outputDB)
        .retentionPolicy(outputRP)
        .measurement(outputMeasurement)
        .tag('alertName', name)
        .tag('triggerType', triggerType)

trigger
    |httpOut({})
"#,
        quote(&config.http_endpoint)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn threshold_output() {
        let rule = AlertRule {
            trigger: "threshold".into(),
            ..Default::default()
        };
        let out = output(&rule, &CompilerConfig::default());
        assert!(out.starts_with("trigger\n    |eval(lambda: float(\"value\"))"));
        assert!(out.contains(".tag('triggerType', triggerType)"));
        assert!(out.ends_with("trigger\n    |httpOut('output')\n"));
    }

    #[test]
    fn deadman_renames_emitted() {
        let rule = AlertRule {
            trigger: "deadman".into(),
            ..Default::default()
        };
        let out = output(&rule, &CompilerConfig::default());
        assert!(out.starts_with("trigger\n    |eval(lambda: \"emitted\")"));
    }

    #[test]
    fn endpoint_is_configurable() {
        let config = CompilerConfig {
            http_endpoint: "latest".into(),
            ..Default::default()
        };
        assert!(output(&AlertRule::default(), &config).contains("|httpOut('latest')"));
    }
}
