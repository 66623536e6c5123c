#[cfg(test)]
mod tests {
    use crate::cmd::helpers;

    const RULE: &str = r#"{
        "name": "cpu high",
        "trigger": "threshold",
        "alerts": ["slack"],
        "values": {"operator": "greater than", "value": "90"},
        "query": {"database": "telegraf", "retentionPolicy": "autogen", "measurement": "cpu"}
    }"#;

    #[test]
    fn default_config_path_not_empty() {
        let path = helpers::default_config_path();
        assert!(path.ends_with("ticker/ticker.yml"));
    }

    #[test]
    fn load_config_missing_file() {
        let result = helpers::load_config(Some("/nonexistent/path.yml"));
        assert!(result.is_err());
    }

    #[test]
    fn load_config_from_tempfile() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ticker.yml");
        std::fs::write(
            &path,
            r#"
http_endpoint: latest
output:
  database: history
"#,
        )
        .unwrap();

        let cfg = helpers::load_config(Some(path.to_str().unwrap())).unwrap();
        assert_eq!(cfg.http_endpoint, "latest");
        assert_eq!(cfg.output.database, "history");
        assert_eq!(cfg.output.retention_policy, "autogen");
        assert!(cfg.validate_program);
    }

    #[test]
    fn load_config_rejects_invalid_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ticker.yml");
        std::fs::write(&path, "http_endpoint: \"two words\"\n").unwrap();

        let err = helpers::load_config(Some(path.to_str().unwrap())).unwrap_err();
        assert!(format!("{err:#}").contains("validation"));
    }

    #[test]
    fn parse_rule_inline() {
        let rule = helpers::parse_rule(RULE).unwrap();
        assert_eq!(rule.name, "cpu high");
        assert_eq!(rule.alerts, vec!["slack"]);
        assert_eq!(rule.query.measurement, "cpu");
    }

    #[test]
    fn parse_rule_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rule.json");
        std::fs::write(&path, RULE).unwrap();

        let rule = helpers::parse_rule(path.to_str().unwrap()).unwrap();
        assert_eq!(rule.values.value, "90");
    }

    #[test]
    fn parse_rule_rejects_garbage() {
        assert!(helpers::parse_rule("{not json").is_err());
    }

    #[test]
    fn read_script_missing_file() {
        assert!(helpers::read_script(std::path::Path::new("/nonexistent/x.tick")).is_err());
    }
}
