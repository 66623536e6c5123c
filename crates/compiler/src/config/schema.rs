use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct CompilerConfig {
    #[serde(default)]
    pub output: OutputConfig,
    /// Run the semantic validator over the whole generated program.
    #[serde(default = "yes")]
    pub validate_program: bool,
    #[serde(default = "default_http_endpoint")]
    pub http_endpoint: String,
}

/// Where alert history is written, and the tag and field keys it uses.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct OutputConfig {
    #[serde(default = "default_database")]
    pub database: String,
    #[serde(default = "default_retention_policy")]
    pub retention_policy: String,
    #[serde(default = "default_measurement")]
    pub measurement: String,
    #[serde(default = "default_id_tag")]
    pub id_tag: String,
    #[serde(default = "default_level_tag")]
    pub level_tag: String,
    #[serde(default = "default_message_field")]
    pub message_field: String,
    #[serde(default = "default_duration_field")]
    pub duration_field: String,
}

impl OutputConfig {
    pub fn entries(&self) -> [(&'static str, &str); 7] {
        [
            ("output.database", self.database.as_str()),
            ("output.retention_policy", self.retention_policy.as_str()),
            ("output.measurement", self.measurement.as_str()),
            ("output.id_tag", self.id_tag.as_str()),
            ("output.level_tag", self.level_tag.as_str()),
            ("output.message_field", self.message_field.as_str()),
            ("output.duration_field", self.duration_field.as_str()),
        ]
    }
}

impl Default for CompilerConfig {
    fn default() -> Self {
        Self {
            output: OutputConfig::default(),
            validate_program: true,
            http_endpoint: default_http_endpoint(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            database: default_database(),
            retention_policy: default_retention_policy(),
            measurement: default_measurement(),
            id_tag: default_id_tag(),
            level_tag: default_level_tag(),
            message_field: default_message_field(),
            duration_field: default_duration_field(),
        }
    }
}

fn default_database() -> String {
    "chronograf".to_string()
}

fn default_retention_policy() -> String {
    "autogen".to_string()
}

fn default_measurement() -> String {
    "alerts".to_string()
}

fn default_id_tag() -> String {
    "alertID".to_string()
}

fn default_level_tag() -> String {
    "level".to_string()
}

fn default_message_field() -> String {
    "value".to_string()
}

fn default_duration_field() -> String {
    "duration".to_string()
}

fn default_http_endpoint() -> String {
    "output".to_string()
}

fn yes() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserialize_full() {
        let yaml = r#"
output:
  database: history
  retention_policy: weekly
  measurement: fired
  id_tag: id
  level_tag: severity
  message_field: msg
  duration_field: took
validate_program: false
http_endpoint: alerts
"#;
        let cfg: CompilerConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(cfg.output.database, "history");
        assert_eq!(cfg.output.duration_field, "took");
        assert!(!cfg.validate_program);
        assert_eq!(cfg.http_endpoint, "alerts");
    }

    #[test]
    fn defaults_applied() {
        let cfg: CompilerConfig = serde_yaml::from_str("output:\n  database: other\n").unwrap();
        assert_eq!(cfg.output.database, "other");
        assert_eq!(cfg.output.retention_policy, "autogen");
        assert_eq!(cfg.output.measurement, "alerts");
        assert_eq!(cfg.output.id_tag, "alertID");
        assert!(cfg.validate_program);
        assert_eq!(cfg.http_endpoint, "output");
    }

    #[test]
    fn empty_document_matches_default() {
        let cfg: CompilerConfig = serde_yaml::from_str("{}").unwrap();
        assert_eq!(cfg, CompilerConfig::default());
    }
}
