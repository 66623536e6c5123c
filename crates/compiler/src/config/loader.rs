use std::path::Path;

use super::schema::CompilerConfig;

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
    #[error("parse: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("validation: {0}")]
    Validation(String),
}

pub fn load_from_file(path: &Path) -> Result<CompilerConfig, LoadError> {
    let contents = std::fs::read_to_string(path)?;
    load_from_str(&contents)
}

pub fn load_from_str(yaml: &str) -> Result<CompilerConfig, LoadError> {
    let cfg: CompilerConfig = serde_yaml::from_str(yaml)?;
    validate(&cfg)?;
    Ok(cfg)
}

fn validate(cfg: &CompilerConfig) -> Result<(), LoadError> {
    for (key, value) in cfg.output.entries() {
        if value.is_empty() {
            return Err(LoadError::Validation(format!("{key} must not be empty")));
        }
        if value.chars().any(char::is_control) {
            return Err(LoadError::Validation(format!(
                "{key} must not contain control characters"
            )));
        }
    }
    if cfg.http_endpoint.is_empty() || cfg.http_endpoint.chars().any(char::is_whitespace) {
        return Err(LoadError::Validation(
            "http_endpoint must be a non-empty name without whitespace".into(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_config() {
        let cfg = load_from_str("output:\n  measurement: history\nhttp_endpoint: out\n").unwrap();
        assert_eq!(cfg.output.measurement, "history");
        assert_eq!(cfg.http_endpoint, "out");
    }

    #[test]
    fn empty_output_key_rejected() {
        let err = load_from_str("output:\n  level_tag: \"\"\n").unwrap_err();
        assert!(err.to_string().contains("output.level_tag must not be empty"));
    }

    #[test]
    fn control_characters_rejected() {
        let err = load_from_str("output:\n  database: \"a\\nb\"\n").unwrap_err();
        assert!(matches!(err, LoadError::Validation(_)));
    }

    #[test]
    fn endpoint_with_space_rejected() {
        let err = load_from_str("http_endpoint: my output\n").unwrap_err();
        assert!(err.to_string().contains("http_endpoint"));
    }

    #[test]
    fn malformed_yaml_is_parse_error() {
        let err = load_from_str("output: [1, 2").unwrap_err();
        assert!(matches!(err, LoadError::Parse(_)));
    }

    #[test]
    fn load_from_file_works() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ticker.yml");
        std::fs::write(&path, "validate_program: false\n").unwrap();
        let cfg = load_from_file(&path).unwrap();
        assert!(!cfg.validate_program);
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_from_file(&dir.path().join("absent.yml")).unwrap_err();
        assert!(matches!(err, LoadError::Io(_)));
    }
}
