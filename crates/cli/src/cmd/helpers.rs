use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use ticker_compiler::config::load_from_file;
use ticker_compiler::{AlertRule, CompilerConfig};
use tracing::debug;

pub fn default_config_path() -> PathBuf {
    if let Some(dir) = dirs::config_dir() {
        return dir.join("ticker").join("ticker.yml");
    }
    PathBuf::from("/etc/ticker/ticker.yml")
}

/// An explicit path must load; the default path is optional.
pub fn load_config(config_path: Option<&str>) -> Result<CompilerConfig> {
    let path = match config_path {
        Some(p) => PathBuf::from(p),
        None => {
            let path = default_config_path();
            if !path.exists() {
                debug!(path = %path.display(), "no config file, using defaults");
                return Ok(CompilerConfig::default());
            }
            path
        }
    };

    load_from_file(&path).with_context(|| format!("loading config from {}", path.display()))
}

/// Reads `data` as a file when such a file exists, otherwise as inline text.
pub fn read_input(data: &str) -> Result<String> {
    if Path::new(data).exists() {
        std::fs::read_to_string(data).with_context(|| format!("reading {data}"))
    } else {
        Ok(data.to_string())
    }
}

pub fn parse_rule(data: &str) -> Result<AlertRule> {
    let text = read_input(data)?;
    serde_json::from_str(&text).context("parsing alert rule JSON")
}

pub fn read_script(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))
}
