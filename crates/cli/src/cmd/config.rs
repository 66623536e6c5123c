use anyhow::Result;
use clap::Subcommand;
use colored::{ColoredString, Colorize};

use super::helpers;
use crate::output::{print_error, print_json, print_success, theme, OutputMode};

#[derive(Subcommand)]
pub enum ConfigCmd {
    /// Show the effective compiler configuration
    Show,
    /// Check the configuration file
    Validate,
    /// Print the configuration file path
    Path,
}

pub fn execute(cmd: ConfigCmd, mode: OutputMode, config_path: Option<String>) -> Result<()> {
    match cmd {
        ConfigCmd::Show => show(mode, config_path),
        ConfigCmd::Validate => validate(mode, config_path),
        ConfigCmd::Path => path(config_path),
    }
}

fn show(mode: OutputMode, config_path: Option<String>) -> Result<()> {
    let cfg = helpers::load_config(config_path.as_deref())?;

    match mode {
        OutputMode::Json => print_json(&cfg)?,
        OutputMode::Human => {
            theme::print_header("Compiler Configuration");

            theme::print_section("Alert history");
            theme::print_kv("Database", cfg.output.database.bright_white());
            theme::print_kv("Retention", cfg.output.retention_policy.bright_white());
            theme::print_kv("Measurement", cfg.output.measurement.bright_white());

            theme::print_section("Keys");
            theme::print_kv("ID tag", cfg.output.id_tag.bright_white());
            theme::print_kv("Level tag", cfg.output.level_tag.bright_white());
            theme::print_kv("Message field", cfg.output.message_field.bright_white());
            theme::print_kv("Duration field", cfg.output.duration_field.bright_white());

            theme::print_section("Compiler");
            theme::print_kv("Validate", switch(cfg.validate_program));
            theme::print_kv("HTTP endpoint", cfg.http_endpoint.bright_white());
            println!();
        }
    }

    Ok(())
}

fn switch(on: bool) -> ColoredString {
    if on {
        "on".green()
    } else {
        "off".red()
    }
}

fn validate(mode: OutputMode, config_path: Option<String>) -> Result<()> {
    match helpers::load_config(config_path.as_deref()) {
        Ok(_cfg) => match mode {
            OutputMode::Json => print_json(&serde_json::json!({"valid": true}))?,
            OutputMode::Human => print_success("Configuration is valid"),
        },
        Err(e) => match mode {
            OutputMode::Json => {
                print_json(&serde_json::json!({"valid": false, "error": format!("{e:#}")}))?;
            }
            OutputMode::Human => print_error(&format!("Invalid configuration: {e:#}")),
        },
    }

    Ok(())
}

fn path(config_path: Option<String>) -> Result<()> {
    let p = config_path
        .map(std::path::PathBuf::from)
        .unwrap_or_else(helpers::default_config_path);

    println!("{}", p.display());
    Ok(())
}
