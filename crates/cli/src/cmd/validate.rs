use anyhow::{bail, Result};
use std::path::PathBuf;

use super::helpers;
use crate::output::{print_info, print_json, print_success, print_tick_error, OutputMode};

#[derive(clap::Args)]
pub struct ValidateArgs {
    #[arg(help = "TICKscript file")]
    script: PathBuf,
}

pub fn execute(args: ValidateArgs, mode: OutputMode) -> Result<()> {
    let source = helpers::read_script(&args.script)?;
    match ticker_common::check(&source) {
        Ok(program) => match mode {
            OutputMode::Json => print_json(&serde_json::json!({
                "valid": true,
                "statements": program.statements.len(),
            }))?,
            OutputMode::Human => {
                print_success(&format!("{} is valid", args.script.display()));
                print_info("Statements", &program.statements.len().to_string());
            }
        },
        Err(e) => {
            match mode {
                OutputMode::Json => print_json(&serde_json::json!({
                    "valid": false,
                    "error": e.to_string(),
                    "position": e.span(),
                }))?,
                OutputMode::Human => print_tick_error(&e, &source),
            }
            bail!("{} is not a valid TICKscript", args.script.display());
        }
    }
    Ok(())
}
