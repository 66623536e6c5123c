use anyhow::{Context, Result};
use std::path::PathBuf;

use super::helpers;
use crate::output::{print_json, print_success, print_tick_error, OutputMode};

#[derive(clap::Args)]
pub struct FmtArgs {
    #[arg(help = "TICKscript file")]
    script: PathBuf,
    #[arg(long, short, help = "Rewrite the file in place")]
    write: bool,
}

pub fn execute(args: FmtArgs, mode: OutputMode) -> Result<()> {
    let source = helpers::read_script(&args.script)?;
    let program = match ticker_common::parse(&source) {
        Ok(program) => program,
        Err(e) => {
            if mode == OutputMode::Human {
                print_tick_error(&e, &source);
            }
            return Err(e).with_context(|| format!("parsing {}", args.script.display()));
        }
    };
    let formatted = ticker_common::format_program(&program);
    let changed = formatted != source;

    if args.write && changed {
        std::fs::write(&args.script, &formatted)
            .with_context(|| format!("writing {}", args.script.display()))?;
    }

    match mode {
        OutputMode::Json => print_json(&serde_json::json!({
            "changed": changed,
            "formatted": formatted,
        }))?,
        OutputMode::Human if args.write => {
            let verb = if changed { "Formatted" } else { "Already formatted" };
            print_success(&format!("{verb} {}", args.script.display()));
        }
        OutputMode::Human => print!("{formatted}"),
    }
    Ok(())
}
