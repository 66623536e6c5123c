use anyhow::{Context, Result};
use std::path::PathBuf;
use ticker_compiler::Compiler;

use super::helpers;
use crate::output::{print_json, print_success, OutputMode};

#[derive(clap::Args)]
pub struct CompileArgs {
    #[arg(help = "Rule JSON file path or inline JSON")]
    rule: String,
    #[arg(long, short, help = "Write the script to a file instead of stdout")]
    out: Option<PathBuf>,
}

pub fn execute(args: CompileArgs, mode: OutputMode, config_path: Option<String>) -> Result<()> {
    let config = helpers::load_config(config_path.as_deref())?;
    let rule = helpers::parse_rule(&args.rule)?;
    let script = Compiler::new(config)
        .compile(&rule)
        .with_context(|| format!("compiling rule {:?}", rule.name))?;

    if let Some(path) = &args.out {
        std::fs::write(path, script.as_str())
            .with_context(|| format!("writing {}", path.display()))?;
    }

    match mode {
        OutputMode::Json => print_json(&serde_json::json!({
            "id": rule.id,
            "name": rule.name,
            "tickscript": script,
        }))?,
        OutputMode::Human => match &args.out {
            Some(path) => print_success(&format!("Wrote {}", path.display())),
            None => print!("{script}"),
        },
    }
    Ok(())
}
