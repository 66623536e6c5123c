use anyhow::Result;
use colored::Colorize;
use serde::Serialize;
use ticker_common::catalog;
use ticker_compiler::rule::HandlerKind;

use crate::output::{build_table, method_cell, print_json, theme, OutputMode};

#[derive(Serialize)]
struct HandlerInfo {
    method: &'static str,
    aliases: Vec<&'static str>,
    args: String,
    properties: Vec<&'static str>,
}

fn handler_infos() -> Vec<HandlerInfo> {
    HandlerKind::ALL
        .into_iter()
        .map(|kind| {
            let spec = catalog::handler_spec(kind.method());
            HandlerInfo {
                method: kind.method(),
                aliases: kind.aliases().collect(),
                args: spec.map_or_else(|| "-".to_string(), |s| s.args.to_string()),
                properties: spec
                    .map(|s| s.properties.iter().map(|p| p.name).collect())
                    .unwrap_or_default(),
            }
        })
        .collect()
}

pub fn execute(mode: OutputMode) -> Result<()> {
    let infos = handler_infos();
    match mode {
        OutputMode::Json => print_json(&infos)?,
        OutputMode::Human => {
            theme::print_header("Alert Handlers");
            let mut table = build_table(&["Method", "Aliases", "Args", "Properties"]);
            for info in &infos {
                table.add_row(vec![
                    method_cell(info.method),
                    info.aliases.join(", ").into(),
                    info.args.as_str().into(),
                    info.properties.join(", ").into(),
                ]);
            }
            println!("{table}");
            println!("  {}", format!("{} handlers", infos.len()).dimmed());
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_handler_has_a_spec() {
        for info in handler_infos() {
            assert_ne!(info.args, "-", "{} missing from catalog", info.method);
        }
    }

    #[test]
    fn email_lists_smtp_alias() {
        let infos = handler_infos();
        let email = infos.iter().find(|i| i.method == "email").unwrap();
        assert_eq!(email.aliases, vec!["smtp"]);
        assert_eq!(email.properties, vec!["to"]);
    }
}
