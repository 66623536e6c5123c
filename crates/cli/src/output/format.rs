use colored::Colorize;
use serde::Serialize;
use ticker_common::TickError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Human,
    Json,
}

pub fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub fn print_success(msg: &str) {
    println!("{} {}", "✓".green().bold(), msg);
}

pub fn print_error(msg: &str) {
    eprintln!("{} {}", "✗".red().bold(), msg);
}

pub fn print_info(label: &str, value: &str) {
    println!("  {}: {}", label.bold(), value);
}

/// The offending source line with a caret under the error column.
pub fn caret_line(err: &TickError, source: &str) -> Option<String> {
    let span = err.span();
    let line = source.lines().nth(span.line.checked_sub(1)?)?;
    let pad = " ".repeat(span.column.saturating_sub(1));
    Some(format!("{line}\n{pad}^"))
}

pub fn print_tick_error(err: &TickError, source: &str) {
    print_error(&err.to_string());
    if let Some(snippet) = caret_line(err, source) {
        for line in snippet.lines() {
            eprintln!("    {}", line.dimmed());
        }
    }
}
