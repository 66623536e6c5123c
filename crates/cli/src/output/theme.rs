use colored::Colorize;
use std::fmt::Display;

const LABEL_WIDTH: usize = 16;

/// Bold title underlined to its own width.
pub fn print_header(title: &str) {
    println!();
    println!("  {}", title.bright_cyan().bold());
    println!("  {}", "═".repeat(title.chars().count()).cyan());
}

pub fn print_section(title: &str) {
    println!();
    println!("  {} {}", "●".bright_cyan(), title.bold());
}

pub fn print_kv(label: &str, value: impl Display) {
    println!("    {} {value}", format!("{label:<LABEL_WIDTH$}").dimmed());
}
