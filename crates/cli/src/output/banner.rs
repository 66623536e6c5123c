use colored::Colorize;

const LOGO: &[&str] = &[
    r"   ████████╗██╗ ██████╗██╗  ██╗███████╗██████╗ ",
    r"   ╚══██╔══╝██║██╔════╝██║ ██╔╝██╔════╝██╔══██╗",
    r"      ██║   ██║██║     █████╔╝ █████╗  ██████╔╝",
    r"      ██║   ██║██║     ██╔═██╗ ██╔══╝  ██╔══██╗",
    r"      ██║   ██║╚██████╗██║  ██╗███████╗██║  ██║",
    r"      ╚═╝   ╚═╝ ╚═════╝╚═╝  ╚═╝╚══════╝╚═╝  ╚═╝",
    r"        ░░ Alert rules to TICKscript ░░",
];

pub fn print_banner() {
    let colors = [
        colored::Color::Cyan,
        colored::Color::Cyan,
        colored::Color::BrightCyan,
        colored::Color::BrightWhite,
        colored::Color::Cyan,
        colored::Color::Cyan,
        colored::Color::White,
    ];

    for (line, &color) in LOGO.iter().zip(colors.iter()) {
        println!("{}", line.color(color).bold());
    }
}

pub fn print_version_block(version: &str, handlers: usize) {
    print_banner();
    println!();
    println!("  {} {}", "Version ".dimmed(), version.bright_cyan().bold());
    println!("  {} {}", "Handlers".dimmed(), handlers.to_string().bright_white());
    println!("  {} {}", "    Arch".dimmed(), std::env::consts::ARCH.bright_white());
    println!("  {} {}", "      OS".dimmed(), std::env::consts::OS.bright_white());
    println!();
}
