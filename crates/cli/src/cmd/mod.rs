mod compile;
mod config;
mod fmt;
mod handlers;
pub(crate) mod helpers;
mod validate;
mod version;

use anyhow::Result;
use clap::Subcommand;

#[derive(Subcommand)]
pub enum Commands {
    /// Compile an alert rule into a TICKscript task
    Compile(compile::CompileArgs),
    /// Check that a TICKscript parses and every node exists
    Validate(validate::ValidateArgs),
    /// Print a TICKscript in canonical layout
    Fmt(fmt::FmtArgs),
    /// List the alert handlers rules may use
    Handlers,
    /// Inspect the compiler configuration
    #[command(subcommand)]
    Config(config::ConfigCmd),
    Version,
}

pub fn run(opts: crate::Opts) -> Result<()> {
    let mode = opts.output_mode();
    match opts.cmd {
        Commands::Compile(args) => compile::execute(args, mode, opts.config),
        Commands::Validate(args) => validate::execute(args, mode),
        Commands::Fmt(args) => fmt::execute(args, mode),
        Commands::Handlers => handlers::execute(mode),
        Commands::Config(cmd) => config::execute(cmd, mode, opts.config),
        Commands::Version => {
            version::execute(mode);
            Ok(())
        }
    }
}
