mod cmd;
mod output;
#[cfg(test)]
mod tests;

use anyhow::Result;
use clap::Parser;
use cmd::Commands;
use output::OutputMode;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "ticker", version, about = "Compile alert rules into TICKscript")]
pub struct Opts {
    #[clap(subcommand)]
    cmd: Commands,

    #[arg(long, global = true, help = "Output as JSON")]
    json: bool,

    #[arg(long, global = true, env = "TICKER_CONFIG", help = "Path to compiler config file")]
    config: Option<String>,

    #[arg(short, long, global = true, help = "Log compiler internals to stderr")]
    verbose: bool,

    #[arg(long, global = true, help = "Emit logs as JSON")]
    log_json: bool,
}

impl Opts {
    pub fn output_mode(&self) -> OutputMode {
        if self.json {
            OutputMode::Json
        } else {
            OutputMode::Human
        }
    }

    pub fn log_level(&self) -> &'static str {
        if self.verbose {
            "debug"
        } else {
            "warn"
        }
    }
}

fn init_tracing(opts: &Opts) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(opts.log_level()));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if opts.log_json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn main() -> Result<()> {
    let opts = Opts::parse();
    init_tracing(&opts);
    cmd::run(opts)
}
