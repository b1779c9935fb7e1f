//! flowdocctl - describe workflow exports in plain language
//!
//! Usage:
//!   flowdocctl describe export.json
//!   flowdocctl describe export.json -o markdown > summary.md
//!   cat export.json | flowdocctl activities -

use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;
mod output;

use cli::Cli;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    cli.execute()
}

/// Log to stderr so stdout stays clean for json/yaml output
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
