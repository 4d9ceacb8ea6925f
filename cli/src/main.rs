mod cli;
mod commands;

use cli::{Cli, Commands};
use commands::{sample, score};

/// Default filter when `RUST_LOG` is unset, raised by each `-v`.
fn default_filter(verbose: u8) -> &'static str {
    match verbose {
        0 => "info",
        1 => "districtor=debug,info",
        _ => "districtor=trace,debug",
    }
}

pub fn run() -> anyhow::Result<()> {
    use clap::Parser;

    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter(cli.verbose))),
        )
        .with_writer(std::io::stderr)
        .init();

    match &cli.command {
        Commands::Sample(args) => sample::run(&cli, args),
        Commands::Score(args) => score::run(&cli, args),
    }
}

fn main() -> anyhow::Result<()> { run() }
