//! InkRelay command-line entry point.

mod cli;
mod script;

use clap::Parser;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::debug!("Starting inkrelay v{}", env!("CARGO_PKG_VERSION"));

    cli::run(cli::Cli::parse())
}
