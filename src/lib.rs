#![doc = include_str!("../README.md")]

pub mod bump;
pub mod cli;
pub mod command;
pub mod config;
pub mod error;
pub mod fs;
pub mod registry;

pub use error::*;

pub fn run() -> Result<()> {
    use clap::Parser;

    let cli = cli::Cli::parse();
    init_logging(cli.verbose);
    command::bump::execute(cli.bump)
}

/// Logs to stderr at `warn` (or `debug` with `--verbose`) unless `RUST_LOG`
/// says otherwise.
fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default))
        .format_timestamp(None)
        .init();
}
