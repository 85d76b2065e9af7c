use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

mod board;
mod cli;
mod config;
mod diagnostic;
mod error;
mod input;
mod outline;
mod output;
mod rollup;

use cli::{Cli, Commands};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // RUST_LOG wins; otherwise only show debug logs with --verbose
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("planledger=debug")
        } else {
            EnvFilter::new("planledger=warn")
        }
    });

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let verbose = cli.verbose;
    match cli.command {
        Commands::Dump(args) => cli::report::dump(args, verbose),
        Commands::Resources(args) => cli::report::resources(args, verbose),
        Commands::Csv(args) => cli::report::csv(args, verbose),
        Commands::Prioritized(args) => cli::report::prioritized(args, verbose),
        Commands::Asks(args) => cli::report::asks(args, verbose),
        Commands::Teams(args) => cli::report::teams(args, verbose),
        Commands::Export(args) => cli::export::execute(args, verbose),
        Commands::Check(args) => cli::check::execute(args, verbose),
        Commands::Board { command } => cli::board::execute(command),
        Commands::Schema => cli::schema::execute(),
    }
}
