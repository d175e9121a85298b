#![deny(missing_docs)]

//! # OAS2GQL CLI
//!
//! Command Line Interface converting OpenAPI documents into GraphQL schemas.
//!
//! Supported Commands:
//! - `convert`: Reads an OpenAPI document (file or URL) and prints GraphQL SDL.

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod convert;
mod error;
mod source;

/// Environment variable overriding the log filter.
const LOG_LEVEL_ENV: &str = "LOG_LEVEL";

#[derive(Parser, Debug)]
#[clap(author, version, about = "OpenAPI to GraphQL schema converter")]
struct Cli {
    /// Log conversion details (merges, dropped fields).
    #[clap(long, short, global = true)]
    verbose: bool,

    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Converts an OpenAPI document into GraphQL SDL.
    Convert(convert::ConvertArgs),
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_env(LOG_LEVEL_ENV).unwrap_or_else(|_| EnvFilter::new(default));

    if tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_env_filter(filter)
        .try_init()
        .is_err()
    {
        eprintln!("Warning: tracing subscriber already initialized");
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match &cli.command {
        Commands::Convert(args) => convert::execute(args),
    };

    if let Err(e) = result {
        tracing::error!("{}", e);
        std::process::exit(1);
    }
}
