//! assetprov - bundled asset provisioning
//!
//! Command line driver over the `assetprov` library: extracts the bundled routing
//! databases and helper script, and reports where they are served from.

use clap::Parser;
use env_logger::{Builder, Env};

mod cli;
mod commands;

use cli::{Cli, Commands};

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    Builder::from_env(Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = cli.config.as_deref();
    let result = match cli.command {
        Commands::Provision(args) => commands::provision::run(config, args),
        Commands::Status(args) => commands::status::run(config, args),
        Commands::Resolve(args) => commands::resolve::run(config, args),
        Commands::Completions(args) => commands::completions::run(args),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
