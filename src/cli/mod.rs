//! CLI definitions using clap derive API
//!
//! This module is organized into submodules for each command's argument types:
//! - provision: Provision command arguments
//! - status: Status command arguments
//! - resolve: Resolve command arguments
//! - completions: Completions command arguments

use clap::builder::{Styles, styling::AnsiColor};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

pub mod completions;
pub mod provision;
pub mod resolve;
pub mod status;

pub use completions::CompletionsArgs;
pub use provision::ProvisionArgs;
pub use resolve::ResolveArgs;
pub use status::StatusArgs;

/// assetprov - bundled asset provisioning
///
/// Extract versioned auxiliary assets from a read-only bundle and locate them afterwards.
#[derive(Parser, Debug)]
#[command(
    name = "assetprov",
    author,
    version,
    styles = Styles::styled()
        .header(AnsiColor::Green.on_default().bold())
        .usage(AnsiColor::Green.on_default().bold())
        .literal(AnsiColor::Cyan.on_default().bold())
        .placeholder(AnsiColor::Cyan.on_default()),
    about = "Versioned extraction of bundled auxiliary assets",
    long_about = "assetprov extracts the bundled routing databases and helper script into \
                  writable directories, re-extracting them only when the bundle carries a \
                  newer official version or a refresh is forced.",
    after_help = "\x1b[1m\x1b[32mExamples:\x1b[0m\n   \
                  assetprov provision                   \x1b[90m# Extract missing or outdated assets\x1b[0m\n   \
                  assetprov provision --force           \x1b[90m# Re-extract everything\x1b[0m\n   \
                  assetprov status                      \x1b[90m# Show installed and bundled versions\x1b[0m\n   \
                  assetprov resolve geoip.dat           \x1b[90m# Show where a file is served from\x1b[0m\n\n\
                  "
)]
pub struct Cli {
    /// Configuration file (defaults to $ASSETPROV_CONFIG, then ./assetprov.yaml)
    #[arg(long, short = 'c', global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Extract missing or outdated assets
    Provision(ProvisionArgs),

    /// Show installed and bundled versions
    Status(StatusArgs),

    /// Show where a logical file is served from
    Resolve(ResolveArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Channel selection shared by commands that evaluate the update policy
#[derive(Args, Debug, Default, Clone, Copy)]
pub struct ChannelArgs {
    /// Follow the official channel for replaceable assets
    #[arg(long, conflicts_with = "custom_channel")]
    pub official_channel: bool,

    /// Never auto-upgrade replaceable assets
    #[arg(long)]
    pub custom_channel: bool,
}

impl ChannelArgs {
    /// Resolve the channel, falling back to the configured default
    pub fn use_official(self, configured: bool) -> bool {
        if self.official_channel {
            true
        } else if self.custom_channel {
            false
        } else {
            configured
        }
    }
}
