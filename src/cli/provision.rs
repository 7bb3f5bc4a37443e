use clap::Parser;

use super::ChannelArgs;

/// Arguments for provision command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Extract missing or outdated assets:\n    assetprov provision\n\n\
                  Re-extract everything:\n    assetprov provision --force\n\n\
                  Refresh a single asset:\n    assetprov provision --force --only geoip.dat\n\n\
                  Keep user-supplied databases:\n    assetprov provision --custom-channel")]
pub struct ProvisionArgs {
    /// Extract even when the installed version is current
    #[arg(long, short = 'f')]
    pub force: bool,

    /// Only provision this asset (geoip.dat, geosite.dat, index.js)
    #[arg(long, value_name = "NAME")]
    pub only: Option<String>,

    #[command(flatten)]
    pub channel: ChannelArgs,
}
