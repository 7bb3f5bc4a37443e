use clap::Parser;
use std::path::PathBuf;

/// Arguments for resolve command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Locate an extracted database:\n    assetprov resolve geoip.dat\n\n\
                  Only the file name is used:\n    assetprov resolve /usr/share/v2ray/geosite.dat")]
pub struct ResolveArgs {
    /// Logical path requested by the consumer
    pub path: PathBuf,
}
