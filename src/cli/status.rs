use clap::Parser;

use super::ChannelArgs;

/// Arguments for status command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Show asset versions:\n    assetprov status\n\n\
                  Preview the custom channel policy:\n    assetprov status --custom-channel")]
pub struct StatusArgs {
    #[command(flatten)]
    pub channel: ChannelArgs,
}
