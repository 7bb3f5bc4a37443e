use clap::Parser;
use clap_complete::Shell;

/// Arguments for completions command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Generate bash completions:\n    assetprov completions bash > ~/.bash_completion.d/assetprov\n\n\
                  Generate zsh completions:\n    assetprov completions zsh > ~/.zfunc/_assetprov\n\n\
                  Generate fish completions:\n    assetprov completions fish > ~/.config/fish/completions/assetprov.fish")]
pub struct CompletionsArgs {
    /// Shell type (bash, elvish, fish, powershell, zsh)
    #[arg(ignore_case = true)]
    pub shell: Shell,
}
