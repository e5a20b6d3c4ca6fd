use clap::Parser;

/// Arguments for completions command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Generate bash completions:\n    scriptweld completions bash > ~/.bash_completion.d/scriptweld\n\n\
                  Generate zsh completions:\n    scriptweld completions zsh > ~/.zfunc/_scriptweld\n\n\
                  Generate fish completions:\n    scriptweld completions fish > ~/.config/fish/completions/scriptweld.fish\n\n\
                  Generate PowerShell completions:\n    scriptweld completions powershell")]
pub struct CompletionsArgs {
    /// Shell type (bash, elvish, fish, powershell, zsh)
    pub shell: String,
}
