use clap::Parser;

/// Arguments for the status command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                   Show extraction coverage:\n    scriptweld status\n\n\
                   Machine-readable status:\n    scriptweld status --json")]
pub struct StatusArgs {
    /// Print the status report as JSON
    #[arg(long)]
    pub json: bool,
}
