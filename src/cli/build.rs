use clap::Parser;
use std::path::PathBuf;

/// Arguments for the build command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                   Build using scriptweld.yaml:\n    scriptweld build\n\n\
                   Build without a config file:\n    scriptweld build --monolith mgtools.user.js --modules src/modules\n\n\
                   Accept manifest coverage gaps:\n    scriptweld build --allow-partial\n\n\
                   Verify reproducibility without writing:\n    scriptweld build --dry-run --json")]
pub struct BuildArgs {
    /// Monolith script path (overrides scriptweld.yaml)
    #[arg(long, value_name = "FILE")]
    pub monolith: Option<PathBuf>,

    /// Module directory (overrides scriptweld.yaml)
    #[arg(long, value_name = "DIR")]
    pub modules: Option<PathBuf>,

    /// Feature manifest path (overrides scriptweld.yaml)
    #[arg(long, value_name = "FILE")]
    pub manifest: Option<PathBuf>,

    /// Output artifact path (overrides scriptweld.yaml)
    #[arg(long, short = 'o', value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Continue with stand-ins when manifest units are missing everywhere
    #[arg(long = "allow-partial")]
    pub allow_partial: bool,

    /// Run the full pipeline but skip writing the artifact
    #[arg(long)]
    pub dry_run: bool,

    /// Print the build report as JSON
    #[arg(long)]
    pub json: bool,
}
