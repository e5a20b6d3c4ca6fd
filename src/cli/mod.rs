//! CLI definitions using clap derive API
//!
//! This module is organized into submodules for each command's argument types:
//! - build: Build command arguments
//! - status: Status command arguments
//! - completions: Completions command arguments

use clap::builder::{Styles, styling::AnsiColor};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub mod build;
pub mod completions;
pub mod status;

pub use build::BuildArgs;
pub use completions::CompletionsArgs;
pub use status::StatusArgs;

/// Scriptweld - incremental userscript modularization
///
/// Welds extracted modules and the remaining monolith back into one script.
#[derive(Parser, Debug)]
#[command(
    name = "scriptweld",
    author,
    version,
    color = clap::ColorChoice::Always,
    styles = Styles::styled()
        .header(AnsiColor::Green.on_default().bold())
        .usage(AnsiColor::Green.on_default().bold())
        .literal(AnsiColor::Cyan.on_default().bold())
        .placeholder(AnsiColor::Cyan.on_default()),
    about = "Module bundler for incrementally modularized userscripts",
    long_about = "Scriptweld rebuilds a single distributable userscript from a legacy monolith \
                  and the modules extracted from it so far, ordering modules by their declared \
                  dependencies and keeping every not-yet-extracted section exactly where the \
                  monolith had it.",
    after_help = "\x1b[1m\x1b[32mExamples:\x1b[0m\n   \
                  scriptweld build                      \x1b[90m# Build from scriptweld.yaml\x1b[0m\n   \
                  scriptweld build --allow-partial      \x1b[90m# Accept manifest coverage gaps\x1b[0m\n   \
                  scriptweld build --dry-run --json     \x1b[90m# Verify without writing output\x1b[0m\n   \
                  scriptweld status                     \x1b[90m# Show extraction coverage\x1b[0m\n\n\
                  "
)]
pub struct Cli {
    /// Project directory (defaults to the nearest ancestor with scriptweld.yaml)
    #[arg(long, short = 'p', global = true, env = "SCRIPTWELD_PROJECT")]
    pub project: Option<PathBuf>,

    /// Enable verbose output
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Assemble the output script from modules and the monolith
    Build(BuildArgs),

    /// Show extraction coverage without writing output
    Status(StatusArgs),

    /// Show version information
    #[command(hide = true)]
    Version,

    /// Generate shell completions
    Completions(CompletionsArgs),
}
