//! Scriptweld - module bundler for incrementally modularized userscripts
//!
//! Rebuilds one distributable script from a legacy monolith and the modules
//! extracted from it so far. Modules are sequenced by their declared
//! dependencies, not-yet-extracted sections keep the monolith's original
//! order, and unchanged inputs always produce byte-identical output.

use clap::Parser;

mod artifact;
mod assembler;
mod cli;
mod commands;
mod config;
mod descriptor;
mod error;
mod hash;
mod monolith;
mod project;
mod report;
mod resolver;
#[cfg(test)]
mod test_fixtures;

use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Build(args) => commands::build::run(cli.project, args, cli.verbose),
        Commands::Status(args) => commands::status::run(cli.project, args),
        Commands::Version => commands::version::run(),
        Commands::Completions(args) => commands::completions::run(args),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(e.exit_code());
    }
}
