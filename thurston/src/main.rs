//! # Thurston Runtime
//!
//! Entry point for the `thurston` binary. Parses the command line and hands
//! it to [`thurston::app::run`].

use anyhow::Result;
use clap::Parser;
use thurston::app;
use thurston::cli::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();
    app::run(&cli)
}
