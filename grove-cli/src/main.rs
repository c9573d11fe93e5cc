//! Binary crate for the `grove` command-line tool.
//!
//! This crate focuses on:
//! - Parsing CLI arguments
//! - Interactive configuration
//! - Hosting the widgets with terminal display targets

use clap::Parser;
use std::io;
use tracing_subscriber::{EnvFilter, fmt};

mod cli;
mod terminal;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt().with_writer(io::stderr).with_env_filter(filter).init();

    let cmd = cli::Cli::parse();
    cmd.run().await
}
