//! xrefmap - Generate redirect pages for reorganized Antora documentation
//!
//! xrefmap provides:
//! - Anchor scanning of AsciiDoc page and partial sources
//! - Xref resolution with partial ownership and rewrite chains
//! - A sorted, reproducible redirect page (text/json/jsonl)

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod anchors;
mod cli;
mod config;
mod core;
mod corpus;
mod error;
mod flows;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();

    // Logs go to stderr; stdout carries only the generated output
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cli.log_level()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    cli::run(cli)
}
