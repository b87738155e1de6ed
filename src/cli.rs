//! CLI module - Command-line interface definitions and handlers

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::config::{Config, PageConfig};
use crate::core::render::{OutputFormat, RenderConfig};

/// xrefmap - generate Antora redirect pages for reorganized documentation.
#[derive(Parser, Debug)]
#[command(name = "xrefmap")]
#[command(
    author,
    version,
    about,
    long_about = r#"xrefmap scans the Antora sources of a checkout for AsciiDoc anchors,
resolves where every legacy anchor lives in the new layout, and prints a
redirect page mapping old locations to new xrefs.

Each page group contributes `pages/` and `partials/` documents from every
module plus an optional anchor-rewrite.properties rule file.

Output formats:
- text: the Antora redirect page (default)
- json: a single JSON array
- jsonl: one JSON object per line

Examples:
    xrefmap generate ~/src/spring-boot > redirect.adoc
    xrefmap --page docs=spring-boot-docs generate .
    xrefmap anchors . --format jsonl
    xrefmap check .
"#
)]
pub struct Cli {
    /// TOML file describing the page layout.
    #[arg(
        long,
        global = true,
        value_name = "FILE",
        env = "XREFMAP_CONFIG",
        long_help = "TOML file describing the page layout (project_dir, antora_dir, bundles_dir,\n\
rewrites_file, bundle_suffix, extension and [[pages]]).\n\n\
Every key is optional; without pages the Spring Boot page groups are used."
    )]
    pub config: Option<PathBuf>,

    /// Page group as NAME=PATH (repeatable).
    #[arg(
        long = "page",
        global = true,
        value_name = "NAME=PATH",
        long_help = "Page group as NAME=PATH, where PATH is relative to the project directory.\n\n\
Repeat to add several groups; they replace the configured page list and are processed\n\
in the order given. NAME may be empty (=PATH) for the main documentation."
    )]
    pub pages: Vec<PageConfig>,

    /// Output format (text/json/jsonl).
    #[arg(
        long,
        global = true,
        default_value = "text",
        value_name = "FORMAT",
        long_help = "Select the output format.\n\n\
Supported values:\n\
- text (default)\n\
- json\n\
- jsonl"
    )]
    pub format: String,

    /// Pretty-print JSON/JSONL output with indentation.
    #[arg(long, global = true)]
    pub pretty: bool,

    /// Quiet mode (warnings and errors only).
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Verbose mode (per-document diagnostics).
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate the redirect page.
    #[command(
        long_about = "Scan every page group of CHECKOUT, resolve all anchors and rewrite rules,\n\
and print the redirect page. Destinations are sorted; any unresolvable anchor or\n\
rewrite aborts the run without output.\n\n\
Examples:\n\
  xrefmap generate ~/src/spring-boot\n\
  xrefmap generate . --format json --pretty\n"
    )]
    Generate {
        /// Repository checkout to scan.
        #[arg(value_name = "CHECKOUT", default_value = ".")]
        checkout: PathBuf,
    },

    /// List every anchor found, with its title and origin.
    Anchors {
        /// Repository checkout to scan.
        #[arg(value_name = "CHECKOUT", default_value = ".")]
        checkout: PathBuf,
    },

    /// Report duplicate ids and unresolvable anchors or rewrites.
    Check {
        /// Repository checkout to scan.
        #[arg(value_name = "CHECKOUT", default_value = ".")]
        checkout: PathBuf,
    },
}

impl Cli {
    /// Default log filter for the selected verbosity
    pub fn log_level(&self) -> &'static str {
        if self.quiet {
            "warn"
        } else if self.verbose {
            "debug"
        } else {
            "info"
        }
    }
}

/// Load the config file (if any) and apply command-line overrides
fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = match &cli.config {
        Some(path) => Config::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => Config::default(),
    };
    config.merge_cli(cli.pages.clone())?;
    Ok(config)
}

pub fn run(cli: Cli) -> Result<()> {
    let format: OutputFormat = cli
        .format
        .parse()
        .map_err(|e: String| anyhow::anyhow!(e))?;
    let render_config = RenderConfig::with_pretty(format, cli.pretty);
    let config = load_config(&cli)?;

    match &cli.command {
        Commands::Generate { checkout } => {
            crate::flows::generate::run_generate(checkout, &config, render_config)
        }
        Commands::Anchors { checkout } => {
            crate::flows::generate::run_anchors(checkout, &config, render_config)
        }
        Commands::Check { checkout } => {
            crate::flows::generate::run_check(checkout, &config, render_config)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_pages_and_format() {
        let cli = Cli::try_parse_from([
            "xrefmap",
            "--page",
            "api=spring-boot-actuator-autoconfigure",
            "--page",
            "=spring-boot-docs",
            "--format",
            "json",
            "generate",
            "/checkout",
        ])
        .unwrap();

        assert_eq!(cli.pages.len(), 2);
        assert_eq!(cli.pages[1].name, "");
        assert_eq!(cli.format, "json");
        assert!(matches!(cli.command, Commands::Generate { .. }));
    }

    #[test]
    fn test_rejects_malformed_page() {
        let result = Cli::try_parse_from(["xrefmap", "--page", "nopath", "generate"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_log_level() {
        let cli = Cli::try_parse_from(["xrefmap", "-v", "check"]).unwrap();
        assert_eq!(cli.log_level(), "debug");
        let cli = Cli::try_parse_from(["xrefmap", "check", "-q"]).unwrap();
        assert_eq!(cli.log_level(), "warn");
    }
}
