//! Command flows
//!
//! Wire scanning, resolution and emission together for the CLI commands.
//! Nothing reaches stdout until the whole run has succeeded.

use anyhow::{bail, Context, Result};
use serde::Serialize;
use std::path::Path;

use crate::anchors::lint::lint_pages;
use crate::config::Config;
use crate::core::model::OriginKind;
use crate::core::render::{write_stdout, OutputFormat, RenderConfig, Renderer, TextLine};
use crate::corpus::walk::{into_corpus, scan_pages, ScannedPage};
use crate::flows::emit::RedirectMap;
use crate::flows::resolve::resolve_corpus;

/// One scanned anchor, as listed by `anchors`
#[derive(Debug, Clone, Serialize)]
pub struct AnchorRecord {
    pub page: String,
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub module: String,
    pub path: String,
    pub kind: OriginKind,
}

impl TextLine for AnchorRecord {
    fn text_line(&self) -> String {
        format!(
            "{}\t{}:{}#{}\t{}",
            self.page,
            self.module,
            self.path,
            self.id,
            self.title.as_deref().unwrap_or("")
        )
    }
}

/// Scan every configured page of a checkout
pub fn scan_checkout(checkout: &Path, config: &Config) -> Result<Vec<ScannedPage>> {
    let sources = config.page_sources(checkout);
    let scanned = scan_pages(&sources)
        .with_context(|| format!("Failed to scan checkout {}", checkout.display()))?;
    Ok(scanned)
}

/// Build the redirect map for a checkout
pub fn generate_redirects(checkout: &Path, config: &Config) -> Result<RedirectMap> {
    let corpus = into_corpus(scan_checkout(checkout, config)?);
    let resolved = resolve_corpus(&corpus).context("Failed to resolve anchors")?;
    let map = RedirectMap::build(&resolved);
    tracing::info!(
        pages = corpus.len(),
        destinations = map.len(),
        "Generated redirects"
    );
    Ok(map)
}

/// Run the generate command
pub fn run_generate(checkout: &Path, config: &Config, render: RenderConfig) -> Result<()> {
    tracing::info!(checkout = %checkout.display(), "Creating redirects");
    let map = generate_redirects(checkout, config)?;

    let renderer = Renderer::with_config(render);
    let output = match renderer.format() {
        OutputFormat::Text => map.to_page(),
        OutputFormat::Json => renderer.render_json(&map.redirects())?,
        OutputFormat::Jsonl => renderer.render_jsonl(map.lines())?,
    };

    write_stdout(&output)?;
    Ok(())
}

/// Flatten scanned pages into anchor records, in scan order
pub fn anchor_records(pages: &[ScannedPage]) -> Vec<AnchorRecord> {
    pages
        .iter()
        .flat_map(|page| {
            page.documents.iter().flat_map(move |document| {
                document.anchors.iter().map(move |anchor| AnchorRecord {
                    page: page.index.name.clone(),
                    id: anchor.id.clone(),
                    title: anchor.title.clone(),
                    module: document.origin.module.clone(),
                    path: document.origin.path.clone(),
                    kind: document.origin.kind,
                })
            })
        })
        .collect()
}

/// Run the anchors command
pub fn run_anchors(checkout: &Path, config: &Config, render: RenderConfig) -> Result<()> {
    let scanned = scan_checkout(checkout, config)?;
    let records = anchor_records(&scanned);

    let renderer = Renderer::with_config(render);
    write_stdout(&renderer.render_records(&records)?)?;
    Ok(())
}

/// Run the check command; fails when any error-level issue is found
pub fn run_check(checkout: &Path, config: &Config, render: RenderConfig) -> Result<()> {
    let scanned = scan_checkout(checkout, config)?;
    let issues = lint_pages(&scanned);

    let renderer = Renderer::with_config(render);
    write_stdout(&renderer.render_records(&issues)?)?;

    let errors = issues.iter().filter(|issue| issue.is_error()).count();
    if errors > 0 {
        bail!("{} error(s) found", errors);
    }
    Ok(())
}
