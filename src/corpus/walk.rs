//! Source tree traversal
//!
//! Antora layout scanned per page:
//! <bundles>/*aggregate-content.zip           -> generated Page/Partial origins
//! <antora>/modules/<module>/pages/**.adoc     -> Page origins
//! <antora>/modules/<module>/partials/**.adoc  -> Partial origins
//! <antora>/anchor-rewrite.properties          -> rewrite rules (optional)
//!
//! Modules and files are visited in sorted order so registration order, and
//! with it the redirect page, is reproducible.

use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::anchors::parse::{find_ids, Anchor};
use crate::core::file_reader::read_document;
use crate::core::model::{Origin, OriginKind};
use crate::core::paths::{has_extension, make_relative};
use crate::corpus::bundle::{list_bundles, scan_bundle};
use crate::corpus::index::{Corpus, PageIndex};
use crate::corpus::rewrites::load_rule_file;
use crate::error::{Error, Result};

/// Where one page group's sources live on disk
#[derive(Debug, Clone)]
pub struct PageSources {
    /// Page name (prefix of source references, may be empty)
    pub name: String,

    /// Antora component root (contains `modules/`)
    pub antora_dir: PathBuf,

    /// Rewrite rule file; skipped when absent
    pub rewrites_file: PathBuf,

    /// Directory of generated content bundles; skipped when absent
    pub bundles_dir: PathBuf,

    /// File name suffix selecting bundle archives
    pub bundle_suffix: String,

    /// Document file extension, without dot
    pub extension: String,
}

impl PageSources {
    pub fn modules_dir(&self) -> PathBuf {
        self.antora_dir.join("modules")
    }
}

/// Anchors found in one document
#[derive(Debug, Clone)]
pub struct ScannedDocument {
    pub origin: Origin,
    pub anchors: Vec<Anchor>,
}

/// Everything scanned for one page group
#[derive(Debug, Clone)]
pub struct ScannedPage {
    pub index: PageIndex,

    /// Documents in scan order, before any overwrite of duplicate ids
    pub documents: Vec<ScannedDocument>,
}

/// Fail before any scanning when a page's sources are missing
pub fn ensure_sources(pages: &[PageSources]) -> Result<()> {
    for page in pages {
        if !page.antora_dir.is_dir() {
            return Err(Error::SourceMissing(page.antora_dir.clone()));
        }
    }
    Ok(())
}

/// Scan every page group, in the given order
pub fn scan_pages(pages: &[PageSources]) -> Result<Vec<ScannedPage>> {
    ensure_sources(pages)?;
    pages.iter().map(scan_page).collect()
}

/// Build a corpus from scanned pages
pub fn into_corpus(scanned: Vec<ScannedPage>) -> Corpus {
    let mut corpus = Corpus::new();
    for page in scanned {
        let index = corpus.page_mut(&page.index.name);
        index.anchors.extend(page.index.anchors);
        index.load_rewrites(page.index.rewrites);
    }
    corpus
}

/// Scan one page group and build its index
pub fn scan_page(sources: &PageSources) -> Result<ScannedPage> {
    if !sources.antora_dir.is_dir() {
        return Err(Error::SourceMissing(sources.antora_dir.clone()));
    }

    tracing::info!(
        page = %sources.name,
        path = %sources.antora_dir.display(),
        "Scanning page sources"
    );

    let mut index = PageIndex::new(&sources.name);
    let mut documents = Vec::new();

    for bundle in list_bundles(&sources.bundles_dir, &sources.bundle_suffix)? {
        tracing::info!(path = %bundle.display(), "Scanning content bundle");
        let scanned = scan_bundle(&bundle, &sources.extension)?;
        register_documents(&mut index, &mut documents, scanned);
    }

    for (module, module_dir) in list_modules(&sources.modules_dir())? {
        for kind in [OriginKind::Page, OriginKind::Partial] {
            let dir = module_dir.join(kind.dir_name());
            let scanned = scan_documents(&module, &dir, kind, &sources.extension)?;
            register_documents(&mut index, &mut documents, scanned);
        }
    }

    if sources.rewrites_file.is_file() {
        tracing::info!(path = %sources.rewrites_file.display(), "Adding anchor rewrites");
        index.load_rewrites(load_rule_file(&sources.rewrites_file)?);
    }

    Ok(ScannedPage { index, documents })
}

/// Register every anchor of `scanned`, later declarations overwriting earlier ones
fn register_documents(
    index: &mut PageIndex,
    documents: &mut Vec<ScannedDocument>,
    scanned: Vec<ScannedDocument>,
) {
    for document in scanned {
        for anchor in &document.anchors {
            if let Some(previous) = index.register(&anchor.id, document.origin.clone()) {
                tracing::debug!(
                    page = %index.name,
                    id = %anchor.id,
                    previous_module = %previous.module,
                    previous_path = %previous.path,
                    "Anchor registration overwritten"
                );
            }
        }
        documents.push(document);
    }
}

/// Module directories under `modules/`, sorted by name
fn list_modules(modules_dir: &Path) -> Result<Vec<(String, PathBuf)>> {
    if !modules_dir.is_dir() {
        return Err(Error::SourceMissing(modules_dir.to_path_buf()));
    }

    let mut modules = Vec::new();
    for entry in WalkDir::new(modules_dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry?;
        if !entry.file_type().is_dir() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().into_owned();
        modules.push((name, entry.into_path()));
    }

    Ok(modules)
}

/// Scan all documents of one kind within a module
fn scan_documents(
    module: &str,
    dir: &Path,
    kind: OriginKind,
    extension: &str,
) -> Result<Vec<ScannedDocument>> {
    if !dir.is_dir() {
        return Ok(Vec::new());
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(dir) {
        let entry = entry?;
        if !entry.file_type().is_file() || !has_extension(entry.path(), extension) {
            continue;
        }
        let relative = match make_relative(entry.path(), dir) {
            Some(r) => r,
            None => continue,
        };
        files.push((relative, entry.into_path()));
    }
    files.sort();

    let mut documents = Vec::with_capacity(files.len());
    for (relative, path) in files {
        let text = read_document(&path)?;
        let anchors = find_ids(&text.lines);
        tracing::debug!(
            module,
            %kind,
            path = %relative,
            anchors = anchors.len(),
            lossy = text.lossy_conversion,
            "Scanned document"
        );
        documents.push(ScannedDocument {
            origin: Origin::new(module, relative, kind),
            anchors,
        });
    }

    Ok(documents)
}
