//! Generated content bundles
//!
//! Documentation builds publish generated Antora content as zip archives
//! named `*aggregate-content.zip`, laid out like a component root:
//! modules/<module>/pages/**.adoc
//! modules/<module>/partials/**.adoc
//!
//! A page's bundles are scanned before its source tree.

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;
use zip::ZipArchive;

use crate::anchors::parse::find_ids;
use crate::core::file_reader::decode_document;
use crate::core::model::{Origin, OriginKind};
use crate::core::paths::has_extension;
use crate::corpus::walk::ScannedDocument;
use crate::error::{Error, Result};

/// Bundle archives directly inside `dir`, sorted by file name
///
/// A missing directory means the page has no generated content.
pub fn list_bundles(dir: &Path, suffix: &str) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        tracing::debug!(path = %dir.display(), "No content bundle directory");
        return Ok(Vec::new());
    }

    let mut bundles = Vec::new();
    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry?;
        if entry.file_type().is_file() && entry.file_name().to_string_lossy().ends_with(suffix) {
            bundles.push(entry.into_path());
        }
    }
    Ok(bundles)
}

/// Scan every page and partial document of one bundle
///
/// Documents come out ordered by module, then kind (pages first), then path.
pub fn scan_bundle(bundle: &Path, extension: &str) -> Result<Vec<ScannedDocument>> {
    let file = File::open(bundle).map_err(|e| Error::io(bundle, e))?;
    let mut archive = ZipArchive::new(file).map_err(|e| Error::bundle(bundle, e))?;

    let mut located = Vec::new();
    for idx in 0..archive.len() {
        let entry = archive.by_index(idx).map_err(|e| Error::bundle(bundle, e))?;
        if !entry.is_file() {
            continue;
        }
        if let Some((module, kind, path)) = locate_entry(entry.name(), extension) {
            located.push((module, kind, path, idx));
        }
    }
    located.sort();

    let mut documents = Vec::with_capacity(located.len());
    for (module, kind, path, idx) in located {
        let mut entry = archive.by_index(idx).map_err(|e| Error::bundle(bundle, e))?;
        let mut bytes = Vec::new();
        entry
            .read_to_end(&mut bytes)
            .map_err(|e| Error::io(bundle, e))?;

        let source = format!("{}!{}", bundle.display(), entry.name());
        let text = decode_document(bytes, &source);
        let anchors = find_ids(&text.lines);
        tracing::debug!(
            module = %module,
            %kind,
            path = %path,
            anchors = anchors.len(),
            lossy = text.lossy_conversion,
            "Scanned bundle document"
        );
        documents.push(ScannedDocument {
            origin: Origin::new(module, path, kind),
            anchors,
        });
    }

    Ok(documents)
}

/// Split `modules/<module>/<pages|partials>/<path>` into its parts
fn locate_entry(name: &str, extension: &str) -> Option<(String, OriginKind, String)> {
    let rest = name.trim_start_matches('/').strip_prefix("modules/")?;
    let (module, rest) = rest.split_once('/')?;
    let (dir, path) = rest.split_once('/')?;

    let kind = match dir {
        "pages" => OriginKind::Page,
        "partials" => OriginKind::Partial,
        _ => return None,
    };
    if module.is_empty() || path.is_empty() || !has_extension(Path::new(path), extension) {
        return None;
    }
    Some((module.to_string(), kind, path.to_string()))
}
