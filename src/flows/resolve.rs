//! Xref resolution
//!
//! Turns a page index into a complete `anchor id -> xref` mapping in three
//! ordered passes:
//! 1. anchors declared in pages address their own file
//! 2. anchors declared in partials borrow the path of the page owning the
//!    nearest dot-delimited prefix of their id
//! 3. rewrite rules are followed (literal `@` targets, chains) and memoized

use indexmap::IndexMap;
use std::collections::{HashMap, HashSet};

use crate::core::model::{OriginKind, Xref};
use crate::corpus::index::{Corpus, PageIndex};
use crate::error::{Error, Result};

/// Marks a rewrite target as a literal xref
pub const LITERAL_SENTINEL: char = '@';

/// Resolved xrefs for one page group
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedPage {
    pub name: String,

    /// Anchor id -> xref, in registration then rewrite order
    pub xrefs: IndexMap<String, Xref>,
}

/// Resolve every page of a corpus, keeping page order
#[cfg(not(feature = "parallel"))]
pub fn resolve_corpus(corpus: &Corpus) -> Result<Vec<ResolvedPage>> {
    corpus.pages().map(resolve_page).collect()
}

/// Resolve every page of a corpus, keeping page order
///
/// Pages are independent; each worker owns its page's mapping.
#[cfg(feature = "parallel")]
pub fn resolve_corpus(corpus: &Corpus) -> Result<Vec<ResolvedPage>> {
    use rayon::prelude::*;

    let pages: Vec<&PageIndex> = corpus.pages().collect();
    pages.into_par_iter().map(resolve_page).collect()
}

/// Resolve one page group
pub fn resolve_page(page: &PageIndex) -> Result<ResolvedPage> {
    let mut xrefs = IndexMap::new();
    let mut page_paths: HashMap<&str, &str> = HashMap::new();

    for (id, origin) in &page.anchors {
        if origin.kind == OriginKind::Page {
            page_paths.insert(id.as_str(), origin.path.as_str());
            xrefs.insert(id.clone(), origin.to_xref(id));
        }
    }

    for (id, origin) in &page.anchors {
        if origin.kind == OriginKind::Partial {
            let owner_path = find_owner_path(&page_paths, id).ok_or_else(|| {
                Error::OwnerNotFound {
                    page: page.name.clone(),
                    anchor: id.clone(),
                }
            })?;
            xrefs.insert(id.clone(), origin.to_xref_via(owner_path, id));
        }
    }

    for (previous, target) in &page.rewrites {
        let xref = resolve_rewrite(page, &xrefs, previous, target)?;
        xrefs.insert(previous.clone(), xref);
    }

    Ok(ResolvedPage {
        name: page.name.clone(),
        xrefs,
    })
}

/// Strip trailing `.segment`s from `fragment` until a page-declared id matches
fn find_owner_path<'a>(page_paths: &HashMap<&str, &'a str>, fragment: &str) -> Option<&'a str> {
    let mut key = fragment;
    loop {
        if let Some(path) = page_paths.get(key) {
            return Some(*path);
        }
        let last_dot = key.rfind('.')?;
        key = &key[..last_dot];
    }
}

/// Follow one rewrite rule to its xref
///
/// Each chain keeps its own visited set; results of earlier rules are already
/// in `xrefs`, so later chains through them stop after one lookup.
fn resolve_rewrite(
    page: &PageIndex,
    xrefs: &IndexMap<String, Xref>,
    previous: &str,
    target: &str,
) -> Result<Xref> {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut lookup = target;

    loop {
        if let Some(literal) = lookup.strip_prefix(LITERAL_SENTINEL) {
            return Ok(Xref::literal(literal));
        }
        if let Some(xref) = xrefs.get(lookup) {
            return Ok(xref.clone());
        }
        if !seen.insert(lookup) {
            return Err(Error::RewriteCycle {
                page: page.name.clone(),
                previous: previous.to_string(),
                key: lookup.to_string(),
            });
        }
        lookup = match page.rewrites.get(lookup) {
            Some(next) => next.as_str(),
            None => {
                return Err(Error::RewriteTargetMissing {
                    page: page.name.clone(),
                    previous: previous.to_string(),
                    key: lookup.to_string(),
                })
            }
        };
    }
}
