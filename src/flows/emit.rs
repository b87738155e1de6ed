//! Redirect page assembly
//!
//! Inverts the resolved mappings of all pages into
//! `destination xref -> [page#fragment, ...]`, sorted by destination.
//! Sources under one destination keep the order they were added in.

use serde::Serialize;
use std::collections::BTreeMap;

use crate::core::model::Xref;
use crate::flows::resolve::ResolvedPage;

/// Header directive of the generated page
pub const PAGE_HEADER: &str = ":page-layout: redirect";

/// One destination and every legacy reference redirected to it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Redirect {
    pub xref: Xref,
    pub sources: Vec<String>,
}

/// One bullet of the redirect page
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RedirectLine<'a> {
    pub xref: &'a Xref,
    pub source: &'a str,
}

/// Inverted redirect index
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RedirectMap {
    entries: BTreeMap<Xref, Vec<String>>,
}

impl RedirectMap {
    /// Build from resolved pages, in page order
    pub fn build(pages: &[ResolvedPage]) -> Self {
        let mut entries: BTreeMap<Xref, Vec<String>> = BTreeMap::new();
        for page in pages {
            for (fragment, xref) in &page.xrefs {
                entries
                    .entry(xref.clone())
                    .or_default()
                    .push(source_reference(&page.name, fragment));
            }
        }
        Self { entries }
    }

    /// Destinations in sorted order
    pub fn redirects(&self) -> Vec<Redirect> {
        self.entries
            .iter()
            .map(|(xref, sources)| Redirect {
                xref: xref.clone(),
                sources: sources.clone(),
            })
            .collect()
    }

    /// Bullets in output order
    pub fn lines(&self) -> impl Iterator<Item = RedirectLine<'_>> {
        self.entries.iter().flat_map(|(xref, sources)| {
            sources.iter().map(move |source| RedirectLine {
                xref,
                source: source.as_str(),
            })
        })
    }

    /// Render the Antora redirect page
    pub fn to_page(&self) -> String {
        let mut out = String::new();
        out.push_str(PAGE_HEADER);
        out.push_str("\n\n");
        for line in self.lines() {
            out.push_str(&format!("* xref:{}[{}]\n", line.xref.as_str(), line.source));
        }
        out
    }

    /// Number of destinations
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// `page#fragment`, or just `page` for an empty fragment
pub fn source_reference(page: &str, fragment: &str) -> String {
    if fragment.is_empty() {
        page.to_string()
    } else {
        format!("{}#{}", page, fragment)
    }
}
