//! Per-page anchor registry
//!
//! A page index accumulates where every anchor id was declared plus the page's
//! legacy-anchor rewrite rules. Registration uses overwrite semantics: the
//! last declaration of an id wins.

use indexmap::IndexMap;

use crate::core::model::Origin;

/// Anchor registrations and rewrite rules for one redirect page group
#[derive(Debug, Clone, Default)]
pub struct PageIndex {
    /// Page name used as the source prefix on the redirect page (may be empty)
    pub name: String,

    /// Anchor id -> declaring origin, in first-registration order
    pub anchors: IndexMap<String, Origin>,

    /// Legacy anchor -> rewrite target, in rule-table order
    pub rewrites: IndexMap<String, String>,
}

impl PageIndex {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Register an anchor, returning the origin it replaced (if any)
    pub fn register(&mut self, id: impl Into<String>, origin: Origin) -> Option<Origin> {
        self.anchors.insert(id.into(), origin)
    }

    /// Load rewrite rules; later tables overwrite earlier keys
    pub fn load_rewrites<I, K, V>(&mut self, rules: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        for (previous, target) in rules {
            self.rewrites.insert(previous.into(), target.into());
        }
    }
}

/// All page indexes of a run, in the order pages were added
#[derive(Debug, Clone, Default)]
pub struct Corpus {
    pages: IndexMap<String, PageIndex>,
}

impl Corpus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the index for a page, creating it on first use
    ///
    /// Adding sources to an existing page accumulates into the same index.
    pub fn page_mut(&mut self, name: &str) -> &mut PageIndex {
        self.pages
            .entry(name.to_string())
            .or_insert_with(|| PageIndex::new(name))
    }

    pub fn pages(&self) -> impl Iterator<Item = &PageIndex> {
        self.pages.values()
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}
