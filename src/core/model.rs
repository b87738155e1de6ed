//! Shared data model
//!
//! Origins record where an anchor was declared; xrefs are the canonical
//! `module:path#fragment` addresses emitted on the redirect page.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Which document family an anchor was declared in
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OriginKind {
    /// Directly addressable page document
    Page,
    /// Included fragment; inherits the path of its owning page
    Partial,
}

impl OriginKind {
    /// Directory name holding documents of this kind inside a module
    pub fn dir_name(&self) -> &'static str {
        match self {
            OriginKind::Page => "pages",
            OriginKind::Partial => "partials",
        }
    }
}

impl fmt::Display for OriginKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OriginKind::Page => f.write_str("page"),
            OriginKind::Partial => f.write_str("partial"),
        }
    }
}

/// Where an anchor was declared
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Origin {
    /// Antora module name (directory under `modules/`)
    pub module: String,

    /// Path relative to the module's `pages/` or `partials/` directory, '/'-separated
    pub path: String,

    pub kind: OriginKind,
}

impl Origin {
    pub fn new(module: impl Into<String>, path: impl Into<String>, kind: OriginKind) -> Self {
        Self {
            module: module.into(),
            path: path.into(),
            kind,
        }
    }

    #[allow(dead_code)]
    pub fn page(module: impl Into<String>, path: impl Into<String>) -> Self {
        Self::new(module, path, OriginKind::Page)
    }

    #[allow(dead_code)]
    pub fn partial(module: impl Into<String>, path: impl Into<String>) -> Self {
        Self::new(module, path, OriginKind::Partial)
    }

    /// Xref for `fragment` addressed through this origin's own path
    pub fn to_xref(&self, fragment: &str) -> Xref {
        Xref::new(&self.module, &self.path, fragment)
    }

    /// Xref for `fragment` addressed through another page path of the same module
    pub fn to_xref_via(&self, page_path: &str, fragment: &str) -> Xref {
        Xref::new(&self.module, page_path, fragment)
    }
}

/// Canonical cross-reference: `module:path[#fragment]`
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Xref(String);

impl Xref {
    /// Build an xref, omitting `#` when the fragment is empty
    pub fn new(module: &str, path: &str, fragment: &str) -> Self {
        if fragment.is_empty() {
            Xref(format!("{}:{}", module, path))
        } else {
            Xref(format!("{}:{}#{}", module, path, fragment))
        }
    }

    /// Take a literal xref string verbatim
    pub fn literal(value: impl Into<String>) -> Self {
        Xref(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Xref {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
