//! Anchor id scanning
//!
//! Recognizes AsciiDoc block anchors at the start of a line:
//! [[web.servlet]]
//! == Servlet Web Applications
//!
//! A header line directly after the anchor supplies its title.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Static regex for anchor declarations, optionally after a `.` block marker
/// Format: [[id]]
pub static ID_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\.?\[\[(.+)\]\]").expect("Invalid ID_RE regex"));

/// Static regex for section headers
/// Format: == Title
pub static HEADER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^=+ (.+)$").expect("Invalid HEADER_RE regex"));

/// Anchor found in a document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Anchor {
    /// Fragment identifier
    pub id: String,

    /// Text of the header line directly following the declaration
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl Anchor {
    pub fn new(id: impl Into<String>, title: Option<String>) -> Self {
        Self {
            id: id.into(),
            title,
        }
    }
}

/// Find anchors in document lines, in order of appearance
///
/// Duplicate ids are returned as many times as they are declared.
pub fn find_ids<S: AsRef<str>>(lines: &[S]) -> Vec<Anchor> {
    let mut anchors = Vec::new();

    for (pos, line) in lines.iter().enumerate() {
        for caps in ID_RE.captures_iter(line.as_ref()) {
            let id = caps
                .get(1)
                .map(|m| m.as_str().to_string())
                .unwrap_or_default();

            // Peek only; the next line is still scanned on its own turn
            let title = lines
                .get(pos + 1)
                .and_then(|next| HEADER_RE.captures(next.as_ref()))
                .and_then(|h| h.get(1))
                .map(|m| m.as_str().to_string());

            anchors.push(Anchor::new(id, title));
        }
    }

    anchors
}
