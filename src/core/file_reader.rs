//! Document reading
//!
//! Documents are read whole and split into lines. Invalid UTF-8 is decoded
//! lossily rather than skipped, since a skipped document would silently drop
//! its anchors from the redirect page.

use std::fs;
use std::path::Path;

use crate::error::{Error, Result};

/// Lines of a document plus how they were decoded
#[derive(Debug, Clone, Default)]
pub struct DocumentText {
    pub lines: Vec<String>,

    /// Whether lossy conversion was used
    pub lossy_conversion: bool,
}

impl DocumentText {
    /// Split already-decoded content into lines (`\n` or `\r\n`)
    pub fn from_content(content: &str) -> Self {
        Self {
            lines: content.lines().map(str::to_string).collect(),
            lossy_conversion: false,
        }
    }

    fn with_lossy(mut self) -> Self {
        self.lossy_conversion = true;
        self
    }
}

/// Read a document from disk
pub fn read_document(path: &Path) -> Result<DocumentText> {
    let bytes = fs::read(path).map_err(|e| Error::io(path, e))?;
    Ok(decode_document(bytes, &path.display().to_string()))
}

/// Decode document bytes; `source` names the document in diagnostics
pub fn decode_document(bytes: Vec<u8>, source: &str) -> DocumentText {
    match String::from_utf8(bytes) {
        Ok(content) => DocumentText::from_content(&content),
        Err(err) => {
            let content = String::from_utf8_lossy(err.as_bytes()).into_owned();
            tracing::warn!(
                path = %source,
                "Lossy UTF-8 conversion applied (some characters replaced)"
            );
            DocumentText::from_content(&content).with_lossy()
        }
    }
}
