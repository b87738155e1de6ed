//! Anchor linting module
//!
//! Checks for:
//! - Duplicate IDs (the last declaration silently wins during generation)
//! - Partial anchors without an owning page
//! - Rewrite rules that cycle or lead nowhere

use indexmap::IndexMap;
use serde::Serialize;

use crate::core::model::Origin;
use crate::core::render::TextLine;
use crate::corpus::walk::ScannedPage;
use crate::error::Error;
use crate::flows::resolve::resolve_page;

/// Lint issue severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LintSeverity {
    Error,
    Warning,
}

/// A lint issue
#[derive(Debug, Clone, Serialize)]
pub struct LintIssue {
    pub severity: LintSeverity,
    pub code: String,
    pub message: String,
    pub page: String,
}

impl LintIssue {
    pub fn error(code: &str, message: &str, page: &str) -> Self {
        Self {
            severity: LintSeverity::Error,
            code: code.to_string(),
            message: message.to_string(),
            page: page.to_string(),
        }
    }

    pub fn warning(code: &str, message: &str, page: &str) -> Self {
        Self {
            severity: LintSeverity::Warning,
            code: code.to_string(),
            message: message.to_string(),
            page: page.to_string(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == LintSeverity::Error
    }
}

impl TextLine for LintIssue {
    fn text_line(&self) -> String {
        let severity = match self.severity {
            LintSeverity::Error => "error",
            LintSeverity::Warning => "warning",
        };
        format!("{}[{}] {}", severity, self.code, self.message)
    }
}

/// Lint every scanned page
pub fn lint_pages(pages: &[ScannedPage]) -> Vec<LintIssue> {
    let mut issues = Vec::new();
    for page in pages {
        issues.extend(check_duplicates(page));
        if let Some(issue) = check_resolution(page) {
            issues.push(issue);
        }
    }
    issues
}

/// Ids declared in more than one file of a page
fn check_duplicates(page: &ScannedPage) -> Vec<LintIssue> {
    let mut declared: IndexMap<&str, Vec<&Origin>> = IndexMap::new();

    for document in &page.documents {
        for anchor in &document.anchors {
            let origins = declared.entry(anchor.id.as_str()).or_default();
            if !origins.contains(&&document.origin) {
                origins.push(&document.origin);
            }
        }
    }

    declared
        .into_iter()
        .filter(|(_, origins)| origins.len() > 1)
        .map(|(id, origins)| {
            let files: Vec<String> = origins
                .iter()
                .map(|o| format!("{}:{} ({})", o.module, o.path, o.kind))
                .collect();
            LintIssue::warning(
                "DUPLICATE_ID",
                &format!(
                    "Anchor ID '{}' is declared in {} files, last one wins: {}",
                    id,
                    origins.len(),
                    files.join(", ")
                ),
                &page.index.name,
            )
        })
        .collect()
}

/// Resolution failure of a page, if any
fn check_resolution(page: &ScannedPage) -> Option<LintIssue> {
    resolve_page(&page.index)
        .err()
        .map(|err: Error| LintIssue::error(err.code(), &err.to_string(), &page.index.name))
}
