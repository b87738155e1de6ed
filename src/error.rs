//! Error types
//!
//! Every failure is fatal for the run: the redirect page is either complete or not printed.

use std::path::PathBuf;
use thiserror::Error;

/// xrefmap error types
#[derive(Error, Debug)]
pub enum Error {
    #[error("Unable to find page path for '{anchor}' in page '{page}'")]
    OwnerNotFound { page: String, anchor: String },

    #[error("Rewrite cycle for '{previous}' in page '{page}': '{key}' already seen")]
    RewriteCycle {
        page: String,
        previous: String,
        key: String,
    },

    #[error("Can't find rewrite target '{key}' for '{previous}' in page '{page}'")]
    RewriteTargetMissing {
        page: String,
        previous: String,
        key: String,
    },

    #[error("Source path does not exist: {0}")]
    SourceMissing(PathBuf),

    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid content bundle {path}: {source}")]
    Bundle {
        path: PathBuf,
        #[source]
        source: zip::result::ZipError,
    },

    #[error("Directory walk error: {0}")]
    WalkDir(#[from] walkdir::Error),

    #[error("Failed to parse config file: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Config validation error: {0}")]
    ConfigValidation(String),

    #[error("Invalid rewrite rule in {path} line {line}: {message}")]
    RewriteSyntax {
        path: PathBuf,
        line: usize,
        message: String,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for xrefmap operations
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Wrap an IO error with the path that produced it
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }

    pub fn bundle(path: impl Into<PathBuf>, source: zip::result::ZipError) -> Self {
        Error::Bundle {
            path: path.into(),
            source,
        }
    }

    /// Create a config validation error
    pub fn config_validation(msg: impl Into<String>) -> Self {
        Error::ConfigValidation(msg.into())
    }

    /// Stable issue code used by `check` output
    pub fn code(&self) -> &'static str {
        match self {
            Error::OwnerNotFound { .. } => "OWNER_NOT_FOUND",
            Error::RewriteCycle { .. } => "REWRITE_CYCLE",
            Error::RewriteTargetMissing { .. } => "REWRITE_TARGET_MISSING",
            Error::SourceMissing(_) => "SOURCE_MISSING",
            Error::Io { .. } | Error::WalkDir(_) => "IO",
            Error::ConfigParse(_) | Error::ConfigValidation(_) => "CONFIG",
            Error::RewriteSyntax { .. } => "REWRITE_SYNTAX",
            Error::Bundle { .. } => "BUNDLE",
            Error::Json(_) => "JSON",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_owner_not_found_names_anchor() {
        let err = Error::OwnerNotFound {
            page: "gradle-plugin".to_string(),
            anchor: "build-image.examples".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("build-image.examples"));
        assert!(msg.contains("gradle-plugin"));
        assert_eq!(err.code(), "OWNER_NOT_FOUND");
    }

    #[test]
    fn test_rewrite_cycle_display() {
        let err = Error::RewriteCycle {
            page: String::new(),
            previous: "a".to_string(),
            key: "b".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Rewrite cycle for 'a' in page '': 'b' already seen"
        );
    }

    #[test]
    fn test_source_missing_display() {
        let err = Error::SourceMissing(PathBuf::from("/checkout/docs"));
        assert_eq!(err.to_string(), "Source path does not exist: /checkout/docs");
        assert_eq!(err.code(), "SOURCE_MISSING");
    }

    #[test]
    fn test_io_error_keeps_path() {
        let err = Error::io(
            "/tmp/x.adoc",
            std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        );
        assert!(err.to_string().contains("/tmp/x.adoc"));
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Error>();
    }
}
