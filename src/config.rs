//! Page layout configuration
//!
//! Describes which source trees of a checkout feed which redirect page group.
//! Loaded from TOML; every key has a default matching the Spring Boot layout.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

use crate::core::paths::join_normalized;
use crate::corpus::walk::PageSources;
use crate::error::{Error, Result};

/// Main configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory under the checkout holding every page's sources
    pub project_dir: String,

    /// Antora component root, relative to each page's source path
    pub antora_dir: String,

    /// Rewrite rule file, relative to the Antora component root
    pub rewrites_file: String,

    /// Generated content bundle directory, relative to each page's source path
    pub bundles_dir: String,

    /// File name suffix of content bundles
    pub bundle_suffix: String,

    /// Document extension, without dot
    pub extension: String,

    /// Page groups in processing order
    pub pages: Vec<PageConfig>,
}

/// One redirect page group
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageConfig {
    /// Source reference prefix (may be empty for the main page)
    #[serde(default)]
    pub name: String,

    /// Source path relative to `project_dir`
    pub path: String,
}

impl PageConfig {
    pub fn new(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
        }
    }
}

impl std::str::FromStr for PageConfig {
    type Err = String;

    /// Parse `NAME=PATH`; NAME may be empty
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.split_once('=') {
            Some((name, path)) if !path.trim().is_empty() => {
                Ok(PageConfig::new(name.trim(), path.trim()))
            }
            _ => Err(format!("Expected NAME=PATH, got '{}'", s)),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            project_dir: "spring-boot-project".to_string(),
            antora_dir: "src/docs/antora".to_string(),
            rewrites_file: "anchor-rewrite.properties".to_string(),
            bundles_dir: "build/generated/docs/antora-content".to_string(),
            bundle_suffix: "aggregate-content.zip".to_string(),
            extension: "adoc".to_string(),
            pages: default_pages(),
        }
    }
}

/// Page groups of the Spring Boot reference documentation
pub fn default_pages() -> Vec<PageConfig> {
    vec![
        PageConfig::new("actuator-api", "spring-boot-actuator-autoconfigure"),
        PageConfig::new("gradle-plugin", "spring-boot-tools/spring-boot-gradle-plugin"),
        PageConfig::new("maven-plugin", "spring-boot-tools/spring-boot-maven-plugin"),
        PageConfig::new("", "spring-boot-docs"),
    ]
}

impl Config {
    /// Load config from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        Self::from_toml(&contents)
    }

    /// Parse and validate TOML text
    pub fn from_toml(contents: &str) -> Result<Self> {
        let mut config: Config = toml::from_str(contents)?;
        if config.pages.is_empty() {
            config.pages = default_pages();
        }
        config.validate()?;
        Ok(config)
    }

    /// Replace the page list with pages given on the command line
    pub fn merge_cli(&mut self, pages: Vec<PageConfig>) -> Result<()> {
        if !pages.is_empty() {
            self.pages = pages;
        }
        self.validate()
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.extension.trim().is_empty() {
            return Err(Error::config_validation("extension must not be empty"));
        }
        if self.bundle_suffix.trim().is_empty() {
            return Err(Error::config_validation("bundle_suffix must not be empty"));
        }
        if self.pages.is_empty() {
            return Err(Error::config_validation("at least one page is required"));
        }

        let mut names = HashSet::new();
        for page in &self.pages {
            if page.path.trim().is_empty() {
                return Err(Error::config_validation(format!(
                    "page '{}' has an empty path",
                    page.name
                )));
            }
            if !names.insert(page.name.as_str()) {
                return Err(Error::config_validation(format!(
                    "page '{}' is configured more than once",
                    page.name
                )));
            }
        }
        Ok(())
    }

    /// Resolve every page's source locations under a checkout
    pub fn page_sources(&self, checkout: &Path) -> Vec<PageSources> {
        let project = join_normalized(checkout, &self.project_dir);
        self.pages
            .iter()
            .map(|page| {
                let source_dir = join_normalized(&project, &page.path);
                let antora_dir = join_normalized(&source_dir, &self.antora_dir);
                PageSources {
                    name: page.name.clone(),
                    rewrites_file: join_normalized(&antora_dir, &self.rewrites_file),
                    bundles_dir: join_normalized(&source_dir, &self.bundles_dir),
                    bundle_suffix: self.bundle_suffix.clone(),
                    antora_dir,
                    extension: self.extension.trim_start_matches('.').to_string(),
                }
            })
            .collect()
    }
}
