//! Renderer module
//!
//! Renders command results as plain text, a JSON array, or JSON Lines.

use serde::Serialize;
use std::io::Write;

use crate::error::Result;

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Jsonl,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" | "adoc" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            "jsonl" => Ok(OutputFormat::Jsonl),
            _ => Err(format!("Unknown format: {}", s)),
        }
    }
}

/// Render configuration combining format and options
#[derive(Debug, Clone, Copy, Default)]
pub struct RenderConfig {
    pub format: OutputFormat,
    pub pretty: bool,
}

impl RenderConfig {
    /// Create a new render config with pretty option
    pub fn with_pretty(format: OutputFormat, pretty: bool) -> Self {
        Self { format, pretty }
    }
}

/// Records that have a one-line plain text form
pub trait TextLine {
    fn text_line(&self) -> String;
}

/// Renderer for command results
pub struct Renderer {
    config: RenderConfig,
}

impl Renderer {
    /// Create a new renderer with render config
    pub fn with_config(config: RenderConfig) -> Self {
        Self { config }
    }

    pub fn format(&self) -> OutputFormat {
        self.config.format
    }

    /// Render a list of records in the configured format
    pub fn render_records<T: Serialize + TextLine>(&self, items: &[T]) -> Result<String> {
        match self.config.format {
            OutputFormat::Text => Ok(items
                .iter()
                .map(|item| format!("{}\n", item.text_line()))
                .collect()),
            OutputFormat::Json => self.render_json(items),
            OutputFormat::Jsonl => self.render_jsonl(items),
        }
    }

    /// Render one value as JSON (newline terminated)
    pub fn render_json<T: Serialize + ?Sized>(&self, value: &T) -> Result<String> {
        let mut out = if self.config.pretty {
            serde_json::to_string_pretty(value)?
        } else {
            serde_json::to_string(value)?
        };
        out.push('\n');
        Ok(out)
    }

    /// Render as JSON Lines (one JSON object per line)
    pub fn render_jsonl<I>(&self, items: I) -> Result<String>
    where
        I: IntoIterator,
        I::Item: Serialize,
    {
        let mut out = String::new();
        for item in items {
            if self.config.pretty {
                out.push_str(&serde_json::to_string_pretty(&item)?);
                out.push_str("\n\n");
            } else {
                out.push_str(&serde_json::to_string(&item)?);
                out.push('\n');
            }
        }
        Ok(out)
    }
}

/// Write rendered output to stdout in one piece
pub fn write_stdout(output: &str) -> std::io::Result<()> {
    let stdout = std::io::stdout();
    let mut handle = stdout.lock();
    handle.write_all(output.as_bytes())?;
    handle.flush()
}
