//! Output engines
//!
//! Engines are registered in code and selected by name; each turns a
//! [`ChangelogDocument`] into text.

mod json;
mod markdown;
mod registry;
mod rest;
mod text;

pub use json::JsonFormatter;
pub use markdown::MarkdownFormatter;
pub use registry::FormatterRegistry;
pub use rest::RestFormatter;

use shiplog_core::config::Config;
use shiplog_core::error::Result;

use crate::types::ChangelogDocument;

/// Presentation options shared by all engines
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    /// Column at which commit lines are wrapped
    pub wrap_width: usize,
    /// Category whose heading is omitted when it is a version's only section
    pub default_category: String,
}

impl RenderOptions {
    /// Options matching a configuration
    pub fn from_config(config: &Config) -> Self {
        Self {
            default_category: config.default_category.clone(),
            ..Self::default()
        }
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            wrap_width: 70,
            default_category: "other".to_string(),
        }
    }
}

/// Trait for changelog output engines
pub trait ChangelogFormatter: Send + Sync {
    /// Name the engine is selected by
    fn name(&self) -> &'static str;

    /// Render the document
    fn format(&self, document: &ChangelogDocument, options: &RenderOptions) -> Result<String>;

    /// Get the file extension for this format
    fn extension(&self) -> &'static str;
}
