//! JSON changelog formatter

use shiplog_core::error::{ChangelogError, Result};

use super::{ChangelogFormatter, RenderOptions};
use crate::types::ChangelogDocument;

/// Emits the document itself, pretty-printed
#[derive(Debug, Default)]
pub struct JsonFormatter;

impl JsonFormatter {
    /// Create a new JSON formatter
    pub fn new() -> Self {
        Self
    }
}

impl ChangelogFormatter for JsonFormatter {
    fn name(&self) -> &'static str {
        "json"
    }

    fn format(&self, document: &ChangelogDocument, _options: &RenderOptions) -> Result<String> {
        let mut output =
            serde_json::to_string_pretty(document).map_err(|e| ChangelogError::RenderFailed {
                engine: self.name().to_string(),
                reason: e.to_string(),
            })?;
        output.push('\n');
        Ok(output)
    }

    fn extension(&self) -> &'static str {
        "json"
    }
}
