//! Formatter registry

use std::sync::Arc;

use shiplog_core::error::{ChangelogError, Result};
use tracing::debug;

use super::{ChangelogFormatter, JsonFormatter, MarkdownFormatter, RenderOptions, RestFormatter};
use crate::types::ChangelogDocument;

/// Registry of available changelog formatters
pub struct FormatterRegistry {
    formatters: Vec<Arc<dyn ChangelogFormatter>>,
}

impl FormatterRegistry {
    /// Create a new registry with all built-in formatters
    pub fn new() -> Self {
        Self {
            formatters: vec![
                Arc::new(RestFormatter::new()),
                Arc::new(MarkdownFormatter::new()),
                Arc::new(JsonFormatter::new()),
            ],
        }
    }

    /// Register a formatter; it shadows any earlier one with the same name
    pub fn register<F: ChangelogFormatter + 'static>(&mut self, formatter: F) {
        self.formatters.push(Arc::new(formatter));
    }

    /// Get formatter by engine name
    pub fn get(&self, name: &str) -> Option<Arc<dyn ChangelogFormatter>> {
        self.formatters
            .iter()
            .rev()
            .find(|f| f.name() == name)
            .cloned()
    }

    /// Names of all registered engines
    pub fn names(&self) -> Vec<&'static str> {
        let mut names = Vec::new();
        for name in self.formatters.iter().map(|f| f.name()) {
            if !names.contains(&name) {
                names.push(name);
            }
        }
        names
    }

    /// Render a document with the named engine
    pub fn render(
        &self,
        name: &str,
        document: &ChangelogDocument,
        options: &RenderOptions,
    ) -> Result<String> {
        let formatter = self.get(name).ok_or_else(|| ChangelogError::UnknownEngine {
            name: name.to_string(),
            available: self.names().join(", "),
        })?;
        debug!(engine = name, "rendering changelog");
        formatter.format(document, options)
    }
}

impl Default for FormatterRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shiplog_core::error::ShiplogError;

    struct Shout;

    impl ChangelogFormatter for Shout {
        fn name(&self) -> &'static str {
            "rest"
        }

        fn format(&self, _: &ChangelogDocument, _: &RenderOptions) -> Result<String> {
            Ok("SHOUT".to_string())
        }

        fn extension(&self) -> &'static str {
            "txt"
        }
    }

    #[test]
    fn test_registry_creation() {
        let registry = FormatterRegistry::new();
        assert_eq!(registry.names(), vec!["rest", "markdown", "json"]);
    }

    #[test]
    fn test_get_by_name() {
        let registry = FormatterRegistry::new();
        assert_eq!(registry.get("markdown").unwrap().extension(), "md");
        assert!(registry.get("html").is_none());
    }

    #[test]
    fn test_unknown_engine() {
        let registry = FormatterRegistry::new();
        let err = registry
            .render("html", &ChangelogDocument::default(), &RenderOptions::default())
            .unwrap_err();
        match err {
            ShiplogError::Changelog(ChangelogError::UnknownEngine { name, available }) => {
                assert_eq!(name, "html");
                assert!(available.contains("rest"));
            }
            other => panic!("expected unknown engine, got {:?}", other),
        }
    }

    #[test]
    fn test_registered_formatter_shadows_builtin() {
        let mut registry = FormatterRegistry::new();
        registry.register(Shout);
        let output = registry
            .render("rest", &ChangelogDocument::default(), &RenderOptions::default())
            .unwrap();
        assert_eq!(output, "SHOUT");
    }
}
