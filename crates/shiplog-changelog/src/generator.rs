//! Changelog generation

use std::sync::Arc;

use tracing::{debug, info, instrument};

use shiplog_core::config::Config;
use shiplog_core::error::Result;
use shiplog_git::{History, RevisionRange};

use crate::formatter::{ChangelogFormatter, FormatterRegistry, RenderOptions};
use crate::grouper::build_document;
use crate::parser::{CommitParser, MessageParser};
use crate::segment::segment;
use crate::settings::Settings;
use crate::types::ChangelogDocument;
use crate::warning::ChangelogWarning;

/// Changelog generator
pub struct ChangelogGenerator {
    settings: Arc<Settings>,
    parser: Box<dyn CommitParser>,
    formatters: FormatterRegistry,
}

impl ChangelogGenerator {
    /// Create a generator with the configured parser and the built-in engines
    pub fn new(config: Config) -> Result<Self> {
        let settings = Arc::new(Settings::new(config)?);
        Ok(Self {
            parser: Box::new(MessageParser::new(settings.clone())),
            settings,
            formatters: FormatterRegistry::new(),
        })
    }

    /// Use a custom parser
    pub fn with_parser<P: CommitParser + 'static>(mut self, parser: P) -> Self {
        self.parser = Box::new(parser);
        self
    }

    /// Register an additional output engine
    pub fn with_formatter<F: ChangelogFormatter + 'static>(mut self, formatter: F) -> Self {
        self.formatters.register(formatter);
        self
    }

    /// The effective configuration
    pub fn config(&self) -> &Config {
        self.settings.config()
    }

    /// Registered output engines
    pub fn formatters(&self) -> &FormatterRegistry {
        &self.formatters
    }

    /// Build the changelog document for `range`.
    ///
    /// The title is only set for the full history; an explicit range yields
    /// a fragment meant to be spliced into an existing changelog.
    #[instrument(skip(self, history, on_warning), fields(range = %range))]
    pub fn generate(
        &self,
        history: &dyn History,
        range: &RevisionRange,
        on_warning: &mut dyn FnMut(&ChangelogWarning),
    ) -> Result<ChangelogDocument> {
        info!("generating changelog");
        let segments = segment(
            history,
            range,
            &self.settings,
            self.parser.as_ref(),
            on_warning,
        )?;

        let title = if range.is_full_history() {
            self.config().title.clone()
        } else {
            None
        };

        let document = build_document(&segments, &self.settings, title, on_warning);
        debug!(
            versions = document.versions.len(),
            empty = document.empty,
            "changelog document built"
        );
        Ok(document)
    }

    /// Render a document; `engine` defaults to the configured one
    pub fn render(&self, document: &ChangelogDocument, engine: Option<&str>) -> Result<String> {
        let engine = engine.unwrap_or(self.config().output_engine.as_str());
        let options = RenderOptions::from_config(self.config());
        self.formatters.render(engine, document, &options)
    }

    /// Generate and render in one step
    #[instrument(skip(self, history, on_warning), fields(range = %range))]
    pub fn generate_formatted(
        &self,
        history: &dyn History,
        range: &RevisionRange,
        engine: Option<&str>,
        on_warning: &mut dyn FnMut(&ChangelogWarning),
    ) -> Result<String> {
        let document = self.generate(history, range, on_warning)?;
        let output = self.render(&document, engine)?;
        debug!(output_len = output.len(), "changelog formatted");
        Ok(output)
    }
}
