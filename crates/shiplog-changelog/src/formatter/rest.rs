//! reStructuredText changelog formatter

use tracing::{debug, instrument};

use shiplog_core::error::Result;

use super::text::{attributed, underline, wrap};
use super::{ChangelogFormatter, RenderOptions};
use crate::types::{ChangelogDocument, CommitSummary, VersionEntry};

/// reStructuredText changelog formatter
#[derive(Debug, Default)]
pub struct RestFormatter;

impl RestFormatter {
    /// Create a new reStructuredText formatter
    pub fn new() -> Self {
        Self
    }

    fn format_version(&self, version: &VersionEntry, options: &RenderOptions) -> String {
        let heading = match (&version.tag, version.date) {
            (Some(tag), Some(date)) => format!("{} ({})", tag, date.format("%Y-%m-%d")),
            (Some(tag), None) => tag.clone(),
            (None, _) => version.label.clone(),
        };
        let mut output = underline(&heading, '-');

        let only_default = version.sections.len() == 1
            && version.sections[0].category == options.default_category;

        for section in &version.sections {
            if !only_default {
                output.push('\n');
                output.push_str(&underline(&section.label, '~'));
            }
            for commit in &section.commits {
                output.push_str(&self.format_commit(commit, options));
            }
        }
        output
    }

    fn format_commit(&self, commit: &CommitSummary, options: &RenderOptions) -> String {
        let line = attributed(&commit.subject, &commit.authors);
        let wrapped = wrap(&line, options.wrap_width);

        let mut entry = String::new();
        for (i, l) in wrapped.iter().enumerate() {
            entry.push_str(if i == 0 { "- " } else { "  " });
            entry.push_str(l);
            entry.push('\n');
        }
        if wrapped.is_empty() {
            entry.push_str("-\n");
        }

        let body = commit.body_text();
        if !body.is_empty() {
            entry.push('\n');
            entry.push_str(&textwrap::indent(&body, "  "));
            entry.push_str("\n\n");
        }
        entry
    }
}

impl ChangelogFormatter for RestFormatter {
    fn name(&self) -> &'static str {
        "rest"
    }

    #[instrument(skip_all, fields(versions = document.versions.len()))]
    fn format(&self, document: &ChangelogDocument, options: &RenderOptions) -> Result<String> {
        let mut output = String::new();

        if let Some(title) = &document.title {
            output.push_str(&underline(title, '='));
            output.push_str("\n\n");
        }

        for version in &document.versions {
            output.push_str(&self.format_version(version, options));
            output.push_str("\n\n");
        }

        debug!(output_len = output.len(), "rest changelog formatted");
        Ok(output)
    }

    fn extension(&self) -> &'static str {
        "rst"
    }
}
