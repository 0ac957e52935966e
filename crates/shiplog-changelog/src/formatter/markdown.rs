//! Markdown changelog formatter

use tracing::{debug, instrument};

use shiplog_core::error::Result;

use super::text::attributed;
use super::{ChangelogFormatter, RenderOptions};
use crate::types::{ChangelogDocument, CommitFlag, VersionEntry};

/// Markdown changelog formatter
pub struct MarkdownFormatter;

impl MarkdownFormatter {
    /// Create a new markdown formatter
    pub fn new() -> Self {
        Self
    }

    fn format_version(&self, version: &VersionEntry, output: &mut String) {
        match (&version.tag, version.date) {
            (Some(tag), Some(date)) => {
                output.push_str(&format!("## {} ({})\n\n", tag, date.format("%Y-%m-%d")))
            }
            (Some(tag), None) => output.push_str(&format!("## {}\n\n", tag)),
            (None, _) => output.push_str(&format!("## {}\n\n", version.label)),
        }

        for section in &version.sections {
            output.push_str(&format!("### {}\n\n", section.label));

            for commit in &section.commits {
                output.push_str("- ");
                if commit.flags.contains(&CommitFlag::Breaking) {
                    output.push_str("**BREAKING** ");
                }
                output.push_str(&attributed(&commit.subject, &commit.authors));
                output.push('\n');

                let body = commit.body_text();
                if !body.is_empty() {
                    output.push('\n');
                    output.push_str(&textwrap::indent(&body, "  "));
                    output.push_str("\n\n");
                }
            }

            output.push('\n');
        }
    }
}

impl Default for MarkdownFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl ChangelogFormatter for MarkdownFormatter {
    fn name(&self) -> &'static str {
        "markdown"
    }

    #[instrument(skip_all, fields(versions = document.versions.len()))]
    fn format(&self, document: &ChangelogDocument, _options: &RenderOptions) -> Result<String> {
        let mut output = String::new();

        if let Some(title) = &document.title {
            output.push_str(&format!("# {}\n\n", title));
        }

        for version in &document.versions {
            self.format_version(version, &mut output);
        }

        debug!(output_len = output.len(), "markdown changelog formatted");
        Ok(output)
    }

    fn extension(&self) -> &'static str {
        "md"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{BodySection, CommitSummary, SectionEntry};
    use chrono::NaiveDate;

    fn document() -> ChangelogDocument {
        ChangelogDocument {
            title: Some("Changelog".to_string()),
            versions: vec![VersionEntry {
                label: "1.0.0".to_string(),
                tag: Some("1.0.0".to_string()),
                date: NaiveDate::from_ymd_opt(2024, 2, 3),
                sections: vec![SectionEntry {
                    category: "new".to_string(),
                    label: "New".to_string(),
                    commits: vec![CommitSummary {
                        subject: "add new feature".to_string(),
                        authors: vec!["Jane".to_string(), "Bob".to_string()],
                        body_sections: vec![BodySection::paragraph("Details here.")],
                        flags: vec![CommitFlag::Breaking],
                        hash: "abc1234567890".to_string(),
                    }],
                }],
            }],
            empty: false,
        }
    }

    #[test]
    fn test_format_basic() {
        let output = MarkdownFormatter::new()
            .format(&document(), &RenderOptions::default())
            .unwrap();

        assert!(output.starts_with("# Changelog\n\n"));
        assert!(output.contains("## 1.0.0 (2024-02-03)"));
        assert!(output.contains("### New"));
        assert!(output.contains("- **BREAKING** add new feature [Jane, Bob]"));
        assert!(output.contains("  Details here."));
    }
}
