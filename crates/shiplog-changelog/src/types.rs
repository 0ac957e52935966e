//! Changelog types

use std::collections::BTreeSet;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Marker found in a commit subject
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommitFlag {
    /// Listed, but not a significant change
    Minor,
    /// Breaks compatibility
    Breaking,
}

/// A piece of a commit body kept for display
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BodySection {
    /// Free text paragraph
    Paragraph { text: String },
    /// `Key: value` trailer that does not name a co-author
    Trailer { key: String, value: String },
}

impl BodySection {
    /// Create a paragraph section
    pub fn paragraph(text: impl Into<String>) -> Self {
        Self::Paragraph { text: text.into() }
    }

    /// Create a trailer section
    pub fn trailer(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self::Trailer {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// A commit interpreted against the configured taxonomy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedCommit {
    /// Commit hash
    pub hash: String,
    /// Subject as written by the author
    pub raw_subject: String,
    /// Display subject, prefix and markers removed
    pub subject: String,
    /// Category name, always one of the configured categories
    pub category: String,
    /// Markers found in the subject
    pub flags: BTreeSet<CommitFlag>,
    /// Free paragraphs and non-author trailers, in message order
    pub body_sections: Vec<BodySection>,
    /// Display names, primary author first unless sorted; never empty
    pub authors: Vec<String>,
    /// Whether the commit has two or more parents
    pub is_merge: bool,
    /// Authored timestamp
    pub timestamp: DateTime<Utc>,
}

impl ParsedCommit {
    /// Check for a subject marker
    pub fn has_flag(&self, flag: CommitFlag) -> bool {
        self.flags.contains(&flag)
    }

    /// Value of the first trailer with this key, compared case-insensitively
    pub fn trailer(&self, key: &str) -> Option<&str> {
        self.body_sections.iter().find_map(|s| match s {
            BodySection::Trailer { key: k, value } if k.eq_ignore_ascii_case(key) => {
                Some(value.as_str())
            }
            _ => None,
        })
    }

    /// Free text paragraphs joined by blank lines
    pub fn body_text(&self) -> String {
        self.body_sections
            .iter()
            .filter_map(|s| match s {
                BodySection::Paragraph { text } => Some(text.as_str()),
                BodySection::Trailer { .. } => None,
            })
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

/// Commits between two qualifying tags
#[derive(Debug, Clone, PartialEq)]
pub struct VersionSegment {
    /// Qualifying tag; `None` for the unreleased segment
    pub tag: Option<String>,
    /// Tag name or the unreleased label
    pub label: String,
    /// Tagged commit date, or newest commit date when unreleased
    pub date: Option<DateTime<Utc>>,
    /// Included commits, newest first
    pub commits: Vec<ParsedCommit>,
    /// Index in the segment sequence, 0 being the newest
    pub position: usize,
}

impl VersionSegment {
    /// Whether this is the unreleased head segment
    pub fn is_unreleased(&self) -> bool {
        self.tag.is_none()
    }
}

/// One commit line as handed to output engines
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitSummary {
    pub subject: String,
    pub authors: Vec<String>,
    pub body_sections: Vec<BodySection>,
    pub flags: Vec<CommitFlag>,
    pub hash: String,
}

impl CommitSummary {
    /// Free text paragraphs joined by blank lines
    pub fn body_text(&self) -> String {
        self.body_sections
            .iter()
            .filter_map(|s| match s {
                BodySection::Paragraph { text } => Some(text.as_str()),
                BodySection::Trailer { .. } => None,
            })
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

/// Commits of one category within a version
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionEntry {
    /// Category name
    pub category: String,
    /// Display label of the category
    pub label: String,
    pub commits: Vec<CommitSummary>,
}

/// One version of the changelog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionEntry {
    /// Tag name or the unreleased label
    pub label: String,
    /// Qualifying tag, absent when unreleased
    pub tag: Option<String>,
    pub date: Option<NaiveDate>,
    /// Non-empty sections in configured category order
    pub sections: Vec<SectionEntry>,
}

impl VersionEntry {
    /// Check if the version lists any commit
    pub fn is_empty(&self) -> bool {
        self.sections.iter().all(|s| s.commits.is_empty())
    }
}

/// The grouped changelog, ready for rendering
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangelogDocument {
    pub title: Option<String>,
    /// Versions, newest first
    pub versions: Vec<VersionEntry>,
    /// True when no version lists any commit
    pub empty: bool,
}
