//! Non-fatal conditions reported during generation

use std::fmt;

/// A reported condition that still yields a valid document
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChangelogWarning {
    /// The revision range selected no commit
    NoCommits,
    /// No tag in the range matches the release tag pattern
    NoQualifyingTags { pattern: String },
    /// No version lists any commit once filters are applied
    EmptyChangelog,
}

impl fmt::Display for ChangelogWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoCommits => write!(f, "no commits found in the selected revision range"),
            Self::NoQualifyingTags { pattern } => {
                write!(f, "no tag matches '{}', all commits are unreleased", pattern)
            }
            Self::EmptyChangelog => write!(f, "changelog is empty, every commit was filtered out"),
        }
    }
}

/// Warning sink that drops everything
pub fn ignore_warnings(_: &ChangelogWarning) {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let warning = ChangelogWarning::NoQualifyingTags {
            pattern: r"^\d+$".to_string(),
        };
        assert!(warning.to_string().contains(r"^\d+$"));
        assert!(ChangelogWarning::EmptyChangelog.to_string().contains("empty"));
    }
}
