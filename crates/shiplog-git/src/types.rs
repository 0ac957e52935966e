//! Git types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A commit as read from history, before any interpretation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawCommit {
    /// Commit hash (full)
    pub hash: String,
    /// Short hash (first 7 characters)
    pub short_hash: String,
    /// Subject line
    pub subject: String,
    /// Message body after the subject paragraph
    pub body: String,
    /// Author name
    pub author_name: String,
    /// Author email
    pub author_email: String,
    /// Committer name
    pub committer_name: String,
    /// Committer email
    pub committer_email: String,
    /// Authored timestamp
    pub timestamp: DateTime<Utc>,
    /// Parent hashes; two or more for merges
    pub parents: Vec<String>,
}

impl RawCommit {
    /// Create a new RawCommit; the committer defaults to the author
    pub fn new(
        hash: impl Into<String>,
        subject: impl Into<String>,
        author_name: impl Into<String>,
        author_email: impl Into<String>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        let hash = hash.into();
        let short_hash = hash.chars().take(7).collect();
        let author_name = author_name.into();
        let author_email = author_email.into();

        Self {
            hash,
            short_hash,
            subject: subject.into(),
            body: String::new(),
            committer_name: author_name.clone(),
            committer_email: author_email.clone(),
            author_name,
            author_email,
            timestamp,
            parents: Vec::new(),
        }
    }

    /// Set the commit body
    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }

    /// Set the committer
    pub fn with_committer(mut self, name: impl Into<String>, email: impl Into<String>) -> Self {
        self.committer_name = name.into();
        self.committer_email = email.into();
        self
    }

    /// Set the parent hashes
    pub fn with_parents<I, S>(mut self, parents: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.parents = parents.into_iter().map(Into::into).collect();
        self
    }

    /// Whether this is a merge commit
    pub fn is_merge(&self) -> bool {
        self.parents.len() >= 2
    }

    /// Author as `Name <email>`
    pub fn author_identity(&self) -> String {
        if self.author_email.is_empty() {
            self.author_name.clone()
        } else {
            format!("{} <{}>", self.author_name, self.author_email)
        }
    }

    /// Get the full message including body
    pub fn full_message(&self) -> String {
        if self.body.is_empty() {
            self.subject.clone()
        } else {
            format!("{}\n\n{}", self.subject, self.body)
        }
    }
}

/// Information about a git tag
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagInfo {
    /// Tag name
    pub name: String,
    /// Commit hash the tag points to
    pub commit_hash: String,
    /// Creation time: tagger time for annotated tags, commit time otherwise
    pub timestamp: Option<DateTime<Utc>>,
    /// Whether the tag is annotated
    pub annotated: bool,
}

impl TagInfo {
    /// Create a new TagInfo
    pub fn new(name: impl Into<String>, commit_hash: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            commit_hash: commit_hash.into(),
            timestamp: None,
            annotated: false,
        }
    }

    /// Set the timestamp
    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    /// Mark the tag as annotated
    pub fn annotated(mut self) -> Self {
        self.annotated = true;
        self
    }
}

/// Revision expressions selecting the commits to walk.
///
/// Supports plain revisions (`HEAD`, `1.0`), exclusions (`^0.9`) and
/// two-dot ranges (`0.9..HEAD`). Empty means everything reachable from HEAD.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevisionRange {
    revs: Vec<String>,
}

impl RevisionRange {
    /// Full history from HEAD
    pub fn head() -> Self {
        Self::default()
    }

    /// Build from a list of revision expressions
    pub fn new<I, S>(revs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let revs: Vec<String> = revs.into_iter().map(Into::into).collect();
        if revs.len() == 1 && revs[0] == "HEAD" {
            return Self::default();
        }
        Self { revs }
    }

    /// Revision expressions, in the order given
    pub fn revs(&self) -> &[String] {
        &self.revs
    }

    /// Whether this selects the complete history from HEAD
    pub fn is_full_history(&self) -> bool {
        self.revs.is_empty()
    }

    /// Split into included and excluded revisions
    pub fn split(&self) -> (Vec<&str>, Vec<&str>) {
        let mut includes = Vec::new();
        let mut excludes = Vec::new();

        for rev in &self.revs {
            if let Some((from, to)) = rev.split_once("..") {
                if !from.is_empty() {
                    excludes.push(from);
                }
                includes.push(if to.is_empty() { "HEAD" } else { to });
            } else if let Some(excluded) = rev.strip_prefix('^') {
                excludes.push(excluded);
            } else {
                includes.push(rev.as_str());
            }
        }

        if includes.is_empty() {
            includes.push("HEAD");
        }
        (includes, excludes)
    }
}

impl std::fmt::Display for RevisionRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.revs.is_empty() {
            write!(f, "HEAD")
        } else {
            write!(f, "{}", self.revs.join(" "))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_commit() {
        let commit = RawCommit::new(
            "abc1234567890",
            "new: add feature",
            "Author",
            "author@example.com",
            Utc::now(),
        )
        .with_parents(["p1", "p2"]);

        assert_eq!(commit.short_hash, "abc1234");
        assert!(commit.is_merge());
        assert_eq!(commit.author_identity(), "Author <author@example.com>");
        assert_eq!(commit.committer_name, "Author");
    }

    #[test]
    fn test_full_message() {
        let commit = RawCommit::new("a", "subject", "A", "", Utc::now()).with_body("body");
        assert_eq!(commit.full_message(), "subject\n\nbody");
        assert_eq!(commit.author_identity(), "A");
    }

    #[test]
    fn test_revision_range_split() {
        let range = RevisionRange::new(["0.0.2..HEAD", "^0.0.1", "feature"]);
        let (includes, excludes) = range.split();
        assert_eq!(includes, vec!["HEAD", "feature"]);
        assert_eq!(excludes, vec!["0.0.2", "0.0.1"]);
        assert!(!range.is_full_history());
    }

    #[test]
    fn test_head_is_full_history() {
        assert!(RevisionRange::new(["HEAD"]).is_full_history());
        assert!(RevisionRange::head().is_full_history());
        assert_eq!(RevisionRange::head().split().0, vec!["HEAD"]);
    }
}
