//! Narrow history interface consumed by changelog generation

use std::collections::HashMap;

use tracing::debug;

use shiplog_core::error::GitError;

use crate::repository::{GitRepo, Result};
use crate::types::{RawCommit, RevisionRange, TagInfo};

/// Read access to commit history and tags
pub trait History {
    /// Commits selected by `range`, newest first (topological, then time)
    fn list_commits(&self, range: &RevisionRange) -> Result<Vec<RawCommit>>;

    /// All tags, grouped by the hash of the commit they point to
    fn list_tags(&self) -> Result<HashMap<String, Vec<TagInfo>>>;
}

impl History for GitRepo {
    fn list_commits(&self, range: &RevisionRange) -> Result<Vec<RawCommit>> {
        GitRepo::list_commits(self, range)
    }

    fn list_tags(&self) -> Result<HashMap<String, Vec<TagInfo>>> {
        let mut by_commit: HashMap<String, Vec<_>> = HashMap::new();
        for tag in self.tags()? {
            by_commit
                .entry(tag.commit_hash.clone())
                .or_default()
                .push(tag);
        }
        debug!(tagged_commits = by_commit.len(), "grouped tags by commit");
        Ok(by_commit)
    }
}

/// In-memory history, for tests and offline use.
///
/// Commits are held newest first, in push order. Ranges are slices of that
/// order, so ranges over branched histories are only approximate. Revisions resolve by `HEAD`, tag name,
/// full hash or a hash prefix of at least four characters.
#[derive(Debug, Clone, Default)]
pub struct MemoryHistory {
    commits: Vec<RawCommit>,
    tags: Vec<TagInfo>,
}

impl MemoryHistory {
    /// Create an empty history
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a commit on top of the current head.
    ///
    /// A commit without parents is linked to the current head; give parents
    /// explicitly to model branches and merges. Commits must be pushed
    /// parents first.
    pub fn push_commit(&mut self, mut commit: RawCommit) {
        if commit.parents.is_empty() {
            if let Some(head) = self.commits.first() {
                commit.parents.push(head.hash.clone());
            }
        }
        self.commits.insert(0, commit);
    }

    /// Add a commit on top of the current head, builder style
    pub fn with_commit(mut self, commit: RawCommit) -> Self {
        self.push_commit(commit);
        self
    }

    /// Add a tag
    pub fn add_tag(&mut self, tag: TagInfo) {
        self.tags.push(tag);
    }

    /// Add a tag, builder style
    pub fn with_tag(mut self, tag: TagInfo) -> Self {
        self.add_tag(tag);
        self
    }

    fn resolve(&self, rev: &str) -> Result<usize> {
        let invalid = |reason: &str| GitError::InvalidRevision {
            revision: rev.to_string(),
            reason: reason.to_string(),
        };

        if rev == "HEAD" {
            return if self.commits.is_empty() {
                Err(invalid("HEAD is unborn"))
            } else {
                Ok(0)
            };
        }

        let target = match self.tags.iter().find(|t| t.name == rev) {
            Some(tag) => tag.commit_hash.as_str(),
            None => rev,
        };

        self.commits
            .iter()
            .position(|c| c.hash == target || (target.len() >= 4 && c.hash.starts_with(target)))
            .ok_or_else(|| invalid("unknown revision"))
    }
}

impl History for MemoryHistory {
    fn list_commits(&self, range: &RevisionRange) -> Result<Vec<RawCommit>> {
        if self.commits.is_empty() && range.is_full_history() {
            return Ok(Vec::new());
        }

        let (includes, excludes) = range.split();

        let mut start = usize::MAX;
        for rev in includes {
            start = start.min(self.resolve(rev)?);
        }
        let mut end = self.commits.len();
        for rev in excludes {
            end = end.min(self.resolve(rev)?);
        }

        if start >= end {
            return Ok(Vec::new());
        }
        Ok(self.commits[start..end].to_vec())
    }

    fn list_tags(&self) -> Result<HashMap<String, Vec<TagInfo>>> {
        let mut by_commit: HashMap<String, Vec<_>> = HashMap::new();
        for tag in &self.tags {
            by_commit
                .entry(tag.commit_hash.clone())
                .or_default()
                .push(tag.clone());
        }
        Ok(by_commit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn history() -> MemoryHistory {
        let at = |d: u32| Utc.with_ymd_and_hms(2024, 1, d, 12, 0, 0).unwrap();
        MemoryHistory::new()
            .with_commit(RawCommit::new("aaaa1111", "first", "A", "a@x.org", at(1)))
            .with_commit(RawCommit::new("bbbb2222", "second", "A", "a@x.org", at(2)))
            .with_commit(RawCommit::new("cccc3333", "third", "A", "a@x.org", at(3)))
            .with_tag(TagInfo::new("0.0.1", "aaaa1111"))
    }

    #[test]
    fn test_full_history_newest_first() {
        let commits = History::list_commits(&history(), &RevisionRange::head()).unwrap();
        let subjects: Vec<_> = commits.iter().map(|c| c.subject.as_str()).collect();
        assert_eq!(subjects, vec!["third", "second", "first"]);
    }

    #[test]
    fn test_range_by_tag() {
        let commits =
            History::list_commits(&history(), &RevisionRange::new(["0.0.1..HEAD"])).unwrap();
        assert_eq!(commits.len(), 2);

        let commits = History::list_commits(&history(), &RevisionRange::new(["bbbb"])).unwrap();
        assert_eq!(commits[0].subject, "second");
    }

    #[test]
    fn test_unknown_revision() {
        let result = History::list_commits(&history(), &RevisionRange::new(["nope"]));
        assert!(matches!(result, Err(GitError::InvalidRevision { .. })));
    }

    #[test]
    fn test_empty_history() {
        let commits = History::list_commits(&MemoryHistory::new(), &RevisionRange::head()).unwrap();
        assert!(commits.is_empty());
    }

    #[test]
    fn test_commits_linked_to_previous_head() {
        let commits = History::list_commits(&history(), &RevisionRange::head()).unwrap();
        assert_eq!(commits[0].parents, vec!["bbbb2222"]);
        assert_eq!(commits[1].parents, vec!["aaaa1111"]);
        assert!(commits[2].parents.is_empty());
    }

    #[test]
    fn test_explicit_parents_kept() {
        let at = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
        let history = MemoryHistory::new()
            .with_commit(RawCommit::new("root", "root", "A", "a@x.org", at))
            .with_commit(RawCommit::new("side", "side", "A", "a@x.org", at).with_parents(["root"]))
            .with_commit(RawCommit::new("main", "main", "A", "a@x.org", at).with_parents(["root"]));

        let commits = History::list_commits(&history, &RevisionRange::head()).unwrap();
        assert_eq!(commits[0].parents, vec!["root"]);
        assert_eq!(commits[1].parents, vec!["root"]);
    }

    #[test]
    fn test_tags_grouped_by_commit() {
        let tags = History::list_tags(&history()).unwrap();
        assert_eq!(tags["aaaa1111"][0].name, "0.0.1");
        assert!(!tags.contains_key("bbbb2222"));
    }
}
