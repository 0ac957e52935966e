//! Tag operations

use chrono::{TimeZone, Utc};
use tracing::{debug, instrument, warn};

use crate::repository::{GitRepo, Result};
use crate::types::TagInfo;

impl GitRepo {
    /// Get all tags that resolve to a commit
    #[instrument(skip(self))]
    pub fn tags(&self) -> Result<Vec<TagInfo>> {
        let mut tags = Vec::new();

        self.repo.tag_foreach(|oid, name| {
            let name = String::from_utf8_lossy(name)
                .trim_start_matches("refs/tags/")
                .to_string();

            if let Ok(commit) = self.repo.find_commit(oid) {
                // Lightweight tag
                let timestamp = Utc
                    .timestamp_opt(commit.time().seconds(), 0)
                    .single()
                    .unwrap_or_else(Utc::now);
                tags.push(TagInfo::new(&name, commit.id().to_string()).with_timestamp(timestamp));
            } else if let Ok(tag) = self.repo.find_tag(oid) {
                // Annotated tag, possibly pointing at another tag
                let Ok(commit) = tag.target().and_then(|t| t.peel_to_commit()) else {
                    debug!(tag = %name, "tag does not point at a commit, skipping");
                    return true;
                };

                let when = tag
                    .tagger()
                    .map(|t| t.when())
                    .unwrap_or_else(|| commit.time());
                let timestamp = Utc
                    .timestamp_opt(when.seconds(), 0)
                    .single()
                    .unwrap_or_else(Utc::now);

                tags.push(
                    TagInfo::new(&name, commit.id().to_string())
                        .with_timestamp(timestamp)
                        .annotated(),
                );
            } else {
                warn!(tag = %name, "could not resolve tag target");
            }

            true
        })?;

        debug!(count = tags.len(), "listed all tags");
        Ok(tags)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use git2::{Repository, Signature};
    use tempfile::TempDir;

    fn setup_repo_with_tags() -> (TempDir, GitRepo, String) {
        let temp = TempDir::new().unwrap();
        let repo = Repository::init(temp.path()).unwrap();

        let sig = Signature::now("Test", "test@example.com").unwrap();
        let tree_id = repo.index().unwrap().write_tree().unwrap();
        let tree = repo.find_tree(tree_id).unwrap();
        let oid = repo
            .commit(Some("HEAD"), &sig, &sig, "Initial commit", &tree, &[])
            .unwrap();

        let commit = repo.find_commit(oid).unwrap();
        repo.tag_lightweight("0.1.0", commit.as_object(), false)
            .unwrap();
        repo.tag("0.1.1", commit.as_object(), &sig, "Release 0.1.1", false)
            .unwrap();

        let git_repo = GitRepo::open(temp.path()).unwrap();
        (temp, git_repo, oid.to_string())
    }

    #[test]
    fn test_list_tags() {
        let (_temp, repo, hash) = setup_repo_with_tags();
        let mut tags = repo.tags().unwrap();
        tags.sort_by(|a, b| a.name.cmp(&b.name));

        assert_eq!(tags.len(), 2);
        assert_eq!(tags[0].name, "0.1.0");
        assert!(!tags[0].annotated);
        assert_eq!(tags[1].name, "0.1.1");
        assert!(tags[1].annotated);
        assert!(tags.iter().all(|t| t.commit_hash == hash));
        assert!(tags.iter().all(|t| t.timestamp.is_some()));
    }

    #[test]
    fn test_no_tags() {
        let temp = TempDir::new().unwrap();
        Repository::init(temp.path()).unwrap();
        let repo = GitRepo::open(temp.path()).unwrap();
        assert!(repo.tags().unwrap().is_empty());
    }
}
