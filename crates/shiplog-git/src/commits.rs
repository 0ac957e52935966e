//! Commit history operations

use chrono::{TimeZone, Utc};
use git2::Sort;
use tracing::{debug, instrument};

use crate::repository::{GitRepo, Result};
use crate::types::{RawCommit, RevisionRange};

impl GitRepo {
    /// List the commits selected by `range`, newest first
    #[instrument(skip(self), fields(range = %range))]
    pub fn list_commits(&self, range: &RevisionRange) -> Result<Vec<RawCommit>> {
        let (includes, excludes) = range.split();

        let mut revwalk = self.repo.revwalk()?;
        revwalk.set_sorting(Sort::TOPOLOGICAL | Sort::TIME)?;

        for rev in includes {
            if rev == "HEAD" && self.repo.head().is_err() {
                // Unborn branch: nothing to walk
                debug!("HEAD is unborn, history is empty");
                return Ok(Vec::new());
            }
            revwalk.push(self.resolve_commit(rev)?)?;
        }
        for rev in excludes {
            revwalk.hide(self.resolve_commit(rev)?)?;
        }

        let mut commits = Vec::new();
        for oid in revwalk {
            let commit = self.repo.find_commit(oid?)?;
            commits.push(commit_to_raw(&commit));
        }

        debug!(count = commits.len(), "listed commits");
        Ok(commits)
    }
}

/// Convert a git2 Commit to a RawCommit
fn commit_to_raw(commit: &git2::Commit<'_>) -> RawCommit {
    let author = commit.author();
    let committer = commit.committer();

    let subject = commit.summary().unwrap_or_default().to_string();
    let body = commit.body().unwrap_or_default().trim_end().to_string();

    let timestamp = Utc
        .timestamp_opt(author.when().seconds(), 0)
        .single()
        .unwrap_or_else(Utc::now);

    RawCommit::new(
        commit.id().to_string(),
        subject,
        author.name().unwrap_or("Unknown"),
        author.email().unwrap_or_default(),
        timestamp,
    )
    .with_body(body)
    .with_committer(
        committer.name().unwrap_or("Unknown"),
        committer.email().unwrap_or_default(),
    )
    .with_parents(commit.parent_ids().map(|id| id.to_string()))
}
