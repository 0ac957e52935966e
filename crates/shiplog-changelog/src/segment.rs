//! Partitioning of the commit walk into version segments

use std::collections::{HashMap, HashSet};

use tracing::{debug, info, instrument, warn};

use shiplog_core::config::TagTieBreak;
use shiplog_core::error::Result;
use shiplog_git::{History, RevisionRange, TagInfo};

use crate::filter::should_include;
use crate::parser::CommitParser;
use crate::settings::Settings;
use crate::types::VersionSegment;
use crate::warning::ChangelogWarning;

/// Pick the tag labelling a commit among its qualifying tags
pub fn pick_tag<'a>(candidates: &[&'a TagInfo], tie_break: TagTieBreak) -> Option<&'a TagInfo> {
    let order = |a: &&TagInfo, b: &&TagInfo| (a.timestamp, &a.name).cmp(&(b.timestamp, &b.name));
    let tags = candidates.iter().copied();
    match tie_break {
        TagTieBreak::Latest => tags.max_by(order),
        TagTieBreak::Earliest => tags.min_by(order),
    }
}

/// Split `range` into version segments at qualifying tags.
///
/// A commit belongs to the oldest qualifying tag whose commit reaches it, or
/// to the unreleased segment when no tag does. Segments are ordered by the
/// walk position of their tagged commit, newest first, and commits keep walk
/// order inside a segment.
///
/// The first segment is always the unreleased one, even when empty, unless
/// the range has no commit at all. Excluded commits still delimit segments
/// through their tags but are never stored.
#[instrument(skip_all, fields(range = %range))]
pub fn segment(
    history: &dyn History,
    range: &RevisionRange,
    settings: &Settings,
    parser: &dyn CommitParser,
    on_warning: &mut dyn FnMut(&ChangelogWarning),
) -> Result<Vec<VersionSegment>> {
    let config = settings.config();
    let commits = history.list_commits(range)?;

    if commits.is_empty() {
        warn!("no commits in range");
        on_warning(&ChangelogWarning::NoCommits);
        return Ok(Vec::new());
    }

    let tags = history.list_tags()?;
    info!(commits = commits.len(), tagged = tags.len(), "segmenting history");

    let mut segments = vec![VersionSegment {
        tag: None,
        label: config.unreleased_label.clone(),
        date: None,
        commits: Vec::new(),
        position: 0,
    }];
    let mut opened: HashSet<String> = HashSet::new();
    let mut boundaries: HashMap<&str, usize> = HashMap::new();

    for raw in &commits {
        let qualifying: Vec<&TagInfo> = tags
            .get(&raw.hash)
            .into_iter()
            .flatten()
            .filter(|t| settings.is_qualifying_tag(&t.name) && !opened.contains(&t.name))
            .collect();

        if let Some(tag) = pick_tag(&qualifying, config.tag_tie_break) {
            debug!(tag = %tag.name, hash = %raw.short_hash, "opening version segment");
            boundaries.insert(raw.hash.as_str(), segments.len());
            segments.push(VersionSegment {
                tag: Some(tag.name.clone()),
                label: tag.name.clone(),
                date: Some(raw.timestamp),
                commits: Vec::new(),
                position: segments.len(),
            });
            opened.extend(qualifying.iter().map(|t| t.name.clone()));
        }
    }

    // Children come before parents in the walk, so a commit's membership is
    // final once it is reached.
    let mut inherited: HashMap<&str, usize> = HashMap::new();
    for raw in &commits {
        let own = boundaries.get(raw.hash.as_str()).copied().unwrap_or(0);
        let index = own.max(inherited.remove(raw.hash.as_str()).unwrap_or(0));

        for parent in &raw.parents {
            let entry = inherited.entry(parent.as_str()).or_insert(index);
            *entry = (*entry).max(index);
        }

        let parsed = parser.parse(raw);
        if should_include(&parsed, settings) {
            segments[index].commits.push(parsed);
        }
    }

    segments[0].date = segments[0].commits.first().map(|c| c.timestamp);

    if opened.is_empty() {
        warn!(pattern = %config.tag_filter_regexp, "no qualifying tags");
        on_warning(&ChangelogWarning::NoQualifyingTags {
            pattern: config.tag_filter_regexp.clone(),
        });
    }

    debug!(segments = segments.len(), "segmentation done");
    Ok(segments)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::MessageParser;
    use chrono::{DateTime, TimeZone, Utc};
    use shiplog_core::config::Config;
    use shiplog_git::{MemoryHistory, RawCommit};
    use std::sync::Arc;

    fn at(minute: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 10, minute, 0).unwrap()
    }

    fn commit(hash: &str, subject: &str, minute: u32) -> RawCommit {
        RawCommit::new(hash, subject, "Dev", "dev@example.com", at(minute))
    }

    fn run(history: &MemoryHistory, config: Config) -> (Vec<VersionSegment>, Vec<ChangelogWarning>) {
        let settings = Arc::new(Settings::new(config).unwrap());
        let parser = MessageParser::new(settings.clone());
        let mut warnings = Vec::new();
        let segments = segment(
            history,
            &RevisionRange::head(),
            &settings,
            &parser,
            &mut |w: &ChangelogWarning| warnings.push(w.clone()),
        )
        .unwrap();
        (segments, warnings)
    }

    fn labels(segments: &[VersionSegment]) -> Vec<&str> {
        segments.iter().map(|s| s.label.as_str()).collect()
    }

    #[test]
    fn test_segments_at_qualifying_tags() {
        let history = MemoryHistory::new()
            .with_commit(commit("c1", "new: first", 1))
            .with_commit(commit("c2", "fix: second", 2))
            .with_commit(commit("c3", "new: third", 3))
            .with_tag(TagInfo::new("0.1.0", "c1"))
            .with_tag(TagInfo::new("0.2.0", "c2"))
            .with_tag(TagInfo::new("nightly", "c3"));

        let (segments, warnings) = run(&history, Config::default());

        assert_eq!(labels(&segments), vec!["unreleased", "0.2.0", "0.1.0"]);
        assert_eq!(segments[0].commits.len(), 1);
        assert_eq!(segments[0].date, Some(at(3)));
        assert_eq!(segments[1].date, Some(at(2)));
        assert_eq!(segments[2].position, 2);
        assert!(segments[1].tag.is_some());
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_unreleased_kept_when_head_is_tagged() {
        let history = MemoryHistory::new()
            .with_commit(commit("c1", "new: first", 1))
            .with_tag(TagInfo::new("1.0.0", "c1"));

        let (segments, _) = run(&history, Config::default());

        assert_eq!(labels(&segments), vec!["unreleased", "1.0.0"]);
        assert!(segments[0].commits.is_empty());
        assert_eq!(segments[0].date, None);
    }

    #[test]
    fn test_no_qualifying_tags() {
        let history = MemoryHistory::new()
            .with_commit(commit("c1", "one", 1))
            .with_commit(commit("c2", "two", 2))
            .with_tag(TagInfo::new("v-beta", "c1"));

        let (segments, warnings) = run(&history, Config::default());

        assert_eq!(segments.len(), 1);
        assert!(segments[0].is_unreleased());
        assert_eq!(segments[0].commits.len(), 2);
        assert!(matches!(
            warnings.as_slice(),
            [ChangelogWarning::NoQualifyingTags { .. }]
        ));
    }

    #[test]
    fn test_empty_range() {
        let (segments, warnings) = run(&MemoryHistory::new(), Config::default());
        assert!(segments.is_empty());
        assert_eq!(warnings, vec![ChangelogWarning::NoCommits]);
    }

    #[test]
    fn test_excluded_tagged_commit_still_delimits() {
        let history = MemoryHistory::new()
            .with_commit(commit("c1", "new: a", 1))
            .with_commit(commit("c2", "release XXX", 2))
            .with_commit(commit("c3", "new: b", 3))
            .with_tag(TagInfo::new("1.0.0", "c2"));
        let config = Config {
            exclusion_regexps: vec!["XXX".to_string()],
            ..Default::default()
        };

        let (segments, _) = run(&history, config);

        assert_eq!(labels(&segments), vec!["unreleased", "1.0.0"]);
        assert_eq!(segments[1].commits.len(), 1);
        assert_eq!(segments[1].commits[0].subject, "a");
    }

    #[test]
    fn test_tie_break_between_tags_on_one_commit() {
        let history = MemoryHistory::new()
            .with_commit(commit("c1", "new: a", 1))
            .with_tag(TagInfo::new("1.0.0", "c1").with_timestamp(at(5)))
            .with_tag(TagInfo::new("1.0.1", "c1").with_timestamp(at(4)));

        let (segments, _) = run(&history, Config::default());
        assert_eq!(segments[1].label, "1.0.0");
        assert_eq!(segments.len(), 2);

        let config = Config {
            tag_tie_break: TagTieBreak::Earliest,
            ..Default::default()
        };
        let (segments, _) = run(&history, config);
        assert_eq!(segments[1].label, "1.0.1");
    }

    #[test]
    fn test_tie_break_on_equal_times_uses_name() {
        let a = TagInfo::new("1.0", "c");
        let b = TagInfo::new("1.1", "c");
        assert_eq!(pick_tag(&[&a, &b], TagTieBreak::Latest).unwrap().name, "1.1");
        assert_eq!(pick_tag(&[&a, &b], TagTieBreak::Earliest).unwrap().name, "1.0");
        assert!(pick_tag(&[], TagTieBreak::Latest).is_none());
    }

    #[test]
    fn test_branch_merged_after_release() {
        // root <- feature ----------- merge (HEAD)
        //      \- fix (1.0.0) ------/
        let history = MemoryHistory::new()
            .with_commit(commit("root", "new: root", 1))
            .with_commit(commit("feat", "new: feature on branch", 2).with_parents(["root"]))
            .with_commit(commit("fix1", "fix: release fix", 3).with_parents(["root"]))
            .with_commit(commit("merge", "Merge branch 'feature'", 4).with_parents(["fix1", "feat"]))
            .with_tag(TagInfo::new("1.0.0", "fix1"));

        let (segments, _) = run(&history, Config::default());

        assert_eq!(labels(&segments), vec!["unreleased", "1.0.0"]);
        let subjects = |s: &VersionSegment| -> Vec<String> {
            s.commits.iter().map(|c| c.subject.clone()).collect()
        };
        assert_eq!(
            subjects(&segments[0]),
            vec!["Merge branch 'feature'", "feature on branch"]
        );
        assert_eq!(subjects(&segments[1]), vec!["release fix", "root"]);
    }

    #[test]
    fn test_commit_goes_to_oldest_reaching_tag() {
        // root (0.1.0) <- a <- b (0.2.0) <- c, where a also merges side,
        // a branch off root
        let history = MemoryHistory::new()
            .with_commit(commit("root", "new: root", 1))
            .with_commit(commit("side", "new: side", 2).with_parents(["root"]))
            .with_commit(commit("a", "new: a", 3).with_parents(["root", "side"]))
            .with_commit(commit("b", "new: b", 4))
            .with_commit(commit("c", "new: c", 5))
            .with_tag(TagInfo::new("0.1.0", "root"))
            .with_tag(TagInfo::new("0.2.0", "b"));

        let (segments, _) = run(&history, Config::default());

        assert_eq!(labels(&segments), vec!["unreleased", "0.2.0", "0.1.0"]);
        let hashes: Vec<Vec<&str>> = segments
            .iter()
            .map(|s| s.commits.iter().map(|c| c.hash.as_str()).collect())
            .collect();
        assert_eq!(hashes, vec![vec!["c"], vec!["b", "a", "side"], vec!["root"]]);
    }

    #[test]
    fn test_segmentation_is_stable() {
        let history = MemoryHistory::new()
            .with_commit(commit("c1", "new: a", 1))
            .with_commit(commit("c2", "new: b", 2))
            .with_tag(TagInfo::new("0.1", "c1"))
            .with_tag(TagInfo::new("0.1.0", "c1"));

        let (first, _) = run(&history, Config::default());
        for _ in 0..5 {
            let (again, _) = run(&history, Config::default());
            assert_eq!(labels(&first), labels(&again));
        }
    }
}
