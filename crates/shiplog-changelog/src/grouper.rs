//! Aggregation of version segments into the changelog document

use std::collections::HashMap;

use tracing::{debug, instrument, warn};

use crate::filter::should_include;
use crate::parser::union_names;
use crate::settings::Settings;
use crate::types::{
    ChangelogDocument, CommitSummary, ParsedCommit, SectionEntry, VersionEntry, VersionSegment,
};
use crate::warning::ChangelogWarning;

/// Build the version entry for one segment
#[instrument(skip_all, fields(label = %segment.label))]
pub fn aggregate(segment: &VersionSegment, settings: &Settings) -> VersionEntry {
    let config = settings.config();

    let filtered: Vec<&ParsedCommit> = segment
        .commits
        .iter()
        .filter(|c| should_include(c, settings))
        .collect();
    let merged = merge_same_change(filtered, config.merge_trailer.as_deref());

    let mut buckets: HashMap<&str, Vec<CommitSummary>> = HashMap::new();
    for commit in merged {
        buckets
            .entry(commit.category)
            .or_default()
            .push(commit.summary);
    }

    let sections: Vec<SectionEntry> = config
        .categories
        .iter()
        .filter_map(|category| {
            let commits = buckets.remove(category.name.as_str())?;
            Some(SectionEntry {
                category: category.name.clone(),
                label: category.label.clone(),
                commits,
            })
        })
        .collect();

    debug!(sections = sections.len(), "aggregated segment");

    VersionEntry {
        label: segment.label.clone(),
        tag: segment.tag.clone(),
        date: segment.date.map(|d| d.date_naive()),
        sections,
    }
}

struct MergedCommit<'a> {
    category: &'a str,
    summary: CommitSummary,
}

/// Collapse commits sharing a `trailer` value, keeping the newest and
/// crediting every author
fn merge_same_change<'a>(commits: Vec<&'a ParsedCommit>, trailer: Option<&str>) -> Vec<MergedCommit<'a>> {
    let mut merged: Vec<MergedCommit<'a>> = Vec::new();
    let mut by_value: HashMap<&str, usize> = HashMap::new();

    for commit in commits {
        let value = trailer.and_then(|key| commit.trailer(key));
        if let Some(&index) = value.and_then(|v| by_value.get(v)) {
            union_names(&mut merged[index].summary.authors, &commit.authors);
            continue;
        }
        if let Some(value) = value {
            by_value.insert(value, merged.len());
        }
        merged.push(MergedCommit {
            category: &commit.category,
            summary: summarize(commit),
        });
    }
    merged
}

fn summarize(commit: &ParsedCommit) -> CommitSummary {
    CommitSummary {
        subject: commit.subject.clone(),
        authors: commit.authors.clone(),
        body_sections: commit.body_sections.clone(),
        flags: commit.flags.iter().copied().collect(),
        hash: commit.hash.clone(),
    }
}

/// Aggregate every segment and assemble the document.
///
/// The unreleased entry is kept even when empty; empty released entries are
/// dropped unless configured otherwise.
#[instrument(skip_all, fields(segments = segments.len()))]
pub fn build_document(
    segments: &[VersionSegment],
    settings: &Settings,
    title: Option<String>,
    on_warning: &mut dyn FnMut(&ChangelogWarning),
) -> ChangelogDocument {
    let keep_empty = settings.config().keep_empty_versions;

    let versions: Vec<VersionEntry> = segments
        .iter()
        .map(|s| (s.is_unreleased(), aggregate(s, settings)))
        .filter(|(unreleased, v)| *unreleased || keep_empty || !v.is_empty())
        .map(|(_, v)| v)
        .collect();

    let empty = versions.iter().all(VersionEntry::is_empty);
    if empty && !segments.is_empty() {
        warn!("changelog is empty");
        on_warning(&ChangelogWarning::EmptyChangelog);
    }

    ChangelogDocument {
        title,
        versions,
        empty,
    }
}
