//! Commit parsing
//!
//! Turns a raw commit into a [`ParsedCommit`]: category from the ordered
//! prefix rules, flags from trigger substrings, co-authors and body sections
//! from the message body.

mod authors;
mod trailers;

pub use authors::{union_names, AuthorList};
pub use trailers::{split_body, split_message, SplitBody, Trailer};

use std::collections::BTreeSet;
use std::sync::Arc;

use tracing::trace;

use shiplog_git::RawCommit;

use crate::settings::Settings;
use crate::transform::apply_all;
use crate::types::{BodySection, CommitFlag, ParsedCommit};

/// Trait for commit parsers
pub trait CommitParser: Send + Sync {
    /// Parse a commit; never fails, unmatched commits get the default category
    fn parse(&self, commit: &RawCommit) -> ParsedCommit;
}

/// Parser driven by the configured category rules, flags and trailers
pub struct MessageParser {
    settings: Arc<Settings>,
}

impl MessageParser {
    /// Create a parser over compiled settings
    pub fn new(settings: Arc<Settings>) -> Self {
        Self { settings }
    }

    fn categorize(&self, subject: &str) -> (String, String) {
        for rule in &self.settings.category_rules {
            if let Some(m) = rule.pattern.find(subject) {
                let stripped = format!("{}{}", &subject[..m.start()], &subject[m.end()..]);
                return (rule.category.clone(), stripped);
            }
        }
        (
            self.settings.config().default_category.clone(),
            subject.to_string(),
        )
    }

    fn extract_flags(&self, raw_subject: &str, subject: String) -> (BTreeSet<CommitFlag>, String) {
        let config = self.settings.config();
        let mut flags = BTreeSet::new();
        let mut subject = subject;
        let mut stripped = false;

        for (flag, triggers) in [
            (CommitFlag::Minor, &config.minor_flags),
            (CommitFlag::Breaking, &config.breaking_flags),
        ] {
            for trigger in triggers {
                if raw_subject.contains(trigger.as_str()) {
                    flags.insert(flag);
                    if config.strip_flags && subject.contains(trigger.as_str()) {
                        subject = subject.replace(trigger.as_str(), "");
                        stripped = true;
                    }
                }
            }
        }

        if stripped {
            subject = subject.split_whitespace().collect::<Vec<_>>().join(" ");
        }
        (flags, subject)
    }
}

impl CommitParser for MessageParser {
    fn parse(&self, commit: &RawCommit) -> ParsedCommit {
        let config = self.settings.config();
        let (raw_subject, body) = split_message(&commit.full_message());

        let (category, subject) = self.categorize(&raw_subject);
        let (flags, subject) = self.extract_flags(&raw_subject, subject);

        let mut authors = AuthorList::new();
        authors.push(&commit.author_identity());

        let split = split_body(&body);
        let mut body_sections: Vec<BodySection> = split
            .paragraphs
            .iter()
            .map(|p| apply_all(&self.settings.body_transforms, p))
            .filter(|p| !p.trim().is_empty())
            .map(BodySection::paragraph)
            .collect();

        for trailer in split.trailers {
            let is_co_author = config
                .co_author_trailers
                .iter()
                .any(|k| k.eq_ignore_ascii_case(&trailer.key));
            if is_co_author {
                authors.push(&trailer.value);
            } else {
                body_sections.push(BodySection::trailer(trailer.key, trailer.value));
            }
        }

        let mut authors = authors.into_names(config.author_order);
        if authors.is_empty() {
            authors.push("Unknown".to_string());
        }

        let subject = apply_all(&self.settings.subject_transforms, &subject);

        trace!(hash = %commit.short_hash, category = %category, "parsed commit");

        ParsedCommit {
            hash: commit.hash.clone(),
            raw_subject,
            subject,
            category,
            flags,
            body_sections,
            authors,
            is_merge: commit.is_merge(),
            timestamp: commit.timestamp,
        }
    }
}
