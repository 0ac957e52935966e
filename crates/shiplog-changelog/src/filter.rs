//! Commit inclusion rules

use crate::settings::Settings;
use crate::types::{CommitFlag, ParsedCommit};

/// Whether a commit takes part in the changelog.
///
/// Exclusion patterns win over inclusion patterns. With inclusion patterns
/// configured, a subject must match at least one of them.
pub fn should_include(commit: &ParsedCommit, settings: &Settings) -> bool {
    let config = settings.config();

    if settings
        .exclusions
        .iter()
        .any(|re| re.is_match(&commit.raw_subject))
    {
        return false;
    }

    if !settings.inclusions.is_empty()
        && !settings
            .inclusions
            .iter()
            .any(|re| re.is_match(&commit.raw_subject))
    {
        return false;
    }

    if commit.is_merge && !config.include_merge {
        return false;
    }

    if config.drop_minor && is_minor(commit) {
        return false;
    }

    true
}

/// Whether a minor flag was found while parsing
pub fn is_minor(commit: &ParsedCommit) -> bool {
    commit.has_flag(CommitFlag::Minor)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::{CommitParser, MessageParser};
    use chrono::Utc;
    use shiplog_core::config::Config;
    use shiplog_git::RawCommit;
    use std::sync::Arc;

    fn check(config: Config, subject: &str, parents: usize) -> (bool, bool) {
        let settings = Arc::new(Settings::new(config).unwrap());
        let raw = RawCommit::new("abc1234", subject, "A", "a@x.org", Utc::now())
            .with_parents((0..parents).map(|i| format!("p{}", i)));
        let parsed = MessageParser::new(settings.clone()).parse(&raw);
        (should_include(&parsed, &settings), is_minor(&parsed))
    }

    #[test]
    fn test_exclusion_regexps() {
        let config = Config {
            exclusion_regexps: vec!["XXX".to_string(), r"^$".to_string()],
            ..Default::default()
        };
        assert!(!check(config.clone(), "chg: x XXX", 1).0);
        assert!(check(config, "chg: x", 1).0);
    }

    #[test]
    fn test_exclusion_wins_over_inclusion() {
        let config = Config {
            exclusion_regexps: vec!["wip".to_string()],
            inclusion_regexps: vec!["^new".to_string()],
            ..Default::default()
        };
        assert!(!check(config.clone(), "new: wip thing", 1).0);
        assert!(check(config.clone(), "new: thing", 1).0);
        assert!(!check(config, "fix: thing", 1).0);
    }

    #[test]
    fn test_merge_commits() {
        assert!(check(Config::default(), "Merge branch 'a'", 2).0);

        let config = Config {
            include_merge: false,
            ..Default::default()
        };
        assert!(!check(config, "Merge branch 'a'", 2).0);
    }

    #[test]
    fn test_minor_commits() {
        let (included, minor) = check(Config::default(), "fix: typo !minor", 1);
        assert!(included);
        assert!(minor);

        let config = Config {
            drop_minor: true,
            ..Default::default()
        };
        assert!(!check(config, "fix: typo !minor", 1).0);
    }
}
