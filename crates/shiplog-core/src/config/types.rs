//! Configuration types

use serde::{Deserialize, Serialize};

/// Effective configuration for a shiplog run.
///
/// Built once at startup as `Config::default().merge(overrides)` and then
/// passed by reference; nothing mutates it afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Pattern selecting the tags that delimit versions
    pub tag_filter_regexp: String,

    /// Declared categories, in display order
    pub categories: Vec<CategoryConfig>,

    /// Category assigned when no prefix rule matches
    pub default_category: String,

    /// Ordered prefix rules, first match wins
    pub category_patterns: Vec<CategoryRule>,

    /// Subject substrings that mark a commit as minor
    pub minor_flags: Vec<String>,

    /// Subject substrings that mark a commit as breaking
    pub breaking_flags: Vec<String>,

    /// Remove flag markers from the displayed subject
    pub strip_flags: bool,

    /// Trailer keys whose values are credited as co-authors
    pub co_author_trailers: Vec<String>,

    /// Subjects matching any of these are dropped
    pub exclusion_regexps: Vec<String>,

    /// When non-empty, only subjects matching one of these are kept
    pub inclusion_regexps: Vec<String>,

    /// Whether merge commits take part in the changelog
    pub include_merge: bool,

    /// Drop commits flagged minor instead of listing them
    pub drop_minor: bool,

    /// Keep released versions that end up with no entries
    pub keep_empty_versions: bool,

    /// Label of the segment holding commits after the latest release
    pub unreleased_label: String,

    /// Which tag labels a version when a commit carries several
    pub tag_tie_break: TagTieBreak,

    /// Trailer whose equal values mark the same logical change
    pub merge_trailer: Option<String>,

    /// Ordering of attributed authors
    pub author_order: AuthorOrder,

    /// Text steps applied to the cleaned subject
    pub subject_transforms: Vec<TextTransform>,

    /// Text steps applied to each free-text body paragraph
    pub body_transforms: Vec<TextTransform>,

    /// Default revision list when none is given on the command line
    pub revs: Vec<String>,

    /// Registered output engine used for rendering
    pub output_engine: String,

    /// Document title, printed only for full-history changelogs
    pub title: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tag_filter_regexp: r"^[0-9]+\.[0-9]+(\.[0-9]+)?$".to_string(),
            categories: vec![
                CategoryConfig::new("new", "New"),
                CategoryConfig::new("fix", "Fix"),
                CategoryConfig::new("change", "Changes"),
                CategoryConfig::new("other", "Other"),
            ],
            default_category: "other".to_string(),
            category_patterns: vec![
                CategoryRule::new(r"^new\s*:\s*", "new"),
                CategoryRule::new(r"^fix\s*:\s*", "fix"),
                CategoryRule::new(r"^chg\s*:\s*", "change"),
            ],
            minor_flags: vec!["!minor".to_string(), "@minor".to_string()],
            breaking_flags: vec!["!breaking".to_string(), "@breaking".to_string()],
            strip_flags: true,
            co_author_trailers: vec!["Co-Authored-By".to_string()],
            exclusion_regexps: Vec::new(),
            inclusion_regexps: Vec::new(),
            include_merge: true,
            drop_minor: false,
            keep_empty_versions: false,
            unreleased_label: "unreleased".to_string(),
            tag_tie_break: TagTieBreak::default(),
            merge_trailer: Some("Change-Id".to_string()),
            author_order: AuthorOrder::default(),
            subject_transforms: Vec::new(),
            body_transforms: Vec::new(),
            revs: Vec::new(),
            output_engine: "rest".to_string(),
            title: Some("Changelog".to_string()),
        }
    }
}

impl Config {
    /// Apply user-supplied overrides on top of this configuration.
    ///
    /// Empty strings for `merge_trailer` and `title` disable them.
    pub fn merge(mut self, overrides: ConfigOverrides) -> Self {
        if let Some(v) = overrides.tag_filter_regexp {
            self.tag_filter_regexp = v;
        }
        if let Some(v) = overrides.categories {
            self.categories = v;
        }
        if let Some(v) = overrides.default_category {
            self.default_category = v;
        }
        if let Some(v) = overrides.category_patterns {
            self.category_patterns = v;
        }
        if let Some(v) = overrides.minor_flags {
            self.minor_flags = v;
        }
        if let Some(v) = overrides.breaking_flags {
            self.breaking_flags = v;
        }
        if let Some(v) = overrides.strip_flags {
            self.strip_flags = v;
        }
        if let Some(v) = overrides.co_author_trailers {
            self.co_author_trailers = v;
        }
        if let Some(v) = overrides.exclusion_regexps {
            self.exclusion_regexps = v;
        }
        if let Some(v) = overrides.inclusion_regexps {
            self.inclusion_regexps = v;
        }
        if let Some(v) = overrides.include_merge {
            self.include_merge = v;
        }
        if let Some(v) = overrides.drop_minor {
            self.drop_minor = v;
        }
        if let Some(v) = overrides.keep_empty_versions {
            self.keep_empty_versions = v;
        }
        if let Some(v) = overrides.unreleased_label {
            self.unreleased_label = v;
        }
        if let Some(v) = overrides.tag_tie_break {
            self.tag_tie_break = v;
        }
        if let Some(v) = overrides.merge_trailer {
            self.merge_trailer = non_empty(v);
        }
        if let Some(v) = overrides.author_order {
            self.author_order = v;
        }
        if let Some(v) = overrides.subject_transforms {
            self.subject_transforms = v;
        }
        if let Some(v) = overrides.body_transforms {
            self.body_transforms = v;
        }
        if let Some(v) = overrides.revs {
            self.revs = v;
        }
        if let Some(v) = overrides.output_engine {
            self.output_engine = v;
        }
        if let Some(v) = overrides.title {
            self.title = non_empty(v);
        }
        self
    }

    /// Look up the display label of a declared category
    pub fn category_label(&self, name: &str) -> Option<&str> {
        self.categories
            .iter()
            .find(|c| c.name == name)
            .map(|c| c.label.as_str())
    }
}

fn non_empty(value: String) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

/// Partial configuration as written in a config file.
///
/// Every field is optional; unknown keys are rejected so typos surface as
/// configuration errors instead of silently falling back to defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigOverrides {
    pub tag_filter_regexp: Option<String>,
    pub categories: Option<Vec<CategoryConfig>>,
    pub default_category: Option<String>,
    pub category_patterns: Option<Vec<CategoryRule>>,
    pub minor_flags: Option<Vec<String>>,
    pub breaking_flags: Option<Vec<String>>,
    pub strip_flags: Option<bool>,
    pub co_author_trailers: Option<Vec<String>>,
    pub exclusion_regexps: Option<Vec<String>>,
    pub inclusion_regexps: Option<Vec<String>>,
    pub include_merge: Option<bool>,
    pub drop_minor: Option<bool>,
    pub keep_empty_versions: Option<bool>,
    pub unreleased_label: Option<String>,
    pub tag_tie_break: Option<TagTieBreak>,
    pub merge_trailer: Option<String>,
    pub author_order: Option<AuthorOrder>,
    pub subject_transforms: Option<Vec<TextTransform>>,
    pub body_transforms: Option<Vec<TextTransform>>,
    pub revs: Option<Vec<String>>,
    pub output_engine: Option<String>,
    pub title: Option<String>,
}

/// A declared changelog category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryConfig {
    /// Identifier used by rules (e.g. "fix")
    pub name: String,
    /// Section heading shown in the changelog (e.g. "Fix")
    pub label: String,
}

impl CategoryConfig {
    /// Create a new category declaration
    pub fn new(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
        }
    }
}

/// A subject prefix rule mapping to a category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRule {
    /// Regex matched case-insensitively against the start of the subject
    pub pattern: String,
    /// Name of the category assigned on match
    pub category: String,
}

impl CategoryRule {
    /// Create a new category rule
    pub fn new(pattern: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            category: category.into(),
        }
    }
}

/// Tag selection when one commit carries several qualifying tags
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TagTieBreak {
    /// Most recently created tag, greatest name on equal times
    #[default]
    Latest,
    /// Oldest tag, smallest name on equal times
    Earliest,
}

/// Ordering of the authors credited on a commit
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthorOrder {
    /// Primary author first, then co-authors as they appear
    #[default]
    Appearance,
    /// Sorted by display name
    Alphabetical,
}

/// A text processing step applied to commit subjects or body paragraphs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextTransform {
    /// Trim surrounding whitespace
    Strip,
    /// Uppercase the first character
    Ucfirst,
    /// Append a period when the text ends with an alphanumeric character
    FinalDot,
    /// Regex substitution; `with` may use `$1` style group references
    Replace { pattern: String, with: String },
    /// Replace an empty text with the given one
    SetIfEmpty(String),
    /// Re-flow the text into lines of at most this many columns
    Wrap(usize),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_categories_cover_rules() {
        let config = Config::default();
        for rule in &config.category_patterns {
            assert!(config.category_label(&rule.category).is_some());
        }
        assert_eq!(config.category_label("other"), Some("Other"));
    }

    #[test]
    fn test_merge_overrides_only_given_fields() {
        let overrides = ConfigOverrides {
            unreleased_label: Some("(unreleased)".to_string()),
            include_merge: Some(false),
            ..Default::default()
        };

        let merged = Config::default().merge(overrides);
        assert_eq!(merged.unreleased_label, "(unreleased)");
        assert!(!merged.include_merge);
        assert_eq!(merged.output_engine, "rest");
        assert_eq!(merged.categories.len(), 4);
    }

    #[test]
    fn test_merge_empty_string_disables_optional() {
        let overrides = ConfigOverrides {
            merge_trailer: Some(String::new()),
            title: Some(String::new()),
            ..Default::default()
        };

        let merged = Config::default().merge(overrides);
        assert!(merged.merge_trailer.is_none());
        assert!(merged.title.is_none());
    }

    #[test]
    fn test_overrides_from_toml() {
        let overrides: ConfigOverrides = toml::from_str(
            r##"
tag_filter_regexp = '^v\d+'
tag_tie_break = "earliest"
subject_transforms = ["strip", "ucfirst", { replace = { pattern = "#(\\d+)", with = "issue $1" } }]
"##,
        )
        .unwrap();

        assert_eq!(overrides.tag_filter_regexp.as_deref(), Some(r"^v\d+"));
        assert_eq!(overrides.tag_tie_break, Some(TagTieBreak::Earliest));
        let transforms = overrides.subject_transforms.unwrap();
        assert_eq!(transforms[0], TextTransform::Strip);
        assert_eq!(transforms[1], TextTransform::Ucfirst);
        assert!(matches!(transforms[2], TextTransform::Replace { .. }));
    }

    #[test]
    fn test_body_transforms_from_toml() {
        let overrides: ConfigOverrides =
            toml::from_str(r#"body_transforms = ["strip", { wrap = 66 }]"#).unwrap();

        let merged = Config::default().merge(overrides);
        assert_eq!(
            merged.body_transforms,
            vec![TextTransform::Strip, TextTransform::Wrap(66)]
        );
        assert!(merged.subject_transforms.is_empty());
    }

    #[test]
    fn test_overrides_reject_unknown_keys() {
        let result: std::result::Result<ConfigOverrides, _> =
            toml::from_str("tag_filter = 'x'");
        assert!(result.is_err());
    }
}
