//! Default configuration values

use super::types::Config;

/// Default configuration file name (TOML)
pub const DEFAULT_CONFIG_TOML: &str = ".shiplog.toml";

/// Default configuration file name (YAML)
pub const DEFAULT_CONFIG_YAML: &str = ".shiplog.yaml";

/// Environment variable naming an explicit configuration file
pub const CONFIG_ENV_VAR: &str = "SHIPLOG_CONFIG";

/// Git config key naming a configuration file, relative to the work tree
pub const GIT_CONFIG_KEY: &str = "shiplog.config-path";

/// Get list of config file names to search for
pub fn config_file_names() -> Vec<&'static str> {
    vec![
        DEFAULT_CONFIG_TOML,
        "shiplog.toml",
        DEFAULT_CONFIG_YAML,
        "shiplog.yaml",
    ]
}

/// Generate default configuration TOML
pub fn default_config_toml() -> String {
    let config = Config::default();
    toml::to_string_pretty(&config).unwrap_or_else(|_| DEFAULT_CONFIG_TEMPLATE.to_string())
}

/// Default configuration template
pub const DEFAULT_CONFIG_TEMPLATE: &str = r#"# shiplog configuration
#
# Every key is optional; missing keys keep their built-in default.

# Tags matching this pattern delimit versions.
tag_filter_regexp = '^[0-9]+\.[0-9]+(\.[0-9]+)?$'

# Label of the version holding commits made after the latest release.
unreleased_label = "unreleased"

# Commits whose subject matches any of these are left out.
exclusion_regexps = [
    '^(.{3,3}\s*:)?\s*[fF]irst commit.?\s*$',
    '^$',
]

# Subject markers. Matching commits are flagged and the marker is removed.
minor_flags = ["!minor", "@minor"]
breaking_flags = ["!breaking", "@breaking"]
drop_minor = false

include_merge = true

# Sections, in display order.
categories = [
    { name = "new", label = "New" },
    { name = "fix", label = "Fix" },
    { name = "change", label = "Changes" },
    { name = "other", label = "Other" },
]
default_category = "other"

# First matching prefix wins; the prefix is removed from the subject.
category_patterns = [
    { pattern = '^new\s*:\s*', category = "new" },
    { pattern = '^fix\s*:\s*', category = "fix" },
    { pattern = '^chg\s*:\s*', category = "change" },
]

co_author_trailers = ["Co-Authored-By"]
merge_trailer = "Change-Id"

subject_transforms = ["strip", { set_if_empty = "No commit message." }, "ucfirst", "final_dot"]

# Steps applied to each free-text body paragraph, e.g. re-flowing it.
body_transforms = ["strip", { wrap = 66 }]

output_engine = "rest"
title = "Changelog"
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigOverrides;

    #[test]
    fn test_template_parses_as_overrides() {
        let overrides: ConfigOverrides = toml::from_str(DEFAULT_CONFIG_TEMPLATE).unwrap();
        let config = Config::default().merge(overrides);
        assert_eq!(config.exclusion_regexps.len(), 2);
        assert_eq!(config.subject_transforms.len(), 4);
        assert_eq!(config.body_transforms.len(), 2);
    }

    #[test]
    fn test_default_config_toml_round_trips() {
        let text = default_config_toml();
        let overrides: ConfigOverrides = toml::from_str(&text).unwrap();
        assert_eq!(Config::default().merge(overrides), Config::default());
    }
}
