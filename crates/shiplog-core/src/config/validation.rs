//! Configuration validation

use std::collections::HashSet;

use regex::Regex;
use tracing::debug;

use crate::error::{ConfigError, Result};

use super::types::{Config, TextTransform};

/// Validate configuration
pub fn validate_config(config: &Config) -> Result<()> {
    debug!("validating configuration");
    validate_categories(config)?;
    validate_patterns(config)?;
    validate_output(config)?;
    debug!("configuration validation passed");
    Ok(())
}

fn validate_categories(config: &Config) -> Result<()> {
    if config.categories.is_empty() {
        return Err(ConfigError::InvalidValue {
            field: "categories".to_string(),
            message: "at least one category must be declared".to_string(),
        }
        .into());
    }

    let mut seen = HashSet::new();
    for (i, category) in config.categories.iter().enumerate() {
        if category.name.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: format!("categories[{}].name", i),
                message: "category name cannot be empty".to_string(),
            }
            .into());
        }
        if !seen.insert(category.name.as_str()) {
            return Err(ConfigError::InvalidValue {
                field: format!("categories[{}].name", i),
                message: format!("duplicate category '{}'", category.name),
            }
            .into());
        }
    }

    if !seen.contains(config.default_category.as_str()) {
        return Err(ConfigError::UnknownCategory {
            field: "default_category".to_string(),
            category: config.default_category.clone(),
        }
        .into());
    }

    for (i, rule) in config.category_patterns.iter().enumerate() {
        if !seen.contains(rule.category.as_str()) {
            return Err(ConfigError::UnknownCategory {
                field: format!("category_patterns[{}].category", i),
                category: rule.category.clone(),
            }
            .into());
        }
    }

    Ok(())
}

fn validate_patterns(config: &Config) -> Result<()> {
    check_regex("tag_filter_regexp", &config.tag_filter_regexp)?;

    for (i, rule) in config.category_patterns.iter().enumerate() {
        check_regex(&format!("category_patterns[{}].pattern", i), &rule.pattern)?;
    }
    for (i, pattern) in config.exclusion_regexps.iter().enumerate() {
        check_regex(&format!("exclusion_regexps[{}]", i), pattern)?;
    }
    for (i, pattern) in config.inclusion_regexps.iter().enumerate() {
        check_regex(&format!("inclusion_regexps[{}]", i), pattern)?;
    }
    for (field, transforms) in [
        ("subject_transforms", &config.subject_transforms),
        ("body_transforms", &config.body_transforms),
    ] {
        for (i, transform) in transforms.iter().enumerate() {
            match transform {
                TextTransform::Replace { pattern, .. } => {
                    check_regex(&format!("{}[{}].pattern", field, i), pattern)?;
                }
                TextTransform::Wrap(0) => {
                    return Err(ConfigError::InvalidValue {
                        field: format!("{}[{}].wrap", field, i),
                        message: "wrap width must be at least 1".to_string(),
                    }
                    .into());
                }
                _ => {}
            }
        }
    }

    for (field, flags) in [
        ("minor_flags", &config.minor_flags),
        ("breaking_flags", &config.breaking_flags),
        ("co_author_trailers", &config.co_author_trailers),
    ] {
        if let Some(i) = flags.iter().position(|f| f.trim().is_empty()) {
            return Err(ConfigError::InvalidValue {
                field: format!("{}[{}]", field, i),
                message: "value cannot be empty".to_string(),
            }
            .into());
        }
    }

    Ok(())
}

fn validate_output(config: &Config) -> Result<()> {
    if config.output_engine.trim().is_empty() {
        return Err(ConfigError::InvalidValue {
            field: "output_engine".to_string(),
            message: "output engine cannot be empty".to_string(),
        }
        .into());
    }

    if config.unreleased_label.trim().is_empty() {
        return Err(ConfigError::InvalidValue {
            field: "unreleased_label".to_string(),
            message: "label cannot be empty".to_string(),
        }
        .into());
    }

    Ok(())
}

fn check_regex(field: &str, pattern: &str) -> Result<()> {
    Regex::new(pattern).map_err(|e| ConfigError::InvalidRegex {
        field: field.to_string(),
        pattern: pattern.to_string(),
        reason: e.to_string(),
    })?;
    Ok(())
}
