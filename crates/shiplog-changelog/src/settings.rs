//! Configuration compiled for the pipeline

use regex::{Regex, RegexBuilder};
use tracing::debug;

use shiplog_core::config::{validate_config, Config, TextTransform};
use shiplog_core::error::{ConfigError, Result};

use crate::transform::CompiledTransform;

/// A category prefix rule with its pattern compiled
#[derive(Debug, Clone)]
pub struct CompiledRule {
    pub pattern: Regex,
    pub category: String,
}

/// Immutable, validated configuration with every pattern compiled once
#[derive(Debug, Clone)]
pub struct Settings {
    config: Config,
    pub(crate) tag_filter: Regex,
    pub(crate) category_rules: Vec<CompiledRule>,
    pub(crate) exclusions: Vec<Regex>,
    pub(crate) inclusions: Vec<Regex>,
    pub(crate) subject_transforms: Vec<CompiledTransform>,
    pub(crate) body_transforms: Vec<CompiledTransform>,
}

impl Settings {
    /// Validate and compile a configuration
    pub fn new(config: Config) -> Result<Self> {
        validate_config(&config)?;

        // Tag names must match from their first character
        let tag_filter = RegexBuilder::new(&format!("^(?:{})", config.tag_filter_regexp))
            .build()
            .map_err(|e| ConfigError::InvalidRegex {
                field: "tag_filter_regexp".to_string(),
                pattern: config.tag_filter_regexp.clone(),
                reason: e.to_string(),
            })?;

        let category_rules = config
            .category_patterns
            .iter()
            .enumerate()
            .map(|(i, rule)| {
                Ok(CompiledRule {
                    pattern: compile(&format!("category_patterns[{}].pattern", i), &rule.pattern, true)?,
                    category: rule.category.clone(),
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let exclusions = compile_all("exclusion_regexps", &config.exclusion_regexps)?;
        let inclusions = compile_all("inclusion_regexps", &config.inclusion_regexps)?;

        let subject_transforms = compile_transforms("subject_transforms", &config.subject_transforms)?;
        let body_transforms = compile_transforms("body_transforms", &config.body_transforms)?;

        debug!(
            rules = category_rules.len(),
            exclusions = exclusions.len(),
            inclusions = inclusions.len(),
            "compiled settings"
        );

        Ok(Self {
            config,
            tag_filter,
            category_rules,
            exclusions,
            inclusions,
            subject_transforms,
            body_transforms,
        })
    }

    /// The configuration these settings were compiled from
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Whether a tag name is a version boundary
    pub fn is_qualifying_tag(&self, name: &str) -> bool {
        self.tag_filter.is_match(name)
    }
}

fn compile(field: &str, pattern: &str, case_insensitive: bool) -> Result<Regex> {
    let regex = RegexBuilder::new(pattern)
        .case_insensitive(case_insensitive)
        .build()
        .map_err(|e| ConfigError::InvalidRegex {
            field: field.to_string(),
            pattern: pattern.to_string(),
            reason: e.to_string(),
        })?;
    Ok(regex)
}

fn compile_all(field: &str, patterns: &[String]) -> Result<Vec<Regex>> {
    patterns
        .iter()
        .enumerate()
        .map(|(i, p)| compile(&format!("{}[{}]", field, i), p, false))
        .collect()
}

fn compile_transforms(
    field: &str,
    transforms: &[TextTransform],
) -> Result<Vec<CompiledTransform>> {
    transforms
        .iter()
        .enumerate()
        .map(|(i, t)| CompiledTransform::compile(t, &format!("{}[{}]", field, i)))
        .collect()
}
