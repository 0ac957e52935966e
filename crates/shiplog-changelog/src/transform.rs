//! Text transforms for subjects and body paragraphs

use regex::Regex;

use shiplog_core::config::TextTransform;
use shiplog_core::error::{ConfigError, Result};

/// A text transform with its pattern compiled
#[derive(Debug, Clone)]
pub enum CompiledTransform {
    Strip,
    Ucfirst,
    FinalDot,
    Replace { pattern: Regex, with: String },
    SetIfEmpty(String),
    Wrap(usize),
}

impl CompiledTransform {
    /// Compile a configured transform; `field` names it in errors
    pub fn compile(transform: &TextTransform, field: &str) -> Result<Self> {
        Ok(match transform {
            TextTransform::Strip => Self::Strip,
            TextTransform::Ucfirst => Self::Ucfirst,
            TextTransform::FinalDot => Self::FinalDot,
            TextTransform::Replace { pattern, with } => Self::Replace {
                pattern: Regex::new(pattern).map_err(|e| ConfigError::InvalidRegex {
                    field: field.to_string(),
                    pattern: pattern.clone(),
                    reason: e.to_string(),
                })?,
                with: with.clone(),
            },
            TextTransform::SetIfEmpty(text) => Self::SetIfEmpty(text.clone()),
            TextTransform::Wrap(width) => Self::Wrap(*width),
        })
    }

    /// Apply to a text
    pub fn apply(&self, text: &str) -> String {
        match self {
            Self::Strip => text.trim().to_string(),
            Self::Ucfirst => {
                let mut chars = text.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().chain(chars).collect(),
                    None => String::new(),
                }
            }
            Self::FinalDot => match text.chars().last() {
                Some(c) if c.is_alphanumeric() => format!("{}.", text),
                _ => text.to_string(),
            },
            Self::Replace { pattern, with } => pattern.replace_all(text, with.as_str()).into_owned(),
            Self::SetIfEmpty(replacement) => {
                if text.trim().is_empty() {
                    replacement.clone()
                } else {
                    text.to_string()
                }
            }
            Self::Wrap(width) => {
                let unwrapped = text.split_whitespace().collect::<Vec<_>>().join(" ");
                textwrap::fill(&unwrapped, (*width).max(1))
            }
        }
    }
}

/// Apply transforms in order
pub fn apply_all(transforms: &[CompiledTransform], text: &str) -> String {
    transforms
        .iter()
        .fold(text.to_string(), |acc, t| t.apply(&acc))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn compile(transform: TextTransform) -> CompiledTransform {
        CompiledTransform::compile(&transform, "subject_transforms[0]").unwrap()
    }

    #[test]
    fn test_simple_transforms() {
        assert_eq!(compile(TextTransform::Strip).apply("  x  "), "x");
        assert_eq!(compile(TextTransform::Ucfirst).apply("élan"), "Élan");
        assert_eq!(compile(TextTransform::Ucfirst).apply(""), "");
        assert_eq!(compile(TextTransform::FinalDot).apply("done"), "done.");
        assert_eq!(compile(TextTransform::FinalDot).apply("done!"), "done!");
        assert_eq!(
            compile(TextTransform::SetIfEmpty("No commit message.".to_string())).apply(" "),
            "No commit message."
        );
    }

    #[test]
    fn test_replace_with_groups() {
        let transform = compile(TextTransform::Replace {
            pattern: r"#(\d+)".to_string(),
            with: "issue $1".to_string(),
        });
        assert_eq!(transform.apply("closes #12"), "closes issue 12");
    }

    #[test]
    fn test_apply_all_in_order() {
        let transforms = vec![
            compile(TextTransform::Strip),
            compile(TextTransform::SetIfEmpty("No commit message.".to_string())),
            compile(TextTransform::Ucfirst),
            compile(TextTransform::FinalDot),
        ];
        assert_eq!(apply_all(&transforms, " add thing "), "Add thing.");
        assert_eq!(apply_all(&transforms, "   "), "No commit message.");
    }

    #[test]
    fn test_wrap_reflows_paragraph() {
        let transform = compile(TextTransform::Wrap(10));
        assert_eq!(transform.apply("one two\nthree four five"), "one two\nthree four\nfive");
        assert_eq!(transform.apply("short"), "short");
    }

    #[test]
    fn test_invalid_pattern() {
        let result = CompiledTransform::compile(
            &TextTransform::Replace {
                pattern: "(".to_string(),
                with: String::new(),
            },
            "subject_transforms[2]",
        );
        assert!(result.is_err());
    }
}
