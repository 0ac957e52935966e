//! Author attribution

use regex::Regex;
use std::sync::LazyLock;

use shiplog_core::config::AuthorOrder;

/// Regex for `Name <email>` identities
static IDENTITY_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<name>[^<]+)<(?P<email>[^>]*)>\s*$").expect("Invalid regex")
});

/// Ordered, deduplicated set of author display names
#[derive(Debug, Clone, Default)]
pub struct AuthorList {
    entries: Vec<AuthorEntry>,
}

#[derive(Debug, Clone)]
struct AuthorEntry {
    name: String,
    name_key: String,
    email_key: Option<String>,
}

impl AuthorList {
    /// Create an empty list
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an identity (`Name <email>` or a bare name) unless already present.
    ///
    /// Returns whether it was added.
    pub fn push(&mut self, identity: &str) -> bool {
        let (name, email) = split_identity(identity);
        if name.is_empty() {
            return false;
        }

        let name_key = name.to_lowercase();
        let email_key = email.map(str::to_lowercase);

        let duplicate = self.entries.iter().any(|e| {
            e.name_key == name_key
                || matches!((&e.email_key, &email_key), (Some(a), Some(b)) if a == b)
        });
        if duplicate {
            return false;
        }

        self.entries.push(AuthorEntry {
            name: name.to_string(),
            name_key,
            email_key,
        });
        true
    }

    /// Whether the list is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Display names in the requested order
    pub fn into_names(self, order: AuthorOrder) -> Vec<String> {
        let mut names: Vec<String> = self.entries.into_iter().map(|e| e.name).collect();
        if order == AuthorOrder::Alphabetical {
            names.sort_by_key(|n| n.to_lowercase());
        }
        names
    }
}

fn split_identity(identity: &str) -> (&str, Option<&str>) {
    match IDENTITY_REGEX.captures(identity.trim()) {
        Some(caps) => {
            let name = caps.name("name").map_or("", |m| m.as_str().trim());
            let email = caps
                .name("email")
                .map(|m| m.as_str().trim())
                .filter(|e| !e.is_empty());
            (name, email)
        }
        None => (identity.trim(), None),
    }
}

/// Merge display names into `into`, skipping case-insensitive duplicates
pub fn union_names(into: &mut Vec<String>, names: &[String]) {
    for name in names {
        if !into.iter().any(|n| n.eq_ignore_ascii_case(name)) {
            into.push(name.clone());
        }
    }
}
