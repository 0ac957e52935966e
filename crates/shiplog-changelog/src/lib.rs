//! Shiplog Changelog - Commit classification and version grouping
//!
//! This crate parses commits against a configurable taxonomy, partitions the
//! history into versions at release tags, groups each version by category and
//! renders the result through named output engines.

pub mod filter;
pub mod formatter;
pub mod generator;
pub mod grouper;
pub mod parser;
pub mod segment;
pub mod settings;
pub mod transform;
pub mod types;
pub mod warning;

pub use formatter::{ChangelogFormatter, FormatterRegistry, RenderOptions};
pub use generator::ChangelogGenerator;
pub use parser::{CommitParser, MessageParser};
pub use settings::Settings;
pub use types::{
    BodySection, ChangelogDocument, CommitFlag, CommitSummary, ParsedCommit, SectionEntry,
    VersionEntry, VersionSegment,
};
pub use warning::ChangelogWarning;
