//! Shiplog Git - Commit history access for changelog generation
//!
//! This crate reads commits and tags from a git repository and exposes them
//! through the [`History`] trait, with an in-memory implementation for tests.

mod commits;
mod history;
mod repository;
mod tags;
pub mod types;

pub use history::{History, MemoryHistory};
pub use repository::{GitRepo, Result};
pub use types::{RawCommit, RevisionRange, TagInfo};
