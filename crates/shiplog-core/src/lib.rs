//! Shiplog Core - shared foundation for changelog generation
//!
//! This crate provides the error taxonomy and the configuration system
//! (defaults, file loading, explicit override merging and validation) used
//! by the git backend, the changelog pipeline and the CLI.

pub mod config;
pub mod error;

pub use config::{Config, ConfigOverrides};
pub use error::{ChangelogError, ConfigError, GitError, Result, ShiplogError};
