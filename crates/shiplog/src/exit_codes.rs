//! Exit codes for the CLI

use shiplog_core::error::{ConfigError, GitError, ShiplogError};

/// Success
pub const SUCCESS: i32 = 0;

/// General error
pub const ERROR: i32 = 1;

/// Configuration error
pub const CONFIG_ERROR: i32 = 2;

/// Git error
pub const GIT_ERROR: i32 = 3;

/// Rendering or output error
pub const RENDER_ERROR: i32 = 4;

/// Map an error to the exit code reported for it
pub fn exit_code_for(err: &anyhow::Error) -> i32 {
    if let Some(err) = err.downcast_ref::<ShiplogError>() {
        if err.is_config() {
            return CONFIG_ERROR;
        }
        if err.is_git() {
            return GIT_ERROR;
        }
        if err.is_render() {
            return RENDER_ERROR;
        }
        return ERROR;
    }
    if err.downcast_ref::<GitError>().is_some() {
        return GIT_ERROR;
    }
    if err.downcast_ref::<ConfigError>().is_some() {
        return CONFIG_ERROR;
    }
    ERROR
}
