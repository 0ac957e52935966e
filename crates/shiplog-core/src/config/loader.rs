//! Configuration loading

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::{ConfigError, Result};

use super::defaults::{config_file_names, CONFIG_ENV_VAR};
use super::types::{Config, ConfigOverrides};
use super::validation::validate_config;

/// Places a configuration file may come from, in priority order.
///
/// Explicit sources (`explicit`, `env`, `git`) must point at an existing
/// file; the repository top level is only searched.
#[derive(Debug, Clone, Default)]
pub struct ConfigSources {
    /// Path given on the command line
    pub explicit: Option<PathBuf>,
    /// Path from the `SHIPLOG_CONFIG` environment variable
    pub env: Option<PathBuf>,
    /// Path from git configuration, already resolved against the work tree
    pub git: Option<PathBuf>,
    /// Repository top level searched for well-known file names
    pub toplevel: Option<PathBuf>,
}

impl ConfigSources {
    /// Build sources, reading the environment variable
    pub fn new(explicit: Option<PathBuf>, git: Option<PathBuf>, toplevel: Option<PathBuf>) -> Self {
        let env = std::env::var_os(CONFIG_ENV_VAR)
            .filter(|v| !v.is_empty())
            .map(PathBuf::from);
        Self {
            explicit,
            env,
            git,
            toplevel,
        }
    }
}

/// Parse the overrides contained in a configuration file body
pub fn parse_overrides(content: &str, path: &Path) -> Result<ConfigOverrides> {
    let is_yaml = path
        .extension()
        .is_some_and(|e| e == "yaml" || e == "yml");

    let overrides = if is_yaml {
        serde_yaml::from_str(content).map_err(ConfigError::YamlError)?
    } else {
        toml::from_str(content).map_err(ConfigError::TomlError)?
    };
    Ok(overrides)
}

/// Load configuration from a file, merged over the defaults
pub fn load_config(path: &Path) -> Result<Config> {
    info!(path = %path.display(), "loading config");

    if !path.is_file() {
        return Err(ConfigError::NotFound(path.to_path_buf()).into());
    }
    let content = std::fs::read_to_string(path).map_err(ConfigError::Io)?;
    let overrides = parse_overrides(&content, path)?;

    let config = Config::default().merge(overrides);
    validate_config(&config)?;
    debug!(path = %path.display(), "config loaded and validated");
    Ok(config)
}

/// Find a configuration file with a well-known name in `dir`
pub fn find_config(dir: &Path) -> Option<PathBuf> {
    debug!(dir = %dir.display(), "searching for config file");

    for name in config_file_names() {
        let config_path = dir.join(name);
        if config_path.is_file() {
            info!(path = %config_path.display(), "found config file");
            return Some(config_path);
        }
    }

    debug!("no config file found");
    None
}

/// Resolve which configuration file applies, if any
pub fn resolve_config_path(sources: &ConfigSources) -> Result<Option<PathBuf>> {
    let explicit = [&sources.explicit, &sources.env, &sources.git]
        .into_iter()
        .flatten()
        .next();

    if let Some(path) = explicit {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.clone()).into());
        }
        return Ok(Some(path.clone()));
    }

    Ok(sources.toplevel.as_deref().and_then(find_config))
}

/// Load the applicable configuration, or defaults when there is none
pub fn load_config_or_default(sources: &ConfigSources) -> Result<(Config, Option<PathBuf>)> {
    match resolve_config_path(sources)? {
        Some(path) => {
            let config = load_config(&path)?;
            Ok((config, Some(path)))
        }
        None => {
            info!("no config found, using defaults");
            let config = Config::default();
            validate_config(&config)?;
            Ok((config, None))
        }
    }
}
