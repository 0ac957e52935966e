//! Init command

use std::path::{Path, PathBuf};

use clap::Args;
use console::style;
use dialoguer::{Confirm, Select};
use tracing::info;

use shiplog_core::config::{Config, DEFAULT_CONFIG_TEMPLATE, DEFAULT_CONFIG_TOML, DEFAULT_CONFIG_YAML};
use shiplog_git::GitRepo;

use crate::cli::{output, Cli};

/// Write a default configuration file
#[derive(Debug, Args)]
pub struct InitCommand {
    /// Force overwrite existing configuration
    #[arg(short, long)]
    pub force: bool,

    /// Use defaults without prompting
    #[arg(short = 'y', long)]
    pub yes: bool,

    /// Output file path
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Configuration file format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Toml,
    Yaml,
}

impl Format {
    fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()? {
            "toml" => Some(Self::Toml),
            "yaml" | "yml" => Some(Self::Yaml),
            _ => None,
        }
    }

    fn file_name(self) -> &'static str {
        match self {
            Self::Toml => DEFAULT_CONFIG_TOML,
            Self::Yaml => DEFAULT_CONFIG_YAML,
        }
    }

    fn render(self) -> anyhow::Result<String> {
        Ok(match self {
            Self::Toml => DEFAULT_CONFIG_TEMPLATE.to_string(),
            Self::Yaml => serde_yaml::to_string(&Config::default())?,
        })
    }
}

impl InitCommand {
    /// Execute the init command
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        info!(force = self.force, yes = self.yes, "executing init command");
        let cwd = std::env::current_dir()?;

        let format = match self.output.as_deref().and_then(Format::from_path) {
            Some(format) => format,
            None if self.yes => Format::Toml,
            None => {
                let formats = ["toml", "yaml"];
                let selection = Select::new()
                    .with_prompt("Configuration format")
                    .items(&formats)
                    .default(0)
                    .interact()?;
                if selection == 0 {
                    Format::Toml
                } else {
                    Format::Yaml
                }
            }
        };

        let config_path = match &self.output {
            Some(path) => path.clone(),
            None => target_dir(&cwd).join(format.file_name()),
        };

        if config_path.exists() && !self.force {
            if self.yes {
                anyhow::bail!(
                    "Configuration file already exists at {}. Use --force to overwrite.",
                    config_path.display()
                );
            }

            let overwrite = Confirm::new()
                .with_prompt(format!(
                    "Configuration file already exists at {}. Overwrite?",
                    config_path.display()
                ))
                .default(false)
                .interact()?;

            if !overwrite {
                if !cli.quiet {
                    eprintln!("{}", style("Aborted.").yellow());
                }
                return Ok(());
            }
        }

        std::fs::write(&config_path, format.render()?)?;

        if !cli.quiet {
            output::success(&format!(
                "Created configuration at {}",
                output::path_style().apply_to(config_path.display())
            ));
            output::info(&format!(
                "Run {} to preview the changelog",
                style("shiplog generate").cyan()
            ));
        }

        Ok(())
    }
}

/// The repository top level when inside a work tree, else `cwd`
fn target_dir(cwd: &Path) -> PathBuf {
    GitRepo::discover(cwd)
        .ok()
        .and_then(|repo| repo.toplevel().map(Path::to_path_buf))
        .unwrap_or_else(|| cwd.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use shiplog_core::config::load_config;
    use tempfile::TempDir;

    #[test]
    fn test_format_from_path() {
        assert_eq!(Format::from_path(Path::new("a.toml")), Some(Format::Toml));
        assert_eq!(Format::from_path(Path::new("a.yml")), Some(Format::Yaml));
        assert_eq!(Format::from_path(Path::new("a.json")), None);
        assert_eq!(Format::from_path(Path::new("noext")), None);
    }

    #[test]
    fn test_generated_files_load() {
        let temp = TempDir::new().unwrap();

        let toml_path = temp.path().join(Format::Toml.file_name());
        std::fs::write(&toml_path, Format::Toml.render().unwrap()).unwrap();
        let config = load_config(&toml_path).unwrap();
        assert_eq!(config.output_engine, "rest");
        assert_eq!(config.exclusion_regexps.len(), 2);

        let yaml_path = temp.path().join(Format::Yaml.file_name());
        std::fs::write(&yaml_path, Format::Yaml.render().unwrap()).unwrap();
        assert_eq!(load_config(&yaml_path).unwrap(), Config::default());
    }

    #[test]
    fn test_target_dir_outside_repo() {
        let temp = TempDir::new().unwrap();
        assert_eq!(target_dir(temp.path()), temp.path());
    }
}
