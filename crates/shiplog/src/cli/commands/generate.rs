//! Generate command

use std::io::Write;
use std::path::{Path, PathBuf};

use clap::Args;
use tracing::{debug, info};

use shiplog_changelog::ChangelogGenerator;
use shiplog_core::config::{load_config_or_default, ConfigSources, GIT_CONFIG_KEY};
use shiplog_git::{GitRepo, RevisionRange};

use crate::cli::{output, Cli};

/// Generate the changelog for a revision range
#[derive(Debug, Args)]
pub struct GenerateCommand {
    /// Revisions to walk, as accepted by `git rev-list` (default: HEAD)
    #[arg(value_name = "REVLIST")]
    pub revlist: Vec<String>,

    /// Configuration file to use instead of the discovered one
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Output engine (rest, markdown, json)
    #[arg(short, long, value_name = "NAME")]
    pub engine: Option<String>,

    /// Write to a file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

impl GenerateCommand {
    /// Execute the generate command
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        info!(revlist = ?self.revlist, engine = ?self.engine, "executing generate command");
        let cwd = std::env::current_dir()?;
        let repo = GitRepo::discover(&cwd)?;

        let toplevel = repo.toplevel().map(Path::to_path_buf);
        let git_config = repo
            .config_string(GIT_CONFIG_KEY)?
            .map(|value| resolve_git_config_path(&value, toplevel.as_deref()));

        let sources = ConfigSources::new(self.config.clone(), git_config, toplevel);
        let (config, config_path) = load_config_or_default(&sources)?;
        match &config_path {
            Some(path) => debug!(path = %path.display(), "using config file"),
            None => debug!("using built-in defaults"),
        }

        let range = if self.revlist.is_empty() {
            RevisionRange::new(config.revs.iter().cloned())
        } else {
            RevisionRange::new(self.revlist.iter().cloned())
        };

        let generator = ChangelogGenerator::new(config)?;
        let rendered = generator.generate_formatted(
            &repo,
            &range,
            self.engine.as_deref(),
            &mut output::warning,
        )?;

        match &self.output {
            Some(path) => {
                std::fs::write(path, &rendered)?;
                if !cli.quiet {
                    output::success(&format!(
                        "Changelog written to {}",
                        output::path_style().apply_to(path.display())
                    ));
                }
            }
            None => {
                let mut stdout = std::io::stdout().lock();
                stdout.write_all(rendered.as_bytes())?;
                stdout.flush()?;
            }
        }

        Ok(())
    }
}

/// Resolve a path read from git configuration against the work tree
fn resolve_git_config_path(value: &str, toplevel: Option<&Path>) -> PathBuf {
    let path = PathBuf::from(value);
    match toplevel {
        Some(root) if path.is_relative() => root.join(path),
        _ => path,
    }
}
