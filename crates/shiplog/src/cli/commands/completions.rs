//! Shell completion scripts

use std::io::Write;
use std::path::PathBuf;

use clap::{Args, CommandFactory};
use clap_complete::Shell;

use crate::cli::{output, Cli};

/// Print a completion script for `shiplog`
#[derive(Debug, Args)]
pub struct CompletionsCommand {
    #[arg(value_enum)]
    pub shell: Shell,

    /// Write the script here instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

impl CompletionsCommand {
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        let mut script = Vec::new();
        clap_complete::generate(self.shell, &mut Cli::command(), "shiplog", &mut script);

        match &self.output {
            Some(path) => {
                std::fs::write(path, &script)?;
                if !cli.quiet {
                    output::success(&format!("Wrote {} completions to {}", self.shell, path.display()));
                }
            }
            None => std::io::stdout().write_all(&script)?,
        }
        Ok(())
    }
}
