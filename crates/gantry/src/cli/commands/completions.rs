//! Shell completion scripts

use std::io::Write;
use std::path::PathBuf;

use clap::{Args, CommandFactory};
use clap_complete::Shell;
use tracing::info;

use crate::cli::{output, Cli};

/// Print or save a completion script for the `gantry` binary
#[derive(Debug, Args)]
pub struct CompletionsCommand {
    #[arg(value_enum)]
    pub shell: Shell,

    /// Write the script to this file
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

impl CompletionsCommand {
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        info!(shell = %self.shell, output = ?self.output, "executing completions command");
        let script = completion_script(self.shell);

        let Some(ref path) = self.output else {
            std::io::stdout().write_all(&script)?;
            return Ok(());
        };
        std::fs::write(path, &script)?;
        if !cli.quiet {
            output::success(&format!("Wrote {} completions to {}", self.shell, path.display()));
        }
        Ok(())
    }
}

fn completion_script(shell: Shell) -> Vec<u8> {
    let mut cmd = Cli::command();
    let bin = cmd.get_name().to_string();
    let mut script = Vec::new();
    clap_complete::generate(shell, &mut cmd, bin, &mut script);
    script
}
