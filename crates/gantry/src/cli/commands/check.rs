//! Check command

use clap::Args;
use tracing::info;

use super::context::{PatchSelection, ProjectContext};
use crate::cli::{output, Cli, OutputFormat};
use crate::exit_codes::{ExitError, PATCHES_PENDING, WARNINGS};

/// Fail if any native file still needs patching
#[derive(Debug, Args)]
pub struct CheckCommand {
    /// Ignore warnings, only fail on pending patches
    #[arg(long)]
    pub allow_warnings: bool,

    #[command(flatten)]
    pub selection: PatchSelection,
}

impl CheckCommand {
    /// Execute the check command
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        info!(allow_warnings = self.allow_warnings, "executing check command");
        let cwd = std::env::current_dir()?;
        let ctx = ProjectContext::load(&cwd, &self.selection)?;
        let report = ctx.run(true)?;

        match cli.format {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
            OutputFormat::Text => {
                if !cli.quiet {
                    output::print_report(&report);
                }
            }
        }

        let pending = report.modified_count();
        if pending > 0 {
            return Err(ExitError::new(
                PATCHES_PENDING,
                format!("{} file(s) need patching, run `gantry apply`", pending),
            )
            .into());
        }
        if !self.allow_warnings && !report.warnings.is_empty() {
            return Err(ExitError::new(
                WARNINGS,
                format!("{} file(s) could not be checked", report.warnings.len()),
            )
            .into());
        }

        Ok(())
    }
}
