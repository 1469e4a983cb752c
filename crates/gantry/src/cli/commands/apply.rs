//! Apply command

use clap::Args;
use tracing::info;

use super::context::{PatchSelection, ProjectContext};
use crate::cli::{output, Cli, OutputFormat};
use crate::exit_codes::{ExitError, WARNINGS};

/// Patch the native projects
#[derive(Debug, Args)]
pub struct ApplyCommand {
    /// Show what would change without writing files
    #[arg(long)]
    pub dry_run: bool,

    /// Fail if any warning was recorded
    #[arg(long)]
    pub strict: bool,

    #[command(flatten)]
    pub selection: PatchSelection,
}

impl ApplyCommand {
    /// Execute the apply command
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        info!(
            dry_run = self.dry_run,
            strict = self.strict,
            "executing apply command"
        );
        let cwd = std::env::current_dir()?;
        let ctx = ProjectContext::load(&cwd, &self.selection)?;

        if cli.verbose && cli.format == OutputFormat::Text {
            if let Some(ref path) = ctx.config_path {
                println!("{}", output::key_value("Config", &path.display().to_string()));
            }
            println!("{}", output::key_value("Root", &ctx.layout.root.display().to_string()));
            println!("{}", output::key_value("Plugins", &ctx.config.plugins.join(", ")));
            println!();
        }

        let report = ctx.run(self.dry_run)?;

        match cli.format {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
            OutputFormat::Text => {
                if !cli.quiet {
                    output::print_report(&report);
                }
            }
        }

        if self.strict && !report.warnings.is_empty() {
            return Err(ExitError::new(
                WARNINGS,
                format!("{} warning(s) recorded in strict mode", report.warnings.len()),
            )
            .into());
        }

        Ok(())
    }
}
