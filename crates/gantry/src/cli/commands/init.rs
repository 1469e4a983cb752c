//! Init command

use std::path::{Path, PathBuf};

use clap::Args;
use console::style;
use dialoguer::{Confirm, Select};
use tracing::info;

use gantry_core::config::{
    DEFAULT_CONFIG_TEMPLATE, DEFAULT_CONFIG_TOML_TEMPLATE, DEFAULT_CONFIG_YAML,
};

use crate::cli::Cli;

/// Initialize a new Gantry configuration
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

impl InitCommand {
    /// Execute the init command
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        info!(force = self.force, yes = self.yes, "executing init command");
        let cwd = std::env::current_dir()?;
        let config_path = self
            .output
            .clone()
            .unwrap_or_else(|| cwd.join(DEFAULT_CONFIG_YAML));

        // Check if config already exists
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
                println!("{}", style("Aborted.").yellow());
                return Ok(());
            }
        }

        // An explicit .toml output decides the format
        let format = if is_toml(&config_path) {
            ConfigFormat::Toml
        } else if self.yes || self.output.is_some() {
            ConfigFormat::Yaml
        } else {
            let formats = ["yaml", "toml"];
            let selection = Select::new()
                .with_prompt("Configuration format")
                .items(&formats)
                .default(0)
                .interact()?;
            if selection == 1 {
                ConfigFormat::Toml
            } else {
                ConfigFormat::Yaml
            }
        };

        let config_path = target_path(config_path, format);
        if let Some(parent) = config_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(&config_path, format.template())?;

        if !cli.quiet {
            println!(
                "{} Created configuration at {}",
                style("✓").green().bold(),
                style(config_path.display()).cyan()
            );
            println!();
            println!("Next steps:");
            println!("  1. Edit {} to set your Android package and plugins", config_path.display());
            println!("  2. Run {} to verify your setup", style("gantry validate").cyan());
            println!("  3. Run {} to patch the native projects", style("gantry apply").cyan());
        }

        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ConfigFormat {
    Yaml,
    Toml,
}

impl ConfigFormat {
    fn template(self) -> &'static str {
        match self {
            Self::Yaml => DEFAULT_CONFIG_TEMPLATE,
            Self::Toml => DEFAULT_CONFIG_TOML_TEMPLATE,
        }
    }
}

fn is_toml(path: &Path) -> bool {
    path.extension().is_some_and(|e| e == "toml")
}

/// Adjust the extension of a default `.yaml` path for TOML output
fn target_path(path: PathBuf, format: ConfigFormat) -> PathBuf {
    if format == ConfigFormat::Toml && path.extension().is_some_and(|e| e == "yaml") {
        path.with_extension("toml")
    } else {
        path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_path() {
        assert_eq!(
            target_path(PathBuf::from("gantry.yaml"), ConfigFormat::Toml),
            PathBuf::from("gantry.toml")
        );
        assert_eq!(
            target_path(PathBuf::from("gantry.yaml"), ConfigFormat::Yaml),
            PathBuf::from("gantry.yaml")
        );
        assert!(is_toml(Path::new("conf/gantry.toml")));
    }
}
