//! Validate command

use std::path::PathBuf;

use clap::Args;
use console::style;
use serde::Serialize;
use tracing::info;

use gantry_core::config::{config_root, load_config_from_dir};
use gantry_patch::{PatchTarget, PluginRegistry, ProjectLayout};

use crate::cli::{output, Cli, OutputFormat};
use crate::exit_codes::{ExitError, CONFIG_ERROR};

/// Validate configuration and show resolved paths
#[derive(Debug, Args)]
pub struct ValidateCommand {
    /// Only validate configuration file
    #[arg(long)]
    pub config_only: bool,

    /// Strict mode - treat warnings as errors
    #[arg(long)]
    pub strict: bool,
}

/// A patch target and where it resolved to
#[derive(Debug, Serialize)]
struct ResolvedTarget {
    plugin: String,
    target: PatchTarget,
    path: Option<PathBuf>,
    exists: bool,
}

impl ValidateCommand {
    /// Execute the validate command
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        info!(
            config_only = self.config_only,
            strict = self.strict,
            "executing validate command"
        );
        let cwd = std::env::current_dir()?;

        let mut errors: Vec<String> = Vec::new();
        let mut warnings: Vec<String> = Vec::new();
        let mut targets: Vec<ResolvedTarget> = Vec::new();

        // Validate configuration (load_config validates after parsing)
        let (config, config_path) = match load_config_from_dir(&cwd) {
            Ok((c, p)) => (Some(c), Some(p)),
            Err(e) => {
                errors.push(format!("Configuration: {}", e));
                (None, None)
            }
        };

        if let Some(ref cfg) = config {
            let registry = PluginRegistry::with_builtins();
            let plugins = match registry.resolve(&cfg.plugins) {
                Ok(plugins) => plugins,
                Err(e) => {
                    errors.push(format!("Plugins: {}", e));
                    Vec::new()
                }
            };

            if !self.config_only {
                let root = config_path
                    .as_deref()
                    .and_then(config_root)
                    .unwrap_or_else(|| cwd.clone());

                match ProjectLayout::resolve(&root, cfg) {
                    Ok(layout) => {
                        let enabled = cfg.enabled_platforms();
                        for plugin in &plugins {
                            for edit in plugin.edits() {
                                if !enabled.contains(&edit.target.platform()) {
                                    continue;
                                }
                                let resolved = match layout.path_for(edit.target) {
                                    Ok(path) => {
                                        if !path.exists() {
                                            warnings.push(format!(
                                                "{} not found at {}",
                                                edit.target,
                                                path.display()
                                            ));
                                        }
                                        ResolvedTarget {
                                            plugin: plugin.id().to_string(),
                                            target: edit.target,
                                            exists: path.exists(),
                                            path: Some(path),
                                        }
                                    }
                                    Err(e) => {
                                        warnings.push(format!("{}: {}", edit.target, e));
                                        ResolvedTarget {
                                            plugin: plugin.id().to_string(),
                                            target: edit.target,
                                            path: None,
                                            exists: false,
                                        }
                                    }
                                };
                                targets.push(resolved);
                            }
                        }
                    }
                    Err(e) => errors.push(format!("Project layout: {}", e)),
                }
            }
        }

        // If strict, promote warnings to errors
        if self.strict {
            errors.append(&mut warnings);
        }

        // Output
        let passed = errors.is_empty();

        match cli.format {
            OutputFormat::Json => {
                let output = serde_json::json!({
                    "valid": passed,
                    "config_path": config_path.as_ref().map(|p| p.to_string_lossy().to_string()),
                    "targets": targets,
                    "errors": errors,
                    "warnings": warnings
                });
                println!("{}", serde_json::to_string_pretty(&output)?);
            }
            OutputFormat::Text => {
                if !cli.quiet {
                    println!("{}", output::header("Validation Results"));
                    println!();

                    if let Some(ref path) = config_path {
                        println!("Config: {}", output::path_style().apply_to(path.display()));
                        println!();
                    }

                    if !targets.is_empty() {
                        println!("{}", style("Targets:").bold());
                        for t in &targets {
                            let location = t
                                .path
                                .as_ref()
                                .map(|p| p.display().to_string())
                                .unwrap_or_else(|| "<unresolved>".to_string());
                            println!(
                                "{}",
                                output::key_value(&format!("{} ({})", t.target, t.plugin), &location)
                            );
                        }
                        println!();
                    }

                    if !errors.is_empty() {
                        println!("{}", style("Errors:").red().bold());
                        for error in &errors {
                            println!("  {} {}", style("✗").red(), error);
                        }
                        println!();
                    }

                    if !warnings.is_empty() {
                        println!("{}", style("Warnings:").yellow().bold());
                        for warning in &warnings {
                            println!("  {} {}", style("!").yellow(), warning);
                        }
                        println!();
                    }

                    if passed {
                        if warnings.is_empty() {
                            println!("{}", style("✓ All checks passed").green().bold());
                        } else {
                            println!(
                                "{} with {} warning(s)",
                                style("✓ Validation passed").green().bold(),
                                warnings.len()
                            );
                        }
                    } else {
                        println!(
                            "{} with {} error(s)",
                            style("✗ Validation failed").red().bold(),
                            errors.len()
                        );
                    }
                }
            }
        }

        if !passed {
            return Err(ExitError::new(
                CONFIG_ERROR,
                format!("validation failed with {} error(s)", errors.len()),
            )
            .into());
        }

        Ok(())
    }
}
