//! Project loading shared by the patching commands

use std::path::{Path, PathBuf};

use clap::Args;
use tracing::info;

use gantry_core::config::{config_root, load_config_or_default, Config};
use gantry_core::Platform;
use gantry_patch::{OrchestratorConfig, PatchOrchestrator, PatchReport, PluginRegistry, ProjectLayout};

/// Which plugins, platforms and package a pass uses
#[derive(Debug, Clone, Default, Args)]
pub struct PatchSelection {
    /// Only patch this platform (repeatable)
    #[arg(short, long = "platform", value_name = "PLATFORM")]
    pub platforms: Vec<Platform>,

    /// Android package, overrides the config and app.json
    #[arg(long, value_name = "ID")]
    pub package: Option<String>,

    /// Plugin to apply (repeatable), overrides the config
    #[arg(long = "plugin", value_name = "ID")]
    pub plugins: Vec<String>,
}

impl PatchSelection {
    /// Fold command-line overrides into the loaded config
    pub fn apply_to(&self, config: &mut Config) {
        if let Some(ref package) = self.package {
            config.android.package = Some(package.clone());
        }
        if !self.plugins.is_empty() {
            config.plugins = self.plugins.clone();
        }
    }

    /// Platforms to patch: the flags when given, else the enabled ones
    pub fn platforms_for(&self, config: &Config) -> Vec<Platform> {
        if self.platforms.is_empty() {
            config.enabled_platforms()
        } else {
            self.platforms.clone()
        }
    }
}

/// Loaded config plus the project it points at
#[derive(Debug)]
pub struct ProjectContext {
    pub config: Config,
    pub config_path: Option<PathBuf>,
    pub layout: ProjectLayout,
    pub platforms: Vec<Platform>,
}

impl ProjectContext {
    /// Load config from `cwd` (or its parents) and resolve the layout
    pub fn load(cwd: &Path, selection: &PatchSelection) -> anyhow::Result<Self> {
        let (mut config, config_path) = load_config_or_default(cwd)?;
        selection.apply_to(&mut config);

        let root = config_path
            .as_deref()
            .and_then(config_root)
            .unwrap_or_else(|| cwd.to_path_buf());
        let layout = ProjectLayout::resolve(&root, &config)?;
        let platforms = selection.platforms_for(&config);

        info!(
            root = %root.display(),
            config = ?config_path,
            plugins = ?config.plugins,
            platforms = ?platforms,
            "loaded project"
        );

        Ok(Self {
            config,
            config_path,
            layout,
            platforms,
        })
    }

    /// Run every configured plugin against the project
    pub fn run(&self, dry_run: bool) -> anyhow::Result<PatchReport> {
        let orchestrator =
            PatchOrchestrator::from_registry(&PluginRegistry::with_builtins(), &self.config.plugins)?
                .with_config(
                    OrchestratorConfig::new()
                        .with_dry_run(dry_run)
                        .with_platforms(self.platforms.clone()),
                );

        let rt = tokio::runtime::Runtime::new()?;
        Ok(rt.block_on(orchestrator.run(&self.layout)))
    }
}
