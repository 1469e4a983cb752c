//! Patch orchestration
//!
//! Runs every plugin edit against the project: read the target, transform,
//! write it back. A failing file becomes a warning tagged with the plugin's
//! component and the file's platform, and the pass moves on. The Android and
//! iOS passes touch disjoint files and run concurrently.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use gantry_core::Platform;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use crate::error::{PatchError, Result};
use crate::plugin::{ConfigPlugin, FileEdit, PatchTarget, PluginRegistry};
use crate::project::{ProjectFile, ProjectLayout};
use crate::warnings::WarningSink;

/// Configuration for a patch pass
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrchestratorConfig {
    /// Transform but never write
    pub dry_run: bool,

    /// Platforms to patch
    pub platforms: Vec<Platform>,
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            dry_run: false,
            platforms: Platform::all().to_vec(),
        }
    }
}

impl OrchestratorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn with_platforms(mut self, platforms: Vec<Platform>) -> Self {
        self.platforms = platforms;
        self
    }
}

/// What happened to one target file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileStatus {
    /// Patched (or would be, in a dry run)
    Modified,
    /// Already patched
    Unchanged,
    /// Not patched, see the warnings
    Skipped,
}

/// Outcome of one plugin edit
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileOutcome {
    pub plugin: String,
    pub target: PatchTarget,
    pub platform: Platform,
    /// Resolved path, absent when it could not be determined
    pub path: Option<PathBuf>,
    pub status: FileStatus,
}

/// Result of a full pass
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PatchReport {
    pub dry_run: bool,
    pub files: Vec<FileOutcome>,
    pub warnings: WarningSink,
}

impl PatchReport {
    /// Files that were (or would be) changed
    pub fn modified(&self) -> impl Iterator<Item = &FileOutcome> {
        self.files.iter().filter(|f| f.status == FileStatus::Modified)
    }

    /// Number of files that were (or would be) changed
    pub fn modified_count(&self) -> usize {
        self.modified().count()
    }

    /// Whether every file was already patched and nothing went wrong
    pub fn is_up_to_date(&self) -> bool {
        self.modified_count() == 0 && self.warnings.is_empty()
    }
}

/// Applies config plugins to a native project
pub struct PatchOrchestrator {
    plugins: Vec<Arc<dyn ConfigPlugin>>,
    config: OrchestratorConfig,
}

impl PatchOrchestrator {
    /// Orchestrator running `plugins` in order
    pub fn new(plugins: Vec<Arc<dyn ConfigPlugin>>) -> Self {
        Self {
            plugins,
            config: OrchestratorConfig::default(),
        }
    }

    /// Orchestrator for the plugin ids, looked up in `registry`
    pub fn from_registry<S: AsRef<str>>(registry: &PluginRegistry, ids: &[S]) -> Result<Self> {
        Ok(Self::new(registry.resolve(ids)?))
    }

    /// Set configuration
    pub fn with_config(mut self, config: OrchestratorConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &OrchestratorConfig {
        &self.config
    }

    /// Run every edit of every plugin against the project
    #[instrument(skip_all, fields(root = %layout.root.display(), dry_run = self.config.dry_run))]
    pub async fn run(&self, layout: &ProjectLayout) -> PatchReport {
        info!(plugins = self.plugins.len(), "starting patch pass");

        let (android, ios) = tokio::join!(
            self.run_platform(layout, Platform::Android),
            self.run_platform(layout, Platform::Ios),
        );

        let mut report = PatchReport {
            dry_run: self.config.dry_run,
            ..Default::default()
        };
        for (files, warnings) in [android, ios] {
            report.files.extend(files);
            report.warnings.merge(warnings);
        }

        info!(
            modified = report.modified_count(),
            warnings = report.warnings.len(),
            "patch pass complete"
        );
        report
    }

    async fn run_platform(
        &self,
        layout: &ProjectLayout,
        platform: Platform,
    ) -> (Vec<FileOutcome>, WarningSink) {
        let mut files = Vec::new();
        let mut sink = WarningSink::new();

        if !self.config.platforms.contains(&platform) {
            debug!(%platform, "platform not selected, skipping");
            return (files, sink);
        }

        for plugin in &self.plugins {
            for edit in plugin.edits() {
                if edit.target.platform() != platform {
                    continue;
                }
                files.push(self.apply_edit(layout, plugin.as_ref(), edit, &mut sink).await);
            }
        }

        (files, sink)
    }

    async fn apply_edit(
        &self,
        layout: &ProjectLayout,
        plugin: &dyn ConfigPlugin,
        edit: FileEdit,
        sink: &mut WarningSink,
    ) -> FileOutcome {
        let platform = edit.target.platform();
        let mut outcome = FileOutcome {
            plugin: plugin.id().to_string(),
            target: edit.target,
            platform,
            path: None,
            status: FileStatus::Skipped,
        };

        let path = match layout.resolve_path(edit.target).await {
            Ok(path) => path,
            Err(e) => {
                sink.add(platform, plugin.component(), warning_message(edit.target, &e));
                return outcome;
            }
        };

        match self.edit_file(&path, platform, edit).await {
            Ok(true) => outcome.status = FileStatus::Modified,
            Ok(false) => outcome.status = FileStatus::Unchanged,
            Err(e) => sink.add(platform, plugin.component(), warning_message(edit.target, &e)),
        }
        debug!(patch_target = %edit.target, path = %path.display(), status = ?outcome.status, "edit finished");
        outcome.path = Some(path);
        outcome
    }

    /// Read, transform and (unless dry-running) write one file. Returns
    /// whether the text changed.
    async fn edit_file(&self, path: &Path, platform: Platform, edit: FileEdit) -> Result<bool> {
        let mut file = ProjectFile::read(path, platform).await?;
        let patched = (edit.transform)(&file)?;
        file.set_contents(patched);

        if !file.is_modified() {
            return Ok(false);
        }
        if self.config.dry_run {
            info!(path = %path.display(), "dry run, would patch");
            return Ok(true);
        }
        file.save().await
    }
}

fn warning_message(target: PatchTarget, err: &PatchError) -> String {
    match err {
        PatchError::UnsupportedLanguage { path, expected, found } => {
            debug!(path = %path.display(), language = %found, "unsupported source language");
            format!(
                "Cannot automatically configure {} if it's not {}",
                target,
                expected.to_string().to_lowercase()
            )
        }
        _ => format!("Couldn't modify {} - {}.", target, err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plugins::dev_launcher::{ANDROID_INIT, POD_IMPORT};
    use tempfile::TempDir;

    const ACTIVITY: &str = "package com.example.app;\n\npublic class MainActivity extends ReactActivity {\n    @Override\n    protected ReactActivityDelegate createReactActivityDelegate() {\n        return new ReactActivityDelegate(this, getMainComponentName()) {\n        };\n    }\n}\n";

    const APPLICATION: &str = "package com.example.app;\n\npublic class MainApplication extends Application {\n  @Override\n  public void onCreate() {\n    super.onCreate();\n  }\n}\n";

    const PODFILE: &str = "platform :ios, '10.0'\n\ntarget 'example' do\n  use_react_native!(:path => '../node_modules/react-native')\nend\n";

    fn package_dir(root: &Path) -> PathBuf {
        root.join("android/app/src/main/java/com/example/app")
    }

    fn scaffold(root: &Path) -> ProjectLayout {
        let dir = package_dir(root);
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("MainActivity.java"), ACTIVITY).unwrap();
        std::fs::write(dir.join("MainApplication.java"), APPLICATION).unwrap();
        std::fs::create_dir_all(root.join("ios")).unwrap();
        std::fs::write(root.join("ios/Podfile"), PODFILE).unwrap();
        ProjectLayout::new(root).with_package("com.example.app")
    }

    fn orchestrator() -> PatchOrchestrator {
        PatchOrchestrator::from_registry(&PluginRegistry::with_builtins(), &["dev-launcher"]).unwrap()
    }

    #[tokio::test]
    async fn test_full_pass_patches_every_file() {
        let temp = TempDir::new().unwrap();
        let layout = scaffold(temp.path());

        let report = orchestrator().run(&layout).await;

        assert!(report.warnings.is_empty(), "{:?}", report.warnings);
        assert_eq!(report.modified_count(), 3);

        let activity = std::fs::read_to_string(package_dir(temp.path()).join("MainActivity.java")).unwrap();
        assert!(activity.contains(
            "        return DevLauncherController.wrapReactActivityDelegate(this, () -> new ReactActivityDelegate(this, getMainComponentName()) {\n        });\n    }\n}\n"
        ));
        assert!(activity.contains("public void onNewIntent(Intent intent)"));

        let application =
            std::fs::read_to_string(package_dir(temp.path()).join("MainApplication.java")).unwrap();
        assert!(application.contains(ANDROID_INIT));

        let podfile = std::fs::read_to_string(temp.path().join("ios/Podfile")).unwrap();
        assert!(podfile.starts_with("platform :ios, '11.0'"));
        assert!(podfile.contains(POD_IMPORT));
    }

    #[tokio::test]
    async fn test_second_pass_is_noop() {
        let temp = TempDir::new().unwrap();
        let layout = scaffold(temp.path());
        let orchestrator = orchestrator();

        orchestrator.run(&layout).await;
        let podfile = std::fs::read_to_string(temp.path().join("ios/Podfile")).unwrap();

        let report = orchestrator.run(&layout).await;
        assert!(report.is_up_to_date());
        assert!(report.files.iter().all(|f| f.status == FileStatus::Unchanged));
        assert_eq!(std::fs::read_to_string(temp.path().join("ios/Podfile")).unwrap(), podfile);
    }

    #[tokio::test]
    async fn test_missing_activity_only_warns_for_android() {
        let temp = TempDir::new().unwrap();
        let layout = scaffold(temp.path());
        std::fs::remove_file(package_dir(temp.path()).join("MainActivity.java")).unwrap();

        let report = orchestrator().run(&layout).await;

        assert_eq!(report.warnings.len(), 1);
        let warning = report.warnings.iter().next().unwrap();
        assert_eq!(warning.platform, Platform::Android);
        assert_eq!(warning.component, "expo-dev-launcher");
        assert!(warning.message.starts_with("Couldn't modify MainActivity - file not found"));

        let podfile = std::fs::read_to_string(temp.path().join("ios/Podfile")).unwrap();
        assert!(podfile.contains(POD_IMPORT));
        let application =
            std::fs::read_to_string(package_dir(temp.path()).join("MainApplication.java")).unwrap();
        assert!(application.contains(ANDROID_INIT));
    }

    #[tokio::test]
    async fn test_kotlin_activity_is_skipped_with_warning() {
        let temp = TempDir::new().unwrap();
        let layout = scaffold(temp.path());
        let dir = package_dir(temp.path());
        std::fs::remove_file(dir.join("MainActivity.java")).unwrap();
        let kotlin = "package com.example.app\n\nclass MainActivity : ReactActivity()\n";
        std::fs::write(dir.join("MainActivity.kt"), kotlin).unwrap();

        let report = orchestrator().run(&layout).await;

        let messages: Vec<_> = report.warnings.iter().map(|w| w.message.clone()).collect();
        assert_eq!(
            messages,
            vec!["Cannot automatically configure MainActivity if it's not java".to_string()]
        );
        assert_eq!(std::fs::read_to_string(dir.join("MainActivity.kt")).unwrap(), kotlin);
    }

    #[tokio::test]
    async fn test_dry_run_writes_nothing() {
        let temp = TempDir::new().unwrap();
        let layout = scaffold(temp.path());

        let report = orchestrator()
            .with_config(OrchestratorConfig::new().with_dry_run(true))
            .run(&layout)
            .await;

        assert!(report.dry_run);
        assert_eq!(report.modified_count(), 3);
        assert_eq!(std::fs::read_to_string(temp.path().join("ios/Podfile")).unwrap(), PODFILE);
    }

    #[tokio::test]
    async fn test_platform_filter() {
        let temp = TempDir::new().unwrap();
        let layout = scaffold(temp.path());

        let report = orchestrator()
            .with_config(OrchestratorConfig::new().with_platforms(vec![Platform::Ios]))
            .run(&layout)
            .await;

        assert_eq!(report.files.len(), 1);
        assert_eq!(report.files[0].target, PatchTarget::Podfile);
        let activity = std::fs::read_to_string(package_dir(temp.path()).join("MainActivity.java")).unwrap();
        assert_eq!(activity, ACTIVITY);
    }

    #[tokio::test]
    async fn test_unresolved_package_warns_per_android_file() {
        let temp = TempDir::new().unwrap();
        std::fs::create_dir_all(temp.path().join("ios")).unwrap();
        std::fs::write(temp.path().join("ios/Podfile"), PODFILE).unwrap();
        let layout = ProjectLayout::new(temp.path());

        let report = orchestrator().run(&layout).await;

        assert_eq!(report.warnings.for_platform(Platform::Android).count(), 2);
        assert_eq!(report.warnings.for_platform(Platform::Ios).count(), 0);
        assert!(report.files.iter().filter(|f| f.path.is_none()).all(|f| f.status == FileStatus::Skipped));
    }

    #[tokio::test]
    async fn test_report_serializes() {
        let temp = TempDir::new().unwrap();
        let layout = scaffold(temp.path());
        let report = orchestrator()
            .with_config(OrchestratorConfig::new().with_dry_run(true))
            .run(&layout)
            .await;

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["files"][0]["target"], "main-activity");
        assert_eq!(json["files"][0]["status"], "modified");
        assert!(json["warnings"].as_array().unwrap().is_empty());
    }
}
