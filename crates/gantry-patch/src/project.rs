//! Native project layout and file access
//!
//! [`ProjectLayout`] knows where the generated native files live for a given
//! project, and [`ProjectFile`] carries one file from read to write.

use std::path::{Path, PathBuf};

use gantry_core::config::Config;
use gantry_core::{is_valid_package_id, Platform};
use serde::Deserialize;
use tracing::{debug, info};

use crate::error::{PatchError, Result};
use crate::imports::SourceLanguage;
use crate::paths::{find_files, to_repo_path};
use crate::plugin::PatchTarget;

/// Where the Android and iOS projects of an app live
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectLayout {
    /// Project root (holds `app.json`)
    pub root: PathBuf,
    /// Android project directory
    pub android_root: PathBuf,
    /// iOS project directory
    pub ios_root: PathBuf,
    /// Reverse-domain Android package, when known
    pub android_package: Option<String>,
}

impl ProjectLayout {
    /// Layout with the conventional `android/` and `ios/` directories
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        Self {
            android_root: root.join("android"),
            ios_root: root.join("ios"),
            root,
            android_package: None,
        }
    }

    /// Set the Android package
    pub fn with_package(mut self, package: impl Into<String>) -> Self {
        self.android_package = Some(package.into());
        self
    }

    /// Resolve the layout for `root` from configuration.
    ///
    /// The Android package comes from the config, then from
    /// `expo.android.package` in the app config file. When neither has it,
    /// the package directory is discovered later from the source tree.
    pub fn resolve(root: &Path, config: &Config) -> Result<Self> {
        let package = match config.android.package.clone() {
            Some(package) => Some(package),
            None => read_app_config_package(&to_repo_path(root, &config.app_config)),
        };

        if let Some(ref package) = package {
            if !is_valid_package_id(package) {
                return Err(PatchError::InvalidPackage(package.clone()));
            }
        }

        let layout = Self {
            root: root.to_path_buf(),
            android_root: to_repo_path(root, &config.android.project_root),
            ios_root: to_repo_path(root, &config.ios.project_root),
            android_package: package,
        };
        info!(
            root = %layout.root.display(),
            android = %layout.android_root.display(),
            ios = %layout.ios_root.display(),
            package = ?layout.android_package,
            "resolved project layout"
        );
        Ok(layout)
    }

    /// `app/src/main/java` inside the Android project
    pub fn android_java_dir(&self) -> PathBuf {
        self.android_root.join("app").join("src").join("main").join("java")
    }

    /// Directory holding `MainActivity` and `MainApplication`
    pub fn android_package_dir(&self) -> Result<PathBuf> {
        let java_dir = self.android_java_dir();
        if let Some(ref package) = self.android_package {
            return Ok(package.split('.').fold(java_dir, |dir, segment| dir.join(segment)));
        }

        for pattern in ["**/MainApplication.*", "**/MainActivity.*"] {
            if let Some(found) = find_files(&java_dir, pattern)?.into_iter().next() {
                if let Some(parent) = found.parent() {
                    debug!(dir = %parent.display(), "discovered Android package directory");
                    return Ok(parent.to_path_buf());
                }
            }
        }

        Err(PatchError::PackageUnresolved {
            reason: format!(
                "no android.package configured, none in the app config, and no MainActivity or MainApplication under {}",
                java_dir.display()
            ),
        })
    }

    /// Path of the given patch target
    pub fn path_for(&self, target: PatchTarget) -> Result<PathBuf> {
        match target {
            PatchTarget::MainActivity => Ok(source_file(&self.android_package_dir()?, "MainActivity")),
            PatchTarget::MainApplication => {
                Ok(source_file(&self.android_package_dir()?, "MainApplication"))
            }
            PatchTarget::Podfile => Ok(self.ios_root.join("Podfile")),
        }
    }

    /// [`path_for`](Self::path_for) on the blocking pool. Resolution checks
    /// the filesystem and may walk the Java source tree.
    pub async fn resolve_path(&self, target: PatchTarget) -> Result<PathBuf> {
        let layout = self.clone();
        tokio::task::spawn_blocking(move || layout.path_for(target)).await?
    }
}

/// `<dir>/<class>.java`, or the Kotlin file when only that exists
fn source_file(dir: &Path, class: &str) -> PathBuf {
    let java = dir.join(format!("{}.java", class));
    let kotlin = dir.join(format!("{}.kt", class));
    if !java.exists() && kotlin.exists() {
        kotlin
    } else {
        java
    }
}

#[derive(Debug, Deserialize)]
struct AppJsonWrapper {
    expo: Option<ExpoSection>,
}

#[derive(Debug, Deserialize)]
struct ExpoSection {
    android: Option<AndroidSection>,
}

#[derive(Debug, Deserialize)]
struct AndroidSection {
    package: Option<String>,
}

/// Read `expo.android.package` from an `app.json`
pub fn read_app_config_package(path: &Path) -> Option<String> {
    let content = std::fs::read_to_string(path).ok()?;
    let wrapper: AppJsonWrapper = match serde_json::from_str(&content) {
        Ok(wrapper) => wrapper,
        Err(e) => {
            debug!(path = %path.display(), error = %e, "could not parse app config");
            return None;
        }
    };
    wrapper.expo?.android?.package
}

/// A project file held in memory between read and write
#[derive(Debug, Clone)]
pub struct ProjectFile {
    path: PathBuf,
    platform: Platform,
    language: SourceLanguage,
    original: String,
    contents: String,
}

impl ProjectFile {
    /// Wrap text that is already in memory
    pub fn from_contents(path: impl Into<PathBuf>, platform: Platform, contents: impl Into<String>) -> Self {
        let path = path.into();
        let contents = contents.into();
        Self {
            language: SourceLanguage::from_path(&path),
            path,
            platform,
            original: contents.clone(),
            contents,
        }
    }

    /// Read a file as UTF-8
    pub async fn read(path: impl Into<PathBuf>, platform: Platform) -> Result<Self> {
        let path = path.into();
        let contents = tokio::fs::read_to_string(&path)
            .await
            .map_err(|e| PatchError::io(&path, e))?;
        debug!(path = %path.display(), bytes = contents.len(), "read project file");
        Ok(Self::from_contents(path, platform, contents))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn platform(&self) -> Platform {
        self.platform
    }

    pub fn language(&self) -> SourceLanguage {
        self.language
    }

    /// Current text
    pub fn contents(&self) -> &str {
        &self.contents
    }

    /// File name for messages
    pub fn name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }

    /// Replace the text
    pub fn set_contents(&mut self, contents: String) {
        self.contents = contents;
    }

    /// Whether the text differs from what was read
    pub fn is_modified(&self) -> bool {
        self.contents != self.original
    }

    /// Write the text back if it changed. The new text goes to a sibling
    /// temp file first and is renamed over the original, so the file is
    /// either fully rewritten or left alone.
    pub async fn save(&self) -> Result<bool> {
        if !self.is_modified() {
            debug!(path = %self.path.display(), "unchanged, not writing");
            return Ok(false);
        }

        let tmp = self.path.with_file_name(format!(".{}.gantry-tmp", self.name()));
        tokio::fs::write(&tmp, &self.contents)
            .await
            .map_err(|e| PatchError::io(&tmp, e))?;
        if let Err(e) = tokio::fs::rename(&tmp, &self.path).await {
            let _ = tokio::fs::remove_file(&tmp).await;
            return Err(PatchError::io(&self.path, e));
        }

        info!(path = %self.path.display(), "wrote patched file");
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_package_paths() {
        let layout = ProjectLayout::new("/work/app").with_package("com.example.app");
        assert_eq!(
            layout.path_for(PatchTarget::MainActivity).unwrap(),
            PathBuf::from("/work/app/android/app/src/main/java/com/example/app/MainActivity.java")
        );
        assert_eq!(
            layout.path_for(PatchTarget::MainApplication).unwrap(),
            PathBuf::from("/work/app/android/app/src/main/java/com/example/app/MainApplication.java")
        );
        assert_eq!(
            layout.path_for(PatchTarget::Podfile).unwrap(),
            PathBuf::from("/work/app/ios/Podfile")
        );
    }

    #[test]
    fn test_kotlin_activity_selected_when_only_kotlin_exists() {
        let temp = TempDir::new().unwrap();
        let layout = ProjectLayout::new(temp.path()).with_package("com.example.app");
        let dir = layout.android_package_dir().unwrap();
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("MainActivity.kt"), "package com.example.app").unwrap();

        assert_eq!(
            layout.path_for(PatchTarget::MainActivity).unwrap(),
            dir.join("MainActivity.kt")
        );
    }

    #[test]
    fn test_resolve_package_from_app_json() {
        let temp = TempDir::new().unwrap();
        std::fs::write(
            temp.path().join("app.json"),
            r#"{"expo": {"name": "demo", "android": {"package": "dev.demo.app"}}}"#,
        )
        .unwrap();

        let layout = ProjectLayout::resolve(temp.path(), &Config::default()).unwrap();
        assert_eq!(layout.android_package.as_deref(), Some("dev.demo.app"));
        assert_eq!(layout.android_root, temp.path().join("android"));
    }

    #[test]
    fn test_config_package_wins_over_app_json() {
        let temp = TempDir::new().unwrap();
        std::fs::write(
            temp.path().join("app.json"),
            r#"{"expo": {"android": {"package": "dev.demo.app"}}}"#,
        )
        .unwrap();
        let mut config = Config::default();
        config.android.package = Some("com.example.app".to_string());
        config.ios.project_root = PathBuf::from("native/ios");

        let layout = ProjectLayout::resolve(temp.path(), &config).unwrap();
        assert_eq!(layout.android_package.as_deref(), Some("com.example.app"));
        assert_eq!(layout.ios_root, temp.path().join("native/ios"));
    }

    #[test]
    fn test_resolve_rejects_invalid_app_json_package() {
        let temp = TempDir::new().unwrap();
        std::fs::write(
            temp.path().join("app.json"),
            r#"{"expo": {"android": {"package": "not valid"}}}"#,
        )
        .unwrap();

        let err = ProjectLayout::resolve(temp.path(), &Config::default()).unwrap_err();
        assert!(matches!(err, PatchError::InvalidPackage(_)));
    }

    #[test]
    fn test_discover_package_dir() {
        let temp = TempDir::new().unwrap();
        let layout = ProjectLayout::new(temp.path());
        let dir = layout.android_java_dir().join("org/sample/demo");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("MainApplication.java"), "").unwrap();

        assert_eq!(layout.android_package_dir().unwrap(), dir);
    }

    #[test]
    fn test_unresolved_package() {
        let temp = TempDir::new().unwrap();
        let layout = ProjectLayout::new(temp.path());
        assert!(matches!(
            layout.path_for(PatchTarget::MainActivity),
            Err(PatchError::PackageUnresolved { .. })
        ));
        assert!(layout.path_for(PatchTarget::Podfile).is_ok());
    }

    #[tokio::test]
    async fn test_read_modify_save() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("Podfile");
        std::fs::write(&path, "platform :ios, '10.0'\n").unwrap();

        let mut file = ProjectFile::read(&path, Platform::Ios).await.unwrap();
        assert_eq!(file.language(), SourceLanguage::Ruby);
        assert!(!file.save().await.unwrap());

        file.set_contents("platform :ios, '11.0'\n".to_string());
        assert!(file.is_modified());
        assert!(file.save().await.unwrap());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "platform :ios, '11.0'\n");

        let leftovers: Vec<_> = std::fs::read_dir(temp.path()).unwrap().collect();
        assert_eq!(leftovers.len(), 1);
    }

    #[tokio::test]
    async fn test_read_missing_file() {
        let temp = TempDir::new().unwrap();
        let err = ProjectFile::read(temp.path().join("Podfile"), Platform::Ios)
            .await
            .unwrap_err();
        assert!(matches!(err, PatchError::FileNotFound { .. }));
    }

    #[tokio::test]
    async fn test_resolve_path_discovers_package_dir() {
        let temp = TempDir::new().unwrap();
        let layout = ProjectLayout::new(temp.path());
        let dir = layout.android_java_dir().join("io/acme/shop");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("MainApplication.java"), "").unwrap();

        let path = layout.resolve_path(PatchTarget::MainActivity).await.unwrap();
        assert_eq!(path, dir.join("MainActivity.java"));

        let podfile = layout.resolve_path(PatchTarget::Podfile).await.unwrap();
        assert_eq!(podfile, temp.path().join("ios/Podfile"));
    }

    #[tokio::test]
    async fn test_resolve_path_unresolved() {
        let temp = TempDir::new().unwrap();
        let err = ProjectLayout::new(temp.path())
            .resolve_path(PatchTarget::MainApplication)
            .await
            .unwrap_err();
        assert!(matches!(err, PatchError::PackageUnresolved { .. }));
    }
}
