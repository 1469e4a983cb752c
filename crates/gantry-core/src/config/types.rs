//! Configuration types

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::types::Platform;

/// Main configuration for Gantry
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Project name
    pub name: Option<String>,

    /// App config file holding `expo.android.package`, relative to the project root
    pub app_config: PathBuf,

    /// Plugins to apply, in order
    pub plugins: Vec<String>,

    /// Android project configuration
    pub android: AndroidConfig,

    /// iOS project configuration
    pub ios: IosConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            name: None,
            app_config: PathBuf::from("app.json"),
            plugins: vec!["dev-launcher".to_string()],
            android: AndroidConfig::default(),
            ios: IosConfig::default(),
        }
    }
}

impl Config {
    /// Platforms that are enabled in this configuration
    pub fn enabled_platforms(&self) -> Vec<Platform> {
        let mut platforms = Vec::new();
        if self.android.enabled {
            platforms.push(Platform::Android);
        }
        if self.ios.enabled {
            platforms.push(Platform::Ios);
        }
        platforms
    }
}

/// Android project configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AndroidConfig {
    /// Whether Android files are patched
    pub enabled: bool,

    /// Android project directory
    pub project_root: PathBuf,

    /// Reverse-domain application package (e.g. `com.example.app`)
    pub package: Option<String>,
}

impl Default for AndroidConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            project_root: PathBuf::from("android"),
            package: None,
        }
    }
}

/// iOS project configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IosConfig {
    /// Whether iOS files are patched
    pub enabled: bool,

    /// iOS project directory (holds the Podfile)
    pub project_root: PathBuf,
}

impl Default for IosConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            project_root: PathBuf::from("ios"),
        }
    }
}
