//! Config plugin trait and registry
//!
//! A plugin is a named list of file edits. It never touches the filesystem
//! itself; the orchestrator reads each target, runs the transform and writes
//! the result.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use gantry_core::Platform;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{PatchError, Result};
use crate::project::ProjectFile;

/// Native project file a patch applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PatchTarget {
    /// Android launcher activity
    MainActivity,
    /// Android application class
    MainApplication,
    /// CocoaPods Podfile
    Podfile,
}

impl PatchTarget {
    /// Platform the target belongs to
    pub fn platform(&self) -> Platform {
        match self {
            Self::MainActivity | Self::MainApplication => Platform::Android,
            Self::Podfile => Platform::Ios,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MainActivity => "MainActivity",
            Self::MainApplication => "MainApplication",
            Self::Podfile => "Podfile",
        }
    }
}

impl fmt::Display for PatchTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Pure transform from a file's current text to its patched text
pub type Transform = fn(&ProjectFile) -> Result<String>;

/// One edit of one target file
#[derive(Clone, Copy)]
pub struct FileEdit {
    pub target: PatchTarget,
    pub transform: Transform,
}

impl fmt::Debug for FileEdit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FileEdit").field("target", &self.target).finish_non_exhaustive()
    }
}

impl FileEdit {
    pub fn new(target: PatchTarget, transform: Transform) -> Self {
        Self { target, transform }
    }
}

/// A build-time transformation of generated native files
pub trait ConfigPlugin: Send + Sync {
    /// Identifier used in config files (e.g. "dev-launcher")
    fn id(&self) -> &'static str;

    /// Component name warnings are tagged with (e.g. "expo-dev-launcher")
    fn component(&self) -> &'static str;

    /// One-line description
    fn description(&self) -> &'static str;

    /// Edits in the order they must run
    fn edits(&self) -> Vec<FileEdit>;
}

/// Registry of config plugins
pub struct PluginRegistry {
    plugins: HashMap<String, Arc<dyn ConfigPlugin>>,
    /// Registration order
    order: Vec<String>,
}

impl PluginRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            plugins: HashMap::new(),
            order: Vec::new(),
        }
    }

    /// Create a registry with all built-in plugins
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        crate::plugins::register_all(&mut registry);
        registry
    }

    /// Register a plugin, replacing any plugin with the same id
    pub fn register<P: ConfigPlugin + 'static>(&mut self, plugin: P) {
        let id = plugin.id().to_string();
        debug!(plugin_id = %id, "registering config plugin");
        if !self.plugins.contains_key(&id) {
            self.order.push(id.clone());
        }
        self.plugins.insert(id, Arc::new(plugin));
    }

    /// Get a plugin by id
    pub fn get(&self, id: &str) -> Option<Arc<dyn ConfigPlugin>> {
        self.plugins.get(id).cloned()
    }

    /// Plugin ids in registration order
    pub fn ids(&self) -> Vec<&str> {
        self.order.iter().map(String::as_str).collect()
    }

    /// Look up every id, failing on the first unknown one
    pub fn resolve<S: AsRef<str>>(&self, ids: &[S]) -> Result<Vec<Arc<dyn ConfigPlugin>>> {
        ids.iter()
            .map(|id| {
                let id = id.as_ref();
                self.get(id).ok_or_else(|| PatchError::UnknownPlugin {
                    id: id.to_string(),
                    available: self.ids().join(", "),
                })
            })
            .collect()
    }
}

impl Default for PluginRegistry {
    fn default() -> Self {
        Self::with_builtins()
    }
}
