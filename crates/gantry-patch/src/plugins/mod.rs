//! Built-in config plugins

pub mod dev_launcher;

pub use dev_launcher::DevLauncherPlugin;

use crate::plugin::PluginRegistry;

/// Register all built-in plugins
pub fn register_all(registry: &mut PluginRegistry) {
    registry.register(DevLauncherPlugin::new());
}
