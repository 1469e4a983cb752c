//! Configuration validation

use std::collections::HashSet;

use tracing::debug;

use crate::error::{ConfigError, Result};
use crate::types::is_valid_package_id;

use super::types::Config;

/// Validate configuration
pub fn validate_config(config: &Config) -> Result<()> {
    debug!("validating configuration");
    validate_plugins(config)?;
    validate_platforms(config)?;
    validate_android(config)?;
    validate_ios(config)?;
    debug!("configuration validation passed");
    Ok(())
}

fn validate_plugins(config: &Config) -> Result<()> {
    if config.plugins.is_empty() {
        return Err(ConfigError::invalid("plugins", "at least one plugin is required").into());
    }

    let mut seen = HashSet::new();
    for (i, plugin) in config.plugins.iter().enumerate() {
        if plugin.trim().is_empty() {
            return Err(
                ConfigError::invalid(format!("plugins[{}]", i), "plugin id cannot be empty").into(),
            );
        }
        if !seen.insert(plugin.as_str()) {
            return Err(ConfigError::invalid(
                format!("plugins[{}]", i),
                format!("plugin '{}' is listed more than once", plugin),
            )
            .into());
        }
    }

    Ok(())
}

fn validate_platforms(config: &Config) -> Result<()> {
    if config.enabled_platforms().is_empty() {
        return Err(ConfigError::invalid(
            "android.enabled / ios.enabled",
            "at least one platform must be enabled",
        )
        .into());
    }
    Ok(())
}

fn validate_android(config: &Config) -> Result<()> {
    if config.android.project_root.as_os_str().is_empty() {
        return Err(
            ConfigError::invalid("android.project_root", "project root cannot be empty").into(),
        );
    }

    if let Some(ref package) = config.android.package {
        if !is_valid_package_id(package) {
            return Err(ConfigError::invalid(
                "android.package",
                format!("'{}' is not a reverse-domain identifier (e.g. com.example.app)", package),
            )
            .into());
        }
    }

    Ok(())
}

fn validate_ios(config: &Config) -> Result<()> {
    if config.ios.project_root.as_os_str().is_empty() {
        return Err(ConfigError::invalid("ios.project_root", "project root cannot be empty").into());
    }
    Ok(())
}
