//! Non-fatal patch failures
//!
//! A [`WarningSink`] is a plain value. Each platform pass fills its own sink
//! and the orchestrator merges them into the final report.

use std::fmt;

use gantry_core::Platform;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// A patch failure that did not stop the pass
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Warning {
    /// Platform the failing file belongs to
    pub platform: Platform,
    /// Component that produced the warning (e.g. `expo-dev-launcher`)
    pub component: String,
    /// Human-readable message
    pub message: String,
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.platform, self.component, self.message)
    }
}

/// Accumulates warnings for one configuration pass
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WarningSink {
    warnings: Vec<Warning>,
}

impl WarningSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a warning
    pub fn add(&mut self, platform: Platform, component: impl Into<String>, message: impl Into<String>) {
        let warning = Warning {
            platform,
            component: component.into(),
            message: message.into(),
        };
        warn!(
            platform = %warning.platform,
            component = %warning.component,
            message = %warning.message,
            "patch warning"
        );
        self.warnings.push(warning);
    }

    /// Record an Android warning
    pub fn add_android(&mut self, component: impl Into<String>, message: impl Into<String>) {
        self.add(Platform::Android, component, message);
    }

    /// Record an iOS warning
    pub fn add_ios(&mut self, component: impl Into<String>, message: impl Into<String>) {
        self.add(Platform::Ios, component, message);
    }

    /// Move every warning of `other` into this sink
    pub fn merge(&mut self, other: WarningSink) {
        self.warnings.extend(other.warnings);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Warning> {
        self.warnings.iter()
    }

    /// Warnings for one platform
    pub fn for_platform(&self, platform: Platform) -> impl Iterator<Item = &Warning> {
        self.warnings.iter().filter(move |w| w.platform == platform)
    }

    pub fn len(&self) -> usize {
        self.warnings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.warnings.is_empty()
    }

    /// Consume the sink
    pub fn into_vec(self) -> Vec<Warning> {
        self.warnings
    }
}

impl<'a> IntoIterator for &'a WarningSink {
    type Item = &'a Warning;
    type IntoIter = std::slice::Iter<'a, Warning>;

    fn into_iter(self) -> Self::IntoIter {
        self.warnings.iter()
    }
}
