//! Exit codes for the CLI

use gantry_core::{ConfigError, GantryError};
use gantry_patch::PatchError;
use thiserror::Error;

/// Success
pub const SUCCESS: i32 = 0;

/// General error
pub const ERROR: i32 = 1;

/// Configuration error
pub const CONFIG_ERROR: i32 = 2;

/// Files still need patching (`check`)
pub const PATCHES_PENDING: i32 = 3;

/// Warnings were recorded in strict mode
pub const WARNINGS: i32 = 4;

/// Error carrying an explicit exit code
#[derive(Debug, Error)]
#[error("{message}")]
pub struct ExitError {
    pub code: i32,
    pub message: String,
}

impl ExitError {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

/// Exit code for an error returned by a command
pub fn for_error(err: &anyhow::Error) -> i32 {
    if let Some(exit) = err.downcast_ref::<ExitError>() {
        return exit.code;
    }
    let config_error = err.downcast_ref::<ConfigError>().is_some()
        || matches!(err.downcast_ref::<GantryError>(), Some(GantryError::Config(_)))
        || matches!(
            err.downcast_ref::<PatchError>(),
            Some(PatchError::Config(_) | PatchError::InvalidPackage(_) | PatchError::UnknownPlugin { .. })
        );
    if config_error {
        CONFIG_ERROR
    } else {
        ERROR
    }
}
