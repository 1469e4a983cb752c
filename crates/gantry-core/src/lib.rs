//! Gantry Core - Core library for native project patching
//!
//! This crate provides the foundational types, error handling and
//! configuration shared by the patch engine and the CLI.

pub mod config;
pub mod error;
pub mod types;

pub use error::{ConfigError, GantryError, Result};
pub use types::{is_valid_package_id, Platform};
