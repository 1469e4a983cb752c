//! Error types for the patch engine

use std::path::PathBuf;
use thiserror::Error;

use crate::imports::SourceLanguage;

/// Result type for patch operations
pub type Result<T> = std::result::Result<T, PatchError>;

/// Patch engine errors.
///
/// Inside the orchestrator every one of these is turned into a warning; they
/// only surface directly from layout resolution and plugin lookup.
#[derive(Error, Debug)]
pub enum PatchError {
    /// Target file does not exist
    #[error("file not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    /// Reading or writing a file failed
    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file is not written in the language the patch expects
    #[error("{} is {found}, expected {expected}", path.display())]
    UnsupportedLanguage {
        path: PathBuf,
        expected: SourceLanguage,
        found: SourceLanguage,
    },

    /// No Android package could be determined for the project
    #[error("could not determine the Android package: {reason}")]
    PackageUnresolved { reason: String },

    /// Package identifier is not reverse-domain
    #[error("invalid Android package '{0}'")]
    InvalidPackage(String),

    /// Plugin id is not registered
    #[error("unknown plugin '{id}'. Available: {available}")]
    UnknownPlugin { id: String, available: String },

    /// Glob pattern could not be compiled
    #[error("invalid file pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },

    /// Blocking filesystem work could not finish
    #[error("background task failed: {0}")]
    Task(#[from] tokio::task::JoinError),

    /// Configuration error from the core crate
    #[error(transparent)]
    Config(#[from] gantry_core::GantryError),
}

impl PatchError {
    /// Wrap an IO error with the path it happened on. A missing file gets
    /// its own variant so warnings read naturally.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        if source.kind() == std::io::ErrorKind::NotFound {
            Self::FileNotFound { path }
        } else {
            Self::Io { path, source }
        }
    }

    /// Whether the error means the source is not in the expected shape
    pub fn is_malformed_source(&self) -> bool {
        matches!(self, Self::UnsupportedLanguage { .. })
    }
}
