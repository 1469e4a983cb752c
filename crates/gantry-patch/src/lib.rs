//! Gantry Patch - Idempotent source patching for generated native projects
//!
//! Generated Android and iOS project scaffolding (`MainActivity.java`,
//! `MainApplication.java`, `Podfile`) needs small boilerplate hooks before a
//! native module can work. This crate applies those hooks as text edits that
//! are safe to run again and again.
//!
//! # Layers
//!
//! - [`document`]: line-indexed document with anchors and guarded insertion
//! - [`imports`]: import injection for languages with a package declaration
//! - [`edits`]: structural edits composed from the primitives
//! - [`plugins`]: concrete recipes (e.g. the dev launcher) as [`ConfigPlugin`]s
//! - [`orchestrator`]: read, transform, write every file, collecting warnings
//!
//! Nothing here parses Java or Ruby. Target-language snippets are opaque text.
//! A missing anchor is a no-op, and a failing file becomes a [`Warning`]
//! instead of aborting the pass.

pub mod document;
pub mod edits;
pub mod error;
pub mod imports;
pub mod orchestrator;
pub mod paths;
pub mod plugin;
pub mod plugins;
pub mod project;
pub mod warnings;

pub use document::{insert_lines, Anchor, Document, InsertOutcome};
pub use error::{PatchError, Result};
pub use imports::{inject_imports, SourceLanguage};
pub use orchestrator::{FileOutcome, FileStatus, OrchestratorConfig, PatchOrchestrator, PatchReport};
pub use paths::{find_files, to_repo_path};
pub use plugin::{ConfigPlugin, FileEdit, PatchTarget, PluginRegistry};
pub use project::{ProjectFile, ProjectLayout};
pub use warnings::{Warning, WarningSink};
