//! CLI commands

mod apply;
mod check;
mod completions;
mod context;
mod init;
mod validate;

pub use apply::ApplyCommand;
pub use check::CheckCommand;
pub use completions::CompletionsCommand;
pub use init::InitCommand;
pub use validate::ValidateCommand;
