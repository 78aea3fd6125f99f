//! Infrastructure layer for toolpilot
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, plus configuration file loading.

pub mod attachments;
pub mod config;
pub mod reasoning;
pub mod tools;

// Re-export commonly used types
pub use attachments::LocalAttachmentSource;
pub use config::{
    ConfigLoader, ConfigValidationError, FileAgentConfig, FileConfig, FileProviderConfig,
    FileReplConfig, FileSandboxConfig,
};
pub use reasoning::{ChatCompletionsEngine, ProviderKind, ProviderSettings, ProviderSetupError};
pub use tools::{LocalToolExecutor, ProcessOutcome, ShellCommand};
