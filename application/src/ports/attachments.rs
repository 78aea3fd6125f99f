//! Attachment source port
//!
//! Lists and reads files under the base directory for the `@<query>` flow.

use async_trait::async_trait;
use thiserror::Error;
use toolpilot_domain::{Attachment, SandboxError};

#[derive(Debug, Error)]
pub enum AttachmentError {
    #[error(transparent)]
    Sandbox(#[from] SandboxError),

    #[error("failed to list files: {0}")]
    Listing(String),

    #[error("failed to read {path}: {message}")]
    Read { path: String, message: String },
}

#[async_trait]
pub trait AttachmentSource: Send + Sync {
    /// Candidate files, relative to the current base directory and sorted.
    fn list_files(&self) -> Result<Vec<String>, AttachmentError>;

    /// Read one listed file through the sandbox.
    async fn read(&self, name: &str) -> Result<Attachment, AttachmentError>;
}
