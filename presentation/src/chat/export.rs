//! `/save`: write the conversation under the base directory.

use std::path::PathBuf;
use thiserror::Error;
use toolpilot_domain::conversation::{export_file_name, render_markdown};
use toolpilot_domain::{BaseDirectory, ConversationStore, SandboxError};
use tracing::info;

#[derive(Debug, Error)]
pub enum SaveError {
    #[error(transparent)]
    Sandbox(#[from] SandboxError),

    #[error("failed to write {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Timestamp used in export file names, local time.
pub fn timestamp() -> String {
    chrono::Local::now().format("%Y%m%d_%H%M%S").to_string()
}

/// Write `store` as markdown. Returns `None` without touching the disk when
/// there is nothing to save.
pub fn save_conversation(
    store: &ConversationStore,
    base: &BaseDirectory,
    timestamp: &str,
) -> Result<Option<PathBuf>, SaveError> {
    if store.is_empty() {
        return Ok(None);
    }

    let file_name = export_file_name(timestamp);
    let target = base.resolve(&file_name)?.into_path_buf();
    let document = render_markdown(store.turns(), timestamp);

    std::fs::write(&target, document).map_err(|source| SaveError::Io {
        path: target.display().to_string(),
        source,
    })?;
    info!("Conversation saved to {}", target.display());
    Ok(Some(target))
}
