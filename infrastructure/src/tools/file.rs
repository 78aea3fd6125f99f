//! File operation tools: read_file, write_file
//!
//! Both tools resolve the requested path through the sandbox at call time, so
//! a `/basedir` change between turns is always honoured. Messages quote the
//! path as the engine requested it, not the resolved absolute path.

use std::time::Instant;
use tokio_util::sync::CancellationToken;
use toolpilot_domain::BaseDirectory;
use toolpilot_domain::tool::{
    READ_FILE, WRITE_FILE,
    value_objects::{ToolError, ToolResult, ToolResultMetadata},
};
use tracing::{debug, warn};

/// Execute the read_file tool
pub async fn execute_read_file(
    base: &BaseDirectory,
    path: &str,
    cancel: &CancellationToken,
) -> ToolResult {
    let start = Instant::now();

    let resolved = match base.resolve(path) {
        Ok(p) => p,
        Err(e) => {
            warn!("read_file rejected: {}", e);
            return ToolResult::failure(READ_FILE, e.into());
        }
    };
    debug!("read_file {}", resolved);

    let content = tokio::select! {
        biased;
        _ = cancel.cancelled() => return ToolResult::failure(READ_FILE, ToolError::canceled()),
        read = tokio::fs::read_to_string(resolved.as_path()) => match read {
            Ok(c) => c,
            Err(e) => {
                return ToolResult::failure(
                    READ_FILE,
                    ToolError::from_io("Failed to read file", path, &e),
                );
            }
        },
    };

    let bytes = content.len();
    ToolResult::success(READ_FILE, format!("[File content - {}]:\n{}", path, content))
        .with_metadata(ToolResultMetadata {
            duration_ms: Some(start.elapsed().as_millis() as u64),
            bytes: Some(bytes),
            path: Some(resolved.to_string()),
            ..Default::default()
        })
}

/// Execute the write_file tool
///
/// Creates the file or truncates an existing one. Parent directories are not
/// created.
pub async fn execute_write_file(
    base: &BaseDirectory,
    path: &str,
    content: &str,
    cancel: &CancellationToken,
) -> ToolResult {
    let start = Instant::now();

    let resolved = match base.resolve(path) {
        Ok(p) => p,
        Err(e) => {
            warn!("write_file rejected: {}", e);
            return ToolResult::failure(WRITE_FILE, e.into());
        }
    };
    debug!("write_file {} ({} bytes)", resolved, content.len());

    if cancel.is_cancelled() {
        return ToolResult::failure(WRITE_FILE, ToolError::canceled());
    }

    // Once started, a write runs to completion.
    if let Err(e) = tokio::fs::write(resolved.as_path(), content).await {
        return ToolResult::failure(
            WRITE_FILE,
            ToolError::from_io("Failed to write file", path, &e),
        );
    }

    ToolResult::success(WRITE_FILE, format!("Success: file saved ({})", path)).with_metadata(
        ToolResultMetadata {
            duration_ms: Some(start.elapsed().as_millis() as u64),
            bytes: Some(content.len()),
            path: Some(resolved.to_string()),
            ..Default::default()
        },
    )
}
