//! Local attachment source for the `@<query>` flow.
//!
//! Listing walks the base directory and prunes vendored or secret-bearing
//! paths while walking, so `node_modules/` or `target/` are never descended
//! into. Reading goes through the sandbox like every tool.

use async_trait::async_trait;
use glob::Pattern;
use std::path::Path;
use toolpilot_application::{AttachmentError, AttachmentSource};
use toolpilot_domain::core::string::truncate_chars;
use toolpilot_domain::{Attachment, BaseDirectory};
use tracing::{debug, warn};
use walkdir::{DirEntry, WalkDir};

/// Directory names never entered, at any depth.
pub const IGNORED_DIRS: &[&str] = &["node_modules", ".git", "target", ".idea", ".m2"];

/// File name patterns never offered as attachments, at any depth.
pub const IGNORED_FILE_PATTERNS: &[&str] = &["*.env"];

/// Default character cap for an attached file
pub const DEFAULT_MAX_CHARS: usize = 1_000_000;

fn pruned(entry: &DirEntry) -> bool {
    entry.depth() > 0
        && entry.file_type().is_dir()
        && entry
            .file_name()
            .to_str()
            .is_some_and(|name| IGNORED_DIRS.contains(&name))
}

fn ignored_file(entry: &DirEntry, patterns: &[Pattern]) -> bool {
    entry
        .file_name()
        .to_str()
        .is_some_and(|name| patterns.iter().any(|p| p.matches(name)))
}

/// List regular files under `base`, relative and sorted.
pub fn list_files(base: &Path) -> Result<Vec<String>, AttachmentError> {
    let patterns = IGNORED_FILE_PATTERNS
        .iter()
        .map(|p| Pattern::new(p))
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| AttachmentError::Listing(e.to_string()))?;

    if !base.is_dir() {
        return Err(AttachmentError::Listing(format!(
            "{} is not a directory",
            base.display()
        )));
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(base)
        .follow_links(false)
        .into_iter()
        .filter_entry(|e| !pruned(e))
    {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                debug!("Skipping unreadable path: {}", e);
                continue;
            }
        };
        // Symlinks to regular files are offered; symlinked directories are
        // not walked.
        if !entry.path().is_file() || ignored_file(&entry, &patterns) {
            continue;
        }
        let Ok(relative) = entry.path().strip_prefix(base) else {
            continue;
        };
        files.push(relative.to_string_lossy().replace('\\', "/"));
    }

    files.sort();
    Ok(files)
}

/// Read a file through the sandbox, capped at `max_chars` characters.
pub async fn read_attachment(
    base: &BaseDirectory,
    relative: &str,
    max_chars: usize,
) -> Result<Attachment, AttachmentError> {
    let resolved = base.resolve(relative).inspect_err(|e| {
        warn!("Attachment rejected by sandbox: {}", e);
    })?;

    let raw = tokio::fs::read_to_string(resolved.as_path())
        .await
        .map_err(|e| AttachmentError::Read {
            path: relative.to_string(),
            message: e.to_string(),
        })?;

    let (content, truncated) = truncate_chars(&raw, max_chars);
    if truncated {
        debug!(file = relative, max_chars, "Attachment truncated");
    }

    Ok(Attachment {
        name: relative.to_string(),
        content,
        truncated,
    })
}

/// [`AttachmentSource`] over the session's base directory.
#[derive(Debug, Clone)]
pub struct LocalAttachmentSource {
    base: BaseDirectory,
    max_chars: usize,
}

impl LocalAttachmentSource {
    pub fn new(base: BaseDirectory) -> Self {
        Self {
            base,
            max_chars: DEFAULT_MAX_CHARS,
        }
    }

    pub fn with_max_chars(mut self, max_chars: usize) -> Self {
        self.max_chars = max_chars;
        self
    }
}

#[async_trait]
impl AttachmentSource for LocalAttachmentSource {
    fn list_files(&self) -> Result<Vec<String>, AttachmentError> {
        list_files(&self.base.current())
    }

    async fn read(&self, name: &str) -> Result<Attachment, AttachmentError> {
        read_attachment(&self.base, name, self.max_chars).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn fixture() -> TempDir {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("src/nested")).unwrap();
        fs::create_dir_all(root.join("node_modules/pkg")).unwrap();
        fs::create_dir_all(root.join(".git/objects")).unwrap();
        fs::create_dir_all(root.join("target/debug")).unwrap();
        fs::write(root.join("README.md"), "readme").unwrap();
        fs::write(root.join("src/main.rs"), "fn main() {}").unwrap();
        fs::write(root.join("src/nested/Util.rs"), "// util").unwrap();
        fs::write(root.join(".env"), "SECRET=1").unwrap();
        fs::write(root.join("src/prod.env"), "SECRET=2").unwrap();
        fs::write(root.join(".gitignore"), "target").unwrap();
        fs::write(root.join("node_modules/pkg/index.js"), "x").unwrap();
        fs::write(root.join(".git/objects/ab"), "x").unwrap();
        fs::write(root.join("target/debug/app"), "x").unwrap();
        dir
    }

    #[test]
    fn test_list_files_skips_ignored() {
        let dir = fixture();
        let files = list_files(dir.path()).unwrap();
        assert_eq!(
            files,
            vec![".gitignore", "README.md", "src/main.rs", "src/nested/Util.rs"]
        );
    }

    #[test]
    fn test_ignored_directories_are_pruned_at_any_depth() {
        let dir = fixture();
        let root = dir.path();
        fs::create_dir_all(root.join("web/node_modules/lib")).unwrap();
        fs::write(root.join("web/node_modules/lib/a.js"), "x").unwrap();
        fs::write(root.join("web/app.js"), "x").unwrap();
        // A file named like an ignored directory is still listed.
        fs::write(root.join("web/target"), "x").unwrap();

        let files = list_files(root).unwrap();
        assert!(files.contains(&"web/app.js".to_string()));
        assert!(files.contains(&"web/target".to_string()));
        assert!(!files.iter().any(|f| f.contains("node_modules")));
    }

    #[cfg(unix)]
    #[test]
    fn test_unreadable_ignored_directory_is_never_entered() {
        use std::os::unix::fs::PermissionsExt;

        let dir = fixture();
        let vendored = dir.path().join("node_modules/pkg");
        fs::set_permissions(&vendored, fs::Permissions::from_mode(0o000)).unwrap();

        let walked: Vec<_> = WalkDir::new(dir.path())
            .into_iter()
            .filter_entry(|e| !pruned(e))
            .collect();
        fs::set_permissions(&vendored, fs::Permissions::from_mode(0o755)).unwrap();

        // Descending into node_modules/pkg would surface a permission error.
        assert!(walked.iter().all(|entry| entry.is_ok()));
        assert!(
            walked
                .iter()
                .flatten()
                .all(|entry| !entry.path().starts_with(dir.path().join("node_modules")))
        );
    }

    #[tokio::test]
    async fn test_read_attachment_truncates() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("big.txt"), "abcdefghij").unwrap();
        let base = BaseDirectory::new(dir.path()).unwrap();

        let attachment = read_attachment(&base, "big.txt", 4).await.unwrap();
        assert!(attachment.truncated);
        assert!(attachment.content.starts_with("abcd"));
        assert!(!attachment.content.contains('e'));

        let whole = read_attachment(&base, "big.txt", DEFAULT_MAX_CHARS)
            .await
            .unwrap();
        assert_eq!(whole.content, "abcdefghij");
        assert!(!whole.truncated);
    }

    #[tokio::test]
    async fn test_read_attachment_outside_base() {
        let dir = TempDir::new().unwrap();
        let base = BaseDirectory::new(dir.path()).unwrap();
        let err = read_attachment(&base, "../outside.txt", 10)
            .await
            .unwrap_err();
        assert!(matches!(err, AttachmentError::Sandbox(_)));
    }

    #[tokio::test]
    async fn test_source_follows_base_changes() {
        let dir = fixture();
        let base = BaseDirectory::new(dir.path()).unwrap();
        let source = LocalAttachmentSource::new(base.clone());
        assert_eq!(source.list_files().unwrap().len(), 4);

        base.reconfigure("src").unwrap();
        assert_eq!(source.list_files().unwrap(), vec!["main.rs", "nested/Util.rs"]);
        let attachment = source.read("main.rs").await.unwrap();
        assert_eq!(attachment.content, "fn main() {}");
    }
}
