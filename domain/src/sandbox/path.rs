//! Path containment for file tools.
//!
//! [`resolve`] is pure path algebra: the requested path is joined onto the
//! base directory and normalized lexically, then checked component-wise
//! against the base. Nothing touches the filesystem here; existence and
//! permission errors surface later from the actual read or write.
//!
//! ```text
//! base      = /home/dev/project
//! "src/a.rs"          -> /home/dev/project/src/a.rs         ok
//! "./x/../b.txt"      -> /home/dev/project/b.txt            ok
//! "../../etc/passwd"  -> /home/etc/passwd                   OutOfBounds
//! "/home/dev/project-evil/x" (absolute)                     OutOfBounds
//! ```

use super::error::SandboxError;
use std::fmt;
use std::path::{Component, Path, PathBuf};
use std::sync::{Arc, RwLock};

/// A path that has been resolved against the base directory and found to be
/// inside it.
///
/// Only [`resolve`] constructs one. It is never persisted; callers resolve
/// again for every filesystem operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SandboxedPath {
    path: PathBuf,
}

impl SandboxedPath {
    pub fn as_path(&self) -> &Path {
        &self.path
    }

    pub fn into_path_buf(self) -> PathBuf {
        self.path
    }
}

impl AsRef<Path> for SandboxedPath {
    fn as_ref(&self) -> &Path {
        &self.path
    }
}

impl fmt::Display for SandboxedPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path.display())
    }
}

/// Resolve `requested` against `base`, rejecting anything that lands outside.
///
/// `base` is expected to be absolute. Absolute requests are taken as-is and
/// still have to fall under `base`. The result may equal `base` itself.
pub fn resolve(requested: impl AsRef<Path>, base: &Path) -> Result<SandboxedPath, SandboxError> {
    let requested = requested.as_ref();
    let joined = if requested.is_absolute() {
        requested.to_path_buf()
    } else {
        base.join(requested)
    };

    let normalized = normalize(&joined);
    let base = normalize(base);

    // Path::starts_with compares whole components, so `/base-evil` does not
    // match `/base`.
    if !normalized.starts_with(&base) {
        return Err(SandboxError::OutOfBounds {
            requested: requested.display().to_string(),
            base: base.display().to_string(),
        });
    }

    Ok(SandboxedPath { path: normalized })
}

/// Lexically collapse `.` and `..` segments. A `..` at the root stays at the
/// root.
fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::Prefix(prefix) => out.push(prefix.as_os_str()),
            Component::RootDir => out.push(Component::RootDir.as_os_str()),
            Component::CurDir => {}
            Component::ParentDir => {
                if !matches!(out.components().next_back(), None | Some(Component::RootDir) | Some(Component::Prefix(_))) {
                    out.pop();
                }
            }
            Component::Normal(segment) => out.push(segment),
        }
    }
    out
}

/// Process-wide working root for every tool call.
///
/// Cloning shares the same underlying value. Tools read [`current`](Self::current)
/// at the moment they touch the filesystem; the REPL changes it through
/// [`reconfigure`](Self::reconfigure) between turns only.
#[derive(Debug, Clone)]
pub struct BaseDirectory {
    inner: Arc<RwLock<PathBuf>>,
}

impl BaseDirectory {
    /// Create a base directory from an existing directory, canonicalizing it.
    pub fn new(path: impl AsRef<Path>) -> Result<Self, SandboxError> {
        let canonical = canonical_dir(path.as_ref())?;
        Ok(Self {
            inner: Arc::new(RwLock::new(canonical)),
        })
    }

    /// Snapshot of the current value.
    pub fn current(&self) -> PathBuf {
        match self.inner.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// Resolve `requested` against the current value.
    pub fn resolve(&self, requested: impl AsRef<Path>) -> Result<SandboxedPath, SandboxError> {
        resolve(requested, &self.current())
    }

    /// Point the base directory somewhere else.
    ///
    /// Relative paths are taken relative to the current base. The target must
    /// be an existing directory; on any error the value is left unchanged.
    /// Returns the new canonical path.
    pub fn reconfigure(&self, requested: impl AsRef<Path>) -> Result<PathBuf, SandboxError> {
        let requested = requested.as_ref();
        let candidate = if requested.is_absolute() {
            requested.to_path_buf()
        } else {
            self.current().join(requested)
        };
        let canonical = canonical_dir(&candidate)?;

        let mut guard = match self.inner.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        *guard = canonical.clone();
        Ok(canonical)
    }
}

fn canonical_dir(path: &Path) -> Result<PathBuf, SandboxError> {
    let canonical = std::fs::canonicalize(path).map_err(|e| SandboxError::InvalidBaseDirectory {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;
    if !canonical.is_dir() {
        return Err(SandboxError::InvalidBaseDirectory {
            path: path.display().to_string(),
            reason: "not a directory".to_string(),
        });
    }
    Ok(canonical)
}
