//! Sandbox error types

use thiserror::Error;

/// Violations of the path boundary or the command blocklist.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SandboxError {
    #[error("Access denied: '{requested}' is outside the working directory ({base})")]
    OutOfBounds { requested: String, base: String },

    #[error("The '{0}' command cannot be executed for security reasons")]
    Blocked(String),

    #[error("Invalid base directory '{path}': {reason}")]
    InvalidBaseDirectory { path: String, reason: String },
}

impl SandboxError {
    pub fn is_out_of_bounds(&self) -> bool {
        matches!(self, SandboxError::OutOfBounds { .. })
    }

    pub fn is_blocked(&self) -> bool {
        matches!(self, SandboxError::Blocked(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blocked_display_names_command() {
        let err = SandboxError::Blocked("sudo".to_string());
        assert_eq!(
            err.to_string(),
            "The 'sudo' command cannot be executed for security reasons"
        );
        assert!(err.is_blocked());
        assert!(!err.is_out_of_bounds());
    }
}
