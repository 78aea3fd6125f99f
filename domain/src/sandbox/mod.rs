//! Sandbox rules applied before any tool touches the system.
//!
//! - [`path`]: containment of file paths under the base directory
//! - [`command_gate`]: first-token blocklist for shell commands
//!
//! Neither rule is a security boundary against a hostile model. Symlinks
//! are not followed during path resolution and shell operators are not
//! parsed by the gate.

pub mod command_gate;
pub mod error;
pub mod path;

pub use command_gate::{CommandBlocklist, check};
pub use error::SandboxError;
pub use path::{BaseDirectory, SandboxedPath, resolve};
