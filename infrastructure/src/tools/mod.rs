//! Local tool implementations
//!
//! - [`file`]: `read_file`, `write_file`
//! - [`command`]: `execute_shell_command`
//! - [`executor`]: [`LocalToolExecutor`], the `ToolExecutorPort` adapter

pub mod command;
pub mod executor;
pub mod file;

pub use command::{ProcessOutcome, ShellCommand};
pub use executor::LocalToolExecutor;
