//! Presentation layer for toolpilot
//!
//! This crate contains the CLI definition, console output, progress
//! reporting, Ctrl-C handling and the interactive chat interface.

pub mod chat;
pub mod cli;
pub mod config;
pub mod interrupt;
pub mod output;
pub mod progress;

// Re-export commonly used types
pub use chat::ChatRepl;
pub use cli::commands::Cli;
pub use config::ReplConfig;
pub use interrupt::TurnInterrupt;
pub use output::console::ConsoleFormatter;
pub use progress::reporter::TurnProgressReporter;
