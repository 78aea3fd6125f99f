//! Interactive chat module
//!
//! Provides the readline-based REPL: input classification, meta-commands,
//! file attachments and conversation export.

mod export;
mod input;
mod repl;

pub use export::{SaveError, save_conversation};
pub use input::{MetaCommand, ReplInput};
pub use repl::{ChatRepl, CommandResult};
