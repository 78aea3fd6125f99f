//! Conversation domain.
//!
//! - [`entities::Turn`]: an immutable (input, output) pair
//! - [`entities::ConversationStore`]: append-only log of turns
//! - [`export`]: markdown and console renderings
//! - [`attachment`]: files attached to a chat input

pub mod attachment;
pub mod entities;
pub mod export;

pub use attachment::{Attachment, filter_candidates};
pub use entities::{ConversationStore, Turn};
pub use export::{export_file_name, render_listing, render_markdown};
