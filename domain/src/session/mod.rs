//! Messages exchanged with the reasoning engine.

pub mod entities;

pub use entities::{Message, Role};
