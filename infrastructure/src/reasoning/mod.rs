//! Reasoning engine adapter
//!
//! - [`provider`]: which backend to talk to and with which credentials
//! - [`prompt`]: system prompt and message list for each step
//! - [`parser`]: turning a reply into a tool request or final answer
//! - [`engine`]: [`ChatCompletionsEngine`], the `ReasoningEngine` adapter

pub mod engine;
pub mod parser;
pub mod prompt;
pub mod provider;

pub use engine::ChatCompletionsEngine;
pub use parser::parse_action;
pub use provider::{ProviderKind, ProviderSettings, ProviderSetupError};
