//! Port definitions (interfaces for external adapters)
//!
//! Ports define the contracts that infrastructure adapters must implement.

pub mod attachments;
pub mod progress;
pub mod reasoning;
pub mod tool_executor;
