//! Agent domain: the state of a single turn.
//!
//! - [`entities::TurnPhase`]: state machine of a turn
//! - [`entities::Scratchpad`]: intermediate (call, observation) pairs
//! - [`value_objects::TurnLimits`]: iteration and wall-clock bounds

pub mod entities;
pub mod value_objects;

pub use entities::{ScratchEntry, Scratchpad, TurnPhase};
pub use value_objects::{TurnBound, TurnLimits};
