//! Turn progress port.
//!
//! [`TurnProgressNotifier`] is an **output port** that the presentation layer
//! implements to show what a turn is doing while it runs.
//!
//! All methods have default no-op implementations, so implementers only
//! need to override the callbacks they care about.

use toolpilot_domain::{ToolCall, ToolResult, TurnPhase};

pub trait TurnProgressNotifier: Send + Sync {
    /// Called when the turn moves to a new phase
    fn on_phase_change(&self, _phase: TurnPhase) {}

    /// Called right before a tool call is dispatched
    fn on_tool_call(&self, _call: &ToolCall) {}

    /// Called when a tool returns a result
    fn on_tool_result(&self, _call: &ToolCall, _result: &ToolResult) {}

    /// Called when engine output could not be parsed and is being retried
    fn on_malformed_output(&self, _reason: &str) {}
}

/// Notifier that ignores every event.
pub struct NoTurnProgress;

impl TurnProgressNotifier for NoTurnProgress {}
