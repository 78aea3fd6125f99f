//! Progress reporting for turn execution

use crate::output::console::ConsoleFormatter;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Mutex;
use std::time::Duration;
use toolpilot_application::TurnProgressNotifier;
use toolpilot_domain::{ToolCall, ToolResult, TurnPhase};

/// Reports turn progress: a spinner while the engine is thinking and one
/// dimmed line per tool invocation.
pub struct TurnProgressReporter {
    spinner: Mutex<Option<ProgressBar>>,
    show_spinner: bool,
}

impl TurnProgressReporter {
    pub fn new() -> Self {
        Self {
            spinner: Mutex::new(None),
            show_spinner: true,
        }
    }

    /// Tool lines only, no spinner
    pub fn quiet() -> Self {
        Self {
            spinner: Mutex::new(None),
            show_spinner: false,
        }
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {prefix:.bold.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }

    fn clear_spinner(&self) {
        if let Some(pb) = self.lock().take() {
            pb.finish_and_clear();
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Option<ProgressBar>> {
        self.spinner
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Short description of what a call touches.
    fn summarize(call: &ToolCall) -> String {
        call.get_string("command")
            .or_else(|| call.get_string("path"))
            .unwrap_or_default()
            .to_string()
    }
}

impl Default for TurnProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl TurnProgressNotifier for TurnProgressReporter {
    fn on_phase_change(&self, phase: TurnPhase) {
        self.clear_spinner();

        if phase == TurnPhase::Reasoning && self.show_spinner {
            let pb = ProgressBar::new_spinner();
            pb.set_style(Self::spinner_style());
            pb.set_prefix(phase.display_name().to_string());
            pb.set_message("(Ctrl-C to cancel)");
            pb.enable_steady_tick(Duration::from_millis(100));
            *self.lock() = Some(pb);
        }
    }

    fn on_tool_call(&self, call: &ToolCall) {
        self.clear_spinner();
        println!(
            "{}",
            ConsoleFormatter::tool_line(&call.tool_name, &Self::summarize(call))
        );
    }

    fn on_tool_result(&self, _call: &ToolCall, result: &ToolResult) {
        if let Some(error) = result.error() {
            println!("  {} {}", "x".red(), error.message.dimmed());
        }
    }

    fn on_malformed_output(&self, reason: &str) {
        self.clear_spinner();
        println!(
            "{}",
            ConsoleFormatter::notice(&format!("[retry] could not parse reply: {}", reason))
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summarize_prefers_command() {
        let shell = ToolCall::new("execute_shell_command").with_arg("command", "ls -la");
        assert_eq!(TurnProgressReporter::summarize(&shell), "ls -la");

        let read = ToolCall::new("read_file").with_arg("path", "src/lib.rs");
        assert_eq!(TurnProgressReporter::summarize(&read), "src/lib.rs");

        assert_eq!(TurnProgressReporter::summarize(&ToolCall::new("x")), "");
    }

    #[test]
    fn test_spinner_cleared_outside_reasoning() {
        let reporter = TurnProgressReporter::quiet();
        reporter.on_phase_change(TurnPhase::Reasoning);
        assert!(reporter.lock().is_none());

        let reporter = TurnProgressReporter::new();
        reporter.on_phase_change(TurnPhase::Reasoning);
        assert!(reporter.lock().is_some());
        reporter.on_phase_change(TurnPhase::Done);
        assert!(reporter.lock().is_none());
    }
}
