//! Console output for the REPL

use colored::Colorize;
use std::path::Path;
use toolpilot_application::TurnError;

/// Formats REPL messages for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    pub fn welcome(base: &Path, engine: &str) -> String {
        let mut output = String::new();
        output.push('\n');
        output.push_str(&Self::header("toolpilot"));
        output.push_str("\n\n");
        output.push_str(&format!("{} {}\n", "Engine:".bold(), engine));
        output.push_str(&format!("{} {}\n", "Base directory:".bold(), base.display()));
        output.push('\n');
        output.push_str(&Self::help());
        output
    }

    pub fn help() -> String {
        format!(
            "{}\n{}\n",
            "Commands:".cyan().bold(),
            [
                "  /help, /chat       - Show this help",
                "  /list              - Show the conversation so far",
                "  /save              - Save the conversation as markdown in the base directory",
                "  /clear             - Forget the conversation",
                "  /basedir [path]    - Show or change the base directory",
                "  /exit              - Exit",
                "  @<query>           - Attach a file matching <query> and ask about it",
                "",
                "Anything else is sent to the assistant. Ctrl-C cancels a running turn.",
            ]
            .join("\n")
        )
    }

    pub fn answer(text: &str) -> String {
        format!("\n{}\n{}\n", "AI:".green().bold(), text)
    }

    pub fn turn_error(error: &TurnError) -> String {
        match error {
            TurnError::Canceled => format!("{}", "Turn canceled.".yellow()),
            TurnError::BoundExceeded(bound) => {
                format!("{} {}", "Stopped:".red().bold(), bound)
            }
            TurnError::CollaboratorFailure(e) => format!("{} {}", "Error:".red().bold(), e),
        }
    }

    pub fn error(message: &str) -> String {
        format!("{} {}", "Error:".red().bold(), message)
    }

    pub fn notice(message: &str) -> String {
        format!("{}", message.dimmed())
    }

    /// One dimmed line per tool invocation, e.g. `[tool] read_file: src/main.rs`
    pub fn tool_line(tool: &str, summary: &str) -> String {
        if summary.is_empty() {
            format!("{}", format!("[tool] {}", tool).dimmed())
        } else {
            format!("{}", format!("[tool] {}: {}", tool, summary).dimmed())
        }
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use toolpilot_application::ReasoningError;
    use toolpilot_domain::TurnBound;

    #[test]
    fn test_turn_error_messages() {
        colored::control::set_override(false);

        assert_eq!(ConsoleFormatter::turn_error(&TurnError::Canceled), "Turn canceled.");
        assert_eq!(
            ConsoleFormatter::turn_error(&TurnError::BoundExceeded(TurnBound::Iterations(3))),
            "Stopped: iteration limit of 3 reached"
        );
        let failure = TurnError::CollaboratorFailure(ReasoningError::Transport("HTTP 500".into()));
        assert!(ConsoleFormatter::turn_error(&failure).starts_with("Error:"));
    }

    #[test]
    fn test_help_lists_every_command() {
        colored::control::set_override(false);
        let help = ConsoleFormatter::help();
        for command in ["/help", "/chat", "/list", "/save", "/clear", "/basedir", "/exit", "@<query>"] {
            assert!(help.contains(command), "missing {}", command);
        }
    }

    #[test]
    fn test_tool_line() {
        colored::control::set_override(false);
        assert_eq!(
            ConsoleFormatter::tool_line("execute_shell_command", "ls"),
            "[tool] execute_shell_command: ls"
        );
    }
}
