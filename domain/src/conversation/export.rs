//! Text renderings of a conversation.

use super::entities::Turn;

/// File name used by `/save` for a given timestamp.
pub fn export_file_name(timestamp: &str) -> String {
    format!("chathistory_{}.md", timestamp)
}

/// Render turns as a markdown document.
///
/// Each message is a labeled section followed by a `---` rule.
pub fn render_markdown(turns: &[Turn], timestamp: &str) -> String {
    let mut out = format!("# Chat history ({})\n\n", timestamp);
    for turn in turns {
        out.push_str(&format!("**Human:**\n{}\n\n---\n\n", turn.input()));
        out.push_str(&format!("**AI:**\n{}\n\n---\n\n", turn.output()));
    }
    out
}

/// Plain-text rendering for the console, without colors.
pub fn render_listing(turns: &[Turn]) -> String {
    if turns.is_empty() {
        return "No chat history (0 turns).".to_string();
    }

    let mut out = format!("--- Chat history ({} turns) ---\n", turns.len());
    for turn in turns {
        out.push_str(&format!("\nHuman:\n{}\n", turn.input()));
        out.push_str(&format!("\nAI:\n{}\n", turn.output()));
    }
    out.push_str("\n--- End of history ---");
    out
}
