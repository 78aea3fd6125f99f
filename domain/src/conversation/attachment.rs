//! File attachments submitted as a single chat input.

use serde::{Deserialize, Serialize};

/// A file read for the `@<query>` flow, possibly truncated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    /// Path relative to the base directory, as listed
    pub name: String,
    pub content: String,
    pub truncated: bool,
}

impl Attachment {
    /// The chat input asking `question` about this file.
    pub fn compose_prompt(&self, question: &str) -> String {
        format!(
            "Please answer the question using the following file:\n\n[File: {}]\n```\n{}\n```\n\n[Question]\n{}",
            self.name, self.content, question
        )
    }
}

/// Keep candidates whose path contains `query`, ignoring case.
/// An empty query keeps everything.
pub fn filter_candidates(files: &[String], query: &str) -> Vec<String> {
    let needle = query.trim().to_lowercase();
    files
        .iter()
        .filter(|f| needle.is_empty() || f.to_lowercase().contains(&needle))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_is_case_insensitive() {
        let files = vec![
            "README.md".to_string(),
            "src/main.rs".to_string(),
            "src/nested/Util.rs".to_string(),
        ];
        assert_eq!(filter_candidates(&files, "util"), vec!["src/nested/Util.rs"]);
        assert_eq!(filter_candidates(&files, "SRC").len(), 2);
        assert_eq!(filter_candidates(&files, "").len(), 3);
        assert!(filter_candidates(&files, "missing").is_empty());
    }

    #[test]
    fn test_compose_prompt() {
        let attachment = Attachment {
            name: "src/main.rs".to_string(),
            content: "fn main() {}".to_string(),
            truncated: false,
        };
        assert_eq!(
            attachment.compose_prompt("What does this do?"),
            "Please answer the question using the following file:\n\n[File: src/main.rs]\n```\nfn main() {}\n```\n\n[Question]\nWhat does this do?"
        );
    }
}
