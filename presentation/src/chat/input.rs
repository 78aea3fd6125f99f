//! Classification of REPL input lines.

/// A REPL meta-command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MetaCommand {
    Exit,
    Clear,
    Save,
    List,
    /// `/basedir` alone shows the current value
    BaseDir(Option<String>),
    Help,
    Chat,
}

impl MetaCommand {
    /// Parse a `/command [args]` line. Unknown commands yield `None`.
    pub fn parse(line: &str) -> Option<Self> {
        let line = line.trim();
        let (head, rest) = match line.split_once(char::is_whitespace) {
            Some((head, rest)) => (head, rest.trim()),
            None => (line, ""),
        };

        let command = match head.to_lowercase().as_str() {
            "/exit" => MetaCommand::Exit,
            "/clear" => MetaCommand::Clear,
            "/save" => MetaCommand::Save,
            "/list" => MetaCommand::List,
            "/basedir" => MetaCommand::BaseDir((!rest.is_empty()).then(|| rest.to_string())),
            "/help" => MetaCommand::Help,
            "/chat" => MetaCommand::Chat,
            _ => return None,
        };
        Some(command)
    }
}

/// What one submitted line asks for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplInput {
    Empty,
    Command(MetaCommand),
    /// `@<query>`: pick a file to attach
    Attach(String),
    Chat(String),
}

impl ReplInput {
    pub fn classify(line: &str) -> Self {
        let line = line.trim();
        if line.is_empty() {
            return ReplInput::Empty;
        }
        if let Some(query) = line.strip_prefix('@') {
            return ReplInput::Attach(query.trim().to_string());
        }
        if line.starts_with('/')
            && let Some(command) = MetaCommand::parse(line)
        {
            return ReplInput::Command(command);
        }
        ReplInput::Chat(line.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_commands_are_case_insensitive() {
        assert_eq!(ReplInput::classify("/EXIT"), ReplInput::Command(MetaCommand::Exit));
        assert_eq!(ReplInput::classify("  /List "), ReplInput::Command(MetaCommand::List));
        assert_eq!(ReplInput::classify("/Chat"), ReplInput::Command(MetaCommand::Chat));
    }

    #[test]
    fn test_basedir_argument() {
        assert_eq!(MetaCommand::parse("/basedir"), Some(MetaCommand::BaseDir(None)));
        assert_eq!(
            MetaCommand::parse("/BaseDir  ../My Project "),
            Some(MetaCommand::BaseDir(Some("../My Project".to_string())))
        );
    }

    #[test]
    fn test_unknown_command_is_chat() {
        assert_eq!(
            ReplInput::classify("/usr/bin is on PATH?"),
            ReplInput::Chat("/usr/bin is on PATH?".to_string())
        );
        assert_eq!(ReplInput::classify("/saveall"), ReplInput::Chat("/saveall".to_string()));
    }

    #[test]
    fn test_attach_and_chat() {
        assert_eq!(ReplInput::classify("@main"), ReplInput::Attach("main".to_string()));
        assert_eq!(ReplInput::classify("@"), ReplInput::Attach(String::new()));
        assert_eq!(
            ReplInput::classify("what is in src?"),
            ReplInput::Chat("what is in src?".to_string())
        );
        assert_eq!(ReplInput::classify("   "), ReplInput::Empty);
    }
}
