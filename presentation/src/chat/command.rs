//! Slash commands understood by the interactive book

/// One line of REPL input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    /// Anything that is not a command
    Ask(String),
    Help,
    /// Close the book and return to asking
    Again,
    /// Store an API key; empty means none was given
    Key(String),
    /// Remove the stored API key
    Forget,
    /// Switch provider; empty means none was given
    Provider(String),
    Status,
    Quit,
    Unknown(String),
}

impl ReplCommand {
    /// Parse a line of input. Blank lines yield `None`.
    pub fn parse(line: &str) -> Option<Self> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }
        if !line.starts_with('/') {
            return Some(Self::Ask(line.to_string()));
        }

        let (name, arg) = match line.split_once(char::is_whitespace) {
            Some((name, arg)) => (name, arg.trim()),
            None => (line, ""),
        };

        let command = match name {
            "/help" | "/h" | "/?" => Self::Help,
            "/again" | "/a" => Self::Again,
            "/key" => Self::Key(arg.to_string()),
            "/forget" => Self::Forget,
            "/provider" => Self::Provider(arg.to_string()),
            "/status" => Self::Status,
            "/quit" | "/exit" | "/q" => Self::Quit,
            _ => Self::Unknown(name.to_string()),
        };
        Some(command)
    }
}

pub const HELP: &str = "\
Commands:
  /help, /h, /?         - Show this help
  /again, /a            - Close the book and ask something new
  /key <KEY>            - Store an API key (provider detected from the prefix)
  /forget               - Remove the stored API key
  /provider <PROVIDER>  - Switch provider (openai, anthropic)
  /status               - Show provider, key and last error
  /quit, /exit, /q      - Close the book

Anything else is a question.";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_lines_are_ignored() {
        assert_eq!(ReplCommand::parse(""), None);
        assert_eq!(ReplCommand::parse("   \t"), None);
    }

    #[test]
    fn test_plain_text_is_a_question() {
        assert_eq!(
            ReplCommand::parse("  Will it rain?  "),
            Some(ReplCommand::Ask("Will it rain?".to_string()))
        );
    }

    #[test]
    fn test_commands_with_arguments() {
        assert_eq!(
            ReplCommand::parse("/key   sk-ant-abc  "),
            Some(ReplCommand::Key("sk-ant-abc".to_string()))
        );
        assert_eq!(
            ReplCommand::parse("/provider anthropic"),
            Some(ReplCommand::Provider("anthropic".to_string()))
        );
        assert_eq!(ReplCommand::parse("/key"), Some(ReplCommand::Key(String::new())));
    }

    #[test]
    fn test_aliases() {
        assert_eq!(ReplCommand::parse("/q"), Some(ReplCommand::Quit));
        assert_eq!(ReplCommand::parse("/exit"), Some(ReplCommand::Quit));
        assert_eq!(ReplCommand::parse("/?"), Some(ReplCommand::Help));
        assert_eq!(ReplCommand::parse("/a"), Some(ReplCommand::Again));
    }

    #[test]
    fn test_unknown_command() {
        assert_eq!(
            ReplCommand::parse("/summon demons"),
            Some(ReplCommand::Unknown("/summon".to_string()))
        );
    }
}
