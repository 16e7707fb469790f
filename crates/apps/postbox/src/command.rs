//! Console command parsing

/// A single line of user input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Login { identity: String, secret: Option<String> },
    List,
    Refresh,
    Search(String),
    /// 1-based position in the last listing
    Open(usize),
    Compose,
    To(String),
    Subject(String),
    Body(String),
    Send,
    Back,
    Help,
    Quit,
    Empty,
}

impl Command {
    pub fn parse(line: &str) -> Result<Self, String> {
        let line = line.trim_end_matches(['\r', '\n']);
        let (word, rest) = match line.trim_start().split_once(' ') {
            Some((word, rest)) => (word, rest.trim()),
            None => (line.trim(), ""),
        };

        let command = match word.to_ascii_lowercase().as_str() {
            "" => Command::Empty,
            "login" => {
                let mut parts = rest.splitn(2, ' ');
                let identity = parts.next().unwrap_or_default().to_string();
                let secret = parts.next().map(|s| s.trim().to_string()).filter(|s| !s.is_empty());
                Command::Login { identity, secret }
            }
            "list" | "ls" => Command::List,
            "refresh" | "r" => Command::Refresh,
            "search" | "/" => Command::Search(rest.to_string()),
            "open" | "o" => {
                let index = rest
                    .parse::<usize>()
                    .ok()
                    .filter(|&n| n > 0)
                    .ok_or_else(|| format!("Expected a message number, got '{}'", rest))?;
                Command::Open(index)
            }
            "compose" | "c" => Command::Compose,
            "to" => Command::To(rest.to_string()),
            "subject" => Command::Subject(rest.to_string()),
            "body" => Command::Body(rest.to_string()),
            "send" => Command::Send,
            "back" | "cancel" => Command::Back,
            "help" | "?" => Command::Help,
            "quit" | "exit" | "q" => Command::Quit,
            other => return Err(format!("Unknown command '{}'. Type 'help'.", other)),
        };
        Ok(command)
    }
}
