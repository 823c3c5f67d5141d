/// Slash commands the bot understands.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Start,
    Help,
    Calc(String),
    Note(String),
    Notes,
    Read(String),
    Unknown(String),
}

impl Command {
    /// Name for logs; never includes the argument.
    pub fn name(&self) -> &str {
        match self {
            Self::Start => "start",
            Self::Help => "help",
            Self::Calc(_) => "calc",
            Self::Note(_) => "note",
            Self::Notes => "notes",
            Self::Read(_) => "read",
            Self::Unknown(name) => name,
        }
    }
}

/// Parse a `/command args` line. Returns `None` for plain text.
pub fn parse_command(text: &str) -> Option<Command> {
    let text = text.trim();
    if !text.starts_with('/') {
        return None;
    }

    // Telegram may send `/cmd@botname arg1 ...`
    let mut parts = text.splitn(2, char::is_whitespace);
    let first = parts.next().unwrap_or("");
    let rest = parts.next().unwrap_or("").trim().to_string();

    let name = first
        .trim_start_matches('/')
        .split('@')
        .next()
        .unwrap_or("")
        .to_lowercase();

    let cmd = match name.as_str() {
        "start" => Command::Start,
        "help" => Command::Help,
        "calc" => Command::Calc(rest),
        "note" => Command::Note(rest),
        "notes" => Command::Notes,
        "read" => Command::Read(rest),
        _ => Command::Unknown(name),
    };
    Some(cmd)
}
