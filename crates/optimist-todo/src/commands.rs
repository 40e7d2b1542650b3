//! Line commands for the interactive loop.

use thiserror::Error;

/// A parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `add <text>`
    Add(String),
    /// `rm <id>` / `remove <id>`
    Remove(u64),
    /// `ls` / `list`
    List,
    /// `quit` / `exit` / `q`
    Quit,
}

/// Parse failures surfaced at the prompt.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// Blank input line.
    #[error("empty input")]
    Empty,
    /// First word is not a known command.
    #[error("unknown command: {0}")]
    Unknown(String),
    /// `add` without any text.
    #[error("add needs text")]
    MissingText,
    /// `rm` with a non-numeric id.
    #[error("rm needs a numeric id, got {0:?}")]
    BadId(String),
}

/// Parse one input line into a [`Command`].
pub fn parse_command(line: &str) -> Result<Command, ParseError> {
    let line = line.trim();
    if line.is_empty() {
        return Err(ParseError::Empty);
    }

    let (head, rest) = match line.split_once(char::is_whitespace) {
        Some((head, rest)) => (head, rest.trim()),
        None => (line, ""),
    };

    match head {
        "add" => {
            if rest.is_empty() {
                Err(ParseError::MissingText)
            } else {
                Ok(Command::Add(rest.to_string()))
            }
        }
        "rm" | "remove" => rest
            .parse::<u64>()
            .map(Command::Remove)
            .map_err(|_| ParseError::BadId(rest.to_string())),
        "ls" | "list" => Ok(Command::List),
        "quit" | "exit" | "q" => Ok(Command::Quit),
        other => Err(ParseError::Unknown(other.to_string())),
    }
}
