//! Session command parsing

/// A recognized control command for the active session clock
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// `p` - pause the countdown
    Pause,
    /// `r` - resume a paused countdown
    Resume,
    /// `s` - stop the countdown
    Stop,
    /// `x` - reset, restarting when the clock had been running
    Reset,
    /// `q` - quit the session and the whole run
    Quit,
}

/// Result of parsing one line of command input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedInput {
    /// A recognized command
    Command(Command),
    /// Blank line, ignored without comment
    Empty,
    /// Anything else, reported once and re-prompted
    Unknown(String),
}

/// Parse one line of input. Commands are trimmed and case-insensitive.
pub fn parse_input(line: &str) -> ParsedInput {
    let normalized = line.trim().to_lowercase();

    match normalized.as_str() {
        "" => ParsedInput::Empty,
        "p" => ParsedInput::Command(Command::Pause),
        "r" => ParsedInput::Command(Command::Resume),
        "s" => ParsedInput::Command(Command::Stop),
        "x" => ParsedInput::Command(Command::Reset),
        "q" => ParsedInput::Command(Command::Quit),
        _ => ParsedInput::Unknown(normalized),
    }
}
