//! Reply Types
//!
//! Replies are rendered as newline-terminated text, one reply per command:
//!
//! - Text: `<text>\n`
//! - Error: `ERR <message>\n`
//! - Lines: `1) <line>\n2) <line>\n...`, or `(empty)\n` with no lines
//! - Quit: `bye\n`

use std::fmt::{self, Write as _};

/// Prefix written before error messages.
pub const ERROR_PREFIX: &str = "ERR ";

/// A reply to a single command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// A single line of text
    Text(String),

    /// A numbered list, e.g. tokens or known commands
    Lines(Vec<String>),

    /// A user-facing error
    Error(String),

    /// The session should end
    Quit,
}

impl Reply {
    pub fn text(s: impl Into<String>) -> Self {
        Reply::Text(s.into())
    }

    pub fn error(s: impl Into<String>) -> Self {
        Reply::Error(s.into())
    }

    pub fn lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Reply::Lines(lines.into_iter().map(Into::into).collect())
    }

    /// Common reply for `ping`
    pub fn pong() -> Self {
        Reply::Text("pong".to_string())
    }

    /// Serializes the reply to its wire text.
    pub fn serialize(&self) -> String {
        let mut buf = String::new();
        self.serialize_into(&mut buf);
        buf
    }

    /// Serializes the reply into an existing buffer.
    pub fn serialize_into(&self, buf: &mut String) {
        match self {
            Reply::Text(s) => {
                buf.push_str(s);
                buf.push('\n');
            }
            Reply::Error(s) => {
                buf.push_str(ERROR_PREFIX);
                buf.push_str(s);
                buf.push('\n');
            }
            Reply::Lines(lines) if lines.is_empty() => buf.push_str("(empty)\n"),
            Reply::Lines(lines) => {
                for (i, line) in lines.iter().enumerate() {
                    let _ = writeln!(buf, "{}) {}", i + 1, line);
                }
            }
            Reply::Quit => buf.push_str("bye\n"),
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Reply::Error(_))
    }

    pub fn is_quit(&self) -> bool {
        matches!(self, Reply::Quit)
    }
}

impl fmt::Display for Reply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reply::Text(s) => write!(f, "{}", s),
            Reply::Error(s) => write!(f, "(error) {}", s),
            Reply::Lines(lines) => write!(f, "({} lines)", lines.len()),
            Reply::Quit => write!(f, "(quit)"),
        }
    }
}
