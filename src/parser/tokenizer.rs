//! Quote- and Escape-Aware Tokenizer
//!
//! Splits a string into fields on a delimiter character.
//!
//! ## Rules
//!
//! - A delimiter ends the current field. Consecutive delimiters produce empty
//!   fields; a trailing delimiter does not.
//! - A quote character opens a quoted section and the same character closes
//!   it. Quote characters are not kept. Delimiters inside a quoted section are
//!   ordinary text.
//! - An escape character followed by a delimiter or quote character yields
//!   that character literally. Inside a quoted section only quotes can be
//!   escaped. Any other escape is kept as-is.
//!
//! ## State Machine
//!
//! ```text
//!            quote char
//!   ┌────────┐ ──────> ┌─────────┐
//!   │ Normal │         │ InQuote │
//!   └────────┘ <────── └─────────┘
//!          same quote char
//! ```
//!
//! The scan is a single forward pass with one character of lookahead for
//! escapes.

use std::iter::Peekable;
use std::str::Chars;
use thiserror::Error;

/// Default field delimiter.
pub const DEFAULT_DELIMITER: char = ' ';

/// Default escape character.
pub const DEFAULT_ESCAPE: char = '\\';

/// Default quote characters.
pub const DEFAULT_QUOTES: &[char] = &['"'];

/// Errors that can occur while tokenizing.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TokenizeError {
    /// Input ended inside a quoted section. `partial` holds every token
    /// produced, including the unterminated fragment.
    #[error("unmatched quote in input ({} partial tokens)", .partial.len())]
    UnmatchedQuote { partial: Vec<String> },
}

impl TokenizeError {
    /// The tokens accumulated before the error.
    pub fn partial_tokens(&self) -> &[String] {
        match self {
            TokenizeError::UnmatchedQuote { partial } => partial,
        }
    }
}

/// Result type for tokenizing.
pub type TokenizeResult<T> = Result<T, TokenizeError>;

/// Scanner state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Normal,
    /// Inside a section opened by the given quote character
    InQuote(char),
}

/// A reusable tokenizer configuration.
///
/// # Example
///
/// ```
/// use linecmd::parser::Tokenizer;
///
/// let tokens = Tokenizer::default().tokenize(r#"a "b c" d\ e"#).unwrap();
/// assert_eq!(tokens, vec!["a", "b c", "d e"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tokenizer {
    delimiter: char,
    escape: char,
    quotes: Vec<char>,
}

impl Tokenizer {
    pub fn new(delimiter: char, escape: char, quotes: impl Into<Vec<char>>) -> Self {
        Self {
            delimiter,
            escape,
            quotes: quotes.into(),
        }
    }

    pub fn delimiter(&self) -> char {
        self.delimiter
    }

    pub fn escape(&self) -> char {
        self.escape
    }

    pub fn quotes(&self) -> &[char] {
        &self.quotes
    }

    /// Splits `input` into tokens.
    ///
    /// # Errors
    ///
    /// Returns [`TokenizeError::UnmatchedQuote`] if input ends inside quotes.
    pub fn tokenize(&self, input: &str) -> TokenizeResult<Vec<String>> {
        tokenize(input, self.delimiter, self.escape, &self.quotes)
    }
}

impl Default for Tokenizer {
    fn default() -> Self {
        Self::new(DEFAULT_DELIMITER, DEFAULT_ESCAPE, DEFAULT_QUOTES)
    }
}

/// Splits `input` into `delimiter`-separated tokens, honoring quoted sections
/// and `escape` sequences.
///
/// # Errors
///
/// Returns [`TokenizeError::UnmatchedQuote`] if input ends inside quotes.
pub fn tokenize(
    input: &str,
    delimiter: char,
    escape: char,
    quotes: &[char],
) -> TokenizeResult<Vec<String>> {
    let is_quote = |c: char| quotes.contains(&c);

    let mut tokens = Vec::with_capacity(input.matches(delimiter).count() + 1);
    let mut buffer = String::with_capacity(input.len());
    let mut state = State::Normal;
    let mut chars = input.chars().peekable();

    while let Some(c) = chars.next() {
        match state {
            State::InQuote(open) => {
                if c == open {
                    state = State::Normal;
                } else if c == escape && next_is(&mut chars, is_quote) {
                    push_next(&mut chars, &mut buffer);
                } else {
                    buffer.push(c);
                }
            }
            State::Normal => {
                if c == delimiter {
                    tokens.push(std::mem::take(&mut buffer));
                } else if is_quote(c) {
                    state = State::InQuote(c);
                } else if c == escape && next_is(&mut chars, |n| n == delimiter || is_quote(n)) {
                    push_next(&mut chars, &mut buffer);
                } else {
                    buffer.push(c);
                }
            }
        }
    }

    if !buffer.is_empty() {
        tokens.push(buffer);
    }

    if let State::InQuote(_) = state {
        return Err(TokenizeError::UnmatchedQuote { partial: tokens });
    }

    Ok(tokens)
}

#[inline]
fn next_is(chars: &mut Peekable<Chars<'_>>, pred: impl Fn(char) -> bool) -> bool {
    chars.peek().is_some_and(|&n| pred(n))
}

/// Consumes the next character into the buffer.
#[inline]
fn push_next(chars: &mut Peekable<Chars<'_>>, buffer: &mut String) {
    if let Some(n) = chars.next() {
        buffer.push(n);
    }
}
