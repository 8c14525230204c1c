//! Command Recognition and Tokenization
//!
//! This module is the pure, synchronous core of linecmd. Nothing here does I/O.
//!
//! ## Modules
//!
//! - `registry`: `CommandRegistry`, the set of known command words
//! - `command`: `CommandParser`, classifies a line as a command and splits it
//! - `tokenizer`: quote- and escape-aware field splitting
//! - `count`: trailing repeat-count extraction
//!
//! The pieces are independent. Applications compose them as their grammar
//! requires, typically by parsing the command first and then tokenizing or
//! count-splitting the rest.
//!
//! ## Example
//!
//! ```
//! use linecmd::parser::{split_trailing_count, CommandParser, ParserOptions, Tokenizer};
//!
//! let parser = CommandParser::new(ParserOptions {
//!     known_commands: vec!["say".to_string()],
//!     ..Default::default()
//! });
//!
//! let parsed = parser.parse_command(r#"!say "hello world" x2"#).unwrap();
//! assert_eq!(parsed.command, "say");
//!
//! let split = split_trailing_count(parsed.rest);
//! assert_eq!(split.value(), Some(2));
//!
//! let args = Tokenizer::default().tokenize(split.text.trim_end()).unwrap();
//! assert_eq!(args, vec!["hello world"]);
//! ```

pub mod command;
pub mod count;
pub mod registry;
pub mod tokenizer;

// Re-export commonly used types for convenience
pub use command::{
    CommandError, CommandParser, CommandResult, ParsedCommand, ParserOptions, DEFAULT_INDICATOR,
};
pub use count::{split_trailing_count, CountSplit};
pub use registry::CommandRegistry;
pub use tokenizer::{tokenize, TokenizeError, TokenizeResult, Tokenizer};
