//! # linecmd - Command Recognition for Line-Oriented Front Ends
//!
//! linecmd decides whether an input line is a command and, if so, splits it
//! into a command name and structured arguments. It is meant for chat bots,
//! REPLs and protocol front ends that read one line at a time.
//!
//! ## Features
//!
//! - **Command Registry**: Known commands with a fixed case-sensitivity policy
//! - **Command Parser**: Indicator-prefix detection and command-word lookup
//! - **Tokenizer**: Delimiter splitting with quoted sections and escapes
//! - **Count Extractor**: Trailing repeat counts like `x3`, `+3`, `-3`
//! - **Session Loop**: An async REPL over any reader/writer pair
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                              linecmd                                    │
//! │                                                                         │
//! │  ┌─────────────┐    ┌─────────────┐    ┌──────────────────────────┐    │
//! │  │  Session    │───>│  Command    │───>│        parser            │    │
//! │  │  (async)    │    │  Handler    │    │                          │    │
//! │  └─────────────┘    └─────────────┘    │  CommandParser           │    │
//! │                                        │    └─ CommandRegistry    │    │
//! │                                        │  Tokenizer               │    │
//! │                                        │  split_trailing_count    │    │
//! │                                        └──────────────────────────┘    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The `parser` module is pure and synchronous. `commands` and `session` show
//! one way an application composes it.
//!
//! ## Quick Start
//!
//! ```
//! use linecmd::parser::{CommandError, CommandParser, ParserOptions};
//!
//! let mut parser = CommandParser::new(ParserOptions {
//!     indicator: "!".to_string(),
//!     known_commands: vec!["foo".to_string()],
//!     ..Default::default()
//! });
//!
//! assert_eq!(parser.parse_command("!FOO").unwrap().command, "foo");
//! assert_eq!(
//!     parser.parse_command("!bar"),
//!     Err(CommandError::UnknownCommand("bar".to_string()))
//! );
//! assert_eq!(parser.parse_command("foo"), Err(CommandError::NotACommand));
//!
//! parser.learn("bar");
//! assert!(parser.parse_command("!bar").is_ok());
//! ```
//!
//! ## Module Overview
//!
//! - [`parser`]: Registry, command parser, tokenizer and count extractor
//! - [`commands`]: Built-in REPL commands and the reply type
//! - [`session`]: Async line-oriented session loop

pub mod commands;
pub mod parser;
pub mod session;

// Re-export commonly used types for convenience
pub use commands::{CommandHandler, Reply};
pub use parser::{
    split_trailing_count, tokenize, CommandError, CommandParser, CommandRegistry, CountSplit,
    ParsedCommand, ParserOptions, TokenizeError, Tokenizer,
};
pub use session::{Session, SessionError, SessionStats};

/// Version of linecmd
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
