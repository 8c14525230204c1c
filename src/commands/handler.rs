//! Built-in Command Handler
//!
//! This module implements the built-in commands of the linecmd REPL. It shows
//! how an application composes the parser core: the command word comes from
//! [`CommandParser`], and each handler further splits the rest of the line
//! with the tokenizer or the count extractor as its grammar requires.
//!
//! ## Supported Commands
//!
//! - `help` / `commands` - List known commands
//! - `learn name` - Register a new command
//! - `known name` - Check whether a command is registered
//! - `tokenize text` - Split text into quoted/escaped tokens
//! - `count text` - Show the trailing count split of text
//! - `repeat text [count]` - Echo text, repeated by its trailing count
//! - `ping [message]` - Test the session
//! - `quit` / `exit` - End the session
//!
//! Any other learned command is acknowledged together with its arguments.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     CommandHandler                          │
//! │                                                             │
//! │  ┌────────────────┐    ┌─────────────┐    ┌─────────────┐   │
//! │  │ parse_command()│───>│  dispatch() │───>│  cmd_*()    │   │
//! │  └────────────────┘    └─────────────┘    └─────────────┘   │
//! │                                               │             │
//! │                                               ▼             │
//! │                                   Tokenizer / CountSplit    │
//! └─────────────────────────────────────────────────────────────┘
//! ```

use crate::commands::reply::Reply;
use crate::parser::{
    split_trailing_count, CommandError, CommandParser, ParserOptions, Tokenizer,
};
use tracing::{debug, trace};

/// Commands every handler knows from the start.
pub const BUILTIN_COMMANDS: &[&str] = &[
    "help", "commands", "learn", "known", "tokenize", "count", "repeat", "ping", "quit", "exit",
];

/// Upper bound for `repeat` counts.
pub const MAX_REPEAT: i64 = 100;

/// Handles command lines by dispatching them to the built-in handlers.
#[derive(Debug, Clone)]
pub struct CommandHandler {
    /// Classifies lines and owns the known-command registry
    parser: CommandParser,
    /// Splits arguments for `tokenize`
    tokenizer: Tokenizer,
}

impl CommandHandler {
    /// Creates a handler. The built-in commands are learned in addition to
    /// `options.known_commands`.
    pub fn new(mut options: ParserOptions) -> Self {
        options
            .known_commands
            .extend(BUILTIN_COMMANDS.iter().map(|c| c.to_string()));

        Self {
            parser: CommandParser::new(options),
            tokenizer: Tokenizer::default(),
        }
    }

    /// Replaces the tokenizer used by `tokenize`.
    pub fn with_tokenizer(mut self, tokenizer: Tokenizer) -> Self {
        self.tokenizer = tokenizer;
        self
    }

    pub fn parser(&self) -> &CommandParser {
        &self.parser
    }

    /// Executes a line and returns the reply.
    ///
    /// # Returns
    ///
    /// `None` if the line is not addressed as a command. Such lines are
    /// ordinary text and are silently ignored.
    pub fn execute(&mut self, line: &str) -> Option<Reply> {
        let parsed = match self.parser.parse_command(line) {
            Ok(parsed) => parsed,
            Err(CommandError::NotACommand) => {
                trace!("ignoring non-command line");
                return None;
            }
            Err(CommandError::UnknownCommand(cmd)) => {
                debug!(command = %cmd, "unknown command");
                return Some(Reply::error(format!("unknown command '{}'", cmd)));
            }
        };

        debug!(command = %parsed.command, "executing command");
        Some(self.dispatch(&parsed.command, parsed.rest))
    }

    /// Dispatches a command to its handler.
    fn dispatch(&mut self, cmd: &str, rest: &str) -> Reply {
        match cmd {
            "help" | "commands" => self.cmd_help(),
            "learn" => self.cmd_learn(rest),
            "known" => self.cmd_known(rest),
            "tokenize" => self.cmd_tokenize(rest),
            "count" => self.cmd_count(rest),
            "repeat" => self.cmd_repeat(rest),
            "ping" => self.cmd_ping(rest),
            "quit" | "exit" => Reply::Quit,

            // Learned at runtime, no built-in behavior
            _ if rest.is_empty() => Reply::text(format!("ok: {}", cmd)),
            _ => Reply::text(format!("ok: {} ({})", cmd, rest)),
        }
    }

    /// help
    fn cmd_help(&self) -> Reply {
        let indicator = self.parser.indicator();
        let mut commands: Vec<&str> = self.parser.registry().commands().collect();
        commands.sort_unstable();

        Reply::lines(
            commands
                .into_iter()
                .map(|cmd| format!("{}{}", indicator, cmd)),
        )
    }

    /// learn name
    fn cmd_learn(&mut self, rest: &str) -> Reply {
        let name = rest.trim();
        if name.is_empty() {
            return Reply::error("wrong number of arguments for 'learn'");
        }

        if self.parser.is_known(name) {
            return Reply::text(format!("already known: {}", name));
        }

        self.parser.learn(name);
        debug!(command = %name, "learned command");
        Reply::text(format!("learned: {}", name))
    }

    /// known name
    fn cmd_known(&self, rest: &str) -> Reply {
        let name = rest.trim();
        if name.is_empty() {
            return Reply::error("wrong number of arguments for 'known'");
        }

        if self.parser.is_known(name) {
            Reply::text("yes")
        } else {
            Reply::text("no")
        }
    }

    /// tokenize text
    fn cmd_tokenize(&self, rest: &str) -> Reply {
        match self.tokenizer.tokenize(rest) {
            Ok(tokens) => Reply::Lines(tokens),
            Err(e) => Reply::error(format!("{}: {:?}", e, e.partial_tokens())),
        }
    }

    /// count text
    fn cmd_count(&self, rest: &str) -> Reply {
        let split = split_trailing_count(rest);
        Reply::lines([
            format!("text: {:?}", split.text),
            format!("count: {:?}", split.count),
        ])
    }

    /// repeat text [count]
    fn cmd_repeat(&self, rest: &str) -> Reply {
        let split = split_trailing_count(rest);

        let times = match split.value() {
            None if split.has_count() => return Reply::error("count out of range"),
            None => 1,
            Some(n) if (1..=MAX_REPEAT).contains(&n) => n as usize,
            Some(_) => {
                return Reply::error(format!("count must be between 1 and {}", MAX_REPEAT))
            }
        };

        let text = split.text.trim_end();
        if text.is_empty() {
            return Reply::error("wrong number of arguments for 'repeat'");
        }

        Reply::Lines(vec![text.to_string(); times])
    }

    /// ping [message]
    fn cmd_ping(&self, rest: &str) -> Reply {
        if rest.is_empty() {
            Reply::pong()
        } else {
            Reply::text(rest)
        }
    }
}

impl Default for CommandHandler {
    fn default() -> Self {
        Self::new(ParserOptions::default())
    }
}
