//! Command Classification
//!
//! [`CommandParser`] decides whether a line is addressed as a command and, if
//! so, which command word it names.
//!
//! ## How a Line is Classified
//!
//! ```text
//! "!roll 2d6"
//!  │└──┬─┘└┬┘
//!  │   │   └── rest
//!  │   └────── candidate command word
//!  └────────── indicator prefix
//! ```
//!
//! 1. A line that does not start with the indicator is [`CommandError::NotACommand`].
//! 2. The indicator is stripped; what remains is the *body*.
//! 3. The body is split into a candidate and a rest (see [`ParserOptions::split_on_first_space`]).
//! 4. An unregistered candidate is [`CommandError::UnknownCommand`].
//! 5. A registered candidate is returned, lower-cased if the registry is
//!    case-insensitive.
//!
//! Parsing never mutates the registry.

use crate::parser::registry::CommandRegistry;
use thiserror::Error;

/// The default command-indicator prefix.
pub const DEFAULT_INDICATOR: &str = "!";

/// Errors returned when classifying a line.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CommandError {
    /// The line is not addressed as a command at all
    #[error("not a command")]
    NotACommand,

    /// The line is addressed as a command but the word is not registered
    #[error("unknown command: {0}")]
    UnknownCommand(String),
}

/// Result type for command classification.
pub type CommandResult<T> = Result<T, CommandError>;

/// Construction options for a [`CommandParser`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParserOptions {
    /// Prefix that marks a line as a command (may be empty)
    pub indicator: String,

    /// Compare command words literally instead of lower-casing them
    pub case_sensitive: bool,

    /// Commands known from the start
    pub known_commands: Vec<String>,

    /// When true, each space in the body is tried left to right as the end of
    /// the command word and the first registered prefix wins; the whole body
    /// is the candidate only if no prefix is registered. When false, the
    /// whole body is always the candidate.
    pub split_on_first_space: bool,
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self {
            indicator: DEFAULT_INDICATOR.to_string(),
            case_sensitive: false,
            known_commands: Vec::new(),
            split_on_first_space: true,
        }
    }
}

/// A line successfully classified as a known command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedCommand<'a> {
    /// The command word, lower-cased for case-insensitive registries
    pub command: String,

    /// Text after the command word and its separating space
    pub rest: &'a str,
}

/// Classifies lines against a [`CommandRegistry`].
///
/// # Example
///
/// ```
/// use linecmd::parser::{CommandError, CommandParser, ParserOptions};
///
/// let parser = CommandParser::new(ParserOptions {
///     known_commands: vec!["foo".to_string()],
///     ..Default::default()
/// });
///
/// let parsed = parser.parse_command("!FOO bar baz").unwrap();
/// assert_eq!(parsed.command, "foo");
/// assert_eq!(parsed.rest, "bar baz");
///
/// assert_eq!(parser.parse_command("foo"), Err(CommandError::NotACommand));
/// ```
#[derive(Debug, Clone)]
pub struct CommandParser {
    registry: CommandRegistry,
    split_on_first_space: bool,
}

impl CommandParser {
    /// Creates a parser, learning every entry of `options.known_commands`.
    pub fn new(options: ParserOptions) -> Self {
        Self {
            registry: CommandRegistry::new(
                options.indicator,
                options.case_sensitive,
                options.known_commands,
            ),
            split_on_first_space: options.split_on_first_space,
        }
    }

    /// Wraps an existing registry.
    pub fn with_registry(registry: CommandRegistry, split_on_first_space: bool) -> Self {
        Self {
            registry,
            split_on_first_space,
        }
    }

    /// Classifies `line`.
    ///
    /// # Errors
    ///
    /// - [`CommandError::NotACommand`] if the line lacks the indicator prefix,
    ///   or is empty while the empty command is unregistered.
    /// - [`CommandError::UnknownCommand`] carrying the normalized candidate if
    ///   the command word is not registered.
    pub fn parse_command<'a>(&self, line: &'a str) -> CommandResult<ParsedCommand<'a>> {
        if line.is_empty() {
            if self.registry.indicator().is_empty() && self.registry.is_known("") {
                return Ok(ParsedCommand {
                    command: String::new(),
                    rest: line,
                });
            }
            return Err(CommandError::NotACommand);
        }

        let body = line
            .strip_prefix(self.registry.indicator())
            .ok_or(CommandError::NotACommand)?;

        if self.split_on_first_space {
            for (pos, _) in body.match_indices(' ') {
                let candidate = &body[..pos];
                if self.registry.is_known(candidate) {
                    return Ok(ParsedCommand {
                        command: self.normalize(candidate),
                        rest: &body[pos + 1..],
                    });
                }
            }
        }

        if !self.registry.is_known(body) {
            return Err(CommandError::UnknownCommand(self.normalize(body)));
        }

        Ok(ParsedCommand {
            command: self.normalize(body),
            rest: &body[body.len()..],
        })
    }

    /// Registers a new command word.
    pub fn learn(&mut self, cmd: &str) {
        self.registry.learn(cmd);
    }

    /// Returns true if `cmd` is registered.
    pub fn is_known(&self, cmd: &str) -> bool {
        self.registry.is_known(cmd)
    }

    /// Returns the command-indicator prefix.
    pub fn indicator(&self) -> &str {
        self.registry.indicator()
    }

    pub fn is_case_sensitive(&self) -> bool {
        self.registry.is_case_sensitive()
    }

    pub fn splits_on_first_space(&self) -> bool {
        self.split_on_first_space
    }

    /// Read-only access to the underlying registry.
    pub fn registry(&self) -> &CommandRegistry {
        &self.registry
    }

    fn normalize(&self, cmd: &str) -> String {
        self.registry.canonicalize(cmd).into_owned()
    }
}

impl Default for CommandParser {
    fn default() -> Self {
        Self::new(ParserOptions::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parser(indicator: &str, case_sensitive: bool, known: &[&str]) -> CommandParser {
        CommandParser::new(ParserOptions {
            indicator: indicator.to_string(),
            case_sensitive,
            known_commands: known.iter().map(|s| s.to_string()).collect(),
            split_on_first_space: false,
        })
    }

    fn splitting(known: &[&str]) -> CommandParser {
        CommandParser::new(ParserOptions {
            known_commands: known.iter().map(|s| s.to_string()).collect(),
            ..Default::default()
        })
    }

    #[test]
    fn test_default_options() {
        let options = ParserOptions::default();
        assert_eq!(options.indicator, "!");
        assert!(!options.case_sensitive);
        assert!(options.known_commands.is_empty());
        assert!(options.split_on_first_space);
    }

    #[test]
    fn test_known_command() {
        let p = parser("!", false, &["foo"]);
        let parsed = p.parse_command("!foo").unwrap();
        assert_eq!(parsed.command, "foo");
        assert_eq!(parsed.rest, "");
    }

    #[test]
    fn test_known_command_insensitive() {
        let p = parser("!", false, &["foo"]);
        assert_eq!(p.parse_command("!FOO").unwrap().command, "foo");
    }

    #[test]
    fn test_unknown_command() {
        let p = parser("!", false, &["foo"]);
        assert_eq!(
            p.parse_command("!bar"),
            Err(CommandError::UnknownCommand("bar".to_string()))
        );
    }

    #[test]
    fn test_unknown_command_is_normalized() {
        let p = parser("!", false, &["foo"]);
        assert_eq!(
            p.parse_command("!BAR"),
            Err(CommandError::UnknownCommand("bar".to_string()))
        );
    }

    #[test]
    fn test_unknown_command_sensitive() {
        let p = parser("!", true, &["foo"]);
        assert_eq!(
            p.parse_command("!FOO"),
            Err(CommandError::UnknownCommand("FOO".to_string()))
        );
    }

    #[test]
    fn test_known_command_sensitive() {
        let p = parser("!", true, &["FOO"]);
        assert_eq!(p.parse_command("!FOO").unwrap().command, "FOO");
    }

    #[test]
    fn test_not_a_command() {
        let p = parser("?", false, &["foo"]);
        assert_eq!(p.parse_command("!foo"), Err(CommandError::NotACommand));

        let p = parser("!", false, &["foo"]);
        assert_eq!(p.parse_command("foo"), Err(CommandError::NotACommand));
        assert_eq!(p.parse_command(""), Err(CommandError::NotACommand));
    }

    #[test]
    fn test_multi_char_indicator() {
        let p = parser("//", false, &["me"]);
        assert_eq!(p.parse_command("//me").unwrap().command, "me");
        assert_eq!(p.parse_command("/me"), Err(CommandError::NotACommand));
    }

    #[test]
    fn test_indicator_only() {
        let p = parser("!", false, &["foo"]);
        assert_eq!(
            p.parse_command("!"),
            Err(CommandError::UnknownCommand(String::new()))
        );
    }

    #[test]
    fn test_empty_indicator_matches_every_line() {
        let p = parser("", false, &["foo"]);
        assert_eq!(p.parse_command("FOO").unwrap().command, "foo");
        assert_eq!(
            p.parse_command("bar"),
            Err(CommandError::UnknownCommand("bar".to_string()))
        );
    }

    #[test]
    fn test_empty_line_with_empty_indicator() {
        let p = parser("", false, &["foo"]);
        assert_eq!(p.parse_command(""), Err(CommandError::NotACommand));

        let p = parser("", false, &[""]);
        let parsed = p.parse_command("").unwrap();
        assert_eq!(parsed.command, "");
        assert_eq!(parsed.rest, "");
    }

    #[test]
    fn test_empty_line_needs_empty_indicator() {
        let p = parser("!", false, &[""]);
        assert_eq!(p.parse_command(""), Err(CommandError::NotACommand));
    }

    #[test]
    fn test_whole_line_strategy_keeps_spaces() {
        let p = parser("!", false, &["foo"]);
        assert_eq!(
            p.parse_command("!foo bar"),
            Err(CommandError::UnknownCommand("foo bar".to_string()))
        );

        let p = parser("!", false, &["foo bar"]);
        assert_eq!(p.parse_command("!Foo Bar").unwrap().command, "foo bar");
    }

    #[test]
    fn test_split_on_first_space() {
        let p = splitting(&["roll"]);
        let parsed = p.parse_command("!Roll 2d6 +3").unwrap();
        assert_eq!(parsed.command, "roll");
        assert_eq!(parsed.rest, "2d6 +3");
    }

    #[test]
    fn test_split_falls_back_to_whole_body() {
        let p = splitting(&["foo bar"]);
        let parsed = p.parse_command("!foo bar").unwrap();
        assert_eq!(parsed.command, "foo bar");
        assert_eq!(parsed.rest, "");
    }

    #[test]
    fn test_split_tries_later_spaces() {
        let p = splitting(&["set mode"]);
        let parsed = p.parse_command("!set mode fast").unwrap();
        assert_eq!(parsed.command, "set mode");
        assert_eq!(parsed.rest, "fast");
    }

    #[test]
    fn test_split_prefers_leftmost_known() {
        let p = splitting(&["set", "set mode"]);
        let parsed = p.parse_command("!set mode fast").unwrap();
        assert_eq!(parsed.command, "set");
        assert_eq!(parsed.rest, "mode fast");
    }

    #[test]
    fn test_split_unknown_reports_whole_body() {
        let p = splitting(&["foo"]);
        assert_eq!(
            p.parse_command("!bar baz"),
            Err(CommandError::UnknownCommand("bar baz".to_string()))
        );
    }

    #[test]
    fn test_split_keeps_extra_spaces_in_rest() {
        let p = splitting(&["say"]);
        assert_eq!(p.parse_command("!say  hi ").unwrap().rest, " hi ");
    }

    #[test]
    fn test_learn_makes_command_parseable() {
        let mut p = parser("!", false, &[]);
        assert!(matches!(
            p.parse_command("!new"),
            Err(CommandError::UnknownCommand(_))
        ));

        p.learn("NEW");
        assert!(p.is_known("new"));
        assert_eq!(p.parse_command("!new").unwrap().command, "new");
    }

    #[test]
    fn test_forwarded_accessors() {
        let p = parser("%", true, &["a"]);
        assert_eq!(p.indicator(), "%");
        assert!(p.is_case_sensitive());
        assert!(!p.splits_on_first_space());
        assert_eq!(p.registry().len(), 1);
    }

    #[test]
    fn test_with_registry() {
        let registry = CommandRegistry::new("!", false, ["ping"]);
        let p = CommandParser::with_registry(registry, true);
        assert_eq!(p.parse_command("!ping now").unwrap().rest, "now");
    }

    #[test]
    fn test_error_display() {
        assert_eq!(CommandError::NotACommand.to_string(), "not a command");
        assert_eq!(
            CommandError::UnknownCommand("bar".to_string()).to_string(),
            "unknown command: bar"
        );
    }
}
