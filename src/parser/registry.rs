//! Known-Command Registry
//!
//! The registry is the only stateful piece of the parser. It remembers which
//! command words are recognized and applies a single canonicalization rule
//! to every insertion and lookup:
//!
//! - **Case-insensitive** registries store and compare the lower-cased form.
//! - **Case-sensitive** registries store and compare the literal form.
//!
//! Entries are never removed. A registry is meant to be owned by one session;
//! callers sharing it must serialize `learn` against lookups themselves.

use std::borrow::Cow;
use std::collections::HashSet;
use tracing::trace;

/// The set of command words a parser recognizes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandRegistry {
    /// Prefix that marks a line as a command (may be empty)
    indicator: String,

    /// Whether command words are compared literally
    case_sensitive: bool,

    /// Canonicalized command words
    known: HashSet<String>,
}

impl CommandRegistry {
    /// Creates a registry and learns each of `initial` through [`learn`](Self::learn).
    ///
    /// # Example
    ///
    /// ```
    /// use linecmd::parser::CommandRegistry;
    ///
    /// let registry = CommandRegistry::new("!", false, ["Roll", "help"]);
    /// assert!(registry.is_known("ROLL"));
    /// assert_eq!(registry.indicator(), "!");
    /// ```
    pub fn new<I, S>(indicator: impl Into<String>, case_sensitive: bool, initial: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut registry = Self {
            indicator: indicator.into(),
            case_sensitive,
            known: HashSet::new(),
        };

        for cmd in initial {
            registry.learn(cmd.as_ref());
        }

        registry
    }

    /// Adds `cmd` to the known set. Learning the same word twice is a no-op.
    pub fn learn(&mut self, cmd: &str) {
        let key = self.canonicalize(cmd).into_owned();
        trace!(command = %key, "learning command");
        self.known.insert(key);
    }

    /// Returns true if `cmd` was learned, comparing per the case policy.
    pub fn is_known(&self, cmd: &str) -> bool {
        self.known.contains(self.canonicalize(cmd).as_ref())
    }

    /// Returns the command-indicator prefix.
    pub fn indicator(&self) -> &str {
        &self.indicator
    }

    /// Returns true if command words are compared literally.
    pub fn is_case_sensitive(&self) -> bool {
        self.case_sensitive
    }

    /// Applies the registry's case policy to `cmd`.
    pub fn canonicalize<'a>(&self, cmd: &'a str) -> Cow<'a, str> {
        if self.case_sensitive {
            Cow::Borrowed(cmd)
        } else {
            Cow::Owned(cmd.to_lowercase())
        }
    }

    /// Number of distinct canonical commands.
    pub fn len(&self) -> usize {
        self.known.len()
    }

    pub fn is_empty(&self) -> bool {
        self.known.is_empty()
    }

    /// Iterates over the stored (canonical) command words in no particular order.
    pub fn commands(&self) -> impl Iterator<Item = &str> {
        self.known.iter().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stored(registry: &CommandRegistry) -> Vec<&str> {
        let mut cmds: Vec<&str> = registry.commands().collect();
        cmds.sort_unstable();
        cmds
    }

    #[test]
    fn test_new_empty() {
        let registry = CommandRegistry::new("!", false, Vec::<String>::new());
        assert!(registry.is_empty());
        assert_eq!(registry.indicator(), "!");
        assert!(!registry.is_case_sensitive());
    }

    #[test]
    fn test_new_preloads_commands() {
        let registry = CommandRegistry::new("!", true, ["foo", "bar"]);
        assert_eq!(stored(&registry), vec!["bar", "foo"]);
        assert!(registry.is_case_sensitive());
    }

    #[test]
    fn test_indicator_is_configurable() {
        let registry = CommandRegistry::new("%", false, ["foo"]);
        assert_eq!(registry.indicator(), "%");

        let registry = CommandRegistry::new("", false, ["foo"]);
        assert_eq!(registry.indicator(), "");
    }

    #[test]
    fn test_learn_insensitive_stores_lowercase() {
        let mut registry = CommandRegistry::new("!", false, ["foo"]);
        registry.learn("BAR");
        assert_eq!(stored(&registry), vec!["bar", "foo"]);
    }

    #[test]
    fn test_learn_sensitive_stores_literal() {
        let mut registry = CommandRegistry::new("!", true, ["foo"]);
        registry.learn("BAR");
        assert_eq!(stored(&registry), vec!["BAR", "foo"]);
        assert!(!registry.is_known("bar"));
    }

    #[test]
    fn test_is_known_insensitive() {
        let registry = CommandRegistry::new("!", false, ["foo"]);
        assert!(registry.is_known("foo"));
        assert!(registry.is_known("FOO"));
        assert!(registry.is_known("fOo"));
        assert!(!registry.is_known("fool"));
    }

    #[test]
    fn test_is_known_sensitive() {
        let registry = CommandRegistry::new("!", true, ["foo"]);
        assert!(registry.is_known("foo"));
        assert!(!registry.is_known("FOO"));
        assert!(!registry.is_known("fool"));
    }

    #[test]
    fn test_insensitive_lookup_matches_lowercased_lookup() {
        let registry = CommandRegistry::new("!", false, ["foo", "Quit", "ÉCHO"]);
        for s in ["foo", "FOO", "quit", "QUIT", "écho", "ÉCHO", "nope", ""] {
            assert_eq!(registry.is_known(s), registry.is_known(&s.to_lowercase()), "{s}");
        }
    }

    #[test]
    fn test_learn_is_monotonic() {
        let mut registry = CommandRegistry::new("!", false, Vec::<&str>::new());
        registry.learn("one");
        assert!(registry.is_known("one"));

        for cmd in ["two", "three", "four"] {
            registry.learn(cmd);
            assert!(registry.is_known("one"));
            assert!(registry.is_known(cmd));
        }
    }

    #[test]
    fn test_learn_is_idempotent() {
        let mut once = CommandRegistry::new("!", false, ["foo"]);
        let mut twice = once.clone();

        once.learn("Bar");
        twice.learn("Bar");
        twice.learn("Bar");

        assert_eq!(once, twice);
        assert_eq!(twice.len(), 2);
    }

    #[test]
    fn test_empty_command_is_a_valid_entry() {
        let mut registry = CommandRegistry::new("", false, Vec::<&str>::new());
        assert!(!registry.is_known(""));
        registry.learn("");
        assert!(registry.is_known(""));
    }
}
