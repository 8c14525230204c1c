//! Trailing Count Extraction
//!
//! Splits a repeat count off the end of a line, e.g. `"roll d20 x3"`.
//!
//! ## Accepted Suffixes
//!
//! | Line          | text        | count  |
//! |---------------|-------------|--------|
//! | `"test 123"`  | `"test "`   | `"123"`  |
//! | `"test x123"` | `"test "`   | `"123"`  |
//! | `"test +123"` | `"test "`   | `"123"`  |
//! | `"test -123"` | `"test "`   | `"-123"` |
//! | `"test123"`   | `"test123"` | `""`     |
//! | `"test+123"`  | `"test+123"`| `""`     |
//! | `"123"`       | `"123"`     | `""`     |
//!
//! A marker (`x`, `+`, `-`) only counts when it starts the line or follows a
//! space. Anything that does not fit these shapes yields the whole line and
//! an empty count.

/// Markers that may sit directly before the trailing digits.
mod marker {
    pub const SPACE: u8 = b' ';
    pub const TIMES: u8 = b'x';
    pub const PLUS: u8 = b'+';
    pub const MINUS: u8 = b'-';
}

/// A line split into its leading text and trailing count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CountSplit<'a> {
    /// Everything before the count (and before an `x`/`+`/`-` marker)
    pub text: &'a str,

    /// The digits, with a leading `-` for negative counts; empty if none
    pub count: &'a str,
}

impl<'a> CountSplit<'a> {
    fn none(line: &'a str) -> Self {
        Self {
            text: line,
            count: "",
        }
    }

    /// Returns true if a count suffix was found.
    pub fn has_count(&self) -> bool {
        !self.count.is_empty()
    }

    /// Parses the count, or `None` if there is none or it overflows an `i64`.
    pub fn value(&self) -> Option<i64> {
        if self.count.is_empty() {
            return None;
        }
        self.count.parse().ok()
    }
}

/// Splits a trailing count suffix off `line`.
///
/// Never fails; ambiguous input falls back to "no count".
///
/// # Example
///
/// ```
/// use linecmd::parser::split_trailing_count;
///
/// let split = split_trailing_count("roll d20 x3");
/// assert_eq!(split.text, "roll d20 ");
/// assert_eq!(split.count, "3");
/// assert_eq!(split.value(), Some(3));
/// ```
pub fn split_trailing_count(line: &str) -> CountSplit<'_> {
    let bytes = line.as_bytes();

    // Start of the maximal run of ASCII digits at the end of the line
    let digits_start = bytes
        .iter()
        .rposition(|b| !b.is_ascii_digit())
        .map_or(0, |pos| pos + 1);

    if digits_start == bytes.len() || digits_start == 0 {
        return CountSplit::none(line);
    }

    let marker_pos = digits_start - 1;
    match bytes[marker_pos] {
        marker::SPACE => CountSplit {
            text: &line[..digits_start],
            count: &line[digits_start..],
        },
        m @ (marker::TIMES | marker::PLUS | marker::MINUS) => {
            let detached = marker_pos == 0 || bytes[marker_pos - 1] == marker::SPACE;
            if !detached {
                return CountSplit::none(line);
            }

            let count = if m == marker::MINUS {
                &line[marker_pos..]
            } else {
                &line[digits_start..]
            };

            CountSplit {
                text: &line[..marker_pos],
                count,
            }
        }
        _ => CountSplit::none(line),
    }
}
