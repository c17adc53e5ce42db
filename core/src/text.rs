//! Grapheme segmentation and character classification.
//!
//! All lexing works on user-perceived characters (extended grapheme
//! clusters), so emoji sequences, combining marks and `\r\n` are never split.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use unicode_segmentation::UnicodeSegmentation;

use crate::GraphemeError;

static LETTER: LazyLock<Regex> = LazyLock::new(|| unicode_class("L"));
static DECIMAL_DIGIT: LazyLock<Regex> = LazyLock::new(|| unicode_class("Nd"));
static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| unicode_class("White_Space"));

/// Matcher for one Unicode property class, `\p{name}`.
fn unicode_class(name: &str) -> Regex {
    Regex::new(&format!(r"\p{{{name}}}"))
        .unwrap_or_else(|e| panic!("unknown Unicode class {name}: {e}"))
}

/// Split `text` into its extended grapheme clusters, in order.
pub fn to_graphemes(text: &str) -> Vec<Grapheme<'_>> {
    text.graphemes(true).map(Grapheme).collect()
}

/// Returns true if `text` consists of exactly one grapheme.
pub fn is_single_grapheme(text: &str) -> bool {
    let mut it = text.graphemes(true);
    it.next().is_some() && it.next().is_none()
}

/// A single user-perceived character borrowed from source text.
///
/// Classification is only available on this type, which makes "classify
/// something that is not one grapheme" unrepresentable for callers that go
/// through [`to_graphemes`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Grapheme<'a>(&'a str);

impl<'a> Grapheme<'a> {
    /// Wrap `text`, failing unless it is exactly one grapheme.
    pub fn new(text: &'a str) -> Result<Self, GraphemeError> {
        if is_single_grapheme(text) {
            Ok(Self(text))
        } else {
            Err(GraphemeError::new(text, text.graphemes(true).count()))
        }
    }

    pub fn as_str(&self) -> &'a str {
        self.0
    }

    /// Unicode `White_Space`.
    pub fn is_whitespace(&self) -> bool {
        WHITESPACE.is_match(self.0)
    }

    /// Unicode general category `L`.
    pub fn is_letter(&self) -> bool {
        LETTER.is_match(self.0)
    }

    /// Unicode general category `Nd`.
    pub fn is_digit(&self) -> bool {
        DECIMAL_DIGIT.is_match(self.0)
    }

    pub fn is_alphanumeric(&self) -> bool {
        self.is_letter() || self.is_digit()
    }

    /// `\n`, `\r`, or the single `\r\n` cluster.
    pub fn is_newline(&self) -> bool {
        matches!(self.0, "\n" | "\r" | "\r\n")
    }
}

impl PartialEq<str> for Grapheme<'_> {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for Grapheme<'_> {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

impl fmt::Display for Grapheme<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}
