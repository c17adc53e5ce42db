//! Parser error types.

use htl_core::SourceLocation;
use std::fmt;

/// A syntax error with location information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    pub message: String,
    pub location: SourceLocation,
    pub found: Option<String>,
}

impl ParseError {
    pub fn new(message: impl Into<String>, location: SourceLocation) -> Self {
        Self {
            message: message.into(),
            location,
            found: None,
        }
    }

    pub fn with_found(mut self, found: impl Into<String>) -> Self {
        self.found = Some(found.into());
        self
    }

    /// `@` followed by something that is neither `@` nor an identifier.
    pub fn invalid_escape(found: &str, location: SourceLocation) -> Self {
        Self::new(
            format!(
                "Invalid html escape sequence: Expected identifier after '@', got '{}'.\n\n\
                 Hint: To display a literal '@' in html, use '@@'.",
                found.escape_debug()
            ),
            location,
        )
        .with_found(found)
    }

    pub fn file(&self) -> &str {
        self.location.file()
    }

    pub fn line(&self) -> usize {
        self.location.line()
    }

    pub fn column(&self) -> usize {
        self.location.column()
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\n\nSyntaxError: {}", self.location, self.message)
    }
}

impl std::error::Error for ParseError {}

/// Result type for parsing operations.
pub type ParseResult<T> = Result<T, ParseError>;
