//! Core error types.

use thiserror::Error;

/// Raised when text that is not exactly one grapheme is treated as one.
///
/// This is a contract violation: graphemes produced by [`crate::to_graphemes`]
/// never trigger it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("expected a single grapheme, found {count} in {text:?}")]
pub struct GraphemeError {
    pub text: String,
    pub count: usize,
}

impl GraphemeError {
    pub fn new(text: impl Into<String>, count: usize) -> Self {
        Self {
            text: text.into(),
            count,
        }
    }
}
