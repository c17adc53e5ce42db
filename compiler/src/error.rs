//! Compiler error types.

use htl_core::SourceLocation;
use thiserror::Error;

/// Errors that can occur during compilation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompileError {
    /// Malformed escape sequence in the template source.
    #[error("{0}")]
    Syntax(#[from] htl_parser::ParseError),
}

impl CompileError {
    /// Where in the source the error was detected.
    pub fn location(&self) -> &SourceLocation {
        match self {
            CompileError::Syntax(e) => &e.location,
        }
    }
}

/// Result type for compilation.
pub type CompileResult<T> = Result<T, CompileError>;
