//! Engine error types.

use std::path::PathBuf;

use thiserror::Error;

/// Invalid engine configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OptionsError {
    #[error("Missing required option '{key}'.")]
    MissingOption { key: String },

    #[error("Invalid value for option '{key}': '{value}'\n\n{reason}")]
    BadOption {
        key: String,
        value: String,
        reason: String,
    },
}

impl OptionsError {
    pub fn missing_option(key: impl Into<String>) -> Self {
        Self::MissingOption { key: key.into() }
    }

    pub fn bad_option(
        key: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::BadOption {
            key: key.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }
}

/// Failure to obtain template source text.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error(
        "Access denied: File '{}' is outside the configured root directory. \
         The sandboxing security policy forbids this.",
        .path.display()
    )]
    OutsideRoot { path: PathBuf },

    #[error(
        "Failed to access path '{}'. Please ensure the file exists and the app has \
         permission to access it.",
        .path.display()
    )]
    Inaccessible {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Path '{}' is not a file.", .path.display())]
    NotAFile { path: PathBuf },

    #[error("Unable to read file '{}'.", .path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Template '{file}' not found.")]
    NotFound { file: String },
}

impl SourceError {
    pub fn outside_root(path: impl Into<PathBuf>) -> Self {
        Self::OutsideRoot { path: path.into() }
    }

    pub fn inaccessible(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Inaccessible {
            path: path.into(),
            source,
        }
    }

    pub fn not_a_file(path: impl Into<PathBuf>) -> Self {
        Self::NotAFile { path: path.into() }
    }

    pub fn unreadable(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Unreadable {
            path: path.into(),
            source,
        }
    }

    pub fn not_found(file: impl Into<String>) -> Self {
        Self::NotFound { file: file.into() }
    }
}

/// Engine errors.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Invalid options.
    #[error("options error: {0}")]
    Options(#[from] OptionsError),

    /// The source provider could not supply the template.
    #[error("source error: {0}")]
    Source(#[from] SourceError),

    /// Syntax error in the template.
    #[error("compile error: {0}")]
    Compile(#[from] htl_compiler::CompileError),

    /// Argument validation or execution failed.
    #[error("render error: {0}")]
    Render(#[from] htl_runtime::RenderError),
}

/// Result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;
