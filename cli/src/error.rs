//! CLI error types

use thiserror::Error;

/// CLI error type
#[derive(Error, Debug)]
pub enum CliError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid render arguments: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Options(#[from] htl_engine::OptionsError),

    #[error(transparent)]
    Source(#[from] htl_engine::SourceError),

    #[error(transparent)]
    Syntax(#[from] htl_parser::ParseError),

    #[error(transparent)]
    Engine(#[from] htl_engine::EngineError),
}

/// CLI result type
pub type CliResult<T> = Result<T, CliError>;
