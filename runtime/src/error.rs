//! Render error types.

use thiserror::Error;

/// Result type for render operations.
pub type RenderResult<T> = Result<T, RenderError>;

/// Errors that can occur while validating arguments or running bytecode.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenderError {
    #[error(
        "Invalid arguments passed to render for template '{file}': {payload}\n\n\
         Expected a plain object mapping variable names to values.\n\n\
         Note: Only the following datatypes are allowed for values: null, boolean, number, string, array, or object."
    )]
    InvalidArguments { file: String, payload: String },

    #[error("Found invalid argument '{key}' passed to render for template '{file}'\n\n{message}")]
    InvalidArgument {
        file: String,
        key: String,
        message: String,
    },

    #[error(
        "Found invalid argument {key} passed to render for template '{file}'\n\n\
         Invalid argument type: property keys must be strings. Each key is a variable name."
    )]
    InvalidArgumentType { file: String, key: String },

    #[error(
        "Found invalid argument '{key}' passed to render for template '{file}'\n\n\
         Value is of an invalid type '{type_name}'. Value must be one of the following \
         valid datatypes: null, boolean, number, string, array, or object.{}",
        note_suffix(.note)
    )]
    InvalidArgumentValue {
        file: String,
        key: String,
        type_name: String,
        note: Option<String>,
    },

    #[error(
        "Invalid argument '{key}' passed to render for template '{file}'\n\n\
         The property could not be safely inspected, most likely because it was being \
         mutated during render. Only plain, stable data is supported."
    )]
    UninspectableArgument { file: String, key: String },

    #[error(
        "A cyclic reference was detected while processing arguments passed to render \
         for template '{file}'"
    )]
    CyclicReference { file: String },

    #[error(
        "Found invalid argument '{key}' passed to render for template '{file}'\n\n\
         Arrays and objects may be nested at most {limit} levels deep."
    )]
    NestingTooDeep {
        file: String,
        key: String,
        limit: usize,
    },

    #[error("Missing required arg '{name}' to render template '{file}'.")]
    MissingArgument { file: String, name: String },
}

fn note_suffix(note: &Option<String>) -> String {
    match note {
        Some(note) => format!("\n\nNote: {}", note),
        None => String::new(),
    }
}

impl RenderError {
    pub fn invalid_arguments(file: impl Into<String>, payload: impl Into<String>) -> Self {
        Self::InvalidArguments {
            file: file.into(),
            payload: payload.into(),
        }
    }

    pub fn invalid_argument(
        file: impl Into<String>,
        key: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::InvalidArgument {
            file: file.into(),
            key: key.into(),
            message: message.into(),
        }
    }

    /// A getter/setter where a stored value was required.
    pub fn accessor_property(file: impl Into<String>, key: impl Into<String>) -> Self {
        Self::invalid_argument(
            file,
            key,
            "Usage of getters/setters detected, which is not allowed. Only plain, stable \
             data without dynamic properties may be used.",
        )
    }

    pub fn invalid_argument_type(file: impl Into<String>, key: impl Into<String>) -> Self {
        Self::InvalidArgumentType {
            file: file.into(),
            key: key.into(),
        }
    }

    pub fn invalid_argument_value(
        file: impl Into<String>,
        key: impl Into<String>,
        type_name: impl Into<String>,
    ) -> Self {
        Self::InvalidArgumentValue {
            file: file.into(),
            key: key.into(),
            type_name: type_name.into(),
            note: None,
        }
    }

    /// Attach a note to an `InvalidArgumentValue`; other variants are returned
    /// unchanged.
    pub fn with_note(self, text: impl Into<String>) -> Self {
        match self {
            Self::InvalidArgumentValue {
                file,
                key,
                type_name,
                ..
            } => Self::InvalidArgumentValue {
                file,
                key,
                type_name,
                note: Some(text.into()),
            },
            other => other,
        }
    }

    pub fn uninspectable_argument(file: impl Into<String>, key: impl Into<String>) -> Self {
        Self::UninspectableArgument {
            file: file.into(),
            key: key.into(),
        }
    }

    pub fn cyclic_reference(file: impl Into<String>) -> Self {
        Self::CyclicReference { file: file.into() }
    }

    pub fn nesting_too_deep(
        file: impl Into<String>,
        key: impl Into<String>,
        limit: usize,
    ) -> Self {
        Self::NestingTooDeep {
            file: file.into(),
            key: key.into(),
            limit,
        }
    }

    pub fn missing_argument(file: impl Into<String>, name: impl Into<String>) -> Self {
        Self::MissingArgument {
            file: file.into(),
            name: name.into(),
        }
    }

    /// The template file the error is attributed to.
    pub fn file(&self) -> &str {
        match self {
            Self::InvalidArguments { file, .. }
            | Self::InvalidArgument { file, .. }
            | Self::InvalidArgumentType { file, .. }
            | Self::InvalidArgumentValue { file, .. }
            | Self::UninspectableArgument { file, .. }
            | Self::CyclicReference { file }
            | Self::NestingTooDeep { file, .. }
            | Self::MissingArgument { file, .. } => file,
        }
    }

    /// True for errors raised while validating arguments, before any
    /// bytecode runs.
    pub fn is_argument_error(&self) -> bool {
        !matches!(self, Self::MissingArgument { .. })
    }
}
