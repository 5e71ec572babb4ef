//! Error types for sqlprep

use thiserror::Error;

/// Result type alias for preprocessing operations
pub type PrepResult<T> = Result<T, PrepError>;

/// Errors raised while expanding a SQL template.
///
/// All of them describe malformed input; none is transient, and a failed
/// `process` call never yields a partial SQL string.
#[derive(Debug, Error)]
pub enum PrepError {
    /// `process` was called without a template
    #[error("Parameter list is empty, expected at least a SQL template")]
    EmptyParams,

    /// A scalar value appeared with no placeholder left to bind it to
    #[error("There are more parameters than placeholders")]
    ExcessParams,

    /// A placeholder was reached after all parameters were consumed
    #[error("There are more placeholders than passed parameters")]
    MissingParams,

    /// `?xyz` with a suffix that is not a known mode
    #[error("Unknown placeholder ?{0}")]
    UnknownPlaceholder(String),

    /// `?name` received something other than a string
    #[error("Placeholder ?{placeholder} expects string, {found} given")]
    ExpectedString {
        placeholder: &'static str,
        found: &'static str,
    },

    /// An array-mode placeholder received a non-array value
    #[error("Placeholder ?{mode} expects array, {found} given")]
    ExpectedArray {
        mode: &'static str,
        found: &'static str,
    },

    /// No formatting rule applies to the value
    #[error("Unexpected type of parameter: {0}")]
    UnexpectedType(String),

    /// Auto-detected multi-row insert whose rows are not row-shaped
    #[error("Automatically detected multi-insert, but values aren't arrays: {0}")]
    MultiInsertShape(String),

    /// Multi-row insert where a later row lacks a column of the first row
    #[error("Multi-insert row {row} is missing column '{column}'")]
    MissingColumn { row: usize, column: String },

    /// The value cannot be represented in SQL
    #[error("Invalid value: {0}")]
    InvalidValue(String),

    /// The driver has no syntax for the requested value
    #[error("Not supported by driver: {0}")]
    Unsupported(String),
}

impl PrepError {
    /// Create an unexpected-type error
    pub fn unexpected(type_name: impl Into<String>) -> Self {
        Self::UnexpectedType(type_name.into())
    }

    /// Create an invalid-value error
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidValue(message.into())
    }

    /// Create an unsupported-capability error
    pub fn unsupported(message: impl Into<String>) -> Self {
        Self::Unsupported(message.into())
    }

    /// Check if this error is a placeholder/parameter count mismatch
    pub fn is_arity_error(&self) -> bool {
        matches!(
            self,
            Self::EmptyParams | Self::ExcessParams | Self::MissingParams
        )
    }

    /// Check if this error is a value type mismatch
    pub fn is_type_error(&self) -> bool {
        matches!(
            self,
            Self::ExpectedString { .. }
                | Self::ExpectedArray { .. }
                | Self::UnexpectedType(_)
                | Self::MultiInsertShape(_)
        )
    }
}
