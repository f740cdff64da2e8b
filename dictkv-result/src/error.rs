use std::fmt;

use arrow::datatypes::DataType;
use thiserror::Error;

/// Unified error type for all dictkv operations.
///
/// Construction-time failures (planning a dictionary reader) and call-time failures (a
/// dictionary lookup that could not be performed) share this enum so that errors raised by
/// the dictionary functions reach the caller of the reader unchanged.
///
/// A key that is absent from a dictionary is *not* an error. Absence is reported through the
/// found mask of a lookup result.
#[derive(Error, Debug)]
pub enum Error {
    /// Arrow library error during columnar data operations.
    ///
    /// Raised by the Arrow kernels used for filtering, gathering and concatenating columns,
    /// and when assembling a `RecordBatch` from columns that disagree with its schema.
    #[error("Arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    /// Invalid user input or API parameter.
    ///
    /// Covers argument-shape violations detected by functions (wrong argument count, a
    /// non-constant dictionary name, a key column of the wrong type) and malformed
    /// dictionary sources.
    #[error("Invalid argument: {0}")]
    InvalidArgumentError(String),

    /// The number of source attribute names differs from the number of requested result
    /// columns.
    #[error(
        "Columns number mismatch in dictionary reader: {source_columns} source columns, {result_columns} result columns"
    )]
    ColumnCountMismatch {
        source_columns: usize,
        result_columns: usize,
    },

    /// A resolved function returns a type other than the one the caller declared.
    ///
    /// `column` names the offending result attribute, or `has` for the existence check.
    #[error("Type mismatch in dictionary reader for: {column} (expected {expected}, got {actual})")]
    TypeMismatch {
        column: String,
        expected: DataType,
        actual: DataType,
    },

    /// No dictionary with the given name is registered in the catalog.
    #[error("Dictionary '{0}' not found")]
    DictionaryNotFound(String),

    /// The dictionary exists but has no attribute with the given name.
    #[error("Dictionary '{dictionary}' has no attribute '{attribute}'")]
    AttributeNotFound {
        dictionary: String,
        attribute: String,
    },

    /// No function with the given name is registered.
    #[error("Unknown function '{0}'")]
    FunctionNotFound(String),

    /// A feature that the API accepts a parameter for but does not implement.
    #[error("Unsupported: {0}")]
    Unsupported(String),

    /// Internal error indicating a bug or unexpected state.
    ///
    /// Examples are a function that finished without writing its result column, or a
    /// poisoned catalog lock.
    #[error("An internal operation failed: {0}")]
    Internal(String),
}

impl Error {
    /// Create an invalid argument error from any displayable value.
    #[inline]
    pub fn invalid_argument<E: fmt::Display>(err: E) -> Self {
        Error::InvalidArgumentError(err.to_string())
    }

    /// Create a type mismatch error for `column`.
    #[inline]
    pub fn type_mismatch(column: impl Into<String>, expected: DataType, actual: DataType) -> Self {
        Error::TypeMismatch {
            column: column.into(),
            expected,
            actual,
        }
    }
}
