//! Error types for the converter layer.

use crate::convert::ConverterFormat;
use thiserror::Error;

/// Errors from serializing or deserializing a license.
#[derive(Debug, Error)]
pub enum ConverterError {
    /// A license field cannot be represented in the target grammar.
    #[error("field `{field}` cannot be represented: {reason}")]
    UnsupportedField {
        /// The offending field name.
        field: String,
        /// Why the field cannot be rendered.
        reason: String,
    },

    /// The canonical text is syntactically invalid.
    #[error("malformed canonical text: {0}")]
    MalformedText(String),

    /// The canonical text contains a key this converter does not know.
    #[error("unknown field `{0}`")]
    UnknownField(String),

    /// No converter is registered for the requested format.
    #[error("no converter registered for format `{0}`")]
    UnknownFormat(ConverterFormat),
}

/// Result type for converter operations.
pub type ConverterResult<T> = Result<T, ConverterError>;
