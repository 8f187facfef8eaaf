//! Error types for the issuance facade.

use thiserror::Error;

/// Errors from converting, encoding, or persisting a license.
#[derive(Debug, Error)]
pub enum WriterError {
    /// Converter-layer failure.
    #[error("converter error: {0}")]
    Converter(#[from] lexlock_license::ConverterError),

    /// Encoding-pipeline failure.
    #[error("encoding error: {0}")]
    Crypto(#[from] lexlock_crypto::CryptoError),

    /// File persistence failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for writer operations.
pub type WriterResult<T> = Result<T, WriterError>;
