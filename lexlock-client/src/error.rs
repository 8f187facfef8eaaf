//! Error types for the verification facade.

use thiserror::Error;

/// Errors from reading, decoding, or deserializing a license.
#[derive(Debug, Error)]
pub enum ReaderError {
    /// Converter-layer failure.
    #[error("converter error: {0}")]
    Converter(#[from] lexlock_license::ConverterError),

    /// Decoding-pipeline failure (malformed, tampered, or forged).
    #[error("decoding error: {0}")]
    Crypto(#[from] lexlock_crypto::CryptoError),

    /// File read failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for reader operations.
pub type ReaderResult<T> = Result<T, ReaderError>;
