//! Error types for the secure encoding pipeline.

use thiserror::Error;

/// Result type for pipeline operations.
pub type CryptoResult<T> = Result<T, CryptoError>;

/// Errors from encoding, decoding, or key handling.
#[derive(Debug, Error)]
pub enum CryptoError {
    /// Server key material is invalid or unusable; issuance must abort.
    #[error("signing failed: {0}")]
    Signing(String),

    /// The envelope has an unknown version or a malformed structure.
    #[error("malformed envelope: {0}")]
    EnvelopeFormat(String),

    /// Signature or authentication-tag verification failed. The content
    /// must not be trusted or inspected.
    #[error("license is tampered or forged")]
    TamperedOrForged,

    /// The envelope is encrypted but no decryption key is configured.
    #[error("envelope is encrypted but no decryption key is configured")]
    MissingDecryptionKey,

    /// Raw key bytes have the wrong length.
    #[error("invalid key length: expected {expected}, got {actual}")]
    InvalidKeyLength {
        /// Required length in bytes.
        expected: usize,
        /// Supplied length in bytes.
        actual: usize,
    },

    /// The public key bytes do not describe a valid key.
    #[error("invalid public key")]
    InvalidPublicKey,

    /// A key could not be decoded from its textual form.
    #[error("invalid key encoding: {0}")]
    InvalidKeyEncoding(String),
}
