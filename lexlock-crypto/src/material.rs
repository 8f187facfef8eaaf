//! Process-wide key material for the two ends of the pipeline.
//!
//! Key material is loaded once at startup, owned by the hosting
//! application, and injected into the facades. The pipeline itself never
//! persists or logs it. If a host rotates keys at runtime, it does so
//! through [`SharedKeyMaterial`], which swaps whole generations
//! atomically, so an in-flight encode or decode always observes a
//! single consistent generation.

use crate::error::{CryptoError, CryptoResult};
use crate::signing::{SigningKey, VerifyingKey};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use rand::RngCore;
use std::fmt;
use std::sync::{Arc, RwLock};
use tracing::debug;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Length of the symmetric content-encryption key in bytes.
pub const ENCRYPTION_KEY_SIZE: usize = 32;

/// Symmetric key for the optional confidentiality layer
/// (ChaCha20-Poly1305). Zeroized on drop.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct EncryptionKey {
    bytes: [u8; ENCRYPTION_KEY_SIZE],
}

impl EncryptionKey {
    /// Creates a key from raw bytes.
    #[must_use]
    pub fn from_bytes(bytes: [u8; ENCRYPTION_KEY_SIZE]) -> Self {
        Self { bytes }
    }

    /// Loads a key from its base64 form.
    pub fn from_base64(encoded: &str) -> CryptoResult<Self> {
        let bytes = BASE64
            .decode(encoded.trim())
            .map_err(|e| CryptoError::InvalidKeyEncoding(format!("invalid base64: {e}")))?;
        let actual = bytes.len();
        let bytes: [u8; ENCRYPTION_KEY_SIZE] =
            bytes
                .try_into()
                .map_err(|_| CryptoError::InvalidKeyLength {
                    expected: ENCRYPTION_KEY_SIZE,
                    actual,
                })?;
        Ok(Self::from_bytes(bytes))
    }

    /// Generates a random key.
    #[must_use]
    pub fn generate() -> Self {
        let mut bytes = [0u8; ENCRYPTION_KEY_SIZE];
        rand::rngs::OsRng.fill_bytes(&mut bytes);
        Self::from_bytes(bytes)
    }

    /// Returns the key bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8; ENCRYPTION_KEY_SIZE] {
        &self.bytes
    }
}

impl fmt::Debug for EncryptionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EncryptionKey")
            .field("bytes", &"[REDACTED]")
            .finish()
    }
}

/// Key material held by the issuing server.
///
/// The presence of an encryption key decides the envelope mode for every
/// license this material signs; the choice is process-wide, never made
/// per call.
#[derive(Debug, Clone)]
pub struct ServerKeyMaterial {
    signing: SigningKey,
    encryption: Option<EncryptionKey>,
}

impl ServerKeyMaterial {
    /// Creates signing-only material (plaintext envelopes).
    #[must_use]
    pub fn new(signing: SigningKey) -> Self {
        Self {
            signing,
            encryption: None,
        }
    }

    /// Adds a content-encryption key (encrypted envelopes).
    #[must_use]
    pub fn with_encryption(mut self, key: EncryptionKey) -> Self {
        self.encryption = Some(key);
        self
    }

    /// Returns the signing key.
    #[must_use]
    pub fn signing(&self) -> &SigningKey {
        &self.signing
    }

    /// Returns the content-encryption key, if configured.
    #[must_use]
    pub fn encryption(&self) -> Option<&EncryptionKey> {
        self.encryption.as_ref()
    }

    /// Fingerprint of the corresponding verifying key, for audit logs.
    #[must_use]
    pub fn fingerprint(&self) -> String {
        self.signing.verifying_key().fingerprint()
    }
}

/// Key material held by a verifying client.
#[derive(Debug, Clone)]
pub struct ClientKeyMaterial {
    verifying: VerifyingKey,
    decryption: Option<EncryptionKey>,
}

impl ClientKeyMaterial {
    /// Creates verification-only material.
    #[must_use]
    pub fn new(verifying: VerifyingKey) -> Self {
        Self {
            verifying,
            decryption: None,
        }
    }

    /// Adds a content-decryption key for encrypted envelopes.
    #[must_use]
    pub fn with_decryption(mut self, key: EncryptionKey) -> Self {
        self.decryption = Some(key);
        self
    }

    /// Returns the verifying key.
    #[must_use]
    pub fn verifying(&self) -> &VerifyingKey {
        &self.verifying
    }

    /// Returns the content-decryption key, if configured.
    #[must_use]
    pub fn decryption(&self) -> Option<&EncryptionKey> {
        self.decryption.as_ref()
    }

    /// Fingerprint of the verifying key, for audit logs.
    #[must_use]
    pub fn fingerprint(&self) -> String {
        self.verifying.fingerprint()
    }
}

/// Atomically swappable key material for hosts that rotate at runtime.
///
/// Readers take an `Arc` to the current generation and keep using it for
/// the duration of their call; [`rotate`](Self::rotate) publishes a new
/// generation with a single reference swap, so no reader can observe a
/// mix of old and new key bytes.
pub struct SharedKeyMaterial<T> {
    current: RwLock<Arc<T>>,
}

impl<T> SharedKeyMaterial<T> {
    /// Wraps the initial key generation.
    #[must_use]
    pub fn new(initial: T) -> Self {
        Self {
            current: RwLock::new(Arc::new(initial)),
        }
    }

    /// Returns the current generation.
    #[must_use]
    pub fn load(&self) -> Arc<T> {
        match self.current.read() {
            Ok(guard) => Arc::clone(&guard),
            Err(poisoned) => Arc::clone(&poisoned.into_inner()),
        }
    }

    /// Publishes a new generation.
    pub fn rotate(&self, next: T) {
        let next = Arc::new(next);
        match self.current.write() {
            Ok(mut guard) => *guard = next,
            Err(poisoned) => *poisoned.into_inner() = next,
        }
        debug!("key material rotated");
    }
}
