//! Ed25519 signing and verification for license envelopes.
//!
//! The server signs with [`SigningKey`]; clients carry only the
//! corresponding [`VerifyingKey`], which can check but never forge a
//! license. Signature verification, including the tag comparison, is
//! constant-time inside `ed25519-dalek`.

use crate::error::{CryptoError, CryptoResult};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use ed25519_dalek::{
    Signature as DalekSignature, Signer as _, SigningKey as DalekSigningKey, Verifier as _,
    VerifyingKey as DalekVerifyingKey,
};
use rand::rngs::OsRng;
use sha2::{Digest, Sha256};
use std::fmt;

/// Length of a raw Ed25519 secret or public key in bytes.
pub const KEY_SIZE: usize = 32;

/// Length of a raw Ed25519 signature in bytes.
pub const SIGNATURE_SIZE: usize = 64;

/// Ed25519 signing key (secret). Held by the issuing server only.
#[derive(Clone)]
pub struct SigningKey(DalekSigningKey);

/// Ed25519 verifying key (public). Held by clients.
#[derive(Clone)]
pub struct VerifyingKey(DalekVerifyingKey);

/// Ed25519 signature bytes.
#[derive(Clone)]
pub struct Signature(DalekSignature);

/// A signing/verifying key pair.
pub struct KeyPair {
    pub signing: SigningKey,
    pub verifying: VerifyingKey,
}

impl KeyPair {
    /// Generates a new random Ed25519 key pair.
    #[must_use]
    pub fn generate() -> Self {
        let signing = DalekSigningKey::generate(&mut OsRng);
        let verifying = signing.verifying_key();
        Self {
            signing: SigningKey(signing),
            verifying: VerifyingKey(verifying),
        }
    }
}

impl SigningKey {
    /// Creates a signing key from a raw 32-byte secret.
    #[must_use]
    pub fn from_bytes(bytes: &[u8; KEY_SIZE]) -> Self {
        Self(DalekSigningKey::from_bytes(bytes))
    }

    /// Loads a signing key from a base64-encoded 32-byte secret.
    pub fn from_base64(encoded: &str) -> CryptoResult<Self> {
        let bytes = decode_key_bytes(encoded)?;
        Ok(Self::from_bytes(&bytes))
    }

    /// Returns the raw 32-byte secret.
    #[must_use]
    pub fn to_bytes(&self) -> [u8; KEY_SIZE] {
        self.0.to_bytes()
    }

    /// Signs a message.
    #[must_use]
    pub fn sign(&self, message: &[u8]) -> Signature {
        Signature(self.0.sign(message))
    }

    /// Returns the corresponding verifying key.
    #[must_use]
    pub fn verifying_key(&self) -> VerifyingKey {
        VerifyingKey(self.0.verifying_key())
    }
}

impl fmt::Debug for SigningKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SigningKey")
            .field("bytes", &"[REDACTED]")
            .finish()
    }
}

impl VerifyingKey {
    /// Creates a verifying key from a raw 32-byte public key.
    pub fn from_bytes(bytes: &[u8; KEY_SIZE]) -> CryptoResult<Self> {
        DalekVerifyingKey::from_bytes(bytes)
            .map(Self)
            .map_err(|_| CryptoError::InvalidPublicKey)
    }

    /// Loads a verifying key from a base64-encoded 32-byte public key.
    pub fn from_base64(encoded: &str) -> CryptoResult<Self> {
        let bytes = decode_key_bytes(encoded)?;
        Self::from_bytes(&bytes)
    }

    /// Returns the raw 32-byte public key.
    #[must_use]
    pub fn to_bytes(&self) -> [u8; KEY_SIZE] {
        self.0.to_bytes()
    }

    /// Returns the base64 form of the public key.
    #[must_use]
    pub fn to_base64(&self) -> String {
        BASE64.encode(self.to_bytes())
    }

    /// Verifies a signature over a message.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::TamperedOrForged`] when the signature does
    /// not match.
    pub fn verify(&self, message: &[u8], signature: &Signature) -> CryptoResult<()> {
        self.0
            .verify(message, &signature.0)
            .map_err(|_| CryptoError::TamperedOrForged)
    }

    /// Short stable identifier of this key for audit logs.
    ///
    /// Base64 of the first 8 bytes of the SHA-256 of the public key;
    /// names a key generation without exposing key material.
    #[must_use]
    pub fn fingerprint(&self) -> String {
        let mut hasher = Sha256::new();
        hasher.update(self.to_bytes());
        let hash = hasher.finalize();
        BASE64.encode(&hash[..8])
    }
}

impl fmt::Debug for VerifyingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VerifyingKey")
            .field("fingerprint", &self.fingerprint())
            .finish()
    }
}

impl Signature {
    /// Creates a signature from a raw 64-byte value.
    #[must_use]
    pub fn from_bytes(bytes: &[u8; SIGNATURE_SIZE]) -> Self {
        Self(DalekSignature::from_bytes(bytes))
    }

    /// Returns the raw 64-byte signature.
    #[must_use]
    pub fn to_bytes(&self) -> [u8; SIGNATURE_SIZE] {
        self.0.to_bytes()
    }
}

fn decode_key_bytes(encoded: &str) -> CryptoResult<[u8; KEY_SIZE]> {
    let bytes = BASE64
        .decode(encoded.trim())
        .map_err(|e| CryptoError::InvalidKeyEncoding(format!("invalid base64: {e}")))?;
    let actual = bytes.len();
    bytes
        .try_into()
        .map_err(|_| CryptoError::InvalidKeyLength {
            expected: KEY_SIZE,
            actual,
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sign_verify_roundtrip() {
        let kp = KeyPair::generate();
        let msg = b"canonical license text";
        let sig = kp.signing.sign(msg);
        assert!(kp.verifying.verify(msg, &sig).is_ok());
    }

    #[test]
    fn wrong_message_fails() {
        let kp = KeyPair::generate();
        let sig = kp.signing.sign(b"correct");
        assert!(kp.verifying.verify(b"wrong", &sig).is_err());
    }

    #[test]
    fn wrong_key_fails() {
        let kp1 = KeyPair::generate();
        let kp2 = KeyPair::generate();
        let sig = kp1.signing.sign(b"message");
        assert!(kp2.verifying.verify(b"message", &sig).is_err());
    }

    #[test]
    fn key_bytes_roundtrip() {
        let kp = KeyPair::generate();
        let sk = SigningKey::from_bytes(&kp.signing.to_bytes());
        let vk = VerifyingKey::from_bytes(&kp.verifying.to_bytes()).unwrap();
        let sig = sk.sign(b"test");
        assert!(vk.verify(b"test", &sig).is_ok());
    }

    #[test]
    fn key_base64_roundtrip() {
        let kp = KeyPair::generate();
        let vk = VerifyingKey::from_base64(&kp.verifying.to_base64()).unwrap();
        assert_eq!(vk.to_bytes(), kp.verifying.to_bytes());
    }

    #[test]
    fn signature_bytes_roundtrip() {
        let kp = KeyPair::generate();
        let sig = kp.signing.sign(b"data");
        let restored = Signature::from_bytes(&sig.to_bytes());
        assert!(kp.verifying.verify(b"data", &restored).is_ok());
    }

    #[test]
    fn fingerprint_is_stable_and_short() {
        let kp = KeyPair::generate();
        let fp1 = kp.verifying.fingerprint();
        let fp2 = kp.verifying.fingerprint();
        assert_eq!(fp1, fp2);
        assert!(fp1.len() <= 16);
    }

    #[test]
    fn signing_key_debug_is_redacted() {
        let kp = KeyPair::generate();
        let debug = format!("{:?}", kp.signing);
        assert!(debug.contains("REDACTED"));
    }

    #[test]
    fn bad_base64_key_rejected() {
        assert!(SigningKey::from_base64("!!!not base64!!!").is_err());
    }

    #[test]
    fn short_key_rejected() {
        let encoded = BASE64.encode([0u8; 16]);
        match SigningKey::from_base64(&encoded) {
            Err(CryptoError::InvalidKeyLength { expected, actual }) => {
                assert_eq!(expected, KEY_SIZE);
                assert_eq!(actual, 16);
            }
            other => panic!("expected InvalidKeyLength, got {other:?}"),
        }
    }
}
