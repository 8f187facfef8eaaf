//! Shared test helpers for pipeline tests.

#![allow(dead_code)]

use lexlock_crypto::{
    ClientKeyMaterial, EncryptionKey, KeyPair, ServerKeyMaterial, SigningKey, VerifyingKey,
};

/// Returns a deterministic Ed25519 key pair from a fixed seed.
pub fn test_keypair() -> (SigningKey, VerifyingKey) {
    let seed: [u8; 32] = [
        1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 16, 17, 18, 19, 20, 21, 22, 23, 24,
        25, 26, 27, 28, 29, 30, 31, 32,
    ];
    let signing = SigningKey::from_bytes(&seed);
    let verifying = signing.verifying_key();
    (signing, verifying)
}

/// A fixed content-encryption key.
pub fn test_encryption_key() -> EncryptionKey {
    EncryptionKey::from_bytes([7u8; 32])
}

/// Signing-only server material with its matching client material.
pub fn signed_pair() -> (ServerKeyMaterial, ClientKeyMaterial) {
    let (signing, verifying) = test_keypair();
    (
        ServerKeyMaterial::new(signing),
        ClientKeyMaterial::new(verifying),
    )
}

/// Encrypting server material with its matching client material.
pub fn encrypted_pair() -> (ServerKeyMaterial, ClientKeyMaterial) {
    let (signing, verifying) = test_keypair();
    (
        ServerKeyMaterial::new(signing).with_encryption(test_encryption_key()),
        ClientKeyMaterial::new(verifying).with_decryption(test_encryption_key()),
    )
}

/// A client whose verifying key does not match the test signing key.
pub fn mismatched_client() -> ClientKeyMaterial {
    let other = KeyPair::generate();
    ClientKeyMaterial::new(other.verifying)
}

/// The canonical text used across the scenarios.
pub const SAMPLE_TEXT: &str = "id=ABC-123\nexpiry=2030-01-01\nfeatures.pro=true";
