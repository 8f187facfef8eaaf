//! Optional confidentiality layer: ChaCha20-Poly1305 AEAD.
//!
//! The sealed body is `nonce(12) || ciphertext`, with the 16-byte
//! authentication tag appended to the ciphertext by the AEAD.

use crate::error::{CryptoError, CryptoResult};
use crate::material::EncryptionKey;
use chacha20poly1305::{
    aead::{Aead, KeyInit},
    ChaCha20Poly1305, Nonce,
};
use rand::RngCore;

/// Size of the nonce in bytes (96 bits).
pub const NONCE_SIZE: usize = 12;

/// Size of the authentication tag in bytes.
pub const TAG_SIZE: usize = 16;

/// Encrypts a plaintext body, prepending a fresh random nonce.
pub(crate) fn seal(key: &EncryptionKey, plaintext: &[u8]) -> CryptoResult<Vec<u8>> {
    let cipher = ChaCha20Poly1305::new(key.as_bytes().into());

    let mut nonce_bytes = [0u8; NONCE_SIZE];
    rand::rngs::OsRng.fill_bytes(&mut nonce_bytes);
    let nonce = Nonce::from_slice(&nonce_bytes);

    let ciphertext = cipher
        .encrypt(nonce, plaintext)
        .map_err(|e| CryptoError::Signing(format!("content encryption failed: {e}")))?;

    let mut body = Vec::with_capacity(NONCE_SIZE + ciphertext.len());
    body.extend_from_slice(&nonce_bytes);
    body.extend_from_slice(&ciphertext);
    Ok(body)
}

/// Decrypts a sealed body produced by [`seal`].
pub(crate) fn open(key: &EncryptionKey, body: &[u8]) -> CryptoResult<Vec<u8>> {
    if body.len() < NONCE_SIZE + TAG_SIZE {
        return Err(CryptoError::EnvelopeFormat(
            "encrypted body too short".to_string(),
        ));
    }
    let cipher = ChaCha20Poly1305::new(key.as_bytes().into());
    let nonce = Nonce::from_slice(&body[..NONCE_SIZE]);

    cipher
        .decrypt(nonce, &body[NONCE_SIZE..])
        .map_err(|_| CryptoError::TamperedOrForged)
}
