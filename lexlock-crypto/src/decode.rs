//! Client-side decoder: opaque envelope in, canonical text out.
//!
//! This is the authenticity boundary of the whole system. Downstream
//! code may trust a license record only because this function returned
//! `Ok`; no other path establishes authenticity.

use crate::cipher;
use crate::envelope::{Envelope, EnvelopeAlg};
use crate::error::{CryptoError, CryptoResult};
use crate::material::ClientKeyMaterial;

/// Verifies an encoded license and recovers its canonical text.
///
/// The signature is checked before the body is decoded or decrypted; on
/// any verification failure the partially-recovered content is discarded,
/// never returned or inspected.
///
/// # Errors
///
/// [`CryptoError::EnvelopeFormat`] on an unknown version or malformed
/// structure, [`CryptoError::TamperedOrForged`] when the signature or the
/// authentication tag does not match, and
/// [`CryptoError::MissingDecryptionKey`] when the envelope is encrypted
/// but the client has no decryption key.
pub fn decode(encoded: &str, keys: &ClientKeyMaterial) -> CryptoResult<String> {
    let envelope = Envelope::parse(encoded.trim())?;

    let signature = envelope.signature()?;
    keys.verifying()
        .verify(envelope.signed_portion_of().as_bytes(), &signature)?;

    let body = envelope.body()?;
    let plaintext = match envelope.alg() {
        EnvelopeAlg::Signed => body,
        EnvelopeAlg::SignedEncrypted => {
            let key = keys.decryption().ok_or(CryptoError::MissingDecryptionKey)?;
            cipher::open(key, &body)?
        }
    };

    String::from_utf8(plaintext)
        .map_err(|_| CryptoError::EnvelopeFormat("payload is not valid UTF-8".to_string()))
}
