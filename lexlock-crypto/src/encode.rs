//! Server-side encoder: canonical text in, opaque envelope out.

use crate::cipher;
use crate::envelope::{EncodedLicense, Envelope, EnvelopeAlg};
use crate::error::CryptoResult;
use crate::material::ServerKeyMaterial;
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};

/// Encodes canonical text into a signed (and, when the server material
/// carries an encryption key, encrypted) envelope.
///
/// Order is encrypt-then-sign: the signature covers the final body, so a
/// decoder authenticates the envelope before its cipher ever sees a byte.
/// The call is atomic: it either returns the complete envelope or an
/// error, and has no side effects beyond using the supplied key material.
///
/// # Errors
///
/// Returns [`CryptoError::Signing`](crate::CryptoError::Signing) when the
/// key material is unusable.
pub fn encode(text: &str, keys: &ServerKeyMaterial) -> CryptoResult<EncodedLicense> {
    let (alg, body) = match keys.encryption() {
        None => (EnvelopeAlg::Signed, text.as_bytes().to_vec()),
        Some(key) => (EnvelopeAlg::SignedEncrypted, cipher::seal(key, text.as_bytes())?),
    };

    let body_b64 = URL_SAFE_NO_PAD.encode(body);
    let signed_portion = Envelope::signed_portion(alg, &body_b64);
    let signature = keys.signing().sign(signed_portion.as_bytes());

    Ok(EncodedLicense::from_string(Envelope::render(
        &signed_portion,
        &signature,
    )))
}
