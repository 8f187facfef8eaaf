//! The versioned envelope wrapping a signed license.
//!
//! Grammar (one printable line, base64url-no-pad throughout):
//!
//! ```text
//! v1:<alg>:<body_b64>.<sig_b64>
//! ```
//!
//! `alg` names the primitives (`ed25519`, or `ed25519+chacha20` when the
//! body is encrypted). The signature covers the ASCII bytes of
//! `v1:<alg>:<body_b64>`, so neither the version nor the algorithm header
//! can be swapped after signing. Future algorithm upgrades bump the
//! version; the parser dispatches on it explicitly so version-aware
//! decoders keep decoding old envelopes.

use crate::error::{CryptoError, CryptoResult};
use crate::signing::{Signature, SIGNATURE_SIZE};
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Version tag emitted by the current encoder.
pub const ENVELOPE_VERSION: &str = "v1";

/// An opaque, integrity-protected license string.
///
/// Produced once per encode call, never mutated; a decoder either yields
/// back the canonical text or fails.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EncodedLicense(String);

impl EncodedLicense {
    pub(crate) fn from_string(s: String) -> Self {
        Self(s)
    }

    /// Returns the encoded text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the wrapper, returning the inner string.
    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for EncodedLicense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Algorithm suite named in the envelope header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum EnvelopeAlg {
    /// Ed25519 signature over a plaintext body.
    Signed,
    /// Ed25519 signature over a ChaCha20-Poly1305-encrypted body.
    SignedEncrypted,
}

impl EnvelopeAlg {
    pub(crate) fn as_str(self) -> &'static str {
        match self {
            Self::Signed => "ed25519",
            Self::SignedEncrypted => "ed25519+chacha20",
        }
    }

    fn parse(s: &str) -> CryptoResult<Self> {
        match s {
            "ed25519" => Ok(Self::Signed),
            "ed25519+chacha20" => Ok(Self::SignedEncrypted),
            other => Err(CryptoError::EnvelopeFormat(format!(
                "unknown algorithm `{other}`"
            ))),
        }
    }
}

/// A parsed (not yet verified) envelope.
#[derive(Debug, Clone)]
pub(crate) struct Envelope {
    alg: EnvelopeAlg,
    body_b64: String,
    sig_b64: String,
}

impl Envelope {
    /// The string the signature is computed over.
    pub(crate) fn signed_portion(alg: EnvelopeAlg, body_b64: &str) -> String {
        format!("{ENVELOPE_VERSION}:{}:{body_b64}", alg.as_str())
    }

    /// Renders a complete envelope from its signed portion and signature.
    pub(crate) fn render(signed_portion: &str, signature: &Signature) -> String {
        let sig_b64 = URL_SAFE_NO_PAD.encode(signature.to_bytes());
        format!("{signed_portion}.{sig_b64}")
    }

    /// Parses the envelope structure. No cryptographic checks happen
    /// here; verification is the decoder's job.
    pub(crate) fn parse(encoded: &str) -> CryptoResult<Self> {
        let mut parts = encoded.splitn(3, ':');
        let version = parts.next().unwrap_or_default();
        let Some(alg) = parts.next() else {
            return Err(CryptoError::EnvelopeFormat(
                "missing algorithm header".to_string(),
            ));
        };
        let Some(rest) = parts.next() else {
            return Err(CryptoError::EnvelopeFormat("missing body".to_string()));
        };

        if version != ENVELOPE_VERSION {
            return Err(CryptoError::EnvelopeFormat(format!(
                "unsupported envelope version `{version}`"
            )));
        }
        let alg = EnvelopeAlg::parse(alg)?;

        let Some((body_b64, sig_b64)) = rest.split_once('.') else {
            return Err(CryptoError::EnvelopeFormat(
                "missing signature separator".to_string(),
            ));
        };
        if sig_b64.is_empty() {
            return Err(CryptoError::EnvelopeFormat("empty signature".to_string()));
        }

        Ok(Self {
            alg,
            body_b64: body_b64.to_string(),
            sig_b64: sig_b64.to_string(),
        })
    }

    pub(crate) fn alg(&self) -> EnvelopeAlg {
        self.alg
    }

    /// Reconstructs the signed portion of this envelope.
    pub(crate) fn signed_portion_of(&self) -> String {
        Self::signed_portion(self.alg, &self.body_b64)
    }

    /// Decodes the signature field.
    pub(crate) fn signature(&self) -> CryptoResult<Signature> {
        let bytes = URL_SAFE_NO_PAD
            .decode(&self.sig_b64)
            .map_err(|e| CryptoError::EnvelopeFormat(format!("invalid signature base64: {e}")))?;
        let bytes: [u8; SIGNATURE_SIZE] =
            bytes
                .try_into()
                .map_err(|_| CryptoError::EnvelopeFormat("invalid signature length".to_string()))?;
        Ok(Signature::from_bytes(&bytes))
    }

    /// Decodes the body field.
    pub(crate) fn body(&self) -> CryptoResult<Vec<u8>> {
        URL_SAFE_NO_PAD
            .decode(&self.body_b64)
            .map_err(|e| CryptoError::EnvelopeFormat(format!("invalid body base64: {e}")))
    }
}
