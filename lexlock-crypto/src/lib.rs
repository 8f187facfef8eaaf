//! Secure encoding pipeline for licenses.
//!
//! The server turns canonical license text into an opaque, transport-safe
//! envelope; the client reverses it or rejects it:
//!
//! - [`encode`] signs the text with the server's Ed25519 key and, when
//!   configured, encrypts it with ChaCha20-Poly1305 (encrypt-then-sign,
//!   fixed for the lifetime of a key).
//! - [`decode`] parses the versioned envelope, verifies the signature
//!   with the client's public key, then decrypts. A forged or altered
//!   envelope fails outright; unverified content is never exposed.
//!
//! Envelope format: `v1:<alg>:<body_b64>.<sig_b64>` (see the `envelope`
//! module). Key material is loaded at startup and injected; the pipeline
//! never persists or logs it.

mod cipher;
mod decode;
mod encode;
mod envelope;
mod error;
mod material;
mod signing;

pub use cipher::{NONCE_SIZE, TAG_SIZE};
pub use decode::decode;
pub use encode::encode;
pub use envelope::{EncodedLicense, ENVELOPE_VERSION};
pub use error::{CryptoError, CryptoResult};
pub use material::{
    ClientKeyMaterial, EncryptionKey, ServerKeyMaterial, SharedKeyMaterial, ENCRYPTION_KEY_SIZE,
};
pub use signing::{KeyPair, Signature, SigningKey, VerifyingKey, KEY_SIZE, SIGNATURE_SIZE};
