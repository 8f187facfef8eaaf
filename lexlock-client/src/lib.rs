//! Client-side license verification.
//!
//! [`LicenseReader`] is the client counterpart of the server's writer:
//! it decodes an encoded license string (verifying its signature and,
//! when present, decrypting its content) and deserializes the canonical
//! text back into a [`License`](lexlock_license::License). A license
//! obtained any other way (in particular by reading fields out of an
//! envelope without a successful decode) must not be trusted.

mod error;
mod reader;

pub use error::{ReaderError, ReaderResult};
pub use reader::LicenseReader;
