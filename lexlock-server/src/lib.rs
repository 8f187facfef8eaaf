//! Server-side license issuance.
//!
//! [`LicenseWriter`] is the facade a licensing server uses to turn a
//! [`License`](lexlock_license::License) into its portable secure form:
//! converter serialize, then encode, then (optionally) write to a file.
//! It makes no decisions of its own: converter choice is explicit (with
//! the INI grammar as the documented default) and every failure mode is
//! pass-through from the converter, the encoder, or the filesystem.

mod error;
mod writer;

pub use error::{WriterError, WriterResult};
pub use writer::LicenseWriter;
