//! License records and their canonical text form.
//!
//! A [`License`] is an immutable record describing what is licensed and
//! under what constraints. A [`LicenseConverter`] maps a license to and
//! from [`CanonicalText`], a deterministic `key=value`-per-line rendering:
//! two structurally equal licenses always produce byte-identical text, so
//! the signature layer in `lexlock-crypto` can sign the text and verify it
//! meaningfully on the client.
//!
//! Converter selection is always explicit (by [`ConverterFormat`], through
//! a [`ConverterRegistry`]); the format is never inferred from content.
//! The default converter is [`IniLicenseConverter`].

mod canonical;
mod convert;
mod error;
mod license;

pub use canonical::CanonicalText;
pub use convert::{ConverterFormat, ConverterRegistry, IniLicenseConverter, LicenseConverter};
pub use error::{ConverterError, ConverterResult};
pub use license::{FeatureValue, License, LicenseId};
