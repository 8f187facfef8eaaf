//! The verification facade: encoded string or file to license record.

use crate::error::ReaderResult;
use lexlock_crypto::{decode, ClientKeyMaterial};
use lexlock_license::{CanonicalText, ConverterFormat, ConverterRegistry, License};
use std::fs;
use std::path::Path;
use std::sync::Arc;
use tracing::warn;

/// Recovers license records from their secure string form.
///
/// A record returned by this facade is authentic: the decode step
/// verified the envelope signature before any content was inspected.
/// Rejections are logged as audit events carrying only the failure class
/// and the verifying-key fingerprint, never key material or the raw
/// encoded content.
pub struct LicenseReader {
    keys: Arc<ClientKeyMaterial>,
    registry: ConverterRegistry,
}

impl LicenseReader {
    /// Creates a reader with the default converter registry (INI).
    #[must_use]
    pub fn new(keys: Arc<ClientKeyMaterial>) -> Self {
        Self {
            keys,
            registry: ConverterRegistry::with_defaults(),
        }
    }

    /// Creates a reader with a custom converter registry.
    #[must_use]
    pub fn with_registry(keys: Arc<ClientKeyMaterial>, registry: ConverterRegistry) -> Self {
        Self { keys, registry }
    }

    /// Verifies an encoded license and recovers the record, using the
    /// default converter.
    pub fn from_string(&self, encoded: &str) -> ReaderResult<License> {
        self.from_string_with(encoded, ConverterFormat::Ini)
    }

    /// Like [`from_string`](Self::from_string) with an explicit converter.
    pub fn from_string_with(
        &self,
        encoded: &str,
        format: ConverterFormat,
    ) -> ReaderResult<License> {
        let converter = self.registry.get(format)?;
        let text = decode(encoded, &self.keys).inspect_err(|e| {
            warn!(key = %self.keys.fingerprint(), error = %e, "license rejected");
        })?;
        Ok(converter.deserialize(&CanonicalText::new(text))?)
    }

    /// Reads an encoded license from a UTF-8 text file and verifies it.
    pub fn from_file(&self, path: impl AsRef<Path>) -> ReaderResult<License> {
        self.from_file_with(path, ConverterFormat::Ini)
    }

    /// Like [`from_file`](Self::from_file) with an explicit converter.
    pub fn from_file_with(
        &self,
        path: impl AsRef<Path>,
        format: ConverterFormat,
    ) -> ReaderResult<License> {
        let encoded = fs::read_to_string(path.as_ref())?;
        self.from_string_with(&encoded, format)
    }
}
