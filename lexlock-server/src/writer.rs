//! The issuance facade: license record to encoded string or file.

use crate::error::WriterResult;
use lexlock_crypto::{encode, ServerKeyMaterial};
use lexlock_license::{ConverterFormat, ConverterRegistry, License};
use std::fs;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info};

/// Converts licenses to their secure string form and optionally persists
/// them. Pure orchestration: converter lookup, then encode, then (for
/// files) a single overwriting UTF-8 write. All failures are pass-through
/// from the layers below.
///
/// Stateless apart from the injected key material; one writer may be
/// shared across threads.
pub struct LicenseWriter {
    keys: Arc<ServerKeyMaterial>,
    registry: ConverterRegistry,
}

impl LicenseWriter {
    /// Creates a writer with the default converter registry (INI).
    #[must_use]
    pub fn new(keys: Arc<ServerKeyMaterial>) -> Self {
        Self {
            keys,
            registry: ConverterRegistry::with_defaults(),
        }
    }

    /// Creates a writer with a custom converter registry.
    #[must_use]
    pub fn with_registry(keys: Arc<ServerKeyMaterial>, registry: ConverterRegistry) -> Self {
        Self { keys, registry }
    }

    /// Encodes a license with the default converter.
    pub fn to_string(&self, license: &License) -> WriterResult<String> {
        self.to_string_with(license, ConverterFormat::Ini)
    }

    /// Encodes a license with an explicitly selected converter.
    pub fn to_string_with(
        &self,
        license: &License,
        format: ConverterFormat,
    ) -> WriterResult<String> {
        let converter = self.registry.get(format)?;
        let text = converter.serialize(license)?;
        let encoded = encode(text.as_str(), &self.keys)?;
        info!(
            license_id = %license.id(),
            key = %self.keys.fingerprint(),
            %format,
            "encoded license"
        );
        Ok(encoded.into_string())
    }

    /// Writes the encoded license to a UTF-8 text file, overwriting any
    /// existing content. The file is flushed and closed on all exit
    /// paths; no partial-write recovery is attempted.
    pub fn to_file(&self, path: impl AsRef<Path>, license: &License) -> WriterResult<()> {
        self.to_file_with(path, license, ConverterFormat::Ini)
    }

    /// Like [`to_file`](Self::to_file) with an explicit converter.
    pub fn to_file_with(
        &self,
        path: impl AsRef<Path>,
        license: &License,
        format: ConverterFormat,
    ) -> WriterResult<()> {
        let path = path.as_ref();
        let encoded = self.to_string_with(license, format)?;
        fs::write(path, encoded.as_bytes())?;
        debug!(license_id = %license.id(), path = %path.display(), "wrote license file");
        Ok(())
    }
}
