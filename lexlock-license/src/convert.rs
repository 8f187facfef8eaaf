//! Converter abstraction and the default INI-style converter.
//!
//! A converter is the pluggable boundary between the license record and
//! its canonical text form. Converters are selected explicitly by
//! [`ConverterFormat`] through a [`ConverterRegistry`], never inferred
//! from the text itself, so encoded content cannot be steered into the
//! wrong grammar.

use crate::canonical::CanonicalText;
use crate::error::{ConverterError, ConverterResult};
use crate::license::{FeatureValue, License, LicenseId};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::Arc;

/// Date format used by the INI grammar.
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Identifier of a canonical text grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConverterFormat {
    /// The default `key=value`-per-line grammar.
    Ini,
}

impl fmt::Display for ConverterFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ini => write!(f, "ini"),
        }
    }
}

/// Bidirectional mapping between a [`License`] and [`CanonicalText`].
///
/// Implementations own the round-trip law: `deserialize(serialize(l))`
/// must equal `l` for every license they can represent.
pub trait LicenseConverter: Send + Sync {
    /// Returns the grammar this converter implements.
    fn format(&self) -> ConverterFormat;

    /// Renders a license into canonical text.
    ///
    /// # Errors
    ///
    /// Returns [`ConverterError::UnsupportedField`] if a field cannot be
    /// represented in the target grammar.
    fn serialize(&self, license: &License) -> ConverterResult<CanonicalText>;

    /// Recovers a license from canonical text.
    ///
    /// # Errors
    ///
    /// Returns [`ConverterError::MalformedText`] on syntactically invalid
    /// input. The unknown-field policy is converter-defined and documented
    /// per converter.
    fn deserialize(&self, text: &CanonicalText) -> ConverterResult<License>;
}

/// The default converter: one `key=value` per line.
///
/// ```text
/// id=ABC-123
/// issued=2026-05-01
/// expiry=2030-01-01
/// features.pro=true
/// features.seats=25
/// custom.customer=Acme Corp
/// ```
///
/// Lines appear in a fixed order (`id`, `issued`, `expiry`, features
/// sorted by name, custom attributes sorted by key), so the rendering is
/// deterministic. Feature and attribute names are restricted to
/// `[A-Za-z0-9_-]`; values may contain anything but line breaks (there is
/// no escape syntax). Dates are `YYYY-MM-DD`.
///
/// Unknown-field policy: **reject**. A key this grammar does not define
/// fails deserialization with [`ConverterError::UnknownField`] rather
/// than being silently dropped; a newer server cannot emit constraints
/// an older client would ignore.
#[derive(Debug, Default, Clone, Copy)]
pub struct IniLicenseConverter;

impl IniLicenseConverter {
    fn push_value(lines: &mut Vec<String>, key: &str, value: &str) -> ConverterResult<()> {
        if value.contains('\n') || value.contains('\r') {
            return Err(ConverterError::UnsupportedField {
                field: key.to_string(),
                reason: "value contains a line break".to_string(),
            });
        }
        lines.push(format!("{key}={value}"));
        Ok(())
    }

    fn check_name(field: &str, name: &str) -> ConverterResult<()> {
        if name.is_empty() {
            return Err(ConverterError::UnsupportedField {
                field: field.to_string(),
                reason: "name is empty".to_string(),
            });
        }
        if !name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        {
            return Err(ConverterError::UnsupportedField {
                field: field.to_string(),
                reason: "name may only contain [A-Za-z0-9_-]".to_string(),
            });
        }
        Ok(())
    }

    fn valid_name(name: &str) -> bool {
        !name.is_empty()
            && name
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    }

    fn parse_date(key: &str, value: &str) -> ConverterResult<NaiveDate> {
        NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|_| {
            ConverterError::MalformedText(format!("invalid date for `{key}`: `{value}`"))
        })
    }
}

impl LicenseConverter for IniLicenseConverter {
    fn format(&self) -> ConverterFormat {
        ConverterFormat::Ini
    }

    fn serialize(&self, license: &License) -> ConverterResult<CanonicalText> {
        let mut lines = Vec::new();

        Self::push_value(&mut lines, "id", license.id().as_str())?;
        if let Some(date) = license.issued() {
            lines.push(format!("issued={}", date.format(DATE_FORMAT)));
        }
        if let Some(date) = license.expiry() {
            lines.push(format!("expiry={}", date.format(DATE_FORMAT)));
        }
        for (name, value) in license.features() {
            let key = format!("features.{name}");
            Self::check_name(&key, name)?;
            Self::push_value(&mut lines, &key, &value.to_string())?;
        }
        for (name, value) in license.custom() {
            let key = format!("custom.{name}");
            Self::check_name(&key, name)?;
            Self::push_value(&mut lines, &key, value)?;
        }

        Ok(CanonicalText::new(lines.join("\n")))
    }

    fn deserialize(&self, text: &CanonicalText) -> ConverterResult<License> {
        let mut id: Option<LicenseId> = None;
        let mut issued: Option<NaiveDate> = None;
        let mut expiry: Option<NaiveDate> = None;
        let mut features: BTreeMap<String, FeatureValue> = BTreeMap::new();
        let mut custom: BTreeMap<String, String> = BTreeMap::new();

        for line in text.as_str().lines() {
            let line = line.trim_end_matches('\r');
            if line.is_empty() {
                continue;
            }

            let Some((key, value)) = line.split_once('=') else {
                return Err(ConverterError::MalformedText(format!(
                    "line without `=`: `{line}`"
                )));
            };

            match key {
                "id" => {
                    if id.is_some() {
                        return Err(ConverterError::MalformedText("duplicate `id`".to_string()));
                    }
                    id = Some(LicenseId::new(value));
                }
                "issued" => {
                    if issued.is_some() {
                        return Err(ConverterError::MalformedText(
                            "duplicate `issued`".to_string(),
                        ));
                    }
                    issued = Some(Self::parse_date("issued", value)?);
                }
                "expiry" => {
                    if expiry.is_some() {
                        return Err(ConverterError::MalformedText(
                            "duplicate `expiry`".to_string(),
                        ));
                    }
                    expiry = Some(Self::parse_date("expiry", value)?);
                }
                _ => {
                    if let Some(name) = key.strip_prefix("features.") {
                        if !Self::valid_name(name) {
                            return Err(ConverterError::MalformedText(format!(
                                "invalid feature name `{name}`"
                            )));
                        }
                        let Some(parsed) = FeatureValue::from_text(value) else {
                            return Err(ConverterError::MalformedText(format!(
                                "invalid feature value for `{name}`: `{value}`"
                            )));
                        };
                        if features.insert(name.to_string(), parsed).is_some() {
                            return Err(ConverterError::MalformedText(format!(
                                "duplicate feature `{name}`"
                            )));
                        }
                    } else if let Some(name) = key.strip_prefix("custom.") {
                        if !Self::valid_name(name) {
                            return Err(ConverterError::MalformedText(format!(
                                "invalid custom attribute name `{name}`"
                            )));
                        }
                        if custom.insert(name.to_string(), value.to_string()).is_some() {
                            return Err(ConverterError::MalformedText(format!(
                                "duplicate custom attribute `{name}`"
                            )));
                        }
                    } else {
                        return Err(ConverterError::UnknownField(key.to_string()));
                    }
                }
            }
        }

        let Some(id) = id else {
            return Err(ConverterError::MalformedText("missing `id`".to_string()));
        };

        let mut license = License::new(id);
        if let Some(date) = issued {
            license = license.with_issued(date);
        }
        if let Some(date) = expiry {
            license = license.with_expiry(date);
        }
        for (name, value) in features {
            license = license.with_feature(name, value);
        }
        for (key, value) in custom {
            license = license.with_custom(key, value);
        }
        Ok(license)
    }
}

/// Maps format identifiers to converter instances.
///
/// The registry is the injection point for custom grammars; the default
/// registry knows only [`IniLicenseConverter`].
#[derive(Clone)]
pub struct ConverterRegistry {
    converters: HashMap<ConverterFormat, Arc<dyn LicenseConverter>>,
}

impl ConverterRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            converters: HashMap::new(),
        }
    }

    /// Creates a registry with the default INI converter registered.
    #[must_use]
    pub fn with_defaults() -> Self {
        let mut registry = Self::empty();
        registry.register(Arc::new(IniLicenseConverter));
        registry
    }

    /// Registers a converter under its own format id, replacing any
    /// previous registration for that format.
    pub fn register(&mut self, converter: Arc<dyn LicenseConverter>) {
        self.converters.insert(converter.format(), converter);
    }

    /// Looks up the converter for a format.
    ///
    /// # Errors
    ///
    /// Returns [`ConverterError::UnknownFormat`] if nothing is registered.
    pub fn get(&self, format: ConverterFormat) -> ConverterResult<Arc<dyn LicenseConverter>> {
        self.converters
            .get(&format)
            .cloned()
            .ok_or(ConverterError::UnknownFormat(format))
    }
}

impl Default for ConverterRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}
