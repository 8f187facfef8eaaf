//! The license record.
//!
//! A [`License`] is constructed once on the issuing server and read-only
//! afterwards: the encoding pipeline never mutates or reinterprets its
//! fields. Feature and custom-attribute maps are `BTreeMap`s: insertion
//! order is irrelevant to license identity, and the canonical text form
//! must not depend on it.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use uuid::Uuid;

/// Unique identifier of a license.
///
/// Ids are free-form strings (`ABC-123` style, assigned by the issuing
/// organization) or generated with [`LicenseId::generate`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LicenseId(String);

impl LicenseId {
    /// Creates an id from an existing string.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generates a random id.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Returns the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LicenseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for LicenseId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for LicenseId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Value of a licensed feature: an on/off flag or a numeric quota.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FeatureValue {
    /// Feature is enabled or disabled.
    Bool(bool),
    /// Feature is granted up to a numeric limit (seats, requests, ...).
    Quota(i64),
}

impl FeatureValue {
    /// Returns the boolean value, if this is a flag.
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            Self::Quota(_) => None,
        }
    }

    /// Returns the quota value, if this is a quota.
    #[must_use]
    pub fn as_quota(&self) -> Option<i64> {
        match self {
            Self::Bool(_) => None,
            Self::Quota(n) => Some(*n),
        }
    }

    /// Parses the textual form: `true`, `false`, or a decimal integer.
    #[must_use]
    pub fn from_text(s: &str) -> Option<Self> {
        match s {
            "true" => Some(Self::Bool(true)),
            "false" => Some(Self::Bool(false)),
            _ => s.parse::<i64>().ok().map(Self::Quota),
        }
    }
}

impl fmt::Display for FeatureValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{b}"),
            Self::Quota(n) => write!(f, "{n}"),
        }
    }
}

impl From<bool> for FeatureValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<i64> for FeatureValue {
    fn from(n: i64) -> Self {
        Self::Quota(n)
    }
}

/// An immutable license record.
///
/// Built with [`License::new`] plus the `with_*` methods; once handed to
/// the pipeline only the accessors are available.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct License {
    id: LicenseId,
    issued: Option<NaiveDate>,
    expiry: Option<NaiveDate>,
    features: BTreeMap<String, FeatureValue>,
    custom: BTreeMap<String, String>,
}

impl License {
    /// Creates a license with the given id and no other fields set.
    #[must_use]
    pub fn new(id: impl Into<LicenseId>) -> Self {
        Self {
            id: id.into(),
            issued: None,
            expiry: None,
            features: BTreeMap::new(),
            custom: BTreeMap::new(),
        }
    }

    /// Sets the issuance date.
    #[must_use]
    pub fn with_issued(mut self, date: NaiveDate) -> Self {
        self.issued = Some(date);
        self
    }

    /// Sets the expiry date.
    #[must_use]
    pub fn with_expiry(mut self, date: NaiveDate) -> Self {
        self.expiry = Some(date);
        self
    }

    /// Grants a feature. Granting the same name twice keeps the last value.
    #[must_use]
    pub fn with_feature(mut self, name: impl Into<String>, value: impl Into<FeatureValue>) -> Self {
        self.features.insert(name.into(), value.into());
        self
    }

    /// Attaches a free-form custom attribute.
    #[must_use]
    pub fn with_custom(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.custom.insert(key.into(), value.into());
        self
    }

    /// Returns the license id.
    #[must_use]
    pub fn id(&self) -> &LicenseId {
        &self.id
    }

    /// Returns the issuance date, if set.
    #[must_use]
    pub fn issued(&self) -> Option<NaiveDate> {
        self.issued
    }

    /// Returns the expiry date, if set.
    #[must_use]
    pub fn expiry(&self) -> Option<NaiveDate> {
        self.expiry
    }

    /// Returns all granted features, sorted by name.
    #[must_use]
    pub fn features(&self) -> &BTreeMap<String, FeatureValue> {
        &self.features
    }

    /// Returns the value of a single feature.
    #[must_use]
    pub fn feature(&self, name: &str) -> Option<FeatureValue> {
        self.features.get(name).copied()
    }

    /// Returns all custom attributes, sorted by key.
    #[must_use]
    pub fn custom(&self) -> &BTreeMap<String, String> {
        &self.custom
    }

    /// Returns the value of a single custom attribute.
    #[must_use]
    pub fn custom_field(&self, key: &str) -> Option<&str> {
        self.custom.get(key).map(String::as_str)
    }
}
