//! The canonical text form of a license.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Deterministic textual rendering of a [`License`](crate::License).
///
/// This is the only value that crosses the converter/encoder boundary:
/// the signature in the secure envelope is computed over exactly these
/// bytes, so converters must guarantee that structurally equal licenses
/// produce byte-identical text and distinct licenses produce distinct
/// text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CanonicalText(String);

impl CanonicalText {
    /// Wraps an already-canonical string.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    /// Returns the text as a string slice.
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

impl fmt::Display for CanonicalText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for CanonicalText {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
