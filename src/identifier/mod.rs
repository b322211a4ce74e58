//! Entity identifiers and their public path-segment encoding.
//!
//! # Data Flow
//! ```text
//! Identifier ("http://data.example.eu/w21/abc")
//!     → codec.rs encode()
//!     → EncodedIdentifier ("aHR0cDovL2RhdGEu...")   (used in display URLs)
//!
//! path segment from a routed URL
//!     → codec.rs decode()
//!     → Identifier | DecodeError
//! ```
//!
//! # Design Decisions
//! - Identifiers are opaque: no structure is assumed beyond "non-empty"
//! - Decoding never panics; malformed input is a `DecodeError`

pub mod codec;

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

pub use codec::{DecodeError, IdentifierCodec, UrlSafeCodec};

/// Errors raised when constructing an identifier.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdentifierError {
    #[error("identifier must not be empty")]
    Empty,
}

/// Opaque, stable name of one entity instance.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Identifier(String);

impl Identifier {
    /// Create an identifier. Whitespace-only strings are rejected.
    pub fn new(value: impl Into<String>) -> Result<Self, IdentifierError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(IdentifierError::Empty);
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Identifier {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Identifier {
    type Error = IdentifierError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Identifier> for String {
    fn from(id: Identifier) -> Self {
        id.0
    }
}

/// URL-safe form of an [`Identifier`], usable as a single path segment.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EncodedIdentifier(String);

impl EncodedIdentifier {
    pub(crate) fn from_raw(raw: String) -> Self {
        Self(raw)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EncodedIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identifier_rejects_blank() {
        assert_eq!(Identifier::new(""), Err(IdentifierError::Empty));
        assert_eq!(Identifier::new("   "), Err(IdentifierError::Empty));
    }

    #[test]
    fn test_identifier_keeps_value_verbatim() {
        let id = Identifier::new("http://example.org/a b").unwrap();
        assert_eq!(id.as_str(), "http://example.org/a b");
        assert_eq!(id.to_string(), "http://example.org/a b");
    }

    #[test]
    fn test_identifier_deserialize_validates() {
        let ok: Identifier = serde_json::from_str("\"abc123\"").unwrap();
        assert_eq!(ok.as_str(), "abc123");
        assert!(serde_json::from_str::<Identifier>("\"\"").is_err());
    }
}
