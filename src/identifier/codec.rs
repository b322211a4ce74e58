//! Encoding identifiers into path segments and back.
//!
//! Identifiers are usually IRIs full of `/`, `:` and `#`, none of which
//! survive as a single path segment. The public form is the unpadded
//! URL-safe base64 of the identifier's UTF-8 bytes.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use thiserror::Error;

use crate::identifier::{EncodedIdentifier, Identifier};

/// Failure to recover an identifier from its encoded form.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("encoded identifier is empty")]
    Empty,

    #[error("encoded identifier is not valid base64: {0}")]
    Malformed(String),

    #[error("decoded identifier is not valid UTF-8")]
    NotUtf8,
}

/// Encoder/decoder pair for the public identifier form.
///
/// Implementations must satisfy `decode(encode(i)) == i`.
pub trait IdentifierCodec: Send + Sync {
    fn encode(&self, id: &Identifier) -> EncodedIdentifier;

    fn decode(&self, raw: &str) -> Result<Identifier, DecodeError>;
}

/// Unpadded URL-safe base64 codec.
#[derive(Debug, Clone, Copy, Default)]
pub struct UrlSafeCodec;

impl IdentifierCodec for UrlSafeCodec {
    fn encode(&self, id: &Identifier) -> EncodedIdentifier {
        EncodedIdentifier::from_raw(URL_SAFE_NO_PAD.encode(id.as_str().as_bytes()))
    }

    fn decode(&self, raw: &str) -> Result<Identifier, DecodeError> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(DecodeError::Empty);
        }

        let bytes = URL_SAFE_NO_PAD
            .decode(raw)
            .map_err(|e| DecodeError::Malformed(e.to_string()))?;
        let text = String::from_utf8(bytes).map_err(|_| DecodeError::NotUtf8)?;

        Identifier::new(text).map_err(|_| DecodeError::Empty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(s: &str) -> Identifier {
        Identifier::new(s).unwrap()
    }

    #[test]
    fn test_round_trip() {
        let codec = UrlSafeCodec;
        for raw in [
            "abc123",
            "http://data.europa.eu/w21/643f8b7a-1ccd-4f1a-b4a2-1d31a87c0ff3",
            "http://example.org/with?query=1#frag",
            "urn:x-local:ünïcødé/segment",
        ] {
            let encoded = codec.encode(&id(raw));
            assert_eq!(codec.decode(encoded.as_str()).unwrap(), id(raw));
        }
    }

    #[test]
    fn test_encoded_form_is_single_segment() {
        let encoded = UrlSafeCodec.encode(&id("http://example.org/a/b?c=d#e"));
        assert!(encoded
            .as_str()
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'));
    }

    #[test]
    fn test_decode_rejects_garbage() {
        let codec = UrlSafeCodec;
        assert_eq!(codec.decode(""), Err(DecodeError::Empty));
        assert!(matches!(codec.decode("not base64!"), Err(DecodeError::Malformed(_))));
        // 0xff 0xfe is not UTF-8
        assert_eq!(codec.decode("__4"), Err(DecodeError::NotUtf8));
    }

    #[test]
    fn test_decode_tolerates_surrounding_whitespace() {
        let codec = UrlSafeCodec;
        let encoded = codec.encode(&id("abc123"));
        let padded = format!("  {}\n", encoded);
        assert_eq!(codec.decode(&padded).unwrap(), id("abc123"));
    }
}
