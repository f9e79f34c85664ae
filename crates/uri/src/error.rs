//! URI parsing and serialization error types.

use thiserror::Error;

/// Error returned when a raw string does not conform to URI grammar or a
/// document cannot be serialized into a valid URI.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum UriSyntaxError {
    #[error("malformed percent escape in: {0}")]
    MalformedEscape(String),

    #[error("invalid scheme: {0}")]
    InvalidScheme(String),

    #[error("cannot serialize document: {0}")]
    Unserializable(String),
}
