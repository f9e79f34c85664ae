//! Bidirectional URI structural codec.
//!
//! WHY: request dispatch and forwarding need to take arbitrary URIs apart,
//! hierarchical or opaque, absolute or relative, and put them back together
//! without losing information, while normalizing case, default ports and
//! reserved-character escaping.
//!
//! WHAT: an RFC 3986 oriented codec between strings and the immutable
//! [`UriDocument`] record, plus the building blocks it is made of:
//! percent codec, token-aware path segmenter, multi-valued query codec,
//! `{name}` template expansion, and the default-port registry.
//!
//! HOW: pure functions over owned strings; parsing decomposes components
//! leaf-first and serialization is the exact inverse, so [`normalize`]
//! (encode after parse) is idempotent.

mod authority;
mod document;
mod error;
pub mod percent;
pub mod ports;
mod query;
mod segments;
mod template;

pub use authority::Authority;
pub use document::{normalize, UriDocument, UriPath};
pub use error::UriSyntaxError;
pub use query::{QueryMap, QueryValue};
pub use segments::{join_segments, split_segments, PATH_DELIMITER};
pub use template::expand;
