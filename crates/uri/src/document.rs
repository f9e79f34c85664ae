//! The URI structural codec between strings and structured documents.
//!
//! [`UriDocument::parse`] losslessly decomposes a URI, hierarchical or
//! opaque, absolute or relative, into an immutable record;
//! [`UriDocument::encode`] is the inverse, normalizing scheme/host case,
//! eliding default ports and re-escaping reserved characters. [`normalize`]
//! composes the two and is idempotent.

use std::borrow::Cow;

use crate::authority::Authority;
use crate::error::UriSyntaxError;
use crate::percent;
use crate::query::QueryMap;
use crate::segments::{self, SUBSTITUTION_TOKEN};

/// Parsed path portion: decoded segments, an absoluteness flag, and the
/// trailing `file` segment (set when the raw path does not end with `/`).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UriPath {
    segments: Vec<String>,
    absolute: bool,
    file: Option<String>,
}

impl UriPath {
    #[must_use]
    pub fn new(segments: Vec<String>, absolute: bool, file: Option<String>) -> Self {
        Self {
            segments,
            absolute,
            file,
        }
    }

    /// The directory segments, excluding any trailing file segment.
    #[must_use]
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// True when the path begins with the delimiter.
    #[must_use]
    pub fn is_absolute(&self) -> bool {
        self.absolute
    }

    /// The trailing segment when the path does not end in a delimiter.
    #[must_use]
    pub fn file(&self) -> Option<&str> {
        self.file.as_deref()
    }

    /// All segments in order, the file segment included.
    #[must_use]
    pub fn all_segments(&self) -> Vec<&str> {
        let mut all: Vec<&str> = self.segments.iter().map(String::as_str).collect();
        if let Some(file) = &self.file {
            all.push(file);
        }
        all
    }
}

/// Structured representation of a URI.
///
/// Immutable once constructed; derive a changed document through the
/// `with_*` methods. `body` is present exactly when the URI is opaque
/// (`mailto:user@host` style, no hierarchical authority/path).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UriDocument {
    scheme: Option<String>,
    body: Option<String>,
    authority: Option<Authority>,
    path: Option<UriPath>,
    query: Option<QueryMap>,
    fragment: Option<String>,
}

impl UriDocument {
    /// Parses a raw URI string into a document.
    ///
    /// # Errors
    ///
    /// Returns [`UriSyntaxError`] when the input does not conform to URI
    /// grammar (malformed percent escape, illegal scheme).
    pub fn parse(raw: &str) -> Result<Self, UriSyntaxError> {
        let raw = rewrite_unc_input(raw);

        let (rest, fragment) = match raw.split_once('#') {
            Some((rest, fragment)) => (rest, Some(decode_component(fragment)?)),
            None => (raw.as_ref(), None),
        };

        let (scheme, rest) = split_scheme(rest)?;

        // Opaque: a scheme whose specific part carries no hierarchy marker.
        if scheme.is_some() && !rest.starts_with('/') {
            let (body_raw, query) = match rest.split_once('?') {
                Some((body_raw, query_raw)) => {
                    (body_raw, Some(QueryMap::parse(query_raw, true)?))
                }
                None => (rest, None),
            };

            return Ok(Self {
                scheme,
                body: Some(decode_component(body_raw)?),
                authority: None,
                path: None,
                query: query.filter(|map| !map.is_empty()),
                fragment,
            });
        }

        let (authority, rest) = if let Some(after) = rest.strip_prefix("//") {
            let end = after.find(['/', '?']).unwrap_or(after.len());
            let authority_raw = &after[..end];
            let authority = if authority_raw.is_empty() {
                None
            } else {
                Some(Authority::parse(authority_raw)?)
            };
            (authority, &after[end..])
        } else {
            (None, rest)
        };

        let (path_raw, query) = match rest.split_once('?') {
            Some((path_raw, query_raw)) => (path_raw, Some(QueryMap::parse(query_raw, true)?)),
            None => (rest, None),
        };

        let path = if path_raw.is_empty() {
            None
        } else {
            Some(parse_path(path_raw)?)
        };

        Ok(Self {
            scheme,
            body: None,
            authority,
            path,
            query: query.filter(|map| !map.is_empty()),
            fragment,
        })
    }

    /// Serializes the document back into a URI string.
    ///
    /// # Errors
    ///
    /// Returns [`UriSyntaxError::Unserializable`] for contradictory fields:
    /// an opaque body combined with hierarchical components, an opaque body
    /// without a scheme, or a scheme with nothing after it.
    pub fn encode(&self) -> Result<String, UriSyntaxError> {
        if let Some(body) = &self.body {
            if self.authority.is_some() || self.path.is_some() {
                return Err(UriSyntaxError::Unserializable(
                    "opaque body combined with authority or path".to_string(),
                ));
            }
            let Some(scheme) = &self.scheme else {
                return Err(UriSyntaxError::Unserializable(
                    "opaque body without a scheme".to_string(),
                ));
            };

            let mut out = format!("{scheme}:{}", encode_body(body));
            self.append_query_and_fragment(&mut out);
            return Ok(rewrite_unc_output(out));
        }

        let mut out = String::new();

        if let Some(scheme) = &self.scheme {
            if self.authority.is_none()
                && self.path.is_none()
                && self.query.as_ref().is_none_or(QueryMap::is_empty)
            {
                return Err(UriSyntaxError::Unserializable(
                    "scheme without body, authority, path or query".to_string(),
                ));
            }
            out.push_str(scheme);
            out.push(':');
        }

        if let Some(authority) = &self.authority {
            out.push_str("//");
            out.push_str(&authority.encode(self.scheme.as_deref()));
        }

        if let Some(path) = &self.path {
            out.push_str(&encode_path(path, self.authority.is_some()));
        }

        self.append_query_and_fragment(&mut out);
        Ok(rewrite_unc_output(out))
    }

    fn append_query_and_fragment(&self, out: &mut String) {
        if let Some(query) = &self.query {
            if !query.is_empty() {
                out.push('?');
                out.push_str(&query.encode(true));
            }
        }
        if let Some(fragment) = &self.fragment {
            out.push('#');
            out.push_str(&percent::encode_with(
                fragment,
                is_fragment_safe,
                encoding_rs::UTF_8,
            ));
        }
    }

    #[must_use]
    pub fn scheme(&self) -> Option<&str> {
        self.scheme.as_deref()
    }

    /// The decoded scheme-specific part of an opaque URI.
    #[must_use]
    pub fn body(&self) -> Option<&str> {
        self.body.as_deref()
    }

    #[must_use]
    pub fn authority(&self) -> Option<&Authority> {
        self.authority.as_ref()
    }

    #[must_use]
    pub fn path(&self) -> Option<&UriPath> {
        self.path.as_ref()
    }

    #[must_use]
    pub fn query(&self) -> Option<&QueryMap> {
        self.query.as_ref()
    }

    #[must_use]
    pub fn fragment(&self) -> Option<&str> {
        self.fragment.as_deref()
    }

    /// True when the URI has no hierarchical authority/path.
    #[must_use]
    pub fn is_opaque(&self) -> bool {
        self.body.is_some()
    }

    /// True when the URI carries a scheme.
    #[must_use]
    pub fn is_absolute(&self) -> bool {
        self.scheme.is_some()
    }

    /// Functional update: new document with the given scheme (lowercased).
    #[must_use]
    pub fn with_scheme(mut self, scheme: impl Into<String>) -> Self {
        self.scheme = Some(scheme.into().to_ascii_lowercase());
        self
    }

    /// Functional update: new opaque document body; clears the hierarchical
    /// components to preserve the opacity invariant.
    #[must_use]
    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self.authority = None;
        self.path = None;
        self
    }

    /// Functional update: new authority; clears any opaque body.
    #[must_use]
    pub fn with_authority(mut self, authority: Authority) -> Self {
        self.authority = Some(authority);
        self.body = None;
        self
    }

    /// Functional update: new path; clears any opaque body.
    #[must_use]
    pub fn with_path(mut self, path: UriPath) -> Self {
        self.path = Some(path);
        self.body = None;
        self
    }

    /// Functional update: new query mapping.
    #[must_use]
    pub fn with_query(mut self, query: QueryMap) -> Self {
        self.query = Some(query);
        self
    }

    /// Functional update: new fragment.
    #[must_use]
    pub fn with_fragment(mut self, fragment: impl Into<String>) -> Self {
        self.fragment = Some(fragment.into());
        self
    }
}

/// Parses and re-serializes `raw`, producing the canonical form.
/// Idempotent: `normalize(normalize(x)) == normalize(x)`.
///
/// # Errors
///
/// Propagates any [`UriSyntaxError`] from parsing or serialization.
pub fn normalize(raw: &str) -> Result<String, UriSyntaxError> {
    UriDocument::parse(raw)?.encode()
}

/// Rewrites the Windows UNC file-URI special case (`file:////server/share`)
/// into canonical server-based form (`file://server/share`).
fn rewrite_unc_input(raw: &str) -> Cow<'_, str> {
    match raw.strip_prefix("file:////") {
        Some(rest) => Cow::Owned(format!("file://{rest}")),
        None => Cow::Borrowed(raw),
    }
}

/// The symmetric rewrite on output.
fn rewrite_unc_output(out: String) -> String {
    match out.strip_prefix("file:////") {
        Some(rest) => format!("file://{rest}"),
        None => out,
    }
}

/// Splits a leading scheme when one is present before any path or query
/// delimiter. Scheme text is validated and lowercased.
fn split_scheme(input: &str) -> Result<(Option<String>, &str), UriSyntaxError> {
    let Some(colon) = input.find(':') else {
        return Ok((None, input));
    };

    if let Some(delimiter) = input.find(['/', '?']) {
        if delimiter < colon {
            return Ok((None, input));
        }
    }

    let scheme = &input[..colon];
    if !is_valid_scheme(scheme) {
        return Err(UriSyntaxError::InvalidScheme(scheme.to_string()));
    }

    Ok((Some(scheme.to_ascii_lowercase()), &input[colon + 1..]))
}

/// RFC 3986 scheme: ALPHA *( ALPHA / DIGIT / "+" / "-" / "." )
fn is_valid_scheme(scheme: &str) -> bool {
    let mut chars = scheme.chars();
    chars
        .next()
        .is_some_and(|first| first.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}

fn parse_path(path_raw: &str) -> Result<UriPath, UriSyntaxError> {
    let absolute = path_raw.starts_with(segments::PATH_DELIMITER);

    let mut parts = Vec::new();
    for part in segments::split_segments(path_raw) {
        parts.push(decode_component(&part)?);
    }

    let file = if path_raw.ends_with(segments::PATH_DELIMITER) {
        None
    } else {
        parts.pop()
    };

    Ok(UriPath::new(parts, absolute, file))
}

fn encode_path(path: &UriPath, has_authority: bool) -> String {
    let encoded: Vec<String> = path
        .segments()
        .iter()
        .map(|segment| encode_segment(segment))
        .collect();

    let mut rendered = segments::join_segments(&encoded);

    if let Some(file) = path.file() {
        if !rendered.is_empty() || !path.segments().is_empty() {
            rendered.push(segments::PATH_DELIMITER);
        }
        rendered.push_str(&encode_segment(file));
    } else if !path.segments().is_empty() {
        rendered.push(segments::PATH_DELIMITER);
    }

    if path.is_absolute() || has_authority {
        rendered.insert(0, segments::PATH_DELIMITER);
    }

    rendered
}

/// Percent-decodes a component strictly, leaving substitution tokens
/// verbatim so a pre-expansion URI survives the round trip.
fn decode_component(text: &str) -> Result<String, UriSyntaxError> {
    try_map_non_token_spans(text, percent::decode)
}

fn encode_segment(text: &str) -> String {
    encode_opaque_tokens(text, is_pchar_safe)
}

fn encode_body(text: &str) -> String {
    encode_opaque_tokens(text, is_body_safe)
}

/// Percent-encodes the non-token spans of `text` with the given safe set.
fn encode_opaque_tokens(text: &str, keep: fn(u8) -> bool) -> String {
    map_non_token_spans(text, |span| {
        percent::encode_with(span, keep, encoding_rs::UTF_8)
    })
}

/// Applies `transform` to the spans between substitution tokens, keeping the
/// tokens themselves untouched.
fn map_non_token_spans(text: &str, mut transform: impl FnMut(&str) -> String) -> String {
    let mut out = String::with_capacity(text.len());
    let mut cursor = 0;

    for token in SUBSTITUTION_TOKEN.find_iter(text) {
        out.push_str(&transform(&text[cursor..token.start()]));
        out.push_str(token.as_str());
        cursor = token.end();
    }

    out.push_str(&transform(&text[cursor..]));
    out
}

/// Fallible variant of [`map_non_token_spans`], for the decode direction.
fn try_map_non_token_spans(
    text: &str,
    mut transform: impl FnMut(&str) -> Result<String, UriSyntaxError>,
) -> Result<String, UriSyntaxError> {
    let mut out = String::with_capacity(text.len());
    let mut cursor = 0;

    for token in SUBSTITUTION_TOKEN.find_iter(text) {
        out.push_str(&transform(&text[cursor..token.start()])?);
        out.push_str(token.as_str());
        cursor = token.end();
    }

    out.push_str(&transform(&text[cursor..])?);
    Ok(out)
}

/// pchar: unreserved / sub-delims / ":" / "@"
fn is_pchar_safe(byte: u8) -> bool {
    percent::is_unreserved(byte)
        || matches!(
            byte,
            b'!' | b'$'
                | b'&'
                | b'\''
                | b'('
                | b')'
                | b'*'
                | b'+'
                | b','
                | b';'
                | b'='
                | b':'
                | b'@'
        )
}

/// Opaque body: pchar plus "/". A literal "?" in the body must re-escape so
/// the emitted form does not grow a query component on the next parse.
fn is_body_safe(byte: u8) -> bool {
    is_pchar_safe(byte) || byte == b'/'
}

/// Fragment: pchar plus "/" and "?".
fn is_fragment_safe(byte: u8) -> bool {
    is_pchar_safe(byte) || matches!(byte, b'/' | b'?')
}
