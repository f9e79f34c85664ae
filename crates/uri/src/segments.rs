//! Path segmentation that is aware of embedded substitution tokens.
//!
//! A raw path is split on `/`, except that delimiters falling inside a
//! substitution token (`{name}` or `%name%`) are opaque: the token is glued
//! to the segment it started in and is never split mid-token. Splitting
//! scans the non-token spans normally and interleaves the token spans back
//! at the right position.

use lazy_regex::{lazy_regex, Lazy, Regex};

/// The path delimiter.
pub const PATH_DELIMITER: char = '/';

/// Substitution-token grammar. `{...}` tokens may contain delimiters
/// (nested-document addressing); `%...%` tokens must start with a letter or
/// underscore so percent escapes like `%2F` are never mistaken for tokens.
pub(crate) static SUBSTITUTION_TOKEN: Lazy<Regex> =
    lazy_regex!(r"\{[^{}]+\}|%[A-Za-z_][A-Za-z0-9_./-]*%");

/// Splits `path` into an ordered list of segments.
///
/// Exactly one leading and one trailing delimiter are stripped when present.
/// Consecutive delimiters outside tokens yield empty segments; delimiters
/// inside substitution tokens are not split points. A token immediately
/// preceded by a delimiter starts a new segment; otherwise it is appended to
/// the segment in progress.
#[must_use]
pub fn split_segments(path: &str) -> Vec<String> {
    let trimmed = path.strip_prefix(PATH_DELIMITER).unwrap_or(path);
    let trimmed = trimmed.strip_suffix(PATH_DELIMITER).unwrap_or(trimmed);

    if trimmed.is_empty() {
        return Vec::new();
    }

    let mut segments: Vec<String> = Vec::new();
    // True when the next span starts a fresh segment (start of path, or the
    // previous span ended exactly on a delimiter).
    let mut at_boundary = true;
    let mut cursor = 0;

    for token in SUBSTITUTION_TOKEN.find_iter(trimmed) {
        split_plain_span(
            &trimmed[cursor..token.start()],
            &mut segments,
            &mut at_boundary,
        );

        if at_boundary {
            segments.push(token.as_str().to_string());
            at_boundary = false;
        } else if let Some(last) = segments.last_mut() {
            last.push_str(token.as_str());
        } else {
            segments.push(token.as_str().to_string());
        }

        cursor = token.end();
    }

    let tail = &trimmed[cursor..];
    split_plain_span(tail, &mut segments, &mut at_boundary);
    // a delimiter closing the final span ends an empty segment rather than
    // preceding a token
    if at_boundary && !tail.is_empty() {
        segments.push(String::new());
    }

    segments
}

/// Splits a span known to contain no substitution tokens, extending the
/// segment in progress unless the span opens at a segment boundary. A
/// delimiter ending the span is recorded as a boundary for whatever follows,
/// not as an empty segment.
fn split_plain_span(span: &str, segments: &mut Vec<String>, at_boundary: &mut bool) {
    if span.is_empty() {
        return;
    }

    let ends_on_delimiter = span.ends_with(PATH_DELIMITER);
    let mut pieces: Vec<&str> = span.split(PATH_DELIMITER).collect();
    if ends_on_delimiter {
        pieces.pop();
    }

    for (index, piece) in pieces.into_iter().enumerate() {
        if index == 0 && !*at_boundary {
            if let Some(last) = segments.last_mut() {
                last.push_str(piece);
                continue;
            }
        }
        segments.push(piece.to_string());
    }

    *at_boundary = ends_on_delimiter;
}

/// Joins `segments` with a single delimiter between each pair.
///
/// The inverse of [`split_segments`]; no delimiter escaping is performed,
/// segments are assumed already percent-encoded where necessary.
#[must_use]
pub fn join_segments<S: AsRef<str>>(segments: &[S]) -> String {
    segments
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<&str>>()
        .join("/")
}
