//! Path templates with named capture placeholders.
//!
//! A template like `/users/{id}/books` compiles into literal and capture
//! segments. Captures are whole-segment only; a segment mixing literal text
//! and a placeholder matches literally.

use std::collections::HashMap;

use relay_uri::split_segments;

use crate::error::RouteError;

/// Named path captures extracted by a successful match.
pub type Params = HashMap<String, String>;

#[derive(Clone, Debug, PartialEq, Eq)]
enum PatternSegment {
    Literal(String),
    Capture(String),
}

/// A compiled route path template.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PathPattern {
    template: String,
    segments: Vec<PatternSegment>,
}

impl PathPattern {
    /// Compiles `template` into matchable segments.
    ///
    /// # Errors
    ///
    /// Returns [`RouteError::EmptyTemplate`] for an empty string and
    /// [`RouteError::DuplicateCapture`] when two placeholders share a name.
    pub fn compile(template: &str) -> Result<Self, RouteError> {
        if template.is_empty() {
            return Err(RouteError::EmptyTemplate);
        }

        let mut segments = Vec::new();
        let mut names: Vec<&str> = Vec::new();

        let parts = split_segments(template);
        for part in &parts {
            match capture_name(part) {
                Some(name) => {
                    if names.contains(&name) {
                        return Err(RouteError::DuplicateCapture(name.to_string()));
                    }
                    names.push(name);
                    segments.push(PatternSegment::Capture(name.to_string()));
                }
                None => segments.push(PatternSegment::Literal(part.clone())),
            }
        }

        Ok(Self {
            template: template.to_string(),
            segments,
        })
    }

    /// The source template text.
    #[must_use]
    pub fn template(&self) -> &str {
        &self.template
    }

    /// The capture names, in template order.
    pub fn capture_names(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|segment| match segment {
            PatternSegment::Capture(name) => Some(name.as_str()),
            PatternSegment::Literal(_) => None,
        })
    }

    /// Matches `path` against the template, returning the named captures on
    /// success. Segment counts must agree exactly; literals compare
    /// case-sensitively.
    #[must_use]
    pub fn matches(&self, path: &str) -> Option<Params> {
        let parts = split_segments(path);
        if parts.len() != self.segments.len() {
            return None;
        }

        let mut captures = Params::new();
        for (segment, part) in self.segments.iter().zip(parts) {
            match segment {
                PatternSegment::Literal(literal) => {
                    if *literal != part {
                        return None;
                    }
                }
                PatternSegment::Capture(name) => {
                    captures.insert(name.clone(), part);
                }
            }
        }

        Some(captures)
    }
}

/// Returns the placeholder name when `segment` is exactly `{name}`.
fn capture_name(segment: &str) -> Option<&str> {
    let inner = segment.strip_prefix('{')?.strip_suffix('}')?;
    let mut chars = inner.chars();
    let first = chars.next()?;
    if !(first.is_ascii_alphabetic() || first == '_') {
        return None;
    }
    chars
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))
        .then_some(inner)
}
