//! Query string parsing and manipulation.
//!
//! A query is an insertion-ordered mapping from key to either a single value
//! or an ordered array of values; repeated keys collapse into arrays. Both
//! directions round-trip: `QueryMap::parse(&map.encode(true), true) == map`.

use crate::error::UriSyntaxError;
use crate::percent;

/// Value held under a query key: one value, or all values of a repeated key
/// in occurrence order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum QueryValue {
    Single(String),
    List(Vec<String>),
}

impl QueryValue {
    /// Returns the first value regardless of arity.
    #[must_use]
    pub fn first(&self) -> &str {
        match self {
            QueryValue::Single(value) => value,
            QueryValue::List(values) => values.first().map_or("", String::as_str),
        }
    }

    /// Iterates every value in order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        match self {
            QueryValue::Single(value) => std::slice::from_ref(value).iter(),
            QueryValue::List(values) => values.iter(),
        }
        .map(String::as_str)
    }
}

/// Insertion-ordered multi-valued query mapping.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct QueryMap {
    entries: Vec<(String, QueryValue)>,
}

impl QueryMap {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses an `a=1&b=2&a=3`-style string.
    ///
    /// Pairs split on the first `=`; a missing `=` yields an empty value.
    /// When `decode` is set, keys and values are percent-decoded. A repeated
    /// key keeps its first-occurrence position and accumulates its values in
    /// occurrence order.
    ///
    /// # Errors
    ///
    /// Returns [`UriSyntaxError::MalformedEscape`] when decoding hits a bad
    /// percent escape.
    pub fn parse(raw: &str, decode: bool) -> Result<Self, UriSyntaxError> {
        let mut map = Self::new();

        for pair in raw.split('&') {
            if pair.is_empty() {
                continue;
            }

            let (key, value) = match pair.split_once('=') {
                Some((key, value)) => (key, value),
                None => (pair, ""),
            };

            if decode {
                map.append(percent::decode(key)?, percent::decode(value)?);
            } else {
                map.append(key, value);
            }
        }

        Ok(map)
    }

    /// Appends a value under `key`, promoting an existing single value to a
    /// two-element array on the first repeat.
    pub fn append(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();

        match self.entries.iter_mut().find(|(existing, _)| *existing == key) {
            Some((_, existing)) => {
                let mut values =
                    match std::mem::replace(existing, QueryValue::List(Vec::new())) {
                        QueryValue::Single(first) => vec![first],
                        QueryValue::List(values) => values,
                    };
                values.push(value);
                *existing = QueryValue::List(values);
            }
            None => self.entries.push((key, QueryValue::Single(value))),
        }
    }

    /// Replaces any existing values under `key` with a single value.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = QueryValue::Single(value.into());

        match self.entries.iter_mut().find(|(existing, _)| *existing == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    /// Returns the value(s) under `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&QueryValue> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == key)
            .map(|(_, value)| value)
    }

    /// Returns the first value under `key`.
    #[must_use]
    pub fn first(&self, key: &str) -> Option<&str> {
        self.get(key).map(QueryValue::first)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Iterates `(key, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &QueryValue)> {
        self.entries
            .iter()
            .map(|(key, value)| (key.as_str(), value))
    }

    /// Emits the query string. Array values produce one `key=value` pair per
    /// element, preserving element order. When `encode` is set, keys and
    /// values are percent-encoded (space becomes `%20`, never `+`).
    #[must_use]
    pub fn encode(&self, encode: bool) -> String {
        let mut pairs: Vec<String> = Vec::with_capacity(self.entries.len());

        for (key, value) in &self.entries {
            for item in value.iter() {
                if encode {
                    pairs.push(format!(
                        "{}={}",
                        percent::encode(key),
                        percent::encode(item)
                    ));
                } else {
                    pairs.push(format!("{key}={item}"));
                }
            }
        }

        pairs.join("&")
    }
}
