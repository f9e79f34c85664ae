//! The ordered route table and its first-match-wins lookup.

use relay_uri::QueryMap;
use tracing::trace;

use crate::entry::RouteEntry;
use crate::method::Method;
use crate::pattern::Params;

/// A successful lookup: the entry that matched and its path captures.
///
/// Owns a clone of the entry so the result stays valid after the table it
/// came from is swapped out.
#[derive(Clone, Debug)]
pub struct RouteMatch {
    entry: RouteEntry,
    captures: Params,
}

impl RouteMatch {
    #[must_use]
    pub fn entry(&self) -> &RouteEntry {
        &self.entry
    }

    #[must_use]
    pub fn captures(&self) -> &Params {
        &self.captures
    }

    /// Merges the path captures with the first value of each query
    /// parameter. Captures win on name collision.
    #[must_use]
    pub fn params_with_query(&self, query: &QueryMap) -> Params {
        let mut params = Params::new();
        for (name, value) in query.iter() {
            params.insert(name.to_string(), value.first().to_string());
        }
        for (name, value) in &self.captures {
            params.insert(name.clone(), value.clone());
        }
        params
    }
}

/// An immutable, ordered list of route entries.
///
/// Lookup scans entries in insertion order and stops at the first match, so
/// earlier entries shadow later ones.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RouteTable {
    entries: Vec<RouteEntry>,
}

impl RouteTable {
    #[must_use]
    pub fn new(entries: Vec<RouteEntry>) -> Self {
        Self { entries }
    }

    #[must_use]
    pub fn entries(&self) -> &[RouteEntry] {
        &self.entries
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Finds the first entry whose method and template match the request.
    #[must_use]
    pub fn find(&self, method: Method, path: &str) -> Option<RouteMatch> {
        for entry in &self.entries {
            if entry.method() != method {
                continue;
            }
            if let Some(captures) = entry.pattern().matches(path) {
                trace!(route = %entry.label(), path, "route matched");
                return Some(RouteMatch {
                    entry: entry.clone(),
                    captures,
                });
            }
        }
        None
    }
}
