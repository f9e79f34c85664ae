//! Variable-template expansion for URI strings.
//!
//! Resolves `{name}` placeholders against a variable scope before parsing.
//! Placeholders whose name is not bound in the scope are left verbatim, so
//! later path segmentation still treats them as opaque tokens.

use std::collections::HashMap;

use lazy_regex::{lazy_regex, Lazy, Regex};

static PLACEHOLDER: Lazy<Regex> = lazy_regex!(r"\{([A-Za-z_][A-Za-z0-9_.-]*)\}");

/// Expands every bound `{name}` placeholder in `raw` with its value from
/// `scope`.
#[must_use]
pub fn expand(raw: &str, scope: &HashMap<String, String>) -> String {
    PLACEHOLDER
        .replace_all(raw, |captures: &regex::Captures<'_>| {
            match scope.get(&captures[1]) {
                Some(value) => value.clone(),
                None => captures[0].to_string(),
            }
        })
        .into_owned()
}
