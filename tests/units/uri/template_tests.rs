use std::collections::HashMap;

use relay_uri::{expand, normalize};

fn scope(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(key, value)| ((*key).to_string(), (*value).to_string()))
        .collect()
}

#[test]
fn test_expand_across_components() {
    let vars = scope(&[("host", "api.example.com"), ("v", "2"), ("id", "99")]);
    assert_eq!(
        expand("https://{host}/v{v}/items/{id}?full=1", &vars),
        "https://api.example.com/v2/items/99?full=1"
    );
}

#[test]
fn test_unbound_names_left_for_later_passes() {
    let vars = scope(&[("id", "7")]);
    assert_eq!(
        expand("/queues/{region}/jobs/{id}", &vars),
        "/queues/{region}/jobs/7"
    );
}

#[test]
fn test_repeated_placeholder_expands_everywhere() {
    let vars = scope(&[("x", "v")]);
    assert_eq!(expand("/{x}/{x}/{x}", &vars), "/v/v/v");
}

#[test]
fn test_expand_then_normalize() {
    let vars = scope(&[("host", "Example.COM"), ("file", "a b")]);
    let expanded = expand("http://{host}/docs/{file}", &vars);
    assert_eq!(
        normalize(&expanded).unwrap(),
        "http://example.com/docs/a%20b"
    );
}

#[test]
fn test_unexpanded_uri_survives_codec_untouched() {
    // unbound tokens pass through parse and emit verbatim
    let raw = "/deploy/{env}/service/{name}";
    assert_eq!(normalize(raw).unwrap(), raw);
}
