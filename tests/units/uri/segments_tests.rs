use relay_uri::{join_segments, split_segments, PATH_DELIMITER};

#[test]
fn test_delimiter_constant() {
    assert_eq!(PATH_DELIMITER, '/');
}

#[test]
fn test_basic_split_and_join() {
    let segments = split_segments("/srv/data/reports");
    assert_eq!(segments, vec!["srv", "data", "reports"]);
    assert_eq!(join_segments(&segments), "srv/data/reports");
}

#[test]
fn test_empty_segments_round_trip() {
    let segments = split_segments("/a//b///c");
    assert_eq!(segments, vec!["a", "", "b", "", "", "c"]);
    assert_eq!(join_segments(&segments), "a//b///c");
}

#[test]
fn test_single_leading_and_trailing_delimiters_stripped() {
    assert_eq!(split_segments("/only/"), vec!["only"]);
    assert_eq!(split_segments("only"), vec!["only"]);
    // extra delimiters beyond the first become empty segments
    assert_eq!(split_segments("//only//"), vec!["", "only", ""]);
}

#[test]
fn test_brace_token_spanning_delimiters() {
    assert_eq!(
        split_segments("/api/{doc/section/para}/render"),
        vec!["api", "{doc/section/para}", "render"]
    );
}

#[test]
fn test_percent_token_spanning_delimiters() {
    assert_eq!(
        split_segments("/call/%svc/fn%/done"),
        vec!["call", "%svc/fn%", "done"]
    );
}

#[test]
fn test_escapes_do_not_form_tokens() {
    // %2F..%2D look token-like but start with a digit, so they are escapes
    assert_eq!(split_segments("/a%2Fb/%2D/c"), vec!["a%2Fb", "%2D", "c"]);
}

#[test]
fn test_token_glued_to_preceding_text() {
    assert_eq!(
        split_segments("/files/report-{year/q}/pdf"),
        vec!["files", "report-{year/q}", "pdf"]
    );
}

#[test]
fn test_text_glued_after_token() {
    assert_eq!(split_segments("/{a/b}.txt/x"), vec!["{a/b}.txt", "x"]);
}

#[test]
fn test_token_aware_round_trip() {
    for path in ["/a/{x/y}/b", "call/%svc/fn%", "/mix-{a/b}tail/end"] {
        let segments = split_segments(path);
        let rejoined = join_segments(&segments);
        assert_eq!(split_segments(&rejoined), segments, "path: {path}");
    }
}
