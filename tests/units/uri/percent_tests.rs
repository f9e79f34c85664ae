use encoding_rs::{SHIFT_JIS, UTF_8, WINDOWS_1252};
use relay_uri::percent::{decode, decode_in, encode, encode_in, encode_with, is_unreserved};
use relay_uri::UriSyntaxError;

#[test]
fn test_encode_keeps_only_unreserved() {
    assert_eq!(encode("AZaz09-._~"), "AZaz09-._~");
    assert_eq!(encode(":/?#[]@"), "%3A%2F%3F%23%5B%5D%40");
}

#[test]
fn test_space_policy() {
    assert_eq!(encode("one two"), "one%20two");
    // '+' is an ordinary character in both directions
    assert_eq!(encode("a+b"), "a%2Bb");
    assert_eq!(decode("a+b").unwrap(), "a+b");
}

#[test]
fn test_decode_mixed_case_hex() {
    assert_eq!(decode("%2f%2F").unwrap(), "//");
}

#[test]
fn test_decode_errors_on_truncated_escape() {
    for bad in ["%", "%4", "tail%", "a%q1b"] {
        assert!(
            matches!(decode(bad), Err(UriSyntaxError::MalformedEscape(_))),
            "input: {bad}"
        );
    }
}

#[test]
fn test_utf8_round_trip() {
    for original in ["héllo wörld", "日本語", "smörgåsbord/и"] {
        assert_eq!(decode(&encode(original)).unwrap(), original);
    }
}

#[test]
fn test_explicit_charset_round_trip() {
    // the same text encodes to different byte sequences per charset
    assert_eq!(encode_in("é", UTF_8), "%C3%A9");
    assert_eq!(encode_in("é", WINDOWS_1252), "%E9");
    assert_eq!(decode_in("%E9", WINDOWS_1252).unwrap(), "é");

    let encoded = encode_in("日本", SHIFT_JIS);
    assert_eq!(decode_in(&encoded, SHIFT_JIS).unwrap(), "日本");
}

#[test]
fn test_encode_with_custom_safe_set() {
    // widen the safe set to keep the path delimiter
    fn keep(byte: u8) -> bool {
        is_unreserved(byte) || byte == b'/'
    }
    assert_eq!(encode_with("a/b c", keep, UTF_8), "a/b%20c");
}
