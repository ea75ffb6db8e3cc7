use rstest::rstest;

use crate::{GENERIC, ParseContext, ParseError, Value, parse_bytes, parse_str};

#[rstest]
#[case("!", b'!')]
#[case("[1 2]", b'2')]
#[case(r#"{"a" 1}"#, b'1')]
#[case(r#"{1: 2}"#, b'1')]
#[case(r#"{"a": 1 "b": 2}"#, b'"')]
#[case("[1; 2]", b';')]
#[case("truth", b't')]
#[case("nil]", b'n')]
fn syntax_errors(#[case] doc: &str, #[case] byte: u8) {
    assert_eq!(parse_str(doc), Err(ParseError::Syntax(byte)));
}

#[test]
fn unterminated_string() {
    let mut ctx = ParseContext::new(&GENERIC);
    assert!(!ctx.feed(b"\"abc").unwrap());
    assert_eq!(ctx.finish(), Err(ParseError::UnterminatedToken));
}

#[test]
fn unterminated_key() {
    let mut ctx = ParseContext::new(&GENERIC);
    assert!(!ctx.feed(b"{\"ab").unwrap());
    assert_eq!(ctx.finish(), Err(ParseError::UnterminatedToken));
}

#[rstest]
#[case(r#""a\qb""#)] // unknown escape letter
#[case(r#""\u00""#)] // truncated unicode escape
#[case(r#""\uD800x""#)] // unpaired high surrogate
#[case(r#""\uDC00""#)] // lone low surrogate
fn invalid_escapes(#[case] doc: &str) {
    assert!(matches!(parse_str(doc), Err(ParseError::InvalidEscape(_))));
}

#[test]
fn invalid_utf8_in_string() {
    // 0xC3 expects a continuation byte; 0x41 is not one.
    assert_eq!(
        parse_bytes(&[b'"', 0xC3, 0x41, b'"']),
        Err(ParseError::InvalidUtf8(0x41))
    );
}

#[rstest]
#[case("9223372036854775808")]
#[case("-9223372036854775809")]
fn integer_overflow(#[case] doc: &str) {
    assert!(matches!(parse_str(doc), Err(ParseError::NumberFormat(_))));
}

#[test]
fn sign_without_digits() {
    assert!(matches!(parse_str("-"), Err(ParseError::NumberFormat(_))));
}

#[rstest]
#[case("")]
#[case("   ")]
#[case("[1,")]
#[case("{")]
#[case(r#"{"a":"#)]
#[case("[[1], [2")]
fn truncated_documents(#[case] doc: &str) {
    let mut ctx = ParseContext::new(&GENERIC);
    assert!(!ctx.feed(doc.as_bytes()).unwrap());
    assert_eq!(ctx.finish(), Err(ParseError::IncompleteDocument));
}

#[test]
fn context_is_terminal_after_error() {
    let mut ctx = ParseContext::new(&GENERIC);
    assert_eq!(ctx.feed(b"[!"), Err(ParseError::Syntax(b'!')));
    assert_eq!(
        ctx.feed(b"1]"),
        Err(ParseError::InvalidState("context reused after error"))
    );
    assert!(matches!(ctx.take_result::<Value>(), Err(ParseError::InvalidState(_))));
}

#[test]
fn result_unavailable_before_completion() {
    let mut ctx = ParseContext::new(&GENERIC);
    assert!(!ctx.feed(b"[1, ").unwrap());
    assert_eq!(
        ctx.take_result::<Value>(),
        Err(ParseError::InvalidState("document not complete"))
    );
}

// Errors are raised at the same position regardless of fragmentation.
#[test]
fn errors_survive_fragmentation() {
    let doc = br#"{"a": [1, 2}"#;
    let whole = parse_bytes(doc).unwrap_err();
    for at in 1..doc.len() {
        let mut ctx = ParseContext::new(&GENERIC);
        let err = ctx
            .feed(&doc[..at])
            .and_then(|_| ctx.feed(&doc[at..]))
            .and_then(|_| ctx.finish().map(|()| false))
            .unwrap_err();
        assert_eq!(err, whole, "split at {at}");
    }
}
