//! Shared helpers for the integration-style tests.

use alloc::string::String;
use core::any::Any;

use quickcheck::{Arbitrary, Gen};

use crate::{GENERIC, Map, ParseContext, ParseError, ParserRef, Value};

/// Parses `doc` split into two deliveries at byte offset `at`.
pub(crate) fn parse_split(doc: &[u8], at: usize) -> Result<Value, ParseError> {
    let mut ctx = ParseContext::new(&GENERIC);
    ctx.feed(&doc[..at])?;
    ctx.feed(&doc[at..])?;
    ctx.finish()?;
    ctx.take_result()
}

/// Parses `doc` delivered in fixed-size chunks with an explicit root parser.
pub(crate) fn parse_chunked<T: Any>(
    root: ParserRef,
    doc: &[u8],
    chunk: usize,
) -> Result<T, ParseError> {
    let mut ctx = ParseContext::new(root);
    for piece in doc.chunks(chunk) {
        ctx.feed(piece)?;
    }
    ctx.finish()?;
    ctx.take_result()
}

/// Converts a parsed tree into `serde_json`'s value type for oracle
/// comparisons.
pub(crate) fn to_serde(v: &Value) -> serde_json::Value {
    match v {
        Value::Null => serde_json::Value::Null,
        Value::Boolean(b) => serde_json::Value::Bool(*b),
        Value::Integer(n) => serde_json::Value::from(*n),
        Value::Float(n) => serde_json::Value::from(*n),
        Value::String(s) => serde_json::Value::String(s.clone()),
        Value::Array(items) => serde_json::Value::Array(items.iter().map(to_serde).collect()),
        Value::Object(map) => {
            serde_json::Value::Object(map.iter().map(|(k, v)| (k.clone(), to_serde(v))).collect())
        }
    }
}

impl Arbitrary for Value {
    fn arbitrary(g: &mut Gen) -> Self {
        arbitrary_value(g, 2)
    }
}

fn arbitrary_value(g: &mut Gen, depth: usize) -> Value {
    let variants = if depth == 0 { 5 } else { 7 };
    match u8::arbitrary(g) % variants {
        0 => Value::Null,
        1 => Value::Boolean(bool::arbitrary(g)),
        2 => Value::Integer(i64::arbitrary(g)),
        3 => Value::Float(finite_f64(g)),
        4 => Value::String(String::arbitrary(g)),
        5 => {
            let len = usize::arbitrary(g) % 4;
            Value::Array((0..len).map(|_| arbitrary_value(g, depth - 1)).collect())
        }
        _ => {
            let len = usize::arbitrary(g) % 4;
            let mut map = Map::new();
            for _ in 0..len {
                map.insert(String::arbitrary(g), arbitrary_value(g, depth - 1));
            }
            Value::Object(map)
        }
    }
}

// Infinities and NaN have no JSON form.
fn finite_f64(g: &mut Gen) -> f64 {
    let f = f64::arbitrary(g);
    if f.is_finite() { f } else { 0.0 }
}

#[test]
fn split_helper_covers_both_deliveries() {
    let doc = br#"[1, 2]"#;
    for at in 0..=doc.len() {
        assert_eq!(
            parse_split(doc, at).unwrap(),
            Value::Array(alloc::vec![Value::Integer(1), Value::Integer(2)]),
            "split at {at}"
        );
    }
}

#[test]
fn chunked_helper_handles_single_byte_chunks() {
    let v: Value = parse_chunked(&GENERIC, br#"{"a": null}"#, 1).unwrap();
    assert!(v.as_object().unwrap()["a"].is_null());
}
