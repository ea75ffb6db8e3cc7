//! The streaming JSON encoder.
//!
//! Unlike the parser, the writer is not resumable: it assumes the whole
//! value graph (or generated code walking an object's fields) is available
//! synchronously. Strings escape control characters, quotes, and
//! backslashes; everything above `0x7F` is written as raw UTF-8. Integers
//! are formatted by direct digit computation with no intermediate text
//! allocation, and floats defer to the platform's shortest round-trip
//! decimal representation.

use alloc::{string::String, vec::Vec};

use crate::value::Value;

/// Accumulates encoded JSON bytes.
///
/// The low-level token methods ([`begin_object`](Self::begin_object),
/// [`name`](Self::name), [`long`](Self::long), ...) let generated
/// serializers emit members directly; [`value`](Self::value) walks a
/// [`Value`] graph recursively.
#[derive(Default)]
pub struct JsonWriter {
    out: Vec<u8>,
}

impl JsonWriter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The encoded bytes.
    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.out
    }

    /// Writes a whole value graph.
    pub fn value(&mut self, v: &Value) {
        match v {
            Value::Null => self.null(),
            Value::Boolean(b) => self.boolean(*b),
            Value::Integer(n) => self.long(*n),
            Value::Float(n) => self.double(*n),
            Value::String(s) => self.string(s),
            Value::Array(items) => {
                self.begin_array();
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        self.comma();
                    }
                    self.value(item);
                }
                self.end_array();
            }
            Value::Object(map) => {
                self.begin_object();
                for (i, (key, member)) in map.iter().enumerate() {
                    if i > 0 {
                        self.comma();
                    }
                    self.name(key);
                    self.value(member);
                }
                self.end_object();
            }
        }
    }

    pub fn null(&mut self) {
        self.out.extend_from_slice(b"null");
    }

    pub fn boolean(&mut self, v: bool) {
        self.out.extend_from_slice(if v { b"true" } else { b"false" });
    }

    /// Writes a signed 64-bit integer.
    ///
    /// Digits accumulate in negative space so `i64::MIN`, which has no
    /// positive counterpart, formats correctly.
    pub fn long(&mut self, v: i64) {
        if v == 0 {
            self.out.push(b'0');
            return;
        }
        let negative = v < 0;
        let mut n = if negative { v } else { -v };
        let mut digits = [0u8; 19];
        let mut i = digits.len();
        while n != 0 {
            i -= 1;
            digits[i] = b'0' + u8::try_from(-(n % 10)).unwrap_or(0);
            n /= 10;
        }
        if negative {
            self.out.push(b'-');
        }
        self.out.extend_from_slice(&digits[i..]);
    }

    /// Writes a float using the shortest decimal representation that parses
    /// back to the same value. Non-finite values have no JSON form and are
    /// written as `null`.
    pub fn double(&mut self, v: f64) {
        if !v.is_finite() {
            self.null();
            return;
        }
        let text = alloc::format!("{v}");
        self.out.extend_from_slice(text.as_bytes());
        // Keep a fraction dot so the value reads back as a float.
        if !text.contains('.') {
            self.out.extend_from_slice(b".0");
        }
    }

    /// Writes a quoted, escaped string.
    pub fn string(&mut self, s: &str) {
        self.out.push(b'"');
        for b in s.bytes() {
            match b {
                b'"' => self.out.extend_from_slice(b"\\\""),
                b'\\' => self.out.extend_from_slice(b"\\\\"),
                0x08 => self.out.extend_from_slice(b"\\b"),
                b'\t' => self.out.extend_from_slice(b"\\t"),
                b'\n' => self.out.extend_from_slice(b"\\n"),
                0x0C => self.out.extend_from_slice(b"\\f"),
                b'\r' => self.out.extend_from_slice(b"\\r"),
                0x00..=0x1F => {
                    const HEX: &[u8; 16] = b"0123456789abcdef";
                    self.out.extend_from_slice(b"\\u00");
                    self.out.push(HEX[usize::from(b >> 4)]);
                    self.out.push(HEX[usize::from(b & 0x0F)]);
                }
                // Raw UTF-8 bytes pass through unescaped.
                _ => self.out.push(b),
            }
        }
        self.out.push(b'"');
    }

    pub fn begin_object(&mut self) {
        self.out.push(b'{');
    }

    pub fn end_object(&mut self) {
        self.out.push(b'}');
    }

    pub fn begin_array(&mut self) {
        self.out.push(b'[');
    }

    pub fn end_array(&mut self) {
        self.out.push(b']');
    }

    /// Writes a member name and its `:` separator.
    pub fn name(&mut self, name: &str) {
        self.string(name);
        self.out.push(b':');
    }

    pub fn comma(&mut self) {
        self.out.push(b',');
    }
}

/// Encodes a value graph to JSON bytes.
#[must_use]
pub fn write_value(v: &Value) -> Vec<u8> {
    let mut w = JsonWriter::new();
    w.value(v);
    w.into_bytes()
}

/// Encodes a value graph to a JSON string.
#[must_use]
pub fn write_value_string(v: &Value) -> String {
    String::from_utf8(write_value(v)).expect("writer emits valid UTF-8")
}

#[cfg(test)]
mod tests {
    use alloc::{string::ToString, vec};

    use super::{JsonWriter, write_value_string};
    use crate::value::{Map, Value};

    #[test]
    fn scalars() {
        assert_eq!(write_value_string(&Value::Null), "null");
        assert_eq!(write_value_string(&Value::Boolean(true)), "true");
        assert_eq!(write_value_string(&Value::Integer(-42)), "-42");
        assert_eq!(write_value_string(&Value::Float(1.25)), "1.25");
        assert_eq!(write_value_string(&Value::Float(3.0)), "3.0");
    }

    #[test]
    fn most_negative_integer() {
        assert_eq!(
            write_value_string(&Value::Integer(i64::MIN)),
            "-9223372036854775808"
        );
        assert_eq!(
            write_value_string(&Value::Integer(i64::MAX)),
            "9223372036854775807"
        );
    }

    #[test]
    fn string_escaping() {
        assert_eq!(
            write_value_string(&Value::String("a\"b\\c\n\t\u{8}\u{c}\r\u{1}".into())),
            r#""a\"b\\c\n\t\b\f\r""#
        );
    }

    #[test]
    fn unicode_is_raw_utf8() {
        assert_eq!(
            write_value_string(&Value::String("héllo 💧".into())),
            "\"héllo 💧\""
        );
    }

    #[test]
    fn containers() {
        let mut map = Map::new();
        map.insert("k".to_string(), Value::Array(vec![Value::Integer(1), Value::Null]));
        assert_eq!(write_value_string(&Value::Object(map)), r#"{"k":[1,null]}"#);
        assert_eq!(write_value_string(&Value::Array(vec![])), "[]");
        assert_eq!(write_value_string(&Value::Object(Map::new())), "{}");
    }

    #[test]
    fn generated_code_surface() {
        let mut w = JsonWriter::new();
        w.begin_object();
        w.name("id");
        w.long(7);
        w.comma();
        w.name("tags");
        w.begin_array();
        w.string("a");
        w.end_array();
        w.end_object();
        assert_eq!(w.into_bytes(), br#"{"id":7,"tags":["a"]}"#);
    }
}
