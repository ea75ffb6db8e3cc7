//! Resumable, fragment-fed JSON parsing and writing.
//!
//! The parser consumes a document as a sequence of byte buffers of arbitrary
//! size. When a buffer runs out mid-token or mid-structure, the parse
//! suspends: all state needed to resume lives on an explicit continuation
//! stack inside the [`ParseContext`], not on the native call stack, so the
//! caller's read loop never blocks and the final value is identical no matter
//! where the fragment boundaries fell.
//!
//! Three parsing styles share the engine:
//!
//! - [`GENERIC`] builds a schema-less [`Value`] tree ([`parse_bytes`],
//!   [`parse_str`]);
//! - [`StructParser`], [`CollectionParser`], and [`MapParser`] drive typed
//!   deserialization from static field tables ([`parse_with`]);
//! - scalar parsers ([`LONG`], [`DOUBLE`], [`BOOLEAN`], [`STRING`]) and the
//!   validating [`SKIP`] parser compose into all of the above.
//!
//! [`JsonWriter`] is the symmetric encoder. It is not resumable: writing
//! assumes the whole value is available.
//!
//! ```
//! use jsonfrag::{GENERIC, ParseContext, Value};
//!
//! let mut ctx = ParseContext::new(&GENERIC);
//! for fragment in [&b"{\"tem"[..], &b"p\": 21.5}"[..]] {
//!     ctx.feed(fragment).unwrap();
//! }
//! ctx.finish().unwrap();
//! let v: Value = ctx.take_result().unwrap();
//! assert_eq!(v.as_object().unwrap()["temp"], Value::Float(21.5));
//! ```

#![no_std]
extern crate alloc;

#[cfg(any(test, feature = "std"))]
extern crate std;

mod collect;
mod context;
mod error;
mod generic;
mod numbers;
mod parser;
mod scanner;
pub mod states;
mod strings;
mod token;
mod typed;
mod value;
mod writer;

#[cfg(test)]
mod tests;

pub use collect::{CollectionParser, KeyFn, MapParser, long_key, string_key};
pub use context::{
    CompleteFn, Continuation, Member, ParseContext, ParserRef, StateFn, no_completion,
};
pub use error::ParseError;
pub use generic::{GENERIC, GenericParser};
pub use parser::{
    BOOLEAN, BooleanParser, DOUBLE, DoubleParser, LONG, LongParser, SKIP, SkipParser, STRING,
    StringParser, ValueParser,
};
pub use typed::{Field, StructParser};
pub use value::{Array, Map, Value};
pub use writer::{JsonWriter, write_value, write_value_string};

use core::any::Any;

/// Parses one complete JSON document into a [`Value`] tree.
///
/// # Errors
///
/// Any [`ParseError`] the document provokes.
pub fn parse_bytes(input: &[u8]) -> Result<Value, ParseError> {
    parse_with(&GENERIC, input)
}

/// [`parse_bytes`] for string input.
///
/// # Errors
///
/// Any [`ParseError`] the document provokes.
pub fn parse_str(input: &str) -> Result<Value, ParseError> {
    parse_bytes(input.as_bytes())
}

/// Parses one complete document with an explicit root parser and takes the
/// typed result it produced.
///
/// # Errors
///
/// Any [`ParseError`] the document provokes, or
/// [`ParseError::InvalidState`] if the root parser's result is not a `T`.
pub fn parse_with<T: Any>(root: ParserRef, input: &[u8]) -> Result<T, ParseError> {
    let mut ctx = ParseContext::new(root);
    ctx.feed(input)?;
    ctx.finish()?;
    ctx.take_result()
}

/// Parses one complete document from a reader, feeding it to the parser in
/// fixed-size chunks.
///
/// # Errors
///
/// [`ParseError::Io`] for read failures, otherwise any [`ParseError`] the
/// document provokes.
#[cfg(feature = "std")]
pub fn parse_reader<R: std::io::Read, T: Any>(
    root: ParserRef,
    mut reader: R,
) -> Result<T, ParseError> {
    use alloc::string::ToString;

    let mut ctx = ParseContext::new(root);
    let mut buf = [0u8; 8192];
    loop {
        let n = reader.read(&mut buf).map_err(|e| ParseError::Io(e.to_string()))?;
        if n == 0 {
            ctx.finish()?;
            return ctx.take_result();
        }
        if ctx.feed(&buf[..n])? {
            ctx.finish()?;
            return ctx.take_result();
        }
    }
}
