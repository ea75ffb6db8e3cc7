//! Collection wrapper parsers.
//!
//! [`CollectionParser`] covers lists and sets: it allocates the container,
//! parses each element with the configured sub-parser, and folds every
//! completed element in with an insert callback. [`MapParser`] adds a key
//! decoder; the decoded key waits on the target stack until the member's
//! value completes, then the insert callback pops value and key and puts
//! them into the map.
//!
//! ```
//! use std::collections::BTreeMap;
//!
//! use jsonfrag::{LONG, MapParser, ParseContext, ParseError, parse_with, string_key};
//!
//! static COUNTS: MapParser = MapParser {
//!     construct: |ctx| {
//!         ctx.push_target(BTreeMap::<String, i64>::new());
//!         Ok(())
//!     },
//!     key: string_key,
//!     value: &LONG,
//!     insert: |ctx| {
//!         let value: i64 = ctx.pop_target()?;
//!         let key: String = ctx.pop_target()?;
//!         ctx.peek_target_mut::<BTreeMap<String, i64>>()?.insert(key, value);
//!         Ok(())
//!     },
//! };
//!
//! let counts: BTreeMap<String, i64> = parse_with(&COUNTS, br#"{"a": 1, "b": 2}"#).unwrap();
//! assert_eq!(counts.len(), 2);
//! ```

use alloc::string::String;

use crate::{
    context::{CompleteFn, Member, ParseContext, ParserRef},
    error::ParseError,
    parser::ValueParser,
    strings::decode_string,
};

/// List/set wrapper: the `insert` callback decides the container semantics
/// (append for lists, insert for sets).
pub struct CollectionParser {
    /// Allocates the empty container and pushes it as the in-progress target.
    pub construct: fn(&mut ParseContext) -> Result<(), ParseError>,
    /// Sub-parser for each element.
    pub element: ParserRef,
    /// Pops the completed element and folds it into the container.
    pub insert: CompleteFn,
}

impl ValueParser for CollectionParser {
    fn begin_array(&self, ctx: &mut ParseContext) -> Result<(), ParseError> {
        (self.construct)(ctx)
    }

    fn array_element(&self, _ctx: &mut ParseContext) -> Result<Member, ParseError> {
        Ok(Member {
            parser: self.element,
            complete: self.insert,
        })
    }
}

/// Converts a decoded member key into the key target the map's insert
/// callback will pop.
pub type KeyFn = fn(String, &mut ParseContext) -> Result<(), ParseError>;

/// Map wrapper: parses `{"key": value, ...}` into a keyed container.
pub struct MapParser {
    /// Allocates the empty map and pushes it as the in-progress target.
    pub construct: fn(&mut ParseContext) -> Result<(), ParseError>,
    /// Decodes and pushes each member key.
    pub key: KeyFn,
    /// Sub-parser for each member value.
    pub value: ParserRef,
    /// Pops the value, then the key, and puts them into the map.
    pub insert: CompleteFn,
}

impl ValueParser for MapParser {
    fn begin_object(&self, ctx: &mut ParseContext) -> Result<(), ParseError> {
        (self.construct)(ctx)
    }

    fn member_key(&self, ctx: &mut ParseContext, buf: &[u8]) -> Result<Member, ParseError> {
        let key = decode_string(ctx.token_slice(buf))?;
        (self.key)(key, ctx)?;
        Ok(Member {
            parser: self.value,
            complete: self.insert,
        })
    }
}

/// The identity [`KeyFn`]: keeps the key as a `String`.
pub fn string_key(key: String, ctx: &mut ParseContext) -> Result<(), ParseError> {
    ctx.push_target(key);
    Ok(())
}

/// A [`KeyFn`] for integer-keyed maps.
pub fn long_key(key: String, ctx: &mut ParseContext) -> Result<(), ParseError> {
    let key = crate::numbers::parse_i64(key.as_bytes())?;
    ctx.push_target(key);
    Ok(())
}
