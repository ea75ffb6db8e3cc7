//! Typed object parsing.
//!
//! A [`StructParser`] dispatches each scanned member key against a fixed
//! field table. Matched fields delegate to the field's value sub-parser and,
//! on completion, run a field-specific apply callback that pops the child
//! value and assigns it into the partially-populated object beneath it.
//! Unmatched keys fall back to the skip path, which consumes the value under
//! the same grammar and validation rules without constructing anything.
//!
//! Field tables are plain `static` data, which makes this the natural target
//! for build-time code generation:
//!
//! ```
//! use jsonfrag::{CompleteFn, Field, LONG, ParseContext, ParseError, STRING, StructParser};
//!
//! #[derive(Default, Debug, PartialEq)]
//! struct Device {
//!     id: i64,
//!     name: String,
//! }
//!
//! static DEVICE: StructParser = StructParser {
//!     construct: |ctx| {
//!         ctx.push_target(Device::default());
//!         Ok(())
//!     },
//!     fields: &[
//!         Field { name: "id", parser: &LONG, apply: apply_id },
//!         Field { name: "name", parser: &STRING, apply: apply_name },
//!     ],
//! };
//!
//! fn apply_id(ctx: &mut ParseContext) -> Result<(), ParseError> {
//!     let id: i64 = ctx.pop_target()?;
//!     ctx.peek_target_mut::<Device>()?.id = id;
//!     Ok(())
//! }
//!
//! fn apply_name(ctx: &mut ParseContext) -> Result<(), ParseError> {
//!     let name: String = ctx.pop_target()?;
//!     ctx.peek_target_mut::<Device>()?.name = name;
//!     Ok(())
//! }
//!
//! let device: Device =
//!     jsonfrag::parse_with(&DEVICE, br#"{"name": "probe-1", "id": 7}"#).unwrap();
//! assert_eq!(device, Device { id: 7, name: "probe-1".into() });
//! ```

use crate::{
    context::{CompleteFn, Member, ParseContext, ParserRef},
    error::ParseError,
    parser::ValueParser,
    strings::decode_string,
};

/// One known member of a typed object.
pub struct Field {
    /// The JSON member name this field matches.
    pub name: &'static str,
    /// Sub-parser for the member's value.
    pub parser: ParserRef,
    /// Pops the child value and applies it to the parent object.
    pub apply: CompleteFn,
}

/// Key-dispatch object parser over a fixed field table.
pub struct StructParser {
    /// Allocates the empty object and pushes it as the in-progress target.
    pub construct: fn(&mut ParseContext) -> Result<(), ParseError>,
    /// Known fields; anything else is skipped.
    pub fields: &'static [Field],
}

impl ValueParser for StructParser {
    fn begin_object(&self, ctx: &mut ParseContext) -> Result<(), ParseError> {
        (self.construct)(ctx)
    }

    fn member_key(&self, ctx: &mut ParseContext, buf: &[u8]) -> Result<Member, ParseError> {
        let key = decode_string(ctx.token_slice(buf))?;
        for field in self.fields {
            if field.name == key {
                return Ok(Member {
                    parser: field.parser,
                    complete: field.apply,
                });
            }
        }
        Ok(Member::skip())
    }
}
