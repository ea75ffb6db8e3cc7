//! The composable per-type parser contract.
//!
//! A [`ValueParser`] is a stateless flyweight describing how one kind of
//! value is materialized: which state function begins it, how containers are
//! allocated, how member keys dispatch, and how scanned scalar tokens become
//! values. The grammar states in [`crate::states`] drive every implementation
//! through these hooks, so generic (schema-less) and specialized (typed)
//! parsing share the same continuation machinery.
//!
//! This trait is the entire surface a code generator needs to target; it
//! touches the [`ParseContext`] only through the public push/pop/peek and
//! token primitives.

use crate::{
    context::{Member, ParseContext, StateFn},
    error::ParseError,
    numbers::{parse_f64, parse_i64},
    states,
    strings::decode_string,
};

/// Per-type parsing behavior. Implementations must be stateless: the same
/// `&'static` instance serves every concurrent [`ParseContext`].
pub trait ValueParser: Sync {
    /// The state function that begins parsing this parser's value.
    fn entry(&self) -> StateFn {
        states::value
    }

    /// Allocate and push the in-progress target when `{` is consumed.
    ///
    /// The default rejects objects; container parsers override this.
    ///
    /// # Errors
    ///
    /// [`ParseError::Syntax`] when this parser's type has no object form.
    fn begin_object(&self, _ctx: &mut ParseContext) -> Result<(), ParseError> {
        Err(ParseError::Syntax(b'{'))
    }

    /// Called when the matching `}` is consumed.
    ///
    /// # Errors
    ///
    /// Implementation-defined.
    fn end_object(&self, _ctx: &mut ParseContext) -> Result<(), ParseError> {
        Ok(())
    }

    /// Allocate and push the in-progress target when `[` is consumed.
    ///
    /// # Errors
    ///
    /// [`ParseError::Syntax`] when this parser's type has no array form.
    fn begin_array(&self, _ctx: &mut ParseContext) -> Result<(), ParseError> {
        Err(ParseError::Syntax(b'['))
    }

    /// Called when the matching `]` is consumed.
    ///
    /// # Errors
    ///
    /// Implementation-defined.
    fn end_array(&self, _ctx: &mut ParseContext) -> Result<(), ParseError> {
        Ok(())
    }

    /// Dispatches an already-scanned member key (the raw token bytes are on
    /// the context) to the sub-parser and completion for that member.
    ///
    /// The default validates the key and skips the member's value, which
    /// keeps unknown fields fully consumable under the normal grammar.
    ///
    /// # Errors
    ///
    /// Any decoding error for the key bytes.
    fn member_key(&self, ctx: &mut ParseContext, buf: &[u8]) -> Result<Member, ParseError> {
        decode_string(ctx.token_slice(buf))?;
        Ok(Member::skip())
    }

    /// Supplies the sub-parser and completion for the next array element.
    ///
    /// # Errors
    ///
    /// Implementation-defined.
    fn array_element(&self, _ctx: &mut ParseContext) -> Result<Member, ParseError> {
        Ok(Member::skip())
    }

    /// A string token finished scanning; decode and apply it.
    ///
    /// # Errors
    ///
    /// [`ParseError::Syntax`] when this parser's type has no string form, or
    /// any decoding error.
    fn on_string(&self, _ctx: &mut ParseContext, _buf: &[u8]) -> Result<(), ParseError> {
        Err(ParseError::Syntax(b'"'))
    }

    /// A number token finished scanning; `float` reports whether a fraction
    /// dot was seen.
    ///
    /// # Errors
    ///
    /// [`ParseError::Syntax`] when this parser's type has no numeric form, or
    /// any decoding error.
    fn on_number(
        &self,
        ctx: &mut ParseContext,
        buf: &[u8],
        _float: bool,
    ) -> Result<(), ParseError> {
        let first = ctx.token_slice(buf).first().copied().unwrap_or(b'0');
        Err(ParseError::Syntax(first))
    }

    /// A `true`/`false` literal finished scanning.
    ///
    /// # Errors
    ///
    /// [`ParseError::Syntax`] when this parser's type has no boolean form.
    fn on_boolean(&self, _ctx: &mut ParseContext, value: bool) -> Result<(), ParseError> {
        Err(ParseError::Syntax(if value { b't' } else { b'f' }))
    }

    /// A `null` literal finished scanning.
    ///
    /// # Errors
    ///
    /// [`ParseError::Syntax`] when this parser's type has no null form.
    fn on_null(&self, _ctx: &mut ParseContext) -> Result<(), ParseError> {
        Err(ParseError::Syntax(b'n'))
    }
}

/// Consumes any value under the full grammar rules without constructing
/// anything. Skipped values are validated exactly like consumed ones:
/// strings are decoded, numbers are bounds-checked, and nested containers
/// recurse through the same states.
pub struct SkipParser;

/// Shared [`SkipParser`] instance.
pub static SKIP: SkipParser = SkipParser;

impl ValueParser for SkipParser {
    fn begin_object(&self, _ctx: &mut ParseContext) -> Result<(), ParseError> {
        Ok(())
    }

    fn begin_array(&self, _ctx: &mut ParseContext) -> Result<(), ParseError> {
        Ok(())
    }

    fn on_string(&self, ctx: &mut ParseContext, buf: &[u8]) -> Result<(), ParseError> {
        decode_string(ctx.token_slice(buf))?;
        Ok(())
    }

    fn on_number(&self, ctx: &mut ParseContext, buf: &[u8], float: bool) -> Result<(), ParseError> {
        if float {
            parse_f64(ctx.token_slice(buf))?;
        } else {
            parse_i64(ctx.token_slice(buf))?;
        }
        Ok(())
    }

    fn on_boolean(&self, _ctx: &mut ParseContext, _value: bool) -> Result<(), ParseError> {
        Ok(())
    }

    fn on_null(&self, _ctx: &mut ParseContext) -> Result<(), ParseError> {
        Ok(())
    }
}

/// Parses a JSON integer into an `i64` target.
pub struct LongParser;

/// Shared [`LongParser`] instance.
pub static LONG: LongParser = LongParser;

impl ValueParser for LongParser {
    fn on_number(&self, ctx: &mut ParseContext, buf: &[u8], float: bool) -> Result<(), ParseError> {
        if float {
            return Err(ParseError::NumberFormat("expected integer, found fraction"));
        }
        let value = parse_i64(ctx.token_slice(buf))?;
        ctx.push_target(value);
        Ok(())
    }
}

/// Parses any JSON number into an `f64` target.
pub struct DoubleParser;

/// Shared [`DoubleParser`] instance.
pub static DOUBLE: DoubleParser = DoubleParser;

impl ValueParser for DoubleParser {
    fn on_number(
        &self,
        ctx: &mut ParseContext,
        buf: &[u8],
        _float: bool,
    ) -> Result<(), ParseError> {
        let value = parse_f64(ctx.token_slice(buf))?;
        ctx.push_target(value);
        Ok(())
    }
}

/// Parses a JSON boolean into a `bool` target.
pub struct BooleanParser;

/// Shared [`BooleanParser`] instance.
pub static BOOLEAN: BooleanParser = BooleanParser;

impl ValueParser for BooleanParser {
    fn on_boolean(&self, ctx: &mut ParseContext, value: bool) -> Result<(), ParseError> {
        ctx.push_target(value);
        Ok(())
    }
}

/// Parses a JSON string into a `String` target.
pub struct StringParser;

/// Shared [`StringParser`] instance.
pub static STRING: StringParser = StringParser;

impl ValueParser for StringParser {
    fn on_string(&self, ctx: &mut ParseContext, buf: &[u8]) -> Result<(), ParseError> {
        let value = decode_string(ctx.token_slice(buf))?;
        ctx.push_target(value);
        Ok(())
    }
}
