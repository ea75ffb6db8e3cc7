//! The schema-less tree parser.
//!
//! Builds nested [`Value`] maps, lists, and scalars with no schema
//! knowledge. Object keys are decoded and parked on the target stack between
//! the key and its value; the member completion pops the value and the key
//! and folds them into the map beneath.

use alloc::string::String;

use crate::{
    context::{Member, ParseContext},
    error::ParseError,
    numbers::{parse_f64, parse_i64},
    parser::ValueParser,
    strings::decode_string,
    value::{Array, Map, Value},
};

/// Parses any JSON value into a [`Value`] tree.
pub struct GenericParser;

/// Shared [`GenericParser`] instance.
pub static GENERIC: GenericParser = GenericParser;

impl ValueParser for GenericParser {
    fn begin_object(&self, ctx: &mut ParseContext) -> Result<(), ParseError> {
        ctx.push_target(Value::Object(Map::new()));
        Ok(())
    }

    fn begin_array(&self, ctx: &mut ParseContext) -> Result<(), ParseError> {
        ctx.push_target(Value::Array(Array::new()));
        Ok(())
    }

    fn member_key(&self, ctx: &mut ParseContext, buf: &[u8]) -> Result<Member, ParseError> {
        let key = decode_string(ctx.token_slice(buf))?;
        ctx.push_target(key);
        Ok(Member {
            parser: &GENERIC,
            complete: complete_member,
        })
    }

    fn array_element(&self, _ctx: &mut ParseContext) -> Result<Member, ParseError> {
        Ok(Member {
            parser: &GENERIC,
            complete: complete_element,
        })
    }

    fn on_string(&self, ctx: &mut ParseContext, buf: &[u8]) -> Result<(), ParseError> {
        let s = decode_string(ctx.token_slice(buf))?;
        ctx.push_target(Value::String(s));
        Ok(())
    }

    fn on_number(&self, ctx: &mut ParseContext, buf: &[u8], float: bool) -> Result<(), ParseError> {
        let value = if float {
            Value::Float(parse_f64(ctx.token_slice(buf))?)
        } else {
            Value::Integer(parse_i64(ctx.token_slice(buf))?)
        };
        ctx.push_target(value);
        Ok(())
    }

    fn on_boolean(&self, ctx: &mut ParseContext, value: bool) -> Result<(), ParseError> {
        ctx.push_target(Value::Boolean(value));
        Ok(())
    }

    fn on_null(&self, ctx: &mut ParseContext) -> Result<(), ParseError> {
        ctx.push_target(Value::Null);
        Ok(())
    }
}

fn complete_member(ctx: &mut ParseContext) -> Result<(), ParseError> {
    let value: Value = ctx.pop_target()?;
    let key: String = ctx.pop_target()?;
    match ctx.peek_target_mut::<Value>()? {
        Value::Object(map) => {
            map.insert(key, value);
            Ok(())
        }
        _ => Err(ParseError::InvalidState("member completion without object")),
    }
}

fn complete_element(ctx: &mut ParseContext) -> Result<(), ParseError> {
    let value: Value = ctx.pop_target()?;
    match ctx.peek_target_mut::<Value>()? {
        Value::Array(items) => {
            items.push(value);
            Ok(())
        }
        _ => Err(ParseError::InvalidState("element completion without array")),
    }
}
