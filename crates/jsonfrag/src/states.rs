//! The grammar state functions of the continuation machine.
//!
//! Every function here is a [`StateFn`]: stateless, shareable, and driven by
//! the [`ParseContext`] trampoline. A state that runs out of input pushes its
//! resume continuation and returns `Ok(false)`; a state that finishes returns
//! `Ok(true)` and the trampoline proceeds to the next pending continuation.
//!
//! Object members and array elements schedule their child value parser on the
//! continuation stack and insert the ancestor resume points *below* it, so
//! the child runs to completion first and the parent picks up afterwards, no
//! matter how many deliveries the child spans.

use crate::{
    context::{Continuation, ParseContext},
    error::ParseError,
};

/// Dispatches on the first non-whitespace byte of a value: string, number,
/// boolean, null, object, or array. The entry state of every bundled parser.
pub fn value(cont: Continuation, ctx: &mut ParseContext, buf: &[u8]) -> Result<bool, ParseError> {
    let Some(b) = ctx.skip_whitespace(buf) else {
        return ctx.suspend(cont.at(value));
    };
    match b {
        b'"' => {
            ctx.begin_token(ctx.cursor);
            string_body(cont.at(string_body), ctx, buf)
        }
        b'{' => {
            cont.parser.begin_object(ctx)?;
            ctx.push_state(Continuation::state(cont.parser, loop_keys));
            Ok(true)
        }
        b'[' => {
            cont.parser.begin_array(ctx)?;
            ctx.push_state(Continuation::state(cont.parser, loop_values));
            Ok(true)
        }
        b'0'..=b'9' | b'-' | b'+' => {
            ctx.begin_token(ctx.cursor - 1);
            integer_digits(cont.at(integer_digits), ctx, buf)
        }
        b't' | b'f' | b'n' => {
            ctx.begin_token(ctx.cursor - 1);
            literal_body(cont.at(literal_body), ctx, buf)
        }
        _ => Err(ParseError::Syntax(b)),
    }
}

/// Scans a string body to its unescaped closing quote.
pub(crate) fn string_body(
    cont: Continuation,
    ctx: &mut ParseContext,
    buf: &[u8],
) -> Result<bool, ParseError> {
    match ctx.skip_to_quote(buf) {
        None if ctx.at_end_of_input() => Err(ParseError::UnterminatedToken),
        None => ctx.suspend(cont),
        Some(_) => {
            ctx.end_token_at(ctx.cursor - 1);
            cont.parser.on_string(ctx, buf)?;
            ctx.clear_token();
            Ok(true)
        }
    }
}

/// Scans the integer digit run; a `.` switches to fraction scanning, any
/// other terminator ends the number and is rewound for the enclosing state.
pub(crate) fn integer_digits(
    cont: Continuation,
    ctx: &mut ParseContext,
    buf: &[u8],
) -> Result<bool, ParseError> {
    match ctx.skip_digits(buf) {
        None if ctx.at_end_of_input() => {
            ctx.end_token_at(ctx.cursor);
            finish_number(cont, ctx, buf, false)
        }
        None => ctx.suspend(cont),
        Some(b'.') => fraction_digits(cont.at(fraction_digits), ctx, buf),
        Some(_) => {
            ctx.rewind();
            ctx.end_token_at(ctx.cursor);
            finish_number(cont, ctx, buf, false)
        }
    }
}

/// Scans the fraction digit run after the decimal point.
pub(crate) fn fraction_digits(
    cont: Continuation,
    ctx: &mut ParseContext,
    buf: &[u8],
) -> Result<bool, ParseError> {
    match ctx.skip_digits(buf) {
        None if ctx.at_end_of_input() => {
            ctx.end_token_at(ctx.cursor);
            finish_number(cont, ctx, buf, true)
        }
        None => ctx.suspend(cont),
        Some(_) => {
            ctx.rewind();
            ctx.end_token_at(ctx.cursor);
            finish_number(cont, ctx, buf, true)
        }
    }
}

fn finish_number(
    cont: Continuation,
    ctx: &mut ParseContext,
    buf: &[u8],
    float: bool,
) -> Result<bool, ParseError> {
    cont.parser.on_number(ctx, buf, float)?;
    ctx.clear_token();
    Ok(true)
}

/// Scans an alphabetic run and validates it is exactly `true`, `false`, or
/// `null` by byte comparison.
pub(crate) fn literal_body(
    cont: Continuation,
    ctx: &mut ParseContext,
    buf: &[u8],
) -> Result<bool, ParseError> {
    match ctx.skip_alphabetic(buf) {
        None if ctx.at_end_of_input() => {
            ctx.end_token_at(ctx.cursor);
            finish_literal(cont, ctx, buf)
        }
        None => ctx.suspend(cont),
        Some(_) => {
            ctx.rewind();
            ctx.end_token_at(ctx.cursor);
            finish_literal(cont, ctx, buf)
        }
    }
}

enum Literal {
    True,
    False,
    Null,
}

fn finish_literal(
    cont: Continuation,
    ctx: &mut ParseContext,
    buf: &[u8],
) -> Result<bool, ParseError> {
    let literal = match ctx.token_slice(buf) {
        b"true" => Literal::True,
        b"false" => Literal::False,
        b"null" => Literal::Null,
        other => return Err(ParseError::Syntax(other.first().copied().unwrap_or(b' '))),
    };
    ctx.clear_token();
    match literal {
        Literal::True => cont.parser.on_boolean(ctx, true)?,
        Literal::False => cont.parser.on_boolean(ctx, false)?,
        Literal::Null => cont.parser.on_null(ctx)?,
    }
    Ok(true)
}

/// Inside an object, expects a key (`"`) or the end of the object (`}`).
pub(crate) fn loop_keys(
    cont: Continuation,
    ctx: &mut ParseContext,
    buf: &[u8],
) -> Result<bool, ParseError> {
    let Some(b) = ctx.skip_whitespace(buf) else {
        return ctx.suspend(cont);
    };
    match b {
        b'}' => {
            cont.parser.end_object(ctx)?;
            Ok(true)
        }
        b'"' => {
            ctx.begin_token(ctx.cursor);
            key_body(cont.at(key_body), ctx, buf)
        }
        _ => Err(ParseError::Syntax(b)),
    }
}

/// Scans a member key and asks the parser to dispatch it.
pub(crate) fn key_body(
    cont: Continuation,
    ctx: &mut ParseContext,
    buf: &[u8],
) -> Result<bool, ParseError> {
    match ctx.skip_to_quote(buf) {
        None if ctx.at_end_of_input() => Err(ParseError::UnterminatedToken),
        None => ctx.suspend(cont),
        Some(_) => {
            ctx.end_token_at(ctx.cursor - 1);
            let member = cont.parser.member_key(ctx, buf)?;
            ctx.clear_token();
            value_separator(
                Continuation::with_member(cont.parser, value_separator, member),
                ctx,
                buf,
            )
        }
    }
}

/// Expects the `:` between a key and its value, then schedules the member's
/// value parser with the ancestor resume points inserted below it.
pub(crate) fn value_separator(
    cont: Continuation,
    ctx: &mut ParseContext,
    buf: &[u8],
) -> Result<bool, ParseError> {
    let Some(b) = ctx.skip_whitespace(buf) else {
        return ctx.suspend(cont);
    };
    if b != b':' {
        return Err(ParseError::Syntax(b));
    }
    let member = cont
        .member
        .ok_or(ParseError::InvalidState("value separator without member"))?;
    ctx.push_state(Continuation::entry(member.parser));
    let below = ctx.state_index() - 1;
    ctx.push_state_at(Continuation::state(cont.parser, next_keys), below);
    ctx.push_state_at(Continuation::completion(member), below + 1);
    Ok(true)
}

/// After a member's value: expects `,` (more keys) or `}` (done).
pub(crate) fn next_keys(
    cont: Continuation,
    ctx: &mut ParseContext,
    buf: &[u8],
) -> Result<bool, ParseError> {
    let Some(b) = ctx.skip_whitespace(buf) else {
        return ctx.suspend(cont);
    };
    match b {
        b',' => {
            ctx.push_state(Continuation::state(cont.parser, loop_keys));
            Ok(true)
        }
        b'}' => {
            cont.parser.end_object(ctx)?;
            Ok(true)
        }
        _ => Err(ParseError::Syntax(b)),
    }
}

/// Inside an array, expects an element or the end of the array (`]`).
pub(crate) fn loop_values(
    cont: Continuation,
    ctx: &mut ParseContext,
    buf: &[u8],
) -> Result<bool, ParseError> {
    let Some(b) = ctx.skip_whitespace(buf) else {
        return ctx.suspend(cont);
    };
    if b == b']' {
        cont.parser.end_array(ctx)?;
        return Ok(true);
    }
    // The byte belongs to the element's own grammar.
    ctx.rewind();
    let member = cont.parser.array_element(ctx)?;
    ctx.push_state(Continuation::entry(member.parser));
    let below = ctx.state_index() - 1;
    ctx.push_state_at(Continuation::state(cont.parser, next_values), below);
    ctx.push_state_at(Continuation::completion(member), below + 1);
    Ok(true)
}

/// After an array element: expects `,` (more elements) or `]` (done).
pub(crate) fn next_values(
    cont: Continuation,
    ctx: &mut ParseContext,
    buf: &[u8],
) -> Result<bool, ParseError> {
    let Some(b) = ctx.skip_whitespace(buf) else {
        return ctx.suspend(cont);
    };
    match b {
        b',' => {
            ctx.push_state(Continuation::state(cont.parser, loop_values));
            Ok(true)
        }
        b']' => {
            cont.parser.end_array(ctx)?;
            Ok(true)
        }
        _ => Err(ParseError::Syntax(b)),
    }
}

/// Runs a member's completion callback once its value parser finished.
pub(crate) fn run_completion(
    cont: Continuation,
    ctx: &mut ParseContext,
    _buf: &[u8],
) -> Result<bool, ParseError> {
    let member = cont
        .member
        .ok_or(ParseError::InvalidState("completion without member"))?;
    (member.complete)(ctx)?;
    Ok(true)
}
