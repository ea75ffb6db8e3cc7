//! The resumable parsing engine.
//!
//! A [`ParseContext`] is the unit of resumable state for one logical
//! document. It owns two explicit LIFO stacks that must outlive any single
//! `feed` call:
//!
//! - the **continuation stack**, pending [`Continuation`]s that fully
//!   determine where parsing resumes, and
//! - the **target stack**, in-progress result values assembled bottom-up as
//!   parsing descends and ascends the document tree.
//!
//! The feed loop is a trampoline: it pops the top continuation and invokes
//! it. `true` means that frame is structurally finished and the next frame
//! continues; `false` means input ran out mid-state and the state has already
//! pushed its resume point(s), so the call returns "needs more data" without
//! blocking. Because suspension lives on these heap stacks rather than the
//! native call stack, nesting depth is bounded only by available memory.

use alloc::{boxed::Box, vec, vec::Vec};
use core::any::Any;

use crate::{error::ParseError, parser::ValueParser, states, token::TokenState};

/// A shared, stateless parser singleton. All per-parse mutable state lives on
/// the [`ParseContext`]; parser values themselves are flyweights.
pub type ParserRef = &'static dyn ValueParser;

/// A named state function of the continuation machine.
///
/// Returning `Ok(true)` means this sub-parse is structurally finished and any
/// result has already been applied or pushed. `Ok(false)` means input was
/// exhausted mid-state; the function has pushed itself (and any ancestor
/// resume points) onto the continuation stack before returning.
pub type StateFn = fn(Continuation, &mut ParseContext, &[u8]) -> Result<bool, ParseError>;

/// Completion callback folding a finished child value into its parent:
/// insert-into-list, insert-into-map, or property assignment.
pub type CompleteFn = fn(&mut ParseContext) -> Result<(), ParseError>;

/// How to parse one container member: the sub-parser for its value and the
/// completion callback applying the value to the parent.
#[derive(Clone, Copy)]
pub struct Member {
    pub parser: ParserRef,
    pub complete: CompleteFn,
}

impl Member {
    /// Consume the value under the full grammar rules without constructing
    /// anything. Used for unknown object fields.
    #[must_use]
    pub fn skip() -> Self {
        Member {
            parser: &crate::parser::SKIP,
            complete: no_completion,
        }
    }
}

/// Completion that applies nothing; partner of [`Member::skip`].
pub fn no_completion(_ctx: &mut ParseContext) -> Result<(), ParseError> {
    Ok(())
}

/// One pending resumption point: a state function paired with the parser it
/// belongs to, plus the member plan when the state sits between a scanned key
/// and its value.
#[derive(Clone, Copy)]
pub struct Continuation {
    pub(crate) parser: ParserRef,
    pub(crate) state: StateFn,
    pub(crate) member: Option<Member>,
}

impl Continuation {
    /// The entry continuation for a parser: parse one complete value of the
    /// parser's type.
    #[must_use]
    pub fn entry(parser: ParserRef) -> Self {
        Self {
            parser,
            state: parser.entry(),
            member: None,
        }
    }

    pub(crate) fn state(parser: ParserRef, state: StateFn) -> Self {
        Self {
            parser,
            state,
            member: None,
        }
    }

    pub(crate) fn with_member(parser: ParserRef, state: StateFn, member: Member) -> Self {
        Self {
            parser,
            state,
            member: Some(member),
        }
    }

    /// The same continuation, resuming at a different state.
    pub(crate) fn at(self, state: StateFn) -> Self {
        Self { state, ..self }
    }

    /// A continuation that runs a member's completion callback.
    pub(crate) fn completion(member: Member) -> Self {
        Self {
            parser: member.parser,
            state: states::run_completion,
            member: Some(member),
        }
    }
}

impl core::fmt::Debug for Continuation {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Continuation")
            .field("state", &(self.state as usize as *const ()))
            .field("has_member", &self.member.is_some())
            .finish()
    }
}

/// Resumable parse state for a single JSON document.
///
/// Create one per document, feed it byte buffers of any size, and call
/// [`finish`](Self::finish) when the input ends. A context that returned an
/// error is terminal and must be discarded; feeding it again reports
/// [`ParseError::InvalidState`].
///
/// # Examples
///
/// ```
/// use jsonfrag::{GENERIC, ParseContext, Value};
///
/// let mut ctx = ParseContext::new(&GENERIC);
/// assert!(!ctx.feed(b"[1, ").unwrap());
/// assert!(ctx.feed(b"2]").unwrap());
/// ctx.finish().unwrap();
/// let v: Value = ctx.take_result().unwrap();
/// assert_eq!(v, Value::Array(vec![Value::Integer(1), Value::Integer(2)]));
/// ```
pub struct ParseContext {
    /// Cursor into the buffer of the current `feed` call. The buffer itself
    /// is only borrowed for the duration of that call.
    pub(crate) cursor: usize,
    pub(crate) end_of_input: bool,
    complete: bool,
    failed: bool,
    continuations: Vec<Continuation>,
    targets: Vec<Box<dyn Any>>,
    pub(crate) token: TokenState,
}

impl ParseContext {
    /// Creates a context that parses one document with `root` as the
    /// top-level value parser.
    #[must_use]
    pub fn new(root: ParserRef) -> Self {
        Self {
            cursor: 0,
            end_of_input: false,
            complete: false,
            failed: false,
            continuations: vec![Continuation::entry(root)],
            targets: Vec::new(),
            token: TokenState::new(),
        }
    }

    /// Feeds the next fragment of the document.
    ///
    /// Returns `Ok(true)` once the document is structurally complete (any
    /// trailing bytes in `buf` are left unread), `Ok(false)` when more input
    /// is needed.
    ///
    /// # Errors
    ///
    /// Any [`ParseError`]; the context is terminal afterwards.
    pub fn feed(&mut self, buf: &[u8]) -> Result<bool, ParseError> {
        if self.failed {
            return Err(ParseError::InvalidState("context reused after error"));
        }
        if self.complete {
            return Ok(true);
        }
        self.cursor = 0;
        match self.run(buf) {
            Ok(done) => Ok(done),
            Err(err) => {
                self.failed = true;
                Err(err)
            }
        }
    }

    fn run(&mut self, buf: &[u8]) -> Result<bool, ParseError> {
        while let Some(cont) = self.continuations.pop() {
            if !(cont.state)(cont, self, buf)? {
                if self.end_of_input {
                    return Err(ParseError::IncompleteDocument);
                }
                // The buffer dies with this call; move any in-flight token
                // bytes onto the owned slow path.
                self.token.stash(buf);
                return Ok(false);
            }
        }
        self.complete = true;
        Ok(true)
    }

    /// Declares end of input, forcing resolution of any pending state.
    ///
    /// # Errors
    ///
    /// [`ParseError::IncompleteDocument`] if the document was truncated at a
    /// structural position, [`ParseError::UnterminatedToken`] if it was
    /// truncated inside a string, or any error the remaining states raise.
    pub fn finish(&mut self) -> Result<(), ParseError> {
        self.end_of_input = true;
        self.feed(&[]).map(|_| ())
    }

    /// Whether the document has parsed to completion.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.complete
    }

    /// Pops the finished root value off the target stack.
    ///
    /// # Errors
    ///
    /// [`ParseError::InvalidState`] if the document is not complete or the
    /// result is not a `T`.
    pub fn take_result<T: Any>(&mut self) -> Result<T, ParseError> {
        if !self.complete {
            return Err(ParseError::InvalidState("document not complete"));
        }
        self.pop_target()
    }

    // --- target stack ---------------------------------------------------

    /// Pushes an in-progress or finished value.
    pub fn push_target<T: Any>(&mut self, value: T) {
        self.targets.push(Box::new(value));
    }

    /// Pops the top value, downcasting it to `T`.
    ///
    /// # Errors
    ///
    /// [`ParseError::InvalidState`] on an empty stack or a type mismatch.
    pub fn pop_target<T: Any>(&mut self) -> Result<T, ParseError> {
        let top = self
            .targets
            .pop()
            .ok_or(ParseError::InvalidState("pop on empty target stack"))?;
        match top.downcast::<T>() {
            Ok(value) => Ok(*value),
            Err(_) => Err(ParseError::InvalidState("target type mismatch")),
        }
    }

    /// Borrows the top value mutably, downcast to `T`.
    ///
    /// # Errors
    ///
    /// [`ParseError::InvalidState`] on an empty stack or a type mismatch.
    pub fn peek_target_mut<T: Any>(&mut self) -> Result<&mut T, ParseError> {
        self.targets
            .last_mut()
            .ok_or(ParseError::InvalidState("peek on empty target stack"))?
            .downcast_mut::<T>()
            .ok_or(ParseError::InvalidState("target type mismatch"))
    }

    /// Current target stack depth; mirrors JSON nesting depth for well-formed
    /// input.
    #[must_use]
    pub fn target_depth(&self) -> usize {
        self.targets.len()
    }

    // --- continuation stack ---------------------------------------------

    /// Pushes a pending continuation; it runs before everything below it.
    pub fn push_state(&mut self, cont: Continuation) {
        self.continuations.push(cont);
    }

    /// Inserts a continuation below existing entries, so a child state runs
    /// first and a specific ancestor resumes afterwards.
    pub fn push_state_at(&mut self, cont: Continuation, index: usize) {
        self.continuations.insert(index, cont);
    }

    /// Current continuation stack height, for use with
    /// [`push_state_at`](Self::push_state_at).
    #[must_use]
    pub fn state_index(&self) -> usize {
        self.continuations.len()
    }

    /// Records `cont` as the resume point and reports "input exhausted".
    pub(crate) fn suspend(&mut self, cont: Continuation) -> Result<bool, ParseError> {
        self.continuations.push(cont);
        Ok(false)
    }

    pub(crate) fn at_end_of_input(&self) -> bool {
        self.end_of_input
    }

    // --- token ----------------------------------------------------------

    /// The bytes of the token that just completed, whether it arrived in one
    /// delivery or was materialized across several.
    pub fn token_slice<'a>(&'a mut self, buf: &'a [u8]) -> &'a [u8] {
        self.token.slice(buf)
    }

    pub(crate) fn begin_token(&mut self, at: usize) {
        self.token.begin(at);
    }

    pub(crate) fn end_token_at(&mut self, at: usize) {
        self.token.end_at(at);
    }

    pub(crate) fn clear_token(&mut self) {
        self.token.clear();
    }
}

impl core::fmt::Debug for ParseContext {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ParseContext")
            .field("cursor", &self.cursor)
            .field("end_of_input", &self.end_of_input)
            .field("complete", &self.complete)
            .field("failed", &self.failed)
            .field("pending_states", &self.continuations.len())
            .field("target_depth", &self.targets.len())
            .field("token", &self.token)
            .finish()
    }
}
