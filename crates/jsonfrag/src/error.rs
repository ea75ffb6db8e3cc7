use thiserror::Error;

/// Errors raised while decoding a JSON document.
///
/// Every variant is fatal and terminal for the [`ParseContext`] that raised
/// it: the context records the failure and rejects any further `feed` or
/// `finish` call with [`ParseError::InvalidState`].
///
/// [`ParseContext`]: crate::ParseContext
#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ParseError {
    /// A byte that no grammar rule accepts at the current position.
    #[error("syntax error: unexpected byte 0x{0:02x}")]
    Syntax(u8),

    /// Input ended inside a quoted string or escape sequence.
    #[error("unterminated token at end of input")]
    UnterminatedToken,

    /// A `\u` escape with malformed hex digits, an unknown escape letter, or
    /// an unpaired surrogate half.
    #[error("invalid escape sequence: {0}")]
    InvalidEscape(&'static str),

    /// A multi-byte UTF-8 sequence with an invalid continuation byte.
    #[error("invalid utf-8 continuation byte 0x{0:02x}")]
    InvalidUtf8(u8),

    /// Numeric overflow or a malformed digit run.
    #[error("malformed number: {0}")]
    NumberFormat(&'static str),

    /// `finish` was called while continuations were still pending.
    #[error("document ended before parsing completed")]
    IncompleteDocument,

    /// Stack-discipline misuse, such as popping an empty target stack or
    /// feeding a context that already failed.
    #[error("invalid parser state: {0}")]
    InvalidState(&'static str),

    /// An I/O failure while draining a reader.
    #[cfg(feature = "std")]
    #[error("i/o error: {0}")]
    Io(alloc::string::String),
}
