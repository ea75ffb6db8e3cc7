//! Token materialization.
//!
//! A token (string body, digit run, literal run) is tracked as a pair of
//! offsets into the live buffer while it fits in one delivery — the fast
//! path. The moment a delivery boundary splits it, the bytes scanned so far
//! are stashed into an owned overflow buffer and subsequent deliveries append
//! to it — the slow path. [`TokenState::slice`] hands decoders a uniform byte
//! view, so both paths decode identically.

use alloc::vec::Vec;

use bstr::BStr;

/// State of the lexical unit currently being scanned.
pub(crate) struct TokenState {
    /// Offset of the first unstashed token byte in the live buffer, or `None`
    /// when no token is in flight.
    start: Option<usize>,
    /// Exclusive end offset in the live buffer, recorded on completion.
    end: usize,
    /// Owned bytes accumulated once the token spans deliveries.
    overflow: Vec<u8>,
    /// Whether the last consumed string byte was an unescaped backslash.
    /// Survives suspension: a trailing backslash at a buffer boundary changes
    /// how the first byte of the next buffer is read.
    pub(crate) escaped: bool,
}

impl TokenState {
    pub(crate) fn new() -> Self {
        Self {
            start: None,
            end: 0,
            overflow: Vec::new(),
            escaped: false,
        }
    }

    /// Begins a new token whose first byte is at `at`.
    pub(crate) fn begin(&mut self, at: usize) {
        self.start = Some(at);
        self.end = at;
        self.overflow.clear();
        self.escaped = false;
    }

    /// Marks the token as ending (exclusive) at `at`.
    pub(crate) fn end_at(&mut self, at: usize) {
        self.end = at;
    }

    pub(crate) fn is_active(&self) -> bool {
        self.start.is_some()
    }

    /// Moves the bytes scanned so far out of an exhausted buffer.
    ///
    /// Called exactly once per suspension, with the cursor at `buf.len()`.
    /// The next delivery restarts the buffer-local span at offset zero.
    pub(crate) fn stash(&mut self, buf: &[u8]) {
        if let Some(start) = self.start {
            self.overflow.extend_from_slice(&buf[start..]);
            self.start = Some(0);
        }
    }

    /// Returns the complete token bytes, fast path or slow.
    ///
    /// On the slow path the current buffer's tail is folded into the overflow
    /// buffer first; calling this more than once per token is fine.
    pub(crate) fn slice<'a>(&'a mut self, buf: &'a [u8]) -> &'a [u8] {
        let start = self.start.unwrap_or(self.end);
        if self.overflow.is_empty() {
            &buf[start..self.end]
        } else {
            self.overflow.extend_from_slice(&buf[start..self.end]);
            self.start = Some(self.end);
            &self.overflow
        }
    }

    /// Discards the token once its decoded value has been applied.
    pub(crate) fn clear(&mut self) {
        self.start = None;
        self.end = 0;
        self.overflow.clear();
        self.escaped = false;
    }
}

impl core::fmt::Debug for TokenState {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("TokenState")
            .field("start", &self.start)
            .field("end", &self.end)
            .field("overflow", &BStr::new(&self.overflow))
            .field("escaped", &self.escaped)
            .finish()
    }
}
