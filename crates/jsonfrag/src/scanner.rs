//! Scanner primitives.
//!
//! Each primitive consumes one byte at a time from the live buffer,
//! classifies it, and either keeps going or returns the terminating byte
//! (already consumed; callers rewind when the byte belongs to an enclosing
//! state). Returning `None` is the "no more input" sentinel: the caller has
//! already captured everything needed to resume, so the state suspends
//! without persisting anything extra.

use crate::context::ParseContext;

impl ParseContext {
    /// Consumes JSON whitespace; returns the first non-whitespace byte.
    pub(crate) fn skip_whitespace(&mut self, buf: &[u8]) -> Option<u8> {
        while self.cursor < buf.len() {
            let b = buf[self.cursor];
            self.cursor += 1;
            if !matches!(b, b' ' | b'\t' | b'\n' | b'\r') {
                return Some(b);
            }
        }
        None
    }

    /// Consumes string-body bytes up to and including the closing unescaped
    /// quote, which it returns.
    ///
    /// The escape toggle lives on the token state and flips only on an
    /// *unescaped* backslash, so two consecutive backslashes cancel and a
    /// trailing backslash at a buffer boundary carries into the next
    /// delivery.
    pub(crate) fn skip_to_quote(&mut self, buf: &[u8]) -> Option<u8> {
        while self.cursor < buf.len() {
            let b = buf[self.cursor];
            self.cursor += 1;
            if self.token.escaped {
                self.token.escaped = false;
            } else if b == b'\\' {
                self.token.escaped = true;
            } else if b == b'"' {
                return Some(b);
            }
        }
        None
    }

    /// Consumes ASCII digits; returns the first non-digit byte.
    pub(crate) fn skip_digits(&mut self, buf: &[u8]) -> Option<u8> {
        while self.cursor < buf.len() {
            let b = buf[self.cursor];
            self.cursor += 1;
            if !b.is_ascii_digit() {
                return Some(b);
            }
        }
        None
    }

    /// Consumes ASCII letters; returns the first non-letter byte.
    pub(crate) fn skip_alphabetic(&mut self, buf: &[u8]) -> Option<u8> {
        while self.cursor < buf.len() {
            let b = buf[self.cursor];
            self.cursor += 1;
            if !b.is_ascii_alphabetic() {
                return Some(b);
            }
        }
        None
    }

    /// Un-consumes the terminating byte so the enclosing state can reprocess
    /// it as a structural delimiter.
    pub(crate) fn rewind(&mut self) {
        debug_assert!(self.cursor > 0, "rewind before any byte was consumed");
        self.cursor -= 1;
    }
}

#[cfg(test)]
mod tests {
    use crate::{GENERIC, context::ParseContext};

    fn ctx() -> ParseContext {
        ParseContext::new(&GENERIC)
    }

    #[test]
    fn whitespace_run_ends_on_content() {
        let mut c = ctx();
        assert_eq!(c.skip_whitespace(b" \t\r\n x"), Some(b'x'));
        assert_eq!(c.skip_whitespace(b" x"), None);
    }

    #[test]
    fn quote_scan_honors_escapes() {
        let mut c = ctx();
        c.begin_token(0);
        // The escaped quote does not terminate; the later one does.
        assert_eq!(c.skip_to_quote(br#"ab\"cd"x"#), Some(b'"'));
        assert_eq!(c.cursor, 8);
    }

    #[test]
    fn double_backslash_cancels_escape() {
        let mut c = ctx();
        c.begin_token(0);
        assert_eq!(c.skip_to_quote(br#"ab\\"tail"#), Some(b'"'));
        assert_eq!(c.cursor, 5);
    }

    #[test]
    fn trailing_backslash_survives_suspension() {
        let mut c = ctx();
        c.begin_token(0);
        assert_eq!(c.skip_to_quote(br"ab\"), None);
        // The first byte of the next buffer is consumed as escaped content.
        c.cursor = 0;
        assert_eq!(c.skip_to_quote(br#""tail""#), Some(b'"'));
        assert_eq!(c.cursor, 6);
    }

    #[test]
    fn digit_run_returns_terminator() {
        let mut c = ctx();
        assert_eq!(c.skip_digits(b"123,"), Some(b','));
        c.rewind();
        assert_eq!(c.cursor, 3);
    }
}
