//! Overflow-safe numeric decoding.
//!
//! Integers accumulate into a *negative* running total bounded by `multmin`,
//! mirroring the asymmetry of two's-complement (`i64::MIN` has no positive
//! counterpart). This lets `-9223372036854775808` parse without ever
//! computing a value outside the representable range.

use crate::error::ParseError;

/// Decodes a signed 64-bit integer from an ASCII digit run with an optional
/// leading `+` or `-`.
pub(crate) fn parse_i64(bytes: &[u8]) -> Result<i64, ParseError> {
    let (negative, digits) = match bytes.split_first() {
        Some((b'-', rest)) => (true, rest),
        Some((b'+', rest)) => (false, rest),
        Some(_) => (false, bytes),
        None => return Err(ParseError::NumberFormat("empty digit run")),
    };
    if digits.is_empty() {
        return Err(ParseError::NumberFormat("sign without digits"));
    }

    let limit = if negative { i64::MIN } else { -i64::MAX };
    let multmin = limit / 10;
    let mut acc: i64 = 0;
    for &b in digits {
        if !b.is_ascii_digit() {
            return Err(ParseError::NumberFormat("non-digit in integer"));
        }
        let digit = i64::from(b - b'0');
        if acc < multmin {
            return Err(ParseError::NumberFormat("integer overflow"));
        }
        acc *= 10;
        if acc < limit + digit {
            return Err(ParseError::NumberFormat("integer overflow"));
        }
        acc -= digit;
    }

    Ok(if negative { acc } else { -acc })
}

/// Decodes a floating-point number (digit run containing a fraction dot).
pub(crate) fn parse_f64(bytes: &[u8]) -> Result<f64, ParseError> {
    // Token bytes are ASCII digits, sign, and a dot by construction.
    let text = core::str::from_utf8(bytes)
        .map_err(|_| ParseError::NumberFormat("non-ascii byte in number"))?;
    text.parse::<f64>()
        .map_err(|_| ParseError::NumberFormat("malformed fraction"))
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::{parse_f64, parse_i64};
    use crate::error::ParseError;

    #[rstest]
    #[case(b"0", 0)]
    #[case(b"42", 42)]
    #[case(b"+42", 42)]
    #[case(b"-42", -42)]
    #[case(b"9223372036854775807", i64::MAX)]
    #[case(b"-9223372036854775808", i64::MIN)]
    fn accepts(#[case] input: &[u8], #[case] expected: i64) {
        assert_eq!(parse_i64(input), Ok(expected));
    }

    #[rstest]
    #[case(b"" as &[u8])]
    #[case(b"-")]
    #[case(b"+")]
    #[case(b"9223372036854775808")]
    #[case(b"-9223372036854775809")]
    #[case(b"12x3")]
    fn rejects(#[case] input: &[u8]) {
        assert!(matches!(parse_i64(input), Err(ParseError::NumberFormat(_))));
    }

    #[test]
    fn fraction_parses() {
        assert_eq!(parse_f64(b"1.25"), Ok(1.25));
        assert_eq!(parse_f64(b"-0.5"), Ok(-0.5));
    }
}
