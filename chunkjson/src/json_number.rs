// SPDX-License-Identifier: Apache-2.0

use core::fmt::Write;

use crate::shared::TokenType;
use crate::Error;

/// Classifies recorded number text by inspecting it.
///
/// Any `.`, `e` or `E` makes a float; otherwise a leading `-` makes a signed
/// integer and anything else an unsigned one.
pub fn classify(text: &[u8]) -> TokenType {
    if text.iter().any(|&b| matches!(b, b'.' | b'e' | b'E')) {
        TokenType::Float
    } else if text.first() == Some(&b'-') {
        TokenType::Integer
    } else {
        TokenType::UInteger
    }
}

/// Checks caller-supplied float text before the generator writes it.
///
/// Accepted: optional `-`, `0` or a digit run without a leading zero, a
/// mandatory `.` followed by at least one digit, then an optional exponent
/// with at least one digit. Nothing may follow.
pub fn is_valid_float(text: &[u8]) -> bool {
    let mut rest = match text {
        [b'-', rest @ ..] => rest,
        _ => text,
    };

    rest = match rest {
        [b'0', tail @ ..] => tail,
        [b'1'..=b'9', tail @ ..] => skip_digits(tail),
        _ => return false,
    };

    rest = match rest {
        [b'.', tail @ ..] => match skip_digits(tail) {
            after if after.len() < tail.len() => after,
            _ => return false,
        },
        _ => return false,
    };

    if let [b'e' | b'E', tail @ ..] = rest {
        let digits = match tail {
            [b'+' | b'-', d @ ..] => d,
            _ => tail,
        };
        let after = skip_digits(digits);
        if after.len() == digits.len() {
            return false;
        }
        rest = after;
    }

    rest.is_empty()
}

fn skip_digits(text: &[u8]) -> &[u8] {
    let count = text.iter().take_while(|b| b.is_ascii_digit()).count();
    text.get(count..).unwrap_or(&[])
}

/// Fixed-capacity text sink for formatting integers without allocation.
///
/// 20 digits plus a sign covers every `i64` and `u64`.
pub struct NumberText {
    bytes: [u8; 21],
    len: usize,
}

impl NumberText {
    pub fn from_i64(value: i64) -> Self {
        let mut text = Self::empty();
        // Cannot fail: the buffer holds the longest i64.
        write!(text, "{value}").ok();
        text
    }

    pub fn from_u64(value: u64) -> Self {
        let mut text = Self::empty();
        // Cannot fail: the buffer holds the longest u64.
        write!(text, "{value}").ok();
        text
    }

    fn empty() -> Self {
        Self {
            bytes: [0; 21],
            len: 0,
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.bytes.get(..self.len).unwrap_or(&[])
    }
}

impl Write for NumberText {
    fn write_str(&mut self, s: &str) -> core::fmt::Result {
        let end = self.len + s.len();
        let dest = self.bytes.get_mut(self.len..end).ok_or(core::fmt::Error)?;
        dest.copy_from_slice(s.as_bytes());
        self.len = end;
        Ok(())
    }
}

/// Converts recorded float text to `f64`.
#[cfg(feature = "float")]
pub fn parse_f64(text: &[u8]) -> Result<f64, Error> {
    let s = core::str::from_utf8(text).map_err(|_| Error::InvalidNumber)?;
    match s.parse::<f64>() {
        Ok(val) if val.is_finite() => Ok(val),
        _ => Err(Error::InvalidNumber),
    }
}

/// Converts integer text, mapping conversion failures onto [`Error`].
pub fn parse_i64(text: &[u8]) -> Result<i64, Error> {
    Ok(crate::int_parser::from_ascii_i64(text)?)
}

pub fn parse_u64(text: &[u8]) -> Result<u64, Error> {
    Ok(crate::int_parser::from_ascii_u64(text)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify() {
        assert_eq!(classify(b"-3.14e2"), TokenType::Float);
        assert_eq!(classify(b"1E5"), TokenType::Float);
        assert_eq!(classify(b"-42"), TokenType::Integer);
        assert_eq!(classify(b"42"), TokenType::UInteger);
        assert_eq!(classify(b"0"), TokenType::UInteger);
    }

    #[test]
    fn test_float_validator_accepts() {
        for text in ["0.0", "-1.5e10", "3.0E-7", "10.5e+3", "-0.001"] {
            assert!(is_valid_float(text.as_bytes()), "{text}");
        }
    }

    #[test]
    fn test_float_validator_rejects() {
        for text in [
            "5", "1.", ".5", "NaN", "", "-", "01.5", "1.5e", "1.5e+", "1.5x", "1.5 ", "--1.0", "+2.25",
        ] {
            assert!(!is_valid_float(text.as_bytes()), "{text}");
        }
    }

    #[test]
    fn test_number_text_extremes() {
        assert_eq!(NumberText::from_i64(i64::MIN).as_bytes(), b"-9223372036854775808");
        assert_eq!(NumberText::from_i64(0).as_bytes(), b"0");
        assert_eq!(NumberText::from_u64(u64::MAX).as_bytes(), b"18446744073709551615");
    }

    #[test]
    fn test_integer_conversion_errors() {
        assert_eq!(parse_i64(b"-17"), Ok(-17));
        assert_eq!(parse_u64(b"99999999999999999999"), Err(Error::NumericOverflow));
        assert_eq!(parse_i64(b"1.5"), Err(Error::InvalidNumber));
    }

    #[test]
    #[cfg(feature = "float")]
    fn test_parse_f64() {
        assert_eq!(parse_f64(b"-3.14e2"), Ok(-314.0));
        assert_eq!(parse_f64(b"2"), Ok(2.0));
        assert_eq!(parse_f64(b"1e999"), Err(Error::InvalidNumber));
    }
}
