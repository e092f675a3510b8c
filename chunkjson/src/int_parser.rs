// SPDX-License-Identifier: Apache-2.0

// Panic-free base-10 conversion of recorded number text

/// Why a run of number text could not be converted.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum ConstParseIntegerError {
    /// The input byte slice was empty.
    Empty,
    /// The input consisted only of a sign character (`+` or `-`).
    SignOnly,
    /// A byte was found that is not a base-10 digit.
    InvalidDigit,
    /// The value does not fit the target integer type.
    Overflow,
}

/// Creates a panic-free, const-stable, base-10 parser for one integer type.
///
/// Negative values are accumulated downwards so that `MIN` of a signed type
/// converts, and an unsigned type accepts `-0` but overflows on any other
/// negative value.
macro_rules! define_const_parser {
    ($fn_name:ident, $int_ty:ty) => {
        /// Parses ASCII digits with an optional sign into a(n) `
        #[doc = stringify!($int_ty)]
        /// `.
        pub const fn $fn_name(src: &[u8]) -> Result<$int_ty, ConstParseIntegerError> {
            let (is_negative, mut digits) = match src {
                [] => return Err(ConstParseIntegerError::Empty),
                [b'+', rest @ ..] => (false, rest),
                [b'-', rest @ ..] => (true, rest),
                _ => (false, src),
            };

            if digits.is_empty() {
                return Err(ConstParseIntegerError::SignOnly);
            }

            let mut result: $int_ty = 0;

            while let Some((&byte, rest)) = digits.split_first() {
                let digit = match byte {
                    b'0'..=b'9' => (byte - b'0') as $int_ty,
                    _ => return Err(ConstParseIntegerError::InvalidDigit),
                };

                result = match result.checked_mul(10) {
                    Some(val) => val,
                    None => return Err(ConstParseIntegerError::Overflow),
                };

                result = if is_negative {
                    match result.checked_sub(digit) {
                        Some(val) => val,
                        None => return Err(ConstParseIntegerError::Overflow),
                    }
                } else {
                    match result.checked_add(digit) {
                        Some(val) => val,
                        None => return Err(ConstParseIntegerError::Overflow),
                    }
                };

                digits = rest;
            }

            Ok(result)
        }
    };
}

define_const_parser!(from_ascii_i64, i64);
define_const_parser!(from_ascii_u64, u64);

#[cfg(test)]
mod tests {
    use super::*;

    mod test_i64 {
        use super::*;

        #[test]
        fn test_from_ascii_i64_simple() {
            assert_eq!(from_ascii_i64(b"0"), Ok(0));
            assert_eq!(from_ascii_i64(b"1234567890"), Ok(1234567890));
            assert_eq!(from_ascii_i64(b"-1234567890"), Ok(-1234567890));
            assert_eq!(from_ascii_i64(b"+42"), Ok(42));
        }

        #[test]
        fn test_from_ascii_i64_limits() {
            assert_eq!(
                from_ascii_i64(i64::MAX.to_string().as_bytes()),
                Ok(i64::MAX)
            );
            assert_eq!(
                from_ascii_i64(i64::MIN.to_string().as_bytes()),
                Ok(i64::MIN)
            );
        }

        #[test]
        fn test_from_ascii_i64_overflow() {
            assert_eq!(
                from_ascii_i64(b"9223372036854775808"),
                Err(ConstParseIntegerError::Overflow)
            );
            assert_eq!(
                from_ascii_i64(b"-9223372036854775809"),
                Err(ConstParseIntegerError::Overflow)
            );
        }

        #[test]
        fn test_from_ascii_i64_errors() {
            assert_eq!(from_ascii_i64(b""), Err(ConstParseIntegerError::Empty));
            assert_eq!(from_ascii_i64(b"-"), Err(ConstParseIntegerError::SignOnly));
            assert_eq!(
                from_ascii_i64(b"12.5"),
                Err(ConstParseIntegerError::InvalidDigit)
            );
        }
    }

    mod test_u64 {
        use super::*;

        #[test]
        fn test_from_ascii_u64_limits() {
            assert_eq!(from_ascii_u64(b"0"), Ok(0));
            assert_eq!(
                from_ascii_u64(u64::MAX.to_string().as_bytes()),
                Ok(u64::MAX)
            );
            assert_eq!(
                from_ascii_u64(b"18446744073709551616"),
                Err(ConstParseIntegerError::Overflow)
            );
        }

        #[test]
        fn test_from_ascii_u64_negative() {
            assert_eq!(from_ascii_u64(b"-0"), Ok(0));
            assert_eq!(
                from_ascii_u64(b"-1"),
                Err(ConstParseIntegerError::Overflow)
            );
        }
    }
}
