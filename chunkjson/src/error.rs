// SPDX-License-Identifier: Apache-2.0

/// Errors reported by the generator and the parser.
///
/// Capacity errors (`BufferFull`, the length limits, `DepthExceeded`) leave
/// the handle consistent and can be retried once room is made. Structural and
/// encoding errors end the current document; call `reset` before reusing a
/// parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The generator's output buffer could not hold the whole append.
    BufferFull,
    /// Container nesting exceeded the configured maximum depth.
    DepthExceeded,
    /// The input is not valid JSON at the current position.
    ParsingError,
    /// A decoded name is longer than `MAX_NAME_LENGTH`.
    NameLengthExceeded,
    /// A getter was called that does not match the current token.
    UnexpectedType,
    /// Number text exceeded `MAX_VALUE_LENGTH`, or a float destination was too small.
    FloatLengthExceeded,
    /// The name attached to a token is not valid UTF-8.
    InvalidUtf8Name,
    /// A completed string value is not valid UTF-8.
    InvalidUtf8Data,
    /// `end_token` does not match the innermost open container.
    ContainerMismatch,
    /// Integer text does not fit the requested integer type.
    NumericOverflow,
    /// Float text could not be converted.
    InvalidNumber,
    /// A buffer is empty or below the required minimum size.
    InvalidSize,
    /// A required input is missing or empty.
    InvalidPointer,
    /// An argument has an invalid value.
    InvalidParameter,
}

impl Error {
    /// Numeric status code. Each condition has its own value.
    pub const fn code(&self) -> i32 {
        match self {
            Error::BufferFull => -3000,
            Error::DepthExceeded => -3001,
            Error::ParsingError => -3002,
            Error::NameLengthExceeded => -3003,
            Error::UnexpectedType => -3004,
            Error::FloatLengthExceeded => -3005,
            Error::InvalidUtf8Name => -3006,
            Error::InvalidUtf8Data => -3007,
            Error::ContainerMismatch => -3008,
            Error::NumericOverflow => -3009,
            Error::InvalidNumber => -3010,
            Error::InvalidSize => -3011,
            Error::InvalidPointer => -3012,
            Error::InvalidParameter => -3013,
        }
    }

    /// True for errors that are cleared by making room and retrying.
    pub const fn is_capacity(&self) -> bool {
        matches!(
            self,
            Error::BufferFull
                | Error::DepthExceeded
                | Error::NameLengthExceeded
                | Error::FloatLengthExceeded
        )
    }
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let text = match self {
            Error::BufferFull => "output buffer full",
            Error::DepthExceeded => "maximum nesting depth exceeded",
            Error::ParsingError => "invalid JSON",
            Error::NameLengthExceeded => "name too long",
            Error::UnexpectedType => "unexpected token type",
            Error::FloatLengthExceeded => "number text too long",
            Error::InvalidUtf8Name => "name is not valid UTF-8",
            Error::InvalidUtf8Data => "string is not valid UTF-8",
            Error::ContainerMismatch => "closing token does not match open container",
            Error::NumericOverflow => "numeric overflow",
            Error::InvalidNumber => "invalid number",
            Error::InvalidSize => "invalid buffer size",
            Error::InvalidPointer => "missing input",
            Error::InvalidParameter => "invalid parameter",
        };
        write!(f, "{text} ({})", self.code())
    }
}

impl From<crate::int_parser::ConstParseIntegerError> for Error {
    fn from(err: crate::int_parser::ConstParseIntegerError) -> Self {
        match err {
            crate::int_parser::ConstParseIntegerError::Overflow => Error::NumericOverflow,
            _ => Error::InvalidNumber,
        }
    }
}
