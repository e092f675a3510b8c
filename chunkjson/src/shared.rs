// SPDX-License-Identifier: Apache-2.0

//! Shared types and configuration for the generator and the parser

/// Maximum container nesting depth, selected by the `depth-*` features.
#[cfg(feature = "depth-8")]
pub const MAX_DEPTH_LEVEL: usize = 8;
/// Maximum container nesting depth, selected by the `depth-*` features.
#[cfg(feature = "depth-16")]
pub const MAX_DEPTH_LEVEL: usize = 16;
/// Maximum container nesting depth, selected by the `depth-*` features.
#[cfg(feature = "depth-32")]
pub const MAX_DEPTH_LEVEL: usize = 32;

/// Maximum length in bytes of a decoded name.
pub const MAX_NAME_LENGTH: usize = 100;

/// Maximum length in bytes of recorded number text (and `\u` escape text).
pub const MAX_VALUE_LENGTH: usize = 100;

/// Smallest input buffer a parser accepts. A whole `\uXXXX` escape fits.
pub const MIN_PARSER_BUFFER_SIZE: usize = 6;

/// Kind of a JSON container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Container {
    /// `{ ... }`
    Object,
    /// `[ ... ]`
    Array,
}

impl Container {
    pub(crate) const fn open_byte(self) -> u8 {
        match self {
            Container::Object => b'{',
            Container::Array => b'[',
        }
    }

    pub(crate) const fn close_byte(self) -> u8 {
        match self {
            Container::Object => b'}',
            Container::Array => b']',
        }
    }
}

/// Token types reported by [`Parser::next`](crate::Parser::next).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TokenType {
    /// No complete token is available yet; feed more data and call again.
    #[default]
    Unknown,
    /// The top-level container has been closed; nothing more to report.
    None,
    /// `true` or `false`.
    Boolean,
    /// A string value. Its payload is read with `get_string`.
    String,
    /// A number with a leading minus sign and no fraction or exponent.
    Integer,
    /// A number without sign, fraction or exponent.
    UInteger,
    /// A number with a fraction and/or an exponent.
    Float,
    /// `null`.
    Null,
    /// `{`
    ObjectStart,
    /// `}`
    ObjectEnd,
    /// `[`
    ArrayStart,
    /// `]`
    ArrayEnd,
}

impl TokenType {
    /// True for the token types that carry a value a getter must consume.
    pub fn is_value(self) -> bool {
        matches!(
            self,
            TokenType::Boolean
                | TokenType::String
                | TokenType::Integer
                | TokenType::UInteger
                | TokenType::Float
                | TokenType::Null
        )
    }
}

/// One result of [`Parser::next`](crate::Parser::next).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    /// What was found.
    pub kind: TokenType,
    /// Nesting depth. Container starts report the depth before opening.
    pub level: usize,
}

impl Token {
    pub(crate) const fn new(kind: TokenType, level: usize) -> Self {
        Self { kind, level }
    }
}

/// Result of [`Parser::get_string`](crate::Parser::get_string).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StringChunk {
    /// Bytes written to the destination buffer.
    pub len: usize,
    /// More string data follows; call `get_string` again.
    pub is_partial: bool,
}

/// Snapshot of the parser's buffer positions, see [`Parser::info`](crate::Parser::info).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParserInfo {
    /// Buffer offset of undelivered string data while a string token is current.
    pub current_type_index: Option<usize>,
    /// Buffer offset of the next byte the state machine will examine.
    pub next_type_index: usize,
    /// Bytes not yet examined; whitespace excluded when `compress` was requested.
    pub buffer_left: usize,
}
