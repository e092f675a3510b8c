// SPDX-License-Identifier: Apache-2.0

use crate::utf8::encode_wide_char;

/// Pure helpers for resolving backslash escapes.
pub struct EscapeProcessor;

impl EscapeProcessor {
    /// Byte produced by a two-character escape such as `\n`.
    ///
    /// Only `b f n r t` are translated; the table admits `\\`, `\/` and `\"`,
    /// which stand for themselves.
    pub fn process_simple_escape(escape_char: u8) -> u8 {
        match escape_char {
            b'b' => 0x08,
            b'f' => 0x0c,
            b'n' => b'\n',
            b'r' => b'\r',
            b't' => b'\t',
            other => other,
        }
    }

    /// Numeric value of a hex digit, either case.
    pub fn hex_digit(byte: u8) -> Option<u32> {
        match byte {
            b'0'..=b'9' => Some(u32::from(byte - b'0')),
            b'a'..=b'f' => Some(u32::from(byte - b'a') + 10),
            b'A'..=b'F' => Some(u32::from(byte - b'A') + 10),
            _ => None,
        }
    }

    /// Code unit spelled by the four hex digits of a `\u` escape.
    pub fn hex_code_unit(digits: &[u8]) -> Option<u32> {
        if digits.len() != 4 {
            return None;
        }
        digits
            .iter()
            .try_fold(0u32, |acc, &b| Some((acc << 4) | Self::hex_digit(b)?))
    }

    /// Check if a code unit is a high surrogate (0xD800-0xDBFF)
    pub fn is_high_surrogate(unit: u32) -> bool {
        (0xD800..=0xDBFF).contains(&unit)
    }

    /// Check if a code unit is a low surrogate (0xDC00-0xDFFF)
    pub fn is_low_surrogate(unit: u32) -> bool {
        (0xDC00..=0xDFFF).contains(&unit)
    }

    pub fn combine_surrogate_pair(high: u32, low: u32) -> u32 {
        0x10000 + ((high & 0x3FF) << 10) + (low & 0x3FF)
    }
}

/// What a completed `\uXXXX` escape contributes to the text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnicodeOutcome {
    /// Bytes to append.
    Bytes { bytes: [u8; 4], len: usize },
    /// A high surrogate was stored; its partner must be the next escape.
    AwaitingLowSurrogate,
}

impl UnicodeOutcome {
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            UnicodeOutcome::Bytes { bytes, len } => bytes.get(..*len).unwrap_or(&[]),
            UnicodeOutcome::AwaitingLowSurrogate => &[],
        }
    }
}

/// Combines UTF-16 surrogate pairs across consecutive `\u` escapes.
///
/// A high surrogate produces no bytes until the low surrogate arrives. When
/// anything else follows, the tracker records the text as broken so that it
/// fails validation once complete. A lone low surrogate encodes to bytes the
/// UTF-8 validator rejects.
#[derive(Debug, Default, Clone, Copy)]
pub struct SurrogateTracker {
    pending_high: Option<u32>,
    broken: bool,
}

impl SurrogateTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolves one code unit.
    pub fn resolve(&mut self, unit: u32) -> UnicodeOutcome {
        let codepoint = match self.pending_high.take() {
            Some(high) if EscapeProcessor::is_low_surrogate(unit) => {
                EscapeProcessor::combine_surrogate_pair(high, unit)
            }
            dropped => {
                self.broken |= dropped.is_some();
                if EscapeProcessor::is_high_surrogate(unit) {
                    self.pending_high = Some(unit);
                    return UnicodeOutcome::AwaitingLowSurrogate;
                }
                unit
            }
        };
        let mut bytes = [0u8; 4];
        let len = encode_wide_char(codepoint, &mut bytes);
        UnicodeOutcome::Bytes { bytes, len }
    }

    /// Text other than a `\u` escape follows.
    pub fn interrupt(&mut self) {
        self.broken |= self.pending_high.take().is_some();
    }

    /// A high surrogate was left without its partner.
    pub fn is_broken(&self) -> bool {
        self.broken
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
