// SPDX-License-Identifier: Apache-2.0

//! Byte-at-a-time UTF-8 decoding and wide-character encoding.
//!
//! The decoder is a table-driven DFA: each byte is mapped to one of twelve
//! classes, and the class plus the current state select the next state.
//! [`UTF8_ACCEPT`] means a complete code point has been decoded; [`UTF8_REJECT`]
//! is a sink state that no further input can leave.

/// The decoder is between code points.
pub const UTF8_ACCEPT: u8 = 0;
/// An invalid sequence was seen.
pub const UTF8_REJECT: u8 = 12;

/// Byte classes (first 256 entries) followed by the state transitions.
#[rustfmt::skip]
static UTF8_DFA: [u8; 364] = [
    // 0x00..0x7f
    0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0, 0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,
    0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0, 0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,
    0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0, 0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,
    0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0, 0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,
    // 0x80..0xbf
    1,1,1,1,1,1,1,1,1,1,1,1,1,1,1,1, 9,9,9,9,9,9,9,9,9,9,9,9,9,9,9,9,
    7,7,7,7,7,7,7,7,7,7,7,7,7,7,7,7, 7,7,7,7,7,7,7,7,7,7,7,7,7,7,7,7,
    // 0xc0..0xff
    8,8,2,2,2,2,2,2,2,2,2,2,2,2,2,2, 2,2,2,2,2,2,2,2,2,2,2,2,2,2,2,2,
    10,3,3,3,3,3,3,3,3,3,3,3,3,4,3,3, 11,6,6,6,5,8,8,8,8,8,8,8,8,8,8,8,
    // transitions
    0,12,24,36,60,96,84,12,12,12,48,72, 12,12,12,12,12,12,12,12,12,12,12,12,
    12,0,12,12,12,12,12,0,12,0,12,12, 12,24,12,12,12,12,12,24,12,24,12,12,
    12,12,12,12,12,12,12,24,12,12,12,12, 12,24,12,12,12,12,12,12,12,24,12,12,
    12,12,12,12,12,12,12,36,12,36,12,12, 12,36,12,12,12,12,12,36,12,36,12,12,
    12,36,12,12,12,12,12,12,12,12,12,12,
];

/// Feeds one byte to the decoder.
///
/// `codepoint` accumulates the bits of the sequence in progress and holds the
/// decoded value whenever the returned state is [`UTF8_ACCEPT`].
pub fn decode(state: &mut u8, codepoint: &mut u32, byte: u8) -> u8 {
    let class = UTF8_DFA.get(byte as usize).copied().unwrap_or(1);
    *codepoint = if *state != UTF8_ACCEPT {
        (u32::from(byte) & 0x3f) | (*codepoint << 6)
    } else {
        (0xff_u32 >> class) & u32::from(byte)
    };
    let index = 256 + usize::from(*state) + usize::from(class);
    *state = UTF8_DFA.get(index).copied().unwrap_or(UTF8_REJECT);
    *state
}

/// Running UTF-8 validation across any number of chunks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Utf8Validator {
    state: u8,
    codepoint: u32,
}

impl Default for Utf8Validator {
    fn default() -> Self {
        Self::new()
    }
}

impl Utf8Validator {
    pub const fn new() -> Self {
        Self {
            state: UTF8_ACCEPT,
            codepoint: 0,
        }
    }

    /// Validates `bytes` as a continuation of everything fed so far.
    pub fn feed(&mut self, bytes: &[u8]) {
        for &byte in bytes {
            if self.state == UTF8_REJECT {
                return;
            }
            decode(&mut self.state, &mut self.codepoint, byte);
        }
    }

    /// True when everything fed so far forms complete, valid UTF-8.
    pub fn is_accepted(&self) -> bool {
        self.state == UTF8_ACCEPT
    }

    pub fn is_rejected(&self) -> bool {
        self.state == UTF8_REJECT
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

/// Checks a complete byte sequence.
pub fn is_valid(bytes: &[u8]) -> bool {
    let mut validator = Utf8Validator::new();
    validator.feed(bytes);
    validator.is_accepted()
}

/// Encodes a wide character as UTF-8 into `out`, returning the byte count.
///
/// Values are encoded by range alone, so a surrogate produces its 3-byte form
/// (which the decoder rejects). Values past `0x10FFFF` produce nothing.
pub fn encode_wide_char(wide: u32, out: &mut [u8; 4]) -> usize {
    match wide {
        0..=0x7f => {
            out[0] = wide as u8;
            1
        }
        0x80..=0x7ff => {
            out[0] = 0xc0 | (wide >> 6) as u8;
            out[1] = 0x80 | (wide & 0x3f) as u8;
            2
        }
        0x800..=0xffff => {
            out[0] = 0xe0 | (wide >> 12) as u8;
            out[1] = 0x80 | ((wide >> 6) & 0x3f) as u8;
            out[2] = 0x80 | (wide & 0x3f) as u8;
            3
        }
        0x1_0000..=0x10_ffff => {
            out[0] = 0xf0 | (wide >> 18) as u8;
            out[1] = 0x80 | ((wide >> 12) & 0x3f) as u8;
            out[2] = 0x80 | ((wide >> 6) & 0x3f) as u8;
            out[3] = 0x80 | (wide & 0x3f) as u8;
            4
        }
        _ => 0,
    }
}
