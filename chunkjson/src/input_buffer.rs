// SPDX-License-Identifier: Apache-2.0

/// Bytes of a `\uXXX` escape consumed before its final digit. While an escape
/// is open this much of the consumed input is kept on compaction, so the
/// decoded bytes always have room behind the read cursor.
const ESCAPE_SLACK: usize = 5;

/// The parser's input storage.
///
/// Layout while a string value is active:
///
/// ```text
/// 0      string_start   string_end      data_pos        data_size   len
/// |  ... | undelivered  | consumed,     | unexamined    | free      |
///        | decoded text | not needed    | input         |           |
/// ```
///
/// String bytes are decoded in place: plain bytes are copied down to
/// `string_end`, escapes write their decoded form there. Decoding never
/// produces more bytes than it consumes, so `string_end <= data_pos` holds.
pub struct InputBuffer<'b> {
    buffer: &'b mut [u8],
    data_pos: usize,
    data_size: usize,
    string_start: usize,
    string_end: usize,
    string_active: bool,
}

impl<'b> InputBuffer<'b> {
    pub fn new(buffer: &'b mut [u8]) -> Self {
        Self {
            buffer,
            data_pos: 0,
            data_size: 0,
            string_start: 0,
            string_end: 0,
            string_active: false,
        }
    }

    /// Panic-free overlapping copy
    fn safe_copy_within(&mut self, src_start: usize, src_end: usize, dest: usize) {
        let count = src_end.saturating_sub(src_start);
        if count == 0 || src_start == dest {
            return;
        }
        let iterator: &mut dyn Iterator<Item = usize> = if dest <= src_start {
            &mut (0..count)
        } else {
            &mut (0..count).rev()
        };
        for i in iterator {
            if let (Some(src_byte), Some(dest_slot)) = (
                self.buffer.get(src_start.wrapping_add(i)).copied(),
                self.buffer.get_mut(dest.wrapping_add(i)),
            ) {
                *dest_slot = src_byte;
            }
        }
    }

    /// Moves everything still needed to the front, then appends what fits of
    /// `data`. Returns how many bytes of `data` were taken.
    pub fn set_data(&mut self, data: &[u8], escape_open: bool) -> usize {
        self.compact(escape_open);
        let room = self.buffer.len().saturating_sub(self.data_size);
        let count = room.min(data.len());
        if let (Some(dest), Some(src)) = (
            self.buffer.get_mut(self.data_size..self.data_size + count),
            data.get(..count),
        ) {
            dest.copy_from_slice(src);
            self.data_size += count;
        }
        log::trace!(
            "accepted {} of {} bytes, {} buffered",
            count,
            data.len(),
            self.data_size
        );
        count
    }

    fn compact(&mut self, escape_open: bool) {
        if self.string_active {
            let text_len = self.string_end - self.string_start;
            let slack = self.data_pos - self.string_end;
            let keep = if escape_open {
                slack.min(ESCAPE_SLACK)
            } else {
                0
            };
            let tail_start = self.data_pos - keep;
            let tail_len = self.data_size - tail_start;
            self.safe_copy_within(self.string_start, self.string_end, 0);
            self.safe_copy_within(tail_start, self.data_size, text_len);
            self.string_start = 0;
            self.string_end = text_len;
            self.data_pos = text_len + keep;
            self.data_size = text_len + tail_len;
        } else {
            self.safe_copy_within(self.data_pos, self.data_size, 0);
            self.data_size -= self.data_pos;
            self.data_pos = 0;
            self.string_start = 0;
            self.string_end = 0;
        }
    }

    pub fn current_byte(&self) -> Option<u8> {
        if self.data_pos < self.data_size {
            self.buffer.get(self.data_pos).copied()
        } else {
            None
        }
    }

    pub fn advance(&mut self) {
        if self.data_pos < self.data_size {
            self.data_pos += 1;
        }
    }

    pub fn has_unread(&self) -> bool {
        self.data_pos < self.data_size
    }

    pub fn data_pos(&self) -> usize {
        self.data_pos
    }

    /// Unexamined bytes, optionally without whitespace.
    pub fn remaining(&self, skip_whitespace: bool) -> usize {
        let unread = self.buffer.get(self.data_pos..self.data_size).unwrap_or(&[]);
        if skip_whitespace {
            unread
                .iter()
                .filter(|&&b| !matches!(b, b' ' | b'\t' | b'\n' | 0x0b | 0x0c | b'\r'))
                .count()
        } else {
            unread.len()
        }
    }

    pub fn capacity(&self) -> usize {
        self.buffer.len()
    }

    /// Starts a string whose opening quote is the current byte.
    pub fn begin_string(&mut self) {
        self.string_active = true;
        self.string_start = self.data_pos + 1;
        self.string_end = self.string_start;
    }

    /// Keeps the current byte as string content.
    pub fn keep_current_byte(&mut self) {
        if let Some(byte) = self.current_byte() {
            self.push_string_bytes(&[byte]);
        }
    }

    /// Appends decoded string bytes at the write cursor.
    pub fn push_string_bytes(&mut self, bytes: &[u8]) {
        for &byte in bytes {
            if let Some(slot) = self.buffer.get_mut(self.string_end) {
                *slot = byte;
                self.string_end += 1;
            }
        }
    }

    pub fn string_active(&self) -> bool {
        self.string_active
    }

    pub fn string_start(&self) -> usize {
        self.string_start
    }

    /// Decoded bytes not yet handed to the caller.
    pub fn pending_string(&self) -> &[u8] {
        self.buffer
            .get(self.string_start..self.string_end)
            .unwrap_or(&[])
    }

    /// Copies pending string bytes into `dest`, returning the count.
    pub fn take_string(&mut self, dest: &mut [u8]) -> usize {
        let pending = self.pending_string();
        let count = pending.len().min(dest.len());
        if let (Some(dest), Some(src)) = (dest.get_mut(..count), pending.get(..count)) {
            dest.copy_from_slice(src);
        }
        self.string_start += count;
        count
    }

    pub fn discard_string(&mut self) {
        self.string_start = self.string_end;
    }

    pub fn end_string(&mut self) {
        self.string_active = false;
        self.string_start = self.data_pos;
        self.string_end = self.data_pos;
    }

    pub fn reset(&mut self) {
        self.data_pos = 0;
        self.data_size = 0;
        self.string_start = 0;
        self.string_end = 0;
        self.string_active = false;
    }

    pub fn into_inner(self) -> &'b mut [u8] {
        self.buffer
    }
}
