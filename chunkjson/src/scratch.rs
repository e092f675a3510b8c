// SPDX-License-Identifier: Apache-2.0

/// Fixed-capacity byte accumulator for names and number text.
///
/// Appends never truncate: text that does not fit is refused whole and the
/// contents are left as they were.
#[derive(Debug, Clone, Copy)]
pub struct ScratchText<const N: usize> {
    bytes: [u8; N],
    len: usize,
}

/// Returned when an append would exceed the capacity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScratchFull;

impl<const N: usize> Default for ScratchText<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> ScratchText<N> {
    pub const fn new() -> Self {
        Self {
            bytes: [0; N],
            len: 0,
        }
    }

    pub fn push(&mut self, byte: u8) -> Result<(), ScratchFull> {
        self.extend(&[byte])
    }

    pub fn extend(&mut self, data: &[u8]) -> Result<(), ScratchFull> {
        let end = self.len.checked_add(data.len()).ok_or(ScratchFull)?;
        let dest = self.bytes.get_mut(self.len..end).ok_or(ScratchFull)?;
        dest.copy_from_slice(data);
        self.len = end;
        Ok(())
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.bytes.get(..self.len).unwrap_or(&[])
    }

    pub fn clear(&mut self) {
        self.len = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_until_full() {
        let mut text = ScratchText::<3>::new();
        assert!(text.push(b'a').is_ok());
        assert!(text.extend(b"bc").is_ok());
        assert_eq!(text.push(b'd'), Err(ScratchFull));
        assert_eq!(text.as_bytes(), b"abc");
    }

    #[test]
    fn test_oversized_extend_is_refused_whole() {
        let mut text = ScratchText::<4>::new();
        text.extend(b"ab").unwrap();
        assert_eq!(text.extend(b"xyz"), Err(ScratchFull));
        assert_eq!(text.as_bytes(), b"ab");
        text.clear();
        assert_eq!(text.as_bytes(), b"");
    }
}
