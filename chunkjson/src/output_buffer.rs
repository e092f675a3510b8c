// SPDX-License-Identifier: Apache-2.0

use crate::Error;

/// Progress of an append that did not fit the output buffer.
///
/// Each counter records how many bytes of one segment have already been
/// flushed. All three return to zero once a write completes.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PendingWrite {
    pub prefix_done: usize,
    pub payload_done: usize,
    pub suffix_done: usize,
}

impl PendingWrite {
    pub fn is_idle(&self) -> bool {
        *self == Self::default()
    }
}

/// Bounded output storage with resumable three-segment appends.
pub struct OutputBuffer<'b> {
    buffer: &'b mut [u8],
    pos: usize,
    pending: PendingWrite,
}

impl<'b> OutputBuffer<'b> {
    pub fn new(buffer: &'b mut [u8]) -> Self {
        Self {
            buffer,
            pos: 0,
            pending: PendingWrite::default(),
        }
    }

    /// Writes `prefix`, `payload` and `suffix` in order, as far as they fit.
    ///
    /// On `BufferFull` the progress is kept, and the same call must be
    /// repeated once the buffer has been drained. Only a call that returns
    /// `Ok` has written all three segments.
    pub fn append(&mut self, prefix: &[u8], payload: &[u8], suffix: &[u8]) -> Result<(), Error> {
        let resuming = !self.pending.is_idle();
        let mut pending = self.pending;

        let complete = self.flush_segment(prefix, &mut pending.prefix_done)
            && self.flush_segment(payload, &mut pending.payload_done)
            && self.flush_segment(suffix, &mut pending.suffix_done);

        if complete {
            if resuming {
                log::trace!("resumed append completed at {}", self.pos);
            }
            self.pending = PendingWrite::default();
            Ok(())
        } else {
            log::trace!("output buffer full: {:?}", pending);
            self.pending = pending;
            Err(Error::BufferFull)
        }
    }

    /// Copies what fits of `segment[*done..]`; true when the segment is complete.
    fn flush_segment(&mut self, segment: &[u8], done: &mut usize) -> bool {
        let remaining = segment.get(*done..).unwrap_or(&[]);
        let room = self.buffer.len().saturating_sub(self.pos);
        let count = remaining.len().min(room);
        if let (Some(dest), Some(src)) = (
            self.buffer.get_mut(self.pos..self.pos + count),
            remaining.get(..count),
        ) {
            dest.copy_from_slice(src);
            self.pos += count;
            *done += count;
        }
        count == remaining.len()
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.buffer.get(..self.pos).unwrap_or(&[])
    }

    pub fn capacity(&self) -> usize {
        self.buffer.len()
    }

    #[cfg(test)]
    pub fn pending(&self) -> PendingWrite {
        self.pending
    }

    /// Drops the written text. A pending write keeps its progress.
    pub fn clear(&mut self) {
        self.pos = 0;
    }

    pub fn into_inner(self) -> &'b mut [u8] {
        self.buffer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    #[test]
    fn test_append_fits() {
        let mut storage = [0u8; 16];
        let mut out = OutputBuffer::new(&mut storage);
        out.append(b",\"", b"name", b"\":").unwrap();
        assert_eq!(out.as_bytes(), b",\"name\":");
        assert!(out.pending().is_idle());
    }

    #[test]
    fn test_partial_segment_resumes() {
        let mut storage = [0u8; 4];
        let mut out = OutputBuffer::new(&mut storage);
        assert_eq!(out.append(b",\"", b"name", b"\":"), Err(Error::BufferFull));
        assert_eq!(out.as_bytes(), b",\"na");
        assert_eq!(
            out.pending(),
            PendingWrite {
                prefix_done: 2,
                payload_done: 2,
                suffix_done: 0
            }
        );

        out.clear();
        assert_eq!(out.append(b",\"", b"name", b"\":"), Ok(()));
        assert_eq!(out.as_bytes(), b"me\":");
        assert!(out.pending().is_idle());
    }

    #[test]
    fn test_exact_fit_then_full() {
        let mut storage = [0u8; 3];
        let mut out = OutputBuffer::new(&mut storage);
        out.append(b"", b"abc", b"").unwrap();
        assert_eq!(out.append(b"", b"d", b""), Err(Error::BufferFull));
        assert_eq!(out.as_bytes(), b"abc");
        assert_eq!(out.pending(), PendingWrite::default());
    }
}
