// SPDX-License-Identifier: Apache-2.0

//! Incremental JSON text generation into a fixed-capacity buffer.

use crate::json_number::{is_valid_float, NumberText};
use crate::output_buffer::OutputBuffer;
use crate::shared::{Container, MAX_DEPTH_LEVEL};
use crate::Error;

/// Builds compact JSON text through a sequence of typed append calls.
///
/// Every append either completes or fails with [`Error::BufferFull`] after
/// writing as much as fits. In the latter case drain the buffer (read
/// [`buffer`](Self::buffer), transmit it, [`clear_buffer`](Self::clear_buffer))
/// and repeat the identical call. Commas between siblings are inserted
/// automatically; names and string payloads are written verbatim.
///
/// ```rust
/// use chunkjson::{Container, Generator};
///
/// let mut storage = [0u8; 64];
/// let mut generator = Generator::new(&mut storage).unwrap();
/// generator.start_token(None, Container::Object).unwrap();
/// generator.add_name("id").unwrap();
/// generator.add_uint(7).unwrap();
/// generator.start_token(Some("tags"), Container::Array).unwrap();
/// generator.add_string("a", false).unwrap();
/// generator.add_null().unwrap();
/// generator.end_token(Container::Array).unwrap();
/// generator.end_token(Container::Object).unwrap();
/// assert_eq!(generator.buffer(), br#"{"id":7,"tags":["a",null]}"#);
/// ```
pub struct Generator<'b, const DEPTH: usize = MAX_DEPTH_LEVEL> {
    out: OutputBuffer<'b>,
    stack_level: usize,
    /// Per level: an element has been written, the next sibling needs a comma.
    should_prepend_comma: [bool; DEPTH],
    /// Kind of each open container, for checking `end_token`.
    open: [Container; DEPTH],
    name_is_present: bool,
    is_partial_string: bool,
}

impl<'b> Generator<'b> {
    /// Creates a generator writing into `buffer`, nesting up to [`MAX_DEPTH_LEVEL`].
    pub fn new(buffer: &'b mut [u8]) -> Result<Self, Error> {
        Self::with_depth(buffer)
    }
}

impl<'b, const DEPTH: usize> Generator<'b, DEPTH> {
    const DEPTH_IS_USABLE: () = assert!(DEPTH >= 2, "DEPTH must allow at least one container");

    /// Creates a generator with a custom maximum depth.
    pub fn with_depth(buffer: &'b mut [u8]) -> Result<Self, Error> {
        #[allow(clippy::let_unit_value)]
        let () = Self::DEPTH_IS_USABLE;
        if buffer.is_empty() {
            return Err(Error::InvalidSize);
        }
        Ok(Self {
            out: OutputBuffer::new(buffer),
            stack_level: 0,
            should_prepend_comma: [false; DEPTH],
            open: [Container::Object; DEPTH],
            name_is_present: false,
            is_partial_string: false,
        })
    }

    /// Opens an object or array, optionally as the value of `name`.
    pub fn start_token(&mut self, name: Option<&str>, kind: Container) -> Result<(), Error> {
        self.reject_inside_string()?;
        if self.stack_level >= DEPTH - 1 {
            log::debug!("start_token at level {}: depth exceeded", self.stack_level);
            return Err(Error::DepthExceeded);
        }

        let name = name.filter(|n| !n.is_empty());
        let mut prefix = [0u8; 2];
        let mut prefix_len = 0;
        if self.comma_owed() {
            prefix[prefix_len] = b',';
            prefix_len += 1;
        }
        let mut suffix = [0u8; 3];
        let mut suffix_len = 0;
        if name.is_some() {
            prefix[prefix_len] = b'"';
            prefix_len += 1;
            suffix[..2].copy_from_slice(b"\":");
            suffix_len = 2;
        }
        suffix[suffix_len] = kind.open_byte();
        suffix_len += 1;

        self.out.append(
            &prefix[..prefix_len],
            name.map(str::as_bytes).unwrap_or_default(),
            &suffix[..suffix_len],
        )?;

        self.set_comma(self.stack_level, true);
        self.name_is_present = false;
        if let Some(slot) = self.open.get_mut(self.stack_level) {
            *slot = kind;
        }
        self.stack_level += 1;
        self.set_comma(self.stack_level, false);
        log::trace!("opened {:?}, level now {}", kind, self.stack_level);
        Ok(())
    }

    /// Closes the innermost container, which must be of kind `kind`.
    pub fn end_token(&mut self, kind: Container) -> Result<(), Error> {
        self.reject_inside_string()?;
        let innermost = self
            .stack_level
            .checked_sub(1)
            .and_then(|level| self.open.get(level).copied());
        if innermost != Some(kind) {
            log::debug!("end_token {:?} does not match {:?}", kind, innermost);
            return Err(Error::ContainerMismatch);
        }

        self.out.append(b"", &[kind.close_byte()], b"")?;

        self.set_comma(self.stack_level, false);
        self.stack_level -= 1;
        self.name_is_present = false;
        log::trace!("closed {:?}, level now {}", kind, self.stack_level);
        Ok(())
    }

    /// Writes `"name":`, preceded by a comma when a sibling came before.
    pub fn add_name(&mut self, name: &str) -> Result<(), Error> {
        self.reject_inside_string()?;
        if name.is_empty() {
            return Err(Error::InvalidPointer);
        }
        let prefix: &[u8] = if self.comma_at(self.stack_level) {
            b",\""
        } else {
            b"\""
        };
        self.out.append(prefix, name.as_bytes(), b"\":")?;
        self.set_comma(self.stack_level, true);
        self.name_is_present = true;
        Ok(())
    }

    /// Writes a string value, possibly in pieces.
    ///
    /// With `partial` set the closing quote is withheld and later calls append
    /// raw payload; the first call without `partial` closes the string.
    pub fn add_string(&mut self, value: impl AsRef<[u8]>, partial: bool) -> Result<(), Error> {
        let value = value.as_ref();
        let comma_owed = self.comma_owed();
        let prefix: &[u8] = match (self.is_partial_string, comma_owed) {
            (true, _) => b"",
            (false, true) => b",\"",
            (false, false) => b"\"",
        };
        let suffix: &[u8] = if partial { b"" } else { b"\"" };

        self.out.append(prefix, value, suffix)?;

        if partial {
            self.is_partial_string = true;
        } else {
            self.is_partial_string = false;
            self.value_written();
        }
        Ok(())
    }

    pub fn add_boolean(&mut self, value: bool) -> Result<(), Error> {
        let text: &[u8] = if value { b"true" } else { b"false" };
        self.add_scalar(text)
    }

    pub fn add_int(&mut self, value: i64) -> Result<(), Error> {
        self.add_scalar(NumberText::from_i64(value).as_bytes())
    }

    pub fn add_uint(&mut self, value: u64) -> Result<(), Error> {
        self.add_scalar(NumberText::from_u64(value).as_bytes())
    }

    /// Writes float text such as `-1.5e10`. A fractional part is mandatory.
    pub fn add_float(&mut self, value: &str) -> Result<(), Error> {
        if !is_valid_float(value.as_bytes()) {
            log::debug!("rejected float text {value:?}");
            return Err(Error::InvalidParameter);
        }
        self.add_scalar(value.as_bytes())
    }

    pub fn add_null(&mut self) -> Result<(), Error> {
        self.add_scalar(b"null")
    }

    /// The text generated since the last [`clear_buffer`](Self::clear_buffer).
    pub fn buffer(&self) -> &[u8] {
        self.out.as_bytes()
    }

    /// Empties the buffer. Nesting, comma and partial-write state are kept.
    pub fn clear_buffer(&mut self) {
        self.out.clear();
    }

    pub fn stack_level(&self) -> usize {
        self.stack_level
    }

    pub fn capacity(&self) -> usize {
        self.out.capacity()
    }

    pub fn is_partial_string(&self) -> bool {
        self.is_partial_string
    }

    /// Releases the caller's storage.
    pub fn into_inner(self) -> &'b mut [u8] {
        self.out.into_inner()
    }

    fn add_scalar(&mut self, text: &[u8]) -> Result<(), Error> {
        self.reject_inside_string()?;
        let prefix: &[u8] = if self.comma_owed() { b"," } else { b"" };
        self.out.append(prefix, text, b"")?;
        self.value_written();
        Ok(())
    }

    fn value_written(&mut self) {
        self.set_comma(self.stack_level, true);
        self.name_is_present = false;
    }

    fn reject_inside_string(&self) -> Result<(), Error> {
        if self.is_partial_string {
            log::debug!("string value still open");
            return Err(Error::InvalidParameter);
        }
        Ok(())
    }

    fn comma_owed(&self) -> bool {
        self.comma_at(self.stack_level) && !self.name_is_present
    }

    fn comma_at(&self, level: usize) -> bool {
        self.should_prepend_comma.get(level).copied().unwrap_or(false)
    }

    fn set_comma(&mut self, level: usize, value: bool) {
        if let Some(flag) = self.should_prepend_comma.get_mut(level) {
            *flag = value;
        }
    }
}
