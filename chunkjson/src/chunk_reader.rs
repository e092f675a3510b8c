// SPDX-License-Identifier: Apache-2.0

//! A convenience feeder for in-memory input.
//!
//! [`ChunkReader`] hands a byte slice to a [`Parser`] in pieces of at most
//! `chunk_size` bytes, keeping track of how much the parser accepted. It is
//! handy for tests and for simulating packet-sized input.
//!
//! ```rust
//! use chunkjson::{ChunkReader, Parser, TokenType};
//!
//! let json = br#"{"temp": 21}"#;
//! let mut storage = [0u8; 16];
//! let mut parser = Parser::new(&mut storage).unwrap();
//! let mut reader = ChunkReader::new(json, 3);
//!
//! let mut seen = 0;
//! loop {
//!     let token = parser.next().unwrap();
//!     match token.kind {
//!         TokenType::Unknown => {
//!             reader.feed(&mut parser).unwrap();
//!         }
//!         TokenType::None => break,
//!         TokenType::UInteger => {
//!             assert_eq!(parser.get_uint().unwrap(), 21);
//!             seen += 1;
//!         }
//!         _ => {}
//!     }
//! }
//! assert_eq!(seen, 1);
//! ```

use crate::{Error, Parser};

/// Feeds a byte slice to a parser, optionally in fixed-size chunks.
#[derive(Debug)]
pub struct ChunkReader<'a> {
    data: &'a [u8],
    pos: usize,
    chunk_size: usize,
}

impl<'a> ChunkReader<'a> {
    /// Offers at most `chunk_size` bytes per [`feed`](Self::feed) call
    /// (minimum 1).
    pub fn new(data: &'a [u8], chunk_size: usize) -> Self {
        Self {
            data,
            pos: 0,
            chunk_size: chunk_size.max(1),
        }
    }

    /// Offers as much of `data` as the parser will take on each call.
    pub fn full_slice(data: &'a [u8]) -> Self {
        Self {
            data,
            pos: 0,
            chunk_size: usize::MAX,
        }
    }

    /// Offers the next chunk to `parser`. Returns how many bytes it took,
    /// zero when everything has been fed already.
    pub fn feed<const DEPTH: usize>(&mut self, parser: &mut Parser<'_, DEPTH>) -> Result<usize, Error> {
        let rest = self.data.get(self.pos..).unwrap_or(&[]);
        let chunk = rest.get(..self.chunk_size.min(rest.len())).unwrap_or(rest);
        if chunk.is_empty() {
            return Ok(0);
        }
        let accepted = parser.set_data(chunk)?;
        self.pos += accepted;
        Ok(accepted)
    }

    /// Bytes not yet accepted by the parser.
    pub fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.pos)
    }

    pub fn is_done(&self) -> bool {
        self.remaining() == 0
    }
}
