// SPDX-License-Identifier: Apache-2.0

//! Helpers shared by the integration tests: an owned event model, a driver
//! that parses a document fed in chunks, and one that writes events back out
//! through a generator.

#![allow(dead_code)]

use chunkjson::{ChunkReader, Container, Error, Generator, Parser, TokenType};

#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    ObjectStart { name: String, level: usize },
    ObjectEnd { level: usize },
    ArrayStart { name: String, level: usize },
    ArrayEnd { level: usize },
    Boolean { name: String, value: bool },
    Integer { name: String, value: i64 },
    UInteger { name: String, value: u64 },
    Float { name: String, text: String },
    String { name: String, value: String },
    Null { name: String },
}

/// Parses `json` through a parser buffer of `buffer_size` bytes, offering at
/// most `chunk_size` bytes at a time and reading strings `dest_size` bytes at
/// a time. Input that ends before the document does is reported as
/// `ParsingError`.
pub fn parse_chunked(
    json: &[u8],
    buffer_size: usize,
    chunk_size: usize,
    dest_size: usize,
) -> Result<Vec<Event>, Error> {
    let mut storage = vec![0u8; buffer_size];
    let mut parser = Parser::new(&mut storage)?;
    let mut reader = ChunkReader::new(json, chunk_size);
    let mut events = Vec::new();

    loop {
        let token = parser.next()?;
        let name = parser.name().to_string();
        let event = match token.kind {
            TokenType::Unknown => {
                if reader.feed(&mut parser)? == 0 && reader.is_done() {
                    return Err(Error::ParsingError);
                }
                continue;
            }
            TokenType::None => return Ok(events),
            TokenType::ObjectStart => Event::ObjectStart {
                name,
                level: token.level,
            },
            TokenType::ObjectEnd => Event::ObjectEnd { level: token.level },
            TokenType::ArrayStart => Event::ArrayStart {
                name,
                level: token.level,
            },
            TokenType::ArrayEnd => Event::ArrayEnd { level: token.level },
            TokenType::Boolean => Event::Boolean {
                name,
                value: parser.get_boolean()?,
            },
            TokenType::Integer => Event::Integer {
                name,
                value: parser.get_int()?,
            },
            TokenType::UInteger => Event::UInteger {
                name,
                value: parser.get_uint()?,
            },
            TokenType::Float => {
                let mut text = [0u8; 128];
                let text = parser.get_float(&mut text)?.to_string();
                Event::Float { name, text }
            }
            TokenType::Null => {
                parser.get_null()?;
                Event::Null { name }
            }
            TokenType::String => {
                let value = read_string(&mut parser, &mut reader, dest_size)?;
                Event::String { name, value }
            }
        };
        events.push(event);
    }
}

/// Drains the current string value, feeding input whenever the parser has
/// nothing left to scan.
pub fn read_string(
    parser: &mut Parser,
    reader: &mut ChunkReader,
    dest_size: usize,
) -> Result<String, Error> {
    let mut bytes = Vec::new();
    let mut dest = vec![0u8; dest_size];
    loop {
        let chunk = parser.get_string(&mut dest)?;
        bytes.extend_from_slice(&dest[..chunk.len]);
        if !chunk.is_partial {
            break;
        }
        if chunk.len == 0
            && parser.info(false).buffer_left == 0
            && reader.feed(parser)? == 0
            && reader.is_done()
        {
            return Err(Error::ParsingError);
        }
    }
    String::from_utf8(bytes).map_err(|_| Error::InvalidUtf8Data)
}

/// Writes `events` through a generator buffer of `buffer_size` bytes and
/// returns the produced text. String values are split into partial appends
/// of `piece` bytes.
pub fn generate(events: &[Event], buffer_size: usize, piece: usize) -> Result<Vec<u8>, Error> {
    let mut storage = vec![0u8; buffer_size];
    let mut generator = Generator::new(&mut storage)?;
    let mut out = Vec::new();

    for event in events {
        match event {
            Event::ObjectStart { name, .. } => {
                retry(&mut generator, &mut out, |g| {
                    g.start_token(Some(name.as_str()), Container::Object)
                })?;
            }
            Event::ArrayStart { name, .. } => {
                retry(&mut generator, &mut out, |g| {
                    g.start_token(Some(name.as_str()), Container::Array)
                })?;
            }
            Event::ObjectEnd { .. } => {
                retry(&mut generator, &mut out, |g| g.end_token(Container::Object))?;
            }
            Event::ArrayEnd { .. } => {
                retry(&mut generator, &mut out, |g| g.end_token(Container::Array))?;
            }
            Event::Boolean { name, value } => {
                add_name(&mut generator, &mut out, name)?;
                retry(&mut generator, &mut out, |g| g.add_boolean(*value))?;
            }
            Event::Integer { name, value } => {
                add_name(&mut generator, &mut out, name)?;
                retry(&mut generator, &mut out, |g| g.add_int(*value))?;
            }
            Event::UInteger { name, value } => {
                add_name(&mut generator, &mut out, name)?;
                retry(&mut generator, &mut out, |g| g.add_uint(*value))?;
            }
            Event::Float { name, text } => {
                add_name(&mut generator, &mut out, name)?;
                retry(&mut generator, &mut out, |g| g.add_float(text))?;
            }
            Event::Null { name } => {
                add_name(&mut generator, &mut out, name)?;
                retry(&mut generator, &mut out, |g| g.add_null())?;
            }
            Event::String { name, value } => {
                add_name(&mut generator, &mut out, name)?;
                for part in value.as_bytes().chunks(piece.max(1)) {
                    retry(&mut generator, &mut out, |g| g.add_string(part, true))?;
                }
                retry(&mut generator, &mut out, |g| g.add_string("", false))?;
            }
        }
    }

    out.extend_from_slice(generator.buffer());
    Ok(out)
}

fn add_name(generator: &mut Generator, out: &mut Vec<u8>, name: &str) -> Result<(), Error> {
    if name.is_empty() {
        return Ok(());
    }
    retry(generator, out, |g| g.add_name(name))
}

/// Repeats `call` until it stops reporting `BufferFull`, draining in between.
fn retry<F>(generator: &mut Generator, out: &mut Vec<u8>, mut call: F) -> Result<(), Error>
where
    F: FnMut(&mut Generator) -> Result<(), Error>,
{
    loop {
        match call(generator) {
            Err(Error::BufferFull) => {
                out.extend_from_slice(generator.buffer());
                generator.clear_buffer();
            }
            result => return result,
        }
    }
}
