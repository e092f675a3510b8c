// SPDX-License-Identifier: Apache-2.0

//! Incremental JSON for fixed-size buffers.
//!
//! [`Generator`] writes JSON into a caller-provided buffer one token at a
//! time. When the buffer fills, the failed call returns
//! [`Error::BufferFull`]; empty the buffer and repeat the same call to
//! continue without losing or duplicating output.
//!
//! [`Parser`] reads JSON fed to it in arbitrary chunks and reports one token
//! per [`Parser::next`] call. Names, numbers, literals and escapes may be
//! split anywhere; string values are delivered in pieces of any size.
//!
//! Neither side allocates. Nesting is bounded by [`MAX_DEPTH_LEVEL`], chosen
//! with the `depth-8`, `depth-16` or `depth-32` feature, or per instance with
//! `with_depth`.

#![cfg_attr(not(test), no_std)]

// Compile-time configuration validation
mod config_check;

mod shared;
pub use shared::{
    Container, ParserInfo, StringChunk, Token, TokenType, MAX_DEPTH_LEVEL, MAX_NAME_LENGTH,
    MAX_VALUE_LENGTH, MIN_PARSER_BUFFER_SIZE,
};

mod error;
pub use error::Error;

mod utf8;
pub use utf8::{encode_wide_char, is_valid as is_valid_utf8, Utf8Validator};

mod int_parser;

mod json_number;

mod scratch;

mod output_buffer;

mod generator;
pub use generator::Generator;

mod tokenizer;

mod escape_processor;

mod input_buffer;

mod stream_parser;
pub use stream_parser::Parser;

mod chunk_reader;
pub use chunk_reader::ChunkReader;
