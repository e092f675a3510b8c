// SPDX-License-Identifier: Apache-2.0

mod common;

use common::{parse_chunked, Event};

const SIMPLE: &[u8] = br#"{"a":1,"b":[true,false,null]}"#;

const ESCAPED: &[u8] = br#"{"msg": "caf\u00e9 \ud83d\ude00 \"q\"\tend", "n\u00e9": [-12, 0.5e-3, "", {}, "a fairly long string value that outgrows small buffers"]}"#;

fn simple_events() -> Vec<Event> {
    vec![
        Event::ObjectStart {
            name: "".into(),
            level: 0,
        },
        Event::UInteger {
            name: "a".into(),
            value: 1,
        },
        Event::ArrayStart {
            name: "b".into(),
            level: 1,
        },
        Event::Boolean {
            name: "".into(),
            value: true,
        },
        Event::Boolean {
            name: "".into(),
            value: false,
        },
        Event::Null { name: "".into() },
        Event::ArrayEnd { level: 1 },
        Event::ObjectEnd { level: 0 },
    ]
}

fn escaped_events() -> Vec<Event> {
    vec![
        Event::ObjectStart {
            name: "".into(),
            level: 0,
        },
        Event::String {
            name: "msg".into(),
            value: "caf\u{e9} \u{1F600} \"q\"\tend".into(),
        },
        Event::ArrayStart {
            name: "n\u{e9}".into(),
            level: 1,
        },
        Event::Integer {
            name: "".into(),
            value: -12,
        },
        Event::Float {
            name: "".into(),
            text: "0.5e-3".into(),
        },
        Event::String {
            name: "".into(),
            value: "".into(),
        },
        Event::ObjectStart {
            name: "".into(),
            level: 2,
        },
        Event::ObjectEnd { level: 2 },
        Event::String {
            name: "".into(),
            value: "a fairly long string value that outgrows small buffers".into(),
        },
        Event::ArrayEnd { level: 1 },
        Event::ObjectEnd { level: 0 },
    ]
}

#[test_log::test]
fn test_single_chunk_reference() {
    assert_eq!(parse_chunked(SIMPLE, 64, usize::MAX, 64), Ok(simple_events()));
    assert_eq!(parse_chunked(ESCAPED, 256, usize::MAX, 256), Ok(escaped_events()));
}

/// Generates one test per (buffer size, chunk size, string destination size).
macro_rules! resumability_tests {
    ($(($buffer:literal, $chunk:literal, $dest:literal)),* $(,)?) => {
        $(
            paste::paste! {
                #[test_log::test]
                fn [<test_simple_buffer_ $buffer _chunk_ $chunk _dest_ $dest>]() {
                    assert_eq!(
                        parse_chunked(SIMPLE, $buffer, $chunk, $dest),
                        Ok(simple_events())
                    );
                }

                #[test_log::test]
                fn [<test_escaped_buffer_ $buffer _chunk_ $chunk _dest_ $dest>]() {
                    assert_eq!(
                        parse_chunked(ESCAPED, $buffer, $chunk, $dest),
                        Ok(escaped_events())
                    );
                }
            }
        )*
    };
}

resumability_tests!(
    (6, 1, 1),
    (6, 2, 3),
    (6, 3, 1),
    (6, 6, 4),
    (7, 5, 2),
    (8, 1, 8),
    (8, 3, 3),
    (8, 7, 1),
    (12, 4, 5),
    (16, 16, 16),
    (32, 1, 2),
    (32, 9, 64),
    (64, 64, 7),
);

#[test_log::test]
fn test_every_chunk_size_matches() {
    for chunk in 1..=SIMPLE.len() {
        assert_eq!(
            parse_chunked(SIMPLE, 6, chunk, 4),
            Ok(simple_events()),
            "chunk size {chunk}"
        );
    }
    for chunk in 1..=ESCAPED.len() {
        for buffer in [6, 10, 23] {
            assert_eq!(
                parse_chunked(ESCAPED, buffer, chunk, 3),
                Ok(escaped_events()),
                "buffer {buffer}, chunk size {chunk}"
            );
        }
    }
}
