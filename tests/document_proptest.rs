//! Property-based tests for the serializer and parser
//!
//! Documents are built through the API from arbitrary field values, so every
//! reserved character, control character and whitespace placement gets exercised.

use cfml::cfml::formats::Serializer;
use cfml::cfml::grammar::{Dialect, Grammar};
use cfml::cfml::parsing::Parser;
use cfml::{parse, serialize, Document};
use chrono::NaiveDate;
use proptest::prelude::*;

fn field_char() -> impl Strategy<Value = char> {
    prop_oneof![
        4 => proptest::char::range('a', 'z'),
        2 => Just(' '),
        1 => prop::sample::select(vec!['\\', '#', '>', ':', '-', '\n', '\r', '\t', '\u{a0}', '|', '~', '@']),
        1 => any::<char>(),
    ]
}

fn field(min: usize) -> impl Strategy<Value = String> {
    prop::collection::vec(field_char(), min..12).prop_map(|chars| chars.into_iter().collect())
}

fn message() -> impl Strategy<Value = (String, Option<String>, String)> {
    (field(1), prop::option::of(field(1)), field(0))
}

fn date() -> impl Strategy<Value = NaiveDate> {
    (2000i32..2030, 1u32..=12, 1u32..=28)
        .prop_map(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default())
}

fn document() -> impl Strategy<Value = Document> {
    prop::collection::vec((date(), message()), 0..20).prop_map(|entries| {
        let mut doc = Document::new();
        for (date, (sender, receiver, body)) in entries {
            doc.add_message(date, &sender, receiver.as_deref(), &body)
                .unwrap();
        }
        doc
    })
}

/// Inject blank and whitespace-only lines and indentation into canonical text
fn with_blank_lines(text: &str, pattern: &[u8]) -> String {
    let mut out = Vec::new();
    for (i, line) in text.lines().enumerate() {
        match pattern.get(i % pattern.len().max(1)).copied().unwrap_or(0) % 4 {
            0 => out.push(line.to_string()),
            1 => {
                out.push(String::new());
                out.push(line.to_string());
            }
            2 => out.push(format!("  {line}\t")),
            _ => {
                out.push(line.to_string());
                out.push(" \t ".to_string());
            }
        }
    }
    out.join("\n")
}

proptest! {
    #[test]
    fn api_documents_survive_serialize_then_parse(doc in document()) {
        let text = serialize(&doc);
        let reparsed = parse(&text).unwrap();
        prop_assert_eq!(&reparsed, &doc);
        prop_assert_eq!(serialize(&reparsed), text);
    }

    #[test]
    fn serialized_text_has_one_line_per_node(doc in document()) {
        let text = serialize(&doc);
        prop_assert_eq!(text.lines().count(), doc.len() + doc.message_count());
        prop_assert!(!text.ends_with('\n'));
        prop_assert!(text.lines().all(|line| line.trim() == line && !line.is_empty()));
    }

    #[test]
    fn normalization_is_idempotent(doc in document(), pattern in prop::collection::vec(any::<u8>(), 1..8)) {
        let noisy = with_blank_lines(&serialize(&doc), &pattern);
        let once = serialize(&parse(&noisy).unwrap());
        let twice = serialize(&parse(&once).unwrap());
        prop_assert_eq!(&once, &twice);
        prop_assert_eq!(once, serialize(&doc));
    }

    #[test]
    fn parser_never_panics(source in "(#DATE: 2024-0[1-3]-0[1-9]|> [a-c\\\\:#> -]{0,8}|[ a-z]{0,4}|)(\n(#DATE: 2024-0[1-3]-0[1-9]|> [a-c\\\\:#> -]{0,8}|[ a-z]{0,4}|)){0,10}") {
        let _ = parse(&source);
    }

    #[test]
    fn custom_dialect_round_trips(doc in document()) {
        let grammar = Grammar::new(Dialect {
            date_marker: "@day".to_string(),
            message_marker: '-',
            separator: '|',
            escape: '~',
            date_format: "%d.%m.%Y".to_string(),
            ..Dialect::default()
        }).unwrap();
        let text = Serializer::new(&grammar).serialize(&doc);
        let reparsed = Parser::new(&grammar).parse(&text).unwrap();
        prop_assert_eq!(reparsed, doc);
    }
}
