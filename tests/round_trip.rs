//! Round trip tests over the verified samples
//!
//! Canonical text must serialize back byte for byte, and normalization must be
//! idempotent for any sample, blank lines included.

use cfml::cfml::testing::{assert_doc, ymd, CfmlSources, AVAILABLE_SAMPLES, CANONICAL_SAMPLES};
use cfml::{parse, serialize, Document, ToCfmlString};
use rstest::rstest;

#[rstest]
#[case("000-single-block.cfml")]
#[case("010-multiple-blocks.cfml")]
#[case("020-escapes.cfml")]
fn test_canonical_sample_round_trips(#[case] sample: &str) {
    assert!(CANONICAL_SAMPLES.contains(&sample));
    let source = CfmlSources::get_string(sample).unwrap();
    let doc = parse(&source).unwrap();
    assert_eq!(serialize(&doc), source);
}

#[test]
fn test_normalization_is_idempotent() {
    for sample in AVAILABLE_SAMPLES {
        let once = serialize(&CfmlSources::parse(sample).unwrap());
        let twice = serialize(&parse(&once).unwrap());
        assert_eq!(once, twice, "{sample}");
    }
}

#[test]
fn test_blank_lines_are_dropped() {
    let doc = CfmlSources::parse("030-blank-lines.cfml").unwrap();
    insta::assert_snapshot!(doc.to_cfml_string(), @r###"
    #DATE: 2024-01-01
    > Alice -> Bob: spaced out
    > Bob: reply
    #DATE: 2024-01-02
    > Carol:
    "###);
}

#[test]
fn test_escapes_decode_to_literal_text() {
    let doc = CfmlSources::parse("020-escapes.cfml").unwrap();
    assert_doc(&doc).block_count(1).block(0, |block| {
        block
            .date(ymd(2024, 3, 15))
            .message(0, |m| {
                m.body("the arrow -> is escaped: see?");
            })
            .message(1, |m| {
                m.sender("Dev: Ops")
                    .receiver(Some("#general"))
                    .body("line one\nline two");
            })
            .message(2, |m| {
                m.receiver(None).body(" leading and trailing ");
            })
            .message(3, |m| {
                m.sender("C\\D").receiver(Some("E>F")).body("path C\\temp");
            });
    });
}

#[test]
fn test_blocks_keep_source_order() {
    let doc = CfmlSources::parse("010-multiple-blocks.cfml").unwrap();
    assert_doc(&doc)
        .dates(&[ymd(2024, 2, 10), ymd(2024, 1, 5), ymd(2024, 3, 1)])
        .block(0, |block| {
            block.message(1, |m| {
                m.sender("Bob").receiver(None).body("");
            });
        });
}

#[test]
fn test_delimiter_sequence_in_body_survives() {
    let mut doc = Document::new();
    let body = "#DATE: 2024-01-01\n> Mallory -> Bob: injected";
    doc.add_message(ymd(2024, 1, 1), "Alice", Some("Bob"), body)
        .unwrap();

    let text = serialize(&doc);
    assert_eq!(text.lines().count(), 2);
    let reparsed = parse(&text).unwrap();
    assert_eq!(reparsed, doc);
    assert_eq!(serialize(&reparsed), text);
}

#[rstest]
#[case::reserved_chars("\\ # > : all of them")]
#[case::arrow_in_sender("a -> b")]
#[case::separator_at_end("ends with:")]
#[case::only_space(" ")]
#[case::tabs("\tindented\t")]
#[case::nbsp("\u{a0}nbsp\u{a0}")]
#[case::carriage_return("a\r\nb")]
#[case::escape_lookalikes("\\n is not a newline, \\s is not a space")]
fn test_field_values_round_trip(#[case] value: &str) {
    let mut doc = Document::new();
    let date = ymd(2024, 6, 1);
    doc.add_message(date, value, Some(value), value).unwrap();

    let reparsed = parse(&serialize(&doc)).unwrap();
    let message = &reparsed.messages(date).unwrap()[0];
    assert_eq!(message.sender(), value);
    assert_eq!(message.receiver(), Some(value));
    assert_eq!(message.body(), value);
}

#[test]
fn test_date_marker_without_messages_is_normalized_away() {
    let doc = parse("#DATE: 2024-01-01\n#DATE: 2024-01-02\n> a: b").unwrap();
    assert_eq!(serialize(&doc), "#DATE: 2024-01-02\n> a: b");
    assert_eq!(serialize(&parse("#DATE: 2024-01-01").unwrap()), "");
}
