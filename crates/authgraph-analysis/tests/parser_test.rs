//! Record Parser tests.

use authgraph_analysis::records::RecordParser;
use authgraph_core::constants::DEFAULT_SUBJECT_PATTERN;
use authgraph_core::errors::ParseError;
use authgraph_core::types::{FxHashSet, Record};
use proptest::prelude::*;
use regex::Regex;

fn parse(input: &str) -> (Vec<Record>, usize) {
    let mut parser = RecordParser::with_pattern(input.as_bytes(), DEFAULT_SUBJECT_PATTERN).unwrap();
    let records: Vec<Record> = parser.by_ref().collect::<Result<_, _>>().unwrap();
    (records, parser.skipped())
}

fn block(id: &str, body: &str) -> String {
    format!("<rdf:Description rdf:about=\"http://d-nb.info/gnd/{id}\">\n{body}\n</rdf:Description>\n")
}

#[test]
fn test_blocks_split_on_blank_lines() {
    let input = format!(
        "{}\n\n\n{}",
        block("118514768", "  <gnd:a/>"),
        block("4015701-5", "<gnd:b/>")
    );
    let (records, skipped) = parse(&input);
    assert_eq!(skipped, 0);
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].id, "118514768");
    assert_eq!(records[1].id, "4015701-5");
    assert_eq!(
        records[0].content,
        "<rdf:Description rdf:about=\"http://d-nb.info/gnd/118514768\">\n<gnd:a/>\n</rdf:Description>"
    );
}

#[test]
fn test_whitespace_only_lines_are_separators() {
    let input = format!("{}   \t\n{}", block("1", "x"), block("2", "y"));
    let (records, _) = parse(&input);
    assert_eq!(records.len(), 2);
}

#[test]
fn test_block_without_subject_is_skipped() {
    let input = format!(
        "<?xml version=\"1.0\"?>\n<rdf:RDF>\n\n{}",
        block("118514768", "<gnd:a/>")
    );
    let (records, skipped) = parse(&input);
    assert_eq!(records.len(), 1);
    assert_eq!(skipped, 1);
}

#[test]
fn test_subject_must_be_on_first_line() {
    let input = "<rdf:Description>\nrdf:about=\"http://d-nb.info/gnd/1\">\n";
    let (records, skipped) = parse(input);
    assert!(records.is_empty());
    assert_eq!(skipped, 1);
}

#[test]
fn test_empty_input() {
    let (records, skipped) = parse("");
    assert!(records.is_empty());
    assert_eq!(skipped, 0);
}

#[test]
fn test_last_block_without_trailing_newline() {
    let (records, _) = parse("<x rdf:about=\"http://d-nb.info/gnd/9\">");
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].id, "9");
}

#[test]
fn test_invalid_utf8_does_not_stop_parsing() {
    let mut input = block("1", "<gnd:a/>").into_bytes();
    input.extend_from_slice(b"\n");
    let second = block("2", "<gnd:name>M@ller</gnd:name>");
    input.extend(second.bytes().map(|b| if b == b'@' { 0xff } else { b }));
    input.extend_from_slice(b"\n");
    input.extend_from_slice(block("3", "<gnd:c/>").as_bytes());

    let mut parser = RecordParser::with_pattern(&input[..], DEFAULT_SUBJECT_PATTERN).unwrap();
    let records: Vec<Record> = parser.by_ref().collect::<Result<_, _>>().unwrap();
    let ids: Vec<&str> = records.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["1", "2", "3"]);
    assert!(records[1].content.contains("M\u{fffd}ller"));
    assert_eq!(parser.lossy_lines(), 1);
    assert_eq!(parser.skipped(), 0);
}

#[test]
fn test_pattern_without_group_rejected() {
    let result = RecordParser::with_pattern("".as_bytes(), "rdf:about");
    assert!(matches!(result, Err(ParseError::MissingCaptureGroup { .. })));
}

proptest! {
    #[test]
    fn parsed_ids_match_grammar_and_are_unique(
        ids in proptest::collection::btree_set("[0-9]{1,9}(-[0-9X])?", 1..30),
        gaps in proptest::collection::vec(1usize..4, 30),
    ) {
        let mut dump = String::from("<?xml version=\"1.0\"?>\n\n");
        for (id, gap) in ids.iter().zip(gaps.iter()) {
            dump.push_str(&block(id, "<gnd:x/>"));
            dump.push_str(&"\n".repeat(*gap));
        }

        let (records, _) = parse(&dump);
        let grammar = Regex::new("^[0-9X-]+$").unwrap();
        let mut seen = FxHashSet::default();
        for record in &records {
            prop_assert!(grammar.is_match(&record.id));
            prop_assert!(seen.insert(record.id.clone()));
        }
        prop_assert_eq!(records.len(), ids.len());
    }
}
