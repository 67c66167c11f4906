//! Preferred-name extraction and Name Joiner tests.

use authgraph_analysis::names::{
    extract_names, join_names, read_names, write_ranked, NameExtractor, PreferredName,
};
use authgraph_analysis::rank::{RankEntry, Score};
use authgraph_analysis::tsv::TsvWriter;
use authgraph_core::constants::DEFAULT_PREFERRED_NAME_PATTERN;
use authgraph_core::errors::{StageError, StorageError};
use authgraph_core::types::Record;
use authgraph_storage::{build_record_store, RecordStore};

fn extractor() -> NameExtractor {
    NameExtractor::new(DEFAULT_PREFERRED_NAME_PATTERN).unwrap()
}

fn rank(id: &str, score: &str) -> RankEntry {
    RankEntry {
        id: id.to_string(),
        score: Score::parse(score).unwrap(),
    }
}

#[test]
fn test_first_preferred_name_wins() {
    let record = Record::new(
        "118514768",
        "<rdf:Description>\n<gnd:preferredNameForThePerson>Brecht, Bertolt</gnd:preferredNameForThePerson>\n<gnd:preferredNameForTheWork>Other</gnd:preferredNameForTheWork>",
    );
    let name = extractor().extract(&record).unwrap();
    assert_eq!(
        name,
        PreferredName {
            id: "118514768".into(),
            label: "Brecht, Bertolt".into(),
            kind: "gnd:preferredNameForThePerson".into(),
        }
    );
}

#[test]
fn test_extract_names_counts_unnamed_records() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("records.db");
    let records = vec![
        Record::new("1", "<gnd:preferredNameForTheSubjectHeading>Berlin</gnd:preferredNameForTheSubjectHeading>"),
        Record::new("2", "<gnd:variantName>x</gnd:variantName>"),
    ];
    build_record_store(&path, records.into_iter().map(Ok::<_, StorageError>)).unwrap();
    let store = RecordStore::open(&path).unwrap();

    let mut writer = TsvWriter::new(Vec::new());
    let stats = extract_names::<_, StageError>(&store, 1, &extractor(), &mut writer).unwrap();
    assert_eq!(stats.records, 2);
    assert_eq!(stats.named, 1);
    assert_eq!(stats.unnamed, 1);
    let written = writer.finish().unwrap();
    assert_eq!(written, b"1\tBerlin\tgnd:preferredNameForTheSubjectHeading\n");

    let names = read_names(written.as_slice()).unwrap();
    assert_eq!(names["1"].label, "Berlin");
}

#[test]
fn test_join_is_inner_and_sorted_descending() {
    let names = read_names("A\tAlpha\tperson\nC\tGamma\tplace\nD\tDelta\twork\n".as_bytes()).unwrap();
    let rows = join_names(vec![rank("C", "0.4"), rank("B", "0.9"), rank("A", "0.6")], &names);

    let ids: Vec<&str> = rows.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["A", "C"]);

    let mut writer = TsvWriter::new(Vec::new());
    write_ranked(&rows, &mut writer).unwrap();
    assert_eq!(
        writer.finish().unwrap(),
        b"A\t0.6\tAlpha\tperson\nC\t0.4\tGamma\tplace\n"
    );
}

#[test]
fn test_equal_scores_keep_rank_order() {
    let names = read_names("x\tX\tk\ny\tY\tk\n".as_bytes()).unwrap();
    let rows = join_names(vec![rank("y", "0.5"), rank("x", "0.50")], &names);
    assert_eq!(rows[0].id, "y");
    assert_eq!(rows[1].id, "x");
}

#[test]
fn test_scores_order_numerically_and_print_verbatim() {
    let names = read_names("a\tA\tk\nb\tB\tk\nc\tC\tk\n".as_bytes()).unwrap();
    let rows = join_names(
        vec![rank("a", "1.5e-7"), rank("b", "0.60"), rank("c", "2E-1")],
        &names,
    );

    let mut writer = TsvWriter::new(Vec::new());
    write_ranked(&rows, &mut writer).unwrap();
    assert_eq!(
        writer.finish().unwrap(),
        b"b\t0.60\tB\tk\nc\t2E-1\tC\tk\na\t1.5e-7\tA\tk\n"
    );
}

#[test]
fn test_read_names_requires_three_fields() {
    assert!(read_names("A\tAlpha\n".as_bytes()).is_err());
}
