//! Fingerprint tests.

use authgraph_pipeline::StageParams;
use chrono::NaiveDate;
use proptest::prelude::*;
use serde::Serialize;

#[derive(Serialize)]
struct DumpParams {
    date: NaiveDate,
    mirror: Option<String>,
    retries: u32,
}

#[test]
fn test_empty_params_use_default() {
    assert_eq!(StageParams::none().fingerprint().as_str(), "artefact");
}

#[test]
fn test_typed_params_sorted_by_name() {
    let params = StageParams::of(
        "dump-download",
        &DumpParams {
            date: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
            mirror: Some("Datendienst DNB".into()),
            retries: 3,
        },
    )
    .unwrap();
    assert_eq!(params.get("date"), Some("2024-05-01"));
    assert_eq!(
        params.fingerprint().as_str(),
        "date-2024-05-01-mirror-datendienst-dnb-retries-3"
    );
}

#[test]
fn test_non_map_params_rejected() {
    assert!(StageParams::of("x", &42u32).is_err());
}

#[test]
fn test_different_dates_differ() {
    let a = StageParams::none().with("date", "2024-05-01").fingerprint();
    let b = StageParams::none().with("date", "2024-06-01").fingerprint();
    assert_ne!(a, b);
}

proptest! {
    #[test]
    fn fingerprint_is_deterministic_and_filesystem_safe(
        pairs in proptest::collection::btree_map("[a-z_]{1,8}", ".{0,16}", 0..6)
    ) {
        let forward = pairs
            .iter()
            .fold(StageParams::none(), |p, (k, v)| p.with(k.as_str(), v));
        let reverse = pairs
            .iter()
            .rev()
            .fold(StageParams::none(), |p, (k, v)| p.with(k.as_str(), v));

        let fingerprint = forward.fingerprint();
        prop_assert_eq!(&fingerprint, &reverse.fingerprint());
        prop_assert!(fingerprint
            .as_str()
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-'));
        prop_assert!(!fingerprint.as_str().is_empty());
    }
}
