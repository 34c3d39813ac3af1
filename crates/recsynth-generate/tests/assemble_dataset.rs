mod common;

use std::collections::{HashMap, HashSet};

use chrono::{Days, NaiveDate};

use common::{StubProvider, reference_date};
use recsynth_core::{Error, Field, RecordSet, SynthesisOptions};
use recsynth_generate::output::csv::write_records;
use recsynth_generate::{DatasetAssembler, GenerationError, GenerationResult, NicknameLookup};

fn options(records: usize, percent: f64, max_copies: usize) -> SynthesisOptions {
    SynthesisOptions {
        num_records_desired: records,
        percent_records_to_duplicate: percent,
        max_number_copies_of_one_record: max_copies,
        seed: Some(42),
        reference_date: Some(reference_date()),
        ..SynthesisOptions::default()
    }
}

fn run(options: SynthesisOptions) -> GenerationResult {
    DatasetAssembler::new(options)
        .run()
        .expect("run synthesis")
}

fn study_ids(records: &RecordSet) -> Vec<i64> {
    records
        .records()
        .map(|record| record.int(Field::StudyId).expect("study id"))
        .collect()
}

fn date(record: &recsynth_core::Record, field: Field) -> NaiveDate {
    let text = record.text(field).expect("date field");
    NaiveDate::parse_from_str(text, "%Y-%m-%d").expect("iso date")
}

#[test]
fn zero_percent_yields_only_base_records() {
    let result = run(options(25, 0.0, 3));
    assert_eq!(result.records.len(), 25);
    assert_eq!(result.report.base_records, 25);
    assert_eq!(result.report.variants_generated, 0);
    assert_eq!(result.report.rows_total, 25);
    assert_eq!(result.records.index(), None);
    assert_eq!(result.records.fields(), Field::ALL.to_vec());
}

#[test]
fn base_records_are_plausible() {
    let today = reference_date();
    let result = run(options(200, 0.0, 3));

    let ids: HashSet<i64> = study_ids(&result.records).into_iter().collect();
    assert_eq!(ids.len(), 200);

    for record in result.records.records() {
        let study_id = record.int(Field::StudyId).expect("study id");
        assert!((10_000..99_999).contains(&study_id));

        let dob = date(record, Field::Dob);
        let consent = date(record, Field::PrimaryConsentDate);
        let core = date(record, Field::CoreParticipantDate);
        let adult_on = dob.checked_add_days(Days::new(6574)).expect("date in range");
        assert!(adult_on.min(today) <= consent, "consent before adulthood");
        assert!(consent <= core && core <= today);
        assert_eq!(date(record, Field::DateOfLastActivity), today);

        let mrn = record.int(Field::Mrn).expect("mrn");
        assert!((100_000..=999_999).contains(&mrn));
        assert!((1..=2).contains(&record.int(Field::Ethnicity).expect("ethnicity")));
        assert!((1..=5).contains(&record.int(Field::Race).expect("race")));
        assert!((1..=3).contains(&record.int(Field::Sex).expect("sex")));

        let zip = record.text(Field::ZipCode).expect("zip");
        assert_eq!(zip.len(), 5);
        assert!(zip.chars().all(|ch| ch.is_ascii_digit()));
        let state = record.text(Field::State).expect("state");
        assert_eq!(state.len(), 2);

        let email = record.text(Field::EmailAddress).expect("email");
        assert!(email.contains('@'));
    }
}

#[test]
fn one_copy_per_selected_record() {
    let result = run(options(100, 10.0, 1));
    assert_eq!(result.records.len(), 110);
    assert_eq!(result.report.sources_selected, 10);
    assert_eq!(result.report.variants_generated, 10);
    assert_eq!(
        result.report.study_ids_reassigned + result.report.study_ids_kept,
        10
    );
    let layouts: u64 = result.report.date_layouts.values().sum();
    assert_eq!(layouts, 10);
}

#[test]
fn zero_max_copies_still_makes_one_copy() {
    let result = run(options(40, 10.0, 0));
    assert_eq!(result.records.len(), 44);
}

#[test]
fn copies_stay_within_bounds() {
    let result = run(options(100, 10.0, 3));
    let rows = result.records.len();
    assert!((110..=130).contains(&rows), "unexpected row count {rows}");
    assert_eq!(result.report.rows_total, rows as u64);
    assert_eq!(result.report.base_records, 100);
}

#[test]
fn study_ids_are_unique_when_duplicates_are_disallowed() {
    let mut opts = options(100, 20.0, 3);
    opts.allow_duplicate_identifier = false;
    let result = run(opts);

    let ids = study_ids(&result.records);
    let unique: HashSet<i64> = ids.iter().copied().collect();
    assert_eq!(unique.len(), ids.len());
    assert_eq!(result.report.study_ids_kept, 0);
    assert_eq!(
        result.report.study_ids_reassigned,
        result.report.variants_generated
    );
}

#[test]
fn reassigned_mrns_climb_past_the_base_maximum() {
    let result = run(options(300, 30.0, 3));
    let base_max = result
        .records
        .rows()
        .iter()
        .take(300)
        .filter_map(|row| row.record.int(Field::Mrn))
        .max()
        .expect("base mrns");

    let fresh: Vec<i64> = result
        .records
        .rows()
        .iter()
        .skip(300)
        .filter_map(|row| row.record.int(Field::Mrn))
        .filter(|mrn| *mrn > base_max)
        .collect();

    let expected: Vec<i64> = (1..=fresh.len() as i64).map(|step| base_max + step).collect();
    assert_eq!(fresh, expected);
    assert_eq!(fresh.len() as u64, result.report.mrns_reassigned);
}

#[test]
fn variants_reuse_a_base_record() {
    let result = run(options(50, 20.0, 2));
    let base: Vec<_> = result.records.rows().iter().take(50).collect();

    for row in result.records.rows().iter().skip(50) {
        let source = base.iter().find(|candidate| {
            [Field::LastName, Field::City, Field::ZipCode, Field::CoreParticipantDate]
                .iter()
                .all(|field| candidate.record.get(*field) == row.record.get(*field))
        });
        assert!(source.is_some(), "row {} has no source", row.position);
    }
}

#[test]
fn index_field_keys_rows() {
    let mut opts = options(10, 0.0, 3);
    opts.index_field_name = Some("mrn".to_string());
    let result = run(opts);

    assert_eq!(result.records.index(), Some(Field::Mrn));
    assert_eq!(result.report.index_field.as_deref(), Some("mrn"));
    let keys: HashSet<String> = result.records.keys().map(|key| key.to_string()).collect();
    assert_eq!(keys.len(), 10);
}

#[test]
fn blank_index_field_keeps_row_positions() {
    let mut opts = options(10, 0.0, 3);
    opts.index_field_name = Some(String::new());
    let result = run(opts);

    assert_eq!(result.records.index(), None);
    assert_eq!(result.report.index_field, None);
    let keys: Vec<String> = result.records.keys().map(|key| key.to_string()).collect();
    assert_eq!(keys.first().map(String::as_str), Some("0"));
    assert_eq!(keys.last().map(String::as_str), Some("9"));
}

#[test]
fn report_serializes_counts() {
    let result = run(options(100, 10.0, 1));
    let json = serde_json::to_value(&result.report).expect("serialize report");
    assert_eq!(json["seed"], 42);
    assert_eq!(json["reference_date"], "2024-01-01");
    assert_eq!(json["rows_total"], 110);
    assert_eq!(json["variants_generated"], 10);
}

#[test]
fn unknown_index_field_is_rejected() {
    let mut opts = options(10, 0.0, 3);
    opts.index_field_name = Some("favorite_color".to_string());
    let err = DatasetAssembler::new(opts)
        .run()
        .expect_err("unknown index field");
    assert!(matches!(err, GenerationError::Core(Error::Schema(_))));
    assert!(err.is_configuration());
}

#[test]
fn out_of_range_percent_is_rejected() {
    let err = DatasetAssembler::new(options(10, 101.0, 3))
        .run()
        .expect_err("percent above 100");
    assert!(err.is_configuration());
}

#[test]
fn more_records_than_study_ids_is_exhaustion() {
    let err = DatasetAssembler::new(options(90_000, 0.0, 3))
        .run()
        .expect_err("pool too small");
    assert!(matches!(
        err,
        GenerationError::Core(Error::Exhaustion {
            requested: 90_000,
            available: 89_999
        })
    ));
}

#[test]
fn same_seed_and_date_give_identical_output() {
    let render = || {
        let result = run(options(60, 10.0, 3));
        let bytes = write_records(Vec::new(), &result.records).expect("write csv");
        String::from_utf8(bytes).expect("utf-8 csv")
    };
    assert_eq!(render(), render());

    let mut other = options(60, 10.0, 3);
    other.seed = Some(43);
    let other = run(other);
    let bytes = write_records(Vec::new(), &other.records).expect("write csv");
    assert_ne!(String::from_utf8(bytes).expect("utf-8 csv"), render());
}

#[test]
fn custom_provider_and_nicknames_are_used() {
    let provider = StubProvider {
        first_name: "Zed",
        state: "TX",
    };
    let nicknames =
        NicknameLookup::from_reader("zed,zeddy\n".as_bytes()).expect("parse nickname table");
    let result = DatasetAssembler::new(options(20, 100.0, 3))
        .with_provider(Box::new(provider))
        .with_nicknames(nicknames)
        .with_run_id("run-fixed")
        .run()
        .expect("run synthesis");

    assert_eq!(result.report.run_id, "run-fixed");
    for record in result.records.records() {
        let name = record.text(Field::FirstName).expect("first name");
        assert!(name == "Zed" || name == "Zeddy", "unexpected name {name}");
        let state = record.text(Field::State).expect("state");
        assert!(state == "TX" || state == "Texas");
        assert_eq!(record.text(Field::PhoneNumber), Some("555-123-4567"));
    }
    assert!(result.report.variants_generated >= 20);
}

#[test]
fn reselected_source_does_not_reuse_a_nickname() {
    let provider = StubProvider {
        first_name: "Zed",
        state: "CA",
    };
    let nicknames =
        NicknameLookup::from_reader("zed,zeddy,zee,zeb\n".as_bytes()).expect("parse table");
    let result = DatasetAssembler::new(options(20, 100.0, 4))
        .with_provider(Box::new(provider))
        .with_nicknames(nicknames)
        .run()
        .expect("run synthesis");

    let source_key = |record: &recsynth_core::Record| {
        (
            date(record, Field::CoreParticipantDate),
            date(record, Field::PrimaryConsentDate),
        )
    };
    let mut used_by_source: HashMap<(NaiveDate, NaiveDate), Vec<String>> = HashMap::new();
    for row in result.records.rows().iter().skip(20) {
        let used = used_by_source.entry(source_key(&row.record)).or_default();
        let name = row.record.text(Field::FirstName).expect("first name");
        if name != "Zed" {
            used.push(name.to_string());
        }
    }

    assert_eq!(result.report.sources_selected, 20);
    assert!(
        used_by_source.len() < 20,
        "twenty draws over twenty rows should repeat a source"
    );
    for (source, used) in &used_by_source {
        let unique: HashSet<&String> = used.iter().collect();
        assert_eq!(unique.len(), used.len(), "{source:?} reused a nickname: {used:?}");
        assert!(used.len() <= 3);
    }
}
