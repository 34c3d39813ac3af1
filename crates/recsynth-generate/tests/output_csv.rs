use std::fs;
use std::path::PathBuf;

use recsynth_core::{Field, Record, RecordSet};
use recsynth_generate::output::csv::{write_records, write_records_csv};

fn record(study_id: i64, first_name: &str, mrn: i64) -> Record {
    Field::ALL
        .iter()
        .map(|field| (*field, "".into()))
        .collect::<Record>()
        .with(Field::StudyId, study_id)
        .with(Field::FirstName, first_name)
        .with(Field::Mrn, mrn)
        .with(Field::City, "Portland, OR")
}

fn sample() -> RecordSet {
    let mut records = RecordSet::new();
    records.push(record(10_001, "Ann", 200_000)).expect("push");
    records.push(record(10_002, "Bob", 200_001)).expect("push");
    records
}

fn render(records: &RecordSet) -> Vec<String> {
    let bytes = write_records(Vec::new(), records).expect("write csv");
    String::from_utf8(bytes)
        .expect("utf-8")
        .lines()
        .map(str::to_string)
        .collect()
}

#[test]
fn positions_key_rows_without_an_index() {
    let lines = render(&sample());
    assert_eq!(lines.len(), 3);

    let header: Vec<&str> = lines[0].split(',').collect();
    assert_eq!(header[0], "");
    assert_eq!(header[1], "study_id");
    assert_eq!(header[2], "first_name");
    assert_eq!(header.len(), Field::ALL.len() + 1);

    assert!(lines[1].starts_with("0,10001,Ann,"));
    assert!(lines[2].starts_with("1,10002,Bob,"));
    assert!(lines[1].contains("\"Portland, OR\""));
}

#[test]
fn index_field_becomes_the_first_column() {
    let mut records = sample();
    records.set_index(Field::Mrn).expect("set index");
    let lines = render(&records);

    let header: Vec<&str> = lines[0].split(',').collect();
    assert_eq!(header[0], "mrn");
    assert_eq!(header.iter().filter(|name| **name == "mrn").count(), 1);
    assert_eq!(header.len(), Field::ALL.len());
    assert!(lines[1].starts_with("200000,10001,Ann,"));
    assert!(lines[2].starts_with("200001,10002,Bob,"));
}

#[test]
fn file_writer_reports_bytes() {
    let mut path = std::env::temp_dir();
    path.push(format!("recsynth_output_{}", uuid::Uuid::new_v4()));
    fs::create_dir_all(&path).expect("create temp dir");
    let file: PathBuf = path.join("records.csv");

    let bytes = write_records_csv(&file, &sample()).expect("write csv file");
    let contents = fs::read_to_string(&file).expect("read csv file");
    assert_eq!(bytes, contents.len() as u64);
    assert!(contents.starts_with(",study_id,first_name,"));
}
