use rorschach_cs::scoring::{
    calculate, sample_data, summary_rows, write_csv, ImportError, Response, ResponseImporter,
};
use std::io::Cursor;
use std::path::PathBuf;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

#[test]
fn sample_fixture_imports_as_the_bundled_protocol() {
    let imported =
        ResponseImporter::from_path(fixture("sample_protocol.csv")).expect("fixture imports");

    let mut expected = sample_data();
    expected.push(Response::default());
    assert_eq!(imported, expected);
}

#[test]
fn imported_fixture_yields_the_reference_summary() {
    let imported =
        ResponseImporter::from_path(fixture("sample_protocol.csv")).expect("fixture imports");
    let from_csv = calculate(&imported).into_result().expect("valid protocol");
    let bundled = calculate(&sample_data())
        .into_result()
        .expect("valid protocol");

    assert_eq!(from_csv, bundled);
}

#[test]
fn malformed_csv_is_reported() {
    let csv = "card,location,popular\nI,W,\"unterminated\n";
    let err = ResponseImporter::from_reader(Cursor::new(csv)).expect_err("malformed");
    assert!(matches!(err, ImportError::Csv(_) | ImportError::Row { .. }));
}

#[test]
fn exported_csv_round_trips_through_a_reader() {
    let summary = calculate(&sample_data())
        .into_result()
        .expect("valid protocol");
    let rows = summary_rows(&summary).expect("flattens");
    let mut buffer = Vec::new();
    write_csv(&rows, &mut buffer).expect("writes");

    let mut reader = csv::Reader::from_reader(buffer.as_slice());
    let headers = reader.headers().expect("header row").clone();
    assert_eq!(
        headers.iter().collect::<Vec<_>>(),
        vec!["section", "field", "value"]
    );

    let records: Vec<csv::StringRecord> = reader
        .records()
        .collect::<Result<_, _>>()
        .expect("rows parse");
    assert_eq!(records.len(), rows.len());
    assert!(records
        .iter()
        .any(|record| &record[0] == "special_indices" && &record[1] == "S-CON"));
    assert!(records
        .iter()
        .any(|record| &record[0] == "upper_section" && &record[1] == "DQ.+.FQ-"));
}
