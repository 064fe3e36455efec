use super::*;
use crate::config::LogSettings;
use crate::logging;
use crate::testing::LogBuffer;
use std::fmt::Write as _;
use std::fs;

fn write_table(dir: &Path, contents: &str) -> std::path::PathBuf {
    let path = dir.join("input.csv");
    fs::write(&path, contents.as_bytes()).expect("write input table");
    path
}

#[test]
fn reads_named_column_in_row_order() {
    let temp = tempfile::tempdir().expect("create temp dir");
    let path = write_table(
        temp.path(),
        "name,ico\nAcme,123\n\"Foo, s.r.o.\",456\nBar,123\n",
    );

    let identifiers = load_identifiers(&path, "ico").expect("load identifiers");
    assert_eq!(identifiers, vec!["123", "456", "123"]);
}

#[test]
fn short_rows_yield_empty_identifiers() {
    let temp = tempfile::tempdir().expect("create temp dir");
    let path = write_table(temp.path(), "name,ico\nAcme,123\nBroken\n");

    let identifiers = load_identifiers(&path, "ico").expect("load identifiers");
    assert_eq!(identifiers, vec!["123", ""]);
}

#[test]
fn missing_column_is_an_input_error() {
    let temp = tempfile::tempdir().expect("create temp dir");
    let path = write_table(temp.path(), "ico\n123\n");

    let err = load_identifiers(&path, "company_id").expect_err("column missing");
    match err.downcast_ref::<UserError>() {
        Some(UserError::MissingColumn { column, .. }) => assert_eq!(column, "company_id"),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn truncates_to_api_limit_keeping_first_rows() {
    let temp = tempfile::tempdir().expect("create temp dir");
    let mut contents = String::from("ico\n");
    for n in 0..=API_LIMIT {
        writeln!(contents, "{n}").expect("format row");
    }
    let path = write_table(temp.path(), &contents);
    let logs = LogBuffer::default();
    let sink = logging::subscriber(LogSettings::default(), logs.clone(), false);

    let identifiers = tracing::subscriber::with_default(sink, || {
        load_identifiers(&path, "ico").expect("load identifiers")
    });
    let text = logs.contents();
    assert!(text.contains("WARN"), "{text}");
    assert!(
        text.contains("More than 5000 ICOs requested, truncating to 5000"),
        "{text}"
    );
    assert!(text.contains("requested=5001"), "{text}");
    assert_eq!(identifiers.len(), API_LIMIT);
    assert_eq!(identifiers.first().map(String::as_str), Some("0"));
    assert_eq!(identifiers.last().map(String::as_str), Some("4999"));
}

#[test]
fn limit_sized_table_is_kept_without_warning() {
    let temp = tempfile::tempdir().expect("create temp dir");
    let mut contents = String::from("ico\n");
    for n in 0..API_LIMIT {
        writeln!(contents, "{n}").expect("format row");
    }
    let path = write_table(temp.path(), &contents);
    let logs = LogBuffer::default();
    let sink = logging::subscriber(LogSettings::default(), logs.clone(), false);

    let identifiers = tracing::subscriber::with_default(sink, || {
        load_identifiers(&path, "ico").expect("load identifiers")
    });
    assert_eq!(identifiers.len(), API_LIMIT);
    assert!(!logs.contents().contains("truncating"));
}

#[test]
fn header_only_table_yields_no_identifiers() {
    let temp = tempfile::tempdir().expect("create temp dir");
    let path = write_table(temp.path(), "ico\n");

    let identifiers = load_identifiers(&path, "ico").expect("load identifiers");
    assert!(identifiers.is_empty());
}
