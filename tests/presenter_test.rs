//! Tests for table and CSV presentation.

mod common;

use std::fs;
use std::io::{self, Write};

use rstest::rstest;
use tempfile::TempDir;

use domjudge_cli::models::{Problem, Team};
use domjudge_cli::ClientError;
use domjudge_cli::presenter::{present, Presenter, RecordKind, Table, NO_RESULTS};

fn teams() -> Vec<Team> {
    vec![
        Team {
            id: 1,
            name: "Alice".into(),
        },
        Team {
            id: 2,
            name: "Bob".into(),
        },
    ]
}

#[test]
fn given_teams_then_uppercase_headers_and_rows_in_order() {
    let table = Table::from_records(&teams()).unwrap();

    assert_eq!(table.headers(), ["ID", "NAME"]);
    assert_eq!(
        table.rows(),
        [
            vec!["1".to_string(), "Alice".to_string()],
            vec!["2".to_string(), "Bob".to_string()],
        ]
    );
}

#[rstest]
#[case(RecordKind::Contest, 5)]
#[case(RecordKind::Team, 2)]
#[case(RecordKind::Problem, 3)]
#[case(RecordKind::Submission, 7)]
#[case(RecordKind::SourceCode, 2)]
fn every_record_kind_has_its_columns(#[case] kind: RecordKind, #[case] columns: usize) {
    assert_eq!(kind.headers().len(), columns);
}

#[test]
fn given_submissions_then_one_cell_per_header() {
    let api = common::client(common::contest_transport());
    let submissions = api
        .list_submissions(1)
        .unwrap()
        .collect::<Result<Vec<_>, _>>()
        .unwrap();

    let table = Table::from_records(&submissions).unwrap();

    assert_eq!(
        table.headers(),
        ["ID", "TEAM NAME", "PROBLEM NAME", "LANGUAGE", "TIME", "MAX. RUN TIME", "JUDGEMENT"]
    );
    assert_eq!(table.rows()[0][0], "42");
    assert_eq!(table.rows()[0][5], "0.125");
    assert_eq!(table.rows()[0][6], "AC");
    assert!(table
        .rows()
        .iter()
        .all(|row| row.len() == table.headers().len()));
}

#[test]
fn given_empty_listing_when_presenting_then_no_results_and_no_csv() {
    let temp = TempDir::new().unwrap();
    let csv_path = temp.path().join("out.csv");
    let mut out = Vec::new();

    present::<Team, _>(&mut out, &[], Some(csv_path.as_path())).unwrap();

    assert_eq!(String::from_utf8(out).unwrap().trim_end(), NO_RESULTS);
    assert!(!csv_path.exists());
}

struct ClosedPipe;

impl Write for ClosedPipe {
    fn write(&mut self, _: &[u8]) -> io::Result<usize> {
        Err(io::ErrorKind::BrokenPipe.into())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[test]
fn given_closed_output_when_presenting_then_output_error_and_no_csv() {
    let temp = TempDir::new().unwrap();
    let csv_path = temp.path().join("out.csv");

    let err = present(&mut ClosedPipe, &teams(), Some(csv_path.as_path())).unwrap_err();

    match err {
        ClientError::Output(source) => assert_eq!(source.kind(), io::ErrorKind::BrokenPipe),
        other => panic!("unexpected error: {other}"),
    }
    assert!(!csv_path.exists());
}

#[test]
fn given_records_when_presenting_with_csv_then_prints_table_and_overwrites_csv() {
    let temp = TempDir::new().unwrap();
    let csv_path = temp.path().join("out.csv");
    fs::write(&csv_path, "stale,content\nshould,vanish\nthird,line\n").unwrap();
    let mut out = Vec::new();

    present(&mut out, &teams(), Some(csv_path.as_path())).unwrap();

    let printed = String::from_utf8(out).unwrap();
    let header = printed.lines().next().unwrap();
    assert_eq!(header.split_whitespace().collect::<Vec<_>>(), ["ID", "NAME"]);
    assert!(printed.contains("Alice"));
    assert_eq!(
        fs::read_to_string(&csv_path).unwrap(),
        "ID,NAME\n1,Alice\n2,Bob\n"
    );
}

#[test]
fn given_cells_with_commas_then_csv_quotes_them() {
    let temp = TempDir::new().unwrap();
    let csv_path = temp.path().join("problems.csv");
    let problems = vec![Problem {
        id: 3,
        long_name: "Sum, then sort".into(),
        short_name: "C".into(),
    }];

    Table::from_records(&problems)
        .unwrap()
        .write_csv(&csv_path)
        .unwrap();

    assert_eq!(
        fs::read_to_string(&csv_path).unwrap(),
        "ID,LONG NAME,SHORT NAME\n3,\"Sum, then sort\",C\n"
    );
}

#[test]
fn team_row_matches_its_kind() {
    assert_eq!(Team::KIND, RecordKind::Team);
    assert_eq!(teams()[1].row(), ["2", "Bob"]);
}
