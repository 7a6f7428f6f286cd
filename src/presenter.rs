// Tabular presentation of records: a text table on stdout and an optional
// CSV export with the same headers and rows.
//
// Each record type implements `Presenter` once. `RecordKind` is the
// static table mapping every known record type to its display headers.

use std::io::Write;
use std::path::Path;

use comfy_table::{presets, CellAlignment, TableComponent};
use tracing::info;

use crate::error::{ClientError, Result};
use crate::models::{Contest, Problem, SourceCode, Submission, Team};

const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S%:z";

/// Printed instead of a table when a listing came back empty.
pub const NO_RESULTS: &str = "No results retrieved.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    Contest,
    Team,
    Problem,
    Submission,
    SourceCode,
}

impl RecordKind {
    /// Display names of the columns, in column order.
    pub fn headers(self) -> &'static [&'static str] {
        match self {
            RecordKind::Contest => &["id", "long name", "short name", "start", "end"],
            RecordKind::Team => &["id", "name"],
            RecordKind::Problem => &["id", "long name", "short name"],
            RecordKind::Submission => &[
                "id",
                "team name",
                "problem name",
                "language",
                "time",
                "max. run time",
                "judgement",
            ],
            RecordKind::SourceCode => &["id", "submission id"],
        }
    }
}

/// Row extraction for one record type. `row` yields one cell per header of
/// `KIND`, in the same order.
pub trait Presenter {
    const KIND: RecordKind;

    fn row(&self) -> Vec<String>;
}

impl Presenter for Contest {
    const KIND: RecordKind = RecordKind::Contest;

    fn row(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.long_name.clone(),
            self.short_name.clone(),
            self.start_time.format(TIME_FORMAT).to_string(),
            self.end_time.format(TIME_FORMAT).to_string(),
        ]
    }
}

impl Presenter for Team {
    const KIND: RecordKind = RecordKind::Team;

    fn row(&self) -> Vec<String> {
        vec![self.id.to_string(), self.name.clone()]
    }
}

impl Presenter for Problem {
    const KIND: RecordKind = RecordKind::Problem;

    fn row(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.long_name.clone(),
            self.short_name.clone(),
        ]
    }
}

impl Presenter for Submission {
    const KIND: RecordKind = RecordKind::Submission;

    fn row(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.team_name.clone(),
            self.problem_name.clone(),
            self.language_id.clone(),
            self.time.format(TIME_FORMAT).to_string(),
            self.max_run_time.map(|t| t.to_string()).unwrap_or_default(),
            self.judgement_type_id.clone().unwrap_or_default(),
        ]
    }
}

impl Presenter for SourceCode {
    const KIND: RecordKind = RecordKind::SourceCode;

    fn row(&self) -> Vec<String> {
        vec![self.id.to_string(), self.submission_id.to_string()]
    }
}

/// Uppercased headers and one row per record.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    /// `None` when there are no records to show.
    pub fn from_records<P: Presenter>(records: &[P]) -> Option<Self> {
        if records.is_empty() {
            return None;
        }
        Some(Table {
            headers: P::KIND.headers().iter().map(|h| h.to_uppercase()).collect(),
            rows: records.iter().map(P::row).collect(),
        })
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Borderless table with a dashed rule under the headers. Numeric
    /// columns are right-aligned.
    pub fn render(&self) -> String {
        let mut table = comfy_table::Table::new();
        table
            .load_preset(presets::NOTHING)
            .set_style(TableComponent::HeaderLines, '-')
            .set_header(self.headers.clone());
        for row in &self.rows {
            table.add_row(row.clone());
        }
        for (index, column) in table.column_iter_mut().enumerate() {
            if self.is_numeric(index) {
                column.set_cell_alignment(CellAlignment::Right);
            }
        }
        table.to_string()
    }

    fn is_numeric(&self, column: usize) -> bool {
        self.rows
            .iter()
            .all(|row| row[column].is_empty() || row[column].parse::<f64>().is_ok())
    }

    /// Write the headers and rows to `path`, replacing any existing file.
    pub fn write_csv(&self, path: &Path) -> Result<()> {
        let mut writer = csv::Writer::from_path(path)?;
        writer.write_record(&self.headers)?;
        for row in &self.rows {
            writer.write_record(row)?;
        }
        writer.flush().map_err(|e| ClientError::io(path, e))?;
        Ok(())
    }
}

/// Print `records` as a table and, when `csv_path` is given, export them.
/// An empty listing prints [`NO_RESULTS`] and writes no CSV.
pub fn present<P: Presenter, W: Write>(
    out: &mut W,
    records: &[P],
    csv_path: Option<&Path>,
) -> Result<()> {
    let Some(table) = Table::from_records(records) else {
        writeln!(out, "{NO_RESULTS}").map_err(ClientError::Output)?;
        return Ok(());
    };

    writeln!(out, "{}", table.render()).map_err(ClientError::Output)?;
    if let Some(path) = csv_path {
        table.write_csv(path)?;
        info!(path = %path.display(), rows = table.rows().len(), "wrote csv");
    }
    Ok(())
}
