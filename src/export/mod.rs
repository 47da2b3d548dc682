//! File exports of the current suggestion list.
//!
//! The adapters here only reshape records; the writers (`csv`,
//! `rust_xlsxwriter`, `printpdf`) produce the bytes. Every export is built
//! fully in memory before it is handed to the HTTP layer.

mod pdf;
mod tabular;
mod text;

use std::fmt;

use serde::Serialize;

use crate::models::suggestion::{ScoreMetric, Suggestion};

pub use pdf::write_pdf;
pub use tabular::{write_csv, write_xlsx};
pub use text::{doc_text, ppt_text};

pub const TABULAR_HEADERS: [&str; 8] = [
    "Work Name",
    "Estimated Cost",
    "Projected Cost",
    "Safety",
    "Compliance",
    "Environmental",
    "Efficiency",
    "Innovation",
];

pub const STRUCTURED_HEADERS: [&str; 9] = [
    "No",
    "Work Name",
    "Estimated Cost",
    "Projected Cost",
    "Safety",
    "Compliance",
    "Environmental",
    "Efficiency",
    "Innovation",
];

/// One table cell, either text or an integer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Cell {
    Text(String),
    Int(i64),
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Text(s) => f.write_str(s),
            Cell::Int(n) => write!(f, "{n}"),
        }
    }
}

impl From<&str> for Cell {
    fn from(s: &str) -> Self {
        Cell::Text(s.to_string())
    }
}

impl From<i64> for Cell {
    fn from(n: i64) -> Self {
        Cell::Int(n)
    }
}

pub type Row = Vec<Cell>;

/// Header plus body rows for the printable table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructuredTable {
    pub head: Vec<&'static str>,
    pub body: Vec<Row>,
}

fn record_cells(record: &Suggestion) -> Row {
    let mut row: Row = vec![
        record.work_name.as_str().into(),
        record.estimated_cost.as_str().into(),
        record.scores.projected_cost.as_str().into(),
    ];
    row.extend(
        ScoreMetric::ALL
            .iter()
            .map(|metric| Cell::Int(metric.value(&record.scores))),
    );
    row
}

/// Spreadsheet rows: score group flattened next to name and cost.
pub fn tabular_rows(records: &[Suggestion]) -> Vec<Row> {
    records.iter().map(record_cells).collect()
}

/// Printable table with a 1-based sequence number in front of each row.
pub fn structured_table(records: &[Suggestion]) -> StructuredTable {
    let body = records
        .iter()
        .enumerate()
        .map(|(index, record)| {
            let mut row = vec![Cell::Int(index as i64 + 1)];
            row.extend(record_cells(record));
            row
        })
        .collect();
    StructuredTable {
        head: STRUCTURED_HEADERS.to_vec(),
        body,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Xlsx,
    Pdf,
    Doc,
    Ppt,
}

impl ExportFormat {
    pub const ALL: [ExportFormat; 5] = [
        ExportFormat::Csv,
        ExportFormat::Xlsx,
        ExportFormat::Pdf,
        ExportFormat::Doc,
        ExportFormat::Ppt,
    ];

    pub fn from_slug(slug: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.slug() == slug)
    }

    pub fn slug(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Xlsx => "xlsx",
            ExportFormat::Pdf => "pdf",
            ExportFormat::Doc => "doc",
            ExportFormat::Ppt => "ppt",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "CSV",
            ExportFormat::Xlsx => "Excel",
            ExportFormat::Pdf => "PDF",
            ExportFormat::Doc => "Word",
            ExportFormat::Ppt => "PowerPoint",
        }
    }

    pub fn file_name(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "suggestions.csv",
            ExportFormat::Xlsx => "suggestions.xlsx",
            ExportFormat::Pdf => "suggestions.pdf",
            ExportFormat::Doc => "suggestions.doc",
            ExportFormat::Ppt => "suggestions.ppt",
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "text/csv; charset=utf-8",
            ExportFormat::Xlsx => {
                "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
            }
            ExportFormat::Pdf => "application/pdf",
            ExportFormat::Doc => "application/msword",
            ExportFormat::Ppt => "application/vnd.ms-powerpoint",
        }
    }
}

/// A complete file ready to be sent as a download.
#[derive(Debug, Clone)]
pub struct ExportFile {
    pub file_name: &'static str,
    pub content_type: &'static str,
    pub bytes: Vec<u8>,
}

#[derive(Debug)]
pub enum ExportError {
    Csv(csv::Error),
    Xlsx(rust_xlsxwriter::XlsxError),
    Pdf(String),
    Json(serde_json::Error),
}

impl fmt::Display for ExportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportError::Csv(e) => write!(f, "CSV export failed: {e}"),
            ExportError::Xlsx(e) => write!(f, "Excel export failed: {e}"),
            ExportError::Pdf(e) => write!(f, "PDF export failed: {e}"),
            ExportError::Json(e) => write!(f, "Score serialization failed: {e}"),
        }
    }
}

impl std::error::Error for ExportError {}

impl From<csv::Error> for ExportError {
    fn from(e: csv::Error) -> Self {
        ExportError::Csv(e)
    }
}

impl From<rust_xlsxwriter::XlsxError> for ExportError {
    fn from(e: rust_xlsxwriter::XlsxError) -> Self {
        ExportError::Xlsx(e)
    }
}

impl From<serde_json::Error> for ExportError {
    fn from(e: serde_json::Error) -> Self {
        ExportError::Json(e)
    }
}

pub fn export(format: ExportFormat, records: &[Suggestion]) -> Result<ExportFile, ExportError> {
    let bytes = match format {
        ExportFormat::Csv => write_csv(&tabular_rows(records))?,
        ExportFormat::Xlsx => write_xlsx(&tabular_rows(records))?,
        ExportFormat::Pdf => write_pdf(&structured_table(records))?,
        ExportFormat::Doc => doc_text(records)?.into_bytes(),
        ExportFormat::Ppt => ppt_text(records).into_bytes(),
    };
    log::info!(
        "Exported {} suggestions to {} ({} bytes)",
        records.len(),
        format.file_name(),
        bytes.len()
    );
    Ok(ExportFile {
        file_name: format.file_name(),
        content_type: format.content_type(),
        bytes,
    })
}
