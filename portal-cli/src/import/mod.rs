//! Bulk spreadsheet import for the portal catalog
//!
//! Staff upload an `.xlsx` file whose first sheet carries a header row with
//! the required columns `secao`, `titulo`, `descricao` and the optional
//! columns `link`, `ordem`, `ativo`. Every non-blank data row becomes one
//! catalog entry. The whole file is one atomic batch: the first invalid
//! row (or any storage failure) rolls back everything already staged, so a
//! malformed upload never leaves a half-populated catalog behind.

pub mod header;
pub mod row;
pub mod section;
pub mod workbook;

use std::io::{Read, Seek};

use anyhow::{Context, Result};
use sqlx::SqlitePool;

use crate::catalog::repository;

pub use header::HeaderIndex;
pub use section::normalize_section;
pub use workbook::Spreadsheet;

/// Terminal failure of one import call. Format and header errors occur
/// before any row is read; the row-level kinds name the offending 1-based
/// row (the header is row 1) and the raw value that failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportError {
    UnreadableWorkbook { message: String },
    MissingColumns { columns: Vec<String> },
    InvalidSection { row: u32, label: String },
    MissingRequiredFields { row: u32 },
    InvalidOrder { row: u32, value: String },
}

impl std::fmt::Display for ImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ImportError::UnreadableWorkbook { message } => {
                write!(f, "file is not a readable .xlsx spreadsheet: {}", message)
            }
            ImportError::MissingColumns { columns } => {
                write!(f, "missing required columns: {}", columns.join(", "))
            }
            ImportError::InvalidSection { row, label } => {
                write!(f, "invalid section at row {}: {}", row, label)
            }
            ImportError::MissingRequiredFields { row } => {
                write!(f, "title and description are required at row {}", row)
            }
            ImportError::InvalidOrder { row, value } => {
                write!(f, "invalid order at row {}: {}", row, value)
            }
        }
    }
}

impl std::error::Error for ImportError {}

/// Outcome of a successful import
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportReport {
    /// Catalog entries created, one per non-blank data row
    pub created: u64,
    /// Fully blank rows that were skipped without error
    pub skipped_blank: u64,
}

/// Import every data row of the spreadsheet into the catalog.
///
/// Header validation, per-row validation and all inserts run inside a
/// single transaction; any failure rolls the whole batch back and the
/// error names the failing row. On success the report's `created` count
/// equals the number of non-blank data rows.
pub async fn import_spreadsheet<R: Read + Seek>(
    source: R,
    pool: &SqlitePool,
) -> Result<ImportReport> {
    let spreadsheet = Spreadsheet::open(source)?;
    let header = HeaderIndex::from_header_row(spreadsheet.header_row())?;

    let mut tx = pool
        .begin()
        .await
        .context("Failed to begin import transaction")?;
    let mut report = ImportReport::default();

    for (row_number, cells) in spreadsheet.data_rows() {
        let Some(entry) = row::normalize_row(cells, &header, row_number)? else {
            log::debug!("row {} is blank, skipping", row_number);
            report.skipped_blank += 1;
            continue;
        };

        repository::insert_entry(&mut tx, &entry)
            .await
            .with_context(|| format!("Failed to store entry from row {}", row_number))?;
        report.created += 1;
    }

    // Errors above drop the transaction, which rolls back every insert
    tx.commit()
        .await
        .context("Failed to commit import transaction")?;

    log::info!(
        "imported {} catalog entries ({} blank rows skipped)",
        report.created,
        report.skipped_blank
    );
    Ok(report)
}
