//! Per-row normalization and validation
//!
//! Each data row either becomes a [`NewEntry`], is skipped when fully
//! blank, or fails with an error naming its 1-based row number. The first
//! invalid field wins; later fields are not inspected.

use std::collections::HashSet;

use calamine::Data;
use once_cell::sync::Lazy;

use crate::catalog::NewEntry;

use super::ImportError;
use super::header::HeaderIndex;
use super::section::normalize_section;

/// Tokens that mark an entry as active, matched case-insensitively.
/// An absent cell also counts as active; any other text does not.
static TRUTHY_TOKENS: Lazy<HashSet<&'static str>> =
    Lazy::new(|| HashSet::from(["1", "true", "sim", "s", "yes", "y", "ativo"]));

/// Validate one data row. `Ok(None)` means the row was fully blank and is
/// skipped without counting toward the created total.
pub fn normalize_row(
    cells: &[Data],
    header: &HeaderIndex,
    row_number: u32,
) -> Result<Option<NewEntry>, ImportError> {
    if is_blank(cells) {
        return Ok(None);
    }

    let raw_section = text_at(cells, header.secao);
    let section = raw_section
        .as_deref()
        .and_then(normalize_section)
        .ok_or_else(|| ImportError::InvalidSection {
            row: row_number,
            label: raw_section.clone().unwrap_or_default(),
        })?;

    let title = trimmed_text_at(cells, header.titulo).unwrap_or_default();
    let description = trimmed_text_at(cells, header.descricao).unwrap_or_default();
    if title.is_empty() || description.is_empty() {
        return Err(ImportError::MissingRequiredFields { row: row_number });
    }

    let link = header
        .link
        .and_then(|index| trimmed_text_at(cells, index))
        .filter(|text| !text.is_empty());

    let order = match header.ordem {
        Some(index) => parse_order(cells.get(index), row_number)?,
        None => 0,
    };

    let active = match header.ativo {
        Some(index) => parse_active(cells.get(index)),
        None => true,
    };

    Ok(Some(NewEntry {
        section,
        title,
        description,
        link,
        order,
        active,
    }))
}

/// A row is blank when every cell is absent or empty after trimming
fn is_blank(cells: &[Data]) -> bool {
    cells
        .iter()
        .all(|cell| cell_text(cell).is_none_or(|text| text.trim().is_empty()))
}

/// Text content of a cell, or `None` when the cell is absent.
/// Whole-number floats render without the trailing fraction so numeric
/// titles and order values read the way they were typed.
fn cell_text(cell: &Data) -> Option<String> {
    match cell {
        Data::Empty | Data::Error(_) => None,
        Data::String(s) => Some(s.clone()),
        Data::Bool(b) => Some(b.to_string()),
        Data::Int(i) => Some(i.to_string()),
        Data::Float(f) => {
            if f.fract() == 0.0 && *f >= i64::MIN as f64 && *f <= i64::MAX as f64 {
                Some((*f as i64).to_string())
            } else {
                Some(f.to_string())
            }
        }
        Data::DateTime(dt) => Some(dt.to_string()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => Some(s.clone()),
    }
}

fn text_at(cells: &[Data], index: usize) -> Option<String> {
    cells.get(index).and_then(cell_text)
}

fn trimmed_text_at(cells: &[Data], index: usize) -> Option<String> {
    text_at(cells, index).map(|text| text.trim().to_string())
}

/// Parse the optional `ordem` cell into a non-negative position.
/// Absent column handling is the caller's; an absent or empty cell is 0.
fn parse_order(cell: Option<&Data>, row: u32) -> Result<i64, ImportError> {
    let Some(cell) = cell else {
        return Ok(0);
    };

    match cell {
        Data::Empty => Ok(0),
        Data::Int(i) if *i >= 0 => Ok(*i),
        Data::Float(f) if f.is_finite() && f.trunc() >= 0.0 && f.trunc() <= i64::MAX as f64 => {
            Ok(f.trunc() as i64)
        }
        Data::String(s) if s.trim().is_empty() => Ok(0),
        Data::String(s) => s
            .trim()
            .parse::<i64>()
            .ok()
            .filter(|n| *n >= 0)
            .ok_or_else(|| ImportError::InvalidOrder {
                row,
                value: s.trim().to_string(),
            }),
        other => Err(ImportError::InvalidOrder {
            row,
            value: cell_text(other).unwrap_or_default(),
        }),
    }
}

/// Coerce the optional `ativo` cell. Boolean cells pass through, absent
/// cells default to active, and text goes through the truthy-token set.
fn parse_active(cell: Option<&Data>) -> bool {
    match cell {
        None | Some(Data::Empty) => true,
        Some(Data::Bool(b)) => *b,
        Some(other) => {
            let text = cell_text(other).unwrap_or_default();
            TRUTHY_TOKENS.contains(text.trim().to_lowercase().as_str())
        }
    }
}
