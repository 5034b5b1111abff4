//! Spreadsheet access for catalog imports
//!
//! Wraps a calamine workbook opened from any `Read + Seek` source and
//! exposes the first sheet as a header row plus a lazy sequence of data
//! rows. Rows are fixed-width: every row spans the sheet range's columns.

use std::io::{Read, Seek};

use calamine::{Data, Range, Reader, Xlsx};

use super::ImportError;

pub struct Spreadsheet {
    range: Range<Data>,
}

impl Spreadsheet {
    /// Open a binary payload as an xlsx workbook and select its first sheet.
    /// Fails with a format error before any row is examined.
    pub fn open<R: Read + Seek>(reader: R) -> Result<Self, ImportError> {
        let mut workbook = Xlsx::new(reader).map_err(|e| ImportError::UnreadableWorkbook {
            message: e.to_string(),
        })?;

        let range = workbook
            .worksheet_range_at(0)
            .ok_or_else(|| ImportError::UnreadableWorkbook {
                message: "workbook has no sheets".to_string(),
            })?
            .map_err(|e| ImportError::UnreadableWorkbook {
                message: e.to_string(),
            })?;

        Ok(Self { range })
    }

    /// Cells of the first row, for header extraction. Empty sheet gives an
    /// empty slice, which the header mapper reports as missing columns.
    pub fn header_row(&self) -> &[Data] {
        self.range.rows().next().unwrap_or(&[])
    }

    /// Remaining rows paired with their 1-based position in the file.
    /// The header counts as row 1, so data starts at row 2.
    pub fn data_rows(&self) -> impl Iterator<Item = (u32, &[Data])> {
        self.range
            .rows()
            .skip(1)
            .zip(2u32..)
            .map(|(cells, number)| (number, cells))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn workbook_with_rows(rows: &[&[&str]]) -> Cursor<Vec<u8>> {
        let mut workbook = rust_xlsxwriter::Workbook::new();
        let sheet = workbook.add_worksheet();
        for (r, row) in rows.iter().enumerate() {
            for (c, text) in row.iter().enumerate() {
                sheet.write_string(r as u32, c as u16, *text).unwrap();
            }
        }
        Cursor::new(workbook.save_to_buffer().unwrap())
    }

    #[test]
    fn test_header_and_data_rows() {
        let source = workbook_with_rows(&[
            &["secao", "titulo"],
            &["FINANCEIROS", "Relatorio"],
            &["PRESTACAO", "Contas"],
        ]);
        let spreadsheet = Spreadsheet::open(source).unwrap();

        assert_eq!(spreadsheet.header_row().len(), 2);
        let numbers: Vec<u32> = spreadsheet.data_rows().map(|(n, _)| n).collect();
        assert_eq!(numbers, [2, 3]);
    }

    #[test]
    fn test_rejects_non_spreadsheet_payload() {
        let err = Spreadsheet::open(Cursor::new(b"definitely not a workbook".to_vec()))
            .err()
            .unwrap();
        assert!(matches!(err, ImportError::UnreadableWorkbook { .. }));
    }
}
