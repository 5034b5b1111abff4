//! Header-row mapping for catalog imports

use std::collections::HashMap;

use calamine::Data;

use super::ImportError;

/// Required logical columns, kept sorted so the missing-column report is too
const REQUIRED_COLUMNS: [&str; 3] = ["descricao", "secao", "titulo"];

/// Position of each logical column in the uploaded file. Built once from
/// the header row; column order in the file is irrelevant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderIndex {
    pub secao: usize,
    pub titulo: usize,
    pub descricao: usize,
    pub link: Option<usize>,
    pub ordem: Option<usize>,
    pub ativo: Option<usize>,
}

impl HeaderIndex {
    /// Map the header row's cells to column positions. Header matching is
    /// case-insensitive and whitespace-trimmed; unknown columns are ignored
    /// and a duplicated name keeps its last occurrence.
    pub fn from_header_row(cells: &[Data]) -> Result<Self, ImportError> {
        let mut positions: HashMap<String, usize> = HashMap::new();
        for (index, cell) in cells.iter().enumerate() {
            let name = header_text(cell);
            if !name.is_empty() {
                positions.insert(name, index);
            }
        }

        let missing: Vec<String> = REQUIRED_COLUMNS
            .iter()
            .filter(|name| !positions.contains_key(**name))
            .map(|name| name.to_string())
            .collect();
        if !missing.is_empty() {
            return Err(ImportError::MissingColumns { columns: missing });
        }

        Ok(Self {
            secao: positions["secao"],
            titulo: positions["titulo"],
            descricao: positions["descricao"],
            link: positions.get("link").copied(),
            ordem: positions.get("ordem").copied(),
            ativo: positions.get("ativo").copied(),
        })
    }
}

/// Header cell as normalized text; absent cells become empty text
fn header_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.trim().to_lowercase(),
        other => other.to_string().trim().to_lowercase(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cells(names: &[&str]) -> Vec<Data> {
        names.iter().map(|n| Data::String(n.to_string())).collect()
    }

    #[test]
    fn test_maps_all_columns_regardless_of_order() {
        let header = HeaderIndex::from_header_row(&cells(&[
            "ativo", "titulo", "link", "secao", "descricao", "ordem",
        ]))
        .unwrap();

        assert_eq!(header.secao, 3);
        assert_eq!(header.titulo, 1);
        assert_eq!(header.descricao, 4);
        assert_eq!(header.link, Some(2));
        assert_eq!(header.ordem, Some(5));
        assert_eq!(header.ativo, Some(0));
    }

    #[test]
    fn test_trims_and_lowercases_header_names() {
        let header =
            HeaderIndex::from_header_row(&cells(&["  SECAO ", "Titulo", "DESCRICAO"])).unwrap();
        assert_eq!(header.secao, 0);
        assert_eq!(header.link, None);
        assert_eq!(header.ordem, None);
        assert_eq!(header.ativo, None);
    }

    #[test]
    fn test_unknown_columns_are_ignored() {
        let header = HeaderIndex::from_header_row(&cells(&[
            "secao", "observacao", "titulo", "descricao",
        ]))
        .unwrap();
        assert_eq!(header.titulo, 2);
    }

    #[test]
    fn test_missing_columns_reported_sorted() {
        let err = HeaderIndex::from_header_row(&cells(&["titulo"])).err().unwrap();
        assert_eq!(
            err,
            ImportError::MissingColumns {
                columns: vec!["descricao".to_string(), "secao".to_string()],
            }
        );
    }

    #[test]
    fn test_empty_header_row_misses_everything() {
        let err = HeaderIndex::from_header_row(&[]).err().unwrap();
        assert_eq!(
            err.to_string(),
            "missing required columns: descricao, secao, titulo"
        );
    }

    #[test]
    fn test_duplicate_header_keeps_last_occurrence() {
        let header = HeaderIndex::from_header_row(&cells(&[
            "secao", "titulo", "descricao", "titulo",
        ]))
        .unwrap();
        assert_eq!(header.titulo, 3);
    }
}
