//! Normalization of human-entered section labels
//!
//! Staff type section names by hand, with and without diacritics and in
//! mixed case. The alias table absorbs the known spellings; anything else
//! is rejected by the row validator rather than defaulted.

use std::collections::HashMap;

use once_cell::sync::Lazy;

use crate::catalog::Section;

/// Accepted spellings, uppercased, per canonical section code
static SECTION_ALIASES: Lazy<HashMap<&'static str, Section>> = Lazy::new(|| {
    HashMap::from([
        ("FINANCEIROS", Section::Financeiros),
        ("FINANCEIRO", Section::Financeiros),
        ("PRESTACAO", Section::Prestacao),
        ("PRESTAÇÃO", Section::Prestacao),
        ("CONTRATACOES", Section::Contratacoes),
        ("CONTRATAÇÕES", Section::Contratacoes),
        ("POLITICAS", Section::Politicas),
        ("POLÍTICAS", Section::Politicas),
    ])
});

/// Map an arbitrary label to its canonical section, or `None` when the
/// label is not a known spelling
pub fn normalize_section(label: &str) -> Option<Section> {
    SECTION_ALIASES
        .get(label.trim().to_uppercase().as_str())
        .copied()
}
