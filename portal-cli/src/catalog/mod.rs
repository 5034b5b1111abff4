//! Catalog domain model for portal information entries

pub mod repository;

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Canonical catalog sections. These four codes are the only section values
/// ever persisted; free-text labels are normalized before they get here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Section {
    Financeiros,
    Prestacao,
    Contratacoes,
    Politicas,
}

impl Section {
    pub const ALL: [Section; 4] = [
        Section::Financeiros,
        Section::Prestacao,
        Section::Contratacoes,
        Section::Politicas,
    ];

    /// Stable code stored in the database and shown in exports
    pub fn code(&self) -> &'static str {
        match self {
            Section::Financeiros => "FINANCEIROS",
            Section::Prestacao => "PRESTACAO",
            Section::Contratacoes => "CONTRATACOES",
            Section::Politicas => "POLITICAS",
        }
    }

    /// Human-readable display name
    pub fn label(&self) -> &'static str {
        match self {
            Section::Financeiros => "Relatórios Financeiros",
            Section::Prestacao => "Prestação de Contas",
            Section::Contratacoes => "Contratações",
            Section::Politicas => "Políticas e Regulamentos",
        }
    }

    /// Parse a stored section code (exact match, no alias handling)
    pub fn from_code(code: &str) -> Option<Section> {
        match code {
            "FINANCEIROS" => Some(Section::Financeiros),
            "PRESTACAO" => Some(Section::Prestacao),
            "CONTRATACOES" => Some(Section::Contratacoes),
            "POLITICAS" => Some(Section::Politicas),
            _ => None,
        }
    }
}

impl std::fmt::Display for Section {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A validated entry ready to be inserted into the catalog
#[derive(Debug, Clone, PartialEq)]
pub struct NewEntry {
    pub section: Section,
    pub title: String,
    pub description: String,
    /// Optional external URL; `None` when the source cell was empty
    pub link: Option<String>,
    /// Non-negative position within the section
    pub order: i64,
    pub active: bool,
}

/// A persisted catalog entry
#[derive(Debug, Clone, Serialize)]
pub struct PortalEntry {
    pub id: String,
    pub section: Section,
    pub title: String,
    pub description: String,
    pub link: Option<String>,
    pub order: i64,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
