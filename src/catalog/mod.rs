//! Fixed reference list of known problems, read from a CSV export with at
//! least the columns `Title, Difficulty, Question Type, Leetcode Question Link`.

pub mod matcher;

use std::io::Read;
use std::path::Path;
use serde::{Deserialize, Serialize};
use crate::error::CoachError;

pub use matcher::{find_by_fuzzy_title, CatalogMatch, FALLBACK_LINK};

const TITLE_COLUMN: &str = "Title";
const DIFFICULTY_COLUMN: &str = "Difficulty";
const TYPE_COLUMN: &str = "Question Type";
const LINK_COLUMN: &str = "Leetcode Question Link";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub title: String,
    /// Raw catalog value; exports are not consistent about casing
    pub difficulty: String,
    pub question_type: String,
    pub link: String,
}

impl CatalogEntry {
    pub fn new(title: &str, difficulty: &str, question_type: &str, link: &str) -> Self {
        CatalogEntry {
            title: title.to_string(),
            difficulty: difficulty.to_string(),
            question_type: question_type.to_string(),
            link: link.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
}

impl Catalog {
    pub fn from_entries(entries: Vec<CatalogEntry>) -> Self {
        Catalog { entries }
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Read the catalog file. Called on every invocation; nothing is cached.
    pub fn load(path: &Path) -> Result<Self, CoachError> {
        let file = std::fs::File::open(path).map_err(|e| {
            CoachError::storage(format!("Failed to open catalog: {}", e))
                .with_context(format!("path: {:?}", path))
        })?;
        let catalog = Self::from_reader(file)
            .map_err(|e| e.with_context(format!("path: {:?}", path)))?;
        tracing::debug!(path = ?path, entries = catalog.len(), "Catalog loaded");
        Ok(catalog)
    }

    /// Parse CSV content. Missing required columns fail the whole load;
    /// a malformed row is skipped with a warning.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, CoachError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers = csv_reader.headers()?.clone();
        let column = |name: &str| headers.iter().position(|h| h.trim() == name);

        let title_idx = column(TITLE_COLUMN)
            .ok_or_else(|| CoachError::storage(format!("Catalog is missing the '{}' column", TITLE_COLUMN)))?;
        let link_idx = column(LINK_COLUMN)
            .ok_or_else(|| CoachError::storage(format!("Catalog is missing the '{}' column", LINK_COLUMN)))?;
        let difficulty_idx = column(DIFFICULTY_COLUMN);
        let type_idx = column(TYPE_COLUMN);

        let mut entries = Vec::new();
        for (row, record) in csv_reader.records().enumerate() {
            let record = match record {
                Ok(record) => record,
                Err(e) => {
                    tracing::warn!(row = row + 1, error = %e, "Skipping unreadable catalog row");
                    continue;
                }
            };
            let field = |idx: Option<usize>| idx.and_then(|i| record.get(i)).unwrap_or("").to_string();

            let title = field(Some(title_idx));
            let link = field(Some(link_idx));
            if title.is_empty() || link.is_empty() {
                tracing::warn!(row = row + 1, "Skipping catalog row without title or link");
                continue;
            }

            entries.push(CatalogEntry {
                title,
                difficulty: field(difficulty_idx),
                question_type: field(type_idx),
                link,
            });
        }

        Ok(Catalog { entries })
    }
}
