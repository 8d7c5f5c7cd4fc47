//! Puzzle catalog: categories of puzzles, each played as one sequence
//!
//! A default catalog is embedded at build time. A JSON file with the same
//! shape can replace it at startup.

use crate::game::puzzle::{PuzzleDescriptor, PuzzleSequence};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;
use tracing::error;

/// Embedded default catalog
static CATALOG_DATA: &str = include_str!("../data/puzzles.json");

static EMBEDDED: Lazy<Catalog> = Lazy::new(|| {
    Catalog::from_json(CATALOG_DATA).unwrap_or_else(|e| {
        error!(error = %e, "embedded catalog is invalid");
        Catalog::default()
    })
});

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("could not read catalog: {0}")]
    Io(#[from] std::io::Error),
    #[error("could not parse catalog: {0}")]
    Parse(#[from] serde_json::Error),
}

/// A named, ordered group of puzzles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    #[serde(alias = "category")]
    pub name: String,
    #[serde(default)]
    pub items: Vec<PuzzleDescriptor>,
}

impl Category {
    /// The category as a sequence positioned at `index`.
    pub fn sequence(&self, index: usize) -> PuzzleSequence {
        PuzzleSequence::new(self.items.clone(), index)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    pub categories: Vec<Category>,
}

impl Catalog {
    /// The catalog shipped with the binary.
    pub fn embedded() -> &'static Catalog {
        &EMBEDDED
    }

    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Category> {
        self.categories.get(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_catalog_parses() {
        let catalog = Catalog::embedded();
        assert!(!catalog.is_empty());
        for category in &catalog.categories {
            assert!(!category.items.is_empty(), "{} has no items", category.name);
            for item in &category.items {
                assert!(!item.id.is_empty());
                assert!(!item.letters().is_empty(), "{} has no word", item.id);
            }
        }
    }

    #[test]
    fn test_embedded_ids_unique() {
        let mut ids: Vec<_> = Catalog::embedded()
            .categories
            .iter()
            .flat_map(|c| c.items.iter().map(|i| i.id.clone()))
            .collect();
        let total = ids.len();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), total);
    }

    #[test]
    fn test_category_alias_and_defaults() {
        let catalog = Catalog::from_json(
            r#"{"categories": [{"category": "Birds", "items": [{"id": 1, "name": "owl"}]}, {"name": "Empty"}]}"#,
        )
        .unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.categories[0].name, "Birds");
        assert_eq!(catalog.categories[0].items[0].word, "owl");
        assert!(catalog.categories[1].items.is_empty());
    }

    #[test]
    fn test_sequence_from_category() {
        let category = Category {
            name: "Pets".into(),
            items: vec![PuzzleDescriptor::new("1", "cat"), PuzzleDescriptor::new("2", "dog")],
        };
        let seq = category.sequence(1);
        assert_eq!(seq.index(), 1);
        assert_eq!(seq.len(), 2);
    }

    #[test]
    fn test_malformed_catalog() {
        assert!(matches!(
            Catalog::from_json("[1, 2"),
            Err(CatalogError::Parse(_))
        ));
        assert!(matches!(
            Catalog::load(Path::new("/definitely/not/here.json")),
            Err(CatalogError::Io(_))
        ));
    }
}
