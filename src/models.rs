//! Core data models for the quick reference catalog.
//!
//! These types are the on-disk shape of `structure.json`. Field order is the
//! serialized key order, so do not reorder fields.

use serde::{Deserialize, Serialize};

/// The full generated index: every non-empty category plus totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    pub categories: Vec<Category>,
    /// RFC 3339 timestamp of when the catalog was built.
    pub generated: String,
    pub total_items: usize,
}

/// A grouping of reference sheets, one per content sub-directory
/// (or the synthetic `general` bucket for root-level pages).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
    pub description: String,
    pub items: Vec<Item>,
}

/// Metadata extracted from a single reference page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// File name without the extension.
    pub id: String,
    pub name: String,
    pub description: String,
    /// Deduplicated, first-occurrence order. Always starts with the owning
    /// category id.
    pub tags: Vec<String>,
    /// Path relative to the content root.
    pub file: String,
}

impl Catalog {
    /// Assemble a catalog, computing `total_items` from the categories.
    pub fn new(categories: Vec<Category>, generated: String) -> Self {
        let total_items = categories.iter().map(|c| c.items.len()).sum();
        Self {
            categories,
            generated,
            total_items,
        }
    }

    /// An empty catalog, used when the content root does not exist.
    pub fn empty(generated: String) -> Self {
        Self::new(Vec::new(), generated)
    }

    /// Sum of item counts across categories.
    pub fn counted_items(&self) -> usize {
        self.categories.iter().map(|c| c.items.len()).sum()
    }

    /// Whether `total_items` agrees with the categories it summarizes.
    pub fn is_consistent(&self) -> bool {
        self.total_items == self.counted_items()
    }
}
