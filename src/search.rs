//! Substring search over a generated catalog.
//!
//! Mirrors the live filter on the static site: a case-insensitive substring
//! match against an item's name, description and tags. An empty query shows
//! everything; no match is an empty result, not an error.

use anyhow::Result;
use std::path::Path;

use crate::export::load_catalog;
use crate::models::{Catalog, Category, Item};

/// Whether `item` matches an already-lowercased, trimmed `needle`.
fn item_matches(item: &Item, needle: &str) -> bool {
    item.name.to_lowercase().contains(needle)
        || item.description.to_lowercase().contains(needle)
        || item.tags.iter().any(|t| t.to_lowercase().contains(needle))
}

/// Filter a catalog down to matching items.
///
/// Categories with no matching item are dropped and `total_items` is
/// recomputed for the filtered view. The `generated` timestamp is kept.
pub fn search_catalog(catalog: &Catalog, query: &str) -> Catalog {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return catalog.clone();
    }

    let categories = catalog
        .categories
        .iter()
        .filter_map(|category| {
            let items: Vec<Item> = category
                .items
                .iter()
                .filter(|item| item_matches(item, &needle))
                .cloned()
                .collect();
            if items.is_empty() {
                None
            } else {
                Some(Category {
                    items,
                    ..category.clone()
                })
            }
        })
        .collect();

    Catalog::new(categories, catalog.generated.clone())
}

/// `qref search`: load the index, filter it, print the hits.
pub fn run_search(index: &Path, query: &str, json: bool) -> Result<()> {
    let catalog = load_catalog(index)?;
    let hits = search_catalog(&catalog, query);

    if json {
        println!("{}", serde_json::to_string_pretty(&hits)?);
        return Ok(());
    }

    if hits.total_items == 0 {
        println!("No results.");
        return Ok(());
    }

    for category in &hits.categories {
        for item in &category.items {
            println!(
                "{}/{}  {} — {} [{}]",
                category.id,
                item.id,
                item.name,
                item.description,
                item.tags.join(", ")
            );
        }
    }
    eprintln!("{} result(s)", hits.total_items);

    Ok(())
}
