//! Catalog statistics.
//!
//! A quick summary of what the last build indexed: category and page
//! counts, a per-category breakdown, and the most used tags. Used by
//! `qref stats` to sanity-check a build before publishing.

use anyhow::{bail, Result};
use std::collections::HashMap;
use std::path::Path;

use crate::export::load_catalog;
use crate::models::Catalog;

/// Number of tags listed in the summary.
const TOP_TAGS: usize = 10;

/// Tag usage counts, most used first, ties broken alphabetically.
/// Category-id tags are counted like any other.
pub fn tag_counts(catalog: &Catalog) -> Vec<(String, usize)> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for item in catalog.categories.iter().flat_map(|c| c.items.iter()) {
        for tag in &item.tags {
            *counts.entry(tag.as_str()).or_insert(0) += 1;
        }
    }

    let mut sorted: Vec<(String, usize)> = counts
        .into_iter()
        .map(|(tag, n)| (tag.to_string(), n))
        .collect();
    sorted.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    sorted
}

/// Run the stats command: load the index and print a summary.
pub fn run_stats(index: &Path) -> Result<()> {
    let catalog = load_catalog(index)?;

    if !catalog.is_consistent() {
        bail!(
            "index {} is inconsistent: total_items is {} but categories hold {} items",
            index.display(),
            catalog.total_items,
            catalog.counted_items()
        );
    }

    let size = std::fs::metadata(index).map(|m| m.len()).unwrap_or(0);

    println!("QuickRef — Index Stats");
    println!("======================");
    println!();
    println!("  Index:       {}", index.display());
    println!("  Size:        {}", format_bytes(size));
    println!("  Generated:   {}", format_generated(&catalog.generated));
    println!();
    println!("  Categories:  {}", catalog.categories.len());
    println!("  Pages:       {}", catalog.total_items);

    if !catalog.categories.is_empty() {
        println!();
        println!("  {:<20} {:<24} {:>6}", "CATEGORY", "NAME", "PAGES");
        println!("  {}", "-".repeat(52));
        for category in &catalog.categories {
            println!(
                "  {:<20} {:<24} {:>6}",
                category.id,
                category.name,
                category.items.len()
            );
        }
    }

    let tags = tag_counts(&catalog);
    if !tags.is_empty() {
        println!();
        println!("  Top tags:");
        for (tag, n) in tags.iter().take(TOP_TAGS) {
            println!("    {:<24} {:>6}", tag, n);
        }
    }

    Ok(())
}

/// Format a byte count as a human-readable string.
fn format_bytes(bytes: u64) -> String {
    if bytes < 1024 {
        format!("{} B", bytes)
    } else if bytes < 1024 * 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    }
}

/// The raw timestamp followed by how long ago it was, when it parses.
fn format_generated(generated: &str) -> String {
    match chrono::DateTime::parse_from_rfc3339(generated) {
        Ok(ts) => format!("{} ({})", generated, format_ts_relative(ts.timestamp())),
        Err(_) => generated.to_string(),
    }
}

fn format_ts_relative(ts: i64) -> String {
    let delta = chrono::Utc::now().timestamp() - ts;

    if delta < 0 {
        "in the future".to_string()
    } else if delta < 60 {
        "just now".to_string()
    } else if delta < 3600 {
        let mins = delta / 60;
        format!("{} min{} ago", mins, if mins == 1 { "" } else { "s" })
    } else if delta < 86400 {
        let hours = delta / 3600;
        format!("{} hour{} ago", hours, if hours == 1 { "" } else { "s" })
    } else {
        let days = delta / 86400;
        format!("{} day{} ago", days, if days == 1 { "" } else { "s" })
    }
}
