//! Persist the catalog as `structure.json` for the static site.
//!
//! The browser scripts fetch this file and render category sections and
//! cards from it, so its shape is the public contract of this crate.

use anyhow::{bail, Context, Result};
use std::path::Path;

use crate::models::Catalog;

/// Render a catalog as pretty-printed JSON (two-space indent, trailing
/// newline). Refuses a catalog whose `total_items` disagrees with its
/// categories.
pub fn render_catalog(catalog: &Catalog) -> Result<String> {
    if !catalog.is_consistent() {
        bail!(
            "catalog total_items is {} but categories hold {} items",
            catalog.total_items,
            catalog.counted_items()
        );
    }
    let mut json = serde_json::to_string_pretty(catalog)?;
    json.push('\n');
    Ok(json)
}

/// Write the catalog to `path`, replacing any previous content.
///
/// The parent directory is created if needed. The JSON is fully rendered
/// before the file is touched.
pub fn write_catalog(catalog: &Catalog, path: &Path) -> Result<()> {
    let json = render_catalog(catalog)?;

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }
    }
    std::fs::write(path, json)
        .with_context(|| format!("Failed to write index: {}", path.display()))?;
    Ok(())
}

/// Load a previously written catalog.
pub fn load_catalog(path: &Path) -> Result<Catalog> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read index: {}", path.display()))?;
    let catalog: Catalog = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse index: {}", path.display()))?;
    Ok(catalog)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, Item};
    use tempfile::TempDir;

    fn sample() -> Catalog {
        Catalog::new(
            vec![Category {
                id: "linux".into(),
                name: "Linux".into(),
                description: "Linux commands and utilities".into(),
                items: vec![Item {
                    id: "grep".into(),
                    name: "Grep".into(),
                    description: "Grep reference sheet".into(),
                    tags: vec!["linux".into()],
                    file: "linux/grep.html".into(),
                }],
            }],
            "2024-05-01T12:00:00.000Z".into(),
        )
    }

    #[test]
    fn writes_and_reloads() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("data").join("structure.json");

        write_catalog(&sample(), &path).unwrap();
        let loaded = load_catalog(&path).unwrap();
        assert_eq!(loaded, sample());
    }

    #[test]
    fn output_is_pretty_printed() {
        let json = render_catalog(&sample()).unwrap();
        assert!(json.starts_with("{\n  \"categories\": ["));
        assert!(json.ends_with("}\n"));
        assert!(json.contains("\n  \"total_items\": 1\n"));
    }

    #[test]
    fn overwrites_previous_content() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("structure.json");
        std::fs::write(&path, "x".repeat(10_000)).unwrap();

        write_catalog(&Catalog::empty("t".into()), &path).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(!content.contains("xxx"));
        assert!(content.contains("\"total_items\": 0"));
    }

    #[test]
    fn inconsistent_catalog_not_written() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("structure.json");
        let mut catalog = sample();
        catalog.total_items = 7;

        let err = write_catalog(&catalog, &path).unwrap_err();
        assert!(err.to_string().contains("total_items"));
        assert!(!path.exists());
    }

    #[test]
    fn load_rejects_garbage() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("structure.json");
        std::fs::write(&path, "{not json").unwrap();
        assert!(load_catalog(&path).is_err());
    }
}
