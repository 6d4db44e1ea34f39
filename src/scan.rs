//! The index builder: walk the content root and assemble a [`Catalog`].
//!
//! Layout expected under the root:
//!
//! ```text
//! pages/
//! ├── readme.html          → category "general", file "readme.html"
//! └── linux/
//!     └── grep.html        → category "linux",   file "linux/grep.html"
//! ```
//!
//! Only direct children are considered: pages inside nested
//! sub-directories (`pages/linux/more/x.html`) are not indexed. Entries are
//! visited in file-name order so repeated builds of an unchanged tree give
//! the same catalog.
//!
//! Root-level pages always go into the synthetic `general` category. A
//! sub-directory that is itself named `general` is indexed as an ordinary
//! category, so the catalog then holds two categories with id `general`:
//! the synthetic one first, the directory one in its scan position.
//!
//! File and directory names must be valid UTF-8, since they become item ids
//! and recorded paths. Any other name is reported as an unreadable entry.

use anyhow::{bail, Context, Result};
use chrono::{SecondsFormat, Utc};
use globset::{GlobBuilder, GlobMatcher};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::categories::{
    category_description, display_name, GENERAL_DESCRIPTION, GENERAL_ID, GENERAL_NAME,
};
use crate::config::{IndexConfig, DEFAULT_INCLUDE_GLOB};
use crate::extract::extract_item;
use crate::models::{Catalog, Category, Item};
use crate::progress::{NoProgress, ScanProgressEvent, ScanProgressReporter};

/// Scan options derived from `[index]` config.
pub struct ScanOptions {
    page_matcher: GlobMatcher,
}

impl ScanOptions {
    pub fn new(include_glob: &str) -> Result<Self> {
        let page_matcher = GlobBuilder::new(include_glob)
            .case_insensitive(true)
            .literal_separator(true)
            .build()
            .with_context(|| format!("Invalid page glob: '{}'", include_glob))?
            .compile_matcher();
        Ok(Self { page_matcher })
    }

    pub fn from_config(config: &IndexConfig) -> Result<Self> {
        Self::new(&config.include_glob)
    }

    fn is_page(&self, file_name: &str) -> bool {
        self.page_matcher.is_match(file_name)
    }
}

/// Build a catalog of `root` with the default `*.html` rule and no progress
/// output.
pub fn build_catalog(root: &Path) -> Result<Catalog> {
    let options = ScanOptions::new(DEFAULT_INCLUDE_GLOB)?;
    build_catalog_with(root, &options, &NoProgress)
}

/// Build a catalog of `root`.
///
/// A missing root yields an empty catalog. Any directory that cannot be
/// listed or page that cannot be read aborts the whole build.
pub fn build_catalog_with(
    root: &Path,
    options: &ScanOptions,
    progress: &dyn ScanProgressReporter,
) -> Result<Catalog> {
    let generated = now_timestamp();

    if !root.is_dir() {
        progress.report(ScanProgressEvent::MissingRoot {
            root: root.to_path_buf(),
        });
        return Ok(Catalog::empty(generated));
    }

    let entries = list_dir(root)?;

    let mut categories: Vec<Category> = Vec::new();
    for (name, path) in entries.iter().filter(|(_, p)| p.is_dir()) {
        progress.report(ScanProgressEvent::Scanning {
            category: name.clone(),
        });
        let category = scan_category(name, path, options, progress)?;
        if !category.items.is_empty() {
            categories.push(category);
        }
    }

    let root_pages: Vec<&(String, PathBuf)> = entries
        .iter()
        .filter(|(name, path)| path.is_file() && options.is_page(name))
        .collect();
    if !root_pages.is_empty() {
        progress.report(ScanProgressEvent::Scanning {
            category: GENERAL_ID.to_string(),
        });
        let items = root_pages
            .into_iter()
            .map(|(name, path)| read_item(path, name, GENERAL_ID, name.clone(), progress))
            .collect::<Result<Vec<Item>>>()?;
        let general = Category {
            id: GENERAL_ID.to_string(),
            name: GENERAL_NAME.to_string(),
            description: GENERAL_DESCRIPTION.to_string(),
            items,
        };
        categories.insert(0, general);
    }

    let catalog = Catalog::new(categories, generated);
    progress.report(ScanProgressEvent::Done {
        categories: catalog.categories.len(),
        items: catalog.total_items,
    });
    Ok(catalog)
}

fn scan_category(
    id: &str,
    dir: &Path,
    options: &ScanOptions,
    progress: &dyn ScanProgressReporter,
) -> Result<Category> {
    let items = list_dir(dir)?
        .into_iter()
        .filter(|(name, path)| path.is_file() && options.is_page(name))
        .map(|(name, path)| {
            let file = format!("{}/{}", id, name);
            read_item(&path, &name, id, file, progress)
        })
        .collect::<Result<Vec<Item>>>()?;

    Ok(Category {
        id: id.to_string(),
        name: display_name(id),
        description: category_description(id),
        items,
    })
}

fn read_item(
    path: &Path,
    file_name: &str,
    category_id: &str,
    file: String,
    progress: &dyn ScanProgressReporter,
) -> Result<Item> {
    let bytes =
        std::fs::read(path).with_context(|| format!("Failed to read page: {}", path.display()))?;
    let content = String::from_utf8_lossy(&bytes);
    let item = extract_item(&content, file_name, category_id, file);
    progress.report(ScanProgressEvent::Extracted {
        file: item.file.clone(),
    });
    Ok(item)
}

/// Immediate children of `dir` as `(file name, path)`, sorted by name.
/// Symlinks are followed so a linked category directory is indexed.
fn list_dir(dir: &Path) -> Result<Vec<(String, PathBuf)>> {
    let walker = WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by_file_name();

    let mut entries = Vec::new();
    for entry in walker {
        let entry = entry.with_context(|| format!("Failed to list directory: {}", dir.display()))?;
        let name = match entry.file_name().to_str() {
            Some(name) => name.to_string(),
            None => bail!(
                "Entry name is not valid UTF-8: {}",
                entry.path().display()
            ),
        };
        entries.push((name, entry.into_path()));
    }
    Ok(entries)
}

fn now_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
    }

    const GREP: &str = r#"<h1 class="ref-title">Grep Cheatsheet</h1>
<div class="ref-tags"><span class="ref-tag">regex</span></div>"#;

    #[test]
    fn missing_root_is_empty_catalog() {
        let tmp = TempDir::new().unwrap();
        let catalog = build_catalog(&tmp.path().join("nope")).unwrap();
        assert!(catalog.categories.is_empty());
        assert_eq!(catalog.total_items, 0);
        assert!(!catalog.generated.is_empty());
    }

    #[test]
    fn general_category_first_with_bare_paths() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "linux/grep.html", GREP);
        write(tmp.path(), "readme.html", "<p>nothing here</p>");

        let catalog = build_catalog(tmp.path()).unwrap();
        assert_eq!(catalog.total_items, 2);
        assert_eq!(catalog.categories.len(), 2);

        let general = &catalog.categories[0];
        assert_eq!(general.id, "general");
        assert_eq!(general.name, "General");
        assert_eq!(general.description, "General reference sheets");
        assert_eq!(general.items[0].name, "Readme");
        assert_eq!(general.items[0].tags, vec!["general"]);
        assert_eq!(general.items[0].file, "readme.html");

        let linux = &catalog.categories[1];
        assert_eq!(linux.id, "linux");
        assert_eq!(linux.description, "Linux commands and utilities");
        assert_eq!(linux.items[0].name, "Grep Cheatsheet");
        assert_eq!(linux.items[0].tags, vec!["linux", "regex"]);
        assert_eq!(linux.items[0].file, "linux/grep.html");
    }

    #[test]
    fn empty_categories_dropped() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir_all(tmp.path().join("empty")).unwrap();
        write(tmp.path(), "notes/todo.txt", "not a page");
        write(tmp.path(), "web/css.html", "<title>CSS</title>");

        let catalog = build_catalog(tmp.path()).unwrap();
        let ids: Vec<&str> = catalog.categories.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["web"]);
    }

    #[test]
    fn nested_directories_not_descended() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "tools/deep/inner.html", "<title>Inner</title>");
        write(tmp.path(), "tools/git.html", "<title>Git</title>");

        let catalog = build_catalog(tmp.path()).unwrap();
        assert_eq!(catalog.total_items, 1);
        assert_eq!(catalog.categories[0].items[0].file, "tools/git.html");
    }

    #[test]
    fn extension_match_is_case_insensitive() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "web/HTML5.HTML", "");
        let catalog = build_catalog(tmp.path()).unwrap();
        assert_eq!(catalog.categories[0].items[0].id, "HTML5");
        assert_eq!(catalog.categories[0].items[0].name, "HTML5");
    }

    #[test]
    fn categories_in_name_order() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "web/a.html", "");
        write(tmp.path(), "cloud/b.html", "");
        write(tmp.path(), "my_stuff/c.html", "");

        let catalog = build_catalog(tmp.path()).unwrap();
        let ids: Vec<&str> = catalog.categories.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["cloud", "my_stuff", "web"]);
        assert_eq!(catalog.categories[1].name, "My stuff");
        assert_eq!(
            catalog.categories[1].description,
            "My stuff reference sheets"
        );
    }

    #[test]
    fn rebuild_is_identical_apart_from_timestamp() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "linux/grep.html", GREP);
        write(tmp.path(), "linux/awk.html", "<title>Awk - QuickRef</title>");
        write(tmp.path(), "index.html", "");

        let first = build_catalog(tmp.path()).unwrap();
        let second = build_catalog(tmp.path()).unwrap();
        assert_eq!(first.categories, second.categories);
        assert_eq!(first.total_items, second.total_items);
    }

    #[test]
    fn custom_glob_selects_pages() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "linux/grep.htm", "");
        write(tmp.path(), "linux/sed.html", "");

        let options = ScanOptions::new("*.htm").unwrap();
        let catalog = build_catalog_with(tmp.path(), &options, &NoProgress).unwrap();
        assert_eq!(catalog.total_items, 1);
        assert_eq!(catalog.categories[0].items[0].file, "linux/grep.htm");
    }

    #[cfg(unix)]
    #[test]
    fn dangling_page_link_aborts_build() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "linux/grep.html", GREP);
        let stale = tmp.path().join("linux").join("stale.html");
        std::os::unix::fs::symlink(tmp.path().join("gone.html"), &stale).unwrap();

        let err = build_catalog(tmp.path()).unwrap_err();
        assert!(format!("{:#}", err).contains("stale.html"));
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn non_utf8_file_name_is_an_error() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let tmp = TempDir::new().unwrap();
        fs::create_dir_all(tmp.path().join("web")).unwrap();
        let name = OsStr::from_bytes(b"caf\xe9.html");
        fs::write(tmp.path().join("web").join(name), "").unwrap();

        let err = build_catalog(tmp.path()).unwrap_err();
        assert!(err.to_string().contains("not valid UTF-8"));
    }

    #[test]
    fn directory_named_general_is_kept_separately() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "general/misc.html", "");
        write(tmp.path(), "index.html", "");

        let catalog = build_catalog(tmp.path()).unwrap();
        let files: Vec<(&str, &str)> = catalog
            .categories
            .iter()
            .map(|c| (c.id.as_str(), c.items[0].file.as_str()))
            .collect();
        assert_eq!(
            files,
            vec![("general", "index.html"), ("general", "general/misc.html")]
        );
        assert_eq!(catalog.total_items, 2);
    }

    #[test]
    fn non_utf8_page_is_read_lossily() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("latin.html"), b"<title>Caf\xe9</title>").unwrap();
        let catalog = build_catalog(tmp.path()).unwrap();
        assert!(catalog.categories[0].items[0].name.starts_with("Caf"));
    }
}
