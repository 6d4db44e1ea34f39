//! Metadata extraction from reference pages.
//!
//! Pages are scraped with a handful of independent regular expressions, not
//! parsed. Each field has a fallback chain that ends in a value derived from
//! the file name, so a page with no markers at all still yields a complete
//! [`Item`]. Nothing in this module can fail.
//!
//! Recognized markers:
//!
//! | Field | Primary | Secondary | Fallback |
//! |-------|---------|-----------|----------|
//! | name | `<h1 class="ref-title">` | `<title>` minus `" - QuickRef"` | display name of the file stem |
//! | description | `<p class="ref-description">` | `<meta name="description" content="…">` | `<display name> reference sheet` |
//! | tags | `<span class="ref-tag">` inside `<div class="ref-tags">` | | owning category id |

use regex::Regex;
use std::sync::LazyLock;

use crate::categories::display_name;
use crate::models::Item;

/// Suffix stripped from `<title>` text.
pub const TITLE_SUFFIX: &str = " - QuickRef";

fn compile_regex(pattern: &str) -> Regex {
    match Regex::new(pattern) {
        Ok(regex) => regex,
        Err(_compile_err) => match Regex::new(r"$^") {
            Ok(never) => never,
            Err(fallback_err) => panic!("hardcoded fallback regex must compile: {fallback_err}"),
        },
    }
}

const TITLE_HEADING_PATTERN: &str = r#"(?i)<h1[^>]*class="ref-title"[^>]*>(.*?)</h1>"#;
const TITLE_ELEMENT_PATTERN: &str = r"(?i)<title>(.*?)</title>";
const DESCRIPTION_PARAGRAPH_PATTERN: &str =
    r#"(?i)<p[^>]*class="ref-description"[^>]*>(.*?)</p>"#;
const META_DESCRIPTION_PATTERN: &str =
    r#"(?i)<meta[^>]*name="description"[^>]*content="([^"]*)"[^>]*>"#;
// The tag container may span lines; individual tags may not.
const TAG_CONTAINER_PATTERN: &str = r#"(?is)<div[^>]*class="ref-tags"[^>]*>(.*?)</div>"#;
const TAG_SPAN_PATTERN: &str = r#"(?i)<span[^>]*class="ref-tag"[^>]*>(.*?)</span>"#;
const MARKUP_PATTERN: &str = r"<[^>]*>";

static TITLE_HEADING: LazyLock<Regex> = LazyLock::new(|| compile_regex(TITLE_HEADING_PATTERN));
static TITLE_ELEMENT: LazyLock<Regex> = LazyLock::new(|| compile_regex(TITLE_ELEMENT_PATTERN));
static DESCRIPTION_PARAGRAPH: LazyLock<Regex> =
    LazyLock::new(|| compile_regex(DESCRIPTION_PARAGRAPH_PATTERN));
static META_DESCRIPTION: LazyLock<Regex> =
    LazyLock::new(|| compile_regex(META_DESCRIPTION_PATTERN));
static TAG_CONTAINER: LazyLock<Regex> = LazyLock::new(|| compile_regex(TAG_CONTAINER_PATTERN));
static TAG_SPAN: LazyLock<Regex> = LazyLock::new(|| compile_regex(TAG_SPAN_PATTERN));
static MARKUP: LazyLock<Regex> = LazyLock::new(|| compile_regex(MARKUP_PATTERN));

/// Remove every `<…>` tag, decode common entities and trim.
pub fn strip_markup(fragment: &str) -> String {
    let stripped = MARKUP.replace_all(fragment, "");
    decode_entities(&stripped).trim().to_string()
}

fn decode_entities(text: &str) -> String {
    if !text.contains('&') {
        return text.to_string();
    }
    // `&amp;` goes last so `&amp;lt;` decodes to the literal `&lt;`.
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&#x27;", "'")
        .replace("&nbsp;", " ")
        .replace("&amp;", "&")
}

fn first_capture(re: &Regex, content: &str) -> Option<String> {
    re.captures(content)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

fn non_empty(value: String) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

/// Page title: the `ref-title` heading, then `<title>`, then the display
/// name of `stem`.
pub fn extract_title(content: &str, stem: &str) -> String {
    first_capture(&TITLE_HEADING, content)
        .map(|raw| strip_markup(&raw))
        .and_then(non_empty)
        .or_else(|| {
            first_capture(&TITLE_ELEMENT, content)
                .map(|raw| {
                    let title = strip_markup(&raw);
                    match title.strip_suffix(TITLE_SUFFIX) {
                        Some(trimmed) => trimmed.trim_end().to_string(),
                        None => title,
                    }
                })
                .and_then(non_empty)
        })
        .unwrap_or_else(|| display_name(stem))
}

/// Page description: the `ref-description` paragraph, then the meta
/// description, then `<display name> reference sheet`.
pub fn extract_description(content: &str, stem: &str) -> String {
    first_capture(&DESCRIPTION_PARAGRAPH, content)
        .map(|raw| strip_markup(&raw))
        .and_then(non_empty)
        .or_else(|| {
            first_capture(&META_DESCRIPTION, content)
                .map(|raw| decode_entities(raw.trim()).trim().to_string())
                .and_then(non_empty)
        })
        .unwrap_or_else(|| format!("{} reference sheet", display_name(stem)))
}

/// Tags: the owning category first, then each `ref-tag` span of the first
/// `ref-tags` container in document order, deduplicated.
pub fn extract_tags(content: &str, category_id: &str) -> Vec<String> {
    let mut tags = vec![category_id.to_string()];

    if let Some(inner) = TAG_CONTAINER.captures(content).and_then(|c| c.get(1)) {
        for caps in TAG_SPAN.captures_iter(inner.as_str()) {
            let tag = caps.get(1).map(|m| strip_markup(m.as_str())).unwrap_or_default();
            if !tag.is_empty() && !tags.contains(&tag) {
                tags.push(tag);
            }
        }
    }

    tags
}

/// Build an [`Item`] from a page's raw content.
///
/// `file_name` is the page's file name (with extension); `file` is the
/// path recorded in the index.
pub fn extract_item(content: &str, file_name: &str, category_id: &str, file: String) -> Item {
    let stem = file_stem(file_name);
    Item {
        id: stem.to_string(),
        name: extract_title(content, stem),
        description: extract_description(content, stem),
        tags: extract_tags(content, category_id),
        file,
    }
}

/// File name without its final extension. Dotfiles keep their name.
pub fn file_stem(file_name: &str) -> &str {
    match file_name.rfind('.') {
        Some(0) | None => file_name,
        Some(pos) => &file_name[..pos],
    }
}
