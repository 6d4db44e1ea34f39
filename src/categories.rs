//! Category naming: display names and the fixed description table.

/// Identifier of the synthetic category holding root-level pages.
pub const GENERAL_ID: &str = "general";
pub const GENERAL_NAME: &str = "General";
pub const GENERAL_DESCRIPTION: &str = "General reference sheets";

/// Known category descriptions, keyed by directory name.
const DESCRIPTIONS: &[(&str, &str)] = &[
    ("programming", "Programming languages and frameworks"),
    ("tools", "Development tools and utilities"),
    ("web", "Web development technologies"),
    ("linux", "Linux commands and utilities"),
    ("database", "Database management systems"),
    ("devops", "DevOps tools and practices"),
    ("editor", "Text editors and IDEs"),
    ("network", "Network tools and protocols"),
    ("security", "Security tools and practices"),
    ("mobile", "Mobile development frameworks"),
    ("cloud", "Cloud services and platforms"),
];

/// Turn an identifier such as `shell_scripting` or `git-tips` into a
/// display name: separators become spaces and the first character is
/// uppercased. The rest of the string is left untouched.
pub fn display_name(id: &str) -> String {
    let spaced: String = id
        .chars()
        .map(|c| if c == '-' || c == '_' { ' ' } else { c })
        .collect();
    let mut chars = spaced.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Description for a category directory, from the fixed table or derived
/// from its display name.
pub fn category_description(id: &str) -> String {
    DESCRIPTIONS
        .iter()
        .find(|(key, _)| *key == id)
        .map(|(_, desc)| desc.to_string())
        .unwrap_or_else(|| format!("{} reference sheets", display_name(id)))
}
