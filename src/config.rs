use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::progress::ProgressMode;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub index: IndexConfig,
    #[serde(default)]
    pub progress: ProgressConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct IndexConfig {
    /// Directory holding the reference pages.
    #[serde(default = "default_root")]
    pub root: PathBuf,
    /// Where `structure.json` is written.
    #[serde(default = "default_output")]
    pub output: PathBuf,
    /// File-name glob selecting reference pages (case-insensitive).
    #[serde(default = "default_include_glob")]
    pub include_glob: String,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            root: default_root(),
            output: default_output(),
            include_glob: default_include_glob(),
        }
    }
}

fn default_root() -> PathBuf {
    PathBuf::from("./pages")
}
fn default_output() -> PathBuf {
    PathBuf::from("./data/structure.json")
}
/// Page glob used when `[index].include_glob` is not set.
pub const DEFAULT_INCLUDE_GLOB: &str = "*.html";

fn default_include_glob() -> String {
    DEFAULT_INCLUDE_GLOB.to_string()
}

#[derive(Debug, Deserialize, Clone)]
pub struct ProgressConfig {
    #[serde(default = "default_progress_mode")]
    pub mode: String,
}

impl Default for ProgressConfig {
    fn default() -> Self {
        Self {
            mode: default_progress_mode(),
        }
    }
}

fn default_progress_mode() -> String {
    "auto".to_string()
}

impl ProgressConfig {
    pub fn resolve(&self) -> Result<ProgressMode> {
        ProgressMode::parse(&self.mode).ok_or_else(|| {
            anyhow::anyhow!(
                "Unknown progress mode: '{}'. Must be auto, off, human, or json.",
                self.mode
            )
        })
    }
}

/// Load configuration from `path`.
///
/// A missing file yields the built-in defaults so `qref build` works in a
/// bare checkout. A file that exists but cannot be read or parsed is an
/// error.
pub fn load_config(path: &Path) -> Result<Config> {
    if !path.exists() {
        return Ok(Config::default());
    }

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let config = parse_config(&content)?;
    Ok(config)
}

pub fn parse_config(content: &str) -> Result<Config> {
    let config: Config = toml::from_str(content).with_context(|| "Failed to parse config file")?;
    validate(&config)?;
    Ok(config)
}

fn validate(config: &Config) -> Result<()> {
    if config.index.include_glob.trim().is_empty() {
        bail!("index.include_glob must not be empty");
    }
    globset::Glob::new(&config.index.include_glob).with_context(|| {
        format!(
            "index.include_glob is not a valid glob: '{}'",
            config.index.include_glob
        )
    })?;

    config.progress.resolve()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_uses_defaults() {
        let cfg = parse_config("").unwrap();
        assert_eq!(cfg.index.root, PathBuf::from("./pages"));
        assert_eq!(cfg.index.output, PathBuf::from("./data/structure.json"));
        assert_eq!(cfg.index.include_glob, "*.html");
        assert_eq!(cfg.progress.mode, "auto");
    }

    #[test]
    fn partial_index_section() {
        let cfg = parse_config("[index]\nroot = \"content\"\n").unwrap();
        assert_eq!(cfg.index.root, PathBuf::from("content"));
        assert_eq!(cfg.index.include_glob, "*.html");
    }

    #[test]
    fn rejects_bad_progress_mode() {
        let err = parse_config("[progress]\nmode = \"loud\"\n").unwrap_err();
        assert!(err.to_string().contains("progress mode"));
    }

    #[test]
    fn rejects_bad_glob() {
        assert!(parse_config("[index]\ninclude_glob = \"[*.html\"\n").is_err());
    }

    #[test]
    fn missing_file_is_default() {
        let cfg = load_config(Path::new("/nonexistent/quickref.toml")).unwrap();
        assert_eq!(cfg.index.root, PathBuf::from("./pages"));
    }
}
