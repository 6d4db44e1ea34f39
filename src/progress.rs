//! Build progress reporting.
//!
//! Reports what `qref build` is scanning so users can see which pages were
//! picked up. Progress is emitted on **stderr** so stdout stays parseable
//! (`qref build --dry-run` prints the catalog there).

use std::io::Write;
use std::path::PathBuf;

/// A single progress event emitted by the index builder.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ScanProgressEvent {
    /// The content root does not exist; an empty catalog will be produced.
    MissingRoot { root: PathBuf },
    /// Starting to scan a category (directory name, or `general`).
    Scanning { category: String },
    /// A page was read and its metadata extracted.
    Extracted { file: String },
    /// Scan finished.
    Done { categories: usize, items: usize },
}

/// Receives progress events from the builder.
pub trait ScanProgressReporter {
    fn report(&self, event: ScanProgressEvent);
}

/// Human-friendly progress on stderr: "scan linux  3 pages".
pub struct StderrProgress;

impl ScanProgressReporter for StderrProgress {
    fn report(&self, event: ScanProgressEvent) {
        let line = match &event {
            ScanProgressEvent::MissingRoot { root } => format!(
                "warning: content root {} does not exist, writing an empty index\n",
                root.display()
            ),
            ScanProgressEvent::Scanning { category } => format!("scan {}\n", category),
            ScanProgressEvent::Extracted { file } => format!("  page {}\n", file),
            ScanProgressEvent::Done { categories, items } => format!(
                "scan done  {} categories, {} pages\n",
                format_number(*categories as u64),
                format_number(*items as u64)
            ),
        };
        let _ = std::io::stderr().lock().write_all(line.as_bytes());
        let _ = std::io::stderr().lock().flush();
    }
}

/// Machine-readable progress: one JSON object per line on stderr.
pub struct JsonProgress;

impl ScanProgressReporter for JsonProgress {
    fn report(&self, event: ScanProgressEvent) {
        let obj = match &event {
            ScanProgressEvent::MissingRoot { root } => serde_json::json!({
                "event": "missing_root",
                "root": root.display().to_string(),
            }),
            ScanProgressEvent::Scanning { category } => serde_json::json!({
                "event": "scanning",
                "category": category,
            }),
            ScanProgressEvent::Extracted { file } => serde_json::json!({
                "event": "extracted",
                "file": file,
            }),
            ScanProgressEvent::Done { categories, items } => serde_json::json!({
                "event": "done",
                "categories": categories,
                "items": items,
            }),
        };
        if let Ok(line) = serde_json::to_string(&obj) {
            let _ = writeln!(std::io::stderr().lock(), "{}", line);
            let _ = std::io::stderr().lock().flush();
        }
    }
}

/// No-op reporter when progress is disabled.
pub struct NoProgress;

impl ScanProgressReporter for NoProgress {
    fn report(&self, _event: ScanProgressEvent) {}
}

/// Missing-root warnings still go to stderr when progress is off; the rest
/// is dropped.
pub struct WarningsOnly;

impl ScanProgressReporter for WarningsOnly {
    fn report(&self, event: ScanProgressEvent) {
        if matches!(event, ScanProgressEvent::MissingRoot { .. }) {
            StderrProgress.report(event);
        }
    }
}

fn format_number(n: u64) -> String {
    let s = n.to_string();
    let mut result = String::with_capacity(s.len() + (s.len() - 1) / 3);
    for (i, c) in s.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }
    result.chars().rev().collect()
}

/// Progress mode for the CLI: off, human (stderr), or JSON (stderr).
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ProgressMode {
    Off,
    Human,
    Json,
}

impl ProgressMode {
    /// Default: human progress when stderr is a TTY, otherwise off.
    pub fn default_for_tty() -> Self {
        if atty::is(atty::Stream::Stderr) {
            ProgressMode::Human
        } else {
            ProgressMode::Off
        }
    }

    /// Parse `auto`, `off`, `human` or `json`. `auto` picks by TTY.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "auto" => Some(Self::default_for_tty()),
            "off" => Some(ProgressMode::Off),
            "human" => Some(ProgressMode::Human),
            "json" => Some(ProgressMode::Json),
            _ => None,
        }
    }

    /// Build a reporter for this mode.
    pub fn reporter(&self) -> Box<dyn ScanProgressReporter> {
        match self {
            ProgressMode::Off => Box::new(WarningsOnly),
            ProgressMode::Human => Box::new(StderrProgress),
            ProgressMode::Json => Box::new(JsonProgress),
        }
    }
}
