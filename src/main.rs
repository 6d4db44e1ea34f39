//! # QuickRef Index CLI (`qref`)
//!
//! Builds `structure.json` from a directory of reference pages and lets you
//! inspect the result.
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `qref build` | Scan the content root and write the index |
//! | `qref search "<query>"` | Filter the index like the site search box |
//! | `qref stats` | Summarize the index |
//! | `qref completions <shell>` | Print shell completions |
//!
//! ## Examples
//!
//! ```bash
//! # Rebuild the index with settings from ./config/quickref.toml
//! qref build
//!
//! # Index another directory and print instead of writing
//! qref build --root ./content --dry-run
//!
//! # Search the generated index
//! qref search regex --index ./data/structure.json
//! ```

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

use quickref_index::config::{self, Config};
use quickref_index::export;
use quickref_index::progress::ProgressMode;
use quickref_index::scan::{self, ScanOptions};
use quickref_index::search;
use quickref_index::stats;

/// QuickRef index builder.
///
/// All commands accept a `--config` flag pointing to a TOML configuration
/// file. A missing file means built-in defaults.
#[derive(Parser)]
#[command(
    name = "qref",
    about = "Build and inspect the QuickRef structure.json index",
    version,
    long_about = "Scans a directory of HTML reference pages, extracts each page's title, \
    description and tags, and writes the category/item index consumed by the static site."
)]
struct Cli {
    /// Path to configuration file (TOML).
    #[arg(long, global = true, default_value = "./config/quickref.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

/// Top-level CLI commands.
#[derive(Subcommand)]
enum Commands {
    /// Scan the content root and write the index.
    ///
    /// The index is rebuilt from scratch on every run. A missing content
    /// root produces an empty index; an unreadable page aborts without
    /// writing anything.
    Build {
        /// Content root (overrides `[index].root`).
        #[arg(long)]
        root: Option<PathBuf>,

        /// Output file (overrides `[index].output`).
        #[arg(long)]
        output: Option<PathBuf>,

        /// Print the index to stdout instead of writing the output file.
        #[arg(long)]
        dry_run: bool,

        /// Progress output: `auto`, `off`, `human`, or `json` (stderr).
        #[arg(long)]
        progress: Option<String>,
    },

    /// Search the generated index.
    ///
    /// Case-insensitive substring match on page names, descriptions and
    /// tags. An empty query lists everything.
    Search {
        /// The search query string.
        query: String,

        /// Index file to read (defaults to `[index].output`).
        #[arg(long)]
        index: Option<PathBuf>,

        /// Print matching categories and items as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Summarize the generated index.
    Stats {
        /// Index file to read (defaults to `[index].output`).
        #[arg(long)]
        index: Option<PathBuf>,
    },

    /// Print shell completion script.
    Completions {
        /// Target shell.
        shell: Shell,
    },
}

fn run_build(
    cfg: &Config,
    root: Option<PathBuf>,
    output: Option<PathBuf>,
    dry_run: bool,
    progress: Option<String>,
) -> Result<()> {
    let root = root.unwrap_or_else(|| cfg.index.root.clone());
    let output = output.unwrap_or_else(|| cfg.index.output.clone());

    let mode = match progress {
        Some(value) => ProgressMode::parse(&value).ok_or_else(|| {
            anyhow::anyhow!(
                "Unknown progress mode: '{}'. Use auto, off, human, or json.",
                value
            )
        })?,
        None => cfg.progress.resolve()?,
    };
    let reporter = mode.reporter();

    let options = ScanOptions::from_config(&cfg.index)?;
    let catalog = scan::build_catalog_with(&root, &options, reporter.as_ref())?;

    if dry_run {
        print!("{}", export::render_catalog(&catalog)?);
        return Ok(());
    }

    export::write_catalog(&catalog, &output)?;

    println!("Index generated successfully.");
    println!("  categories:  {}", catalog.categories.len());
    println!("  total items: {}", catalog.total_items);
    println!("  output:      {}", output.display());
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Commands::Completions { shell } = &cli.command {
        clap_complete::generate(*shell, &mut Cli::command(), "qref", &mut std::io::stdout());
        return Ok(());
    }

    let cfg = config::load_config(&cli.config)?;

    match cli.command {
        Commands::Build {
            root,
            output,
            dry_run,
            progress,
        } => {
            run_build(&cfg, root, output, dry_run, progress)?;
        }
        Commands::Search { query, index, json } => {
            let index = index.unwrap_or_else(|| cfg.index.output.clone());
            search::run_search(&index, &query, json)?;
        }
        Commands::Stats { index } => {
            let index = index.unwrap_or_else(|| cfg.index.output.clone());
            stats::run_stats(&index)?;
        }
        Commands::Completions { .. } => {
            // Handled above (before config loading)
            unreachable!()
        }
    }

    Ok(())
}
