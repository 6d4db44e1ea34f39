//! # QuickRef Index
//!
//! Build-time index generator for a "quick reference" documentation
//! catalog.
//!
//! The content root holds HTML reference pages, either directly or grouped
//! into one sub-directory per category. Each page's title, description and
//! tags are scraped with regular expressions and the result is written as
//! `structure.json`, which the static site fetches to render category
//! sections and run its live search.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐   ┌─────────────┐   ┌────────────────┐
//! │   pages/    │──▶│ scan        │──▶│ structure.json │
//! │ */*.html    │   │ + extract   │   │    (export)    │
//! └─────────────┘   └─────────────┘   └───────┬────────┘
//!                                             │
//!                               ┌─────────────┤
//!                               ▼             ▼
//!                          ┌─────────┐   ┌─────────┐
//!                          │ search  │   │  stats  │
//!                          └─────────┘   └─────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```bash
//! qref build                          # pages/ → data/structure.json
//! qref build --root content --dry-run # print the index instead
//! qref search docker
//! qref stats
//! ```
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | TOML configuration parsing |
//! | [`models`] | Catalog, category and item types |
//! | [`categories`] | Display names and category descriptions |
//! | [`extract`] | Regex metadata extraction from pages |
//! | [`scan`] | Directory walk producing a catalog |
//! | [`export`] | Writing and loading `structure.json` |
//! | [`search`] | Substring search over a catalog |
//! | [`stats`] | Catalog summary |
//! | [`progress`] | Build progress reporting |

pub mod categories;
pub mod config;
pub mod export;
pub mod extract;
pub mod models;
pub mod progress;
pub mod scan;
pub mod search;
pub mod stats;
