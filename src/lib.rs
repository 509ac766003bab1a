//! Relgraph: character spreadsheet to relationship graph conversion
//!
//! This crate turns a spreadsheet of characters (one row per character, with
//! free-text relationship columns) into the JSON graph document a
//! visualization front end renders:
//!
//! 1. **Load** -- Read a CSV file or the first worksheet of a workbook into an
//!    ordered table of optional cells
//! 2. **Identity pass** -- Give every row a stable node id (protagonist alias,
//!    slug of the romanized name, or `char-<row>`), and index every name variant
//! 3. **Relation pass** -- Link each row to the protagonist when it describes
//!    that relation, and to every character whose name appears in its
//!    other-relations text; one edge per unordered pair
//! 4. **Write** -- Bundle book metadata, nodes and edges into one indented
//!    JSON document
//!
//! Adjacency-matrix sheets (characters along both axes) are handled by
//! [`matrix`], and [`inspect`] prints what a sheet contains before converting.
//!
//! # Key Modules
//!
//! - [`loader`] -- CSV and workbook reading into [`loader::Table`]
//! - [`row`] -- Column resolution and per-row character fields
//! - [`identity`] -- Node ids, name index, collision policy
//! - [`relations`] -- Edge extraction with unordered-pair deduplication
//! - [`pipeline`] -- End-to-end conversion and JSON output
//! - [`matrix`] -- Adjacency-matrix conversion
//! - [`inspect`] -- Sheet summary for checking headers and relation columns
//! - [`models`] -- Output document types (Book, Node, Edge)
//! - [`config`] -- Limits, defaults and the optional TOML book file
//! - [`stats`] -- Conversion counters
//! - [`error`] -- Error type
//!
//! # Example Usage
//!
//! ```bash
//! # Convert the default workbook into the front end's data directory
//! relgraph convert
//!
//! # Another book, with its own metadata, protagonist and headers
//! relgraph convert -i stoner.csv -o app/data/books/stoner.json --book stoner.toml
//!
//! # Check headers and the first rows before converting
//! relgraph inspect -i stoner.csv --book stoner.toml --rows 5
//! ```

pub mod config;
pub mod error;
pub mod identity;
pub mod inspect;
pub mod loader;
pub mod matrix;
pub mod models;
pub mod pipeline;
pub mod relations;
pub mod row;
pub mod stats;
