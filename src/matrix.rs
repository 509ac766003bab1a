//! Adjacency-matrix sheets: the first column and the header row both list
//! characters, and the cell at (row, column) describes their relation.

use crate::config::{BookMeta, EDGE_LABEL_MAX};
use crate::loader::Table;
use crate::models::{truncate_chars, Book, Edge, Node, NodeData};
use crate::relations::EmittedPairs;
use crate::stats::MatrixStats;
use rustc_hash::FxHashMap;
use tracing::{debug, info};

/// Only the upper triangle is read (row character listed before column character),
/// so a relation entered in both halves becomes one edge.
pub fn convert_matrix(table: &Table, meta: &BookMeta) -> (Book, MatrixStats) {
    let mut stats = MatrixStats::default();

    let mut order: FxHashMap<&str, usize> = FxHashMap::default();
    let mut nodes = Vec::new();
    for record in table.records() {
        let Some(name) = record.get(0) else { continue };
        if order.contains_key(name) {
            continue;
        }
        order.insert(name, nodes.len());
        nodes.push(Node::character(
            name.to_string(),
            NodeData {
                label: name.to_string(),
                role: String::new(),
                description: String::new(),
            },
        ));
    }
    stats.characters = nodes.len() as u64;

    let mut pairs = EmittedPairs::new();
    let mut edges = Vec::new();
    for record in table.records() {
        let Some(row_char) = record.get(0) else { continue };
        let row_pos = order[row_char];

        for (col, col_char) in table.headers().iter().enumerate().skip(1) {
            let Some(text) = record.get(col).map(str::trim).filter(|t| !t.is_empty()) else {
                continue;
            };
            let Some(&col_pos) = order.get(col_char.as_str()) else {
                stats.skipped_cells += 1;
                continue;
            };
            if row_pos >= col_pos || !pairs.insert(row_char, col_char) {
                stats.skipped_cells += 1;
                continue;
            }

            debug!(from = row_char, to = %col_char, "Matrix relation");
            edges.push(Edge {
                id: format!("e{}", edges.len()),
                source: row_char.to_string(),
                target: col_char.clone(),
                label: truncate_chars(text, EDGE_LABEL_MAX),
            });
        }
    }
    stats.edges = edges.len() as u64;

    info!(
        characters = stats.characters,
        edges = stats.edges,
        skipped = stats.skipped_cells,
        "Matrix converted"
    );
    (Book::new(meta, nodes, edges), stats)
}
