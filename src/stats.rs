use crate::identity::Identities;
use crate::relations::Relations;

/// Counters collected during one conversion
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ConversionStats {
    pub rows_loaded: u64,
    pub nodes: u64,
    pub duplicate_ids: u64,
    pub name_collisions: u64,
    pub protagonist_edges: u64,
    pub cross_edges: u64,
    pub unresolved_rows: u64,
    pub duplicate_pairs: u64,
}

impl ConversionStats {
    pub fn new(rows_loaded: usize, identities: &Identities, relations: &Relations) -> Self {
        Self {
            rows_loaded: rows_loaded as u64,
            nodes: identities.nodes.len() as u64,
            duplicate_ids: identities.duplicate_ids,
            name_collisions: identities.name_collisions,
            protagonist_edges: relations.protagonist_edges,
            cross_edges: relations.cross_edges,
            unresolved_rows: relations.unresolved_rows,
            duplicate_pairs: relations.duplicate_pairs,
        }
    }

    pub fn edges(&self) -> u64 {
        self.protagonist_edges + self.cross_edges
    }
}

/// Counters for an adjacency-matrix conversion
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct MatrixStats {
    pub characters: u64,
    pub edges: u64,
    /// Filled cells below the diagonal, on it, or under an unknown header
    pub skipped_cells: u64,
}
