use crate::config::BookMeta;
use serde::{Deserialize, Serialize};

/// Node kind understood by the front end's graph renderer
pub const NODE_TYPE: &str = "character";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeData {
    pub label: String,
    pub role: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    pub id: String,
    #[serde(rename = "type")]
    pub node_type: String,
    /// Left at the origin; layout happens in the UI
    pub position: Position,
    pub data: NodeData,
}

impl Node {
    pub fn character(id: String, data: NodeData) -> Self {
        Self {
            id,
            node_type: NODE_TYPE.to_string(),
            position: Position::default(),
            data,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    pub id: String,
    pub source: String,
    pub target: String,
    pub label: String,
}

/// The document written for one book. Field order is the output key order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub id: String,
    pub title: String,
    pub category: String,
    pub description: String,
    pub year: String,
    pub author: String,
    pub cover_color: String,
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
}

impl Book {
    pub fn new(meta: &BookMeta, nodes: Vec<Node>, edges: Vec<Edge>) -> Self {
        Self {
            id: meta.id.clone(),
            title: meta.title.clone(),
            category: meta.category.clone(),
            description: meta.description.clone(),
            year: meta.year.clone(),
            author: meta.author.clone(),
            cover_color: meta.cover_color.clone(),
            nodes,
            edges,
        }
    }
}

/// Keep at most `max` characters of `text`.
pub fn truncate_chars(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((byte_idx, _)) => text[..byte_idx].to_string(),
        None => text.to_string(),
    }
}
