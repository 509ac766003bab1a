use crate::config::{Protagonist, ABSENT_MARKER, ROLE_MAX};
use crate::error::{RelgraphError, Result};
use crate::models::{truncate_chars, Node, NodeData};
use crate::row::{is_present, CharacterRow};
use rustc_hash::{FxHashMap, FxHashSet};
use tracing::{debug, info, warn};

/// What happens when a name variant is registered for a second, different character.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum CollisionPolicy {
    /// The first character to register a name keeps it
    #[default]
    KeepFirst,
    /// The later character takes the name over; its scan position is unchanged
    KeepLast,
    /// Abort the conversion
    Error,
}

/// Name variant to node id, iterated in registration order.
#[derive(Debug, Default)]
pub struct NameIndex {
    entries: Vec<(String, String)>,
    positions: FxHashMap<String, usize>,
}

impl NameIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `Ok(true)` when `name` was already held by a different id.
    pub fn register(&mut self, name: &str, id: &str, policy: CollisionPolicy) -> Result<bool> {
        let Some(&pos) = self.positions.get(name) else {
            self.positions.insert(name.to_string(), self.entries.len());
            self.entries.push((name.to_string(), id.to_string()));
            return Ok(false);
        };

        let held = &mut self.entries[pos].1;
        if held.as_str() == id {
            return Ok(false);
        }

        match policy {
            CollisionPolicy::KeepFirst => {
                warn!(variant = name, kept = %held, ignored = id, "Name already registered, keeping first");
            }
            CollisionPolicy::KeepLast => {
                warn!(variant = name, replaced = %held, with = id, "Name already registered, keeping last");
                *held = id.to_string();
            }
            CollisionPolicy::Error => {
                return Err(RelgraphError::NameCollision {
                    name: name.to_string(),
                    kept: held.clone(),
                    rejected: id.to_string(),
                });
            }
        }
        Ok(true)
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.positions
            .get(name)
            .map(|&pos| self.entries[pos].1.as_str())
    }

    /// `(name, id)` pairs in registration order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(n, i)| (n.as_str(), i.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Output of the identity pass
#[derive(Debug, Default)]
pub struct Identities {
    pub nodes: Vec<Node>,
    pub names: NameIndex,
    /// Some row resolved to the protagonist
    pub protagonist_found: bool,
    pub duplicate_ids: u64,
    pub name_collisions: u64,
}

/// Lowercase, spaces to dashes, drop `.` `'` `,`.
pub fn slugify(name: &str) -> String {
    name.to_lowercase()
        .chars()
        .filter_map(|c| match c {
            ' ' => Some('-'),
            '.' | '\'' | ',' => None,
            c => Some(c),
        })
        .collect()
}

pub fn character_id(row: &CharacterRow<'_>, protagonist: &Protagonist) -> String {
    if protagonist.matches(row.localized) || protagonist.matches(row.romanized) {
        return protagonist.id.clone();
    }
    let slug = slugify(row.romanized);
    if slug.is_empty() || slug == ABSENT_MARKER {
        format!("char-{}", row.index)
    } else {
        slug
    }
}

fn node_data(row: &CharacterRow<'_>) -> NodeData {
    let role = match row.role {
        Some(role) => truncate_chars(role, ROLE_MAX),
        None => row.category.unwrap_or_default().to_string(),
    };
    NodeData {
        label: row.label().to_string(),
        role,
        description: row.relation_to_protagonist.unwrap_or_default().to_string(),
    }
}

/// First pass: one node per distinct id, plus the name index for relation matching.
pub fn resolve(
    rows: &[CharacterRow<'_>],
    protagonist: &Protagonist,
    policy: CollisionPolicy,
) -> Result<Identities> {
    let mut out = Identities::default();
    let mut seen_ids = FxHashSet::default();

    for row in rows {
        let id = character_id(row, protagonist);

        for name in [row.localized, row.romanized] {
            if is_present(name) && out.names.register(name, &id, policy)? {
                out.name_collisions += 1;
            }
        }

        if id == protagonist.id {
            out.protagonist_found = true;
        }

        if !seen_ids.insert(id.clone()) {
            debug!(id = %id, row = row.index, "Duplicate character id, keeping first node");
            out.duplicate_ids += 1;
            continue;
        }

        debug!(id = %id, row = row.index, "Character resolved");
        out.nodes.push(Node::character(id, node_data(row)));
    }

    info!(
        nodes = out.nodes.len(),
        names = out.names.len(),
        "Identities resolved"
    );
    Ok(out)
}
