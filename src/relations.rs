use crate::config::EDGE_LABEL_MAX;
use crate::identity::NameIndex;
use crate::models::{truncate_chars, Edge};
use crate::row::CharacterRow;
use rustc_hash::FxHashSet;
use tracing::{debug, info, warn};

/// Unordered node pairs that already have an edge.
#[derive(Debug, Default)]
pub struct EmittedPairs {
    seen: FxHashSet<(String, String)>,
}

impl EmittedPairs {
    pub fn new() -> Self {
        Self::default()
    }

    fn key(a: &str, b: &str) -> (String, String) {
        if a <= b {
            (a.to_string(), b.to_string())
        } else {
            (b.to_string(), a.to_string())
        }
    }

    pub fn contains(&self, a: &str, b: &str) -> bool {
        self.seen.contains(&Self::key(a, b))
    }

    /// Returns `true` if the pair was not emitted before.
    pub fn insert(&mut self, a: &str, b: &str) -> bool {
        self.seen.insert(Self::key(a, b))
    }

    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}

/// Output of the relation pass
#[derive(Debug, Default)]
pub struct Relations {
    pub edges: Vec<Edge>,
    pub protagonist_edges: u64,
    pub cross_edges: u64,
    /// Rows whose names are not in the name index
    pub unresolved_rows: u64,
    /// Matches dropped because the pair already had an edge
    pub duplicate_pairs: u64,
}

/// Second pass over the rows.
///
/// Each resolvable row may link to the protagonist (when it describes that
/// relation) and to every character whose name variant appears in its
/// other-relations text. Names are tried in registration order, so the first
/// matching variant claims the pair and the label is the whole field truncated.
///
/// `protagonist` is `None` when no row resolved to the protagonist; protagonist
/// edges are then skipped since their source node would not exist.
pub fn extract(
    rows: &[CharacterRow<'_>],
    names: &NameIndex,
    protagonist: Option<&str>,
) -> Relations {
    let mut out = Relations::default();
    let mut pairs = EmittedPairs::new();
    let mut warned_missing_protagonist = false;

    for row in rows {
        let Some(current) = names.get(row.localized).or_else(|| names.get(row.romanized)) else {
            debug!(row = row.index, "Unresolved row, skipping relations");
            out.unresolved_rows += 1;
            continue;
        };

        if let Some(relation) = row.relation_to_protagonist {
            match protagonist {
                Some(hub) if hub != current => {
                    if pairs.insert(hub, current) {
                        out.edges.push(Edge {
                            id: format!("e-{}-{}", hub, current),
                            source: hub.to_string(),
                            target: current.to_string(),
                            label: truncate_chars(relation, EDGE_LABEL_MAX),
                        });
                        out.protagonist_edges += 1;
                    } else {
                        out.duplicate_pairs += 1;
                    }
                }
                Some(_) => {}
                None => {
                    if !warned_missing_protagonist {
                        warn!("No row resolved to the protagonist, skipping protagonist edges");
                        warned_missing_protagonist = true;
                    }
                }
            }
        }

        let Some(text) = row.other_relations else {
            continue;
        };
        let label = truncate_chars(text, EDGE_LABEL_MAX);

        for (name, other) in names.iter() {
            if other == current || name.chars().count() <= 1 || !text.contains(name) {
                continue;
            }
            if !pairs.insert(current, other) {
                out.duplicate_pairs += 1;
                continue;
            }
            debug!(from = current, to = other, matched = name, "Cross reference");
            out.edges.push(Edge {
                id: format!("e-{}-{}", current, other),
                source: current.to_string(),
                target: other.to_string(),
                label: label.clone(),
            });
            out.cross_edges += 1;
        }
    }

    info!(
        edges = out.edges.len(),
        protagonist_edges = out.protagonist_edges,
        cross_edges = out.cross_edges,
        unresolved = out.unresolved_rows,
        "Relations extracted"
    );
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity::CollisionPolicy;

    fn row<'a>(
        index: usize,
        name: &'a str,
        relation: Option<&'a str>,
        others: Option<&'a str>,
    ) -> CharacterRow<'a> {
        CharacterRow {
            index,
            romanized: name,
            localized: name,
            role: None,
            category: None,
            relation_to_protagonist: relation,
            other_relations: others,
        }
    }

    fn make_index(entries: &[(&str, &str)]) -> NameIndex {
        let mut names = NameIndex::new();
        for (name, id) in entries {
            names
                .register(name, id, CollisionPolicy::KeepFirst)
                .unwrap();
        }
        names
    }

    #[test]
    fn pairs_are_unordered() {
        let mut pairs = EmittedPairs::new();
        assert!(pairs.insert("livia", "julia"));
        assert!(!pairs.insert("julia", "livia"));
        assert!(pairs.contains("livia", "julia"));
        assert_eq!(pairs.len(), 1);
    }

    #[test]
    fn protagonist_edge_from_relation_text() {
        let names = make_index(&[("奥古斯都", "augustus"), ("阿格里帕", "agrippa")]);
        let rows = [row(1, "阿格里帕", Some("挚友、女婿、最得力的将军与合作者"), None)];

        let rel = extract(&rows, &names, Some("augustus"));
        assert_eq!(rel.edges.len(), 1);
        let edge = &rel.edges[0];
        assert_eq!(edge.id, "e-augustus-agrippa");
        assert_eq!(edge.source, "augustus");
        assert_eq!(edge.target, "agrippa");
        assert_eq!(rel.protagonist_edges, 1);
    }

    #[test]
    fn protagonist_has_no_self_edge() {
        let names = make_index(&[("奥古斯都", "augustus")]);
        let rows = [row(0, "奥古斯都", Some("本人"), None)];
        let rel = extract(&rows, &names, Some("augustus"));
        assert!(rel.edges.is_empty());
    }

    #[test]
    fn missing_protagonist_skips_protagonist_edges() {
        let names = make_index(&[("阿格里帕", "agrippa")]);
        let rows = [row(0, "阿格里帕", Some("挚友"), None)];
        let rel = extract(&rows, &names, None);
        assert!(rel.edges.is_empty());
    }

    #[test]
    fn cross_reference_uses_whole_field_as_label() {
        let names = make_index(&[("李维娅", "livia"), ("提比略", "tiberius"), ("尤利娅", "julia")]);
        let text = "李维娅之子，尤利娅的第三任丈夫，后继承帝位成为皇帝";
        let rows = [row(1, "提比略", None, Some(text))];

        let rel = extract(&rows, &names, Some("augustus"));
        let targets: Vec<_> = rel.edges.iter().map(|e| e.target.as_str()).collect();
        assert_eq!(targets, vec!["livia", "julia"]);
        assert!(rel.edges.iter().all(|e| e.label == truncate_chars(text, 20)));
        assert!(rel.edges.iter().all(|e| e.source == "tiberius"));
        assert_eq!(rel.edges[0].id, "e-tiberius-livia");
    }

    #[test]
    fn single_character_names_never_match() {
        let names = make_index(&[("安", "an"), ("马克", "marcus")]);
        let rows = [row(1, "马克", None, Some("安东尼的部下"))];
        let rel = extract(&rows, &names, None);
        assert!(rel.edges.is_empty());
    }

    #[test]
    fn two_variants_of_one_character_yield_one_edge() {
        let names = make_index(&[
            ("马克·安东尼", "antony"),
            ("Mark Antony", "antony"),
            ("克娄巴特拉", "cleopatra"),
        ]);
        let rows = [row(2, "克娄巴特拉", None, Some("马克·安东尼（Mark Antony）的情人"))];

        let rel = extract(&rows, &names, None);
        assert_eq!(rel.edges.len(), 1);
        assert_eq!(rel.duplicate_pairs, 1);
    }

    #[test]
    fn mutual_mentions_produce_one_edge_per_pair() {
        let names = make_index(&[("尤利娅", "julia"), ("阿格里帕", "agrippa"), ("李维娅", "livia")]);
        let rows = [
            row(0, "尤利娅", None, Some("阿格里帕之妻，李维娅的继女")),
            row(1, "阿格里帕", None, Some("尤利娅之夫")),
            row(2, "李维娅", None, Some("尤利娅的继母")),
        ];

        let rel = extract(&rows, &names, None);
        assert_eq!(rel.edges.len(), 2);
        assert_eq!(rel.duplicate_pairs, 2);
    }

    #[test]
    fn unresolved_rows_are_counted_and_skipped() {
        let names = make_index(&[("李维娅", "livia")]);
        let rows = [row(0, "", Some("母亲"), Some("李维娅"))];
        let rel = extract(&rows, &names, Some("augustus"));
        assert!(rel.edges.is_empty());
        assert_eq!(rel.unresolved_rows, 1);
    }

    #[test]
    fn localized_lookup_falls_back_to_romanized() {
        let names = make_index(&[("Maecenas", "maecenas"), ("贺拉斯", "horace")]);
        let mut r = row(0, "Maecenas", None, Some("贺拉斯的赞助人"));
        r.localized = "梅塞纳斯";
        let rel = extract(&[r], &names, None);
        assert_eq!(rel.edges[0].source, "maecenas");
    }
}
