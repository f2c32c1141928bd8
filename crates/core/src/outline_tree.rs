//! Outline tree reconstruction.
//!
//! Outline nodes are stored flat with a `parent_id` back-reference. This
//! module rebuilds the hierarchy as an arena (the input slice) plus an index
//! from parent id to the sibling-ordered list of child positions.
//!
//! Sibling order is `sort_order` ascending; equal `sort_order` values keep
//! their input order (all sorts here are stable), which is insertion order
//! when the slice comes straight from the outline repository.
//!
//! Parent chains are not trusted to be acyclic. Every traversal tracks the
//! nodes it has already emitted, and nodes that cannot be reached from a
//! root (dangling parent id, or part of a cycle) are reported separately by
//! [`OutlineIndex::detached`] instead of being walked.

use std::collections::{HashMap, HashSet};

use serde::Serialize;

use crate::error::CoreError;
use crate::outline::{validate_not_self_parent, OutlineNode, ReorderEntry};

// ---------------------------------------------------------------------------
// Nested tree
// ---------------------------------------------------------------------------

/// A node with its children attached, for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutlineTreeNode {
    #[serde(flatten)]
    pub node: OutlineNode,
    pub children: Vec<OutlineTreeNode>,
}

impl OutlineTreeNode {
    /// Number of nodes in this subtree, including `self`.
    pub fn node_count(&self) -> usize {
        1 + self
            .children
            .iter()
            .map(OutlineTreeNode::node_count)
            .sum::<usize>()
    }
}

// ---------------------------------------------------------------------------
// Index
// ---------------------------------------------------------------------------

/// Parent/child index over a borrowed slice of outline nodes.
pub struct OutlineIndex<'a> {
    nodes: &'a [OutlineNode],
    by_id: HashMap<&'a str, usize>,
    roots: Vec<usize>,
    children: HashMap<&'a str, Vec<usize>>,
}

impl<'a> OutlineIndex<'a> {
    pub fn new(nodes: &'a [OutlineNode]) -> Self {
        let mut by_id = HashMap::with_capacity(nodes.len());
        let mut roots = Vec::new();
        let mut children: HashMap<&str, Vec<usize>> = HashMap::new();

        for (idx, node) in nodes.iter().enumerate() {
            by_id.entry(node.id.as_str()).or_insert(idx);
            match node.parent_id.as_deref() {
                None => roots.push(idx),
                Some(parent) => children.entry(parent).or_default().push(idx),
            }
        }

        let sibling_key = |idx: &usize| nodes[*idx].sort_order;
        roots.sort_by_key(sibling_key);
        for list in children.values_mut() {
            list.sort_by_key(sibling_key);
        }

        Self {
            nodes,
            by_id,
            roots,
            children,
        }
    }

    pub fn get(&self, id: &str) -> Option<&'a OutlineNode> {
        let nodes = self.nodes;
        self.by_id.get(id).map(|&idx| &nodes[idx])
    }

    /// Top-level nodes (null `parent_id`) in sibling order.
    pub fn roots(&self) -> impl Iterator<Item = &'a OutlineNode> + '_ {
        let nodes = self.nodes;
        self.roots.iter().map(move |&idx| &nodes[idx])
    }

    /// Direct children of `id` in sibling order.
    pub fn children_of(&self, id: &str) -> impl Iterator<Item = &'a OutlineNode> + '_ {
        let nodes = self.nodes;
        self.children
            .get(id)
            .into_iter()
            .flatten()
            .map(move |&idx| &nodes[idx])
    }

    pub fn parent_of(&self, node: &OutlineNode) -> Option<&'a OutlineNode> {
        node.parent_id.as_deref().and_then(|pid| self.get(pid))
    }

    /// Nodes sharing `node`'s parent (including `node`), in sibling order.
    pub fn siblings_of(&self, node: &OutlineNode) -> Vec<&'a OutlineNode> {
        match node.parent_id.as_deref() {
            None => self.roots().collect(),
            Some(pid) => self.children_of(pid).collect(),
        }
    }

    /// 1-based position of `node` among its siblings, if present.
    pub fn position_among_siblings(&self, node: &OutlineNode) -> Option<usize> {
        self.siblings_of(node)
            .iter()
            .position(|s| s.id == node.id)
            .map(|p| p + 1)
    }

    /// Depth-first, sibling-ordered traversal starting from every root.
    ///
    /// Each node is emitted at most once. Detached nodes are not emitted.
    pub fn depth_first(&self) -> Vec<&'a OutlineNode> {
        let mut order = Vec::with_capacity(self.nodes.len());
        let mut visited = vec![false; self.nodes.len()];
        let mut stack: Vec<usize> = self.roots.iter().rev().copied().collect();

        while let Some(idx) = stack.pop() {
            if std::mem::replace(&mut visited[idx], true) {
                continue;
            }
            let node: &'a OutlineNode = &self.nodes[idx];
            order.push(node);
            if let Some(kids) = self.children.get(node.id.as_str()) {
                stack.extend(kids.iter().rev().copied());
            }
        }
        order
    }

    /// Nested tree of every node reachable from a root.
    pub fn tree(&self) -> Vec<OutlineTreeNode> {
        let mut visited = HashSet::with_capacity(self.nodes.len());
        self.roots
            .iter()
            .filter_map(|&idx| self.subtree(idx, &mut visited))
            .collect()
    }

    fn subtree(&self, idx: usize, visited: &mut HashSet<usize>) -> Option<OutlineTreeNode> {
        if !visited.insert(idx) {
            return None;
        }
        let node = &self.nodes[idx];
        let children = self
            .children
            .get(node.id.as_str())
            .into_iter()
            .flatten()
            .filter_map(|&child| self.subtree(child, visited))
            .collect();
        Some(OutlineTreeNode {
            node: node.clone(),
            children,
        })
    }

    /// Nodes that no traversal from a root reaches: those whose parent id is
    /// missing from the set, those on a parent cycle, and their descendants.
    pub fn detached(&self) -> Vec<&'a OutlineNode> {
        let reachable: HashSet<&str> = self
            .depth_first()
            .into_iter()
            .map(|n| n.id.as_str())
            .collect();
        self.nodes
            .iter()
            .filter(|n| !reachable.contains(n.id.as_str()))
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Convenience wrappers
// ---------------------------------------------------------------------------

/// Build the nested display tree for a flat node set.
pub fn build_tree(nodes: &[OutlineNode]) -> Vec<OutlineTreeNode> {
    OutlineIndex::new(nodes).tree()
}

/// Depth-first, sibling-ordered flat ordering for a flat node set.
pub fn depth_first_order(nodes: &[OutlineNode]) -> Vec<&OutlineNode> {
    OutlineIndex::new(nodes).depth_first()
}

// ---------------------------------------------------------------------------
// Cycle checks
// ---------------------------------------------------------------------------

/// Return the id of a node whose ancestor chain loops back on itself.
pub fn find_cycle(nodes: &[OutlineNode]) -> Option<&str> {
    let parents: HashMap<&str, Option<&str>> = nodes
        .iter()
        .map(|n| (n.id.as_str(), n.parent_id.as_deref()))
        .collect();

    for node in nodes {
        let mut seen = HashSet::new();
        let mut current = Some(node.id.as_str());
        while let Some(id) = current {
            if !seen.insert(id) {
                return Some(node.id.as_str());
            }
            current = parents.get(id).copied().flatten();
        }
    }
    None
}

/// Whether re-parenting `node_id` under `new_parent` would make the node
/// its own ancestor.
pub fn would_create_cycle(nodes: &[OutlineNode], node_id: &str, new_parent: Option<&str>) -> bool {
    let parents: HashMap<&str, Option<&str>> = nodes
        .iter()
        .map(|n| (n.id.as_str(), n.parent_id.as_deref()))
        .collect();

    let mut seen = HashSet::new();
    let mut current = new_parent;
    while let Some(id) = current {
        if id == node_id || !seen.insert(id) {
            return true;
        }
        current = parents.get(id).copied().flatten();
    }
    false
}

/// Apply a reorder batch to an in-memory copy of a project's nodes.
///
/// Fails if an entry names an unknown item, points at an unknown or
/// identical parent, or if the resulting parent graph contains a cycle.
/// `nodes` is only modified when the whole batch is valid.
pub fn apply_reorder(nodes: &mut [OutlineNode], entries: &[ReorderEntry]) -> Result<(), CoreError> {
    let positions: HashMap<String, usize> = nodes
        .iter()
        .enumerate()
        .map(|(idx, n)| (n.id.clone(), idx))
        .collect();

    let mut staged = nodes.to_vec();
    for entry in entries {
        let idx = *positions
            .get(&entry.item_id)
            .ok_or_else(|| CoreError::not_found("OutlineItem", entry.item_id.clone()))?;
        validate_not_self_parent(&entry.item_id, entry.parent_id.as_deref())?;
        if let Some(parent) = entry.parent_id.as_deref() {
            if !positions.contains_key(parent) {
                return Err(CoreError::Validation(format!(
                    "Parent outline item {parent} does not belong to this project"
                )));
            }
        }
        staged[idx].parent_id = entry.parent_id.clone();
        staged[idx].sort_order = entry.sort_order;
    }

    if let Some(id) = find_cycle(&staged) {
        return Err(CoreError::Validation(format!(
            "Reorder would create a cycle involving outline item {id}"
        )));
    }

    nodes.clone_from_slice(&staged);
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------


#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::test_support::node;
    use super::*;
    use crate::outline::OutlineLevel::{Chapter, Section, Subsection};

    fn ids<'a>(nodes: impl IntoIterator<Item = &'a OutlineNode>) -> Vec<&'a str> {
        nodes.into_iter().map(|n| n.id.as_str()).collect()
    }

    fn sample() -> Vec<OutlineNode> {
        vec![
            node("c2", None, Chapter, 1),
            node("s1", Some("c1"), Section, 0),
            node("c1", None, Chapter, 0),
            node("ss1", Some("s1"), Subsection, 0),
            node("s2", Some("c1"), Section, 1),
            node("s3", Some("c2"), Section, 0),
        ]
    }

    #[test]
    fn roots_are_exactly_the_parentless_nodes() {
        let nodes = sample();
        let index = OutlineIndex::new(&nodes);
        assert_eq!(ids(index.roots()), vec!["c1", "c2"]);
    }

    #[test]
    fn siblings_sorted_by_sort_order() {
        let nodes = vec![
            node("c", None, Chapter, 0),
            node("b", Some("c"), Section, 2),
            node("x", Some("c"), Section, 0),
            node("y", Some("c"), Section, 1),
        ];
        let index = OutlineIndex::new(&nodes);
        let orders: Vec<i64> = index.children_of("c").map(|n| n.sort_order).collect();
        assert_eq!(orders, vec![0, 1, 2]);
    }

    #[test]
    fn equal_sort_orders_keep_input_order() {
        let nodes = vec![
            node("first", None, Chapter, 5),
            node("second", None, Chapter, 5),
            node("zero", None, Chapter, 0),
            node("third", None, Chapter, 5),
        ];
        assert_eq!(
            ids(depth_first_order(&nodes)),
            vec!["zero", "first", "second", "third"]
        );
    }

    #[test]
    fn depth_first_visits_children_before_next_sibling() {
        let nodes = sample();
        assert_eq!(
            ids(depth_first_order(&nodes)),
            vec!["c1", "s1", "ss1", "s2", "c2", "s3"]
        );
    }

    #[test]
    fn tree_places_every_node_once_under_its_parent() {
        let nodes = sample();
        let tree = build_tree(&nodes);

        assert_eq!(tree.len(), 2);
        assert_eq!(tree.iter().map(OutlineTreeNode::node_count).sum::<usize>(), nodes.len());

        let c1 = &tree[0];
        assert_eq!(c1.node.id, "c1");
        assert_eq!(ids(c1.children.iter().map(|c| &c.node)), vec!["s1", "s2"]);
        assert_eq!(c1.children[0].children[0].node.id, "ss1");
        assert_eq!(tree[1].children[0].node.id, "s3");
    }

    #[test]
    fn mismatched_levels_are_kept() {
        let nodes = vec![
            node("orphan-sub", None, Subsection, 0),
            node("chapter-under-section", Some("orphan-sub"), Chapter, 0),
        ];
        let tree = build_tree(&nodes);
        assert_eq!(tree[0].node.level, Subsection);
        assert_eq!(tree[0].children[0].node.level, Chapter);
    }

    #[test]
    fn tree_serializes_flat_fields_with_children() {
        let nodes = vec![node("c", None, Chapter, 0), node("s", Some("c"), Section, 0)];
        let json = serde_json::to_value(build_tree(&nodes)).unwrap();
        assert_eq!(json[0]["id"], "c");
        assert_eq!(json[0]["level"], "chapter");
        assert_eq!(json[0]["children"][0]["id"], "s");
        assert_eq!(json[0]["children"][0]["children"], serde_json::json!([]));
    }

    #[test]
    fn dangling_parent_is_detached() {
        let nodes = vec![node("c", None, Chapter, 0), node("lost", Some("gone"), Section, 0)];
        let index = OutlineIndex::new(&nodes);
        assert_eq!(ids(index.depth_first()), vec!["c"]);
        assert_eq!(ids(index.detached()), vec!["lost"]);
    }

    #[test]
    fn cyclic_chain_terminates_and_is_detached() {
        let nodes = vec![
            node("root", None, Chapter, 0),
            node("a", Some("b"), Section, 0),
            node("b", Some("a"), Section, 0),
            node("self", Some("self"), Section, 0),
        ];
        let index = OutlineIndex::new(&nodes);
        assert_eq!(ids(index.depth_first()), vec!["root"]);
        assert_eq!(index.tree().len(), 1);
        assert_eq!(ids(index.detached()), vec!["a", "b", "self"]);
    }

    #[test]
    fn duplicate_ids_are_emitted_once_per_arena_slot() {
        // Two rows claiming the same id: the second is reachable as a root
        // but its children are only walked once.
        let nodes = vec![
            node("dup", None, Chapter, 0),
            node("dup", None, Chapter, 1),
            node("kid", Some("dup"), Section, 0),
        ];
        let order = depth_first_order(&nodes);
        assert_eq!(order.iter().filter(|n| n.id == "kid").count(), 1);
    }

    #[test]
    fn siblings_and_position() {
        let nodes = sample();
        let index = OutlineIndex::new(&nodes);
        let s2 = index.get("s2").unwrap();
        assert_eq!(ids(index.siblings_of(s2)), vec!["s1", "s2"]);
        assert_eq!(index.position_among_siblings(s2), Some(2));
        assert_eq!(index.parent_of(s2).map(|p| p.id.as_str()), Some("c1"));

        let c2 = index.get("c2").unwrap();
        assert_eq!(index.position_among_siblings(c2), Some(2));
        assert!(index.parent_of(c2).is_none());
    }

    #[test]
    fn find_cycle_detects_loops_only() {
        assert!(find_cycle(&sample()).is_none());
        let nodes = vec![node("a", Some("b"), Section, 0), node("b", Some("a"), Section, 0)];
        assert!(find_cycle(&nodes).is_some());
    }

    #[test]
    fn would_create_cycle_checks_ancestors() {
        let nodes = sample();
        assert!(would_create_cycle(&nodes, "c1", Some("ss1")));
        assert!(would_create_cycle(&nodes, "s1", Some("s1")));
        assert!(!would_create_cycle(&nodes, "s1", Some("c2")));
        assert!(!would_create_cycle(&nodes, "s1", None));
    }

    #[test]
    fn apply_reorder_moves_and_resorts() {
        let mut nodes = sample();
        apply_reorder(
            &mut nodes,
            &[
                ReorderEntry {
                    item_id: "s2".into(),
                    parent_id: Some("c2".into()),
                    sort_order: 0,
                },
                ReorderEntry {
                    item_id: "s3".into(),
                    parent_id: Some("c2".into()),
                    sort_order: 1,
                },
            ],
        )
        .unwrap();
        let index = OutlineIndex::new(&nodes);
        assert_eq!(ids(index.children_of("c2")), vec!["s2", "s3"]);
        assert_eq!(ids(index.children_of("c1")), vec!["s1"]);
    }

    #[test]
    fn apply_reorder_rejects_cycle_and_leaves_nodes_untouched() {
        let mut nodes = sample();
        let before = nodes.clone();
        let err = apply_reorder(
            &mut nodes,
            &[ReorderEntry {
                item_id: "c1".into(),
                parent_id: Some("ss1".into()),
                sort_order: 0,
            }],
        )
        .unwrap_err();
        assert_matches!(err, CoreError::Validation(msg) if msg.contains("cycle"));
        assert_eq!(nodes, before);
    }

    #[test]
    fn apply_reorder_rejects_unknown_item_and_parent() {
        let mut nodes = sample();
        let unknown_item = apply_reorder(
            &mut nodes,
            &[ReorderEntry {
                item_id: "nope".into(),
                parent_id: None,
                sort_order: 0,
            }],
        );
        assert_matches!(unknown_item, Err(CoreError::NotFound { .. }));

        let unknown_parent = apply_reorder(
            &mut nodes,
            &[ReorderEntry {
                item_id: "s1".into(),
                parent_id: Some("elsewhere".into()),
                sort_order: 0,
            }],
        );
        assert_matches!(unknown_parent, Err(CoreError::Validation(_)));
    }
}
