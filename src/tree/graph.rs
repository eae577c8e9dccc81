use std::collections::VecDeque;

use indexmap::{IndexMap, IndexSet};

use crate::error::{PymatuningError, Result};
use crate::tree::node::NodeId;

#[derive(Debug, Clone, Default)]
struct NodeEntry {
    children: IndexSet<NodeId>,
    parents: IndexSet<NodeId>,
}

/// Directed containment graph over [`NodeId`]s.
///
/// Nodes and outgoing edges are kept in insertion order, which is the
/// order traversals visit them in. Nothing is ever removed.
#[derive(Debug, Clone, Default)]
pub struct InterfaceTree {
    nodes: IndexMap<NodeId, NodeEntry>,
}

impl InterfaceTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node without edges. Returns `false` if it was already present.
    pub fn add_node(&mut self, node: NodeId) -> bool {
        if self.nodes.contains_key(&node) {
            return false;
        }
        self.nodes.insert(node, NodeEntry::default());
        true
    }

    /// Ensure the edge `parent -> child` exists, adding missing endpoints.
    ///
    /// Inserting an edge that is already present is a no-op; the return
    /// value tells whether anything was added.
    pub fn ensure_edge(&mut self, parent: NodeId, child: NodeId) -> bool {
        let inserted = self
            .nodes
            .entry(parent.clone())
            .or_default()
            .children
            .insert(child.clone());
        self.nodes.entry(child).or_default().parents.insert(parent);
        inserted
    }

    pub fn contains_node(&self, node: &NodeId) -> bool {
        self.nodes.contains_key(node)
    }

    pub fn contains_edge(&self, parent: &NodeId, child: &NodeId) -> bool {
        self.nodes
            .get(parent)
            .is_some_and(|entry| entry.children.contains(child))
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.nodes.values().map(|entry| entry.children.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn nodes(&self) -> impl Iterator<Item = &NodeId> {
        self.nodes.keys()
    }

    /// Children of `node` in insertion order
    pub fn children(&self, node: &NodeId) -> impl Iterator<Item = &NodeId> {
        self.nodes
            .get(node)
            .into_iter()
            .flat_map(|entry| entry.children.iter())
    }

    pub fn parents(&self, node: &NodeId) -> impl Iterator<Item = &NodeId> {
        self.nodes
            .get(node)
            .into_iter()
            .flat_map(|entry| entry.parents.iter())
    }

    /// The unique parent of `node`, if it has exactly one
    pub fn parent(&self, node: &NodeId) -> Option<&NodeId> {
        let entry = self.nodes.get(node)?;
        if entry.parents.len() == 1 {
            entry.parents.first()
        } else {
            None
        }
    }

    pub fn in_degree(&self, node: &NodeId) -> usize {
        self.nodes.get(node).map_or(0, |entry| entry.parents.len())
    }

    pub fn out_degree(&self, node: &NodeId) -> usize {
        self.nodes.get(node).map_or(0, |entry| entry.children.len())
    }

    /// Nodes with no incoming and at least one outgoing edge
    pub fn roots(&self) -> Vec<&NodeId> {
        self.nodes
            .iter()
            .filter(|(_, entry)| entry.parents.is_empty() && !entry.children.is_empty())
            .map(|(node, _)| node)
            .collect()
    }

    /// The single root of the tree.
    ///
    /// A graph holding exactly one node and no edges is its own root.
    pub fn root(&self) -> Result<&NodeId> {
        if self.nodes.len() == 1 && self.edge_count() == 0 {
            if let Some(node) = self.nodes.keys().next() {
                return Ok(node);
            }
        }

        let roots = self.roots();
        match roots.as_slice() {
            [root] => Ok(*root),
            [] => Err(PymatuningError::Structural(format!(
                "no root found among {} nodes",
                self.nodes.len()
            ))),
            many => Err(PymatuningError::Structural(format!(
                "{} candidate roots: {}",
                many.len(),
                many.iter()
                    .map(|node| node.to_string())
                    .collect::<Vec<_>>()
                    .join(", ")
            ))),
        }
    }

    /// Breadth-first order of the nodes reachable from `start`
    pub fn bfs(&self, start: &NodeId) -> Vec<&NodeId> {
        let mut order = Vec::new();
        let mut seen: IndexSet<&NodeId> = IndexSet::new();
        let mut queue = VecDeque::new();

        if let Some((start, _)) = self.nodes.get_key_value(start) {
            seen.insert(start);
            queue.push_back(start);
        }

        while let Some(node) = queue.pop_front() {
            order.push(node);
            for child in self.children(node) {
                if seen.insert(child) {
                    queue.push_back(child);
                }
            }
        }

        order
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::node::ModulePath;

    fn module(path: &str) -> NodeId {
        NodeId::module(ModulePath::new(path))
    }

    #[test]
    fn test_ensure_edge_adds_endpoints() {
        let mut tree = InterfaceTree::new();
        assert!(tree.ensure_edge(module("pkg"), module("pkg.a")));

        assert_eq!(tree.node_count(), 2);
        assert_eq!(tree.edge_count(), 1);
        assert!(tree.contains_edge(&module("pkg"), &module("pkg.a")));
    }

    #[test]
    fn test_ensure_edge_is_idempotent() {
        let mut tree = InterfaceTree::new();
        let class = NodeId::symbol(&ModulePath::new("pkg"), "C");
        let member = NodeId::class_member(&ModulePath::new("pkg"), "C", "value");

        assert!(tree.ensure_edge(class.clone(), member.clone()));
        assert!(!tree.ensure_edge(class.clone(), member.clone()));

        assert_eq!(tree.node_count(), 2);
        assert_eq!(tree.edge_count(), 1);
        assert_eq!(tree.in_degree(&member), 1);
        assert_eq!(tree.out_degree(&class), 1);
    }

    #[test]
    fn test_children_keep_insertion_order() {
        let mut tree = InterfaceTree::new();
        tree.ensure_edge(module("pkg"), module("pkg.z"));
        tree.ensure_edge(module("pkg"), module("pkg.a"));
        tree.ensure_edge(module("pkg"), module("pkg.m"));

        let labels: Vec<_> = tree.children(&module("pkg")).map(|n| n.label()).collect();
        assert_eq!(labels, vec!["z", "a", "m"]);
    }

    #[test]
    fn test_add_node_twice() {
        let mut tree = InterfaceTree::new();
        assert!(tree.add_node(module("pkg")));
        assert!(!tree.add_node(module("pkg")));
        assert_eq!(tree.node_count(), 1);
    }

    #[test]
    fn test_root_of_single_node() {
        let mut tree = InterfaceTree::new();
        tree.add_node(module("pkg"));
        assert_eq!(tree.root().unwrap(), &module("pkg"));
    }

    #[test]
    fn test_root_of_empty_graph_fails() {
        let tree = InterfaceTree::new();
        assert!(matches!(tree.root(), Err(PymatuningError::Structural(_))));
    }

    #[test]
    fn test_multiple_roots_fail() {
        let mut tree = InterfaceTree::new();
        tree.ensure_edge(module("a"), module("a.x"));
        tree.ensure_edge(module("b"), module("b.y"));

        assert_eq!(tree.roots().len(), 2);
        assert!(matches!(tree.root(), Err(PymatuningError::Structural(_))));
    }

    #[test]
    fn test_isolated_nodes_have_no_root() {
        let mut tree = InterfaceTree::new();
        tree.add_node(module("a"));
        tree.add_node(module("b"));
        assert!(tree.root().is_err());
    }

    #[test]
    fn test_parent_lookup() {
        let mut tree = InterfaceTree::new();
        tree.ensure_edge(module("pkg"), module("pkg.a"));
        assert_eq!(tree.parent(&module("pkg.a")), Some(&module("pkg")));
        assert_eq!(tree.parent(&module("pkg")), None);
    }

    #[test]
    fn test_bfs_order() {
        let mut tree = InterfaceTree::new();
        tree.ensure_edge(module("pkg"), module("pkg.a"));
        tree.ensure_edge(module("pkg.a"), module("pkg.a.deep"));
        tree.ensure_edge(module("pkg"), module("pkg.b"));

        let root = module("pkg");
        let order: Vec<_> = tree.bfs(&root).into_iter().map(|n| n.to_string()).collect();
        assert_eq!(order, vec!["pkg", "pkg.a", "pkg.b", "pkg.a.deep"]);
    }

    #[test]
    fn test_bfs_from_unknown_node_is_empty() {
        let tree = InterfaceTree::new();
        assert!(tree.bfs(&module("missing")).is_empty());
    }
}
