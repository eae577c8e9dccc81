use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::{PymatuningError, Result};
use crate::tree::{InterfaceTree, NodeId};

pub const DEFAULT_INDENT_WIDTH: usize = 2;
pub const OUTLINE_MARKER: &str = "-";
pub const CHECKLIST_MARKER: &str = "- [ ]";

/// Line marker used for every outline entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum MarkerStyle {
    /// Plain org-mode list items (`- name`)
    #[default]
    Outline,
    /// Org-mode checkboxes (`- [ ] name`)
    Checklist,
}

impl MarkerStyle {
    pub fn marker(&self) -> &'static str {
        match self {
            MarkerStyle::Outline => OUTLINE_MARKER,
            MarkerStyle::Checklist => CHECKLIST_MARKER,
        }
    }
}

/// Flattens an interface tree into indented, marker-prefixed lines
#[derive(Debug, Clone)]
pub struct OutlineRenderer {
    indent_width: usize,
    marker: String,
}

impl OutlineRenderer {
    pub fn new(indent_width: usize, marker: impl Into<String>) -> Self {
        Self {
            indent_width,
            marker: marker.into(),
        }
    }

    pub fn with_style(indent_width: usize, style: MarkerStyle) -> Self {
        Self::new(indent_width, style.marker())
    }

    /// Preorder `(depth, node)` pairs starting at the tree's root.
    ///
    /// Children are visited in the order their edges were inserted. A node
    /// reached twice means the graph is not a tree.
    pub fn entries<'t>(&self, tree: &'t InterfaceTree) -> Result<Vec<(usize, &'t NodeId)>> {
        let root = tree.root()?;
        let mut entries = Vec::with_capacity(tree.node_count());
        let mut visited: HashSet<&NodeId> = HashSet::new();
        let mut stack = vec![(0usize, root)];

        while let Some((depth, node)) = stack.pop() {
            if !visited.insert(node) {
                return Err(PymatuningError::Structural(format!(
                    "{} is reachable by more than one path",
                    node
                )));
            }
            entries.push((depth, node));

            let children: Vec<_> = tree.children(node).collect();
            stack.extend(children.into_iter().rev().map(|child| (depth + 1, child)));
        }

        Ok(entries)
    }

    pub fn render(&self, tree: &InterfaceTree) -> Result<String> {
        let lines: Vec<String> = self
            .entries(tree)?
            .into_iter()
            .map(|(depth, node)| self.line(depth, node.label()))
            .collect();

        Ok(lines.join("\n"))
    }

    fn line(&self, depth: usize, label: &str) -> String {
        format!(
            "{}{} {}",
            " ".repeat(depth * self.indent_width),
            self.marker,
            label
        )
    }
}

impl Default for OutlineRenderer {
    fn default() -> Self {
        Self::new(DEFAULT_INDENT_WIDTH, OUTLINE_MARKER)
    }
}

/// Render `tree` as an org-mode list
pub fn listing(tree: &InterfaceTree, indent_width: usize, marker: &str) -> Result<String> {
    OutlineRenderer::new(indent_width, marker).render(tree)
}
