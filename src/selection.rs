//! Node selection.
//!
//! A duplicate-free set of nodes plus an optional primary node. The primary
//! node is what the host's property inspector shows; it is only set while
//! exactly one node is selected.

use crate::graph::NodeId;
use std::collections::HashSet;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Selection {
    nodes: HashSet<NodeId>,
    primary: Option<NodeId>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn is_multi(&self) -> bool {
        self.nodes.len() > 1
    }

    pub fn contains(&self, node: NodeId) -> bool {
        self.nodes.contains(&node)
    }

    pub fn primary(&self) -> Option<NodeId> {
        self.primary
    }

    pub fn iter(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes.iter().copied()
    }

    /// Selected ids in ascending order, for stable iteration.
    pub fn sorted(&self) -> Vec<NodeId> {
        let mut ids: Vec<NodeId> = self.nodes.iter().copied().collect();
        ids.sort();
        ids
    }

    /// Replace the selection with a single node. Returns whether anything changed.
    pub fn select_only(&mut self, node: NodeId) -> bool {
        if self.primary == Some(node) && self.nodes.len() == 1 {
            return false;
        }
        self.nodes.clear();
        self.nodes.insert(node);
        self.primary = Some(node);
        true
    }

    /// Replace the selection with `nodes`. Returns whether anything changed.
    pub fn replace(&mut self, nodes: impl IntoIterator<Item = NodeId>) -> bool {
        let nodes: HashSet<NodeId> = nodes.into_iter().collect();
        let primary = if nodes.len() == 1 {
            nodes.iter().next().copied()
        } else {
            None
        };
        if nodes == self.nodes && primary == self.primary {
            return false;
        }
        self.nodes = nodes;
        self.primary = primary;
        true
    }

    pub fn clear(&mut self) -> bool {
        if self.nodes.is_empty() {
            return false;
        }
        self.nodes.clear();
        self.primary = None;
        true
    }

    /// Drop a node that left the graph.
    pub fn remove(&mut self, node: NodeId) -> bool {
        if !self.nodes.remove(&node) {
            return false;
        }
        self.primary = if self.nodes.len() == 1 {
            self.nodes.iter().next().copied()
        } else {
            None
        };
        true
    }
}
