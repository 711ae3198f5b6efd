//! Spatial Index Module
//!
//! R-tree over node region bounds. Point queries back node hit-testing and
//! rectangle queries back marquee selection; callers still walk the result
//! in z-order because the tree knows nothing about paint order.

use crate::geometry::Rect;
use crate::graph::NodeId;
use rstar::{AABB, RTree, RTreeObject};
use std::collections::HashMap;

#[derive(Debug, Clone, Copy)]
pub struct SpatialEntry {
    pub node: NodeId,
    pub min_x: f32,
    pub min_y: f32,
    pub max_x: f32,
    pub max_y: f32,
}

impl SpatialEntry {
    pub fn new(node: NodeId, bounds: Rect) -> Self {
        let bounds = bounds.normalized();
        Self {
            node,
            min_x: bounds.x,
            min_y: bounds.y,
            max_x: bounds.right(),
            max_y: bounds.bottom(),
        }
    }
}

impl RTreeObject for SpatialEntry {
    type Envelope = AABB<[f32; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_corners([self.min_x, self.min_y], [self.max_x, self.max_y])
    }
}

impl PartialEq for SpatialEntry {
    fn eq(&self, other: &Self) -> bool {
        self.node == other.node
    }
}

pub struct SpatialIndex {
    tree: RTree<SpatialEntry>,
    entries: HashMap<NodeId, SpatialEntry>,
}

impl SpatialIndex {
    pub fn new() -> Self {
        Self {
            tree: RTree::new(),
            entries: HashMap::new(),
        }
    }

    pub fn insert(&mut self, node: NodeId, bounds: Rect) {
        if let Some(old_entry) = self.entries.remove(&node) {
            self.tree.remove(&old_entry);
        }

        let entry = SpatialEntry::new(node, bounds);
        self.tree.insert(entry);
        self.entries.insert(node, entry);
    }

    pub fn remove(&mut self, node: NodeId) -> bool {
        if let Some(entry) = self.entries.remove(&node) {
            self.tree.remove(&entry);
            true
        } else {
            false
        }
    }

    /// Candidates whose envelope touches the point. Edges are inclusive here;
    /// callers apply the exact containment rule.
    pub fn query_point(&self, x: f32, y: f32) -> Vec<NodeId> {
        let point_envelope = AABB::from_point([x, y]);

        self.tree
            .locate_in_envelope_intersecting(&point_envelope)
            .map(|entry| entry.node)
            .collect()
    }

    /// Candidates whose envelope touches the rectangle.
    pub fn query_rect(&self, rect: Rect) -> Vec<NodeId> {
        let rect = rect.normalized();
        let envelope = AABB::from_corners([rect.x, rect.y], [rect.right(), rect.bottom()]);

        self.tree
            .locate_in_envelope_intersecting(&envelope)
            .map(|entry| entry.node)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn rebuild<I>(&mut self, items: I)
    where
        I: Iterator<Item = (NodeId, Rect)>,
    {
        let entries: Vec<SpatialEntry> = items
            .map(|(node, bounds)| SpatialEntry::new(node, bounds))
            .collect();

        self.entries = entries.iter().map(|e| (e.node, *e)).collect();
        self.tree = RTree::bulk_load(entries);
    }
}

impl Default for SpatialIndex {
    fn default() -> Self {
        Self::new()
    }
}
