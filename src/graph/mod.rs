//! The node graph: z-ordered nodes, their connectors and the links between them.
//!
//! ## Modules
//!
//! - `ids` - Arena handles (`NodeId`, `ConnectorId`)
//! - `connector` - Connector data and compatibility
//! - `node` - Node geometry, builder and the `NodeBehavior` hooks
//! - `links` - Connection protocol and link queries
//!
//! Node order is paint order: the last node is drawn last and wins hit-tests.

mod connector;
mod ids;
mod links;
mod node;

pub use connector::{Connector, ConnectorSpec};
pub use ids::{ConnectorId, Direction, NodeId};
pub use links::{ConnectOutcome, RejectReason};
pub use node::{HostContext, InertBehavior, Node, NodeBehavior, NodeBuilder};

use crate::error::{FlowError, FlowResult};
use crate::geometry::Rect;
use crate::profile_scope;
use crate::spatial_index::SpatialIndex;
use glam::Vec2;
use std::collections::{HashMap, HashSet};

pub struct Graph {
    nodes: Vec<Node>,
    slots: HashMap<NodeId, usize>,
    next_id: u64,
    spatial: SpatialIndex,
}

impl Default for Graph {
    fn default() -> Self {
        Self::new()
    }
}

impl Graph {
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            slots: HashMap::new(),
            next_id: 1,
            spatial: SpatialIndex::new(),
        }
    }

    /// Place a node on top of the z-order at the builder's position.
    pub fn insert(&mut self, builder: NodeBuilder) -> NodeId {
        let id = NodeId(self.next_id);
        self.next_id += 1;

        let node = builder.build(id);
        self.spatial.insert(id, node.region_bounds());
        self.slots.insert(id, self.nodes.len());
        self.nodes.push(node);
        tracing::debug!(node = %id, "Node added");
        id
    }

    /// Remove a node and sever every link that references its connectors.
    pub fn remove(&mut self, id: NodeId) -> FlowResult<Node> {
        let slot = self.slots.remove(&id).ok_or(FlowError::NodeNotFound(id))?;
        let node = self.nodes.remove(slot);
        for (i, other) in self.nodes.iter().enumerate().skip(slot) {
            self.slots.insert(other.id, i);
        }

        for other in &mut self.nodes {
            for direction in [Direction::Input, Direction::Output] {
                for connector in other.connectors_mut(direction) {
                    connector.retain_links(|c| c.node != id);
                }
            }
        }

        self.spatial.remove(id);
        tracing::debug!(node = %id, "Node removed");
        Ok(node)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.slots.contains_key(&id)
    }

    /// Nodes in paint order (bottom first).
    pub fn nodes(&self) -> impl DoubleEndedIterator<Item = &Node> {
        self.nodes.iter()
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.slots.get(&id).map(|&slot| &self.nodes[slot])
    }

    fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        let slot = *self.slots.get(&id)?;
        self.nodes.get_mut(slot)
    }

    /// Mutate a node in place; the spatial index is refreshed afterwards.
    pub fn update<R>(&mut self, id: NodeId, f: impl FnOnce(&mut Node) -> R) -> FlowResult<R> {
        let node = self.node_mut(id).ok_or(FlowError::NodeNotFound(id))?;
        let result = f(node);
        let bounds = node.region_bounds();
        self.spatial.insert(id, bounds);
        Ok(result)
    }

    pub fn set_position(&mut self, id: NodeId, position: Vec2) -> FlowResult<()> {
        self.update(id, |node| node.position = position)
    }

    /// Move every node by `delta` (model units).
    pub fn translate_all(&mut self, delta: Vec2) {
        for node in &mut self.nodes {
            node.position += delta;
        }
        self.spatial
            .rebuild(self.nodes.iter().map(|n| (n.id, n.region_bounds())));
    }

    pub fn connector(&self, id: ConnectorId) -> Option<&Connector> {
        self.node(id.node)?.connector(id)
    }

    pub(crate) fn connector_mut(&mut self, id: ConnectorId) -> Option<&mut Connector> {
        self.node_mut(id.node)?.connector_mut(id)
    }

    /// Ordinal of `connector` within `node`'s input or output list.
    pub fn connector_index(&self, node: NodeId, connector: ConnectorId) -> Option<usize> {
        if connector.node != node {
            return None;
        }
        self.connector(connector).map(|c| c.id.index)
    }

    /// Anchor of a connector in model space.
    pub fn connector_anchor(&self, id: ConnectorId) -> Option<Vec2> {
        let node = self.node(id.node)?;
        node.connector(id)?;
        Some(node.connector_anchor(id.direction, id.index))
    }

    /// Topmost node whose region contains `point` (model space).
    pub fn hit_test_node(&self, point: Vec2) -> Option<NodeId> {
        profile_scope!("hit_test_node");

        let candidates: HashSet<NodeId> =
            self.spatial.query_point(point.x, point.y).into_iter().collect();
        if candidates.is_empty() {
            return None;
        }

        self.nodes
            .iter()
            .rev()
            .filter(|node| candidates.contains(&node.id))
            .find(|node| node.region_bounds().contains(point))
            .map(|node| node.id)
    }

    /// Topmost connector whose screen-space anchor falls inside `pick_box`.
    ///
    /// Nodes are scanned topmost first, inputs before outputs.
    pub fn hit_test_connector(&self, pick_box: Rect, zoom: f32) -> Option<ConnectorId> {
        profile_scope!("hit_test_connector");

        self.nodes.iter().rev().find_map(|node| {
            node.all_connectors()
                .find(|c| {
                    let anchor = node.connector_anchor(c.direction(), c.id.index) * zoom;
                    pick_box.contains(anchor)
                })
                .map(|c| c.id)
        })
    }

    /// Nodes whose region strictly intersects `rect` (model space), topmost first.
    pub fn nodes_intersecting(&self, rect: Rect) -> Vec<NodeId> {
        let rect = rect.normalized();
        let candidates: HashSet<NodeId> = self.spatial.query_rect(rect).into_iter().collect();

        self.nodes
            .iter()
            .rev()
            .filter(|node| candidates.contains(&node.id))
            .filter(|node| rect.intersects(&node.region_bounds()))
            .map(|node| node.id)
            .collect()
    }
}
