//! Nodes (flow elements) and the hooks a node type implements.
//!
//! A node is a positioned rectangle with a title bar, an optional cached
//! auxiliary image below its body, and connectors stacked down its left
//! (inputs) and right (outputs) edges. All geometry here is model space.

use super::Graph;
use super::connector::{Connector, ConnectorSpec};
use super::ids::{ConnectorId, Direction, NodeId};
use crate::constants::{
    CONNECTOR_PADDING, CONNECTOR_SIZE, IMAGE_CHROME_HEIGHT, IMAGE_CHROME_WIDTH, TITLE_BAR_HEIGHT,
};
use crate::geometry::Rect;
use glam::Vec2;
use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// Capability hooks supplied by a node type.
///
/// The editor only calls these; it never implements node-specific behaviour.
/// `on_reprocess_requested` runs on the reprocess worker thread.
pub trait NodeBehavior: Send + Sync {
    /// Object shown by the host's property inspector.
    fn inspectable(&self) -> Option<&dyn Any> {
        None
    }

    fn on_property_updated(&self) {}

    /// Recompute the node's output. Errors are logged by the worker.
    fn on_reprocess_requested(&self) -> anyhow::Result<()> {
        Ok(())
    }

    /// Called once after the host restores a node from its own storage.
    fn on_deserialized(&self, _host: &HostContext<'_>) {}

    /// This side's approval of a link between `own` and `other`.
    fn can_connect(&self, own: &Connector, other: &Connector) -> bool {
        own.is_compatible_with(other)
    }
}

/// Behaviour for nodes that need no hooks.
#[derive(Debug, Default, Clone, Copy)]
pub struct InertBehavior;

impl NodeBehavior for InertBehavior {}

/// What a node type gets to see when it is restored into a canvas.
pub struct HostContext<'a> {
    pub graph: &'a Graph,
    pub zoom: f32,
    pub node: NodeId,
}

pub struct Node {
    pub id: NodeId,
    pub title: String,
    pub position: Vec2,
    pub size: Vec2,
    pub processing_disabled: bool,
    /// Extent of the cached auxiliary image drawn under the body
    pub auxiliary_image: Option<Vec2>,
    /// Set when a reprocess finished and the node has not been repainted yet
    pub dirty: bool,
    inputs: Vec<Connector>,
    outputs: Vec<Connector>,
    behavior: Arc<dyn NodeBehavior>,
}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("id", &self.id)
            .field("title", &self.title)
            .field("position", &self.position)
            .field("size", &self.size)
            .field("inputs", &self.inputs.len())
            .field("outputs", &self.outputs.len())
            .finish_non_exhaustive()
    }
}

impl Node {
    pub fn inputs(&self) -> &[Connector] {
        &self.inputs
    }

    pub fn outputs(&self) -> &[Connector] {
        &self.outputs
    }

    pub fn connectors(&self, direction: Direction) -> &[Connector] {
        match direction {
            Direction::Input => &self.inputs,
            Direction::Output => &self.outputs,
        }
    }

    pub(crate) fn connectors_mut(&mut self, direction: Direction) -> &mut [Connector] {
        match direction {
            Direction::Input => &mut self.inputs,
            Direction::Output => &mut self.outputs,
        }
    }

    /// Inputs then outputs.
    pub fn all_connectors(&self) -> impl Iterator<Item = &Connector> {
        self.inputs.iter().chain(self.outputs.iter())
    }

    pub fn connector(&self, id: ConnectorId) -> Option<&Connector> {
        if id.node != self.id {
            return None;
        }
        self.connectors(id.direction).get(id.index)
    }

    pub(crate) fn connector_mut(&mut self, id: ConnectorId) -> Option<&mut Connector> {
        if id.node != self.id {
            return None;
        }
        self.connectors_mut(id.direction).get_mut(id.index)
    }

    pub fn behavior(&self) -> &Arc<dyn NodeBehavior> {
        &self.behavior
    }

    /// Paint and hit-test box.
    pub fn region_bounds(&self) -> Rect {
        Rect::new(self.position.x, self.position.y, self.size.x, self.size.y)
    }

    pub fn title_bar_bounds(&self) -> Rect {
        Rect::new(self.position.x, self.position.y, self.size.x, TITLE_BAR_HEIGHT)
    }

    pub fn image_width(&self) -> f32 {
        self.size.x - IMAGE_CHROME_WIDTH
    }

    pub fn image_height(&self) -> f32 {
        self.size.y - IMAGE_CHROME_HEIGHT
    }

    /// Resize the node so its image area is exactly `width` x `height`.
    pub fn set_image_size(&mut self, width: f32, height: f32) {
        self.size = Vec2::new(width + IMAGE_CHROME_WIDTH, height + IMAGE_CHROME_HEIGHT);
    }

    /// Everything that may need repainting when this node changes.
    ///
    /// Widened on the left by the widest input label and on the right by the
    /// widest output label, and deepened by the auxiliary image and by a
    /// connector stack taller than the body.
    pub fn invalidation_bounds(&self) -> Rect {
        let max_in = max_invalidation_width(&self.inputs);
        let max_out = max_invalidation_width(&self.outputs);
        let aux_height = self.auxiliary_image.map_or(0.0, |aux| aux.y);
        let slots = self.inputs.len().max(self.outputs.len()) as f32;
        let stack_height = TITLE_BAR_HEIGHT + slots * (CONNECTOR_SIZE + CONNECTOR_PADDING);

        Rect::new(
            self.position.x - CONNECTOR_PADDING * 2.0 - CONNECTOR_SIZE - max_in,
            self.position.y,
            self.size.x + (CONNECTOR_PADDING * 3.0 + CONNECTOR_SIZE) * 2.0 + max_in + max_out,
            (self.size.y + aux_height).max(stack_height),
        )
    }

    /// Centre of a connector glyph.
    pub fn connector_anchor(&self, direction: Direction, index: usize) -> Vec2 {
        let y = self.position.y
            + TITLE_BAR_HEIGHT
            + CONNECTOR_PADDING
            + index as f32 * (CONNECTOR_SIZE + CONNECTOR_PADDING)
            + CONNECTOR_SIZE / 2.0;
        let x = match direction {
            Direction::Input => self.position.x - CONNECTOR_PADDING - CONNECTOR_SIZE / 2.0,
            Direction::Output => {
                self.position.x + self.size.x + CONNECTOR_PADDING + CONNECTOR_SIZE / 2.0
            }
        };
        Vec2::new(x, y)
    }

    /// Glyph plus label area of one connector.
    pub fn connector_region(&self, connector: &Connector) -> Rect {
        let anchor = self.connector_anchor(connector.direction(), connector.id.index);
        let width = CONNECTOR_PADDING * 2.0 + CONNECTOR_SIZE + connector.invalidation_width;
        let x = match connector.direction() {
            Direction::Input => self.position.x - width,
            Direction::Output => self.position.x + self.size.x,
        };
        Rect::new(x, anchor.y - CONNECTOR_SIZE / 2.0, width, CONNECTOR_SIZE)
    }

    /// One rectangle per connector, inputs first.
    pub fn connector_regions_to_invalidate(&self) -> impl Iterator<Item = Rect> + '_ {
        self.all_connectors().map(|c| self.connector_region(c))
    }
}

fn max_invalidation_width(connectors: &[Connector]) -> f32 {
    connectors
        .iter()
        .map(|c| c.invalidation_width)
        .fold(0.0, f32::max)
}

/// A node that has not been placed in a graph yet.
///
/// # Example
/// ```ignore
/// let id = canvas.add_node_at_last_context_location(
///     NodeBuilder::new("Blur", Arc::new(BlurNode::default()))
///         .with_size(120.0, 80.0)
///         .with_input(ConnectorSpec::new("image", "image"))
///         .with_output(ConnectorSpec::new("image", "image")),
/// );
/// ```
pub struct NodeBuilder {
    pub(crate) title: String,
    pub(crate) position: Vec2,
    pub(crate) size: Vec2,
    pub(crate) processing_disabled: bool,
    pub(crate) auxiliary_image: Option<Vec2>,
    pub(crate) inputs: Vec<ConnectorSpec>,
    pub(crate) outputs: Vec<ConnectorSpec>,
    pub(crate) behavior: Arc<dyn NodeBehavior>,
}

impl NodeBuilder {
    pub fn new(title: impl Into<String>, behavior: Arc<dyn NodeBehavior>) -> Self {
        Self {
            title: title.into(),
            position: Vec2::ZERO,
            size: Vec2::new(100.0, 60.0),
            processing_disabled: false,
            auxiliary_image: None,
            inputs: Vec::new(),
            outputs: Vec::new(),
            behavior,
        }
    }

    pub fn inert(title: impl Into<String>) -> Self {
        Self::new(title, Arc::new(InertBehavior))
    }

    pub fn at(mut self, x: f32, y: f32) -> Self {
        self.position = Vec2::new(x, y);
        self
    }

    pub fn with_size(mut self, width: f32, height: f32) -> Self {
        self.size = Vec2::new(width, height);
        self
    }

    pub fn with_input(mut self, spec: ConnectorSpec) -> Self {
        self.inputs.push(spec);
        self
    }

    pub fn with_output(mut self, spec: ConnectorSpec) -> Self {
        self.outputs.push(spec);
        self
    }

    pub fn with_auxiliary_image(mut self, width: f32, height: f32) -> Self {
        self.auxiliary_image = Some(Vec2::new(width, height));
        self
    }

    pub fn processing_disabled(mut self, disabled: bool) -> Self {
        self.processing_disabled = disabled;
        self
    }

    pub(crate) fn build(self, id: NodeId) -> Node {
        let inputs = self
            .inputs
            .into_iter()
            .enumerate()
            .map(|(i, spec)| Connector::new(ConnectorId::input(id, i), spec))
            .collect();
        let outputs = self
            .outputs
            .into_iter()
            .enumerate()
            .map(|(i, spec)| Connector::new(ConnectorId::output(id, i), spec))
            .collect();

        Node {
            id,
            title: self.title,
            position: self.position,
            size: self.size,
            processing_disabled: self.processing_disabled,
            auxiliary_image: self.auxiliary_image,
            dirty: false,
            inputs,
            outputs,
            behavior: self.behavior,
        }
    }
}
