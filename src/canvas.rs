//! The host-facing editor surface.
//!
//! [`FlowCanvas`] owns the graph, selection, viewport, interaction session,
//! pending invalidations and the reprocess queue. Input handlers live in
//! [`crate::input`] as further `impl FlowCanvas` blocks.

use crate::config::EditorConfig;
use crate::error::{FlowError, FlowResult};
use crate::geometry::Rect;
use crate::graph::{ConnectOutcome, ConnectorId, Graph, HostContext, NodeBuilder, NodeId};
use crate::input::{InteractionState, Session};
use crate::render::{Invalidations, RenderSurface};
use crate::reprocess::{QueueEvent, ReprocessOutcome, ReprocessQueue};
use crate::selection::Selection;
use crate::viewport::Viewport;
use glam::Vec2;
use std::any::Any;
use std::sync::mpsc::{self, Receiver};

type SelectionObserver = Box<dyn FnMut(&Selection)>;
type DepthObserver = Box<dyn FnMut(usize)>;

#[derive(Default)]
struct Observers {
    selection_changed: Option<SelectionObserver>,
    queue_depth_changed: Option<DepthObserver>,
}

/// Reprocess worker handle plus the channel its events come back on.
struct ReprocessState {
    queue: ReprocessQueue,
    events: Receiver<QueueEvent>,
}

pub struct FlowCanvas {
    pub(crate) graph: Graph,
    pub(crate) selection: Selection,
    pub(crate) viewport: Viewport,
    pub(crate) interaction: InteractionState,
    pub(crate) invalidations: Invalidations,
    pub(crate) config: EditorConfig,
    reprocess: ReprocessState,
    observers: Observers,
}

impl FlowCanvas {
    /// Validate `config` and start the reprocess worker.
    pub fn new(config: EditorConfig) -> FlowResult<Self> {
        config.validate()?;

        let (tx, rx) = mpsc::channel();
        let queue = ReprocessQueue::spawn(config.reprocess_idle_poll(), move |event| {
            // Receiver gone means the canvas is being torn down.
            let _ = tx.send(event);
        })?;

        tracing::debug!(?config, "Canvas created");
        Ok(Self {
            graph: Graph::new(),
            selection: Selection::new(),
            viewport: Viewport::default(),
            interaction: InteractionState::default(),
            invalidations: Invalidations::default(),
            config,
            reprocess: ReprocessState { queue, events: rx },
            observers: Observers::default(),
        })
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn zoom(&self) -> f32 {
        self.viewport.zoom()
    }

    pub fn session(&self) -> &Session {
        &self.interaction.session
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn is_multiselect_latched(&self) -> bool {
        self.interaction.multiselect_latched
    }

    pub fn last_pointer(&self) -> Vec2 {
        self.interaction.last_pointer
    }

    pub fn last_context_location(&self) -> Vec2 {
        self.interaction.last_context_location
    }

    /// Rectangles recorded since the last flush
    pub fn pending_invalidations(&self) -> &Invalidations {
        &self.invalidations
    }

    pub fn queue_depth(&self) -> usize {
        self.reprocess.queue.depth()
    }

    pub fn on_selection_changed(&mut self, observer: impl FnMut(&Selection) + 'static) {
        self.observers.selection_changed = Some(Box::new(observer));
    }

    /// Depth reports are delivered from [`FlowCanvas::process_queue_events`].
    pub fn on_queue_depth_changed(&mut self, observer: impl FnMut(usize) + 'static) {
        self.observers.queue_depth_changed = Some(Box::new(observer));
    }

    // ------------------------------------------------------------------
    // Nodes
    // ------------------------------------------------------------------

    /// Add a node at the position its builder carries.
    pub fn add_node(&mut self, builder: NodeBuilder) -> NodeId {
        let id = self.graph.insert(builder);
        self.invalidate_node(id);
        id
    }

    /// Add a node where the last secondary press landed.
    pub fn add_node_at_last_context_location(&mut self, builder: NodeBuilder) -> NodeId {
        let at = self
            .viewport
            .screen_to_model(self.interaction.last_context_location);
        self.add_node(builder.at(at.x, at.y))
    }

    /// Add a node the host rebuilt from its own storage and run its
    /// `on_deserialized` hook.
    pub fn restore_node(&mut self, builder: NodeBuilder) -> NodeId {
        let id = self.add_node(builder);
        if let Some(node) = self.graph.node(id) {
            let behavior = node.behavior().clone();
            let host = HostContext {
                graph: &self.graph,
                zoom: self.viewport.zoom(),
                node: id,
            };
            behavior.on_deserialized(&host);
        }
        id
    }

    /// Remove a node, its links and any gesture that involved it.
    pub fn remove_node(&mut self, id: NodeId) -> FlowResult<()> {
        if !self.graph.contains(id) {
            return Err(FlowError::NodeNotFound(id));
        }
        self.invalidate_node(id);
        self.graph.remove(id)?;

        let session = &self.interaction.session;
        let involved = session.dragged_nodes().contains(&id)
            || session.armed_connector().is_some_and(|c| c.node == id);
        if involved {
            tracing::debug!(node = %id, session = session.name(), "Gesture cancelled by removal");
            self.interaction.session = Session::Idle;
            self.invalidations.push_all();
        }

        let before = self.selection.sorted();
        if self.selection.remove(id) {
            self.selection_changed(&before);
        }
        Ok(())
    }

    /// Link two connectors as the controller would, invalidating both nodes.
    pub fn connect(&mut self, pending: ConnectorId, target: ConnectorId) -> FlowResult<ConnectOutcome> {
        self.invalidate_node(pending.node);
        self.invalidate_node(target.node);
        let outcome = self.graph.connect(pending, target)?;
        if outcome == ConnectOutcome::Linked {
            self.invalidate_node(pending.node);
            self.invalidate_node(target.node);
        }
        Ok(outcome)
    }

    /// Tell a node its properties were edited by the host.
    pub fn notify_property_updated(&mut self, id: NodeId) -> FlowResult<()> {
        let node = self.graph.node(id).ok_or(FlowError::NodeNotFound(id))?;
        node.behavior().on_property_updated();
        self.invalidate_node(id);
        Ok(())
    }

    /// Object for the host's property inspector, from the primary selection.
    pub fn inspect_selected(&self) -> Option<&dyn Any> {
        let id = self.selection.primary()?;
        self.graph.node(id)?.behavior().inspectable()
    }

    // ------------------------------------------------------------------
    // Reprocessing
    // ------------------------------------------------------------------

    /// Queue a node for background reprocessing.
    ///
    /// Returns `Ok(false)` when the node is already waiting. The
    /// `processing_disabled` flag is left to the node type.
    pub fn push_for_reprocessing(&self, id: NodeId) -> FlowResult<bool> {
        let node = self.graph.node(id).ok_or(FlowError::NodeNotFound(id))?;
        Ok(self.reprocess.queue.push(id, node.behavior().clone()))
    }

    /// Drain worker events on the interaction thread. Returns how many were handled.
    pub fn process_queue_events(&mut self) -> usize {
        let mut handled = 0;
        while let Ok(event) = self.reprocess.events.try_recv() {
            handled += 1;
            match event {
                QueueEvent::DepthChanged(depth) => {
                    if let Some(observer) = self.observers.queue_depth_changed.as_mut() {
                        observer(depth);
                    }
                }
                QueueEvent::Reprocessed { node, outcome } => {
                    if let ReprocessOutcome::Failed(reason) = &outcome {
                        tracing::debug!(%node, %reason, "Reprocess reported failure");
                    }
                    // The node may have been removed while the worker ran.
                    if self.graph.update(node, |n| n.dirty = true).is_ok() {
                        self.invalidate_node(node);
                    }
                }
            }
        }
        handled
    }

    // ------------------------------------------------------------------
    // Painting
    // ------------------------------------------------------------------

    /// Draw nodes bottom-up, then the preview line and marquee. Clears dirty flags.
    pub fn paint(&mut self, surface: &mut dyn RenderSurface) {
        for node in self.graph.nodes() {
            surface.draw_node(node, &self.viewport, self.selection.contains(node.id));
        }

        match self.interaction.session {
            Session::ConnectingArmed { connector } => {
                if let Some(anchor) = self.graph.connector_anchor(connector) {
                    let from = self.viewport.model_to_screen(anchor);
                    surface.draw_preview_line(from, self.interaction.last_pointer);
                }
            }
            Session::Marqueeing { start, end } => {
                surface.draw_marquee(Rect::from_corners(start, end));
            }
            _ => {}
        }

        let dirty: Vec<NodeId> = self.graph.nodes().filter(|n| n.dirty).map(|n| n.id).collect();
        for id in dirty {
            let _ = self.graph.update(id, |n| n.dirty = false);
        }
    }

    /// Hand every pending invalidation to `surface`.
    pub fn flush_invalidations(&mut self, surface: &mut dyn RenderSurface) {
        self.invalidations.flush(surface);
    }

    // ------------------------------------------------------------------
    // Shared helpers for the input handlers
    // ------------------------------------------------------------------

    /// Screen rectangles covering everything `id` paints: its invalidation
    /// bounds, connector glyphs and attached link lines.
    pub(crate) fn node_footprint(&self, id: NodeId) -> Vec<Rect> {
        let Some(node) = self.graph.node(id) else {
            return Vec::new();
        };
        let padding = self.config.stroke_padding;

        let mut rects = vec![self.viewport.rect_to_screen(node.invalidation_bounds())];
        rects.extend(
            node.connector_regions_to_invalidate()
                .map(|r| self.viewport.rect_to_screen(r)),
        );
        rects.extend(
            self.graph
                .link_regions(id)
                .into_iter()
                .map(|r| self.viewport.rect_to_screen(r).inflate(padding)),
        );
        rects
    }

    pub(crate) fn invalidate_node(&mut self, id: NodeId) {
        for rect in self.node_footprint(id) {
            self.invalidations.push(rect);
        }
    }

    /// Invalidate the preview segment from `connector`'s anchor to `pointer`.
    pub(crate) fn invalidate_preview(&mut self, connector: ConnectorId, pointer: Vec2) {
        if let Some(anchor) = self.graph.connector_anchor(connector) {
            let from = self.viewport.model_to_screen(anchor);
            let rect = Rect::from_corners(from, pointer).inflate(self.config.stroke_padding);
            self.invalidations.push(rect);
        }
    }

    pub(crate) fn select_only(&mut self, id: NodeId) {
        let before = self.selection.sorted();
        if self.selection.select_only(id) {
            self.selection_changed(&before);
        }
    }

    pub(crate) fn clear_selection(&mut self) {
        let before = self.selection.sorted();
        if self.selection.clear() {
            self.selection_changed(&before);
        }
    }

    pub(crate) fn replace_selection(&mut self, nodes: Vec<NodeId>) {
        let before = self.selection.sorted();
        if self.selection.replace(nodes) {
            self.selection_changed(&before);
        }
    }

    /// Repaint nodes whose highlight flipped and notify the host.
    fn selection_changed(&mut self, before: &[NodeId]) {
        let after = self.selection.sorted();
        for &id in before.iter().chain(after.iter()) {
            if let Some(node) = self.graph.node(id) {
                let rect = self.viewport.rect_to_screen(node.invalidation_bounds());
                self.invalidations.push(rect);
            }
        }

        tracing::debug!(selected = after.len(), primary = ?self.selection.primary(), "Selection changed");
        if let Some(observer) = self.observers.selection_changed.as_mut() {
            observer(&self.selection);
        }
    }
}
