//! Pointer press handling - selection, drag start, connector arming and
//! connection completion, pan start.
//!
//! ## Performance Notes
//!
//! Node hit-testing goes through the graph's R-tree; connector picking scans
//! anchors topmost node first and stops at the first hit.

use super::{PointerButton, PointerEvent, Session};
use crate::canvas::FlowCanvas;
use crate::geometry::Rect;
use crate::graph::{ConnectOutcome, ConnectorId, NodeId};
use crate::profile_scope;
use glam::Vec2;

impl FlowCanvas {
    pub fn pointer_down(&mut self, event: PointerEvent) {
        profile_scope!("pointer_down");

        // A gesture already holds the pointer.
        let session = &self.interaction.session;
        if session.is_dragging() || session.is_panning() || session.is_marqueeing() {
            tracing::trace!(session = session.name(), button = ?event.button, "Press ignored");
            return;
        }

        // The preview line still ends at the previous pointer position.
        if let Some(connector) = self.interaction.session.armed_connector() {
            self.invalidate_preview(connector, self.interaction.last_pointer);
        }
        self.interaction.last_pointer = event.position;

        match event.button {
            PointerButton::Primary => self.primary_down(event.position),
            PointerButton::Secondary => self.secondary_down(event.position),
            PointerButton::Middle => self.begin_panning(event.position),
        }
    }

    fn primary_down(&mut self, position: Vec2) {
        if self.interaction.multiselect_latched {
            self.interaction.session = Session::Marqueeing {
                start: position,
                end: position,
            };
            tracing::debug!(x = position.x, y = position.y, "Marquee started");
            return;
        }

        if let Some(pending) = self.interaction.session.armed_connector() {
            self.complete_connection(pending, position);
            return;
        }

        let model = self.viewport.screen_to_model(position);
        if let Some(hit) = self.graph.hit_test_node(model) {
            self.begin_drag(hit, model);
            return;
        }

        self.clear_selection();

        if let Some(connector) = self.pick_connector(position) {
            self.interaction.session = Session::ConnectingArmed { connector };
            self.invalidate_preview(connector, position);
            tracing::debug!(%connector, "Connector armed");
            return;
        }

        self.begin_panning(position);
    }

    fn secondary_down(&mut self, position: Vec2) {
        if let Some(connector) = self.interaction.session.armed_connector() {
            self.interaction.session = Session::Idle;
            self.invalidate_preview(connector, position);
            tracing::debug!(%connector, "Connector disarmed");
            return;
        }

        let model = self.viewport.screen_to_model(position);
        match self.graph.hit_test_node(model) {
            Some(hit) => self.select_only(hit),
            None => self.clear_selection(),
        }
        self.interaction.last_context_location = position;
    }

    /// A multi-selection survives the press and is dragged as a group,
    /// whichever node was hit.
    fn begin_drag(&mut self, hit: NodeId, model: Vec2) {
        if self.selection.is_multi() {
            let offsets: Vec<_> = self
                .selection
                .sorted()
                .into_iter()
                .filter_map(|id| self.graph.node(id).map(|n| (id, model - n.position)))
                .collect();
            tracing::debug!(nodes = offsets.len(), "Group drag started");
            self.interaction.session = Session::DraggingMany { offsets };
            return;
        }

        self.select_only(hit);
        if let Some(node) = self.graph.node(hit) {
            let offset = model - node.position;
            tracing::debug!(node = %hit, "Drag started");
            self.interaction.session = Session::DraggingOne { node: hit, offset };
        }
    }

    fn begin_panning(&mut self, position: Vec2) {
        tracing::trace!("Pan started");
        self.interaction.session = Session::Panning { last: position };
    }

    /// Topmost connector whose anchor lies in the pick box around `position` (screen).
    pub(crate) fn pick_connector(&self, position: Vec2) -> Option<ConnectorId> {
        let pick_box = Rect::centered(position, self.config.connector_pick_size);
        self.graph.hit_test_connector(pick_box, self.viewport.zoom())
    }

    /// Second press while armed. A miss keeps the connector armed; a hit
    /// links or aborts, and disarms either way.
    fn complete_connection(&mut self, pending: ConnectorId, position: Vec2) {
        let Some(target) = self.pick_connector(position) else {
            tracing::trace!(%pending, "Press missed every connector, still armed");
            return;
        };

        self.interaction.session = Session::Idle;
        self.invalidate_preview(pending, position);

        match self.connect(pending, target) {
            Ok(ConnectOutcome::Linked) => {}
            Ok(ConnectOutcome::Rejected(reason)) => {
                tracing::debug!(%pending, %target, ?reason, "Connection aborted");
            }
            Err(e) => tracing::warn!(%pending, %target, error = %e, "Connection failed"),
        }
    }
}
