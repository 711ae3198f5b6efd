//! Pointer release handling - finalize marquee, end drags and pans.
//!
//! Connections complete on press, so an armed connector survives release.

use super::Session;
use crate::canvas::FlowCanvas;
use crate::geometry::Rect;
use crate::profile_scope;
use glam::Vec2;

impl FlowCanvas {
    pub fn pointer_up(&mut self, position: Vec2) {
        profile_scope!("pointer_up");

        self.interaction.last_pointer = position;

        match self.interaction.session.take() {
            Session::Marqueeing { start, .. } => self.finish_marquee(start, position),
            Session::DraggingOne { node, .. } => {
                tracing::debug!(%node, "Drag finished");
            }
            Session::DraggingMany { offsets } => {
                tracing::debug!(nodes = offsets.len(), "Group drag finished");
            }
            Session::Panning { .. } => tracing::trace!("Pan finished"),
            armed @ Session::ConnectingArmed { .. } => self.interaction.session = armed,
            Session::Idle => {}
        }
    }

    /// Select every node whose region intersects the marquee.
    pub(crate) fn finish_marquee(&mut self, start: Vec2, end: Vec2) {
        let screen = Rect::from_corners(start, end);
        let model = self.viewport.rect_to_model(screen);
        let hits = self.graph.nodes_intersecting(model);

        tracing::debug!(?screen, selected = hits.len(), "Marquee finished");
        self.replace_selection(hits);
        self.invalidations.push_all();
    }
}
