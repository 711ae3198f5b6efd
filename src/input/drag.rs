//! Pointer move handling - node drags, panning, marquee and preview line.
//!
//! ## Performance Notes
//!
//! Pointer move fires for every mouse motion event. Only the rectangles
//! that actually changed are invalidated, except while panning where every
//! node moves and the whole surface is stale anyway.

use super::Session;
use crate::canvas::FlowCanvas;
use crate::geometry::Rect;
use crate::graph::{ConnectorId, NodeId};
use crate::profile_scope;
use glam::Vec2;

impl FlowCanvas {
    pub fn pointer_move(&mut self, position: Vec2) {
        profile_scope!("pointer_move");

        let previous = std::mem::replace(&mut self.interaction.last_pointer, position);

        match self.interaction.session.clone() {
            Session::Idle => {}
            Session::Marqueeing { start, end } => self.sweep_marquee(start, end, position),
            Session::DraggingOne { node, offset } => self.drag_node(node, offset, position),
            Session::DraggingMany { offsets } => {
                for (node, offset) in offsets {
                    self.drag_node(node, offset, position);
                }
            }
            Session::Panning { last } => {
                self.translate_nodes(position - last);
                self.interaction.session = Session::Panning { last: position };
            }
            Session::ConnectingArmed { connector } => {
                self.sweep_preview(connector, previous, position);
            }
        }
    }

    /// Move one node so it keeps `offset` to the pointer, invalidating its
    /// old and new footprint.
    fn drag_node(&mut self, node: NodeId, offset: Vec2, position: Vec2) {
        profile_scope!("drag_node");

        let model = self.viewport.screen_to_model(position);
        self.invalidate_node(node);
        if let Err(e) = self.graph.set_position(node, model - offset) {
            tracing::warn!(%node, error = %e, "Dragged node vanished");
            return;
        }
        self.invalidate_node(node);
    }

    fn sweep_marquee(&mut self, start: Vec2, old_end: Vec2, new_end: Vec2) {
        let padding = self.config.stroke_padding;
        self.invalidations
            .push(Rect::from_corners(start, old_end).inflate(padding));
        self.invalidations
            .push(Rect::from_corners(start, new_end).inflate(padding));
        self.interaction.session = Session::Marqueeing {
            start,
            end: new_end,
        };
    }

    fn sweep_preview(&mut self, connector: ConnectorId, previous: Vec2, position: Vec2) {
        self.invalidate_preview(connector, previous);
        self.invalidate_preview(connector, position);
    }
}
