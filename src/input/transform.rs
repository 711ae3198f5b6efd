//! Canvas transformations - zoom and programmatic pan.
//!
//! Panning moves every node rather than a camera offset, so node positions
//! always equal what the host sees on screen divided by the zoom.

use crate::canvas::FlowCanvas;
use glam::Vec2;

impl FlowCanvas {
    /// Set the zoom. Out-of-range values are ignored without invalidating.
    pub fn set_zoom(&mut self, zoom: f32) -> bool {
        if !self.viewport.set_zoom(zoom) {
            return false;
        }
        tracing::debug!(zoom, "Zoom changed");
        self.invalidations.push_all();
        true
    }

    /// Pan by a screen-space delta.
    pub fn pan(&mut self, dx: f32, dy: f32) {
        self.translate_nodes(Vec2::new(dx, dy));
    }

    pub(crate) fn translate_nodes(&mut self, screen_delta: Vec2) {
        if screen_delta == Vec2::ZERO {
            return;
        }
        let delta = self.viewport.delta_to_model(screen_delta);
        self.graph.translate_all(delta);
        self.invalidations.push_all();
    }
}
