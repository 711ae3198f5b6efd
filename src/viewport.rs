//! Zoom and screen/model conversion.
//!
//! Pointer positions arrive in screen space and are divided by the zoom to
//! reach model space. Model rectangles headed for the render collaborator
//! are multiplied by the zoom and normalized, because invalidating a
//! rectangle with negative extent is undefined for most backends.

use crate::constants::{DEFAULT_ZOOM, MAX_ZOOM, MIN_ZOOM};
use crate::geometry::Rect;
use glam::Vec2;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    zoom: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self { zoom: DEFAULT_ZOOM }
    }
}

impl Viewport {
    #[inline]
    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    /// Accept `zoom` if it lies in `[MIN_ZOOM, MAX_ZOOM]`.
    ///
    /// Anything else (NaN included) is ignored. Returns whether the zoom changed.
    pub fn set_zoom(&mut self, zoom: f32) -> bool {
        if !(MIN_ZOOM..=MAX_ZOOM).contains(&zoom) {
            tracing::trace!(zoom, "Ignoring out-of-range zoom");
            return false;
        }
        if zoom == self.zoom {
            return false;
        }
        self.zoom = zoom;
        true
    }

    #[inline]
    pub fn screen_to_model(&self, screen: Vec2) -> Vec2 {
        screen * (1.0 / self.zoom)
    }

    #[inline]
    pub fn model_to_screen(&self, model: Vec2) -> Vec2 {
        model * self.zoom
    }

    /// Convert a screen-space delta (for pans and drags).
    #[inline]
    pub fn delta_to_model(&self, delta: Vec2) -> Vec2 {
        delta / self.zoom
    }

    pub fn rect_to_screen(&self, model: Rect) -> Rect {
        model.scaled(self.zoom).normalized()
    }

    pub fn rect_to_model(&self, screen: Rect) -> Rect {
        screen.normalized().scaled(1.0 / self.zoom)
    }
}
