//! Render collaborator interface and pending invalidations.
//!
//! The editor never draws pixels. It tells a [`RenderSurface`] which
//! screen rectangles went stale and, when asked to paint, hands it nodes,
//! the preview line and the marquee in paint order.

use crate::geometry::Rect;
use crate::graph::Node;
use crate::viewport::Viewport;
use glam::Vec2;

pub trait RenderSurface {
    /// Draw one node. `highlighted` is true for selected nodes.
    fn draw_node(&mut self, node: &Node, viewport: &Viewport, highlighted: bool);

    /// Line from the armed connector's anchor to the pointer (screen space).
    fn draw_preview_line(&mut self, from: Vec2, to: Vec2);

    /// Marquee rectangle (screen space, normalized).
    fn draw_marquee(&mut self, rect: Rect);

    /// Mark a screen rectangle dirty. Always called with non-negative extents.
    fn invalidate(&mut self, rect: Rect);

    /// Mark the whole surface dirty.
    fn invalidate_all(&mut self);
}

/// Screen rectangles waiting to be handed to the surface.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Invalidations {
    rects: Vec<Rect>,
    full: bool,
}

impl Invalidations {
    pub fn push(&mut self, rect: Rect) {
        if self.full {
            return;
        }
        let rect = rect.normalized();
        if rect.width == 0.0 && rect.height == 0.0 {
            return;
        }
        self.rects.push(rect);
    }

    pub fn push_all(&mut self) {
        self.full = true;
        self.rects.clear();
    }

    pub fn is_full(&self) -> bool {
        self.full
    }

    pub fn is_empty(&self) -> bool {
        !self.full && self.rects.is_empty()
    }

    pub fn rects(&self) -> &[Rect] {
        &self.rects
    }

    /// True if some pending rectangle (or a full invalidation) covers `rect`.
    pub fn covers(&self, rect: &Rect) -> bool {
        self.full || self.rects.iter().any(|r| r.contains_rect(rect))
    }

    /// Forward everything to `surface` and reset.
    pub fn flush(&mut self, surface: &mut dyn RenderSurface) {
        if self.full {
            surface.invalidate_all();
        } else {
            for rect in self.rects.drain(..) {
                surface.invalidate(rect);
            }
        }
        self.clear();
    }

    pub fn clear(&mut self) {
        self.rects.clear();
        self.full = false;
    }
}
