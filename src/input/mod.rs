//! Pointer and keyboard handling for the canvas.
//!
//! This module turns raw input events into graph, selection and viewport
//! changes, and records the screen rectangles each change leaves stale.
//!
//! ## Architecture
//!
//! The controller is an explicit state machine ([`Session`]). The
//! multiselect latch, last pointer position and last context-menu location
//! sit beside it because they outlive individual gestures.
//!
//! ## Modules
//!
//! - `state` - Session enum and helper queries
//! - `pointer_down` - Press handling (select, drag start, connect, pan start)
//! - `drag` - Pointer move handling (drag, pan, marquee, preview line)
//! - `pointer_up` - Release handling (finalize marquee, end drags)
//! - `keys` - Multiselect modifier latch
//! - `transform` - Zoom and programmatic pan

mod drag;
mod keys;
mod pointer_down;
mod pointer_up;
mod state;
mod transform;

pub use state::Session;

use glam::Vec2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerButton {
    Primary,
    Secondary,
    Middle,
}

/// A press or release at a screen position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub position: Vec2,
    pub button: PointerButton,
}

impl PointerEvent {
    pub fn new(x: f32, y: f32, button: PointerButton) -> Self {
        Self {
            position: Vec2::new(x, y),
            button,
        }
    }

    pub fn primary(x: f32, y: f32) -> Self {
        Self::new(x, y, PointerButton::Primary)
    }

    pub fn secondary(x: f32, y: f32) -> Self {
        Self::new(x, y, PointerButton::Secondary)
    }

    pub fn middle(x: f32, y: f32) -> Self {
        Self::new(x, y, PointerButton::Middle)
    }
}

/// Keys the controller reacts to. Hosts map their own key codes onto these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// Held to rubber-band select (shift on most hosts)
    Multiselect,
    Other,
}

/// State that lives beside the session across gestures.
#[derive(Debug, Clone, Default)]
pub(crate) struct InteractionState {
    pub session: Session,
    /// Multiselect modifier is held
    pub multiselect_latched: bool,
    /// Last pointer position seen (screen)
    pub last_pointer: Vec2,
    /// Where the last secondary press landed (screen)
    pub last_context_location: Vec2,
}
