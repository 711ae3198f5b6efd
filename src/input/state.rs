//! Interaction session - the single transient mode of the controller.
//!
//! Exactly one session is active at a time; every transition replaces the
//! whole value, so a drag can never overlap a pan, a marquee or an armed
//! connector.
//!
//! ## State Transitions
//!
//! ```text
//! Idle -> Marqueeing         (primary down while the multiselect latch is held)
//! Idle -> DraggingOne        (primary down on a node)
//! Idle -> DraggingMany       (primary down on any node while several are selected)
//! Idle -> ConnectingArmed    (primary down near a connector anchor)
//! Idle -> Panning            (primary down on empty canvas, or middle down)
//!
//! ConnectingArmed -> Idle    (primary down on a second connector, or secondary down)
//! Marqueeing -> Idle         (pointer up, or latch released)
//! Dragging*/Panning -> Idle  (pointer up)
//! ```

use crate::graph::{ConnectorId, NodeId};
use glam::Vec2;

#[derive(Debug, Clone, Default, PartialEq)]
pub enum Session {
    /// No gesture in progress
    #[default]
    Idle,

    /// Dragging a single node
    DraggingOne {
        node: NodeId,
        /// Pointer minus node origin, in model units
        offset: Vec2,
    },

    /// Dragging every node of a multi-selection together
    DraggingMany {
        /// Per-node pointer minus origin, in model units
        offsets: Vec<(NodeId, Vec2)>,
    },

    /// Translating every node with the pointer
    Panning {
        /// Last pointer position (screen) for delta calculation
        last: Vec2,
    },

    /// A connector is waiting for its partner
    ConnectingArmed { connector: ConnectorId },

    /// Rubber-band selection, both corners in screen space
    Marqueeing { start: Vec2, end: Vec2 },
}

impl Session {
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    /// True while nodes follow the pointer
    pub fn is_dragging(&self) -> bool {
        matches!(self, Self::DraggingOne { .. } | Self::DraggingMany { .. })
    }

    pub fn is_panning(&self) -> bool {
        matches!(self, Self::Panning { .. })
    }

    pub fn is_marqueeing(&self) -> bool {
        matches!(self, Self::Marqueeing { .. })
    }

    pub fn armed_connector(&self) -> Option<ConnectorId> {
        match self {
            Self::ConnectingArmed { connector } => Some(*connector),
            _ => None,
        }
    }

    /// Nodes being dragged, if any
    pub fn dragged_nodes(&self) -> Vec<NodeId> {
        match self {
            Self::DraggingOne { node, .. } => vec![*node],
            Self::DraggingMany { offsets } => offsets.iter().map(|(id, _)| *id).collect(),
            _ => Vec::new(),
        }
    }

    /// Marquee corners (screen space), if marqueeing
    pub fn marquee(&self) -> Option<(Vec2, Vec2)> {
        match self {
            Self::Marqueeing { start, end } => Some((*start, *end)),
            _ => None,
        }
    }

    /// Replace the session with `Idle`, returning the old one.
    pub fn take(&mut self) -> Self {
        std::mem::take(self)
    }

    /// Short name for logging
    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::DraggingOne { .. } => "dragging_one",
            Self::DraggingMany { .. } => "dragging_many",
            Self::Panning { .. } => "panning",
            Self::ConnectingArmed { .. } => "connecting_armed",
            Self::Marqueeing { .. } => "marqueeing",
        }
    }
}
