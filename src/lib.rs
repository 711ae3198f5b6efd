//! Interaction core of a node-graph editor.
//!
//! Nodes sit on a zoomable canvas and expose typed input and output
//! connectors. [`FlowCanvas`] turns pointer and key events into selection,
//! drag, connect, pan, zoom and marquee operations, and records the screen
//! rectangles a [`RenderSurface`] has to repaint. Nodes marked dirty are
//! reprocessed on a background worker.

pub mod canvas;
pub mod config;
pub mod constants;
pub mod error;
pub mod geometry;
pub mod graph;
pub mod input;
pub mod logging;
pub mod perf;
pub mod render;
pub mod reprocess;
pub mod selection;
pub mod spatial_index;
pub mod viewport;

pub use canvas::FlowCanvas;
pub use config::EditorConfig;
pub use error::{FlowError, FlowResult};
pub use geometry::Rect;
pub use glam::Vec2;
pub use graph::{
    ConnectOutcome, Connector, ConnectorId, ConnectorSpec, Direction, Graph, HostContext,
    InertBehavior, Node, NodeBehavior, NodeBuilder, NodeId, RejectReason,
};
pub use input::{Key, PointerButton, PointerEvent, Session};
pub use render::{Invalidations, RenderSurface};
pub use reprocess::{QueueEvent, ReprocessOutcome, ReprocessQueue};
pub use selection::Selection;
pub use viewport::Viewport;
