//! Editor-wide constants.
//!
//! Centralizes the fixed geometry of nodes and connectors and the zoom
//! bounds. Tunables that hosts may want to change live in
//! [`crate::config::EditorConfig`] instead.

// ============================================================================
// Node Layout
// ============================================================================

/// Height of a node's title bar in model units
pub const TITLE_BAR_HEIGHT: f32 = 20.0;

/// Horizontal chrome around the node image (1px border each side)
pub const IMAGE_CHROME_WIDTH: f32 = 2.0;

/// Vertical chrome around the node image (title bar plus borders)
pub const IMAGE_CHROME_HEIGHT: f32 = 22.0;

// ============================================================================
// Connectors
// ============================================================================

/// Side length of a connector glyph
pub const CONNECTOR_SIZE: f32 = 8.0;

/// Gap between a connector glyph and the node body, and between glyphs
pub const CONNECTOR_PADDING: f32 = 4.0;

// ============================================================================
// Zoom
// ============================================================================

/// Minimum zoom level
pub const MIN_ZOOM: f32 = 0.1;

/// Maximum zoom level
pub const MAX_ZOOM: f32 = 10.0;

/// Default zoom level
pub const DEFAULT_ZOOM: f32 = 1.0;

// ============================================================================
// Interaction Defaults
// ============================================================================

/// Default side length of the square used to pick connector anchors (screen px)
pub const DEFAULT_CONNECTOR_PICK_SIZE: f32 = CONNECTOR_SIZE * 2.0;

/// Default margin added around marquee and preview-line strokes (screen px)
pub const DEFAULT_STROKE_PADDING: f32 = 10.0;

/// Default time the reprocess worker parks when it has nothing to do
pub const DEFAULT_REPROCESS_IDLE_POLL_MS: u64 = 5;
