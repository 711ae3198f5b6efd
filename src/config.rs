//! Editor configuration.
//!
//! Hosts tune hit tolerances, stroke margins and the reprocess worker from a
//! JSON document. Missing fields fall back to the defaults in
//! [`crate::constants`].

use crate::constants::{
    DEFAULT_CONNECTOR_PICK_SIZE, DEFAULT_REPROCESS_IDLE_POLL_MS, DEFAULT_STROKE_PADDING,
};
use crate::error::{FlowError, FlowResult};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Side of the square, centred on the pointer, that picks connector anchors (screen px)
    pub connector_pick_size: f32,
    /// Margin added around marquee and preview-line invalidations (screen px)
    pub stroke_padding: f32,
    /// How long the reprocess worker parks when its stack is empty
    pub reprocess_idle_poll_ms: u64,
    /// Fallback `tracing` filter read by [`crate::logging::init_from`]
    pub log_filter: String,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            connector_pick_size: DEFAULT_CONNECTOR_PICK_SIZE,
            stroke_padding: DEFAULT_STROKE_PADDING,
            reprocess_idle_poll_ms: DEFAULT_REPROCESS_IDLE_POLL_MS,
            log_filter: "info".to_string(),
        }
    }
}

impl EditorConfig {
    /// Parse and validate a JSON document.
    pub fn from_json_str(json: &str) -> FlowResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> FlowResult<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let config = Self::from_json_str(&contents)?;
        tracing::debug!(path = %path.display(), "Loaded editor config");
        Ok(config)
    }

    pub fn validate(&self) -> FlowResult<()> {
        if !self.connector_pick_size.is_finite() || self.connector_pick_size <= 0.0 {
            return Err(FlowError::InvalidConfig(format!(
                "connector_pick_size must be positive, got {}",
                self.connector_pick_size
            )));
        }
        if !self.stroke_padding.is_finite() || self.stroke_padding < 0.0 {
            return Err(FlowError::InvalidConfig(format!(
                "stroke_padding must be non-negative, got {}",
                self.stroke_padding
            )));
        }
        if self.reprocess_idle_poll_ms == 0 {
            return Err(FlowError::InvalidConfig(
                "reprocess_idle_poll_ms must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    pub fn reprocess_idle_poll(&self) -> Duration {
        Duration::from_millis(self.reprocess_idle_poll_ms)
    }
}
