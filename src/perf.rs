//! Profiling instrumentation for interaction hot paths.
//!
//! Pointer-move handlers and hit-tests run for every input event, so they
//! carry `profile_scope!` markers. The markers compile to nothing unless the
//! `profiling` feature is enabled:
//! ```toml
//! [dependencies]
//! flowgraph = { features = ["profiling"] }
//! ```
//!
//! ```ignore
//! fn handle_pointer_move() {
//!     profile_scope!("pointer_move");
//!     // ... event handling code ...
//! }
//! ```

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;
use tracing::{debug, warn};

/// Budget for a single input event at 60 FPS
pub const TARGET_FRAME_MS: f64 = 16.67;

/// Threshold used by `profile_scope!` when none is given
pub const DEFAULT_SCOPE_THRESHOLD_MS: f64 = 4.0;

/// Global flag to enable/disable profiling at runtime
static PROFILING_ENABLED: AtomicBool = AtomicBool::new(cfg!(feature = "profiling"));

/// Profile a scope with the given name. Zero-cost when profiling is disabled.
#[macro_export]
macro_rules! profile_scope {
    ($name:expr) => {
        #[cfg(feature = "profiling")]
        let _timer = $crate::perf::ScopedTimer::for_profiling($name);
        #[cfg(not(feature = "profiling"))]
        let _ = $name;
    };
    ($name:expr, $threshold_ms:expr) => {
        #[cfg(feature = "profiling")]
        let _timer = $crate::perf::ScopedTimer::new($name, $threshold_ms);
        #[cfg(not(feature = "profiling"))]
        let _ = ($name, $threshold_ms);
    };
}

pub use profile_scope;

/// Enable or disable profiling at runtime.
/// Only affects code compiled with the `profiling` feature.
pub fn set_profiling_enabled(enabled: bool) {
    PROFILING_ENABLED.store(enabled, Ordering::Relaxed);
}

#[inline]
pub fn is_profiling_enabled() -> bool {
    PROFILING_ENABLED.load(Ordering::Relaxed)
}

/// Times a scope and reports it through `tracing` when dropped.
pub struct ScopedTimer {
    name: &'static str,
    start: Instant,
    threshold_ms: f64,
    active: bool,
}

impl ScopedTimer {
    /// Timer that warns when the scope takes longer than `threshold_ms`.
    pub fn new(name: &'static str, threshold_ms: f64) -> Self {
        Self {
            name,
            start: Instant::now(),
            threshold_ms,
            active: true,
        }
    }

    /// Timer used by `profile_scope!`; inert while profiling is switched off.
    pub fn for_profiling(name: &'static str) -> Self {
        Self {
            name,
            start: Instant::now(),
            threshold_ms: DEFAULT_SCOPE_THRESHOLD_MS,
            active: is_profiling_enabled(),
        }
    }

    pub fn elapsed_ms(&self) -> f64 {
        self.start.elapsed().as_secs_f64() * 1000.0
    }
}

impl Drop for ScopedTimer {
    fn drop(&mut self) {
        if !self.active {
            return;
        }
        let elapsed = self.elapsed_ms();
        if elapsed > self.threshold_ms {
            warn!(
                scope = self.name,
                elapsed_ms = elapsed,
                threshold_ms = self.threshold_ms,
                "Slow scope"
            );
        } else {
            debug!(scope = self.name, elapsed_ms = elapsed, "Scope timing");
        }
    }
}
