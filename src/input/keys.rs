//! Multiselect modifier latch.

use super::{Key, Session};
use crate::canvas::FlowCanvas;

impl FlowCanvas {
    pub fn key_down(&mut self, key: Key) {
        if key == Key::Multiselect && !self.interaction.multiselect_latched {
            tracing::trace!("Multiselect latched");
            self.interaction.multiselect_latched = true;
        }
    }

    /// Releasing the modifier mid-marquee finalizes the marquee at the last
    /// pointer position.
    pub fn key_up(&mut self, key: Key) {
        if key != Key::Multiselect {
            return;
        }
        self.interaction.multiselect_latched = false;

        if let Session::Marqueeing { start, .. } = self.interaction.session {
            self.interaction.session = Session::Idle;
            self.finish_marquee(start, self.interaction.last_pointer);
        }
    }
}
