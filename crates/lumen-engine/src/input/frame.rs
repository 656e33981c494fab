use std::collections::HashSet;

use super::types::{InputEvent, Key};

/// Key transitions seen since the previous frame, plus the raw events.
/// The runtime empties it after each `on_frame`.
#[derive(Debug, Default)]
pub struct InputFrame {
    pub events: Vec<InputEvent>,
    pub keys_pressed: HashSet<Key>,
    pub keys_released: HashSet<Key>,
}

impl InputFrame {
    pub fn clear(&mut self) {
        self.events.clear();
        self.keys_pressed.clear();
        self.keys_released.clear();
    }

    /// Went down this frame (auto-repeat excluded).
    pub fn pressed(&self, key: Key) -> bool {
        self.keys_pressed.contains(&key)
    }

    pub fn released(&self, key: Key) -> bool {
        self.keys_released.contains(&key)
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
