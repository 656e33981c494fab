use std::collections::HashSet;

use super::frame::InputFrame;
use super::types::{InputEvent, KeyState, Key};

/// Current keyboard state for the window.
#[derive(Debug, Default)]
pub struct InputState {
    pub focused: bool,
    pub keys_down: HashSet<Key>,
}

impl InputState {
    /// Applies an event to the current state and records transitions in `frame`.
    pub fn apply_event(&mut self, frame: &mut InputFrame, ev: InputEvent) {
        match &ev {
            InputEvent::Focused(f) => {
                self.focused = *f;
                if !*f {
                    // Releases are not delivered while unfocused.
                    self.keys_down.clear();
                }
            }

            InputEvent::Key { key, state, .. } => match state {
                KeyState::Pressed => {
                    if self.keys_down.insert(*key) {
                        frame.keys_pressed.insert(*key);
                    }
                }
                KeyState::Released => {
                    if self.keys_down.remove(key) {
                        frame.keys_released.insert(*key);
                    }
                }
            },
        }

        frame.events.push(ev);
    }

    pub fn key_down(&self, key: Key) -> bool {
        self.keys_down.contains(&key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(key: Key, state: KeyState) -> InputEvent {
        InputEvent::Key { key, state, repeat: false }
    }

    // ── press / release ───────────────────────────────────────────────────

    #[test]
    fn press_marks_down_and_pressed() {
        let mut s = InputState::default();
        let mut f = InputFrame::default();
        s.apply_event(&mut f, key(Key::Escape, KeyState::Pressed));
        assert!(s.key_down(Key::Escape));
        assert!(f.pressed(Key::Escape));
        assert_eq!(f.events.len(), 1);
    }

    #[test]
    fn repeat_press_not_reported_twice() {
        let mut s = InputState::default();
        let mut f = InputFrame::default();
        s.apply_event(&mut f, key(Key::Space, KeyState::Pressed));
        f.clear();
        s.apply_event(&mut f, key(Key::Space, KeyState::Pressed));
        assert!(s.key_down(Key::Space));
        assert!(!f.pressed(Key::Space));
    }

    #[test]
    fn release_clears_down_and_records_release() {
        let mut s = InputState::default();
        let mut f = InputFrame::default();
        s.apply_event(&mut f, key(Key::Char('w'), KeyState::Pressed));
        s.apply_event(&mut f, key(Key::Char('w'), KeyState::Released));
        assert!(!s.key_down(Key::Char('w')));
        assert!(f.released(Key::Char('w')));
    }

    #[test]
    fn release_without_press_is_ignored() {
        let mut s = InputState::default();
        let mut f = InputFrame::default();
        s.apply_event(&mut f, key(Key::Char('a'), KeyState::Released));
        assert!(!f.released(Key::Char('a')));
    }

    // ── focus ─────────────────────────────────────────────────────────────

    #[test]
    fn focus_loss_clears_held_keys() {
        let mut s = InputState::default();
        let mut f = InputFrame::default();
        s.apply_event(&mut f, InputEvent::Focused(true));
        s.apply_event(&mut f, key(Key::Up, KeyState::Pressed));
        s.apply_event(&mut f, InputEvent::Focused(false));
        assert!(!s.focused);
        assert!(s.keys_down.is_empty());
    }

    #[test]
    fn frame_clear_keeps_state() {
        let mut s = InputState::default();
        let mut f = InputFrame::default();
        s.apply_event(&mut f, key(Key::Char('d'), KeyState::Pressed));
        f.clear();
        assert!(f.events.is_empty());
        assert!(s.key_down(Key::Char('d')));
    }
}
