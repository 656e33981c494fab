use winit::event::{ElementState, KeyEvent, WindowEvent};
use winit::keyboard::{Key as LogicalKey, KeyCode, PhysicalKey};

use crate::input::{InputEvent, Key, KeyState};

/// Keyboard and focus events become `InputEvent`s; everything else is
/// left to the runtime.
pub(crate) fn translate_window_event(event: &WindowEvent) -> Option<InputEvent> {
    match event {
        WindowEvent::Focused(focused) => Some(InputEvent::Focused(*focused)),
        WindowEvent::KeyboardInput { event, .. } => Some(InputEvent::Key {
            key: map_key(event),
            state: match event.state {
                ElementState::Pressed => KeyState::Pressed,
                ElementState::Released => KeyState::Released,
            },
            repeat: event.repeat,
        }),
        _ => None,
    }
}

fn map_key(event: &KeyEvent) -> Key {
    let code = match event.physical_key {
        PhysicalKey::Code(code) => code,
        PhysicalKey::Unidentified(_) => return Key::Unknown(0),
    };

    let named = match code {
        KeyCode::Escape => Some(Key::Escape),
        KeyCode::Enter | KeyCode::NumpadEnter => Some(Key::Enter),
        KeyCode::Space => Some(Key::Space),
        KeyCode::Tab => Some(Key::Tab),
        KeyCode::Backspace => Some(Key::Backspace),
        KeyCode::ArrowUp => Some(Key::Up),
        KeyCode::ArrowDown => Some(Key::Down),
        KeyCode::ArrowLeft => Some(Key::Left),
        KeyCode::ArrowRight => Some(Key::Right),
        _ => None,
    };

    named
        .or_else(|| character_key(&event.logical_key))
        .unwrap_or(Key::Unknown(code as u32))
}

fn character_key(key: &LogicalKey) -> Option<Key> {
    let LogicalKey::Character(s) = key else {
        return None;
    };
    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c.is_alphanumeric() => c.to_lowercase().next().map(Key::Char),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_letters_are_lowercased() {
        assert_eq!(character_key(&LogicalKey::Character("W".into())), Some(Key::Char('w')));
        assert_eq!(character_key(&LogicalKey::Character("7".into())), Some(Key::Char('7')));
    }

    #[test]
    fn punctuation_and_sequences_are_ignored() {
        assert_eq!(character_key(&LogicalKey::Character(";".into())), None);
        assert_eq!(character_key(&LogicalKey::Character("ab".into())), None);
    }

    #[test]
    fn focus_is_translated() {
        assert_eq!(
            translate_window_event(&WindowEvent::Focused(false)),
            Some(InputEvent::Focused(false))
        );
    }
}
