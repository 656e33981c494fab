use std::fmt;

/// A key the demos can react to.
///
/// Named keys come from the physical key position; printable keys come from
/// the layout-dependent character, lowercased.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Key {
    Escape,
    Enter,
    Space,
    Tab,
    Backspace,
    Up,
    Down,
    Left,
    Right,
    Char(char),
    /// Anything else, with the platform code when there is one.
    Unknown(u32),
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum KeyState {
    Pressed,
    Released,
}

#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    Key {
        key: Key,
        state: KeyState,
        /// OS auto-repeat.
        repeat: bool,
    },
    Focused(bool),
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Char(c) => write!(f, "'{c}'"),
            Key::Unknown(code) => write!(f, "key #{code}"),
            named => write!(f, "{named:?}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names() {
        assert_eq!(Key::Escape.to_string(), "Escape");
        assert_eq!(Key::Char('w').to_string(), "'w'");
        assert_eq!(Key::Unknown(42).to_string(), "key #42");
    }
}
