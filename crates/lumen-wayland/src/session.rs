//! Wayland session detection.

use std::ffi::OsString;

use anyhow::{bail, Result};

/// What a client would connect to, from `WAYLAND_DISPLAY` / `WAYLAND_SOCKET`.
fn session_from(display: Option<OsString>, socket: Option<OsString>) -> Option<String> {
    let non_empty = |v: Option<OsString>| v.filter(|s| !s.is_empty());

    if let Some(fd) = non_empty(socket) {
        return Some(format!("socket fd {}", fd.to_string_lossy()));
    }
    non_empty(display).map(|d| d.to_string_lossy().into_owned())
}

/// Fails unless the environment points at a Wayland compositor.
pub fn require_wayland_session() -> Result<String> {
    match session_from(
        std::env::var_os("WAYLAND_DISPLAY"),
        std::env::var_os("WAYLAND_SOCKET"),
    ) {
        Some(session) => Ok(session),
        None => bail!("cannot connect to Wayland display: WAYLAND_DISPLAY is not set"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_name() {
        assert_eq!(
            session_from(Some("wayland-1".into()), None).as_deref(),
            Some("wayland-1")
        );
    }

    #[test]
    fn socket_takes_precedence() {
        assert_eq!(
            session_from(Some("wayland-0".into()), Some("7".into())).as_deref(),
            Some("socket fd 7")
        );
    }

    #[test]
    fn empty_values_are_ignored() {
        assert_eq!(session_from(Some("".into()), Some("".into())), None);
        assert_eq!(session_from(None, None), None);
    }
}
