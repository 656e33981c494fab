//! Rotating triangle in a native Wayland window, rendered through EGL.

pub mod rotation;
pub mod session;
pub mod triangle;
