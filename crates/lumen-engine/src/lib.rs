//! Lumen engine crate.
//!
//! Shared runtime for the lumen graphics demos: window + GPU bring-up, the
//! frame loop, shader loading, and the small amount of scene math the demos
//! have in common.

pub mod device;
pub mod window;
pub mod input;
pub mod time;
pub mod core;

pub mod logging;
pub mod color;
pub mod render;
pub mod mesh;
pub mod texture;
pub mod camera;
pub mod particles;
pub mod shadow;
