//! Vertex formats, the static geometry the demos draw, and GPU upload.

mod buffer;
pub mod geometry;
mod vertex;

pub use buffer::Mesh;
pub use vertex::{ColorVertex, NormalVertex, PosVertex, TexVertex, Vertex};
