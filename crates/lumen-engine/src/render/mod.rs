//! GPU rendering helpers shared by the demos.
//!
//! Each demo owns its pipelines and buffers; this module only provides the
//! per-frame context and the plumbing every pipeline needs (shader loading,
//! uniform buffers, common pipeline state).

mod ctx;
mod pipeline;
pub mod shader;
mod uniform;

pub use ctx::{RenderCtx, RenderTarget};
pub use pipeline::{additive_blend, pipeline_layout, primitive_state, PipelineSpec};
pub use shader::{EntryPoint, ShaderError, ShaderSource, Stage};
pub use uniform::UniformBuffer;
