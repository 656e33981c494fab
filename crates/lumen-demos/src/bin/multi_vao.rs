//! Two triangles, each with its own vertex buffer and its own pipeline.

use anyhow::Result;
use lumen_engine::color::Color;
use lumen_engine::core::{App, AppControl, FrameCtx};
use lumen_engine::device::{Gpu, GpuInit};
use lumen_engine::logging::{init_logging, LoggingConfig};
use lumen_engine::mesh::{geometry, Mesh, PosVertex, Vertex};
use lumen_engine::render::{EntryPoint, PipelineSpec};
use lumen_engine::window::{Runtime, RuntimeConfig};
use lumen_demos::{inline, inline_shader};

struct Triangle {
    pipeline: wgpu::RenderPipeline,
    mesh: Mesh,
}

#[derive(Default)]
struct MultiVao {
    triangles: Vec<Triangle>,
}

impl App for MultiVao {
    fn init(&mut self, gpu: &Gpu<'_>) -> Result<()> {
        let device = gpu.device();
        let required = [
            EntryPoint::vertex("vs_main"),
            EntryPoint::fragment("fs_orange"),
            EntryPoint::fragment("fs_blue"),
        ];
        let module = inline_shader(device, "flat", inline::FLAT, &required)?;
        let buffers = [PosVertex::layout()];

        let halves = [
            ("left triangle", "fs_orange", &geometry::LEFT_TRIANGLE),
            ("right triangle", "fs_blue", &geometry::RIGHT_TRIANGLE),
        ];
        self.triangles = halves
            .into_iter()
            .map(|(label, fs_entry, vertices)| {
                let pipeline = PipelineSpec {
                    fs_entry,
                    ..PipelineSpec::new(label, &module, gpu.surface_format())
                }
                .vertex_buffers(&buffers)
                .build(device);
                let mesh = Mesh::upload(device, label, vertices, None);
                Triangle { pipeline, mesh }
            })
            .collect();

        Ok(())
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        let triangles = &self.triangles;
        ctx.render(Color::rgb(0.2, 0.3, 0.3), |_, target| {
            let mut pass = target.begin_pass("triangles");
            for tri in triangles {
                pass.set_pipeline(&tri.pipeline);
                tri.mesh.draw(&mut pass, 0);
            }
        })
    }
}

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());
    Runtime::run(
        RuntimeConfig::titled("OpenGL Example 07: Multiple VAOs"),
        GpuInit::default(),
        MultiVao::default(),
    )
}
