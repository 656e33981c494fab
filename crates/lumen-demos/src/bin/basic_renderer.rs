//! An RGB triangle spinning about the view axis, drawn through model, view
//! and projection matrices.

use anyhow::Result;
use cgmath::Vector3;
use lumen_engine::camera::{perspective, rotation, translation, MvpUniform, Spin};
use lumen_engine::color::Color;
use lumen_engine::core::{App, AppControl, FrameCtx};
use lumen_engine::device::{depth_stencil_state, Gpu, GpuInit};
use lumen_engine::logging::{init_logging, LoggingConfig};
use lumen_engine::mesh::{geometry, ColorVertex, Mesh, Vertex};
use lumen_engine::render::{EntryPoint, PipelineSpec, UniformBuffer};
use lumen_engine::window::{Runtime, RuntimeConfig};
use lumen_demos::{inline, inline_shader};

/// Radians per frame.
const SPIN_STEP: f32 = 0.01;

struct Scene {
    pipeline: wgpu::RenderPipeline,
    triangle: Mesh,
    mvp: UniformBuffer<MvpUniform>,
}

#[derive(Default)]
struct BasicRenderer {
    scene: Option<Scene>,
    spin: Spin,
}

impl App for BasicRenderer {
    fn init(&mut self, gpu: &Gpu<'_>) -> Result<()> {
        let device = gpu.device();
        let module = inline_shader(device, "mvp_color", inline::MVP_COLOR, &EntryPoint::STANDARD)?;

        let mvp = UniformBuffer::new(
            device,
            "mvp",
            wgpu::ShaderStages::VERTEX,
            &MvpUniform::default(),
        );

        let buffers = [ColorVertex::layout()];
        let layouts = [mvp.layout()];
        let pipeline = PipelineSpec::new("basic renderer", &module, gpu.surface_format())
            .vertex_buffers(&buffers)
            .bind_group_layouts(&layouts)
            .depth(depth_stencil_state())
            .build(device);

        self.scene = Some(Scene {
            pipeline,
            triangle: Mesh::upload(device, "rgb triangle", &geometry::RGB_TRIANGLE, None),
            mvp,
        });
        Ok(())
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        let Some(scene) = &self.scene else {
            return AppControl::Continue;
        };
        let angle = self.spin.advance(SPIN_STEP);

        ctx.render(Color::gray(0.1), |rctx, target| {
            let mvp = MvpUniform::new(
                rotation(Vector3::unit_z(), angle),
                translation(0.0, 0.0, -3.0),
                perspective(45.0, rctx.aspect_ratio(), 0.1, 100.0),
            );
            scene.mvp.write(rctx.queue, &mvp);

            let mut pass = target.begin_pass("basic renderer");
            pass.set_pipeline(&scene.pipeline);
            pass.set_bind_group(0, scene.mvp.bind_group(), &[]);
            scene.triangle.draw(&mut pass, 0);
        })
    }
}

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    let config = RuntimeConfig {
        resizable: false,
        ..RuntimeConfig::titled("OpenGL BasicRenderer")
    };
    Runtime::run(config, GpuInit::with_depth(), BasicRenderer::default())
}
