//! A vertex-colored cube tumbling about (1, 1, 0). Its shader is read from
//! `shaders/cube.wgsl` at startup, so it can be edited without rebuilding.

use anyhow::{Context, Result};
use cgmath::Vector3;
use lumen_engine::camera::{perspective, rotation, translation, MvpUniform, Spin};
use lumen_engine::color::Color;
use lumen_engine::core::{App, AppControl, FrameCtx};
use lumen_engine::device::{depth_stencil_state, Gpu, GpuInit};
use lumen_engine::logging::{init_logging, LoggingConfig};
use lumen_engine::mesh::{geometry, ColorVertex, Mesh, Vertex};
use lumen_engine::render::{EntryPoint, PipelineSpec, UniformBuffer};
use lumen_engine::window::{Runtime, RuntimeConfig};
use lumen_demos::load_shader;

const SPIN_STEP: f32 = 0.01;

struct Scene {
    pipeline: wgpu::RenderPipeline,
    cube: Mesh,
    mvp: UniformBuffer<MvpUniform>,
}

#[derive(Default)]
struct AdvancedRenderer {
    scene: Option<Scene>,
    spin: Spin,
}

impl App for AdvancedRenderer {
    fn init(&mut self, gpu: &Gpu<'_>) -> Result<()> {
        let device = gpu.device();
        let module = load_shader(device, "cube.wgsl", &EntryPoint::STANDARD)
            .context("failed to load cube shader")?;

        let mvp = UniformBuffer::new(
            device,
            "cube mvp",
            wgpu::ShaderStages::VERTEX,
            &MvpUniform::default(),
        );

        let buffers = [ColorVertex::layout()];
        let layouts = [mvp.layout()];
        let pipeline = PipelineSpec::new("cube", &module, gpu.surface_format())
            .vertex_buffers(&buffers)
            .bind_group_layouts(&layouts)
            .depth(depth_stencil_state())
            .build(device);

        self.scene = Some(Scene {
            pipeline,
            cube: Mesh::upload(device, "cube", &geometry::COLORED_CUBE, None),
            mvp,
        });
        Ok(())
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        let Some(scene) = &self.scene else {
            return AppControl::Continue;
        };
        let angle = self.spin.advance(SPIN_STEP);

        ctx.render(Color::rgb(0.2, 0.3, 0.3), |rctx, target| {
            let mvp = MvpUniform::new(
                rotation(Vector3::new(1.0, 1.0, 0.0), angle),
                translation(0.0, 0.0, -3.0),
                perspective(45.0, rctx.aspect_ratio(), 0.1, 100.0),
            );
            scene.mvp.write(rctx.queue, &mvp);

            let mut pass = target.begin_pass("cube");
            pass.set_pipeline(&scene.pipeline);
            pass.set_bind_group(0, scene.mvp.bind_group(), &[]);
            scene.cube.draw(&mut pass, 0);
        })
    }
}

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());
    Runtime::run(
        RuntimeConfig::titled("Advanced Renderer"),
        GpuInit::with_depth(),
        AdvancedRenderer::default(),
    )
}
