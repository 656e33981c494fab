//! A single 10-pixel orange point in the middle of the window.

use anyhow::Result;
use bytemuck::{Pod, Zeroable};
use lumen_engine::color::Color;
use lumen_engine::core::{App, AppControl, FrameCtx};
use lumen_engine::device::{Gpu, GpuInit};
use lumen_engine::logging::{init_logging, LoggingConfig};
use lumen_engine::mesh::{geometry, Mesh, PosVertex, Vertex};
use lumen_engine::render::{EntryPoint, PipelineSpec, UniformBuffer};
use lumen_engine::window::{Runtime, RuntimeConfig};
use lumen_demos::{inline, inline_shader};

const POINT_SIZE: f32 = 10.0;

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct PointParams {
    color: [f32; 4],
    viewport: [f32; 2],
    size: f32,
    _pad: f32,
}

impl PointParams {
    fn new(viewport: (u32, u32)) -> Self {
        let [r, g, b] = geometry::ORANGE;
        Self {
            color: [r, g, b, 1.0],
            viewport: [viewport.0.max(1) as f32, viewport.1.max(1) as f32],
            size: POINT_SIZE,
            _pad: 0.0,
        }
    }
}

struct Scene {
    pipeline: wgpu::RenderPipeline,
    point: Mesh,
    params: UniformBuffer<PointParams>,
}

#[derive(Default)]
struct PointDemo {
    scene: Option<Scene>,
}

impl App for PointDemo {
    fn init(&mut self, gpu: &Gpu<'_>) -> Result<()> {
        let device = gpu.device();
        let module = inline_shader(device, "point", inline::POINT, &EntryPoint::STANDARD)?;

        let size = gpu.size();
        let params = UniformBuffer::new(
            device,
            "point params",
            wgpu::ShaderStages::VERTEX_FRAGMENT,
            &PointParams::new((size.width, size.height)),
        );

        // The point's position is per-instance; the six quad corners come
        // from the vertex index.
        let buffers = [wgpu::VertexBufferLayout {
            step_mode: wgpu::VertexStepMode::Instance,
            ..PosVertex::layout()
        }];
        let layouts = [params.layout()];
        let pipeline = PipelineSpec::new("point", &module, gpu.surface_format())
            .vertex_buffers(&buffers)
            .bind_group_layouts(&layouts)
            .build(device);

        let point = Mesh::upload(device, "point", &geometry::CENTER_POINT, None);

        self.scene = Some(Scene {
            pipeline,
            point,
            params,
        });
        Ok(())
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        let Some(scene) = &self.scene else {
            return AppControl::Continue;
        };

        ctx.render(Color::rgb(0.2, 0.3, 0.3), |rctx, target| {
            scene.params.write(rctx.queue, &PointParams::new(rctx.size));

            let mut pass = target.begin_pass("point");
            pass.set_pipeline(&scene.pipeline);
            pass.set_bind_group(0, scene.params.bind_group(), &[]);
            pass.set_vertex_buffer(0, scene.point.vertex_buffer.slice(..));
            pass.draw(0..6, 0..scene.point.vertex_count());
        })
    }
}

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());
    Runtime::run(
        RuntimeConfig::titled("OpenGL Example 02: Point"),
        GpuInit::default(),
        PointDemo::default(),
    )
}
