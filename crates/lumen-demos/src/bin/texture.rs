//! A quad textured with a 2x2 red/green/blue/yellow checker.

use anyhow::Result;
use lumen_engine::color::Color;
use lumen_engine::core::{App, AppControl, FrameCtx};
use lumen_engine::device::{Gpu, GpuInit};
use lumen_engine::logging::{init_logging, LoggingConfig};
use lumen_engine::mesh::{geometry, Mesh, TexVertex, Vertex};
use lumen_engine::render::{EntryPoint, PipelineSpec};
use lumen_engine::texture::{Texture, CHECKER_2X2};
use lumen_engine::window::{Runtime, RuntimeConfig};
use lumen_demos::{inline, inline_shader};

struct Scene {
    pipeline: wgpu::RenderPipeline,
    quad: Mesh,
    bind_group: wgpu::BindGroup,
}

#[derive(Default)]
struct TextureDemo {
    scene: Option<Scene>,
}

impl App for TextureDemo {
    fn init(&mut self, gpu: &Gpu<'_>) -> Result<()> {
        let device = gpu.device();
        let module = inline_shader(device, "textured", inline::TEXTURED, &EntryPoint::STANDARD)?;

        let texture = Texture::from_rgba8(device, gpu.queue(), "checker", 2, 2, &CHECKER_2X2)?;
        let layout = Texture::bind_group_layout(device, "checker");
        let bind_group = texture.bind_group(device, &layout, "checker");

        let buffers = [TexVertex::layout()];
        let layouts = [&layout];
        let pipeline = PipelineSpec::new("textured quad", &module, gpu.surface_format())
            .vertex_buffers(&buffers)
            .bind_group_layouts(&layouts)
            .build(device);

        let quad = Mesh::upload(
            device,
            "quad",
            &geometry::QUAD,
            Some(&geometry::QUAD_INDICES[..]),
        );

        self.scene = Some(Scene {
            pipeline,
            quad,
            bind_group,
        });
        Ok(())
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        let Some(scene) = &self.scene else {
            return AppControl::Continue;
        };

        ctx.render(Color::rgb(0.2, 0.3, 0.3), |_, target| {
            let mut pass = target.begin_pass("textured quad");
            pass.set_pipeline(&scene.pipeline);
            pass.set_bind_group(0, &scene.bind_group, &[]);
            scene.quad.draw(&mut pass, 0);
        })
    }
}

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());
    Runtime::run(
        RuntimeConfig::titled("OpenGL Example 10: Texture"),
        GpuInit::default(),
        TextureDemo::default(),
    )
}
