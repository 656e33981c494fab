//! A triangle whose green channel and horizontal offset follow the clock.

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

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
struct Params {
    color: [f32; 4],
    x_offset: f32,
    _pad: [f32; 3],
}

impl Params {
    /// Green pulses in [0, 1]; the offset swings in [-0.5, 0.5] at half speed.
    fn at(t: f32) -> Self {
        let green = t.sin() / 2.0 + 0.5;
        Self {
            color: [0.0, green, 0.0, 1.0],
            x_offset: (t * 0.5).sin() / 2.0,
            _pad: [0.0; 3],
        }
    }
}

struct Scene {
    pipeline: wgpu::RenderPipeline,
    triangle: Mesh,
    params: UniformBuffer<Params>,
}

#[derive(Default)]
struct UniformsDemo {
    scene: Option<Scene>,
}

impl App for UniformsDemo {
    fn init(&mut self, gpu: &Gpu<'_>) -> Result<()> {
        let device = gpu.device();
        let module =
            inline_shader(device, "uniform_color", inline::UNIFORM_COLOR, &EntryPoint::STANDARD)?;

        let params = UniformBuffer::new(
            device,
            "params",
            wgpu::ShaderStages::VERTEX_FRAGMENT,
            &Params::at(0.0),
        );

        let buffers = [PosVertex::layout()];
        let layouts = [params.layout()];
        let pipeline = PipelineSpec::new("uniform triangle", &module, gpu.surface_format())
            .vertex_buffers(&buffers)
            .bind_group_layouts(&layouts)
            .build(device);

        self.scene = Some(Scene {
            pipeline,
            triangle: Mesh::upload(device, "triangle", &geometry::TRIANGLE, None),
            params,
        });
        Ok(())
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        let Some(scene) = &self.scene else {
            return AppControl::Continue;
        };
        let params = Params::at(ctx.time.elapsed);

        ctx.render(Color::rgb(0.2, 0.3, 0.3), |rctx, target| {
            scene.params.write(rctx.queue, &params);

            let mut pass = target.begin_pass("uniform triangle");
            pass.set_pipeline(&scene.pipeline);
            pass.set_bind_group(0, scene.params.bind_group(), &[]);
            scene.triangle.draw(&mut pass, 0);
        })
    }
}

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());
    Runtime::run(
        RuntimeConfig::titled("OpenGL Example 09: Shaders with Uniform"),
        GpuInit::default(),
        UniformsDemo::default(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn params_start_centered_at_half_green() {
        let p = Params::at(0.0);
        assert!((p.color[1] - 0.5).abs() < 1e-6);
        assert_eq!(p.x_offset, 0.0);
    }

    #[test]
    fn params_stay_in_range() {
        for i in 0..200 {
            let p = Params::at(i as f32 * 0.37);
            assert!((0.0..=1.0).contains(&p.color[1]));
            assert!((-0.5..=0.5).contains(&p.x_offset));
        }
    }

    #[test]
    fn params_match_wgsl_size() {
        assert_eq!(std::mem::size_of::<Params>(), 32);
    }
}
