//! A fountain of 1000 additive particles under gravity.

use anyhow::{Context, Result};
use bytemuck::{Pod, Zeroable};
use cgmath::{Point3, Vector3};
use lumen_engine::camera::{look_at, perspective};
use lumen_engine::color::Color;
use lumen_engine::core::{App, AppControl, FrameCtx};
use lumen_engine::device::{Gpu, GpuInit};
use lumen_engine::logging::{init_logging, LoggingConfig};
use lumen_engine::particles::{ParticleInstance, ParticleSystem, Pcg32, MAX_PARTICLES};
use lumen_engine::render::{additive_blend, EntryPoint, PipelineSpec, UniformBuffer};
use lumen_engine::window::{Runtime, RuntimeConfig};
use lumen_demos::load_shader;

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct CameraUniform {
    view: [[f32; 4]; 4],
    projection: [[f32; 4]; 4],
}

impl CameraUniform {
    fn new(aspect: f32) -> Self {
        let view = look_at(
            Point3::new(0.0, 0.0, 3.0),
            Point3::new(0.0, 0.0, 0.0),
            Vector3::unit_y(),
        );
        Self {
            view: view.into(),
            projection: perspective(45.0, aspect, 0.1, 100.0).into(),
        }
    }
}

struct Scene {
    pipeline: wgpu::RenderPipeline,
    camera: UniformBuffer<CameraUniform>,
    instances: wgpu::Buffer,
}

struct ParticleDemo {
    system: ParticleSystem,
    staging: Vec<ParticleInstance>,
    scene: Option<Scene>,
}

impl ParticleDemo {
    fn new() -> Self {
        Self {
            system: ParticleSystem::with_rng(MAX_PARTICLES, Pcg32::from_time()),
            staging: Vec::with_capacity(MAX_PARTICLES),
            scene: None,
        }
    }
}

impl App for ParticleDemo {
    fn init(&mut self, gpu: &Gpu<'_>) -> Result<()> {
        let device = gpu.device();
        let module = load_shader(device, "particles.wgsl", &EntryPoint::STANDARD)
            .context("failed to load particle shader")?;

        let camera = UniformBuffer::new(
            device,
            "particle camera",
            wgpu::ShaderStages::VERTEX,
            &CameraUniform::new(gpu.aspect_ratio()),
        );

        let instances = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("particle instances"),
            size: (MAX_PARTICLES * std::mem::size_of::<ParticleInstance>()) as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let buffers = [ParticleInstance::layout()];
        let layouts = [camera.layout()];
        let pipeline = PipelineSpec::new("particles", &module, gpu.surface_format())
            .vertex_buffers(&buffers)
            .bind_group_layouts(&layouts)
            .blend(additive_blend())
            .build(device);

        log::info!("spawned {} particles", self.system.len());

        self.scene = Some(Scene {
            pipeline,
            camera,
            instances,
        });
        Ok(())
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        let Some(scene) = &self.scene else {
            return AppControl::Continue;
        };

        self.system.update(ctx.time.dt);
        self.system.write_instances(&mut self.staging);
        let staging = &self.staging;

        ctx.render(Color::BLACK, |rctx, target| {
            scene.camera.write(rctx.queue, &CameraUniform::new(rctx.aspect_ratio()));
            rctx.queue.write_buffer(&scene.instances, 0, bytemuck::cast_slice(staging));

            let mut pass = target.begin_pass("particles");
            pass.set_pipeline(&scene.pipeline);
            pass.set_bind_group(0, scene.camera.bind_group(), &[]);
            pass.set_vertex_buffer(0, scene.instances.slice(..));
            pass.draw(0..6, 0..staging.len() as u32);
        })
    }
}

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());
    Runtime::run(
        RuntimeConfig::titled("Particle System"),
        GpuInit::default(),
        ParticleDemo::new(),
    )
}
