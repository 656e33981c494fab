//! A rotating cube over a ground plane, lit by one light with a 1024x1024
//! shadow map.
//!
//! Each frame runs two passes: depth from the light into the shadow map,
//! then the lit scene from the camera sampling that map.

use anyhow::{Context, Result};
use cgmath::{Point3, Vector3};
use lumen_engine::camera::{look_at, perspective, rotation, translation};
use lumen_engine::color::Color;
use lumen_engine::core::{App, AppControl, FrameCtx};
use lumen_engine::device::{depth_stencil_state, Gpu, GpuInit};
use lumen_engine::logging::{init_logging, LoggingConfig};
use lumen_engine::mesh::{geometry, Mesh, NormalVertex, Vertex};
use lumen_engine::render::{EntryPoint, PipelineSpec, UniformBuffer};
use lumen_engine::shadow::{
    shadow_pass_depth_state, ObjectUniform, SceneUniform, ShadowLight, ShadowMap,
    SHADOW_MAP_SIZE,
};
use lumen_engine::window::{Runtime, RuntimeConfig};
use lumen_demos::load_shader;

const CAMERA_POS: Point3<f32> = Point3::new(0.0, 5.0, 10.0);
const CUBE_COLOR: [f32; 3] = [0.9, 0.55, 0.3];
const PLANE_COLOR: [f32; 3] = [0.6, 0.6, 0.6];

/// Light-space matrix for the depth pass.
#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct LightUniform {
    light_space: [[f32; 4]; 4],
}

struct Object {
    mesh: Mesh,
    uniform: UniformBuffer<ObjectUniform>,
}

impl Object {
    fn draw(&self, pass: &mut wgpu::RenderPass<'_>) {
        pass.set_bind_group(1, self.uniform.bind_group(), &[]);
        self.mesh.draw(pass, 0);
    }
}

struct Scene {
    shadow_map: ShadowMap,
    depth_pipeline: wgpu::RenderPipeline,
    lit_pipeline: wgpu::RenderPipeline,
    light_uniform: UniformBuffer<LightUniform>,
    scene_uniform: UniformBuffer<SceneUniform>,
    scene_bind_group: wgpu::BindGroup,
    cube: Object,
    plane: Object,
}

#[derive(Default)]
struct ShadowDemo {
    light: ShadowLight,
    /// Cube rotation, in radians of accumulated frame time.
    angle: f32,
    scene: Option<Scene>,
}

impl ShadowDemo {
    fn cube_model(&self) -> cgmath::Matrix4<f32> {
        translation(0.0, 1.0, 0.0) * rotation(Vector3::new(1.0, 1.0, 1.0), self.angle)
    }

    fn scene_uniform(&self, aspect: f32) -> SceneUniform {
        let view = look_at(CAMERA_POS, Point3::new(0.0, 0.0, 0.0), Vector3::unit_y());
        let projection = perspective(45.0, aspect, 0.1, 100.0);
        SceneUniform::new(view, projection, &self.light, CAMERA_POS)
    }
}

impl App for ShadowDemo {
    fn init(&mut self, gpu: &Gpu<'_>) -> Result<()> {
        let device = gpu.device();

        let depth_module =
            load_shader(device, "shadow_depth.wgsl", &[EntryPoint::vertex("vs_main")])
                .context("failed to load shadow depth shader")?;
        let lit_module = load_shader(device, "shadow_lit.wgsl", &EntryPoint::STANDARD)
            .context("failed to load lit shader")?;

        let shadow_map = ShadowMap::new(device, SHADOW_MAP_SIZE);

        let object_layout = UniformBuffer::<ObjectUniform>::create_layout(
            device,
            "object",
            wgpu::ShaderStages::VERTEX_FRAGMENT,
        );
        let cube = Object {
            mesh: Mesh::upload(device, "cube", &geometry::lit_cube(1.0), None),
            uniform: UniformBuffer::with_layout(
                device,
                "cube",
                &object_layout,
                &ObjectUniform::new(self.cube_model(), CUBE_COLOR),
            ),
        };
        let plane = Object {
            mesh: Mesh::upload(device, "plane", &geometry::ground_plane(10.0), None),
            uniform: UniformBuffer::with_layout(
                device,
                "plane",
                &object_layout,
                &ObjectUniform::new(translation(0.0, 0.0, 0.0), PLANE_COLOR),
            ),
        };

        let light_uniform = UniformBuffer::new(
            device,
            "light space",
            wgpu::ShaderStages::VERTEX,
            &LightUniform {
                light_space: self.light.light_space_matrix().into(),
            },
        );

        // Scene constants share a group with the shadow map they index.
        let scene_uniform = UniformBuffer::new(
            device,
            "scene",
            wgpu::ShaderStages::VERTEX_FRAGMENT,
            &self.scene_uniform(gpu.aspect_ratio()),
        );
        let [shadow_tex, shadow_sampler] = ShadowMap::layout_entries(1);
        let scene_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("scene + shadow map"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                },
                shadow_tex,
                shadow_sampler,
            ],
        });
        let [shadow_view, shadow_samp] = shadow_map.bind_entries(1);
        let scene_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("scene + shadow map"),
            layout: &scene_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: scene_uniform.buffer().as_entire_binding(),
                },
                shadow_view,
                shadow_samp,
            ],
        });

        let buffers = [NormalVertex::layout()];

        let depth_layouts = [light_uniform.layout(), &object_layout];
        let depth_pipeline = PipelineSpec {
            color_format: None,
            ..PipelineSpec::new("shadow depth", &depth_module, gpu.surface_format())
        }
        .vertex_buffers(&buffers)
        .bind_group_layouts(&depth_layouts)
        .depth(shadow_pass_depth_state())
        .build(device);

        let lit_layouts = [&scene_layout, &object_layout];
        let lit_pipeline = PipelineSpec::new("shadow lit", &lit_module, gpu.surface_format())
            .vertex_buffers(&buffers)
            .bind_group_layouts(&lit_layouts)
            .depth(depth_stencil_state())
            .build(device);

        self.scene = Some(Scene {
            shadow_map,
            depth_pipeline,
            lit_pipeline,
            light_uniform,
            scene_uniform,
            scene_bind_group,
            cube,
            plane,
        });
        Ok(())
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        self.angle += ctx.time.dt;
        let cube_model = self.cube_model();
        let scene_uniform = self.scene_uniform(ctx.gpu.aspect_ratio());
        let light_space = self.light.light_space_matrix();

        let Some(scene) = &self.scene else {
            return AppControl::Continue;
        };

        ctx.render(Color::gray(0.1), |rctx, target| {
            let queue = rctx.queue;
            scene.cube.uniform.write(queue, &ObjectUniform::new(cube_model, CUBE_COLOR));
            scene.light_uniform.write(
                queue,
                &LightUniform {
                    light_space: light_space.into(),
                },
            );
            scene.scene_uniform.write(queue, &scene_uniform);

            {
                let mut pass = target.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                    label: Some("shadow depth"),
                    color_attachments: &[],
                    depth_stencil_attachment: Some(scene.shadow_map.attachment()),
                    timestamp_writes: None,
                    occlusion_query_set: None,
                    multiview_mask: None,
                });
                pass.set_pipeline(&scene.depth_pipeline);
                pass.set_bind_group(0, scene.light_uniform.bind_group(), &[]);
                scene.cube.draw(&mut pass);
                scene.plane.draw(&mut pass);
            }

            let mut pass = target.begin_pass("shadow lit");
            pass.set_pipeline(&scene.lit_pipeline);
            pass.set_bind_group(0, &scene.scene_bind_group, &[]);
            scene.cube.draw(&mut pass);
            scene.plane.draw(&mut pass);
        })
    }
}

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());
    Runtime::run(
        RuntimeConfig::titled("Shadow Renderer"),
        GpuInit::with_depth(),
        ShadowDemo::default(),
    )
}
