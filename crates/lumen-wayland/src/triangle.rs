//! The triangle: positions and colors live in two separate vertex buffers.

use bytemuck::{Pod, Zeroable};
use lumen_engine::render::{EntryPoint, PipelineSpec, ShaderError, ShaderSource, UniformBuffer};
use wgpu::util::DeviceExt;

pub const POSITIONS: [[f32; 4]; 3] = [
    [0.0, 0.5, 0.0, 1.0],
    [-0.5, -0.5, 0.0, 1.0],
    [0.5, -0.5, 0.0, 1.0],
];

pub const COLORS: [[f32; 4]; 3] = [
    [1.0, 0.0, 0.0, 1.0],
    [0.0, 1.0, 0.0, 1.0],
    [0.0, 0.0, 1.0, 1.0],
];

const SHADER: &str = include_str!("triangle.wgsl");

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct RotationUniform {
    pub radians: f32,
    _pad: [f32; 3],
}

impl RotationUniform {
    pub fn new(radians: f32) -> Self {
        Self {
            radians,
            _pad: [0.0; 3],
        }
    }
}

fn vec4_layout(location: u32) -> wgpu::VertexBufferLayout<'static> {
    const POSITION: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x4];
    const COLOR: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![1 => Float32x4];

    wgpu::VertexBufferLayout {
        array_stride: std::mem::size_of::<[f32; 4]>() as u64,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: if location == 0 { &POSITION } else { &COLOR },
    }
}

pub struct TriangleScene {
    pipeline: wgpu::RenderPipeline,
    positions: wgpu::Buffer,
    colors: wgpu::Buffer,
    rotation: UniformBuffer<RotationUniform>,
}

impl TriangleScene {
    pub fn new(
        device: &wgpu::Device,
        color_format: wgpu::TextureFormat,
    ) -> Result<Self, ShaderError> {
        let module = ShaderSource::inline("wayland triangle", SHADER)
            .create_module(device, &EntryPoint::STANDARD)?;

        let rotation = UniformBuffer::new(
            device,
            "rotation",
            wgpu::ShaderStages::VERTEX,
            &RotationUniform::new(0.0),
        );

        let buffers = [vec4_layout(0), vec4_layout(1)];
        let layouts = [rotation.layout()];
        let pipeline = PipelineSpec::new("wayland triangle", &module, color_format)
            .vertex_buffers(&buffers)
            .bind_group_layouts(&layouts)
            .build(device);

        let positions = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("triangle positions"),
            contents: bytemuck::cast_slice(&POSITIONS),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let colors = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("triangle colors"),
            contents: bytemuck::cast_slice(&COLORS),
            usage: wgpu::BufferUsages::VERTEX,
        });

        Ok(Self {
            pipeline,
            positions,
            colors,
            rotation,
        })
    }

    pub fn set_rotation(&self, queue: &wgpu::Queue, radians: f32) {
        self.rotation.write(queue, &RotationUniform::new(radians));
    }

    pub fn draw(&self, pass: &mut wgpu::RenderPass<'_>) {
        pass.set_pipeline(&self.pipeline);
        pass.set_bind_group(0, self.rotation.bind_group(), &[]);
        pass.set_vertex_buffer(0, self.positions.slice(..));
        pass.set_vertex_buffer(1, self.colors.slice(..));
        pass.draw(0..POSITIONS.len() as u32, 0..1);
    }
}
