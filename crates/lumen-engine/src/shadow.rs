//! Shadow mapping: directional light setup and the depth map it renders into.

use bytemuck::{Pod, Zeroable};
use cgmath::{Matrix4, Point3, Vector3};

use crate::camera::{look_at, orthographic};
use crate::device::{DepthTarget, DEPTH_FORMAT};

pub const SHADOW_MAP_SIZE: u32 = 1024;

/// A light rendered with an orthographic projection toward `target`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ShadowLight {
    pub position: Point3<f32>,
    pub target: Point3<f32>,
    /// Half-width of the square orthographic frustum.
    pub extent: f32,
    pub near: f32,
    pub far: f32,
    pub color: [f32; 3],
}

impl Default for ShadowLight {
    fn default() -> Self {
        Self {
            position: Point3::new(5.0, 10.0, 5.0),
            target: Point3::new(0.0, 0.0, 0.0),
            extent: 10.0,
            near: 1.0,
            far: 25.0,
            color: [1.0, 1.0, 1.0],
        }
    }
}

impl ShadowLight {
    pub fn view(&self) -> Matrix4<f32> {
        look_at(self.position, self.target, Vector3::unit_y())
    }

    pub fn projection(&self) -> Matrix4<f32> {
        let e = self.extent;
        orthographic(-e, e, -e, e, self.near, self.far)
    }

    /// World space to light clip space.
    pub fn light_space_matrix(&self) -> Matrix4<f32> {
        self.projection() * self.view()
    }
}

/// Depth bias for the shadow pass: 2 units constant, slope factor 1.
pub fn shadow_depth_bias() -> wgpu::DepthBiasState {
    wgpu::DepthBiasState {
        constant: 2,
        slope_scale: 1.0,
        clamp: 0.0,
    }
}

/// Depth state for the pass that renders into the shadow map.
pub fn shadow_pass_depth_state() -> wgpu::DepthStencilState {
    wgpu::DepthStencilState {
        format: DEPTH_FORMAT,
        depth_write_enabled: true,
        depth_compare: wgpu::CompareFunction::LessEqual,
        stencil: wgpu::StencilState::default(),
        bias: shadow_depth_bias(),
    }
}

/// Depth texture rendered from the light, plus a comparison sampler.
pub struct ShadowMap {
    pub target: DepthTarget,
    pub sampler: wgpu::Sampler,
}

impl ShadowMap {
    pub fn new(device: &wgpu::Device, size: u32) -> Self {
        let target = DepthTarget::sampled(device, size, size, "lumen shadow map");

        // Outside the light frustum counts as lit.
        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("lumen shadow sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Nearest,
            min_filter: wgpu::FilterMode::Nearest,
            compare: Some(wgpu::CompareFunction::LessEqual),
            ..Default::default()
        });

        Self { target, sampler }
    }

    pub fn size(&self) -> u32 {
        self.target.size().0
    }

    /// Depth-only attachment for the shadow pass.
    pub fn attachment(&self) -> wgpu::RenderPassDepthStencilAttachment<'_> {
        self.target.attachment()
    }

    /// Layout: depth texture at `binding`, comparison sampler at `binding + 1`.
    pub fn layout_entries(binding: u32) -> [wgpu::BindGroupLayoutEntry; 2] {
        [
            wgpu::BindGroupLayoutEntry {
                binding,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Texture {
                    multisampled: false,
                    view_dimension: wgpu::TextureViewDimension::D2,
                    sample_type: wgpu::TextureSampleType::Depth,
                },
                count: None,
            },
            wgpu::BindGroupLayoutEntry {
                binding: binding + 1,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Comparison),
                count: None,
            },
        ]
    }

    pub fn bind_entries(&self, binding: u32) -> [wgpu::BindGroupEntry<'_>; 2] {
        [
            wgpu::BindGroupEntry {
                binding,
                resource: wgpu::BindingResource::TextureView(&self.target.view),
            },
            wgpu::BindGroupEntry {
                binding: binding + 1,
                resource: wgpu::BindingResource::Sampler(&self.sampler),
            },
        ]
    }
}

/// Per-frame scene constants for the lit pass. `vec3`s are padded to `vec4`.
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
pub struct SceneUniform {
    pub view: [[f32; 4]; 4],
    pub projection: [[f32; 4]; 4],
    pub light_space: [[f32; 4]; 4],
    pub light_pos: [f32; 4],
    pub light_color: [f32; 4],
    pub view_pos: [f32; 4],
}

impl SceneUniform {
    pub fn new(
        view: Matrix4<f32>,
        projection: Matrix4<f32>,
        light: &ShadowLight,
        view_pos: Point3<f32>,
    ) -> Self {
        let [r, g, b] = light.color;
        Self {
            view: view.into(),
            projection: projection.into(),
            light_space: light.light_space_matrix().into(),
            light_pos: [light.position.x, light.position.y, light.position.z, 1.0],
            light_color: [r, g, b, 1.0],
            view_pos: [view_pos.x, view_pos.y, view_pos.z, 1.0],
        }
    }
}

/// Model matrix plus a flat surface color.
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
pub struct ObjectUniform {
    pub model: [[f32; 4]; 4],
    pub color: [f32; 4],
}

impl ObjectUniform {
    pub fn new(model: Matrix4<f32>, color: [f32; 3]) -> Self {
        Self {
            model: model.into(),
            color: [color[0], color[1], color[2], 1.0],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::Vector4;

    fn to_clip(m: Matrix4<f32>, p: [f32; 3]) -> Vector4<f32> {
        let c = m * Vector4::new(p[0], p[1], p[2], 1.0);
        c / c.w
    }

    #[test]
    fn default_light_matches_scene_setup() {
        let l = ShadowLight::default();
        assert_eq!(l.position, Point3::new(5.0, 10.0, 5.0));
        assert_eq!((l.near, l.far, l.extent), (1.0, 25.0, 10.0));
    }

    #[test]
    fn origin_lands_inside_light_frustum() {
        let m = ShadowLight::default().light_space_matrix();
        let c = to_clip(m, [0.0, 0.0, 0.0]);
        assert!(c.x.abs() < 1e-4 && c.y.abs() < 1e-4);
        // distance to origin is sqrt(150); depth is (d - near) / (far - near)
        let expected = (150.0f32.sqrt() - 1.0) / 24.0;
        assert!((c.z - expected).abs() < 1e-4);
    }

    #[test]
    fn ground_corners_fit_in_shadow_map() {
        let m = ShadowLight::default().light_space_matrix();
        for p in [[-5.0, 0.0, -5.0], [5.0, 0.0, 5.0], [0.0, 2.0, 0.0]] {
            let c = to_clip(m, p);
            assert!(c.x.abs() <= 1.0 && c.y.abs() <= 1.0);
            assert!((0.0..=1.0).contains(&c.z));
        }
    }

    #[test]
    fn bias_matches_polygon_offset() {
        let b = shadow_depth_bias();
        assert_eq!(b.constant, 2);
        assert_eq!(b.slope_scale, 1.0);
    }

    #[test]
    fn uniform_sizes_are_16_byte_multiples() {
        assert_eq!(std::mem::size_of::<SceneUniform>() % 16, 0);
        assert_eq!(std::mem::size_of::<ObjectUniform>() % 16, 0);
    }

    #[test]
    fn shadow_layout_entries_are_consecutive() {
        let e = ShadowMap::layout_entries(2);
        assert_eq!((e[0].binding, e[1].binding), (2, 3));
    }
}
