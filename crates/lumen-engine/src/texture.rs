//! 2D color textures.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TextureError {
    #[error("texture size must be non-zero, got {width}x{height}")]
    EmptySize { width: u32, height: u32 },

    #[error("expected {expected} bytes of RGBA8 data for {width}x{height}, got {actual}")]
    SizeMismatch {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },
}

/// 2x2 RGBA8 image: red, green on the first row; blue, yellow on the second.
pub const CHECKER_2X2: [u8; 16] = [
    255, 0, 0, 255, //
    0, 255, 0, 255, //
    0, 0, 255, 255, //
    255, 255, 0, 255, //
];

/// Checks that `bytes` holds exactly `width * height` RGBA8 texels.
pub fn check_rgba8(width: u32, height: u32, bytes: &[u8]) -> Result<(), TextureError> {
    if width == 0 || height == 0 {
        return Err(TextureError::EmptySize { width, height });
    }
    let expected = width as usize * height as usize * 4;
    if bytes.len() != expected {
        return Err(TextureError::SizeMismatch {
            width,
            height,
            expected,
            actual: bytes.len(),
        });
    }
    Ok(())
}

/// Sampled color texture with its view and sampler.
pub struct Texture {
    pub texture: wgpu::Texture,
    pub view: wgpu::TextureView,
    pub sampler: wgpu::Sampler,
}

impl Texture {
    /// Uploads RGBA8 texels with nearest filtering and repeat addressing.
    pub fn from_rgba8(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        label: &str,
        width: u32,
        height: u32,
        bytes: &[u8],
    ) -> Result<Self, TextureError> {
        check_rgba8(width, height, bytes)?;

        let size = wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        };

        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some(label),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8Unorm,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            bytes,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(4 * width),
                rows_per_image: Some(height),
            },
            size,
        );

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some(label),
            address_mode_u: wgpu::AddressMode::Repeat,
            address_mode_v: wgpu::AddressMode::Repeat,
            address_mode_w: wgpu::AddressMode::Repeat,
            mag_filter: wgpu::FilterMode::Nearest,
            min_filter: wgpu::FilterMode::Nearest,
            ..Default::default()
        });

        Ok(Self {
            texture,
            view,
            sampler,
        })
    }

    /// Layout for a texture at binding 0 and its sampler at binding 1.
    pub fn bind_group_layout(device: &wgpu::Device, label: &str) -> wgpu::BindGroupLayout {
        device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some(label),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        multisampled: false,
                        view_dimension: wgpu::TextureViewDimension::D2,
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        })
    }

    pub fn bind_group(
        &self,
        device: &wgpu::Device,
        layout: &wgpu::BindGroupLayout,
        label: &str,
    ) -> wgpu::BindGroup {
        device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(label),
            layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&self.view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&self.sampler),
                },
            ],
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn checker_is_valid_2x2() {
        assert_eq!(check_rgba8(2, 2, &CHECKER_2X2), Ok(()));
    }

    #[test]
    fn checker_texel_order() {
        let texel = |i: usize| &CHECKER_2X2[i * 4..i * 4 + 4];
        assert_eq!(texel(0), &[255, 0, 0, 255]);
        assert_eq!(texel(1), &[0, 255, 0, 255]);
        assert_eq!(texel(2), &[0, 0, 255, 255]);
        assert_eq!(texel(3), &[255, 255, 0, 255]);
    }

    #[test]
    fn short_buffer_rejected() {
        assert_eq!(
            check_rgba8(2, 2, &CHECKER_2X2[..12]),
            Err(TextureError::SizeMismatch {
                width: 2,
                height: 2,
                expected: 16,
                actual: 12
            })
        );
    }

    #[test]
    fn zero_size_rejected() {
        assert!(matches!(check_rgba8(0, 4, &[]), Err(TextureError::EmptySize { .. })));
    }
}
