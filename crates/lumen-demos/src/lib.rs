//! Shared bits for the lumen demo binaries.
//!
//! Every demo is its own binary under `src/bin/`. Shaders that are compiled
//! into the binary live in `src/shaders/`; the ones read at startup live in
//! the crate's `shaders/` directory (or `LUMEN_SHADER_DIR`).

use std::path::PathBuf;

use lumen_engine::render::{EntryPoint, ShaderError, ShaderSource};

pub mod inline {
    pub const POINT: &str = include_str!("shaders/point.wgsl");
    pub const FLAT: &str = include_str!("shaders/flat.wgsl");
    pub const UNIFORM_COLOR: &str = include_str!("shaders/uniform_color.wgsl");
    pub const TEXTURED: &str = include_str!("shaders/textured.wgsl");
    pub const MVP_COLOR: &str = include_str!("shaders/mvp_color.wgsl");
}

/// Default directory for shaders loaded at startup.
pub fn shader_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("shaders")
}

/// Loads, validates and compiles a shader file by name.
pub fn load_shader(
    device: &wgpu::Device,
    name: &str,
    required: &[EntryPoint],
) -> Result<wgpu::ShaderModule, ShaderError> {
    let source = ShaderSource::load_named(name, shader_dir())?;
    log::info!("loaded shader {}", source.label());
    source.create_module(device, required)
}

/// Validates and compiles one of the shaders built into the binary.
pub fn inline_shader(
    device: &wgpu::Device,
    label: &str,
    code: &str,
    required: &[EntryPoint],
) -> Result<wgpu::ShaderModule, ShaderError> {
    ShaderSource::inline(label, code).create_module(device, required)
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── inline shaders ──

    #[test]
    fn inline_shaders_validate() {
        let shaders = [
            ("point", inline::POINT),
            ("uniform_color", inline::UNIFORM_COLOR),
            ("textured", inline::TEXTURED),
            ("mvp_color", inline::MVP_COLOR),
        ];
        for (label, code) in shaders {
            let res = ShaderSource::inline(label, code).validate(&EntryPoint::STANDARD);
            assert!(res.is_ok(), "{label}: {:?}", res.err());
        }
    }

    #[test]
    fn flat_shader_has_both_fragment_colors() {
        let required = [
            EntryPoint::vertex("vs_main"),
            EntryPoint::fragment("fs_orange"),
            EntryPoint::fragment("fs_blue"),
        ];
        assert!(ShaderSource::inline("flat", inline::FLAT).validate(&required).is_ok());
    }

    // ── textured quad ──

    /// Nearest lookup into `CHECKER_2X2`; v = 0 addresses the first row.
    fn checker_texel(uv: [f32; 2]) -> [u8; 4] {
        use lumen_engine::texture::CHECKER_2X2;
        let col = (uv[0] * 2.0).clamp(0.0, 1.0) as usize;
        let row = (uv[1] * 2.0).clamp(0.0, 1.0) as usize;
        let i = (row * 2 + col) * 4;
        [CHECKER_2X2[i], CHECKER_2X2[i + 1], CHECKER_2X2[i + 2], CHECKER_2X2[i + 3]]
    }

    #[test]
    fn textured_shader_passes_uv_through() {
        assert!(inline::TEXTURED.contains("out.uv = uv;"));
        assert!(!inline::TEXTURED.contains("1.0 - uv.y"));
    }

    #[test]
    fn quad_bottom_row_shows_first_texel_row() {
        use lumen_engine::mesh::geometry::QUAD;
        let corner = |x: f32, y: f32| {
            QUAD.iter()
                .find(|v| v.position[0] == x && v.position[1] == y)
                .map(|v| checker_texel(v.uv))
                .unwrap()
        };
        assert_eq!(corner(-0.5, -0.5), [255, 0, 0, 255]);
        assert_eq!(corner(0.5, -0.5), [0, 255, 0, 255]);
        assert_eq!(corner(-0.5, 0.5), [0, 0, 255, 255]);
        assert_eq!(corner(0.5, 0.5), [255, 255, 0, 255]);
    }

    // ── startup shaders ──

    #[test]
    fn shader_files_validate() {
        let files: [(&str, &[EntryPoint]); 4] = [
            ("cube.wgsl", &EntryPoint::STANDARD),
            ("particles.wgsl", &EntryPoint::STANDARD),
            ("shadow_depth.wgsl", &[EntryPoint::vertex("vs_main")]),
            ("shadow_lit.wgsl", &EntryPoint::STANDARD),
        ];
        for (name, required) in files {
            let source = ShaderSource::from_file(shader_dir().join(name)).unwrap();
            let res = source.validate(required);
            assert!(res.is_ok(), "{name}: {:?}", res.err());
        }
    }
}
