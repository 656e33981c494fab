//! WGSL shader loading and validation.
//!
//! Shaders are parsed and validated with naga before a `wgpu::ShaderModule`
//! is created, so a broken shader becomes an error with the compiler's
//! diagnostic instead of a device-lost panic at pipeline creation.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Environment variable overriding where external shader files are read from.
pub const SHADER_DIR_ENV: &str = "LUMEN_SHADER_DIR";

#[derive(Debug, Error)]
pub enum ShaderError {
    #[error("failed to read shader {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("shader {label} failed to compile:\n{message}")]
    Parse { label: String, message: String },

    #[error("shader {label} failed validation: {message}")]
    Validation { label: String, message: String },

    #[error("shader {label} has no {stage:?} entry point named `{name}`")]
    MissingEntryPoint {
        label: String,
        name: String,
        stage: Stage,
    },
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Stage {
    Vertex,
    Fragment,
    Compute,
}

impl Stage {
    fn matches(self, stage: naga::ShaderStage) -> bool {
        matches!(
            (self, stage),
            (Stage::Vertex, naga::ShaderStage::Vertex)
                | (Stage::Fragment, naga::ShaderStage::Fragment)
                | (Stage::Compute, naga::ShaderStage::Compute)
        )
    }
}

/// An entry point a pipeline expects the shader to provide.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct EntryPoint {
    pub name: &'static str,
    pub stage: Stage,
}

impl EntryPoint {
    pub const fn vertex(name: &'static str) -> Self {
        Self { name, stage: Stage::Vertex }
    }

    pub const fn fragment(name: &'static str) -> Self {
        Self { name, stage: Stage::Fragment }
    }

    /// `vs_main` + `fs_main`, the convention used by every demo shader.
    pub const STANDARD: [EntryPoint; 2] = [Self::vertex("vs_main"), Self::fragment("fs_main")];
}

/// WGSL source plus a label used in diagnostics and GPU debug names.
#[derive(Debug, Clone)]
pub struct ShaderSource {
    label: String,
    code: String,
}

impl ShaderSource {
    /// Source compiled into the binary (`include_str!`).
    pub fn inline(label: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            code: code.into(),
        }
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ShaderError> {
        let path = path.as_ref();
        let code = std::fs::read_to_string(path).map_err(|source| ShaderError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        log::debug!("loaded shader {} ({} bytes)", path.display(), code.len());

        Ok(Self {
            label: path.display().to_string(),
            code,
        })
    }

    /// Reads `name` from the shader directory: `LUMEN_SHADER_DIR` when set,
    /// otherwise `default_dir`.
    pub fn load_named(name: &str, default_dir: impl AsRef<Path>) -> Result<Self, ShaderError> {
        let dir = resolve_shader_dir(std::env::var_os(SHADER_DIR_ENV), default_dir.as_ref());
        Self::from_file(dir.join(name))
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    /// Parses and validates the source and checks `required` entry points exist.
    pub fn validate(&self, required: &[EntryPoint]) -> Result<naga::Module, ShaderError> {
        let module = naga::front::wgsl::parse_str(&self.code).map_err(|e| ShaderError::Parse {
            label: self.label.clone(),
            message: e.emit_to_string(&self.code),
        })?;

        naga::valid::Validator::new(
            naga::valid::ValidationFlags::all(),
            naga::valid::Capabilities::default(),
        )
        .validate(&module)
        .map_err(|e| ShaderError::Validation {
            label: self.label.clone(),
            message: e.as_inner().to_string(),
        })?;

        for ep in required {
            let found = module
                .entry_points
                .iter()
                .any(|e| e.name == ep.name && ep.stage.matches(e.stage));
            if !found {
                return Err(ShaderError::MissingEntryPoint {
                    label: self.label.clone(),
                    name: ep.name.to_string(),
                    stage: ep.stage,
                });
            }
        }

        Ok(module)
    }

    /// Validates, then creates the GPU shader module.
    pub fn create_module(
        &self,
        device: &wgpu::Device,
        required: &[EntryPoint],
    ) -> Result<wgpu::ShaderModule, ShaderError> {
        self.validate(required)?;

        Ok(device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some(&self.label),
            source: wgpu::ShaderSource::Wgsl(self.code.as_str().into()),
        }))
    }
}

fn resolve_shader_dir(env_override: Option<OsString>, default_dir: &Path) -> PathBuf {
    match env_override {
        Some(dir) if !dir.is_empty() => PathBuf::from(dir),
        _ => default_dir.to_path_buf(),
    }
}
