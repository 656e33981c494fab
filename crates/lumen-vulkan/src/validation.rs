//! Validation layer configuration and availability checks.

use std::ffi::{c_char, CStr};

use ash::Entry;

use crate::{VkResultExt, VulkanError};

pub const KHRONOS_VALIDATION: &CStr = c"VK_LAYER_KHRONOS_validation";

#[derive(Debug, Clone)]
pub struct ValidationConfig {
    pub enabled: bool,
    pub layers: Vec<&'static CStr>,
}

impl Default for ValidationConfig {
    /// On in debug builds, off in release builds.
    fn default() -> Self {
        Self {
            enabled: cfg!(debug_assertions),
            layers: vec![KHRONOS_VALIDATION],
        }
    }
}

impl ValidationConfig {
    pub fn always() -> Self {
        Self {
            enabled: true,
            ..Self::default()
        }
    }

    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }

    /// Layer name pointers to enable; empty when validation is off.
    pub fn layer_ptrs(&self) -> Vec<*const c_char> {
        if !self.enabled {
            return Vec::new();
        }
        self.layers.iter().map(|l| l.as_ptr()).collect()
    }
}

/// Names of the instance layers the loader reports.
pub fn available_layers(entry: &Entry) -> Result<Vec<String>, VulkanError> {
    let props = unsafe { entry.enumerate_instance_layer_properties() }
        .call("vkEnumerateInstanceLayerProperties")?;

    Ok(props
        .iter()
        .filter_map(|p| p.layer_name_as_c_str().ok())
        .map(|name| name.to_string_lossy().into_owned())
        .collect())
}

/// Requested layers that are missing from `available`.
pub fn check_layers(available: &[String], requested: &[&CStr]) -> Vec<String> {
    requested
        .iter()
        .map(|name| name.to_string_lossy())
        .filter(|name| !available.iter().any(|a| a == name.as_ref()))
        .map(|name| name.into_owned())
        .collect()
}
