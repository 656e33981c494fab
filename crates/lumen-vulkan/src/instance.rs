//! Instance creation.

use std::ffi::{c_char, CStr};

use ash::{ext::debug_utils, vk, Entry, Instance};
use raw_window_handle::RawDisplayHandle;

use crate::debug::messenger_create_info;
use crate::validation::{available_layers, check_layers, ValidationConfig};
use crate::{VkResultExt, VulkanError};

/// What the program reports to the driver about itself.
#[derive(Debug, Copy, Clone)]
pub struct AppInfo {
    pub name: &'static CStr,
    pub api_version: u32,
}

impl AppInfo {
    pub const STAGE1: AppInfo = AppInfo {
        name: c"Vulkan Stage 1",
        api_version: vk::API_VERSION_1_3,
    };

    pub const HELLO_TRIANGLE: AppInfo = AppInfo {
        name: c"Hello Triangle",
        api_version: vk::API_VERSION_1_0,
    };
}

const ENGINE_NAME: &CStr = c"No Engine";

/// Window-system instance extensions, plus debug utils when validating.
pub fn required_extensions(
    display: RawDisplayHandle,
    validation: &ValidationConfig,
) -> Result<Vec<*const c_char>, VulkanError> {
    let mut extensions = ash_window::enumerate_required_extensions(display)
        .call("vkEnumerateInstanceExtensionProperties")?
        .to_vec();

    if validation.enabled {
        extensions.push(debug_utils::NAME.as_ptr());
    }
    Ok(extensions)
}

/// Creates the instance, checking requested layers first.
///
/// When validation is on, the debug messenger create-info is chained in so
/// instance creation itself is covered.
pub fn create_instance(
    entry: &Entry,
    app: &AppInfo,
    validation: &ValidationConfig,
    display: RawDisplayHandle,
) -> Result<Instance, VulkanError> {
    let available = available_layers(entry)?;
    log::info!("available instance layers:");
    for layer in &available {
        log::info!("  - {layer}");
    }

    if validation.enabled {
        let missing = check_layers(&available, &validation.layers);
        if !missing.is_empty() {
            return Err(VulkanError::MissingLayers(missing));
        }
    }

    let extensions = required_extensions(display, validation)?;
    log::info!("required instance extensions:");
    for &ext in &extensions {
        // Pointers come from static extension-name constants.
        let name = unsafe { CStr::from_ptr(ext) };
        log::info!("  - {}", name.to_string_lossy());
    }

    let version = vk::make_api_version(0, 1, 0, 0);
    let app_info = vk::ApplicationInfo::default()
        .application_name(app.name)
        .application_version(version)
        .engine_name(ENGINE_NAME)
        .engine_version(version)
        .api_version(app.api_version);

    let layers = validation.layer_ptrs();
    let mut debug_info = messenger_create_info();

    let mut create_info = vk::InstanceCreateInfo::default()
        .application_info(&app_info)
        .enabled_layer_names(&layers)
        .enabled_extension_names(&extensions);
    if validation.enabled {
        create_info = create_info.push_next(&mut debug_info);
    }

    let instance = unsafe { entry.create_instance(&create_info, None) }.call("vkCreateInstance")?;
    log::info!("Vulkan instance created ({})", app.name.to_string_lossy());
    Ok(instance)
}
