//! Debug messenger that forwards validation output to `log`.

use std::borrow::Cow;
use std::ffi::{c_void, CStr};

use ash::{ext::debug_utils, vk, Entry, Instance};

use crate::{VkResultExt, VulkanError};

/// `log` level for a validation message severity.
pub fn log_level(severity: vk::DebugUtilsMessageSeverityFlagsEXT) -> log::Level {
    use vk::DebugUtilsMessageSeverityFlagsEXT as S;

    if severity.contains(S::ERROR) {
        log::Level::Error
    } else if severity.contains(S::WARNING) {
        log::Level::Warn
    } else if severity.contains(S::INFO) {
        log::Level::Info
    } else if severity.contains(S::VERBOSE) {
        log::Level::Trace
    } else {
        log::Level::Debug
    }
}

fn message_kind(types: vk::DebugUtilsMessageTypeFlagsEXT) -> &'static str {
    use vk::DebugUtilsMessageTypeFlagsEXT as T;

    if types.contains(T::VALIDATION) {
        "validation"
    } else if types.contains(T::PERFORMANCE) {
        "performance"
    } else {
        "general"
    }
}

unsafe extern "system" fn vulkan_debug_callback(
    severity: vk::DebugUtilsMessageSeverityFlagsEXT,
    types: vk::DebugUtilsMessageTypeFlagsEXT,
    data: *const vk::DebugUtilsMessengerCallbackDataEXT<'_>,
    _user_data: *mut c_void,
) -> vk::Bool32 {
    let message = if data.is_null() || unsafe { (*data).p_message.is_null() } {
        Cow::Borrowed("<no message>")
    } else {
        unsafe { CStr::from_ptr((*data).p_message) }.to_string_lossy()
    };

    log::log!(
        target: "lumen_vulkan::validation",
        log_level(severity),
        "[{}] {}",
        message_kind(types),
        message
    );

    // Never abort the call that triggered the message.
    vk::FALSE
}

/// Create-info for warnings, errors and info messages of every type.
///
/// Also chained into instance creation so messages from
/// `vkCreateInstance`/`vkDestroyInstance` are reported.
pub fn messenger_create_info<'a>() -> vk::DebugUtilsMessengerCreateInfoEXT<'a> {
    vk::DebugUtilsMessengerCreateInfoEXT::default()
        .message_severity(
            vk::DebugUtilsMessageSeverityFlagsEXT::WARNING
                | vk::DebugUtilsMessageSeverityFlagsEXT::ERROR
                | vk::DebugUtilsMessageSeverityFlagsEXT::INFO,
        )
        .message_type(
            vk::DebugUtilsMessageTypeFlagsEXT::GENERAL
                | vk::DebugUtilsMessageTypeFlagsEXT::VALIDATION
                | vk::DebugUtilsMessageTypeFlagsEXT::PERFORMANCE,
        )
        .pfn_user_callback(Some(vulkan_debug_callback))
}

pub struct DebugMessenger {
    loader: debug_utils::Instance,
    messenger: vk::DebugUtilsMessengerEXT,
}

impl DebugMessenger {
    pub fn new(entry: &Entry, instance: &Instance) -> Result<Self, VulkanError> {
        let loader = debug_utils::Instance::new(entry, instance);
        let info = messenger_create_info();
        let messenger = unsafe { loader.create_debug_utils_messenger(&info, None) }
            .call("vkCreateDebugUtilsMessengerEXT")?;

        log::info!("debug messenger created");
        Ok(Self { loader, messenger })
    }

    /// # Safety
    /// Must be called once, before the owning instance is destroyed.
    pub unsafe fn destroy(&mut self) {
        unsafe {
            self.loader
                .destroy_debug_utils_messenger(self.messenger, None);
        }
        self.messenger = vk::DebugUtilsMessengerEXT::null();
    }
}
