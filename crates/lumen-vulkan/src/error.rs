use ash::vk;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum VulkanError {
    #[error("failed to load the Vulkan loader: {0}")]
    Loader(#[from] ash::LoadingError),

    #[error("validation layers requested but not available: {}", .0.join(", "))]
    MissingLayers(Vec<String>),

    #[error("no GPU with Vulkan support found")]
    NoDevice,

    #[error("no suitable GPU: none has a graphics queue that can present")]
    NoSuitableDevice,

    #[error("no queue family on `{0}` supports graphics")]
    NoGraphicsQueue(String),

    #[error("window handle unavailable: {0}")]
    WindowHandle(#[from] raw_window_handle::HandleError),

    #[error("{call} failed: {result}")]
    Call {
        call: &'static str,
        result: vk::Result,
    },
}

/// Names the Vulkan entry point a raw `vk::Result` came from.
pub trait VkResultExt<T> {
    fn call(self, call: &'static str) -> Result<T, VulkanError>;
}

impl<T> VkResultExt<T> for Result<T, vk::Result> {
    fn call(self, call: &'static str) -> Result<T, VulkanError> {
        self.map_err(|result| VulkanError::Call { call, result })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn call_names_the_entry_point() {
        let res: Result<(), vk::Result> = Err(vk::Result::ERROR_INITIALIZATION_FAILED);
        let err = res.call("vkCreateInstance").unwrap_err();
        let msg = err.to_string();
        assert!(msg.starts_with("vkCreateInstance failed"), "{msg}");
    }

    #[test]
    fn missing_layers_lists_names() {
        let err = VulkanError::MissingLayers(vec!["A".into(), "B".into()]);
        assert_eq!(
            err.to_string(),
            "validation layers requested but not available: A, B"
        );
    }
}
