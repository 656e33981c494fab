//! Window surface plus the first device that can present to it.
//! Validation is on in debug builds only.

use anyhow::Result;
use lumen_engine::logging::{init_logging, LoggingConfig};
use lumen_vulkan::app::{run, VkAppConfig};
use lumen_vulkan::context::ContextDesc;
use lumen_vulkan::device::SelectionPolicy;
use lumen_vulkan::instance::AppInfo;
use lumen_vulkan::validation::ValidationConfig;
use winit::dpi::LogicalSize;

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());
    run(config())
}

/// Fixed-size 800x600 window; only the close button ends it.
fn config() -> VkAppConfig {
    VkAppConfig {
        title: "Vulkan Basic Renderer".to_string(),
        size: LogicalSize::new(800.0, 600.0),
        resizable: false,
        close_on_escape: false,
        context: ContextDesc {
            app: AppInfo::HELLO_TRIANGLE,
            validation: ValidationConfig::default(),
            policy: SelectionPolicy::FirstSuitable,
            device_extensions: Vec::new(),
            surface: true,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_is_fixed_size() {
        let config = config();
        assert!(!config.resizable);
        assert!(!config.close_on_escape);
        assert_eq!(config.size, LogicalSize::new(800.0, 600.0));
    }

    #[test]
    fn presents_to_a_window_surface() {
        let config = config();
        assert!(config.context.surface);
        assert_eq!(config.context.policy, SelectionPolicy::FirstSuitable);
    }
}
