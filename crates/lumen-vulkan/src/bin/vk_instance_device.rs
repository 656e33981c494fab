//! Instance, validation, debug messenger, device and queue. No rendering.

use anyhow::Result;
use ash::khr::swapchain;
use lumen_engine::logging::{init_logging, LoggingConfig};
use lumen_vulkan::app::{run, VkAppConfig};
use lumen_vulkan::context::ContextDesc;
use lumen_vulkan::device::SelectionPolicy;
use lumen_vulkan::instance::AppInfo;
use lumen_vulkan::validation::ValidationConfig;
use winit::dpi::LogicalSize;

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());
    log::info!("=== Vulkan stage 1: instance and device ===");

    run(VkAppConfig {
        title: "Vulkan Stage 1".to_string(),
        size: LogicalSize::new(800.0, 600.0),
        resizable: false,
        close_on_escape: false,
        context: ContextDesc {
            app: AppInfo::STAGE1,
            validation: ValidationConfig::always(),
            policy: SelectionPolicy::PreferDiscrete,
            device_extensions: vec![swapchain::NAME],
            surface: false,
        },
    })?;

    log::info!("=== Vulkan stage 1 done ===");
    Ok(())
}
