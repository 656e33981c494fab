//! Raw Vulkan bring-up on top of `ash`.
//!
//! Covers the part of a Vulkan program that comes before any rendering:
//! loader, instance, validation layers, debug messenger, window surface,
//! physical device selection, logical device and graphics queue.

mod error;

pub mod app;
pub mod context;
pub mod debug;
pub mod device;
pub mod instance;
pub mod validation;

pub use error::{VkResultExt, VulkanError};
