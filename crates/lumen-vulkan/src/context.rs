//! Owns every Vulkan object the bring-up creates, and destroys them in
//! reverse order.

use std::ffi::CStr;

use ash::{khr::surface, vk, Device, Entry, Instance};
use raw_window_handle::{HasDisplayHandle, HasWindowHandle};
use winit::window::Window;

use crate::debug::DebugMessenger;
use crate::device::{
    create_logical_device, describe, log_candidate, select_device, PresentTarget,
    SelectionPolicy,
};
use crate::instance::{create_instance, AppInfo};
use crate::validation::ValidationConfig;
use crate::{VkResultExt, VulkanError};

#[derive(Debug, Clone)]
pub struct ContextDesc {
    pub app: AppInfo,
    pub validation: ValidationConfig,
    pub policy: SelectionPolicy,
    pub device_extensions: Vec<&'static CStr>,
    /// Create a window surface and require present support.
    pub surface: bool,
}

struct WindowSurface {
    loader: surface::Instance,
    surface: vk::SurfaceKHR,
}

/// Instance-level objects. Dropped after the device.
struct InstanceCore {
    entry: Entry,
    instance: Instance,
    debug: Option<DebugMessenger>,
    surface: Option<WindowSurface>,
}

impl Drop for InstanceCore {
    fn drop(&mut self) {
        unsafe {
            if let Some(debug) = &mut self.debug {
                debug.destroy();
                log::info!("debug messenger destroyed");
            }
            if let Some(s) = &self.surface {
                s.loader.destroy_surface(s.surface, None);
                log::info!("surface destroyed");
            }
            self.instance.destroy_instance(None);
        }
        log::info!("instance destroyed");
    }
}

pub struct VkContext {
    device: Device,
    physical_device: vk::PhysicalDevice,
    queue: vk::Queue,
    queue_family: u32,
    device_name: String,
    core: InstanceCore,
}

impl VkContext {
    pub fn new(desc: &ContextDesc, window: &Window) -> Result<Self, VulkanError> {
        let entry = unsafe { Entry::load()? };
        let display = window.display_handle()?.as_raw();

        let instance = create_instance(&entry, &desc.app, &desc.validation, display)?;

        // From here on, dropping `core` tears down whatever exists so far.
        let mut core = InstanceCore {
            entry,
            instance,
            debug: None,
            surface: None,
        };

        if desc.validation.enabled {
            core.debug = Some(DebugMessenger::new(&core.entry, &core.instance)?);
        }

        if desc.surface {
            let raw_window = window.window_handle()?.as_raw();
            let surface = unsafe {
                ash_window::create_surface(&core.entry, &core.instance, display, raw_window, None)
            }
            .call("vkCreateSurfaceKHR")?;
            core.surface = Some(WindowSurface {
                loader: surface::Instance::new(&core.entry, &core.instance),
                surface,
            });
            log::info!("window surface created");
        }

        let physical_devices = unsafe { core.instance.enumerate_physical_devices() }
            .call("vkEnumeratePhysicalDevices")?;
        log::info!("found {} Vulkan device(s)", physical_devices.len());

        let present = core.surface.as_ref().map(|s| PresentTarget {
            loader: &s.loader,
            surface: s.surface,
        });
        let candidates = physical_devices
            .iter()
            .map(|&pd| describe(&core.instance, pd, present.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        for c in &candidates {
            log_candidate(c);
        }

        let selection = select_device(&candidates, desc.policy, &desc.device_extensions)?;
        let chosen = &candidates[selection.index];
        if selection.fallback {
            log::warn!("no suitable discrete GPU found, using the first device");
        }
        log::info!("selected device: {}", chosen.name);

        let physical_device = physical_devices[selection.index];
        let (device, queue) = create_logical_device(
            &core.instance,
            physical_device,
            selection.queue_family,
            &desc.device_extensions,
        )?;

        Ok(Self {
            device,
            physical_device,
            queue,
            queue_family: selection.queue_family,
            device_name: chosen.name.clone(),
            core,
        })
    }

    pub fn instance(&self) -> &Instance {
        &self.core.instance
    }

    pub fn device(&self) -> &Device {
        &self.device
    }

    pub fn physical_device(&self) -> vk::PhysicalDevice {
        self.physical_device
    }

    pub fn queue(&self) -> vk::Queue {
        self.queue
    }

    pub fn queue_family(&self) -> u32 {
        self.queue_family
    }

    pub fn device_name(&self) -> &str {
        &self.device_name
    }
}

impl Drop for VkContext {
    fn drop(&mut self) {
        log::info!("releasing Vulkan resources");
        unsafe {
            let _ = self.device.device_wait_idle();
            self.device.destroy_device(None);
        }
        log::info!("logical device destroyed");
        // `core` drops next: messenger, surface, instance.
    }
}
