//! Physical device selection and logical device creation.
//!
//! Selection runs over plain [`DeviceCandidate`] descriptions so the policy
//! logic does not need a driver; [`describe`] builds them from ash.

use std::ffi::{c_char, CStr};

use ash::{khr::surface, vk, Device, Instance};

use crate::{VkResultExt, VulkanError};

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct QueueFamily {
    pub flags: vk::QueueFlags,
    /// Can present to the target surface. Always true without a surface.
    pub present: bool,
}

#[derive(Debug, Clone)]
pub struct DeviceCandidate {
    pub name: String,
    pub device_type: vk::PhysicalDeviceType,
    pub api_version: u32,
    pub queue_families: Vec<QueueFamily>,
    pub extensions: Vec<String>,
}

impl DeviceCandidate {
    /// First queue family with graphics support.
    pub fn graphics_family(&self) -> Option<u32> {
        self.queue_families
            .iter()
            .position(|q| q.flags.contains(vk::QueueFlags::GRAPHICS))
            .map(|i| i as u32)
    }

    /// First queue family with graphics support that can also present.
    pub fn present_graphics_family(&self) -> Option<u32> {
        self.queue_families
            .iter()
            .position(|q| q.present && q.flags.contains(vk::QueueFlags::GRAPHICS))
            .map(|i| i as u32)
    }

    pub fn supports_extensions(&self, required: &[&CStr]) -> bool {
        required.iter().all(|req| {
            let req = req.to_string_lossy();
            self.extensions.iter().any(|e| *e == req)
        })
    }

    pub fn is_discrete(&self) -> bool {
        self.device_type == vk::PhysicalDeviceType::DISCRETE_GPU
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SelectionPolicy {
    /// First discrete GPU supporting every required extension, otherwise the
    /// first device.
    PreferDiscrete,
    /// First device with a graphics queue that can present.
    FirstSuitable,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Selection {
    pub index: usize,
    pub queue_family: u32,
    /// No device matched the policy and the first one was taken instead.
    pub fallback: bool,
}

pub fn select_device(
    candidates: &[DeviceCandidate],
    policy: SelectionPolicy,
    required_extensions: &[&CStr],
) -> Result<Selection, VulkanError> {
    if candidates.is_empty() {
        return Err(VulkanError::NoDevice);
    }

    match policy {
        SelectionPolicy::PreferDiscrete => {
            let preferred = candidates
                .iter()
                .position(|c| c.is_discrete() && c.supports_extensions(required_extensions));
            let (index, fallback) = match preferred {
                Some(i) => (i, false),
                None => (0, true),
            };

            let chosen = &candidates[index];
            let queue_family = chosen
                .graphics_family()
                .ok_or_else(|| VulkanError::NoGraphicsQueue(chosen.name.clone()))?;

            Ok(Selection {
                index,
                queue_family,
                fallback,
            })
        }
        SelectionPolicy::FirstSuitable => candidates
            .iter()
            .enumerate()
            .find_map(|(index, c)| {
                c.present_graphics_family().map(|queue_family| Selection {
                    index,
                    queue_family,
                    fallback: false,
                })
            })
            .ok_or(VulkanError::NoSuitableDevice),
    }
}

/// `major.minor.patch` of a packed Vulkan version.
pub fn format_version(version: u32) -> String {
    format!(
        "{}.{}.{}",
        vk::api_version_major(version),
        vk::api_version_minor(version),
        vk::api_version_patch(version)
    )
}

pub fn device_type_name(ty: vk::PhysicalDeviceType) -> &'static str {
    match ty {
        vk::PhysicalDeviceType::INTEGRATED_GPU => "integrated GPU",
        vk::PhysicalDeviceType::DISCRETE_GPU => "discrete GPU",
        vk::PhysicalDeviceType::VIRTUAL_GPU => "virtual GPU",
        vk::PhysicalDeviceType::CPU => "CPU",
        _ => "unknown",
    }
}

/// Surface used to answer present-support queries.
pub struct PresentTarget<'a> {
    pub loader: &'a surface::Instance,
    pub surface: vk::SurfaceKHR,
}

/// Asks `query` for present support of each queue family index.
fn present_support(
    family_count: usize,
    mut query: impl FnMut(u32) -> Result<bool, vk::Result>,
) -> Result<Vec<bool>, VulkanError> {
    (0..family_count as u32)
        .map(|i| query(i).call("vkGetPhysicalDeviceSurfaceSupportKHR"))
        .collect()
}

/// Queries everything selection needs to know about `pd`.
pub fn describe(
    instance: &Instance,
    pd: vk::PhysicalDevice,
    present: Option<&PresentTarget<'_>>,
) -> Result<DeviceCandidate, VulkanError> {
    let props = unsafe { instance.get_physical_device_properties(pd) };
    let families = unsafe { instance.get_physical_device_queue_family_properties(pd) };
    let extensions = unsafe { instance.enumerate_device_extension_properties(pd) }
        .call("vkEnumerateDeviceExtensionProperties")?;

    let support = match present {
        Some(t) => present_support(families.len(), |i| unsafe {
            t.loader.get_physical_device_surface_support(pd, i, t.surface)
        })?,
        None => vec![true; families.len()],
    };
    let queue_families = families
        .iter()
        .zip(support)
        .map(|(f, present)| QueueFamily {
            flags: f.queue_flags,
            present,
        })
        .collect();

    Ok(DeviceCandidate {
        name: props
            .device_name_as_c_str()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|_| "<unnamed>".to_string()),
        device_type: props.device_type,
        api_version: props.api_version,
        queue_families,
        extensions: extensions
            .iter()
            .filter_map(|e| e.extension_name_as_c_str().ok())
            .map(|n| n.to_string_lossy().into_owned())
            .collect(),
    })
}

pub fn log_candidate(c: &DeviceCandidate) {
    log::info!("device: {}", c.name);
    log::info!("  Vulkan version: {}", format_version(c.api_version));
    log::info!("  type: {}", device_type_name(c.device_type));
    match c.graphics_family() {
        Some(family) => log::info!("  graphics queue family: {family}"),
        None => log::info!("  graphics queue family: none"),
    }
}

/// Logical device with a single graphics queue at priority 1.0.
pub fn create_logical_device(
    instance: &Instance,
    pd: vk::PhysicalDevice,
    queue_family: u32,
    extensions: &[&CStr],
) -> Result<(Device, vk::Queue), VulkanError> {
    let priorities = [1.0f32];
    let queue_info = [vk::DeviceQueueCreateInfo::default()
        .queue_family_index(queue_family)
        .queue_priorities(&priorities)];
    let ext_ptrs: Vec<*const c_char> = extensions.iter().map(|e| e.as_ptr()).collect();

    let info = vk::DeviceCreateInfo::default()
        .queue_create_infos(&queue_info)
        .enabled_extension_names(&ext_ptrs);

    let device = unsafe { instance.create_device(pd, &info, None) }.call("vkCreateDevice")?;
    log::info!("logical device created");

    let queue = unsafe { device.get_device_queue(queue_family, 0) };
    log::info!("graphics queue acquired (family {queue_family})");

    Ok((device, queue))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SWAPCHAIN: &CStr = c"VK_KHR_swapchain";

    // ── present support ───────────────────────────────────────────────────

    #[test]
    fn present_support_per_family() {
        let support = present_support(3, |i| Ok(i != 1)).unwrap();
        assert_eq!(support, vec![true, false, true]);
    }

    #[test]
    fn present_support_query_error_propagates() {
        let err = present_support(2, |i| {
            if i == 1 {
                Err(vk::Result::ERROR_SURFACE_LOST_KHR)
            } else {
                Ok(true)
            }
        })
        .unwrap_err();
        match err {
            VulkanError::Call { call, result } => {
                assert_eq!(call, "vkGetPhysicalDeviceSurfaceSupportKHR");
                assert_eq!(result, vk::Result::ERROR_SURFACE_LOST_KHR);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    fn family(graphics: bool, present: bool) -> QueueFamily {
        let flags = if graphics {
            vk::QueueFlags::GRAPHICS | vk::QueueFlags::TRANSFER
        } else {
            vk::QueueFlags::COMPUTE
        };
        QueueFamily { flags, present }
    }

    fn candidate(
        name: &str,
        ty: vk::PhysicalDeviceType,
        families: Vec<QueueFamily>,
        swapchain: bool,
    ) -> DeviceCandidate {
        DeviceCandidate {
            name: name.to_string(),
            device_type: ty,
            api_version: vk::make_api_version(0, 1, 3, 0),
            queue_families: families,
            extensions: if swapchain {
                vec!["VK_KHR_swapchain".to_string()]
            } else {
                Vec::new()
            },
        }
    }

    // ── candidate queries ──

    #[test]
    fn graphics_family_skips_compute_only() {
        let c = candidate(
            "gpu",
            vk::PhysicalDeviceType::DISCRETE_GPU,
            vec![family(false, true), family(true, true)],
            true,
        );
        assert_eq!(c.graphics_family(), Some(1));
    }

    #[test]
    fn present_family_requires_both() {
        let c = candidate(
            "gpu",
            vk::PhysicalDeviceType::INTEGRATED_GPU,
            vec![family(true, false), family(false, true), family(true, true)],
            false,
        );
        assert_eq!(c.graphics_family(), Some(0));
        assert_eq!(c.present_graphics_family(), Some(2));
    }

    #[test]
    fn extension_support() {
        let with = candidate("a", vk::PhysicalDeviceType::CPU, vec![], true);
        let without = candidate("b", vk::PhysicalDeviceType::CPU, vec![], false);
        assert!(with.supports_extensions(&[SWAPCHAIN]));
        assert!(!without.supports_extensions(&[SWAPCHAIN]));
        assert!(without.supports_extensions(&[]));
    }

    // ── prefer discrete ──

    #[test]
    fn prefers_discrete_with_extensions() {
        let devices = [
            candidate("igpu", vk::PhysicalDeviceType::INTEGRATED_GPU, vec![family(true, true)], true),
            candidate("dgpu", vk::PhysicalDeviceType::DISCRETE_GPU, vec![family(true, true)], true),
        ];
        let sel = select_device(&devices, SelectionPolicy::PreferDiscrete, &[SWAPCHAIN]).unwrap();
        assert_eq!(sel.index, 1);
        assert!(!sel.fallback);
    }

    #[test]
    fn discrete_without_extension_is_skipped() {
        let devices = [
            candidate("igpu", vk::PhysicalDeviceType::INTEGRATED_GPU, vec![family(true, true)], true),
            candidate("dgpu", vk::PhysicalDeviceType::DISCRETE_GPU, vec![family(true, true)], false),
        ];
        let sel = select_device(&devices, SelectionPolicy::PreferDiscrete, &[SWAPCHAIN]).unwrap();
        assert_eq!(sel.index, 0);
        assert!(sel.fallback);
    }

    #[test]
    fn falls_back_to_first_device() {
        let devices = [candidate(
            "llvmpipe",
            vk::PhysicalDeviceType::CPU,
            vec![family(false, true), family(true, true)],
            true,
        )];
        let sel = select_device(&devices, SelectionPolicy::PreferDiscrete, &[SWAPCHAIN]).unwrap();
        assert_eq!(
            sel,
            Selection {
                index: 0,
                queue_family: 1,
                fallback: true
            }
        );
    }

    #[test]
    fn fallback_without_graphics_queue_fails() {
        let devices = [candidate(
            "compute",
            vk::PhysicalDeviceType::CPU,
            vec![family(false, true)],
            true,
        )];
        let err = select_device(&devices, SelectionPolicy::PreferDiscrete, &[]).unwrap_err();
        assert!(matches!(err, VulkanError::NoGraphicsQueue(ref name) if name == "compute"));
    }

    #[test]
    fn empty_device_list_fails() {
        let err = select_device(&[], SelectionPolicy::PreferDiscrete, &[]).unwrap_err();
        assert!(matches!(err, VulkanError::NoDevice));
        let err = select_device(&[], SelectionPolicy::FirstSuitable, &[]).unwrap_err();
        assert!(matches!(err, VulkanError::NoDevice));
    }

    // ── first suitable ──

    #[test]
    fn first_suitable_needs_present() {
        let devices = [
            candidate("a", vk::PhysicalDeviceType::DISCRETE_GPU, vec![family(true, false)], true),
            candidate("b", vk::PhysicalDeviceType::INTEGRATED_GPU, vec![family(true, true)], false),
        ];
        let sel = select_device(&devices, SelectionPolicy::FirstSuitable, &[]).unwrap();
        assert_eq!(sel.index, 1);
        assert_eq!(sel.queue_family, 0);
    }

    #[test]
    fn first_suitable_none_fails() {
        let devices = [candidate(
            "a",
            vk::PhysicalDeviceType::DISCRETE_GPU,
            vec![family(true, false)],
            true,
        )];
        let err = select_device(&devices, SelectionPolicy::FirstSuitable, &[]).unwrap_err();
        assert!(matches!(err, VulkanError::NoSuitableDevice));
    }

    // ── formatting ──

    #[test]
    fn version_formatting() {
        assert_eq!(format_version(vk::make_api_version(0, 1, 3, 275)), "1.3.275");
        assert_eq!(format_version(vk::API_VERSION_1_0), "1.0.0");
    }

    #[test]
    fn device_type_names() {
        assert_eq!(device_type_name(vk::PhysicalDeviceType::DISCRETE_GPU), "discrete GPU");
        assert_eq!(device_type_name(vk::PhysicalDeviceType::OTHER), "unknown");
    }
}
