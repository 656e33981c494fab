//! Window loop for the bring-up binaries: create the window, build a
//! [`VkContext`] against it, idle until the window closes.

use anyhow::{Context, Result};
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::{ElementState, KeyEvent, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowAttributes, WindowId};

use crate::context::{ContextDesc, VkContext};

#[derive(Debug, Clone)]
pub struct VkAppConfig {
    pub title: String,
    pub size: LogicalSize<f64>,
    pub resizable: bool,
    /// Close on Escape as well as on the window's close button.
    pub close_on_escape: bool,
    pub context: ContextDesc,
}

pub fn run(config: VkAppConfig) -> Result<()> {
    let event_loop = EventLoop::new().context("failed to create event loop")?;
    event_loop.set_control_flow(ControlFlow::Wait);

    let mut state = VkAppState {
        config,
        context: None,
        window: None,
        error: None,
    };
    event_loop
        .run_app(&mut state)
        .context("event loop terminated with an error")?;

    if let Some(err) = state.error.take() {
        return Err(err);
    }
    Ok(())
}

struct VkAppState {
    config: VkAppConfig,
    // Declared before `window` so Vulkan is torn down while the window lives.
    context: Option<VkContext>,
    window: Option<Window>,
    error: Option<anyhow::Error>,
}

impl VkAppState {
    fn start(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let attrs = WindowAttributes::default()
            .with_title(self.config.title.clone())
            .with_inner_size(self.config.size)
            .with_resizable(self.config.resizable);
        let window = event_loop
            .create_window(attrs)
            .context("failed to create window")?;

        let context = VkContext::new(&self.config.context, &window)
            .context("Vulkan initialization failed")?;
        log::info!(
            "ready on {} (queue family {}); close the window to exit",
            context.device_name(),
            context.queue_family()
        );

        self.context = Some(context);
        self.window = Some(window);
        Ok(())
    }

    fn shutdown(&mut self, event_loop: &ActiveEventLoop) {
        self.context = None;
        self.window = None;
        event_loop.exit();
    }
}

impl ApplicationHandler for VkAppState {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        if let Err(err) = self.start(event_loop) {
            log::error!("{err:#}");
            self.error = Some(err);
            self.shutdown(event_loop);
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        if closes_window(&event, self.config.close_on_escape) {
            self.shutdown(event_loop);
        }
    }
}

fn closes_window(event: &WindowEvent, close_on_escape: bool) -> bool {
    match event {
        WindowEvent::CloseRequested => true,
        WindowEvent::KeyboardInput {
            event:
                KeyEvent {
                    physical_key: PhysicalKey::Code(KeyCode::Escape),
                    state: ElementState::Pressed,
                    ..
                },
            ..
        } => close_on_escape,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn close_button_always_closes() {
        assert!(closes_window(&WindowEvent::CloseRequested, false));
        assert!(closes_window(&WindowEvent::CloseRequested, true));
    }

    #[test]
    fn other_events_keep_running() {
        assert!(!closes_window(&WindowEvent::Focused(true), true));
        assert!(!closes_window(&WindowEvent::RedrawRequested, true));
    }
}
