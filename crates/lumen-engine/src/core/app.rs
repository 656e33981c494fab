use anyhow::Result;
use winit::event::WindowEvent;

use crate::device::Gpu;

use super::ctx::FrameCtx;

/// Control directive returned by app callbacks.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum AppControl {
    Continue,
    /// Clean shutdown requested by the app or the user.
    Exit,
    /// Unrecoverable failure; `Runtime::run` returns it as an error.
    Fatal(String),
}

/// Application contract implemented by each demo.
pub trait App {
    /// Called once after the window and GPU exist, before the first frame.
    ///
    /// Static GPU resources (pipelines, vertex buffers, textures) are created
    /// here. An error ends the run and is returned from `Runtime::run`.
    fn init(&mut self, gpu: &Gpu<'_>) -> Result<()> {
        let _ = gpu;
        Ok(())
    }

    /// Called for every window event before the runtime handles it.
    fn on_window_event(&mut self, event: &WindowEvent) -> AppControl {
        let _ = event;
        AppControl::Continue
    }

    /// Called once per frame.
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl;
}
