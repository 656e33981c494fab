//! Opens an 800x600 window and clears it to teal every frame.

use anyhow::Result;
use lumen_engine::color::Color;
use lumen_engine::core::{App, AppControl, FrameCtx};
use lumen_engine::device::GpuInit;
use lumen_engine::logging::{init_logging, LoggingConfig};
use lumen_engine::window::{Runtime, RuntimeConfig};

const CLEAR: Color = Color::rgb(0.2, 0.3, 0.3);

struct WindowDemo;

impl App for WindowDemo {
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        if ctx.time.frame_index % 60 == 0 {
            log::debug!(
                "frame {} ({:.1}s)",
                ctx.time.frame_index,
                ctx.time.elapsed
            );
        }
        ctx.clear(CLEAR)
    }
}

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());
    Runtime::run(
        RuntimeConfig::titled("OpenGL Example 01: Window"),
        GpuInit::default(),
        WindowDemo,
    )
}
