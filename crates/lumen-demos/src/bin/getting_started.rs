//! Fixed-size window that only clears. Escape does nothing here; close the
//! window to quit.

use anyhow::Result;
use lumen_engine::color::Color;
use lumen_engine::core::{App, AppControl, FrameCtx};
use lumen_engine::device::GpuInit;
use lumen_engine::logging::{init_logging, LoggingConfig};
use lumen_engine::window::{Runtime, RuntimeConfig};

struct GettingStarted;

impl App for GettingStarted {
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        ctx.clear(Color::rgb(0.2, 0.3, 0.3))
    }
}

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    let config = RuntimeConfig {
        resizable: false,
        close_on_escape: false,
        ..RuntimeConfig::titled("LearnOpenGL - Week 1")
    };
    Runtime::run(config, GpuInit::default(), GettingStarted)
}
