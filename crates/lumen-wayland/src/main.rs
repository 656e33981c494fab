//! Wayland + EGL: a rotating RGB triangle in an xdg toplevel window.

use std::time::Duration;

use anyhow::{Context, Result};
use lumen_engine::color::Color;
use lumen_engine::core::{App, AppControl, FrameCtx};
use lumen_engine::device::{Gpu, GpuInit};
use lumen_engine::logging::{init_logging, LoggingConfig};
use lumen_engine::window::{Runtime, RuntimeConfig, WindowBackend};
use lumen_wayland::rotation::Rotation;
use lumen_wayland::session::require_wayland_session;
use lumen_wayland::triangle::TriangleScene;
use winit::dpi::LogicalSize;

const WIDTH: f64 = 800.0;
const HEIGHT: f64 = 600.0;

#[derive(Default)]
struct WaylandTriangle {
    scene: Option<TriangleScene>,
    rotation: Rotation,
}

impl App for WaylandTriangle {
    fn init(&mut self, gpu: &Gpu<'_>) -> Result<()> {
        let info = gpu.adapter_info();
        log::info!("GL renderer: {}", info.name);
        log::info!("GL vendor: {:#06x}", info.vendor);
        log::info!("GL driver: {} {}", info.driver, info.driver_info);

        let scene = TriangleScene::new(gpu.device(), gpu.surface_format())
            .context("failed to build triangle pipeline")?;
        self.scene = Some(scene);
        Ok(())
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        let Some(scene) = &self.scene else {
            return AppControl::Continue;
        };
        let radians = self.rotation.radians();

        let control = ctx.render(Color::gray(0.2), |rctx, target| {
            scene.set_rotation(rctx.queue, radians);
            let mut pass = target.begin_pass("wayland triangle");
            scene.draw(&mut pass);
        });

        self.rotation.advance();
        control
    }
}

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    let session = require_wayland_session()?;
    log::info!("connecting to Wayland display {session}");

    let config = RuntimeConfig {
        min_size: Some(LogicalSize::new(WIDTH, HEIGHT)),
        max_size: Some(LogicalSize::new(WIDTH * 2.0, HEIGHT * 2.0)),
        frame_interval: Some(Duration::from_micros(16_667)),
        backend: WindowBackend::Wayland,
        ..RuntimeConfig::titled("Wayland EGL OpenGL Example")
    };
    Runtime::run(config, GpuInit::gl(), WaylandTriangle::default())?;

    log::info!("resources released");
    Ok(())
}
