use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use ouroboros::self_referencing;
use raw_window_handle::{HasDisplayHandle, RawDisplayHandle};

use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use crate::core::{App, AppControl, FrameCtx, WindowCtx};
use crate::device::{Gpu, GpuInit};
use crate::input::platform::translate_window_event;
use crate::input::{InputFrame, InputState, Key};
use crate::time::{FrameClock, FramePacer, FrameTime};

/// Which windowing backend winit should use.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub enum WindowBackend {
    /// Let winit pick (Wayland first, then X11, on Linux).
    #[default]
    Auto,
    /// Require a Wayland compositor; fail instead of falling back to X11.
    Wayland,
}

/// Window/runtime configuration.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub title: String,
    pub initial_size: LogicalSize<f64>,
    pub resizable: bool,
    pub min_size: Option<LogicalSize<f64>>,
    pub max_size: Option<LogicalSize<f64>>,

    /// Fixed frame interval. `None` redraws continuously (vsync-limited).
    pub frame_interval: Option<Duration>,

    pub backend: WindowBackend,

    /// Close the window when Escape is pressed.
    pub close_on_escape: bool,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            title: "lumen".to_string(),
            initial_size: LogicalSize::new(800.0, 600.0),
            resizable: true,
            min_size: None,
            max_size: None,
            frame_interval: None,
            backend: WindowBackend::Auto,
            close_on_escape: true,
        }
    }
}

impl RuntimeConfig {
    /// 800x600 window with the given title.
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }
}

/// Entry point for the runtime.
pub struct Runtime;

impl Runtime {
    /// Opens the window, initializes the GPU and `app`, and runs the frame
    /// loop until the window is closed.
    ///
    /// Initialization failures and fatal surface errors are returned so the
    /// caller can exit with a non-zero status.
    pub fn run<A>(config: RuntimeConfig, gpu_init: GpuInit, app: A) -> Result<()>
    where
        A: App + 'static,
    {
        let event_loop = build_event_loop(config.backend)?;
        let mut state = AppState::new(config, gpu_init, app);

        event_loop
            .run_app(&mut state)
            .context("winit event loop terminated with error")?;

        run_result(state.error.take())
    }
}

fn run_result(error: Option<anyhow::Error>) -> Result<()> {
    match error {
        Some(err) => Err(err),
        None => {
            log::info!("window closed, resources released");
            Ok(())
        }
    }
}

/// Applies a callback's directive. Returns `true` when the window should
/// close; a fatal directive also records the error `run` hands back.
fn apply_control(control: AppControl, error: &mut Option<anyhow::Error>) -> bool {
    match control {
        AppControl::Continue => false,
        AppControl::Exit => true,
        AppControl::Fatal(message) => {
            log::error!("{message}");
            if error.is_none() {
                *error = Some(anyhow::anyhow!(message));
            }
            true
        }
    }
}

/// Escape held now, or pressed and released since the last frame.
fn escape_requested(close_on_escape: bool, input: &InputState, frame: &InputFrame) -> bool {
    close_on_escape && (input.key_down(Key::Escape) || frame.pressed(Key::Escape))
}

fn build_event_loop(backend: WindowBackend) -> Result<EventLoop<()>> {
    let mut builder = EventLoop::builder();

    if backend == WindowBackend::Wayland {
        #[cfg(target_os = "linux")]
        {
            use winit::platform::wayland::EventLoopBuilderExtWayland;
            builder.with_wayland();
        }
        #[cfg(not(target_os = "linux"))]
        anyhow::bail!("the Wayland backend is only available on Linux");
    }

    builder.build().context(match backend {
        WindowBackend::Wayland => "cannot connect to Wayland display",
        WindowBackend::Auto => "failed to create winit EventLoop",
    })
}

fn display_server_name(window: &Window) -> &'static str {
    match window.display_handle().map(|h| h.as_raw()) {
        Ok(RawDisplayHandle::Wayland(_)) => "wayland",
        Ok(RawDisplayHandle::Xlib(_)) | Ok(RawDisplayHandle::Xcb(_)) => "x11",
        Ok(RawDisplayHandle::Windows(_)) => "win32",
        Ok(RawDisplayHandle::AppKit(_)) => "appkit",
        Ok(_) => "other",
        Err(_) => "unavailable",
    }
}

#[self_referencing]
struct WindowEntry {
    input_state: InputState,
    input_frame: InputFrame,
    clock: FrameClock,

    window: Window,

    #[borrows(window)]
    #[covariant]
    gpu: Gpu<'this>,
}

struct AppState<A>
where
    A: App + 'static,
{
    config: RuntimeConfig,
    gpu_init: GpuInit,
    app: A,

    entry: Option<WindowEntry>,
    pacer: Option<FramePacer>,
    error: Option<anyhow::Error>,
    exit_requested: bool,
}

impl<A> AppState<A>
where
    A: App + 'static,
{
    fn new(config: RuntimeConfig, gpu_init: GpuInit, app: A) -> Self {
        let pacer = config.frame_interval.map(FramePacer::new);
        Self {
            config,
            gpu_init,
            app,
            entry: None,
            pacer,
            error: None,
            exit_requested: false,
        }
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: anyhow::Error) {
        log::error!("{err:#}");
        self.error = Some(err);
        self.exit_requested = true;
        self.entry = None;
        event_loop.exit();
    }

    fn create_window_entry(&mut self, event_loop: &ActiveEventLoop) -> Result<WindowEntry> {
        let mut attrs = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(self.config.initial_size)
            .with_resizable(self.config.resizable);
        if let Some(min) = self.config.min_size {
            attrs = attrs.with_min_inner_size(min);
        }
        if let Some(max) = self.config.max_size {
            attrs = attrs.with_max_inner_size(max);
        }

        let window = event_loop
            .create_window(attrs)
            .context("failed to create window")?;

        let server = display_server_name(&window);
        log::info!("window \"{}\" created ({server})", self.config.title);
        if self.config.backend == WindowBackend::Wayland && server != "wayland" {
            anyhow::bail!("cannot connect to Wayland display (got {server})");
        }

        let gpu_init = self.gpu_init.clone();

        WindowEntryTryBuilder {
            input_state: InputState::default(),
            input_frame: InputFrame::default(),
            clock: FrameClock::default(),
            window,
            gpu_builder: |w| {
                pollster::block_on(Gpu::new(w, gpu_init)).context("GPU initialization failed")
            },
        }
        .try_build()
    }

    fn close(&mut self, event_loop: &ActiveEventLoop) {
        // Drop order: GPU resources, then the window.
        self.entry = None;
        self.exit_requested = true;
        event_loop.exit();
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let Some(entry) = self.entry.as_mut() else { return };
        let app = &mut self.app;
        let close_on_escape = self.config.close_on_escape;

        let mut control = AppControl::Continue;

        entry.with_mut(|fields| {
            if escape_requested(close_on_escape, fields.input_state, fields.input_frame) {
                control = AppControl::Exit;
                return;
            }

            let ft: FrameTime = fields.clock.tick();
            log::trace!("frame {} dt {:.4}", ft.frame_index, ft.dt);

            {
                let mut ctx = FrameCtx {
                    window: WindowCtx {
                        window: fields.window,
                    },
                    gpu: fields.gpu,
                    input: fields.input_state,
                    input_frame: fields.input_frame,
                    time: ft,
                };
                control = app.on_frame(&mut ctx);
            }

            fields.input_frame.clear();
        });

        if let Some(pacer) = self.pacer.as_mut() {
            pacer.frame_presented(Instant::now());
        }

        if apply_control(control, &mut self.error) {
            self.close(event_loop);
        }
    }
}

impl<A> ApplicationHandler for AppState<A>
where
    A: App + 'static,
{
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.entry.is_some() || self.exit_requested {
            return;
        }

        let entry = match self.create_window_entry(event_loop) {
            Ok(entry) => entry,
            Err(err) => return self.fail(event_loop, err),
        };

        if let Err(err) = entry.with_gpu(|gpu| self.app.init(gpu)) {
            return self.fail(event_loop, err.context("application init failed"));
        }

        entry.with_window(|w| w.request_redraw());
        self.entry = Some(entry);
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.exit_requested {
            event_loop.exit();
            return;
        }
        let Some(entry) = self.entry.as_ref() else { return };

        match self.pacer.as_ref() {
            Some(pacer) => {
                if pacer.is_due(Instant::now()) {
                    entry.with_window(|w| w.request_redraw());
                }
                match pacer.next_deadline() {
                    Some(deadline) => event_loop.set_control_flow(ControlFlow::WaitUntil(deadline)),
                    None => event_loop.set_control_flow(ControlFlow::Wait),
                }
            }
            None => {
                event_loop.set_control_flow(ControlFlow::Wait);
                entry.with_window(|w| w.request_redraw());
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        if self.exit_requested {
            event_loop.exit();
            return;
        }

        let Some(entry) = self.entry.as_mut() else { return };

        entry.with_mut(|fields| {
            if let Some(ev) = translate_window_event(&event) {
                fields.input_state.apply_event(fields.input_frame, ev);
            }
        });

        let control = self.app.on_window_event(&event);
        if apply_control(control, &mut self.error) {
            return self.close(event_loop);
        }

        match &event {
            WindowEvent::CloseRequested => self.close(event_loop),

            WindowEvent::Resized(new_size) => {
                entry.with_gpu_mut(|gpu| gpu.resize(*new_size));
                entry.with_window(|w| w.request_redraw());
            }

            WindowEvent::ScaleFactorChanged { .. } => {
                let new_size = entry.with_window(|w| w.inner_size());
                entry.with_gpu_mut(|gpu| gpu.resize(new_size));
            }

            WindowEvent::RedrawRequested => self.redraw(event_loop),

            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{InputEvent, KeyState};

    fn escape(state: KeyState) -> InputEvent {
        InputEvent::Key { key: Key::Escape, state, repeat: false }
    }

    // ── app control ───────────────────────────────────────────────────────

    #[test]
    fn continue_keeps_running_without_error() {
        let mut error = None;
        assert!(!apply_control(AppControl::Continue, &mut error));
        assert!(error.is_none());
    }

    #[test]
    fn exit_closes_cleanly() {
        let mut error = None;
        assert!(apply_control(AppControl::Exit, &mut error));
        assert!(error.is_none());
        assert!(run_result(error).is_ok());
    }

    #[test]
    fn fatal_closes_and_run_returns_err() {
        let mut error = None;
        let control = AppControl::Fatal("fatal surface error: out of memory".into());
        assert!(apply_control(control, &mut error));

        let err = run_result(error).unwrap_err();
        assert!(err.to_string().contains("out of memory"));
    }

    #[test]
    fn first_fatal_error_is_kept() {
        let mut error = None;
        apply_control(AppControl::Fatal("device lost".into()), &mut error);
        apply_control(AppControl::Fatal("second".into()), &mut error);
        assert_eq!(run_result(error).unwrap_err().to_string(), "device lost");
    }

    // ── escape ────────────────────────────────────────────────────────────

    #[test]
    fn held_escape_requests_close() {
        let mut input = InputState::default();
        let mut frame = InputFrame::default();
        input.apply_event(&mut frame, escape(KeyState::Pressed));
        frame.clear();
        assert!(escape_requested(true, &input, &frame));
    }

    #[test]
    fn escape_tapped_between_frames_requests_close() {
        let mut input = InputState::default();
        let mut frame = InputFrame::default();
        input.apply_event(&mut frame, escape(KeyState::Pressed));
        input.apply_event(&mut frame, escape(KeyState::Released));
        assert!(!input.key_down(Key::Escape));
        assert!(escape_requested(true, &input, &frame));
    }

    #[test]
    fn escape_ignored_when_disabled() {
        let mut input = InputState::default();
        let mut frame = InputFrame::default();
        input.apply_event(&mut frame, escape(KeyState::Pressed));
        assert!(!escape_requested(false, &input, &frame));
    }
}
