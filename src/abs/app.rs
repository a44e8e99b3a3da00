//! SDL2 and OpenGL application management.
//!
//! This module defines the [`App`] struct which owns the SDL2 context, the
//! window and the OpenGL context for as long as the demo runs.

use std::sync::Arc;

use crate::{config::WindowConfig, error::DemoError};

/// The [`App`] struct encapsulates the SDL2 and OpenGL context.
///
/// Fields are declared in reverse teardown order: the GL context must be
/// dropped before the window, and the window before SDL itself.
pub struct App {
    pub gl: Arc<glow::Context>,
    pub event_pump: sdl2::EventPump,
    pub gl_context: sdl2::video::GLContext,
    pub window: sdl2::video::Window,
    pub video_subsystem: sdl2::VideoSubsystem,
    pub sdl: sdl2::Sdl,
}

impl App {
    /// Creates the window and a core-profile OpenGL context as described by `config`.
    pub fn new(config: &WindowConfig) -> Result<Self, DemoError> {
        let sdl = sdl2::init().map_err(DemoError::Platform)?;
        let video_subsystem = sdl.video().map_err(DemoError::Platform)?;

        let gl_attr = video_subsystem.gl_attr();
        gl_attr.set_context_profile(sdl2::video::GLProfile::Core);
        gl_attr.set_context_version(config.gl_major, config.gl_minor);
        gl_attr.set_double_buffer(true);

        let window = video_subsystem
            .window(&config.title, config.width, config.height)
            .position(config.x, config.y)
            .opengl()
            .build()?;

        let gl_context = window.gl_create_context().map_err(DemoError::Platform)?;
        window
            .gl_make_current(&gl_context)
            .map_err(DemoError::Platform)?;

        let gl = unsafe {
            glow::Context::from_loader_function(|s| {
                video_subsystem.gl_get_proc_address(s) as *const _
            })
        };
        let event_pump = sdl.event_pump().map_err(DemoError::Platform)?;

        log::info!(
            "Created {}x{} window with OpenGL {}.{} core context",
            config.width,
            config.height,
            config.gl_major,
            config.gl_minor
        );

        Ok(Self {
            gl: Arc::new(gl),
            event_pump,
            gl_context,
            window,
            video_subsystem,
            sdl,
        })
    }

    /// Requests vsync on the current context. Failure is not fatal.
    pub fn set_vsync(&self, enabled: bool) {
        let interval = if enabled {
            sdl2::video::SwapInterval::VSync
        } else {
            sdl2::video::SwapInterval::Immediate
        };
        if let Err(e) = self.video_subsystem.gl_set_swap_interval(interval) {
            log::warn!("Could not set swap interval: {e}");
        }
    }

    /// Presents the back buffer.
    pub fn swap(&self) {
        self.window.gl_swap_window();
    }
}
