//! Setup and the poll/clear/draw/swap loop.

use std::{
    sync::Arc,
    time::{Duration, Instant},
};

use glow::HasContext;
use sdl2::{event::Event, keyboard::Scancode};

use crate::{
    abs::*,
    config::Config,
    error::DemoError,
};

/// Name of the fragment shader output bound to draw buffer 0.
pub const FRAG_OUTPUT: &str = "outColour";

/// Returns `true` for events that should end the demo: closing the window or
/// pressing Escape.
pub fn is_quit_event(event: &Event) -> bool {
    matches!(
        event,
        Event::Quit { .. }
            | Event::KeyDown {
                scancode: Some(Scancode::Escape),
                ..
            }
    )
}

/// Brightness uniform value after `elapsed` time: a sine of the seconds.
pub fn brightness_at(elapsed: Duration) -> f32 {
    elapsed.as_secs_f32().sin()
}

/// Everything the demo draws with. Fields drop in declaration order, which is
/// the order the GL objects are released in.
pub struct Demo {
    gl: Arc<glow::Context>,
    program: ShaderProgram,
    vertex_shader: Shader,
    fragment_shader: Shader,
    mesh: Mesh,
    texture: Option<Texture>,
    clear_colour: [f32; 4],
}

impl Demo {
    /// Compiles the shaders, uploads the variant's geometry and, if needed,
    /// its texture.
    pub fn new(app: &App, config: &Config) -> Result<Self, DemoError> {
        let gl = Arc::clone(&app.gl);
        let variant = config.variant;
        log::info!("Running the {} variant", variant.name());

        let vertex_shader =
            Shader::from_file(&gl, ShaderStage::Vertex, &config.vertex_shader_path())?;
        let fragment_shader =
            Shader::from_file(&gl, ShaderStage::Fragment, &config.fragment_shader_path())?;

        let program = ShaderProgram::new(
            &gl,
            &[&vertex_shader, &fragment_shader],
            Some(FRAG_OUTPUT),
        )?;
        program.use_program();

        let mesh = variant.build_mesh(&gl, &program)?;
        log::debug!("Uploaded mesh with {} elements", mesh.count());

        let texture = if variant.uses_texture() {
            let image = load_image(&config.texture_path())?;
            let texture = Texture::new(&gl, &image)?;
            log::debug!("Uploaded {}x{} texture", texture.width(), texture.height());
            program.set_uniform("tex", 0i32);
            Some(texture)
        } else {
            None
        };

        program.set_uniform("brightness", 1.0f32);

        Ok(Self {
            gl,
            program,
            vertex_shader,
            fragment_shader,
            mesh,
            texture,
            clear_colour: config.clear_colour,
        })
    }

    /// Draws one frame with the given brightness.
    fn render(&self, brightness: f32) {
        let [r, g, b, a] = self.clear_colour;
        unsafe {
            self.gl.clear_color(r, g, b, a);
            self.gl.clear(glow::COLOR_BUFFER_BIT);
        }

        self.program.use_program();
        self.program.set_uniform("brightness", brightness);
        if let Some(texture) = &self.texture {
            texture.bind(0);
        }
        self.mesh.draw();
    }

    /// Runs until the window is closed or Escape is pressed.
    pub fn run(&mut self, app: &mut App) {
        let start = Instant::now();
        let mut frames: u64 = 0;

        'running: loop {
            for event in app.event_pump.poll_iter() {
                if is_quit_event(&event) {
                    log::debug!("Quit requested by {:?}", event);
                    break 'running;
                }
            }

            self.render(brightness_at(start.elapsed()));
            app.swap();
            frames += 1;
        }

        let elapsed = start.elapsed();
        log::info!(
            "Rendered {} frames in {:.2?} ({:.1} fps)",
            frames,
            elapsed,
            frames as f64 / elapsed.as_secs_f64().max(f64::EPSILON)
        );
    }
}

impl Drop for Demo {
    fn drop(&mut self) {
        log::debug!(
            "Releasing program, {} and {} shaders, buffers and vertex array",
            self.vertex_shader.stage(),
            self.fragment_shader.stage()
        );
    }
}

#[cfg(test)]
mod tests {
    use sdl2::keyboard::{Keycode, Mod};

    use super::*;

    fn key_down(scancode: Scancode, keycode: Keycode) -> Event {
        Event::KeyDown {
            timestamp: 0,
            window_id: 1,
            keycode: Some(keycode),
            scancode: Some(scancode),
            keymod: Mod::NOMOD,
            repeat: false,
        }
    }

    #[test]
    fn window_close_quits() {
        assert!(is_quit_event(&Event::Quit { timestamp: 0 }));
    }

    #[test]
    fn escape_quits() {
        assert!(is_quit_event(&key_down(Scancode::Escape, Keycode::Escape)));
    }

    #[test]
    fn other_keys_do_not_quit() {
        assert!(!is_quit_event(&key_down(Scancode::Space, Keycode::Space)));
        assert!(!is_quit_event(&Event::KeyUp {
            timestamp: 0,
            window_id: 1,
            keycode: Some(Keycode::Escape),
            scancode: Some(Scancode::Escape),
            keymod: Mod::NOMOD,
            repeat: false,
        }));
    }

    #[test]
    fn brightness_follows_a_sine_of_seconds() {
        assert_eq!(brightness_at(Duration::ZERO), 0.0);
        let quarter = Duration::from_secs_f32(std::f32::consts::FRAC_PI_2);
        assert!((brightness_at(quarter) - 1.0).abs() < 1e-5);
        let half = Duration::from_secs_f32(std::f32::consts::PI);
        assert!(brightness_at(half).abs() < 1e-5);
        assert!(brightness_at(Duration::from_millis(4712)) < -0.99);
    }
}
