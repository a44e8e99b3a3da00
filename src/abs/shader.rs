//! OpenGL Shaders
//!
//! This module defines the [`Shader`] and [`ShaderProgram`] structs for managing OpenGL shaders.
//! This module also provides the [`Uniform`] trait for setting uniform variables in shader
//! programs.

use std::{fmt, path::Path, sync::Arc};

use glow::HasContext;

use crate::error::DemoError;

/// The two programmable stages the demo uses.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl ShaderStage {
    /// The GL enum passed to `glCreateShader`.
    pub fn gl_enum(self) -> u32 {
        match self {
            ShaderStage::Vertex => glow::VERTEX_SHADER,
            ShaderStage::Fragment => glow::FRAGMENT_SHADER,
        }
    }

    fn file_kind(self) -> &'static str {
        match self {
            ShaderStage::Vertex => "vertex shader",
            ShaderStage::Fragment => "fragment shader",
        }
    }
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ShaderStage::Vertex => "vertex",
            ShaderStage::Fragment => "fragment",
        })
    }
}

/// Reads shader source from disk.
///
/// An empty file is returned as-is and left for the compiler to reject.
pub fn read_source(path: &Path, stage: ShaderStage) -> Result<String, DemoError> {
    let source = std::fs::read_to_string(path).map_err(|source| DemoError::MissingFile {
        what: stage.file_kind(),
        path: path.to_path_buf(),
        source,
    })?;
    log::info!("Loaded {stage} shader from {}", path.display());
    Ok(source)
}

/// Represents an individual OpenGL shader.
pub struct Shader {
    gl: Arc<glow::Context>,
    id: glow::Shader,
    stage: ShaderStage,
}

impl Shader {
    /// Compiles a new shader from the given source code.
    pub fn new(gl: &Arc<glow::Context>, stage: ShaderStage, source: &str) -> Result<Self, DemoError> {
        unsafe {
            let shader = gl
                .create_shader(stage.gl_enum())
                .map_err(DemoError::Platform)?;
            gl.shader_source(shader, source);
            gl.compile_shader(shader);

            if !gl.get_shader_compile_status(shader) {
                let log = gl.get_shader_info_log(shader);
                gl.delete_shader(shader);
                return Err(DemoError::ShaderCompile { stage, log });
            }

            log::info!("Compiled {stage} shader");

            Ok(Self {
                gl: Arc::clone(gl),
                id: shader,
                stage,
            })
        }
    }

    /// Reads and compiles a shader from a file.
    pub fn from_file(gl: &Arc<glow::Context>, stage: ShaderStage, path: &Path) -> Result<Self, DemoError> {
        let source = read_source(path, stage)?;
        Self::new(gl, stage, &source)
    }

    pub fn stage(&self) -> ShaderStage {
        self.stage
    }
}

impl Drop for Shader {
    fn drop(&mut self) {
        unsafe {
            self.gl.delete_shader(self.id);
        }
    }
}

/// Represents a uniform variable in a shader program.
pub trait Uniform {
    /// Sets the value of the uniform variable in the given shader program.
    fn set_uniform(&self, gl: &glow::Context, program: glow::Program, name: &str);
}

impl Uniform for f32 {
    fn set_uniform(&self, gl: &glow::Context, program: glow::Program, name: &str) {
        unsafe {
            let location = gl.get_uniform_location(program, name);
            if let Some(loc) = location {
                gl.uniform_1_f32(Some(&loc), *self);
            }
        }
    }
}

impl Uniform for i32 {
    fn set_uniform(&self, gl: &glow::Context, program: glow::Program, name: &str) {
        unsafe {
            let location = gl.get_uniform_location(program, name);
            if let Some(loc) = location {
                gl.uniform_1_i32(Some(&loc), *self);
            }
        }
    }
}

/// Represents an OpenGL shader program composed of multiple shaders.
///
/// The shaders stay attached for the lifetime of the program; they are
/// flagged for deletion when their own [`Shader`] is dropped.
pub struct ShaderProgram {
    gl: Arc<glow::Context>,
    id: glow::Program,
}

impl ShaderProgram {
    /// Links a new shader program from the given shaders.
    ///
    /// When `frag_output` is given, fragment colour output 0 is bound to that
    /// name before linking.
    pub fn new(
        gl: &Arc<glow::Context>,
        shaders: &[&Shader],
        frag_output: Option<&str>,
    ) -> Result<Self, DemoError> {
        unsafe {
            let program = gl.create_program().map_err(DemoError::Platform)?;

            for shader in shaders {
                gl.attach_shader(program, shader.id);
            }

            if let Some(name) = frag_output {
                gl.bind_frag_data_location(program, 0, name);
            }

            gl.link_program(program);

            if !gl.get_program_link_status(program) {
                let log = gl.get_program_info_log(program);
                gl.delete_program(program);
                return Err(DemoError::ShaderLink(log));
            }

            log::debug!("Linked shader program {:?}", program);

            Ok(Self {
                gl: Arc::clone(gl),
                id: program,
            })
        }
    }

    /// Binds the shader program for use.
    pub fn use_program(&self) {
        unsafe {
            self.gl.use_program(Some(self.id));
        }
    }

    /// Looks up a vertex attribute by name. Returns `None` when the linker
    /// dropped it or it never existed.
    pub fn attrib_location(&self, name: &str) -> Option<u32> {
        unsafe { self.gl.get_attrib_location(self.id, name) }
    }

    /// Sets a uniform variable in the shader program.
    pub fn set_uniform<T: Uniform>(&self, name: &str, value: T) {
        value.set_uniform(&self.gl, self.id, name);
    }
}

impl Drop for ShaderProgram {
    fn drop(&mut self) {
        unsafe {
            self.gl.delete_program(self.id);
        }
    }
}
