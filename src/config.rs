//! Demo configuration.
//!
//! Values come from, in increasing priority: built-in defaults, an optional
//! JSON file, and command-line flags.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::{error::DemoError, variant::Variant};

/// Window and context parameters.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
    pub gl_major: u8,
    pub gl_minor: u8,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "OpenGL".to_string(),
            x: 100,
            y: 100,
            width: 800,
            height: 600,
            gl_major: 3,
            gl_minor: 2,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub window: WindowConfig,
    pub variant: Variant,
    pub vertex_shader: Option<PathBuf>,
    pub fragment_shader: Option<PathBuf>,
    pub texture: Option<PathBuf>,
    pub clear_colour: [f32; 4],
    pub vsync: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            window: WindowConfig::default(),
            variant: Variant::Coloured,
            vertex_shader: None,
            fragment_shader: None,
            texture: None,
            clear_colour: [0.2, 0.1, 0.2, 1.0],
            vsync: true,
        }
    }
}

impl Config {
    /// Reads a JSON config file. Missing keys keep their defaults.
    pub fn load(path: &Path) -> Result<Self, DemoError> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| DemoError::Config(format!("{}: {e}", path.display())))?;
        Self::from_json(&text)
    }

    pub fn from_json(text: &str) -> Result<Self, DemoError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Vertex shader path, defaulting to the variant's bundled shader.
    pub fn vertex_shader_path(&self) -> PathBuf {
        self.vertex_shader
            .clone()
            .unwrap_or_else(|| self.variant.shader_dir().join("vertex.glsl"))
    }

    /// Fragment shader path, defaulting to the variant's bundled shader.
    pub fn fragment_shader_path(&self) -> PathBuf {
        self.fragment_shader
            .clone()
            .unwrap_or_else(|| self.variant.shader_dir().join("fragment.glsl"))
    }

    pub fn texture_path(&self) -> PathBuf {
        self.texture
            .clone()
            .unwrap_or_else(|| PathBuf::from("assets/texture.bmp"))
    }
}
