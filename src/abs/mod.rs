//! Thin owners for the SDL2 window and the OpenGL objects the demo creates:
//! application setup, shaders, meshes and textures.

pub mod app;
pub mod mesh;
pub mod shader;
pub mod texture;

pub use app::*;
pub use mesh::*;
pub use shader::*;
pub use texture::*;
