//! Structs and functions for handling textures.
//!
//! The module provides the [`Texture`] struct which is a CPU representation of a GPU texture,
//! and [`load_image`] for reading the pixels from disk.

use std::{path::Path, sync::Arc};

use glow::HasContext;
use image::RgbaImage;

use crate::error::DemoError;

/// Reads and decodes an image file into RGBA8 pixels.
///
/// A file that cannot be opened is a [`DemoError::MissingFile`]; one that opens
/// but does not decode is a [`DemoError::Image`].
pub fn load_image(path: &Path) -> Result<RgbaImage, DemoError> {
    let reader = image::ImageReader::open(path).map_err(|source| DemoError::MissingFile {
        what: "texture",
        path: path.to_path_buf(),
        source,
    })?;
    let reader = reader
        .with_guessed_format()
        .map_err(|source| DemoError::MissingFile {
            what: "texture",
            path: path.to_path_buf(),
            source,
        })?;
    let image = reader.decode().map_err(|source| DemoError::Image {
        path: path.to_path_buf(),
        source,
    })?;
    log::info!(
        "Loaded texture {} ({}x{})",
        path.display(),
        image.width(),
        image.height()
    );
    Ok(image.to_rgba8())
}

/// Represents a texture stored on the GPU side.
pub struct Texture {
    gl: Arc<glow::Context>,
    id: glow::Texture,
    width: u32,
    height: u32,
}

impl Texture {
    /// Uploads the given RGBA image as a 2D texture.
    pub fn new(gl: &Arc<glow::Context>, image: &RgbaImage) -> Result<Self, DemoError> {
        let (width, height) = image.dimensions();
        unsafe {
            let texture = gl.create_texture().map_err(DemoError::Platform)?;
            gl.bind_texture(glow::TEXTURE_2D, Some(texture));
            gl.tex_image_2d(
                glow::TEXTURE_2D,
                0,
                glow::RGBA as i32,
                width as i32,
                height as i32,
                0,
                glow::RGBA,
                glow::UNSIGNED_BYTE,
                glow::PixelUnpackData::Slice(Some(image.as_raw().as_slice())),
            );
            gl.tex_parameter_i32(
                glow::TEXTURE_2D,
                glow::TEXTURE_WRAP_S,
                glow::CLAMP_TO_EDGE as i32,
            );
            gl.tex_parameter_i32(
                glow::TEXTURE_2D,
                glow::TEXTURE_WRAP_T,
                glow::CLAMP_TO_EDGE as i32,
            );
            gl.tex_parameter_i32(
                glow::TEXTURE_2D,
                glow::TEXTURE_MIN_FILTER,
                glow::LINEAR as i32,
            );
            gl.tex_parameter_i32(
                glow::TEXTURE_2D,
                glow::TEXTURE_MAG_FILTER,
                glow::LINEAR as i32,
            );
            gl.bind_texture(glow::TEXTURE_2D, None);

            Ok(Self {
                gl: Arc::clone(gl),
                id: texture,
                width,
                height,
            })
        }
    }

    /// Returns the width of the texture.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Returns the height of the texture.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Binds the texture to the specified texture unit.
    pub fn bind(&self, unit: u32) {
        unsafe {
            self.gl.active_texture(glow::TEXTURE0 + unit);
            self.gl.bind_texture(glow::TEXTURE_2D, Some(self.id));
        }
    }
}

impl Drop for Texture {
    fn drop(&mut self) {
        unsafe {
            self.gl.delete_texture(self.id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loads_a_bitmap_as_rgba() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("checker.bmp");
        let img = RgbaImage::from_fn(4, 2, |x, y| {
            if (x + y) % 2 == 0 {
                image::Rgba([255, 255, 255, 255])
            } else {
                image::Rgba([0, 0, 0, 255])
            }
        });
        img.save(&path).unwrap();

        let loaded = load_image(&path).unwrap();
        assert_eq!(loaded.dimensions(), (4, 2));
        assert_eq!(loaded.get_pixel(0, 0), &image::Rgba([255, 255, 255, 255]));
        assert_eq!(loaded.get_pixel(1, 0), &image::Rgba([0, 0, 0, 255]));
    }

    #[test]
    fn bundled_texture_decodes() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("assets/texture.bmp");
        let loaded = load_image(&path).unwrap();
        assert_eq!(loaded.dimensions(), (8, 8));
    }

    #[test]
    fn missing_texture_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_image(&dir.path().join("nope.bmp")).unwrap_err();
        assert!(matches!(err, DemoError::MissingFile { what: "texture", .. }));
    }

    #[test]
    fn garbage_is_an_image_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.bmp");
        std::fs::write(&path, b"BMnot really a bitmap").unwrap();

        let err = load_image(&path).unwrap_err();
        assert!(matches!(err, DemoError::Image { .. }));
    }
}
