//! Mesh management module.
//!
//! This module defines the [`Mesh`] struct for managing mesh data on the GPU side.
//! Vertices should implement the [`Vertex`] trait, which describes how the
//! interleaved floats of one vertex map onto named shader inputs.

use std::sync::Arc;

use glow::HasContext;

use crate::abs::ShaderProgram;

const FLOAT_SIZE: usize = std::mem::size_of::<f32>();

/// One named input of the vertex shader, measured in floats.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VertexAttribute {
    pub name: &'static str,
    pub components: usize,
    pub offset: usize,
}

impl VertexAttribute {
    pub const fn new(name: &'static str, components: usize, offset: usize) -> Self {
        Self {
            name,
            components,
            offset,
        }
    }
}

/// Trait that defines the layout of an interleaved, all-float vertex.
pub trait Vertex: Copy + Sized {
    /// The attributes in the order they appear in memory.
    const ATTRIBUTES: &'static [VertexAttribute];

    /// Size of one vertex in bytes, as passed to `glVertexAttribPointer`.
    fn stride() -> usize {
        std::mem::size_of::<Self>()
    }

    /// Number of floats in one vertex.
    fn float_count() -> usize {
        Self::stride() / FLOAT_SIZE
    }

    /// Checks that [`Vertex::ATTRIBUTES`] tile the vertex exactly: each attribute
    /// starts where the previous one ended and together they fill the stride.
    fn validate_layout() -> Result<(), String> {
        let mut expected_offset = 0;
        for attrib in Self::ATTRIBUTES {
            if attrib.offset != expected_offset {
                return Err(format!(
                    "attribute `{}` at float offset {}, expected {}",
                    attrib.name, attrib.offset, expected_offset
                ));
            }
            expected_offset += attrib.components;
        }
        if expected_offset * FLOAT_SIZE != Self::stride() {
            return Err(format!(
                "attributes cover {} floats but the vertex is {} bytes",
                expected_offset,
                Self::stride()
            ));
        }
        Ok(())
    }
}

/// Represents a mesh stored on the GPU side.
pub struct Mesh {
    gl: Arc<glow::Context>,
    draw_mode: u32,
    vao: glow::VertexArray,
    vbo: glow::Buffer,
    ebo: Option<glow::Buffer>,
    count: usize,
}

impl Mesh {
    /// Uploads the vertices (and indices, if any) and wires every attribute of
    /// `V` to the matching input of `program`.
    ///
    /// Without indices the mesh is drawn with `glDrawArrays` over all vertices.
    pub fn new<V: Vertex>(
        gl: &Arc<glow::Context>,
        program: &ShaderProgram,
        vertices: &[V],
        indices: Option<&[u16]>,
        draw_mode: u32,
    ) -> Result<Self, String> {
        V::validate_layout()?;

        unsafe {
            let vbo = gl.create_buffer()?;
            log::debug!("Vertex array buffer: {:?}", vbo);
            gl.bind_buffer(glow::ARRAY_BUFFER, Some(vbo));
            gl.buffer_data_u8_slice(
                glow::ARRAY_BUFFER,
                std::slice::from_raw_parts(
                    vertices.as_ptr() as *const u8,
                    std::mem::size_of_val(vertices),
                ),
                glow::STATIC_DRAW,
            );

            let ebo = match indices {
                Some(indices) => {
                    let ebo = gl.create_buffer()?;
                    log::debug!("Element array buffer: {:?}", ebo);
                    gl.bind_buffer(glow::ELEMENT_ARRAY_BUFFER, Some(ebo));
                    gl.buffer_data_u8_slice(
                        glow::ELEMENT_ARRAY_BUFFER,
                        std::slice::from_raw_parts(
                            indices.as_ptr() as *const u8,
                            std::mem::size_of_val(indices),
                        ),
                        glow::STATIC_DRAW,
                    );
                    Some(ebo)
                }
                None => None,
            };

            let vao = gl.create_vertex_array()?;
            gl.bind_vertex_array(Some(vao));
            gl.bind_buffer(glow::ARRAY_BUFFER, Some(vbo));
            if let Some(ebo) = ebo {
                gl.bind_buffer(glow::ELEMENT_ARRAY_BUFFER, Some(ebo));
            }

            let stride = V::stride() as i32;
            for attrib in V::ATTRIBUTES {
                let Some(location) = program.attrib_location(attrib.name) else {
                    log::warn!("Shader has no active attribute `{}`, skipping", attrib.name);
                    continue;
                };
                gl.enable_vertex_attrib_array(location);
                gl.vertex_attrib_pointer_f32(
                    location,
                    attrib.components as i32,
                    glow::FLOAT,
                    false,
                    stride,
                    (attrib.offset * FLOAT_SIZE) as i32,
                );
            }

            gl.bind_vertex_array(None);
            gl.bind_buffer(glow::ARRAY_BUFFER, None);
            gl.bind_buffer(glow::ELEMENT_ARRAY_BUFFER, None);

            Ok(Self {
                gl: Arc::clone(gl),
                draw_mode,
                vao,
                vbo,
                ebo,
                count: indices.map_or(vertices.len(), <[u16]>::len),
            })
        }
    }

    /// Draws the mesh.
    pub fn draw(&self) {
        unsafe {
            self.gl.bind_vertex_array(Some(self.vao));
            if self.ebo.is_some() {
                self.gl
                    .draw_elements(self.draw_mode, self.count as i32, glow::UNSIGNED_SHORT, 0);
            } else {
                self.gl.draw_arrays(self.draw_mode, 0, self.count as i32);
            }
            self.gl.bind_vertex_array(None);
        }
    }

    /// Returns the number of indices, or vertices for a non-indexed mesh.
    pub fn count(&self) -> usize {
        self.count
    }
}

impl Drop for Mesh {
    fn drop(&mut self) {
        unsafe {
            if let Some(ebo) = self.ebo {
                self.gl.delete_buffer(ebo);
            }
            self.gl.delete_buffer(self.vbo);
            self.gl.delete_vertex_array(self.vao);
        }
    }
}
