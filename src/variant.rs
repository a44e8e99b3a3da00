//! The three demo scenes and their hardcoded geometry.
//!
//! Each variant has its own vertex type. The attribute table on the type is
//! what gets passed to `glVertexAttribPointer`, so it must agree with the
//! `#[repr(C)]` field order.

use std::{path::PathBuf, sync::Arc};

use glam::{Vec2, Vec3};
use serde::Deserialize;

use crate::{
    abs::{Mesh, ShaderProgram, Vertex, VertexAttribute},
    error::DemoError,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    /// A single white triangle, position only.
    Triangle,
    /// A quad with a colour per corner.
    #[default]
    Coloured,
    /// The coloured quad, multiplied with a texture.
    Textured,
}

impl Variant {
    pub fn name(self) -> &'static str {
        match self {
            Variant::Triangle => "triangle",
            Variant::Coloured => "coloured",
            Variant::Textured => "textured",
        }
    }

    pub fn uses_texture(self) -> bool {
        matches!(self, Variant::Textured)
    }

    pub fn draw_mode(self) -> u32 {
        glow::TRIANGLES
    }

    /// Directory holding this variant's `vertex.glsl` and `fragment.glsl`.
    pub fn shader_dir(self) -> PathBuf {
        PathBuf::from("shaders").join(self.name())
    }

    /// Uploads this variant's geometry and binds it to `program`'s inputs.
    pub fn build_mesh(
        self,
        gl: &Arc<glow::Context>,
        program: &ShaderProgram,
    ) -> Result<Mesh, DemoError> {
        let mode = self.draw_mode();
        match self {
            Variant::Triangle => Mesh::new(gl, program, &TRIANGLE_VERTICES, None, mode),
            Variant::Coloured => {
                Mesh::new(gl, program, &COLOURED_VERTICES, Some(&QUAD_INDICES[..]), mode)
            }
            Variant::Textured => {
                Mesh::new(gl, program, &TEXTURED_VERTICES, Some(&QUAD_INDICES[..]), mode)
            }
        }
        .map_err(DemoError::Platform)
    }
}

#[derive(Clone, Copy, Debug)]
#[repr(C)]
pub struct PositionVertex {
    pub position: Vec2,
}

impl Vertex for PositionVertex {
    const ATTRIBUTES: &'static [VertexAttribute] = &[VertexAttribute::new("position", 2, 0)];
}

#[derive(Clone, Copy, Debug)]
#[repr(C)]
pub struct ColouredVertex {
    pub position: Vec2,
    pub colour: Vec3,
}

impl Vertex for ColouredVertex {
    const ATTRIBUTES: &'static [VertexAttribute] = &[
        VertexAttribute::new("position", 2, 0),
        VertexAttribute::new("vColour", 3, 2),
    ];
}

#[derive(Clone, Copy, Debug)]
#[repr(C)]
pub struct TexturedVertex {
    pub position: Vec2,
    pub colour: Vec3,
    pub texcoord: Vec2,
}

impl Vertex for TexturedVertex {
    const ATTRIBUTES: &'static [VertexAttribute] = &[
        VertexAttribute::new("position", 2, 0),
        VertexAttribute::new("vColour", 3, 2),
        VertexAttribute::new("texcoord", 2, 5),
    ];
}

pub const TRIANGLE_VERTICES: [PositionVertex; 3] = [
    PositionVertex {
        position: Vec2::new(0.0, 0.5),
    },
    PositionVertex {
        position: Vec2::new(0.5, -0.5),
    },
    PositionVertex {
        position: Vec2::new(-0.5, -0.5),
    },
];

pub const COLOURED_VERTICES: [ColouredVertex; 4] = [
    ColouredVertex {
        position: Vec2::new(-0.5, 0.5),
        colour: Vec3::new(1.0, 0.0, 0.0),
    },
    ColouredVertex {
        position: Vec2::new(0.5, 0.5),
        colour: Vec3::new(0.0, 1.0, 0.0),
    },
    ColouredVertex {
        position: Vec2::new(-0.5, -0.5),
        colour: Vec3::new(0.0, 0.0, 1.0),
    },
    ColouredVertex {
        position: Vec2::new(0.5, -0.5),
        colour: Vec3::new(1.0, 1.0, 1.0),
    },
];

pub const TEXTURED_VERTICES: [TexturedVertex; 4] = [
    TexturedVertex {
        position: Vec2::new(-0.5, 0.5),
        colour: Vec3::new(1.0, 0.0, 0.0),
        texcoord: Vec2::new(0.0, 0.0),
    },
    TexturedVertex {
        position: Vec2::new(0.5, 0.5),
        colour: Vec3::new(0.0, 1.0, 0.0),
        texcoord: Vec2::new(1.0, 0.0),
    },
    TexturedVertex {
        position: Vec2::new(-0.5, -0.5),
        colour: Vec3::new(0.0, 0.0, 1.0),
        texcoord: Vec2::new(0.0, 1.0),
    },
    TexturedVertex {
        position: Vec2::new(0.5, -0.5),
        colour: Vec3::new(1.0, 1.0, 1.0),
        texcoord: Vec2::new(1.0, 1.0),
    },
];

/// Two triangles sharing the 1-2 diagonal.
pub const QUAD_INDICES: [u16; 6] = [0, 1, 2, 2, 3, 1];

#[cfg(test)]
mod tests {
    use clap::ValueEnum;

    use super::*;

    #[test]
    fn position_only_layout_is_two_floats() {
        assert_eq!(PositionVertex::float_count(), 2);
        assert_eq!(PositionVertex::stride(), 8);
        PositionVertex::validate_layout().unwrap();
    }

    #[test]
    fn coloured_layout_is_five_floats() {
        assert_eq!(ColouredVertex::float_count(), 5);
        assert_eq!(ColouredVertex::stride(), 20);
        assert_eq!(ColouredVertex::ATTRIBUTES[1].offset, 2);
        ColouredVertex::validate_layout().unwrap();
    }

    #[test]
    fn textured_layout_is_seven_floats() {
        assert_eq!(TexturedVertex::float_count(), 7);
        assert_eq!(TexturedVertex::stride(), 28);
        assert_eq!(TexturedVertex::ATTRIBUTES[2].offset, 5);
        TexturedVertex::validate_layout().unwrap();
    }

    #[test]
    fn attribute_offsets_match_field_offsets() {
        assert_eq!(std::mem::offset_of!(ColouredVertex, colour), 2 * 4);
        assert_eq!(std::mem::offset_of!(TexturedVertex, colour), 2 * 4);
        assert_eq!(std::mem::offset_of!(TexturedVertex, texcoord), 5 * 4);
    }

    #[test]
    fn quad_indices_stay_in_bounds() {
        for &i in &QUAD_INDICES {
            assert!((i as usize) < COLOURED_VERTICES.len());
            assert!((i as usize) < TEXTURED_VERTICES.len());
        }
        assert_eq!(QUAD_INDICES.len() % 3, 0);
    }

    #[test]
    fn textured_quad_shares_corners_with_coloured_quad() {
        for (c, t) in COLOURED_VERTICES.iter().zip(TEXTURED_VERTICES.iter()) {
            assert_eq!(c.position, t.position);
            assert_eq!(c.colour, t.colour);
        }
    }

    #[test]
    fn only_the_textured_variant_needs_a_texture() {
        assert!(!Variant::Triangle.uses_texture());
        assert!(!Variant::Coloured.uses_texture());
        assert!(Variant::Textured.uses_texture());
    }

    #[test]
    fn cli_names_match_shader_dirs() {
        for variant in Variant::value_variants() {
            let parsed = Variant::from_str(variant.name(), false).unwrap();
            assert_eq!(parsed, *variant);
            assert_eq!(variant.shader_dir(), PathBuf::from("shaders").join(variant.name()));
        }
    }

    fn bundled_shaders_declare<V: Vertex>(variant: Variant) {
        let dir = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join(variant.shader_dir());
        let vertex = std::fs::read_to_string(dir.join("vertex.glsl")).unwrap();
        let fragment = std::fs::read_to_string(dir.join("fragment.glsl")).unwrap();
        for attrib in V::ATTRIBUTES {
            assert!(
                vertex.contains(&format!(" {};", attrib.name)),
                "{} vertex shader lacks input `{}`",
                variant.name(),
                attrib.name
            );
        }
        assert!(fragment.contains("uniform float brightness;"));
        assert!(fragment.contains("out vec4 outColour;"));
    }

    #[test]
    fn bundled_shaders_match_vertex_layouts() {
        bundled_shaders_declare::<PositionVertex>(Variant::Triangle);
        bundled_shaders_declare::<ColouredVertex>(Variant::Coloured);
        bundled_shaders_declare::<TexturedVertex>(Variant::Textured);
    }
}
