//! Vertex data structures and input layout descriptions.
//!
//! The whole pipeline uses a single vertex format, [`Vertex`], so the
//! input layout is a constant table rather than a builder.

use bytemuck::{Pod, Zeroable};
use glam::{Vec2, Vec3, Vec4};

/// One element of the vertex input layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VertexElement {
    /// HLSL-style semantic name.
    pub semantic: &'static str,
    /// Shader input location.
    pub location: u32,
    /// Number of 32-bit float components.
    pub components: u32,
    /// Byte offset inside the vertex.
    pub offset: u32,
}

/// Standard vertex format with position, normal, UV, and tangent.
///
/// Each vertex contains:
/// - `position` (Vec3): 3D position in object space
/// - `normal` (Vec3): Surface normal vector (should be normalized)
/// - `tex_coord` (Vec2): Texture coordinates (UV)
/// - `tangent` (Vec4): Tangent vector with handedness in w component
///
/// # Memory Layout
///
/// - Offset 0: position (12 bytes)
/// - Offset 12: normal (12 bytes)
/// - Offset 24: tex_coord (8 bytes)
/// - Offset 32: tangent (16 bytes)
/// - Total size: 48 bytes
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    /// 3D position in object space.
    pub position: Vec3,
    /// Surface normal vector (should be normalized).
    pub normal: Vec3,
    /// Texture coordinates (UV).
    pub tex_coord: Vec2,
    /// Tangent vector with handedness in w component.
    pub tangent: Vec4,
}

impl Vertex {
    /// Input layout matching the field order above.
    pub const LAYOUT: [VertexElement; 4] = [
        VertexElement {
            semantic: "POSITION",
            location: 0,
            components: 3,
            offset: 0,
        },
        VertexElement {
            semantic: "NORMAL",
            location: 1,
            components: 3,
            offset: 12,
        },
        VertexElement {
            semantic: "TEXCOORD",
            location: 2,
            components: 2,
            offset: 24,
        },
        VertexElement {
            semantic: "TANGENT",
            location: 3,
            components: 4,
            offset: 32,
        },
    ];

    /// Creates a vertex with a zero tangent. Tangents are filled in when
    /// the mesh is built.
    #[inline]
    pub const fn new(position: Vec3, normal: Vec3, tex_coord: Vec2) -> Self {
        Self {
            position,
            normal,
            tex_coord,
            tangent: Vec4::ZERO,
        }
    }

    /// Returns the size of the vertex in bytes.
    #[inline]
    pub const fn size() -> usize {
        std::mem::size_of::<Self>()
    }

    /// Vertex buffer stride in bytes.
    #[inline]
    pub const fn stride() -> u32 {
        Self::size() as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertex_size() {
        // Vec3 (12) + Vec3 (12) + Vec2 (8) + Vec4 (16) = 48 bytes
        assert_eq!(std::mem::size_of::<Vertex>(), 48);
        assert_eq!(Vertex::size(), 48);
        assert_eq!(Vertex::stride(), 48);
    }

    #[test]
    fn test_vertex_new_has_zero_tangent() {
        let vertex = Vertex::new(Vec3::new(1.0, 2.0, 3.0), Vec3::Y, Vec2::new(0.5, 0.5));

        assert_eq!(vertex.position, Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(vertex.normal, Vec3::Y);
        assert_eq!(vertex.tex_coord, Vec2::new(0.5, 0.5));
        assert_eq!(vertex.tangent, Vec4::ZERO);
    }

    #[test]
    fn test_vertex_bytes() {
        let vertices = [Vertex::default(); 3];
        let bytes: &[u8] = bytemuck::cast_slice(&vertices);
        assert_eq!(bytes.len(), 144);
    }

    #[test]
    fn test_layout_matches_offsets() {
        use std::mem::offset_of;

        assert_eq!(offset_of!(Vertex, position) as u32, Vertex::LAYOUT[0].offset);
        assert_eq!(offset_of!(Vertex, normal) as u32, Vertex::LAYOUT[1].offset);
        assert_eq!(offset_of!(Vertex, tex_coord) as u32, Vertex::LAYOUT[2].offset);
        assert_eq!(offset_of!(Vertex, tangent) as u32, Vertex::LAYOUT[3].offset);

        let total: u32 = Vertex::LAYOUT.iter().map(|e| e.components * 4).sum();
        assert_eq!(total, Vertex::stride());
    }
}
