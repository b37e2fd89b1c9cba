//! Primitive demo geometry.
//!
//! Faces are wound clockwise when seen from outside, the front-face
//! convention of the left-handed pipeline. UVs run (0,0) top-left to
//! (1,1) bottom-right on every face.

use glam::{Vec2, Vec3};
use toon_rhi::Vertex;

use crate::mesh::MeshData;

/// Append one quad facing `normal`. `right` and `up` are the face axes as
/// seen from outside; `half` scales the unit cube.
fn add_face(data: &mut MeshData, normal: Vec3, right: Vec3, up: Vec3, half: Vec3) {
    let base = data.vertices.len() as u32;
    let corners = [
        (-right + up, Vec2::new(0.0, 0.0)),
        (right + up, Vec2::new(1.0, 0.0)),
        (right - up, Vec2::new(1.0, 1.0)),
        (-right - up, Vec2::new(0.0, 1.0)),
    ];
    for (offset, uv) in corners {
        data.vertices
            .push(Vertex::new((normal + offset) * half, normal, uv));
    }
    data.indices
        .extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
}

/// Axis-aligned box centred on the origin with the given full extents.
///
/// 24 vertices (4 per face) so each face keeps a flat normal; 36 indices.
pub fn cube(size: Vec3) -> MeshData {
    let half = size * 0.5;
    let mut data = MeshData {
        vertices: Vec::with_capacity(24),
        indices: Vec::with_capacity(36),
    };

    add_face(&mut data, Vec3::X, Vec3::Z, Vec3::Y, half);
    add_face(&mut data, Vec3::NEG_X, Vec3::NEG_Z, Vec3::Y, half);
    add_face(&mut data, Vec3::Y, Vec3::X, Vec3::Z, half);
    add_face(&mut data, Vec3::NEG_Y, Vec3::X, Vec3::NEG_Z, half);
    add_face(&mut data, Vec3::Z, Vec3::NEG_X, Vec3::Y, half);
    add_face(&mut data, Vec3::NEG_Z, Vec3::X, Vec3::Y, half);

    data
}

/// Flat `width x depth` quad in the XZ plane facing +Y.
pub fn plane(width: f32, depth: f32) -> MeshData {
    let mut data = MeshData {
        vertices: Vec::with_capacity(4),
        indices: Vec::with_capacity(6),
    };
    // Zero Y half-extent flattens the +Y face onto y = 0.
    add_face(
        &mut data,
        Vec3::Y,
        Vec3::X,
        Vec3::Z,
        Vec3::new(width * 0.5, 0.0, depth * 0.5),
    );
    data
}
