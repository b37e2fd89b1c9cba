//! Meshes: CPU-side geometry and its uploaded GPU buffers.

use glam::{Vec2, Vec3};
use toon_rhi::{BufferHandle, BufferUsage, GraphicsDevice, Vertex};

use crate::error::{ResourceError, ResourceResult};

/// UV-area threshold below which a triangle contributes no tangent.
const EPSILON: f32 = 1e-8;

/// Triangle-list geometry before upload.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshData {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
}

impl MeshData {
    pub fn new(vertices: Vec<Vertex>, indices: Vec<u32>) -> Self {
        Self { vertices, indices }
    }

    /// Axis-aligned bounds as `(min, max)`, or `None` for an empty mesh.
    pub fn bounds(&self) -> Option<(Vec3, Vec3)> {
        let first = self.vertices.first()?.position;
        Some(self.vertices.iter().fold((first, first), |(min, max), v| {
            (min.min(v.position), max.max(v.position))
        }))
    }

    fn validate(&self, name: &str) -> ResourceResult<()> {
        if self.vertices.is_empty() || self.indices.is_empty() {
            return Err(ResourceError::EmptyMesh(name.to_string()));
        }
        if self.indices.len() % 3 != 0 {
            return Err(ResourceError::NotTriangles {
                name: name.to_string(),
                count: self.indices.len(),
            });
        }
        if let Some(&index) = self
            .indices
            .iter()
            .find(|&&i| i as usize >= self.vertices.len())
        {
            return Err(ResourceError::IndexOutOfRange {
                name: name.to_string(),
                index,
                vertex_count: self.vertices.len(),
            });
        }
        Ok(())
    }
}

/// Compute per-vertex tangents from positions and UVs.
///
/// Each triangle's tangent and bitangent are accumulated on its vertices,
/// then the tangent is Gram-Schmidt orthogonalized against the normal.
/// `w` holds the handedness of the tangent frame (+1 or -1).
///
/// Indices must already be in range.
pub fn compute_tangents(vertices: &mut [Vertex], indices: &[u32]) {
    let mut tangents = vec![Vec3::ZERO; vertices.len()];
    let mut bitangents = vec![Vec3::ZERO; vertices.len()];

    for triangle in indices.chunks_exact(3) {
        let [i0, i1, i2] = [
            triangle[0] as usize,
            triangle[1] as usize,
            triangle[2] as usize,
        ];
        let (v0, v1, v2) = (vertices[i0], vertices[i1], vertices[i2]);

        let edge1 = v1.position - v0.position;
        let edge2 = v2.position - v0.position;
        let duv1: Vec2 = v1.tex_coord - v0.tex_coord;
        let duv2: Vec2 = v2.tex_coord - v0.tex_coord;

        let det = duv1.x * duv2.y - duv2.x * duv1.y;
        if det.abs() < EPSILON {
            continue;
        }
        let r = 1.0 / det;
        let tangent = (edge1 * duv2.y - edge2 * duv1.y) * r;
        let bitangent = (edge2 * duv1.x - edge1 * duv2.x) * r;

        for index in [i0, i1, i2] {
            tangents[index] += tangent;
            bitangents[index] += bitangent;
        }
    }

    for ((vertex, tangent), bitangent) in vertices.iter_mut().zip(tangents).zip(bitangents) {
        let normal = vertex.normal;
        let t = (tangent - normal * normal.dot(tangent)).normalize_or_zero();
        let handedness = if normal.cross(t).dot(bitangent) < 0.0 {
            -1.0
        } else {
            1.0
        };
        vertex.tangent = t.extend(handedness);
    }
}

/// Geometry uploaded to the device.
#[derive(Debug, Clone, PartialEq)]
pub struct Mesh {
    name: String,
    vertex_buffer: BufferHandle,
    index_buffer: BufferHandle,
    vertex_count: u32,
    index_count: u32,
}

impl Mesh {
    /// Validate `data`, fill in tangents and upload both buffers.
    pub fn new(
        device: &mut dyn GraphicsDevice,
        name: impl Into<String>,
        mut data: MeshData,
    ) -> ResourceResult<Self> {
        let name = name.into();
        data.validate(&name)?;
        compute_tangents(&mut data.vertices, &data.indices);

        let vertex_buffer =
            device.create_buffer(BufferUsage::Vertex, bytemuck::cast_slice(&data.vertices))?;
        let index_buffer =
            device.create_buffer(BufferUsage::Index, bytemuck::cast_slice(&data.indices))?;

        tracing::debug!(
            "Mesh '{}' uploaded: {} vertices, {} indices",
            name,
            data.vertices.len(),
            data.indices.len()
        );

        Ok(Self {
            name,
            vertex_buffer,
            index_buffer,
            vertex_count: data.vertices.len() as u32,
            index_count: data.indices.len() as u32,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn vertex_buffer(&self) -> BufferHandle {
        self.vertex_buffer
    }

    pub fn index_buffer(&self) -> BufferHandle {
        self.index_buffer
    }

    pub fn vertex_count(&self) -> u32 {
        self.vertex_count
    }

    /// Number of indices drawn for the whole mesh.
    pub fn index_count(&self) -> u32 {
        self.index_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec4;
    use toon_rhi::RecordingDevice;

    const EPSILON: f32 = 1e-5;

    fn approx_eq(a: Vec4, b: Vec4) -> bool {
        (a - b).abs().max_element() < EPSILON
    }

    fn quad() -> MeshData {
        // Facing -Z, U along +X, V along -Y
        let n = Vec3::NEG_Z;
        MeshData::new(
            vec![
                Vertex::new(Vec3::new(-1.0, 1.0, 0.0), n, Vec2::new(0.0, 0.0)),
                Vertex::new(Vec3::new(1.0, 1.0, 0.0), n, Vec2::new(1.0, 0.0)),
                Vertex::new(Vec3::new(1.0, -1.0, 0.0), n, Vec2::new(1.0, 1.0)),
                Vertex::new(Vec3::new(-1.0, -1.0, 0.0), n, Vec2::new(0.0, 1.0)),
            ],
            vec![0, 1, 2, 0, 2, 3],
        )
    }

    #[test]
    fn test_tangents_follow_u_direction() {
        let mut data = quad();
        compute_tangents(&mut data.vertices, &data.indices);

        for vertex in &data.vertices {
            assert!(approx_eq(vertex.tangent.truncate().extend(0.0), Vec4::X));
            assert!(vertex.tangent.w == 1.0 || vertex.tangent.w == -1.0);
        }
    }

    #[test]
    fn test_degenerate_uvs_give_zero_tangent() {
        let n = Vec3::Y;
        let mut vertices = vec![
            Vertex::new(Vec3::ZERO, n, Vec2::ZERO),
            Vertex::new(Vec3::X, n, Vec2::ZERO),
            Vertex::new(Vec3::Z, n, Vec2::ZERO),
        ];
        compute_tangents(&mut vertices, &[0, 1, 2]);

        for vertex in &vertices {
            assert_eq!(vertex.tangent.truncate(), Vec3::ZERO);
            assert!(!vertex.tangent.w.is_nan());
        }
    }

    #[test]
    fn test_mesh_new_uploads_buffers() {
        let mut device = RecordingDevice::new(64, 64);
        let mesh = Mesh::new(&mut device, "quad", quad()).unwrap();

        assert_eq!(mesh.index_count(), 6);
        assert_eq!(mesh.vertex_count(), 4);
        assert_eq!(
            device.buffer_info(mesh.vertex_buffer()),
            Some((BufferUsage::Vertex, 4 * Vertex::size()))
        );
        assert_eq!(
            device.buffer_info(mesh.index_buffer()),
            Some((BufferUsage::Index, 6 * 4))
        );
    }

    #[test]
    fn test_mesh_validation() {
        let mut device = RecordingDevice::new(64, 64);

        let empty = Mesh::new(&mut device, "empty", MeshData::default());
        assert!(matches!(empty, Err(ResourceError::EmptyMesh(_))));

        let mut partial = quad();
        partial.indices.pop();
        assert!(matches!(
            Mesh::new(&mut device, "partial", partial),
            Err(ResourceError::NotTriangles { count: 5, .. })
        ));

        let mut wild = quad();
        wild.indices[4] = 9;
        assert!(matches!(
            Mesh::new(&mut device, "wild", wild),
            Err(ResourceError::IndexOutOfRange { index: 9, .. })
        ));
    }

    #[test]
    fn test_bounds() {
        let (min, max) = quad().bounds().unwrap();
        assert_eq!(min, Vec3::new(-1.0, -1.0, 0.0));
        assert_eq!(max, Vec3::new(1.0, 1.0, 0.0));
        assert!(MeshData::default().bounds().is_none());
    }
}
