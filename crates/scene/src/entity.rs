//! Drawable entities and the scene that owns them.

use toon_resources::{Material, MaterialHandle, Mesh, MeshHandle, Pool};

use crate::error::{SceneError, SceneResult};
use crate::transform::Transform;

/// One drawable object: shared mesh and material, own transform.
#[derive(Debug, Clone)]
pub struct Entity {
    mesh: MeshHandle,
    material: MaterialHandle,
    transform: Transform,
}

impl Entity {
    pub fn new(mesh: MeshHandle, material: MaterialHandle) -> Self {
        Self {
            mesh,
            material,
            transform: Transform::new(),
        }
    }

    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }

    pub fn mesh(&self) -> MeshHandle {
        self.mesh
    }

    pub fn material(&self) -> MaterialHandle {
        self.material
    }

    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    pub fn transform_mut(&mut self) -> &mut Transform {
        &mut self.transform
    }
}

/// Resource pools plus the ordered entity list.
///
/// Entities draw in insertion order.
#[derive(Debug, Default)]
pub struct Scene {
    meshes: Pool<Mesh>,
    materials: Pool<Material>,
    entities: Vec<Entity>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_mesh(&mut self, mesh: Mesh) -> MeshHandle {
        self.meshes.insert(mesh)
    }

    pub fn add_material(&mut self, material: Material) -> MaterialHandle {
        self.materials.insert(material)
    }

    /// Add an entity and return its index in draw order.
    pub fn spawn(&mut self, entity: Entity) -> SceneResult<usize> {
        if self.meshes.get(entity.mesh).is_none() {
            return Err(SceneError::UnknownHandle {
                kind: "mesh",
                index: entity.mesh.index(),
            });
        }
        if self.materials.get(entity.material).is_none() {
            return Err(SceneError::UnknownHandle {
                kind: "material",
                index: entity.material.index(),
            });
        }
        self.entities.push(entity);
        Ok(self.entities.len() - 1)
    }

    pub fn mesh(&self, handle: MeshHandle) -> Option<&Mesh> {
        self.meshes.get(handle)
    }

    pub fn material(&self, handle: MaterialHandle) -> Option<&Material> {
        self.materials.get(handle)
    }

    pub fn meshes(&self) -> &Pool<Mesh> {
        &self.meshes
    }

    pub fn materials(&self) -> &Pool<Material> {
        &self.materials
    }

    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    pub fn entities_mut(&mut self) -> &mut [Entity] {
        &mut self.entities
    }

    pub fn entity_mut(&mut self, index: usize) -> Option<&mut Entity> {
        self.entities.get_mut(index)
    }

    /// Pools and entities at once, so draw passes can read resources while
    /// refreshing entity transforms.
    pub fn split_mut(&mut self) -> (&Pool<Mesh>, &Pool<Material>, &mut [Entity]) {
        (&self.meshes, &self.materials, &mut self.entities)
    }
}
