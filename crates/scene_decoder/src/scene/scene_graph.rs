//! Object groups and the scene that owns them

use super::mesh::Mesh;

/// Meshes belonging to one `o` scope
#[derive(Debug, Clone, Default)]
pub struct ObjectGroup {
    name: Option<String>,
    meshes: Vec<Mesh>,
}

impl ObjectGroup {
    pub(crate) fn new(name: Option<String>, meshes: Vec<Mesh>) -> Self {
        Self { name, meshes }
    }

    /// Object name from `o`; the implicit group before the first `o` has none
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Meshes in file order
    pub fn meshes(&self) -> &[Mesh] {
        &self.meshes
    }

    /// Total triangles over all meshes
    pub fn triangle_count(&self) -> usize {
        self.meshes.iter().map(Mesh::triangle_count).sum()
    }
}

/// A decoded model: object groups in file order
#[derive(Debug, Clone, Default)]
pub struct Scene {
    objects: Vec<ObjectGroup>,
}

impl Scene {
    pub(crate) fn new(objects: Vec<ObjectGroup>) -> Self {
        Self { objects }
    }

    /// Object groups in file order
    pub fn objects(&self) -> &[ObjectGroup] {
        &self.objects
    }

    /// Find an object group by name
    pub fn object(&self, name: &str) -> Option<&ObjectGroup> {
        self.objects.iter().find(|object| object.name() == Some(name))
    }

    /// Iterate every mesh of every group
    pub fn meshes(&self) -> impl Iterator<Item = &Mesh> {
        self.objects.iter().flat_map(|object| object.meshes.iter())
    }

    /// Number of meshes over all groups
    pub fn mesh_count(&self) -> usize {
        self.objects.iter().map(|object| object.meshes.len()).sum()
    }

    /// Number of triangles over all groups
    pub fn triangle_count(&self) -> usize {
        self.objects.iter().map(ObjectGroup::triangle_count).sum()
    }

    /// Whether the scene holds no geometry
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}
