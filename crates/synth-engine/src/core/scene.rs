use serde::Serialize;

use crate::api::types::{BufferId, GeometryId, MaterialId, NodeId};
use crate::components::geometry::Geometry;
use crate::components::material::Material;
use crate::components::node::Node;

/// Raw attribute data shared with the host by pointer.
#[derive(Debug, Clone, PartialEq)]
pub enum BufferData {
    F32(Vec<f32>),
    U32(Vec<u32>),
}

impl BufferData {
    /// Number of elements (not bytes).
    pub fn len(&self) -> usize {
        match self {
            BufferData::F32(v) => v.len(),
            BufferData::U32(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Raw pointer for reads from wasm memory.
    pub fn as_ptr(&self) -> *const u8 {
        match self {
            BufferData::F32(v) => v.as_ptr() as *const u8,
            BufferData::U32(v) => v.as_ptr() as *const u8,
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            BufferData::F32(_) => "f32",
            BufferData::U32(_) => "u32",
        }
    }
}

/// Serializable summary of one buffer. The data itself is read by the host
/// straight out of wasm memory at `ptr`.
#[derive(Debug, Clone, Serialize)]
pub struct BufferInfo {
    pub id: BufferId,
    pub kind: &'static str,
    pub len: usize,
    /// Byte address in linear memory.
    pub ptr: usize,
}

/// Everything the host needs to build its GPU resources once at mount.
#[derive(Debug, Clone, Serialize)]
pub struct SceneDescriptor<'a> {
    pub nodes: &'a [Node],
    pub geometries: &'a [Geometry],
    pub materials: &'a [Material],
    pub buffers: Vec<BufferInfo>,
}

/// Retained scene graph using flat Vecs indexed by id.
/// Designed for a fixed, small node count (a few hundred) built once.
pub struct Scene {
    nodes: Vec<Node>,
    geometries: Vec<Geometry>,
    materials: Vec<Material>,
    buffers: Vec<BufferData>,
}

impl Scene {
    pub fn new() -> Self {
        Self::with_capacity(256)
    }

    /// Create a scene with a specific node capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(capacity),
            geometries: Vec::new(),
            materials: Vec::new(),
            buffers: Vec::new(),
        }
    }

    /// Add a node to the scene and return its id.
    pub fn spawn(&mut self, mut node: Node) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        node.id = id;
        self.nodes.push(node);
        id
    }

    pub fn add_geometry(&mut self, geometry: Geometry) -> GeometryId {
        self.geometries.push(geometry);
        GeometryId(self.geometries.len() as u32 - 1)
    }

    pub fn add_material(&mut self, material: Material) -> MaterialId {
        self.materials.push(material);
        MaterialId(self.materials.len() as u32 - 1)
    }

    pub fn add_buffer(&mut self, data: BufferData) -> BufferId {
        self.buffers.push(data);
        BufferId(self.buffers.len() as u32 - 1)
    }

    /// Get a reference to a node by id.
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0 as usize)
    }

    /// Get a mutable reference to a node by id.
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.0 as usize)
    }

    pub fn geometry(&self, id: GeometryId) -> Option<&Geometry> {
        self.geometries.get(id.0 as usize)
    }

    pub fn material(&self, id: MaterialId) -> Option<&Material> {
        self.materials.get(id.0 as usize)
    }

    pub fn buffer(&self, id: BufferId) -> Option<&BufferData> {
        self.buffers.get(id.0 as usize)
    }

    /// Iterate over all nodes in id order.
    pub fn iter(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter()
    }

    /// Find the first node with the given tag.
    pub fn find_by_tag(&self, tag: &str) -> Option<&Node> {
        self.nodes.iter().find(|n| n.tag == tag)
    }

    /// Find all nodes with the given tag.
    pub fn find_all_by_tag(&self, tag: &str) -> Vec<&Node> {
        self.nodes.iter().filter(|n| n.tag == tag).collect()
    }

    /// Number of nodes in the scene.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the scene is empty.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn geometry_count(&self) -> usize {
        self.geometries.len()
    }

    pub fn material_count(&self) -> usize {
        self.materials.len()
    }

    pub fn buffer_count(&self) -> usize {
        self.buffers.len()
    }

    pub fn descriptor(&self) -> SceneDescriptor<'_> {
        SceneDescriptor {
            nodes: &self.nodes,
            geometries: &self.geometries,
            materials: &self.materials,
            buffers: self
                .buffers
                .iter()
                .enumerate()
                .map(|(i, b)| BufferInfo {
                    id: BufferId(i as u32),
                    kind: b.kind(),
                    len: b.len(),
                    ptr: b.as_ptr() as usize,
                })
                .collect(),
        }
    }

    /// Serialize the descriptor for the host.
    pub fn descriptor_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.descriptor())
    }

    /// Release every node, geometry, material and buffer.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.geometries.clear();
        self.materials.clear();
        self.buffers.clear();
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::color::Rgb;
    use glam::Vec3;

    #[test]
    fn spawn_and_get() {
        let mut scene = Scene::new();
        let id = scene.spawn(Node::new().with_pos(Vec3::new(10.0, 20.0, 30.0)));
        let n = scene.get(id).unwrap();
        assert_eq!(n.id, id);
        assert_eq!(n.pos, Vec3::new(10.0, 20.0, 30.0));
    }

    #[test]
    fn ids_are_sequential() {
        let mut scene = Scene::new();
        let a = scene.spawn(Node::new());
        let b = scene.spawn(Node::new());
        assert_eq!(a, NodeId(0));
        assert_eq!(b, NodeId(1));
    }

    #[test]
    fn find_by_tag() {
        let mut scene = Scene::new();
        scene.spawn(Node::new().with_tag("sun"));
        let planet = scene.spawn(Node::new().with_tag("planet"));
        assert_eq!(scene.find_by_tag("planet").unwrap().id, planet);
        assert!(scene.find_by_tag("moon").is_none());
    }

    #[test]
    fn descriptor_lists_buffers() {
        let mut scene = Scene::new();
        scene.add_buffer(BufferData::F32(vec![0.0; 9]));
        scene.add_buffer(BufferData::U32(vec![0, 1, 2]));
        let geo = scene.add_geometry(Geometry::Plane { width: 2.0, height: 2.0 });
        let mat = scene.add_material(Material::basic(Rgb::BLACK));
        scene.spawn(Node::new().with_mesh(geo, mat));

        let json = scene.descriptor_json().unwrap();
        assert!(json.contains(r#""kind":"u32""#), "{json}");
        assert!(json.contains(r#""len":9"#), "{json}");
    }

    #[test]
    fn clear_releases_everything() {
        let mut scene = Scene::new();
        scene.add_buffer(BufferData::F32(vec![1.0]));
        scene.add_material(Material::basic(Rgb::WHITE));
        scene.spawn(Node::new());
        scene.clear();
        assert!(scene.is_empty());
        assert_eq!(scene.buffer_count(), 0);
        assert_eq!(scene.material_count(), 0);
    }
}
