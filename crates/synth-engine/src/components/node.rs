use glam::{EulerRot, Quat, Vec3};
use serde::Serialize;

use crate::api::types::{GeometryId, MaterialId, NodeId};

/// Retained scene-graph node: a transform plus optional geometry/material.
/// Transforms are mutated in place every frame; nodes are never removed
/// while the scene is alive (pooled effects hide their nodes instead).
#[derive(Debug, Clone, Serialize)]
pub struct Node {
    /// Assigned by `Scene::spawn`.
    pub id: NodeId,
    /// String tag for finding nodes by name.
    pub tag: String,
    /// Parent node; `None` means attached to the scene root.
    pub parent: Option<NodeId>,
    /// Hidden nodes (and their children) are not drawn.
    pub visible: bool,
    /// Position relative to the parent.
    pub pos: Vec3,
    /// Euler rotation (XYZ order, radians).
    pub rotation: Vec3,
    pub scale: Vec3,
    /// Draw ordering hint for transparent passes (higher draws later).
    pub render_order: i32,
    pub geometry: Option<GeometryId>,
    pub material: Option<MaterialId>,
}

impl Node {
    /// Create a new node at the origin. The id is filled in by `Scene::spawn`.
    pub fn new() -> Self {
        Self {
            id: NodeId(0),
            tag: String::new(),
            parent: None,
            visible: true,
            pos: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
            render_order: 0,
            geometry: None,
            material: None,
        }
    }

    // -- Builder pattern --

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = tag.into();
        self
    }

    pub fn with_parent(mut self, parent: NodeId) -> Self {
        self.parent = Some(parent);
        self
    }

    pub fn with_pos(mut self, pos: Vec3) -> Self {
        self.pos = pos;
        self
    }

    pub fn with_rotation(mut self, rotation: Vec3) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_render_order(mut self, order: i32) -> Self {
        self.render_order = order;
        self
    }

    pub fn with_mesh(mut self, geometry: GeometryId, material: MaterialId) -> Self {
        self.geometry = Some(geometry);
        self.material = Some(material);
        self
    }

    pub fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }

    /// Rotation as a quaternion, for packing into the frame buffer.
    pub fn orientation(&self) -> Quat {
        Quat::from_euler(EulerRot::XYZ, self.rotation.x, self.rotation.y, self.rotation.z)
    }

    /// Orient the node so its local +Z axis points along `dir`.
    /// A zero direction leaves the rotation unchanged.
    pub fn look_along(&mut self, dir: Vec3) {
        let Some(dir) = dir.try_normalize() else {
            return;
        };
        let q = Quat::from_rotation_arc(Vec3::Z, dir);
        let (x, y, z) = q.to_euler(EulerRot::XYZ);
        self.rotation = Vec3::new(x, y, z);
    }
}

impl Default for Node {
    fn default() -> Self {
        Self::new()
    }
}
