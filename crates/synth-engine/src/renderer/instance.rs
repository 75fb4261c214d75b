use bytemuck::{Pod, Zeroable};

use crate::components::node::Node;

/// Per-node transform written into the frame buffer for the host renderer.
/// Must match the host protocol: 12 floats = 48 bytes stride.
///
/// Transforms are parent-relative; the host composes the hierarchy it
/// built from the scene descriptor.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct NodeInstance {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    /// Orientation quaternion (x, y, z, w).
    pub qx: f32,
    pub qy: f32,
    pub qz: f32,
    pub qw: f32,
    pub sx: f32,
    pub sy: f32,
    pub sz: f32,
    /// 1.0 when the node is drawn, 0.0 when hidden.
    pub visible: f32,
    pub _pad: f32,
}

impl NodeInstance {
    pub const FLOATS: usize = 12;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;

    pub fn from_node(node: &Node) -> Self {
        let q = node.orientation();
        Self {
            x: node.pos.x,
            y: node.pos.y,
            z: node.pos.z,
            qx: q.x,
            qy: q.y,
            qz: q.z,
            qw: q.w,
            sx: node.scale.x,
            sy: node.scale.y,
            sz: node.scale.z,
            visible: if node.visible { 1.0 } else { 0.0 },
            _pad: 0.0,
        }
    }
}

/// One impact particle: world position plus point size (0 = invisible).
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct ImpactPoint {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub size: f32,
}

impl ImpactPoint {
    pub const FLOATS: usize = 4;
}

/// Animated shader inputs for one frame.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct FrameUniforms {
    pub disk_time: f32,
    pub disk_reflection_time: f32,
    pub grain_time: f32,
    pub grain_amount: f32,
}

impl FrameUniforms {
    pub const FLOATS: usize = 4;
}

/// Node transforms for the current frame, in node id order.
pub struct FrameBuffer {
    pub instances: Vec<NodeInstance>,
}

impl FrameBuffer {
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    pub fn with_capacity(nodes: usize) -> Self {
        Self { instances: Vec::with_capacity(nodes) }
    }

    pub fn clear(&mut self) {
        self.instances.clear();
    }

    pub fn push(&mut self, instance: NodeInstance) {
        self.instances.push(instance);
    }

    pub fn instance_count(&self) -> u32 {
        self.instances.len() as u32
    }
}

impl Default for FrameBuffer {
    fn default() -> Self {
        Self::new()
    }
}
