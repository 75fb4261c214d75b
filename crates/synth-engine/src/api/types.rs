use bytemuck::{Pod, Zeroable};
use serde::Serialize;

/// Index of a node in the scene graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct NodeId(pub u32);

/// Index of a geometry descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct GeometryId(pub u32);

/// Index of a material descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct MaterialId(pub u32);

/// Index of a raw float buffer (point clouds, terrain attributes).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct BufferId(pub u32);

/// Scene event kinds forwarded to the host.
pub const EVENT_IMPACT: f32 = 1.0;
pub const EVENT_COMET: f32 = 2.0;

/// An event communicated from the engine to the host.
/// Generic container: `kind` identifies the event, `a/b/c` carry payload
/// (for impacts: world-space x, y, z of the strike).
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct SceneEvent {
    pub kind: f32,
    pub a: f32,
    pub b: f32,
    pub c: f32,
}

impl SceneEvent {
    pub const FLOATS: usize = 4;

    pub fn impact(x: f32, y: f32, z: f32) -> Self {
        Self { kind: EVENT_IMPACT, a: x, b: y, c: z }
    }

    pub fn comet(x: f32, y: f32, z: f32) -> Self {
        Self { kind: EVENT_COMET, a: x, b: y, c: z }
    }
}
