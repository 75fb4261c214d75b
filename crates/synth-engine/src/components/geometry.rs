use serde::Serialize;

use crate::api::types::BufferId;

/// Geometry descriptor. The host builds one GPU mesh per descriptor; several
/// nodes may reference the same geometry (the terrain tiles do).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Geometry {
    Sphere {
        radius: f32,
        width_segments: u32,
        height_segments: u32,
        /// Faces point inward (sky dome).
        inverted: bool,
    },
    Plane {
        width: f32,
        height: f32,
    },
    Box {
        width: f32,
        height: f32,
        depth: f32,
    },
    /// Flat annulus lying in the XZ plane.
    Ring {
        inner: f32,
        outer: f32,
        segments: u32,
    },
    Torus {
        radius: f32,
        tube: f32,
        radial_segments: u32,
        tubular_segments: u32,
    },
    /// Cylinder lying along -Z, shifted so its wide end sits at the node
    /// origin plus `z_offset`. Used for meteor and comet tails.
    Tail {
        radius_head: f32,
        radius_end: f32,
        length: f32,
        radial_segments: u32,
        z_offset: f32,
    },
    /// Unit segment from the origin to +Z; scaled along Z per instance.
    Segment,
    /// Static point cloud; `colors` is per-vertex RGB when present.
    Points {
        positions: BufferId,
        colors: Option<BufferId>,
        count: u32,
    },
    /// Dynamic point cloud rewritten every frame from the frame buffer.
    DynamicPoints {
        capacity: u32,
    },
    /// Procedural terrain grid (see `systems::terrain`).
    Terrain {
        positions: BufferId,
        colors: BufferId,
        normals: BufferId,
        indices: BufferId,
        vertex_count: u32,
    },
    /// Full-screen quad in clip space.
    ScreenQuad,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_type_tag() {
        let json = serde_json::to_string(&Geometry::Ring { inner: 12.0, outer: 32.0, segments: 128 }).unwrap();
        assert!(json.contains(r#""type":"ring""#), "{json}");
        assert!(json.contains(r#""outer":32.0"#), "{json}");
    }
}
