/// Per-frame buffer layout shared with the host renderer.
/// Must stay in sync with the host's frame reader.
///
/// Layout (all values in f32 / 4 bytes):
/// ```text
/// [Header: 16 floats]
/// [Uniforms: 4 floats]
/// [Camera: 32 floats (view, projection; column-major)]
/// [Nodes: max_nodes × 12 floats]
/// [Impact points: max_points × 4 floats]
/// [Events: max_events × 4 floats]
/// ```
///
/// Capacities and offsets are written into the header every frame so the
/// host never hardcodes them.

use crate::api::types::SceneEvent;
use crate::renderer::camera::CameraUniform;
use crate::renderer::instance::{FrameUniforms, ImpactPoint, NodeInstance};
use crate::renderer::traits::FrameData;

/// Number of floats in the header section.
pub const HEADER_FLOATS: usize = 16;

/// Header field indices.
pub const HEADER_PROTOCOL_VERSION: usize = 0;
pub const HEADER_FRAME_COUNTER: usize = 1;
pub const HEADER_NODE_COUNT: usize = 2;
pub const HEADER_POINT_COUNT: usize = 3;
pub const HEADER_EVENT_COUNT: usize = 4;
pub const HEADER_UNIFORM_OFFSET: usize = 5;
pub const HEADER_CAMERA_OFFSET: usize = 6;
pub const HEADER_NODE_OFFSET: usize = 7;
pub const HEADER_POINT_OFFSET: usize = 8;
pub const HEADER_EVENT_OFFSET: usize = 9;
pub const HEADER_TOTAL_FLOATS: usize = 10;

/// Protocol version written into the header.
pub const PROTOCOL_VERSION: f32 = 1.0;

/// Maximum events forwarded per frame; extras are dropped.
pub const DEFAULT_MAX_EVENTS: usize = 8;

/// Runtime-computed frame layout.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameLayout {
    pub max_nodes: usize,
    pub max_points: usize,
    pub max_events: usize,

    pub uniform_offset: usize,
    pub camera_offset: usize,
    pub node_offset: usize,
    pub point_offset: usize,
    pub event_offset: usize,

    /// Total buffer size in floats.
    pub total_floats: usize,
}

impl FrameLayout {
    pub fn new(max_nodes: usize, max_points: usize, max_events: usize) -> Self {
        let uniform_offset = HEADER_FLOATS;
        let camera_offset = uniform_offset + FrameUniforms::FLOATS;
        let node_offset = camera_offset + CameraUniform::FLOATS;
        let point_offset = node_offset + max_nodes * NodeInstance::FLOATS;
        let event_offset = point_offset + max_points * ImpactPoint::FLOATS;
        let total_floats = event_offset + max_events * SceneEvent::FLOATS;

        Self {
            max_nodes,
            max_points,
            max_events,
            uniform_offset,
            camera_offset,
            node_offset,
            point_offset,
            event_offset,
            total_floats,
        }
    }

    pub fn total_bytes(&self) -> usize {
        self.total_floats * 4
    }

    /// Pack `frame` into `out`, resizing it to `total_floats`.
    /// Sections longer than their capacity are truncated.
    pub fn pack(&self, frame: &FrameData<'_>, out: &mut Vec<f32>) {
        out.clear();
        out.resize(self.total_floats, 0.0);

        let nodes = &frame.instances[..frame.instances.len().min(self.max_nodes)];
        let points = &frame.impact_points[..frame.impact_points.len().min(self.max_points)];
        let events = &frame.events[..frame.events.len().min(self.max_events)];

        let header = &mut out[..HEADER_FLOATS];
        header[HEADER_PROTOCOL_VERSION] = PROTOCOL_VERSION;
        header[HEADER_FRAME_COUNTER] = frame.frame as f32;
        header[HEADER_NODE_COUNT] = nodes.len() as f32;
        header[HEADER_POINT_COUNT] = points.len() as f32;
        header[HEADER_EVENT_COUNT] = events.len() as f32;
        header[HEADER_UNIFORM_OFFSET] = self.uniform_offset as f32;
        header[HEADER_CAMERA_OFFSET] = self.camera_offset as f32;
        header[HEADER_NODE_OFFSET] = self.node_offset as f32;
        header[HEADER_POINT_OFFSET] = self.point_offset as f32;
        header[HEADER_EVENT_OFFSET] = self.event_offset as f32;
        header[HEADER_TOTAL_FLOATS] = self.total_floats as f32;

        write_section(out, self.uniform_offset, std::slice::from_ref(&frame.uniforms));
        write_section(out, self.camera_offset, std::slice::from_ref(&frame.camera));
        write_section(out, self.node_offset, nodes);
        write_section(out, self.point_offset, points);
        write_section(out, self.event_offset, events);
    }
}

fn write_section<T: bytemuck::Pod>(out: &mut [f32], offset: usize, items: &[T]) {
    let floats: &[f32] = bytemuck::cast_slice(items);
    out[offset..offset + floats.len()].copy_from_slice(floats);
}
