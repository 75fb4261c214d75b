//! Host renderer contract.
//!
//! The engine never draws. It hands a retained scene description to the
//! host once, then one `FrameData` per animation frame. In the browser the
//! host is a JavaScript WebGL renderer behind the `synth-web` bridge; tests
//! use a recording double.

use super::camera::CameraUniform;
use super::instance::{FrameUniforms, ImpactPoint, NodeInstance};
use crate::api::types::SceneEvent;
use crate::core::scene::Scene;

/// Everything that changes between two frames.
#[derive(Debug, Clone, Copy)]
pub struct FrameData<'a> {
    /// Frames rendered since mount, this one included.
    pub frame: u64,
    /// Node transforms in node id order.
    pub instances: &'a [NodeInstance],
    /// One point per impact pool slot.
    pub impact_points: &'a [ImpactPoint],
    pub uniforms: FrameUniforms,
    pub camera: CameraUniform,
    /// Events raised during this frame's update.
    pub events: &'a [SceneEvent],
}

/// A rendering surface driven by the animation driver.
pub trait RenderHost {
    /// True once the underlying graphics context has been lost. Checked at
    /// the start of every frame; a lost context stops the loop.
    fn is_context_lost(&self) -> bool;

    /// Create GPU resources for the scene. Called once, after building.
    fn build(&mut self, scene: &Scene);

    /// Draw one frame.
    fn render(&mut self, frame: &FrameData<'_>);

    /// Resize the drawing surface.
    fn resize(&mut self, width: u32, height: u32, pixel_ratio: f32);
}

/// Test double that records every call.
#[cfg(test)]
#[derive(Debug, Default)]
pub(crate) struct RecordingHost {
    pub lost: bool,
    pub builds: usize,
    pub built_nodes: usize,
    pub renders: usize,
    pub last_frame: u64,
    pub last_instances: Vec<NodeInstance>,
    pub last_uniforms: FrameUniforms,
    pub events: Vec<SceneEvent>,
    pub resizes: Vec<(u32, u32, f32)>,
}

#[cfg(test)]
impl RenderHost for RecordingHost {
    fn is_context_lost(&self) -> bool {
        self.lost
    }

    fn build(&mut self, scene: &Scene) {
        self.builds += 1;
        self.built_nodes = scene.len();
    }

    fn render(&mut self, frame: &FrameData<'_>) {
        self.renders += 1;
        self.last_frame = frame.frame;
        self.last_instances = frame.instances.to_vec();
        self.last_uniforms = frame.uniforms;
        self.events.extend_from_slice(frame.events);
    }

    fn resize(&mut self, width: u32, height: u32, pixel_ratio: f32) {
        self.resizes.push((width, height, pixel_ratio));
    }
}
