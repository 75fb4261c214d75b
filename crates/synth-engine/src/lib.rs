pub mod api;
pub mod bridge;
pub mod components;
pub mod core;
pub mod error;
pub mod renderer;
pub mod systems;

// Re-export key types at crate root for convenience
pub use api::config::{
    CameraConfig, OrbitConfig, PoolConfig, SceneConfig, TerrainConfig, UniformConfig, ViewportConfig,
};
pub use api::context::SceneContext;
pub use api::theme::{AccentColor, ThemeCycle, ACCENT_COLORS};
pub use api::types::{BufferId, GeometryId, MaterialId, NodeId, SceneEvent, EVENT_COMET, EVENT_IMPACT};
pub use bridge::protocol::{FrameLayout, DEFAULT_MAX_EVENTS, HEADER_FLOATS, PROTOCOL_VERSION};
pub use components::color::{palette, Rgb};
pub use components::geometry::Geometry;
pub use components::material::{BlendMode, Material, Shading, Side, TimeSlot};
pub use components::node::Node;
pub use crate::core::driver::{AnimationDriver, FrameStatus};
pub use crate::core::rng::{RandomSource, Rng};
pub use crate::core::scene::{BufferData, BufferInfo, Scene, SceneDescriptor};
pub use crate::core::time::FrameClock;
pub use crate::core::viewport::{ViewportAdapter, ViewportSize};
pub use error::{SceneError, SceneResult};
pub use renderer::camera::{CameraUniform, PerspectiveCamera};
pub use renderer::instance::{FrameBuffer, FrameUniforms, ImpactPoint, NodeInstance};
pub use renderer::traits::{FrameData, RenderHost};
pub use systems::builder::{SceneBuilder, SceneNodes};
pub use systems::effects::{EffectNodes, EffectsState};
pub use systems::noise::{NoiseField, SimplexField};
pub use systems::terrain::{TerrainClass, TerrainGrid};
