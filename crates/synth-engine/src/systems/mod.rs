pub mod builder;
pub mod effects;
pub mod noise;
pub mod orbit;
pub mod render;
pub mod scroll;
pub mod terrain;
pub mod uniforms;
