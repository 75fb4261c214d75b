pub mod color;
pub mod geometry;
pub mod material;
pub mod node;
pub mod trigger;
