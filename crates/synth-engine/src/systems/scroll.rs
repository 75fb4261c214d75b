//! Endless terrain: two tiles leapfrog toward the camera.

/// Depth offsets of the two terrain tiles (their mirrored reflections share
/// the same offsets).
///
/// The offsets always differ by exactly one tile depth: a tile that reaches
/// `+depth` jumps back by two depths, landing one depth behind its partner.
#[derive(Debug, Clone, PartialEq)]
pub struct TerrainScroll {
    offsets: [f32; 2],
    depth: f32,
    speed: f32,
}

impl TerrainScroll {
    pub fn new(depth: f32, speed: f32) -> Self {
        Self { offsets: [0.0, -depth], depth, speed }
    }

    /// Advance both tiles one frame and wrap any that passed the camera.
    pub fn advance(&mut self) {
        for z in &mut self.offsets {
            *z += self.speed;
            if *z >= self.depth {
                *z -= 2.0 * self.depth;
            }
        }
    }

    /// Current z offsets of tile 0 and tile 1.
    pub fn offsets(&self) -> [f32; 2] {
        self.offsets
    }

    pub fn depth(&self) -> f32 {
        self.depth
    }
}
