use noise::{NoiseFn, Simplex};

/// Bound on `|sample|` for the fields used here. Simplex output is nominally
/// [-1, 1]; the margin absorbs the implementation's scaling error.
pub const NOISE_BOUND: f64 = 1.1;

/// A deterministic 2D scalar field in roughly [-1, 1].
pub trait NoiseField {
    fn sample(&self, x: f64, y: f64) -> f64;
}

/// Seeded 2D simplex noise.
pub struct SimplexField {
    inner: Simplex,
    seed: u32,
}

impl SimplexField {
    pub fn new(seed: u32) -> Self {
        Self { inner: Simplex::new(seed), seed }
    }

    pub fn seed(&self) -> u32 {
        self.seed
    }
}

impl NoiseField for SimplexField {
    fn sample(&self, x: f64, y: f64) -> f64 {
        self.inner.get([x, y])
    }
}

/// Constant field. Removes noise from terrain so tests can check the profile.
#[derive(Debug, Clone, Copy, Default)]
pub struct FlatField(pub f64);

impl NoiseField for FlatField {
    fn sample(&self, _x: f64, _y: f64) -> f64 {
        self.0
    }
}
