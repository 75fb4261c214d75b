//! Seedable pseudo-random source used by the scene builder and the spawn
//! triggers. Injected everywhere randomness is needed so tests can script it.

/// Source of uniform random numbers in `[0, 1)`.
///
/// Everything else (ranges, coin flips, signs) is derived from `next_f32`,
/// so a test double only has to script that one method.
pub trait RandomSource {
    /// Uniform value in `[0, 1)`.
    fn next_f32(&mut self) -> f32;

    /// Uniform value in `[min, max)`.
    fn range(&mut self, min: f32, max: f32) -> f32 {
        min + self.next_f32() * (max - min)
    }

    /// Uniform value in `[-0.5, 0.5)`, scaled by `spread`.
    fn centered(&mut self, spread: f32) -> f32 {
        (self.next_f32() - 0.5) * spread
    }

    /// True with probability `p`.
    fn chance(&mut self, p: f32) -> bool {
        self.next_f32() < p
    }

    /// +1.0 or -1.0 with equal probability.
    fn sign(&mut self) -> f32 {
        if self.next_f32() < 0.5 {
            1.0
        } else {
            -1.0
        }
    }
}

/// Seedable pseudo-random number generator (xorshift64).
/// Deterministic, fast, no-std compatible.
#[derive(Debug, Clone)]
pub struct Rng {
    state: u64,
}

impl Rng {
    pub fn new(seed: u64) -> Self {
        Rng {
            state: if seed == 0 { 1 } else { seed },
        }
    }

    fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        x
    }

    /// Derive a 32-bit seed for a noise field.
    pub fn next_seed(&mut self) -> u32 {
        (self.next_u64() >> 32) as u32
    }
}

impl RandomSource for Rng {
    fn next_f32(&mut self) -> f32 {
        // Top 24 bits fill the f32 mantissa exactly, so 1.0 is never returned.
        (self.next_u64() >> 40) as f32 / (1u64 << 24) as f32
    }
}

/// Replays a fixed list of values, cycling when exhausted.
#[cfg(test)]
pub(crate) struct Scripted {
    values: Vec<f32>,
    cursor: usize,
}

#[cfg(test)]
impl Scripted {
    pub(crate) fn new(values: &[f32]) -> Self {
        Self { values: values.to_vec(), cursor: 0 }
    }

    /// Always returns the same value.
    pub(crate) fn constant(value: f32) -> Self {
        Self::new(&[value])
    }
}

#[cfg(test)]
impl RandomSource for Scripted {
    fn next_f32(&mut self) -> f32 {
        let v = self.values[self.cursor % self.values.len()];
        self.cursor += 1;
        v
    }
}
