/// Frame counter and wall-clock reading for the animation driver.
///
/// The driver runs exactly one update per host refresh; there is no
/// accumulator. Per-frame increments (shader time, spins, scroll) therefore
/// scale with the display refresh rate, while orbits read `now_ms` directly.
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    /// Frames completed since mount.
    frame: u64,
    /// Wall-clock milliseconds of the current frame.
    now_ms: f64,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin a new frame at wall-clock `now_ms`.
    pub fn advance(&mut self, now_ms: f64) {
        self.now_ms = now_ms;
        self.frame += 1;
    }

    /// Number of frames begun so far.
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Wall-clock milliseconds of the current frame.
    pub fn now_ms(&self) -> f64 {
        self.now_ms
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_frames() {
        let mut clock = FrameClock::new();
        clock.advance(1000.0);
        clock.advance(1016.0);
        assert_eq!(clock.frame(), 2);
        assert_eq!(clock.now_ms(), 1016.0);
    }
}
