use crate::core::rng::RandomSource;

/// Frame-counted spawn cadence: wait `delay_frames`, then fire with
/// probability `chance` on each frame the gate is open.
#[derive(Debug, Clone)]
pub struct SpawnTrigger {
    /// Frames that must elapse since the last spawn before rolling.
    pub delay_frames: u32,
    /// Per-frame spawn probability once the delay has passed.
    pub chance: f32,
    /// When false, the counter only runs while the gate is open.
    pub count_while_blocked: bool,
    timer: u32,
}

impl SpawnTrigger {
    /// Fire with probability `chance` on every open frame.
    pub fn new(chance: f32) -> Self {
        Self { delay_frames: 0, chance, count_while_blocked: false, timer: 0 }
    }

    // -- Builder pattern --

    pub fn with_delay(mut self, frames: u32) -> Self {
        self.delay_frames = frames;
        self
    }

    pub fn counting_while_blocked(mut self) -> Self {
        self.count_while_blocked = true;
        self
    }

    /// Frames counted since the last spawn.
    pub fn timer(&self) -> u32 {
        self.timer
    }

    /// Advance one frame. `open` is false while the target pool is saturated.
    /// Randomness is only consumed when the gate is open and the delay has
    /// passed. Returns true when a spawn should happen; the counter resets.
    pub fn tick(&mut self, open: bool, rng: &mut dyn RandomSource) -> bool {
        if open || self.count_while_blocked {
            self.timer = self.timer.saturating_add(1);
        }
        if !open || self.timer <= self.delay_frames {
            return false;
        }
        if rng.chance(self.chance) {
            self.timer = 0;
            true
        } else {
            false
        }
    }
}
