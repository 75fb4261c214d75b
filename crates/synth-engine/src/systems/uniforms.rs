use crate::api::config::UniformConfig;
use crate::components::material::TimeSlot;
use crate::renderer::instance::FrameUniforms;

/// Shader time inputs, advanced by a fixed step once per rendered frame.
///
/// The step is per frame, not per second: on a 120 Hz display the disk
/// swirls and the grain flickers twice as fast as at 60 Hz.
#[derive(Debug, Clone, PartialEq)]
pub struct ShaderClock {
    times: [f32; 3],
    steps: [f32; 3],
    grain_amount: f32,
}

impl ShaderClock {
    pub fn new(config: &UniformConfig) -> Self {
        Self {
            times: [0.0; 3],
            steps: [config.disk_step, config.disk_step, config.grain_step],
            grain_amount: config.grain_amount,
        }
    }

    pub fn tick(&mut self) {
        for (time, step) in self.times.iter_mut().zip(self.steps) {
            *time += step;
        }
    }

    pub fn time(&self, slot: TimeSlot) -> f32 {
        self.times[slot.index()]
    }

    pub fn uniforms(&self) -> FrameUniforms {
        FrameUniforms {
            disk_time: self.time(TimeSlot::Disk),
            disk_reflection_time: self.time(TimeSlot::DiskReflection),
            grain_time: self.time(TimeSlot::Grain),
            grain_amount: self.grain_amount,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advances_every_slot_per_tick() {
        let mut clock = ShaderClock::new(&UniformConfig::default());
        for _ in 0..10 {
            clock.tick();
        }
        let u = clock.uniforms();
        assert!((u.disk_time - 0.1).abs() < 1e-5);
        assert_eq!(u.disk_time, u.disk_reflection_time);
        assert!((u.grain_time - 0.1).abs() < 1e-5);
        assert_eq!(u.grain_amount, 0.15);
    }

    #[test]
    fn starts_at_zero() {
        let clock = ShaderClock::new(&UniformConfig::default());
        assert_eq!(clock.time(TimeSlot::Grain), 0.0);
    }
}
