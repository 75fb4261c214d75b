//! The single comet that occasionally sweeps across the upper sky.

use std::f32::consts::PI;

use glam::Vec3;

use super::pool::{NodeBound, Pool};
use crate::api::config::PoolConfig;
use crate::components::node::Node;
use crate::components::trigger::SpawnTrigger;
use crate::core::rng::RandomSource;

pub const COMET_PARK: Vec3 = Vec3::new(0.0, 2000.0, 0.0);
const COMET_SPEED: f32 = 1.2;
const EXIT_RANGE: f32 = 1500.0;

#[derive(Debug, Clone, PartialEq)]
pub struct Comet {
    pub position: Vec3,
    pub velocity: Vec3,
    /// Roll applied to the head glow, fixed per pass.
    pub head_roll: f32,
}

impl Default for Comet {
    fn default() -> Self {
        Self { position: COMET_PARK, velocity: Vec3::ZERO, head_roll: 0.0 }
    }
}

impl Comet {
    /// Start on one side, high near the top of the sun, and aim past the
    /// opposite side on a clearly tilted line.
    pub fn launch(rng: &mut dyn RandomSource) -> Self {
        let side = if rng.next_f32() > 0.5 { -1.0 } else { 1.0 };
        let start = Vec3::new(
            side * rng.range(800.0, 1000.0),
            rng.range(180.0, 240.0),
            -1000.0 - rng.next_f32() * 200.0,
        );

        let target_x = -start.x * rng.range(1.5, 2.5);
        let rising = rng.next_f32() > 0.5;
        let rise = rng.range(300.0, 600.0);
        let slope = if rising { rise } else { -rise };
        let target = Vec3::new(target_x, start.y + slope, start.z + rng.centered(400.0));

        let velocity = (target - start).normalize_or_zero() * COMET_SPEED;
        let head_roll = rng.next_f32() * PI;
        Self { position: start, velocity, head_roll }
    }

    /// Advance one frame. Returns false once out of range.
    pub fn step(&mut self) -> bool {
        self.position += self.velocity;
        self.position.x.abs() <= EXIT_RANGE && self.position.z.abs() <= EXIT_RANGE
    }
}

impl NodeBound for Comet {
    fn write_node(&self, node: &mut Node) {
        node.pos = self.position;
        node.look_along(self.velocity);
    }
}

/// One-slot comet pool. The cadence counter only runs while the comet is idle.
#[derive(Debug, Clone)]
pub struct CometSlot {
    pub pool: Pool<Comet>,
    trigger: SpawnTrigger,
}

impl CometSlot {
    pub fn new(config: &PoolConfig) -> Self {
        Self {
            pool: Pool::new(1),
            trigger: SpawnTrigger::new(config.comet_chance).with_delay(config.comet_delay_frames),
        }
    }

    /// Advance one frame. Returns the launch position when a pass begins.
    /// A freshly launched comet does not move until the next frame.
    pub fn update(&mut self, rng: &mut dyn RandomSource) -> Option<Vec3> {
        if self.pool.can_spawn() {
            if self.trigger.tick(true, rng) {
                let comet = Comet::launch(rng);
                let start = comet.position;
                self.pool.spawn(comet)?;
                log::debug!("comet launched at {start}");
                return Some(start);
            }
            return None;
        }
        self.pool.update(Comet::step);
        None
    }

    pub fn current(&self) -> Option<&Comet> {
        self.pool.iter_active().next()
    }

    /// Head roll of the comet occupying the slot (parked value when idle).
    pub fn head_roll(&self) -> f32 {
        self.pool.slots().first().map_or(0.0, |s| s.item.head_roll)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::rng::{Rng, Scripted};

    #[test]
    fn launch_crosses_to_the_other_side() {
        let mut rng = Rng::new(17);
        for _ in 0..100 {
            let c = Comet::launch(&mut rng);
            assert!(c.position.x.abs() >= 800.0);
            assert_eq!(c.velocity.x.signum(), -c.position.x.signum());
            assert!((c.velocity.length() - COMET_SPEED).abs() < 1e-4);
            assert!(c.velocity.y.abs() > 0.05, "flat comet: {:?}", c.velocity);
        }
    }

    #[test]
    fn waits_past_delay_before_launch() {
        let config = PoolConfig::default();
        let mut slot = CometSlot::new(&config);
        let mut rng = Scripted::constant(0.0);
        for _ in 0..config.comet_delay_frames {
            assert!(slot.update(&mut rng).is_none());
        }
        assert!(slot.update(&mut rng).is_some());
        assert!(slot.current().is_some());
    }

    #[test]
    fn at_most_one_comet() {
        let mut slot = CometSlot::new(&PoolConfig::default());
        let mut rng = Scripted::constant(0.0);
        for _ in 0..2000 {
            slot.update(&mut rng);
            assert!(slot.pool.active_count() <= 1);
        }
    }

    #[test]
    fn expired_comet_parks_high() {
        let mut slot = CometSlot::new(&PoolConfig::default());
        let mut launch = Scripted::constant(0.0);
        slot.pool.spawn(Comet::launch(&mut launch));
        let mut idle = Scripted::constant(0.99);
        while slot.pool.active_count() == 1 {
            slot.update(&mut idle);
        }
        assert_eq!(slot.pool.slots()[0].item.position, COMET_PARK);
    }
}
