//! Background shooting stars: thin lines crossing far behind the sun.

use glam::Vec3;

use super::pool::{NodeBound, Pool};
use crate::api::config::PoolConfig;
use crate::components::node::Node;
use crate::components::trigger::SpawnTrigger;
use crate::core::rng::RandomSource;

/// Parked height of a dormant streak.
pub const STREAK_PARK_Y: f32 = 500.0;
const EXIT_X: f32 = 1200.0;
const EXIT_Y: f32 = -100.0;

#[derive(Debug, Clone, PartialEq)]
pub struct Streak {
    pub position: Vec3,
    pub velocity: Vec3,
    /// Line length, applied as the node's z scale.
    pub length: f32,
}

impl Default for Streak {
    fn default() -> Self {
        Self { position: Vec3::new(0.0, STREAK_PARK_Y, 0.0), velocity: Vec3::ZERO, length: 1.0 }
    }
}

impl Streak {
    /// Roll a new streak entering from the left or right edge and drifting
    /// down at 30-40 degrees.
    pub fn launch(rng: &mut dyn RandomSource) -> Self {
        let going_right = rng.next_f32() > 0.5;
        let x = if going_right { -1000.0 } else { 1000.0 };
        let y = rng.range(100.0, 400.0);
        let z = -800.0 - rng.next_f32() * 400.0;

        let speed = rng.range(6.0, 12.0);
        let vx = if going_right { speed } else { -speed };
        let slope = rng.range(0.58, 0.84);
        let vy = -vx.abs() * slope;
        let vz = rng.centered(1.2);

        let length = if rng.next_f32() > 0.7 {
            rng.range(40.0, 80.0)
        } else {
            rng.range(15.0, 35.0)
        };

        Self { position: Vec3::new(x, y, z), velocity: Vec3::new(vx, vy, vz), length }
    }

    /// Advance one frame. Returns false once the streak has left the view.
    pub fn step(&mut self) -> bool {
        self.position += self.velocity;
        self.position.x.abs() <= EXIT_X && self.position.y >= EXIT_Y
    }
}

impl NodeBound for Streak {
    fn write_node(&self, node: &mut Node) {
        node.pos = self.position;
        node.scale = Vec3::new(1.0, 1.0, self.length);
        node.look_along(self.velocity);
    }
}

/// Streak pool plus its spawn cadence.
#[derive(Debug, Clone)]
pub struct StreakField {
    pub pool: Pool<Streak>,
    /// No new streak while this many are crossing.
    max_active: usize,
    trigger: SpawnTrigger,
}

impl StreakField {
    pub fn new(config: &PoolConfig) -> Self {
        Self {
            pool: Pool::new(config.streak_capacity),
            max_active: config.streak_max_active,
            trigger: SpawnTrigger::new(config.streak_chance),
        }
    }

    pub fn update(&mut self, rng: &mut dyn RandomSource) {
        if self.trigger.tick(self.pool.active_count() < self.max_active, rng) {
            let streak = Streak::launch(rng);
            if let Some(slot) = self.pool.spawn(streak) {
                log::debug!("streak spawned in slot {slot}");
            }
        }
        self.pool.update(Streak::step);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::rng::{Rng, Scripted};

    #[test]
    fn launch_heads_downward_toward_center() {
        let mut rng = Rng::new(3);
        for _ in 0..200 {
            let s = Streak::launch(&mut rng);
            assert!(s.velocity.y < 0.0);
            assert_eq!(s.velocity.x.signum(), -s.position.x.signum());
            assert!((15.0..80.0).contains(&s.length));
            assert!((-1200.0..=-800.0).contains(&s.position.z));
        }
    }

    #[test]
    fn leaves_through_side_and_parks() {
        let mut field = StreakField::new(&PoolConfig::default());
        let mut rng = Scripted::constant(0.0);
        field.pool.spawn(Streak::launch(&mut rng));
        assert_eq!(field.pool.active_count(), 1);
        // Going left at 6 units/frame from x = 1000: gone within 400 frames.
        let mut never = Scripted::constant(0.99);
        for _ in 0..400 {
            field.update(&mut never);
        }
        assert_eq!(field.pool.active_count(), 0);
        assert_eq!(field.pool.slots()[0].item.position.y, STREAK_PARK_Y);
    }

    #[test]
    fn pool_holds_thirty_streaks() {
        let config = PoolConfig::default();
        let mut field = StreakField::new(&config);
        let mut rng = Rng::new(4);
        let spawned = (0..31)
            .filter_map(|_| field.pool.spawn(Streak::launch(&mut rng)))
            .count();
        assert_eq!(field.pool.capacity(), 30);
        assert_eq!(spawned, 30);
        assert!(!field.pool.can_spawn());
    }

    #[test]
    fn active_never_exceeds_limit() {
        let config = PoolConfig::default();
        let mut field = StreakField::new(&config);
        let mut always = Scripted::constant(0.0);
        for _ in 0..20 {
            field.update(&mut always);
        }
        assert_eq!(field.pool.active_count(), config.streak_max_active);
        for _ in 0..100 {
            field.update(&mut always);
            assert!(field.pool.active_count() <= config.streak_max_active);
        }
    }
}
