//! Foreground meteors that dive into the valley and burst on impact.

use glam::Vec3;

use super::pool::{NodeBound, Pool};
use crate::api::config::PoolConfig;
use crate::components::node::Node;
use crate::components::trigger::SpawnTrigger;
use crate::core::rng::RandomSource;

pub const METEOR_PARK_Y: f32 = 500.0;
/// Height of the impact point above the valley floor.
pub const IMPACT_HEIGHT: f32 = 2.0;
/// Meteors aim at this height; the ground check fires first.
const AIM_Y: f32 = -10.0;

#[derive(Debug, Clone, PartialEq)]
pub struct Meteor {
    pub position: Vec3,
    pub velocity: Vec3,
}

impl Default for Meteor {
    fn default() -> Self {
        Self { position: Vec3::new(0.0, METEOR_PARK_Y, 0.0), velocity: Vec3::ZERO }
    }
}

impl Meteor {
    /// Start high above the valley and aim at a point near its center.
    pub fn launch(rng: &mut dyn RandomSource) -> Self {
        let start = Vec3::new(
            rng.centered(600.0),
            rng.range(300.0, 400.0),
            rng.range(-300.0, -200.0),
        );
        let target = Vec3::new(rng.centered(150.0), AIM_Y, -50.0 + rng.centered(150.0));
        let speed = rng.range(3.0, 4.5);
        let velocity = (target - start).normalize_or_zero() * speed;
        Self { position: start, velocity }
    }
}

impl NodeBound for Meteor {
    fn write_node(&self, node: &mut Node) {
        node.pos = self.position;
        node.look_along(self.velocity);
    }
}

/// Meteor pool. Each meteor that reaches the ground reports an impact site
/// and returns to the pool in the same step.
#[derive(Debug, Clone)]
pub struct MeteorShower {
    pub pool: Pool<Meteor>,
    /// Launches wait while this many meteors are in flight.
    max_active: usize,
    trigger: SpawnTrigger,
    ground: f32,
}

impl MeteorShower {
    pub fn new(config: &PoolConfig) -> Self {
        Self {
            pool: Pool::new(config.meteor_capacity),
            max_active: config.meteor_max_active,
            trigger: SpawnTrigger::new(config.meteor_chance)
                .with_delay(config.meteor_delay_frames)
                .counting_while_blocked(),
            ground: config.meteor_ground,
        }
    }

    /// Advance one frame, pushing the impact site of every meteor that hit
    /// the ground onto `impacts`.
    pub fn update(&mut self, rng: &mut dyn RandomSource, impacts: &mut Vec<Vec3>) {
        if self.trigger.tick(self.pool.active_count() < self.max_active, rng) {
            if let Some(slot) = self.pool.spawn(Meteor::launch(rng)) {
                log::debug!("meteor launched in slot {slot}");
            }
        }

        let ground = self.ground;
        self.pool.update(|meteor| {
            meteor.position += meteor.velocity;
            if meteor.position.y <= ground {
                impacts.push(Vec3::new(meteor.position.x, IMPACT_HEIGHT, meteor.position.z));
                return false;
            }
            true
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::rng::{Rng, Scripted};

    #[test]
    fn launch_aims_down_into_valley() {
        let mut rng = Rng::new(5);
        for _ in 0..100 {
            let m = Meteor::launch(&mut rng);
            assert!(m.velocity.y < 0.0);
            let speed = m.velocity.length();
            assert!((2.999..=4.501).contains(&speed), "speed {speed}");
        }
    }

    #[test]
    fn impact_reported_and_meteor_dormant_same_step() {
        let mut shower = MeteorShower::new(&PoolConfig::default());
        let mut rng = Scripted::constant(0.5);
        shower.pool.spawn(Meteor::launch(&mut rng));

        let mut never = Scripted::constant(0.99);
        let mut impacts = Vec::new();
        let mut frames = 0;
        while impacts.is_empty() {
            shower.update(&mut never, &mut impacts);
            frames += 1;
            assert!(frames < 1000, "meteor never landed");
        }
        assert_eq!(impacts.len(), 1);
        assert_eq!(impacts[0].y, IMPACT_HEIGHT);
        assert_eq!(shower.pool.active_count(), 0);
        assert_eq!(shower.pool.slots()[0].item.position.y, METEOR_PARK_Y);
    }

    #[test]
    fn full_pool_drops_the_ninth_meteor() {
        let config = PoolConfig::default();
        let mut shower = MeteorShower::new(&config);
        let mut rng = Rng::new(11);
        let spawned = (0..9)
            .filter_map(|_| shower.pool.spawn(Meteor::launch(&mut rng)))
            .count();
        assert_eq!(shower.pool.capacity(), config.meteor_capacity);
        assert_eq!(spawned, 8);
        assert_eq!(shower.pool.active_count(), 8);
    }

    #[test]
    fn busy_sky_holds_back_launches() {
        let config = PoolConfig::default();
        let mut shower = MeteorShower::new(&config);
        let mut always = Scripted::constant(0.1);
        let mut impacts = Vec::new();
        for _ in 0..config.meteor_delay_frames {
            shower.update(&mut always, &mut impacts);
        }

        let mut rng = Scripted::constant(0.5);
        shower.pool.spawn(Meteor::launch(&mut rng));
        shower.pool.spawn(Meteor::launch(&mut rng));
        for _ in 0..10 {
            shower.update(&mut always, &mut impacts);
            assert_eq!(shower.pool.active_count(), 2);
        }
        assert!(impacts.is_empty());
    }

    #[test]
    fn one_meteor_at_a_time() {
        let config = PoolConfig::default();
        let mut shower = MeteorShower::new(&config);
        let mut rng = Scripted::constant(0.1);
        let mut impacts = Vec::new();
        for _ in 0..3000 {
            shower.update(&mut rng, &mut impacts);
            assert!(shower.pool.active_count() <= config.meteor_max_active);
        }
        assert!(!impacts.is_empty());
    }

    #[test]
    fn launches_once_delay_has_passed() {
        let config = PoolConfig::default();
        let mut shower = MeteorShower::new(&config);
        let mut rng = Scripted::constant(0.1);
        let mut impacts = Vec::new();
        for _ in 0..config.meteor_delay_frames {
            shower.update(&mut rng, &mut impacts);
        }
        assert_eq!(shower.pool.active_count(), 0);
        shower.update(&mut rng, &mut impacts);
        assert_eq!(shower.pool.active_count(), 1);
    }

    #[test]
    fn failed_roll_leaves_pool_empty() {
        let config = PoolConfig::default();
        let mut shower = MeteorShower::new(&config);
        let mut rng = Scripted::constant(0.9);
        let mut impacts = Vec::new();
        for _ in 0..=config.meteor_delay_frames * 2 {
            shower.update(&mut rng, &mut impacts);
        }
        assert_eq!(shower.pool.active_count(), 0);
    }
}
