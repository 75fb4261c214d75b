//! Meteor impact bursts: a bright flash, a ground-level shockwave ring and
//! an upward splash, all drawn from one shared point buffer.

use std::f32::consts::TAU;

use glam::Vec3;

use super::pool::{Pool, SlotState};
use crate::core::rng::RandomSource;
use crate::renderer::instance::ImpactPoint;

pub const SHOCKWAVE_COUNT: usize = 15;
pub const SPLASH_COUNT: usize = 40;
/// Particles requested per impact (flash + shockwave + splash).
pub const BURST_SIZE: usize = 1 + SHOCKWAVE_COUNT + SPLASH_COUNT;

const FLASH_AGE_STEP: f32 = 0.05;
const DEBRIS_AGE_STEP: f32 = 0.02;
const FLASH_SIZE: f32 = 150.0;
const DEBRIS_SIZE: f32 = 10.0;
const EXPANSION: f32 = 15.0;
const EXPANSION_EXPONENT: f32 = 0.4;
const SINK_RATE: f32 = 5.0;
const FLASH_LIFT: f32 = 5.0;
const SHOCKWAVE_LIFT: f32 = 1.0;

/// Where dormant particles are parked (far below the ground, zero size).
pub const PARKED_POINT: ImpactPoint = ImpactPoint { x: 0.0, y: -5000.0, z: 0.0, size: 0.0 };

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BurstKind {
    Flash,
    Shockwave,
    Splash,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ImpactParticle {
    pub kind: BurstKind,
    pub origin: Vec3,
    /// Direction and reach of the particle's travel.
    pub seed: Vec3,
    /// Normalized age in [0, 1].
    pub age: f32,
}

impl Default for ImpactParticle {
    fn default() -> Self {
        Self {
            kind: BurstKind::Splash,
            origin: Vec3::new(PARKED_POINT.x, PARKED_POINT.y, PARKED_POINT.z),
            seed: Vec3::ZERO,
            age: 0.0,
        }
    }
}

impl ImpactParticle {
    fn new(kind: BurstKind, origin: Vec3, seed: Vec3) -> Self {
        Self { kind, origin, seed, age: 0.0 }
    }

    /// Age one frame. Returns false once fully faded.
    pub fn step(&mut self) -> bool {
        self.age += match self.kind {
            BurstKind::Flash => FLASH_AGE_STEP,
            _ => DEBRIS_AGE_STEP,
        };
        self.age <= 1.0
    }

    /// Current render position and point size.
    pub fn point(&self) -> ImpactPoint {
        let fade = 1.0 - self.age;
        match self.kind {
            BurstKind::Flash => ImpactPoint {
                x: self.origin.x,
                y: self.origin.y,
                z: self.origin.z,
                size: fade * FLASH_SIZE,
            },
            BurstKind::Shockwave | BurstKind::Splash => {
                let expansion = self.age.powf(EXPANSION_EXPONENT) * EXPANSION;
                let p = self.origin + self.seed * expansion;
                ImpactPoint {
                    x: p.x,
                    y: (p.y - self.age * SINK_RATE).max(0.0),
                    z: p.z,
                    size: fade * DEBRIS_SIZE,
                }
            }
        }
    }
}

/// Impact particle pool plus the per-slot point buffer handed to the host.
#[derive(Debug, Clone)]
pub struct ImpactField {
    pub pool: Pool<ImpactParticle>,
    points: Vec<ImpactPoint>,
}

impl ImpactField {
    pub fn new(capacity: usize) -> Self {
        Self { pool: Pool::new(capacity), points: vec![PARKED_POINT; capacity] }
    }

    /// Allocate one burst at `site`. The flash is allocated first; requests
    /// beyond the free slots are dropped. Returns the number allocated.
    pub fn burst(&mut self, site: Vec3, rng: &mut dyn RandomSource) -> usize {
        let mut allocated = 0;
        let flash = ImpactParticle::new(BurstKind::Flash, site + Vec3::Y * FLASH_LIFT, Vec3::ZERO);
        allocated += self.pool.spawn(flash).is_some() as usize;

        for _ in 0..SHOCKWAVE_COUNT {
            let angle = rng.next_f32() * TAU;
            let speed = rng.range(2.0, 5.0);
            let seed = Vec3::new(angle.cos() * speed, 0.0, angle.sin() * speed);
            let p = ImpactParticle::new(BurstKind::Shockwave, site + Vec3::Y * SHOCKWAVE_LIFT, seed);
            allocated += self.pool.spawn(p).is_some() as usize;
        }

        for _ in 0..SPLASH_COUNT {
            let seed = Vec3::new(rng.centered(12.0), rng.range(8.0, 23.0), rng.centered(12.0));
            let p = ImpactParticle::new(BurstKind::Splash, site, seed);
            allocated += self.pool.spawn(p).is_some() as usize;
        }

        if allocated < BURST_SIZE {
            log::debug!("impact burst truncated: {allocated}/{BURST_SIZE} particles");
        }
        allocated
    }

    /// Age every live particle and rewrite the point buffer.
    pub fn update(&mut self) {
        self.pool.update(ImpactParticle::step);
        for (point, slot) in self.points.iter_mut().zip(self.pool.slots()) {
            *point = match slot.state {
                SlotState::Active => slot.item.point(),
                SlotState::Dormant => PARKED_POINT,
            };
        }
    }

    /// One point per pool slot, in slot order.
    pub fn points(&self) -> &[ImpactPoint] {
        &self.points
    }

    pub fn active_count(&self) -> usize {
        self.pool.active_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::rng::{Rng, Scripted};

    fn kinds(field: &ImpactField) -> Vec<BurstKind> {
        field.pool.iter_active().map(|p| p.kind).collect()
    }

    #[test]
    fn burst_has_one_flash_and_bounded_debris() {
        let mut field = ImpactField::new(800);
        let n = field.burst(Vec3::new(10.0, 2.0, -40.0), &mut Rng::new(1));
        assert_eq!(n, BURST_SIZE);
        let k = kinds(&field);
        assert_eq!(k.iter().filter(|&&k| k == BurstKind::Flash).count(), 1);
        assert_eq!(k.iter().filter(|&&k| k == BurstKind::Shockwave).count(), SHOCKWAVE_COUNT);
        assert_eq!(k.iter().filter(|&&k| k == BurstKind::Splash).count(), SPLASH_COUNT);
    }

    #[test]
    fn two_bursts_fit_in_800_slots() {
        let mut field = ImpactField::new(800);
        let mut rng = Rng::new(2);
        let a = field.burst(Vec3::ZERO, &mut rng);
        let b = field.burst(Vec3::X, &mut rng);
        assert_eq!(a + b, 2 * BURST_SIZE);
        assert!(field.active_count() <= 800);
    }

    #[test]
    fn saturated_pool_keeps_flash_and_drops_the_rest() {
        let mut field = ImpactField::new(10);
        let n = field.burst(Vec3::ZERO, &mut Scripted::constant(0.3));
        assert_eq!(n, 10);
        assert_eq!(field.pool.slots()[0].item.kind, BurstKind::Flash);
        assert_eq!(field.burst(Vec3::ZERO, &mut Scripted::constant(0.3)), 0);
        assert_eq!(field.active_count(), 10);
    }

    #[test]
    fn flash_fades_faster_than_debris() {
        let mut field = ImpactField::new(800);
        field.burst(Vec3::new(0.0, 2.0, 0.0), &mut Rng::new(3));
        // Flash is gone after 21 frames, debris after 51.
        for _ in 0..21 {
            field.update();
        }
        assert!(kinds(&field).iter().all(|&k| k != BurstKind::Flash));
        assert_eq!(field.active_count(), BURST_SIZE - 1);
        for _ in 0..30 {
            field.update();
        }
        assert_eq!(field.active_count(), 0);
        assert!(field.points().iter().all(|p| *p == PARKED_POINT));
    }

    #[test]
    fn flash_point_shrinks_from_full_size() {
        let mut flash = ImpactParticle::new(BurstKind::Flash, Vec3::new(1.0, 7.0, 3.0), Vec3::ZERO);
        assert_eq!(flash.point().size, FLASH_SIZE);
        flash.step();
        let p = flash.point();
        assert!((p.size - 0.95 * FLASH_SIZE).abs() < 1e-3);
        assert_eq!((p.x, p.y, p.z), (1.0, 7.0, 3.0));
    }

    #[test]
    fn debris_never_sinks_below_ground() {
        let mut p = ImpactParticle::new(BurstKind::Shockwave, Vec3::new(0.0, 0.5, 0.0), Vec3::X * 4.0);
        while p.step() {
            assert!(p.point().y >= 0.0);
        }
    }

    #[test]
    fn dormant_slots_are_parked() {
        let mut field = ImpactField::new(100);
        field.burst(Vec3::ZERO, &mut Rng::new(4));
        field.update();
        assert!(field.points()[BURST_SIZE..].iter().all(|p| *p == PARKED_POINT));
        assert!(field.points()[0].size > 0.0);
    }
}
