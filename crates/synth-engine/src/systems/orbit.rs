//! Closed-form planet orbits around the sun.

use glam::Vec3;

use crate::api::config::OrbitConfig;

/// Fixed parameters of one orbit.
#[derive(Debug, Clone, PartialEq)]
pub struct OrbitParams {
    pub radius: f32,
    pub center: Vec3,
    /// Vertical bob amplitude.
    pub bob: f32,
    /// Depth swing amplitude.
    pub depth_swing: f32,
    /// +1 for the primary direction, -1 for a counter-rotating body.
    pub direction: f32,
    /// Amplitude of the orbit plane's roll about X.
    pub tilt: f32,
}

const BOB_RATE: f64 = 0.5;
const TILT_RATE: f64 = 0.3;
const TILT_AMPLITUDE: f32 = 0.1;

impl OrbitParams {
    /// The ringed blue planet.
    pub fn planet(config: &OrbitConfig, mobile: bool) -> Self {
        Self::from_config(config, config.planet_radius_for(mobile), 1.0)
    }

    /// The smaller red planet, counter-rotating on an inner orbit.
    pub fn red_planet(config: &OrbitConfig, mobile: bool) -> Self {
        Self::from_config(config, config.red_planet_radius_for(mobile), -1.0)
    }

    fn from_config(config: &OrbitConfig, radius: f32, direction: f32) -> Self {
        Self {
            radius,
            center: Vec3::from_array(config.center),
            bob: config.bob,
            depth_swing: config.depth_swing,
            direction,
            tilt: TILT_AMPLITUDE,
        }
    }

    /// Position at orbit time `t`. Pure: no state, no frame dependence.
    pub fn position(&self, t: f64) -> Vec3 {
        let t = t * self.direction as f64;
        Vec3::new(
            self.center.x + t.cos() as f32 * self.radius,
            self.center.y + (t * BOB_RATE).sin() as f32 * self.bob,
            self.center.z + t.sin() as f32 * self.depth_swing,
        )
    }

    /// Roll of the orbit group about X at orbit time `t`.
    pub fn tilt(&self, t: f64) -> f32 {
        (t * self.direction as f64 * TILT_RATE).sin() as f32 * self.tilt
    }
}

/// Orbit time from wall-clock milliseconds.
pub fn orbit_time(now_ms: f64, config: &OrbitConfig) -> f64 {
    now_ms * config.time_scale
}
