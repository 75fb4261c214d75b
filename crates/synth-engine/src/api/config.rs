use serde::{Deserialize, Serialize};

use crate::error::{SceneError, SceneResult};

/// Configuration for the whole scene.
///
/// `Default` reproduces the stock backdrop. The host may pass a partial JSON
/// document at mount; every missing field falls back to its default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Seed for the scene RNG (starfield, galaxy, spawn triggers).
    pub seed: u64,
    pub terrain: TerrainConfig,
    pub orbits: OrbitConfig,
    pub uniforms: UniformConfig,
    pub pools: PoolConfig,
    pub camera: CameraConfig,
    pub viewport: ViewportConfig,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            seed: 0x5EED_CAFE,
            terrain: TerrainConfig::default(),
            orbits: OrbitConfig::default(),
            uniforms: UniformConfig::default(),
            pools: PoolConfig::default(),
            camera: CameraConfig::default(),
            viewport: ViewportConfig::default(),
        }
    }
}

/// Terrain grid size, valley profile and scroll speed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerrainConfig {
    /// Grid width (lateral, world units).
    pub width: f32,
    /// Grid depth (along the view direction, world units). One tile length.
    pub depth: f32,
    pub segments_x: u32,
    pub segments_z: u32,
    /// Lateral swing of the valley centerline.
    pub valley_amplitude: f32,
    /// Valley half-width at its mean.
    pub valley_base_width: f32,
    /// How much the half-width breathes along the depth.
    pub valley_width_amplitude: f32,
    pub mountain_scale: f32,
    pub mountain_exponent: f32,
    pub mountain_multiplier: f32,
    /// Clamp for the mountain profile before noise is added.
    pub mountain_max: f32,
    /// Valley floor height before noise and ripples.
    pub valley_floor: f32,
    /// Forward scroll per frame.
    pub scroll_speed: f32,
    /// Fixed seed for the height noise; `None` draws one from the scene RNG.
    pub noise_seed: Option<u32>,
}

impl Default for TerrainConfig {
    fn default() -> Self {
        Self {
            width: 600.0,
            depth: 400.0,
            segments_x: 80,
            segments_z: 40,
            valley_amplitude: 40.0,
            valley_base_width: 80.0,
            valley_width_amplitude: 20.0,
            mountain_scale: 0.08,
            mountain_exponent: 1.8,
            mountain_multiplier: 2.5,
            mountain_max: 45.0,
            valley_floor: -5.0,
            scroll_speed: 0.5,
            noise_seed: None,
        }
    }
}

/// Closed-form orbit parameters for the two planets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrbitConfig {
    /// Orbit angle per wall-clock millisecond.
    pub time_scale: f64,
    pub planet_radius: f32,
    pub planet_radius_mobile: f32,
    pub red_planet_radius: f32,
    pub red_planet_radius_mobile: f32,
    /// Orbit center (the sun sits at this depth).
    pub center: [f32; 3],
    /// Vertical bob amplitude.
    pub bob: f32,
    /// Depth swing amplitude.
    pub depth_swing: f32,
    /// Axial spin per frame.
    pub spin_step: f32,
    /// Galaxy roll per frame.
    pub galaxy_roll_step: f32,
}

impl Default for OrbitConfig {
    fn default() -> Self {
        Self {
            time_scale: 0.00005,
            planet_radius: 450.0,
            planet_radius_mobile: 350.0,
            red_planet_radius: 200.0,
            red_planet_radius_mobile: 160.0,
            center: [0.0, 80.0, -500.0],
            bob: 40.0,
            depth_swing: 100.0,
            spin_step: 0.002,
            galaxy_roll_step: 0.0005,
        }
    }
}

impl OrbitConfig {
    pub fn planet_radius_for(&self, mobile: bool) -> f32 {
        if mobile {
            self.planet_radius_mobile
        } else {
            self.planet_radius
        }
    }

    pub fn red_planet_radius_for(&self, mobile: bool) -> f32 {
        if mobile {
            self.red_planet_radius_mobile
        } else {
            self.red_planet_radius
        }
    }
}

/// Per-frame shader time increments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UniformConfig {
    pub disk_step: f32,
    pub grain_step: f32,
    pub grain_amount: f32,
}

impl Default for UniformConfig {
    fn default() -> Self {
        Self {
            disk_step: 0.01,
            grain_step: 0.01,
            grain_amount: 0.15,
        }
    }
}

/// Pool capacities and spawn policies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PoolConfig {
    pub streak_capacity: usize,
    /// Streaks stop spawning while this many are in flight.
    pub streak_max_active: usize,
    /// Per-frame spawn probability (≈ one every 2 s at 60 Hz).
    pub streak_chance: f32,
    /// Frames the comet waits after expiring before it may respawn.
    pub comet_delay_frames: u32,
    pub comet_chance: f32,
    pub meteor_capacity: usize,
    pub meteor_max_active: usize,
    /// Frames between meteor attempts (≈ 6 s at 60 Hz).
    pub meteor_delay_frames: u32,
    pub meteor_chance: f32,
    /// Height at which a meteor strikes the ground.
    pub meteor_ground: f32,
    pub impact_capacity: usize,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            streak_capacity: 30,
            streak_max_active: 20,
            streak_chance: 0.0083,
            comet_delay_frames: 150,
            comet_chance: 0.02,
            meteor_capacity: 8,
            meteor_max_active: 1,
            meteor_delay_frames: 360,
            meteor_chance: 0.5,
            meteor_ground: 5.0,
            impact_capacity: 800,
        }
    }
}

/// Perspective camera settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Vertical field of view in degrees.
    pub fov_deg: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_deg: 60.0,
            near: 0.1,
            far: 3000.0,
        }
    }
}

/// Resize hysteresis and layout breakpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewportConfig {
    /// Width changes at or below this are ignored unless the height grew.
    pub resize_threshold: f32,
    pub max_pixel_ratio: f32,
    /// Viewports narrower than this use the mobile layout.
    pub mobile_breakpoint: f32,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            resize_threshold: 50.0,
            max_pixel_ratio: 2.0,
            mobile_breakpoint: 768.0,
        }
    }
}

impl SceneConfig {
    /// Parse a config from a JSON string and validate it.
    pub fn from_json(json: &str) -> SceneResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values that would break the terrain grid or the spawn policies.
    pub fn validate(&self) -> SceneResult<()> {
        let t = &self.terrain;
        if !(t.width > 0.0 && t.depth > 0.0) {
            return Err(invalid("terrain width and depth must be positive"));
        }
        if t.segments_x == 0 || t.segments_z == 0 {
            return Err(invalid("terrain segment counts must be at least 1"));
        }
        if !(t.scroll_speed >= 0.0 && t.scroll_speed < t.depth) {
            return Err(invalid("scroll speed must be in [0, depth)"));
        }
        let p = &self.pools;
        for (name, chance) in [
            ("streak_chance", p.streak_chance),
            ("comet_chance", p.comet_chance),
            ("meteor_chance", p.meteor_chance),
        ] {
            if !(0.0..=1.0).contains(&chance) {
                return Err(SceneError::InvalidConfig(format!("{name} must be in [0, 1]")));
            }
        }
        let c = &self.camera;
        if !(c.near > 0.0 && c.far > c.near && c.fov_deg > 0.0 && c.fov_deg < 180.0) {
            return Err(invalid("camera frustum is degenerate"));
        }
        Ok(())
    }
}

fn invalid(msg: &str) -> SceneError {
    SceneError::InvalidConfig(msg.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_validates() {
        SceneConfig::default().validate().unwrap();
    }

    #[test]
    fn empty_json_is_default() {
        let config = SceneConfig::from_json("{}").unwrap();
        assert_eq!(config, SceneConfig::default());
    }

    #[test]
    fn partial_override_keeps_other_defaults() {
        let json = r#"{
            "seed": 7,
            "terrain": { "scroll_speed": 1.0, "noise_seed": 3 },
            "pools": { "meteor_capacity": 4 }
        }"#;
        let config = SceneConfig::from_json(json).unwrap();
        assert_eq!(config.seed, 7);
        assert_eq!(config.terrain.scroll_speed, 1.0);
        assert_eq!(config.terrain.noise_seed, Some(3));
        assert_eq!(config.terrain.depth, 400.0);
        assert_eq!(config.pools.meteor_capacity, 4);
        assert_eq!(config.pools.impact_capacity, 800);
    }

    #[test]
    fn malformed_json_is_parse_error() {
        let err = SceneConfig::from_json("{ seed: ").unwrap_err();
        assert!(matches!(err, SceneError::ConfigParse(_)));
    }

    #[test]
    fn zero_segments_rejected() {
        let err = SceneConfig::from_json(r#"{ "terrain": { "segments_x": 0 } }"#).unwrap_err();
        assert!(matches!(err, SceneError::InvalidConfig(_)));
    }

    #[test]
    fn probability_out_of_range_rejected() {
        let err = SceneConfig::from_json(r#"{ "pools": { "comet_chance": 1.5 } }"#).unwrap_err();
        assert!(err.to_string().contains("comet_chance"));
    }
}
