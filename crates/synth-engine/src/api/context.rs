use crate::api::config::SceneConfig;
use crate::core::rng::Rng;
use crate::core::scene::Scene;
use crate::core::time::FrameClock;
use crate::renderer::camera::PerspectiveCamera;
use crate::systems::builder::{SceneBuilder, SceneNodes};
use crate::systems::effects::EffectsState;
use crate::systems::noise::SimplexField;
use crate::systems::orbit::{orbit_time, OrbitParams};
use crate::systems::scroll::TerrainScroll;
use crate::systems::terrain;
use crate::systems::uniforms::ShaderClock;

/// Everything one mounted scene owns.
///
/// Created as a unit at mount and dropped as a unit at unmount; no state
/// lives outside it.
pub struct SceneContext {
    pub config: SceneConfig,
    pub scene: Scene,
    pub nodes: SceneNodes,
    pub effects: EffectsState,
    pub scroll: TerrainScroll,
    pub planet_orbit: OrbitParams,
    pub red_planet_orbit: OrbitParams,
    pub shaders: ShaderClock,
    pub camera: PerspectiveCamera,
    pub clock: FrameClock,
    pub rng: Rng,
}

impl SceneContext {
    /// Generate the terrain and build the scene graph.
    pub fn new(config: SceneConfig, mobile: bool, aspect: f32) -> Self {
        let mut rng = Rng::new(config.seed);
        let noise_seed = config.terrain.noise_seed.unwrap_or_else(|| rng.next_seed());
        let grid = terrain::generate(&config.terrain, &SimplexField::new(noise_seed));
        log::info!(
            "terrain generated: {} vertices, noise seed {noise_seed}",
            grid.vertex_count()
        );

        let mut scene = Scene::new();
        let nodes = SceneBuilder::new(&mut scene, &config, mobile).build(&grid, &mut rng);

        Self {
            effects: EffectsState::new(&config.pools),
            scroll: TerrainScroll::new(config.terrain.depth, config.terrain.scroll_speed),
            planet_orbit: OrbitParams::planet(&config.orbits, mobile),
            red_planet_orbit: OrbitParams::red_planet(&config.orbits, mobile),
            shaders: ShaderClock::new(&config.uniforms),
            camera: PerspectiveCamera::new(&config.camera, aspect, mobile),
            clock: FrameClock::new(),
            scene,
            nodes,
            rng,
            config,
        }
    }

    /// Run one frame of scene updates at wall-clock `now_ms`.
    pub fn update(&mut self, now_ms: f64) {
        self.clock.advance(now_ms);
        self.scroll_terrain();
        self.place_planets(now_ms);
        self.apply_increments();
        self.effects.update(&mut self.rng);
        self.effects.sync_nodes(&mut self.scene, &self.nodes.effects);
    }

    fn scroll_terrain(&mut self) {
        self.scroll.advance();
        let offsets = self.scroll.offsets();
        for pair in [self.nodes.terrain, self.nodes.terrain_reflections] {
            for (id, z) in pair.into_iter().zip(offsets) {
                if let Some(node) = self.scene.get_mut(id) {
                    node.pos.z = z;
                }
            }
        }
    }

    fn place_planets(&mut self, now_ms: f64) {
        let t = orbit_time(now_ms, &self.config.orbits);
        for (group, orbit) in [
            (self.nodes.planet, &self.planet_orbit),
            (self.nodes.red_planet, &self.red_planet_orbit),
        ] {
            if let Some(node) = self.scene.get_mut(group) {
                node.pos = orbit.position(t);
                node.rotation.x = orbit.tilt(t);
            }
        }
    }

    fn apply_increments(&mut self) {
        let spin = self.config.orbits.spin_step;
        if let Some(body) = self.scene.get_mut(self.nodes.planet_body) {
            body.rotation.y -= spin;
        }
        if let Some(body) = self.scene.get_mut(self.nodes.red_planet_body) {
            body.rotation.y += spin;
        }
        if let Some(galaxy) = self.scene.get_mut(self.nodes.galaxy) {
            galaxy.rotation.z += self.config.orbits.galaxy_roll_step;
        }
        self.shaders.tick();
    }
}
