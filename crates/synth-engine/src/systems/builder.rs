//! One-shot construction of the whole backdrop scene graph.
//!
//! Everything is spawned exactly once at mount. Pooled effects get one node
//! per slot, parked and hidden until the pool activates them.

use std::f32::consts::PI;

use glam::Vec3;

use crate::api::config::SceneConfig;
use crate::api::types::{GeometryId, MaterialId, NodeId};
use crate::components::color::{palette, Rgb};
use crate::components::geometry::Geometry;
use crate::components::material::{Material, Shading, Side, TimeSlot};
use crate::components::node::Node;
use crate::core::rng::RandomSource;
use crate::core::scene::{BufferData, Scene};
use crate::systems::effects::{EffectNodes, COMET_PARK, METEOR_PARK_Y, STREAK_PARK_Y};
use crate::systems::orbit::OrbitParams;
use crate::systems::terrain::TerrainGrid;

pub const GALAXY_POINTS: usize = 2000;
const GALAXY_RADIUS: f32 = 140.0;
pub const PLANET_RINGS: usize = 10;
const METEOR_TAIL_LENGTH: f32 = 80.0;
const COMET_TAIL_LENGTH: f32 = 800.0;

/// Handles to every node the driver animates after construction.
#[derive(Debug, Clone)]
pub struct SceneNodes {
    /// Terrain tile groups, scrolled along z.
    pub terrain: [NodeId; 2],
    /// Mirrored tiles below the ground plane, scrolled with `terrain`.
    pub terrain_reflections: [NodeId; 2],
    /// Orbit group of the ringed planet (position and tilt).
    pub planet: NodeId,
    /// The planet sphere itself (axial spin).
    pub planet_body: NodeId,
    pub red_planet: NodeId,
    pub red_planet_body: NodeId,
    pub galaxy: NodeId,
    pub effects: EffectNodes,
}

/// Star count and spread for a layout class.
pub fn star_field(mobile: bool) -> (usize, f32) {
    if mobile {
        (6000, 1500.0)
    } else {
        (3000, 3000.0)
    }
}

/// Builds the backdrop into a `Scene`.
pub struct SceneBuilder<'a> {
    scene: &'a mut Scene,
    config: &'a SceneConfig,
    mobile: bool,
}

impl<'a> SceneBuilder<'a> {
    pub fn new(scene: &'a mut Scene, config: &'a SceneConfig, mobile: bool) -> Self {
        Self { scene, config, mobile }
    }

    /// Spawn every object. `rng` seeds the galaxy and star positions.
    pub fn build(mut self, grid: &TerrainGrid, rng: &mut dyn RandomSource) -> SceneNodes {
        self.sky();
        let galaxy = self.galaxy(rng);
        self.stars(rng);
        self.sun();
        self.crux();
        self.black_hole();
        let (terrain, terrain_reflections) = self.terrain(grid);
        let (planet, planet_body) = self.ringed_planet();
        let (red_planet, red_planet_body) = self.red_planet();
        self.grain();
        let effects = self.effects();

        log::info!(
            "scene built: {} nodes, {} geometries, {} materials",
            self.scene.len(),
            self.scene.geometry_count(),
            self.scene.material_count()
        );

        SceneNodes {
            terrain,
            terrain_reflections,
            planet,
            planet_body,
            red_planet,
            red_planet_body,
            galaxy,
            effects,
        }
    }

    fn pick(&self, mobile: f32, desktop: f32) -> f32 {
        if self.mobile {
            mobile
        } else {
            desktop
        }
    }

    fn mesh(&mut self, geometry: GeometryId, material: Material) -> Node {
        let material = self.scene.add_material(material);
        Node::new().with_mesh(geometry, material)
    }

    fn mesh_shared(geometry: GeometryId, material: MaterialId) -> Node {
        Node::new().with_mesh(geometry, material)
    }

    fn sky(&mut self) {
        let geo = self.scene.add_geometry(Geometry::Sphere {
            radius: 2000.0,
            width_segments: 32,
            height_segments: 32,
            inverted: true,
        });
        let node = self.mesh(
            geo,
            Material::new(Shading::SkyGradient {
                top: palette::SKY_TOP,
                bottom: palette::SKY_BOTTOM,
                offset: 100.0,
                exponent: 0.6,
            })
            .with_side(Side::Back),
        );
        self.scene.spawn(node.with_tag("sky"));
    }

    /// Two-armed spiral of `GALAXY_POINTS` colored points.
    fn galaxy(&mut self, rng: &mut dyn RandomSource) -> NodeId {
        let mut positions = Vec::with_capacity(GALAXY_POINTS * 3);
        let mut colors = Vec::with_capacity(GALAXY_POINTS * 3);
        for i in 0..GALAXY_POINTS {
            let radius = rng.next_f32().powf(2.5) * GALAXY_RADIUS;
            let spin = radius * 0.3;
            let branch = (i % 2) as f32 * PI;

            let randomness = rng.next_f32().powi(3) * 10.0;
            let rand_x = randomness * rng.sign();
            let rand_y = randomness * rng.sign();
            let rand_z = randomness * rng.sign();

            positions.push((branch + spin).cos() * radius + rand_x);
            positions.push((branch + spin).sin() * radius + rand_y);
            positions.push(rng.centered(5.0) + rand_z);

            let color = palette::GALAXY_INSIDE.lerp(palette::GALAXY_OUTSIDE, radius / GALAXY_RADIUS);
            colors.extend_from_slice(&color.to_array());
        }

        let positions = self.scene.add_buffer(BufferData::F32(positions));
        let colors = self.scene.add_buffer(BufferData::F32(colors));
        let geo = self.scene.add_geometry(Geometry::Points {
            positions,
            colors: Some(colors),
            count: GALAXY_POINTS as u32,
        });
        let node = self.mesh(
            geo,
            Material::new(Shading::Points { color: None, size: 1.5 })
                .additive()
                .no_depth_write()
                .with_opacity(0.9),
        );
        self.scene.spawn(
            node.with_tag("galaxy")
                .with_pos(Vec3::new(self.pick(-140.0, -400.0), 350.0, -900.0))
                .with_scale(Vec3::splat(1.75))
                .with_rotation(Vec3::new(PI / 1.7, PI / 8.0, -PI / 12.0))
                .with_render_order(1),
        )
    }

    fn stars(&mut self, rng: &mut dyn RandomSource) {
        let (count, spread) = star_field(self.mobile);
        let mut positions = Vec::with_capacity(count * 3);
        for _ in 0..count {
            positions.push(rng.centered(spread));
            positions.push(rng.range(50.0, 850.0));
            positions.push(-rng.next_f32() * 800.0 - 600.0);
        }
        let positions = self.scene.add_buffer(BufferData::F32(positions));
        let geo = self.scene.add_geometry(Geometry::Points {
            positions,
            colors: None,
            count: count as u32,
        });
        let node = self.mesh(
            geo,
            Material::new(Shading::Points {
                color: Some(Rgb::WHITE),
                size: self.pick(1.2, 0.8),
            })
            .with_opacity(0.9),
        );
        self.scene.spawn(node.with_tag("stars"));
    }

    /// Striped sun, its additive glow and the mirrored reflection.
    fn sun(&mut self) {
        let disc = self.scene.add_geometry(Geometry::Plane { width: 300.0, height: 300.0 });
        let sun = self.mesh(
            disc,
            Material::new(Shading::StripedSun {
                top: palette::SUN_TOP,
                bottom: palette::SUN_BOTTOM,
            })
            .transparent(),
        );
        self.scene.spawn(
            sun.with_tag("sun")
                .with_pos(Vec3::new(0.0, self.pick(20.0, 40.0), -500.0))
                .with_render_order(2),
        );

        let halo = self.scene.add_geometry(Geometry::Plane { width: 700.0, height: 700.0 });
        let glow = self.mesh(
            halo,
            Material::new(Shading::Glow { color: palette::SUN_GLOW, strength: 0.5 })
                .additive()
                .no_depth_write(),
        );
        self.scene.spawn(
            glow.with_tag("sun_glow")
                .with_pos(Vec3::new(0.0, 40.0, -505.0))
                .with_render_order(2),
        );

        let reflection = self.mesh(
            disc,
            Material::new(Shading::StripedSun {
                top: palette::SUN_REFLECT_TOP,
                bottom: palette::SUN_REFLECT_BOTTOM,
            })
            .transparent(),
        );
        self.scene.spawn(
            reflection
                .with_tag("sun_reflection")
                .with_pos(Vec3::new(0.0, self.pick(-20.0, -40.0), -500.0))
                .with_scale(Vec3::new(1.0, -1.0, 1.0))
                .with_render_order(1),
        );
    }

    /// Black cross silhouetted against the sun.
    fn crux(&mut self) {
        let group = self.scene.spawn(
            Node::new()
                .with_tag("crux")
                .with_pos(Vec3::new(0.0, 15.0, -480.0))
                .with_render_order(3),
        );
        let black = self.scene.add_material(Material::basic(Rgb::BLACK));
        let post = self.scene.add_geometry(Geometry::Box { width: 4.0, height: 60.0, depth: 4.0 });
        let beam = self.scene.add_geometry(Geometry::Box { width: 40.0, height: 4.0, depth: 4.0 });
        self.scene.spawn(Self::mesh_shared(post, black).with_parent(group).with_render_order(3));
        self.scene.spawn(
            Self::mesh_shared(beam, black)
                .with_parent(group)
                .with_pos(Vec3::new(0.0, 15.0, 0.0))
                .with_render_order(3),
        );
    }

    /// Event horizon, accretion disk and a darker mirrored copy.
    fn black_hole(&mut self) {
        let x = self.pick(110.0, 200.0);
        let horizon_geo = self.scene.add_geometry(Geometry::Sphere {
            radius: 10.0,
            width_segments: 64,
            height_segments: 64,
            inverted: false,
        });
        let horizon_mat = self.scene.add_material(Material::basic(Rgb::BLACK));
        let disk_geo = self.scene.add_geometry(Geometry::Ring { inner: 12.0, outer: 32.0, segments: 128 });

        let group = self
            .scene
            .spawn(Node::new().with_tag("black_hole").with_pos(Vec3::new(x, 250.0, -600.0)));
        self.scene.spawn(Self::mesh_shared(horizon_geo, horizon_mat).with_parent(group));
        let disk = self.mesh(
            disk_geo,
            Material::new(Shading::AccretionDisk {
                inner: palette::DISK_INNER,
                outer: palette::DISK_OUTER,
                time: TimeSlot::Disk,
            })
            .transparent()
            .with_side(Side::Double),
        );
        self.scene.spawn(disk.with_parent(group).with_rotation(Vec3::new(PI / 6.0, 0.0, 0.0)));

        let mirror = self.scene.spawn(
            Node::new()
                .with_tag("black_hole_reflection")
                .with_pos(Vec3::new(x, -250.0, -600.0))
                .with_scale(Vec3::new(1.0, -1.0, 1.0)),
        );
        let disk = self.mesh(
            disk_geo,
            Material::new(Shading::AccretionDisk {
                inner: palette::DISK_REFLECT_INNER,
                outer: palette::DISK_REFLECT_OUTER,
                time: TimeSlot::DiskReflection,
            })
            .transparent()
            .with_side(Side::Double),
        );
        self.scene
            .spawn(disk.with_parent(mirror).with_rotation(Vec3::new(PI - PI / 6.0, 0.0, 0.0)));
        self.scene.spawn(Self::mesh_shared(horizon_geo, horizon_mat).with_parent(mirror));
    }

    /// Two scrolling tiles and two reflections, all sharing one grid.
    fn terrain(&mut self, grid: &TerrainGrid) -> ([NodeId; 2], [NodeId; 2]) {
        let positions = self.scene.add_buffer(BufferData::F32(grid.positions.clone()));
        let colors = self.scene.add_buffer(BufferData::F32(grid.colors.clone()));
        let normals = self.scene.add_buffer(BufferData::F32(grid.normals.clone()));
        let indices = self.scene.add_buffer(BufferData::U32(grid.indices.clone()));
        let geo = self.scene.add_geometry(Geometry::Terrain {
            positions,
            colors,
            normals,
            indices,
            vertex_count: grid.vertex_count() as u32,
        });

        let fill = self.scene.add_material(Material::basic(palette::MOUNTAIN_FILL));
        let wire = self.scene.add_material(Material::new(Shading::Wireframe).with_opacity(0.5));
        let dark = self.scene.add_material(Material::basic(Rgb::BLACK).with_opacity(0.9));
        let faint = self.scene.add_material(Material::new(Shading::Wireframe).with_opacity(0.15));

        let depth = self.config.terrain.depth;
        let mut tiles = [NodeId(0); 2];
        let mut mirrors = [NodeId(0); 2];
        for (i, z) in [0.0, -depth].into_iter().enumerate() {
            tiles[i] = self.terrain_tile(geo, fill, wire, Node::new().with_tag("terrain").with_pos(Vec3::new(0.0, 0.0, z)));
            mirrors[i] = self.terrain_tile(
                geo,
                dark,
                faint,
                Node::new()
                    .with_tag("terrain_reflection")
                    .with_pos(Vec3::new(0.0, -1.0, z))
                    .with_scale(Vec3::new(1.0, -1.0, 1.0)),
            );
        }
        (tiles, mirrors)
    }

    fn terrain_tile(&mut self, geo: GeometryId, fill: MaterialId, wire: MaterialId, group: Node) -> NodeId {
        let group = self.scene.spawn(group.with_rotation(Vec3::new(-PI / 2.0, 0.0, 0.0)));
        self.scene.spawn(Self::mesh_shared(geo, fill).with_parent(group));
        self.scene.spawn(
            Self::mesh_shared(geo, wire)
                .with_parent(group)
                .with_pos(Vec3::new(0.0, 0.0, 0.1)),
        );
        group
    }

    fn ringed_planet(&mut self) -> (NodeId, NodeId) {
        let start = OrbitParams::planet(&self.config.orbits, self.mobile).position(0.0);
        let group = self.scene.spawn(Node::new().with_tag("planet").with_pos(start));
        let body = self.planet_body(group, 15.0, palette::PLANET_LIGHT, palette::PLANET_DARK);

        let ring_mat = self.scene.add_material(Material::basic(palette::PLANET_RING).with_opacity(0.8));
        for i in 0..PLANET_RINGS {
            let geo = self.scene.add_geometry(Geometry::Torus {
                radius: 20.0 + 2.0 * i as f32,
                tube: 0.45,
                radial_segments: 16,
                tubular_segments: 100,
            });
            self.scene.spawn(
                Self::mesh_shared(geo, ring_mat)
                    .with_parent(group)
                    .with_rotation(Vec3::new(PI / 2.0, -PI / 6.0, 0.0)),
            );
        }
        (group, body)
    }

    fn red_planet(&mut self) -> (NodeId, NodeId) {
        let start = OrbitParams::red_planet(&self.config.orbits, self.mobile).position(0.0);
        let group = self.scene.spawn(Node::new().with_tag("red_planet").with_pos(start));
        let body = self.planet_body(group, 7.5, palette::RED_PLANET_LIGHT, palette::RED_PLANET_DARK);
        (group, body)
    }

    fn planet_body(&mut self, group: NodeId, radius: f32, light: Rgb, dark: Rgb) -> NodeId {
        let geo = self.scene.add_geometry(Geometry::Sphere {
            radius,
            width_segments: 32,
            height_segments: 32,
            inverted: false,
        });
        let node = self.mesh(geo, Material::new(Shading::Gradient { top: light, bottom: dark }).transparent());
        self.scene.spawn(node.with_parent(group))
    }

    fn grain(&mut self) {
        let geo = self.scene.add_geometry(Geometry::ScreenQuad);
        let node = self.mesh(
            geo,
            Material::new(Shading::FilmGrain {
                amount: self.config.uniforms.grain_amount,
                time: TimeSlot::Grain,
            })
            .multiply()
            .no_depth_test()
            .no_depth_write(),
        );
        self.scene.spawn(node.with_tag("grain").with_render_order(10_000));
    }

    /// Impact point cloud plus one parked node per streak, meteor and comet slot.
    fn effects(&mut self) -> EffectNodes {
        let pools = &self.config.pools;
        let (streak_count, meteor_count, impact_count) =
            (pools.streak_capacity, pools.meteor_capacity, pools.impact_capacity);

        let points = self.scene.add_geometry(Geometry::DynamicPoints { capacity: impact_count as u32 });
        let node = self.mesh(
            points,
            Material::new(Shading::ImpactPoints { color: Rgb::WHITE })
                .additive()
                .no_depth_write(),
        );
        self.scene.spawn(node.with_tag("impacts").with_render_order(20));

        let segment = self.scene.add_geometry(Geometry::Segment);
        let line = self.scene.add_material(
            Material::new(Shading::Line { color: Rgb::WHITE })
                .additive()
                .no_depth_write(),
        );
        let streaks = (0..streak_count)
            .map(|_| {
                self.scene.spawn(
                    Self::mesh_shared(segment, line)
                        .with_tag("streak")
                        .with_pos(Vec3::new(0.0, STREAK_PARK_Y, 0.0))
                        .with_render_order(2)
                        .hidden(),
                )
            })
            .collect();

        let head_geo = self.scene.add_geometry(Geometry::Sphere {
            radius: 2.0,
            width_segments: 8,
            height_segments: 8,
            inverted: false,
        });
        let head_mat = self.scene.add_material(Material::basic(palette::CYAN).with_opacity(0.6).additive());
        let tail_geo = self.scene.add_geometry(Geometry::Tail {
            radius_head: 2.0,
            radius_end: 0.3,
            length: METEOR_TAIL_LENGTH,
            radial_segments: 16,
            z_offset: -METEOR_TAIL_LENGTH / 2.0,
        });
        let tail_mat = self.scene.add_material(
            Material::new(Shading::Tail {
                head: palette::CYAN,
                end: palette::MAGENTA,
                glow_power: 1.0,
            })
            .additive()
            .no_depth_write(),
        );
        let meteors = (0..meteor_count)
            .map(|_| {
                let group = self.scene.spawn(
                    Node::new()
                        .with_tag("meteor")
                        .with_pos(Vec3::new(0.0, METEOR_PARK_Y, 0.0))
                        .hidden(),
                );
                self.scene.spawn(Self::mesh_shared(head_geo, head_mat).with_parent(group));
                self.scene
                    .spawn(Self::mesh_shared(tail_geo, tail_mat).with_parent(group).with_render_order(10));
                group
            })
            .collect();

        let (comet, comet_head) = self.comet();
        EffectNodes {
            streaks,
            comet: Some(comet),
            comet_head: Some(comet_head),
            meteors,
        }
    }

    fn comet(&mut self) -> (NodeId, NodeId) {
        let group = self
            .scene
            .spawn(Node::new().with_tag("comet").with_pos(COMET_PARK).hidden());

        let head_geo = self.scene.add_geometry(Geometry::Sphere {
            radius: 2.0,
            width_segments: 32,
            height_segments: 32,
            inverted: false,
        });
        let head = self.mesh(
            head_geo,
            Material::new(Shading::Fresnel { color: palette::MAGENTA }).additive(),
        );
        let head = self.scene.spawn(head.with_parent(group));

        for (radius, length, end) in [
            (1.0, COMET_TAIL_LENGTH, palette::COMET_TAIL_BLUE),
            (3.0, COMET_TAIL_LENGTH * 0.95, palette::COMET_TAIL_DEEP),
        ] {
            let geo = self.scene.add_geometry(Geometry::Tail {
                radius_head: radius,
                radius_end: 0.0,
                length,
                radial_segments: 64,
                z_offset: -length / 2.0 + 1.2,
            });
            let tail = self.mesh(
                geo,
                Material::new(Shading::Tail { head: palette::CYAN, end, glow_power: 1.5 })
                    .additive()
                    .no_depth_write(),
            );
            self.scene.spawn(tail.with_parent(group));
        }
        (group, head)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::config::TerrainConfig;
    use crate::core::rng::Rng;
    use crate::systems::noise::FlatField;
    use crate::systems::terrain::generate;

    fn small_grid() -> TerrainGrid {
        let config = TerrainConfig { segments_x: 4, segments_z: 2, ..Default::default() };
        generate(&config, &FlatField(0.0))
    }

    fn build(mobile: bool) -> (Scene, SceneNodes) {
        let config = SceneConfig::default();
        let mut scene = Scene::new();
        let nodes = SceneBuilder::new(&mut scene, &config, mobile).build(&small_grid(), &mut Rng::new(1));
        (scene, nodes)
    }

    #[test]
    fn one_node_per_pool_slot() {
        let (scene, nodes) = build(false);
        let pools = SceneConfig::default().pools;
        assert_eq!(nodes.effects.streaks.len(), pools.streak_capacity);
        assert_eq!(nodes.effects.meteors.len(), pools.meteor_capacity);
        assert_eq!(scene.find_all_by_tag("streak").len(), pools.streak_capacity);
        for &id in nodes.effects.streaks.iter().chain(&nodes.effects.meteors) {
            assert!(!scene.get(id).unwrap().visible);
        }
        assert_eq!(scene.get(nodes.effects.comet.unwrap()).unwrap().pos, COMET_PARK);
    }

    #[test]
    fn terrain_tiles_share_one_geometry() {
        let (scene, nodes) = build(false);
        let meshes: Vec<_> = scene
            .iter()
            .filter(|n| nodes.terrain.iter().chain(&nodes.terrain_reflections).any(|&t| n.parent == Some(t)))
            .collect();
        assert_eq!(meshes.len(), 8);
        let geo = meshes[0].geometry;
        assert!(meshes.iter().all(|n| n.geometry == geo));
        assert!(matches!(scene.geometry(geo.unwrap()), Some(Geometry::Terrain { .. })));
    }

    #[test]
    fn tiles_start_one_depth_apart() {
        let (scene, nodes) = build(false);
        let z: Vec<f32> = nodes.terrain.iter().map(|&id| scene.get(id).unwrap().pos.z).collect();
        assert_eq!(z, vec![0.0, -400.0]);
        let mirror = scene.get(nodes.terrain_reflections[1]).unwrap();
        assert_eq!(mirror.pos, Vec3::new(0.0, -1.0, -400.0));
        assert_eq!(mirror.scale.y, -1.0);
    }

    #[test]
    fn planet_has_its_rings() {
        let (scene, nodes) = build(false);
        let children = scene.iter().filter(|n| n.parent == Some(nodes.planet)).count();
        assert_eq!(children, 1 + PLANET_RINGS);
        assert_eq!(scene.get(nodes.planet_body).unwrap().parent, Some(nodes.planet));
    }

    #[test]
    fn mobile_layout_differs() {
        let (desktop, d) = build(false);
        let (mobile, m) = build(true);
        assert_eq!(desktop.len(), mobile.len());
        assert_eq!(desktop.get(d.galaxy).unwrap().pos.x, -400.0);
        assert_eq!(mobile.get(m.galaxy).unwrap().pos.x, -140.0);
        assert_eq!(desktop.find_by_tag("sun").unwrap().pos.y, 40.0);
        assert_eq!(mobile.find_by_tag("sun").unwrap().pos.y, 20.0);

        let stars = |scene: &Scene| match scene.find_by_tag("stars").and_then(|n| scene.geometry(n.geometry?)) {
            Some(Geometry::Points { count, .. }) => *count,
            _ => 0,
        };
        assert_eq!(stars(&desktop), 3000);
        assert_eq!(stars(&mobile), 6000);
    }

    #[test]
    fn galaxy_points_stay_near_the_disk() {
        let (scene, _) = build(false);
        let galaxy = scene.find_by_tag("galaxy").unwrap();
        let Some(Geometry::Points { positions, .. }) = scene.geometry(galaxy.geometry.unwrap()) else {
            panic!("galaxy is not a point cloud");
        };
        let Some(BufferData::F32(data)) = scene.buffer(*positions) else {
            panic!("missing galaxy positions");
        };
        assert_eq!(data.len(), GALAXY_POINTS * 3);
        for p in data.chunks(3) {
            assert!(p[0].abs() <= GALAXY_RADIUS + 10.0);
            assert!(p[2].abs() <= 12.5 + 1e-3);
        }
    }

    #[test]
    fn same_seed_builds_identical_buffers() {
        let (a, _) = build(false);
        let (b, _) = build(false);
        for i in 0..a.buffer_count() {
            let id = crate::api::types::BufferId(i as u32);
            assert_eq!(a.buffer(id), b.buffer(id));
        }
    }
}
