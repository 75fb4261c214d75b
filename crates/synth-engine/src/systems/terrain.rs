//! Procedural terrain: a meandering valley between noisy mountain ridges.
//!
//! Heights are a pure function of the local (x, y) grid coordinate, the
//! valley profile parameters and the injected noise field. The grid is built
//! once; the scrolling tiles all reference it.

use std::f32::consts::TAU;

use glam::Vec3;
use serde::Serialize;

use crate::api::config::TerrainConfig;
use crate::components::color::{palette, Rgb};
use crate::systems::noise::NoiseField;

/// Mountain octaves: (frequency, amplitude), decreasing amplitude.
const MOUNTAIN_OCTAVES: [(f64, f32); 3] = [(0.03, 12.0), (0.1, 6.0), (0.2, 3.0)];
/// Valley octaves.
const VALLEY_OCTAVES: [(f64, f32); 2] = [(0.03, 5.0), (0.15, 2.0)];
/// Valley floor ripples: amplitude and frequency along x and y.
const RIPPLE_AMPLITUDE: f32 = 2.0;
const RIPPLE_FREQ_X: f32 = 0.1;
const RIPPLE_FREQ_Y: f32 = 0.08;

/// Worst-case absolute contribution of the mountain noise octaves.
pub fn mountain_noise_bound(bound: f64) -> f32 {
    MOUNTAIN_OCTAVES.iter().map(|&(_, amp)| amp).sum::<f32>() * bound as f32
}

/// Mountain / valley classification of a grid vertex.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TerrainClass {
    Mountain,
    Valley,
}

impl TerrainClass {
    pub fn color(self) -> Rgb {
        match self {
            TerrainClass::Mountain => palette::GRID_MOUNTAIN,
            TerrainClass::Valley => palette::GRID_WATER,
        }
    }
}

/// Height and classification of one vertex.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TerrainSample {
    pub height: f32,
    pub class: TerrainClass,
}

/// Valley centerline offset and half-width at local depth coordinate `y`.
pub fn valley_profile(config: &TerrainConfig, y: f32) -> (f32, f32) {
    let normalized = (y + config.depth / 2.0) / config.depth;
    let angle = normalized * TAU;
    let centerline = angle.sin() * config.valley_amplitude;
    let half_width = config.valley_base_width + (angle * 2.0).cos() * config.valley_width_amplitude;
    (centerline, half_width)
}

fn octaves(noise: &dyn NoiseField, x: f32, y: f32, table: &[(f64, f32)]) -> f32 {
    table
        .iter()
        .map(|&(freq, amp)| noise.sample(x as f64 * freq, y as f64 * freq) as f32 * amp)
        .sum()
}

/// Height and class at local grid coordinate (x, y).
pub fn sample(config: &TerrainConfig, noise: &dyn NoiseField, x: f32, y: f32) -> TerrainSample {
    let (centerline, half_width) = valley_profile(config, y);
    let lateral = (x - centerline).abs();

    if lateral > half_width {
        let beyond = lateral - half_width;
        let ridge = ((beyond * config.mountain_scale).powf(config.mountain_exponent)
            * config.mountain_multiplier)
            .min(config.mountain_max);
        TerrainSample {
            height: ridge + octaves(noise, x, y, &MOUNTAIN_OCTAVES),
            class: TerrainClass::Mountain,
        }
    } else {
        let ripple = (x * RIPPLE_FREQ_X).sin() * RIPPLE_AMPLITUDE
            + (y * RIPPLE_FREQ_Y).cos() * RIPPLE_AMPLITUDE;
        TerrainSample {
            height: config.valley_floor + octaves(noise, x, y, &VALLEY_OCTAVES) + ripple,
            class: TerrainClass::Valley,
        }
    }
}

/// Generated terrain attributes in plane-local space (x lateral, y depth,
/// z height). Tiles rotate this plane -90° about X so z becomes world up.
#[derive(Debug, Clone, PartialEq)]
pub struct TerrainGrid {
    /// xyz per vertex.
    pub positions: Vec<f32>,
    /// rgb per vertex.
    pub colors: Vec<f32>,
    /// xyz per vertex, unit length.
    pub normals: Vec<f32>,
    /// Two triangles per cell.
    pub indices: Vec<u32>,
    pub classes: Vec<TerrainClass>,
    /// Vertices per row (segments_x + 1).
    pub columns: u32,
    /// Vertex rows (segments_z + 1).
    pub rows: u32,
}

impl TerrainGrid {
    pub fn vertex_count(&self) -> usize {
        self.classes.len()
    }

    pub fn position(&self, index: usize) -> Vec3 {
        Vec3::from_slice(&self.positions[index * 3..index * 3 + 3])
    }

    /// Vertex index at column `ix`, row `iy`.
    pub fn index_of(&self, ix: u32, iy: u32) -> usize {
        (iy * self.columns + ix) as usize
    }
}

/// Build the terrain grid.
///
/// Vertex order matches a standard plane geometry: rows run from +depth/2
/// down to -depth/2, columns from -width/2 to +width/2.
pub fn generate(config: &TerrainConfig, noise: &dyn NoiseField) -> TerrainGrid {
    let columns = config.segments_x + 1;
    let rows = config.segments_z + 1;
    let count = (columns * rows) as usize;
    let seg_w = config.width / config.segments_x as f32;
    let seg_d = config.depth / config.segments_z as f32;

    let mut positions = Vec::with_capacity(count * 3);
    let mut colors = Vec::with_capacity(count * 3);
    let mut classes = Vec::with_capacity(count);

    for iy in 0..rows {
        let y = config.depth / 2.0 - iy as f32 * seg_d;
        for ix in 0..columns {
            let x = ix as f32 * seg_w - config.width / 2.0;
            let s = sample(config, noise, x, y);
            positions.extend_from_slice(&[x, y, s.height]);
            colors.extend_from_slice(&s.class.color().to_array());
            classes.push(s.class);
        }
    }

    let indices = plane_indices(config.segments_x, config.segments_z);
    let normals = vertex_normals(&positions, &indices);

    TerrainGrid { positions, colors, normals, indices, classes, columns, rows }
}

fn plane_indices(segments_x: u32, segments_z: u32) -> Vec<u32> {
    let columns = segments_x + 1;
    let mut indices = Vec::with_capacity((segments_x * segments_z * 6) as usize);
    for iy in 0..segments_z {
        for ix in 0..segments_x {
            let a = ix + columns * iy;
            let b = ix + columns * (iy + 1);
            let c = (ix + 1) + columns * (iy + 1);
            let d = (ix + 1) + columns * iy;
            indices.extend_from_slice(&[a, b, d, b, c, d]);
        }
    }
    indices
}

/// Area-weighted vertex normals from indexed triangles.
fn vertex_normals(positions: &[f32], indices: &[u32]) -> Vec<f32> {
    let at = |i: u32| Vec3::from_slice(&positions[i as usize * 3..i as usize * 3 + 3]);
    let mut acc = vec![Vec3::ZERO; positions.len() / 3];

    for tri in indices.chunks_exact(3) {
        let (a, b, c) = (at(tri[0]), at(tri[1]), at(tri[2]));
        let face = (c - b).cross(a - b);
        for &i in tri {
            acc[i as usize] += face;
        }
    }

    acc.iter()
        .flat_map(|n| n.normalize_or(Vec3::Z).to_array())
        .collect()
}
