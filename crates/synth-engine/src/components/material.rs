use serde::Serialize;

use super::color::Rgb;

/// Blend equation for a material.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BlendMode {
    Normal,
    Additive,
    Multiply,
}

/// Which faces are rasterized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Front,
    Back,
    Double,
}

/// Animated shader time slots, advanced per frame by `ShaderClock`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeSlot {
    Disk,
    DiskReflection,
    Grain,
}

impl TimeSlot {
    /// Index into `ShaderClock::times`.
    pub fn index(self) -> usize {
        match self {
            TimeSlot::Disk => 0,
            TimeSlot::DiskReflection => 1,
            TimeSlot::Grain => 2,
        }
    }
}

/// Shader program selection plus its constant inputs.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "shader", rename_all = "snake_case")]
pub enum Shading {
    /// Unlit flat color.
    Basic { color: Rgb },
    /// Unlit, colored per vertex, drawn as wireframe.
    Wireframe,
    /// Vertical world-space gradient for the sky dome.
    SkyGradient { top: Rgb, bottom: Rgb, offset: f32, exponent: f32 },
    /// Round disc with horizontal bands fading toward the top.
    StripedSun { top: Rgb, bottom: Rgb },
    /// Radial falloff glow.
    Glow { color: Rgb, strength: f32 },
    /// Noise-swirled accretion ring.
    AccretionDisk { inner: Rgb, outer: Rgb, time: TimeSlot },
    /// Vertical UV gradient from `bottom` to `top`.
    Gradient { top: Rgb, bottom: Rgb },
    /// Full-screen multiplicative noise.
    FilmGrain { amount: f32, time: TimeSlot },
    /// Size-attenuated round points, alpha from per-point size.
    ImpactPoints { color: Rgb },
    /// Uniform-color or per-vertex-color points.
    Points { color: Option<Rgb>, size: f32 },
    /// View-angle glow along a tail, fading with distance from the head.
    Tail { head: Rgb, end: Rgb, glow_power: f32 },
    /// Fresnel rim on a sphere.
    Fresnel { color: Rgb },
    /// Thin line.
    Line { color: Rgb },
}

/// Material descriptor consumed by the host.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Material {
    pub shading: Shading,
    pub opacity: f32,
    pub transparent: bool,
    pub blend: BlendMode,
    pub depth_write: bool,
    pub depth_test: bool,
    pub side: Side,
}

impl Material {
    pub fn new(shading: Shading) -> Self {
        Self {
            shading,
            opacity: 1.0,
            transparent: false,
            blend: BlendMode::Normal,
            depth_write: true,
            depth_test: true,
            side: Side::Front,
        }
    }

    pub fn basic(color: Rgb) -> Self {
        Self::new(Shading::Basic { color })
    }

    // -- Builder pattern --

    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity;
        self.transparent = true;
        self
    }

    pub fn transparent(mut self) -> Self {
        self.transparent = true;
        self
    }

    pub fn additive(mut self) -> Self {
        self.blend = BlendMode::Additive;
        self.transparent = true;
        self
    }

    pub fn multiply(mut self) -> Self {
        self.blend = BlendMode::Multiply;
        self.transparent = true;
        self
    }

    pub fn no_depth_write(mut self) -> Self {
        self.depth_write = false;
        self
    }

    pub fn no_depth_test(mut self) -> Self {
        self.depth_test = false;
        self
    }

    pub fn with_side(mut self, side: Side) -> Self {
        self.side = side;
        self
    }

    /// Shader time slot this material reads, if any.
    pub fn time_slot(&self) -> Option<TimeSlot> {
        match self.shading {
            Shading::AccretionDisk { time, .. } | Shading::FilmGrain { time, .. } => Some(time),
            _ => None,
        }
    }
}
