use serde::Serialize;

/// Linear RGB triple in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Rgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0.0, 0.0, 0.0);
    pub const WHITE: Rgb = Rgb::new(1.0, 1.0, 1.0);

    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Build from a packed `0xRRGGBB` value.
    pub const fn hex(value: u32) -> Self {
        Self {
            r: ((value >> 16) & 0xFF) as f32 / 255.0,
            g: ((value >> 8) & 0xFF) as f32 / 255.0,
            b: (value & 0xFF) as f32 / 255.0,
        }
    }

    pub fn lerp(self, other: Rgb, t: f32) -> Rgb {
        Rgb {
            r: self.r + (other.r - self.r) * t,
            g: self.g + (other.g - self.g) * t,
            b: self.b + (other.b - self.b) * t,
        }
    }

    pub fn to_array(self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }
}

/// Fixed scene palette. Independent of the page accent theme.
pub mod palette {
    use super::Rgb;

    pub const SKY_TOP: Rgb = Rgb::hex(0x050011);
    pub const SKY_BOTTOM: Rgb = Rgb::hex(0x2a003b);
    pub const SUN_TOP: Rgb = Rgb::hex(0xffe600);
    pub const SUN_BOTTOM: Rgb = Rgb::hex(0xff0055);
    pub const SUN_GLOW: Rgb = Rgb::hex(0xff4400);
    pub const SUN_REFLECT_TOP: Rgb = Rgb::hex(0x550022);
    pub const SUN_REFLECT_BOTTOM: Rgb = Rgb::hex(0x220011);
    pub const GRID_WATER: Rgb = Rgb::hex(0xff00aa);
    pub const GRID_MOUNTAIN: Rgb = Rgb::hex(0x00f0ff);
    pub const MOUNTAIN_FILL: Rgb = Rgb::hex(0x030008);
    pub const GALAXY_INSIDE: Rgb = Rgb::hex(0xff6030);
    pub const GALAXY_OUTSIDE: Rgb = Rgb::hex(0x1b3984);
    pub const DISK_INNER: Rgb = Rgb::hex(0xffffaa);
    pub const DISK_OUTER: Rgb = Rgb::hex(0xff4500);
    pub const DISK_REFLECT_INNER: Rgb = Rgb::hex(0xaa5500);
    pub const DISK_REFLECT_OUTER: Rgb = Rgb::hex(0x551100);
    pub const PLANET_LIGHT: Rgb = Rgb::hex(0x4169e1);
    pub const PLANET_DARK: Rgb = Rgb::hex(0x1e3a8a);
    pub const PLANET_RING: Rgb = Rgb::hex(0x00ffff);
    pub const RED_PLANET_LIGHT: Rgb = Rgb::hex(0xff4444);
    pub const RED_PLANET_DARK: Rgb = Rgb::hex(0x8b0000);
    pub const CYAN: Rgb = Rgb::hex(0x00ffff);
    pub const MAGENTA: Rgb = Rgb::hex(0xff00ff);
    pub const COMET_TAIL_BLUE: Rgb = Rgb::hex(0x0088ff);
    pub const COMET_TAIL_DEEP: Rgb = Rgb::hex(0x0055aa);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_unpacks_channels() {
        let c = Rgb::hex(0xff0080);
        assert_eq!(c.r, 1.0);
        assert_eq!(c.g, 0.0);
        assert!((c.b - 128.0 / 255.0).abs() < 1e-6);
    }

    #[test]
    fn lerp_endpoints() {
        let a = Rgb::BLACK;
        let b = Rgb::WHITE;
        assert_eq!(a.lerp(b, 0.0), a);
        assert_eq!(a.lerp(b, 1.0), b);
    }
}
