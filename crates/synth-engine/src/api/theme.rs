/// A named accent color for the page chrome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccentColor {
    pub name: &'static str,
    pub hex: &'static str,
}

pub const ACCENT_COLORS: [AccentColor; 6] = [
    AccentColor { name: "Plasma Orange", hex: "#FF5F1F" },
    AccentColor { name: "Cyber Magenta", hex: "#FF00FF" },
    AccentColor { name: "Tron Cyan", hex: "#00F3FF" },
    AccentColor { name: "Laser Lemon", hex: "#E7FF00" },
    AccentColor { name: "Plasma Violet", hex: "#BD00FF" },
    AccentColor { name: "Matrix Green", hex: "#00FF41" },
];

/// Cyclic selection over an ordered list of accent colors.
/// Exactly one entry is current; `advance` wraps past the end.
#[derive(Debug, Clone)]
pub struct ThemeCycle {
    colors: &'static [AccentColor],
    index: usize,
}

impl ThemeCycle {
    /// Panics if `colors` is empty; a theme needs at least one entry.
    pub fn new(colors: &'static [AccentColor]) -> Self {
        assert!(!colors.is_empty(), "theme needs at least one color");
        Self { colors, index: 0 }
    }

    pub fn current(&self) -> AccentColor {
        self.colors[self.index]
    }

    pub fn index(&self) -> usize {
        self.index
    }

    /// Move to the next color and return it.
    pub fn advance(&mut self) -> AccentColor {
        self.index = (self.index + 1) % self.colors.len();
        self.current()
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }
}

impl Default for ThemeCycle {
    fn default() -> Self {
        Self::new(&ACCENT_COLORS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_at_first_color() {
        let theme = ThemeCycle::default();
        assert_eq!(theme.current().name, "Plasma Orange");
    }

    #[test]
    fn advance_wraps_around() {
        let mut theme = ThemeCycle::default();
        for _ in 0..ACCENT_COLORS.len() - 1 {
            theme.advance();
        }
        assert_eq!(theme.current().name, "Matrix Green");
        assert_eq!(theme.advance().name, "Plasma Orange");
        assert_eq!(theme.index(), 0);
    }
}
