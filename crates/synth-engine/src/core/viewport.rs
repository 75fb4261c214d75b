use crate::api::config::ViewportConfig;

/// Drawing surface size in CSS pixels plus the device pixel ratio to render at.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportSize {
    pub width: f32,
    pub height: f32,
    pub pixel_ratio: f32,
}

impl ViewportSize {
    pub fn new(width: f32, height: f32, pixel_ratio: f32) -> Self {
        Self { width, height, pixel_ratio }
    }

    /// Width over height; 1.0 for a degenerate surface.
    pub fn aspect(&self) -> f32 {
        if self.width > 0.0 && self.height > 0.0 {
            self.width / self.height
        } else {
            1.0
        }
    }
}

/// Filters resize notifications.
///
/// Mobile browsers fire resize events while the address bar slides in and
/// out, shrinking the height by a few dozen pixels. Those are ignored: a
/// resize is applied only when the width moved by more than the threshold
/// or the height grew.
#[derive(Debug, Clone)]
pub struct ViewportAdapter {
    current: ViewportSize,
    threshold: f32,
    max_pixel_ratio: f32,
    mobile: bool,
}

impl ViewportAdapter {
    /// The layout class is decided here, from the initial width, and never
    /// changes afterwards.
    pub fn new(config: &ViewportConfig, width: f32, height: f32, device_pixel_ratio: f32) -> Self {
        Self {
            current: ViewportSize::new(width, height, device_pixel_ratio.min(config.max_pixel_ratio)),
            threshold: config.resize_threshold,
            max_pixel_ratio: config.max_pixel_ratio,
            mobile: width < config.mobile_breakpoint,
        }
    }

    pub fn is_mobile(&self) -> bool {
        self.mobile
    }

    pub fn current(&self) -> ViewportSize {
        self.current
    }

    /// Offer a new surface size. Returns the size to apply, or `None` when
    /// the change is below the hysteresis.
    pub fn offer(&mut self, width: f32, height: f32, device_pixel_ratio: f32) -> Option<ViewportSize> {
        let width_moved = (width - self.current.width).abs() > self.threshold;
        let height_grew = height > self.current.height;
        if !width_moved && !height_grew {
            return None;
        }
        self.current = ViewportSize::new(width, height, device_pixel_ratio.min(self.max_pixel_ratio));
        Some(self.current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn adapter(width: f32, height: f32) -> ViewportAdapter {
        ViewportAdapter::new(&ViewportConfig::default(), width, height, 1.0)
    }

    #[test]
    fn same_size_is_a_no_op() {
        let mut vp = adapter(1280.0, 720.0);
        assert_eq!(vp.offer(1280.0, 720.0, 1.0), None);
        assert_eq!(vp.offer(1280.0, 720.0, 1.0), None);
    }

    #[test]
    fn repeated_resize_applies_once() {
        let mut vp = adapter(1280.0, 720.0);
        assert!(vp.offer(1600.0, 900.0, 1.0).is_some());
        assert_eq!(vp.offer(1600.0, 900.0, 1.0), None);
    }

    #[test]
    fn small_height_shrink_ignored() {
        let mut vp = adapter(390.0, 844.0);
        assert_eq!(vp.offer(390.0, 780.0, 3.0), None);
        assert_eq!(vp.current().height, 844.0);
    }

    #[test]
    fn height_growth_applies() {
        let mut vp = adapter(390.0, 780.0);
        let applied = vp.offer(390.0, 844.0, 3.0).unwrap();
        assert_eq!(applied.height, 844.0);
        assert_eq!(applied.pixel_ratio, 2.0);
    }

    #[test]
    fn width_threshold_is_exclusive() {
        let mut vp = adapter(1000.0, 700.0);
        assert_eq!(vp.offer(1050.0, 700.0, 1.0), None);
        assert!(vp.offer(1051.0, 700.0, 1.0).is_some());
    }

    #[test]
    fn layout_class_fixed_at_construction() {
        let mut vp = adapter(500.0, 900.0);
        assert!(vp.is_mobile());
        vp.offer(1400.0, 900.0, 1.0);
        assert!(vp.is_mobile());
        assert!(!adapter(768.0, 900.0).is_mobile());
    }

    #[test]
    fn degenerate_aspect() {
        assert_eq!(ViewportSize::new(0.0, 0.0, 1.0).aspect(), 1.0);
        assert_eq!(ViewportSize::new(200.0, 100.0, 1.0).aspect(), 2.0);
    }
}
