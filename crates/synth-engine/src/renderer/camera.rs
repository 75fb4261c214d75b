use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3};

use crate::api::config::CameraConfig;

/// Camera placement for one layout class.
pub const DESKTOP_EYE: Vec3 = Vec3::new(0.0, 25.0, 220.0);
pub const MOBILE_EYE: Vec3 = Vec3::new(0.0, 30.0, 240.0);
/// Fixed point on the horizon the camera looks at.
pub const LOOK_TARGET: Vec3 = Vec3::new(0.0, 5.0, -200.0);

/// Perspective camera with a fixed eye and target.
#[derive(Debug, Clone)]
pub struct PerspectiveCamera {
    /// Vertical field of view in degrees.
    pub fov_deg: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    pub eye: Vec3,
    pub target: Vec3,
}

/// GPU-side uniform data for the camera (column-major).
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct CameraUniform {
    pub view: [[f32; 4]; 4],
    pub projection: [[f32; 4]; 4],
}

impl CameraUniform {
    pub const FLOATS: usize = 32;
}

impl PerspectiveCamera {
    pub fn new(config: &CameraConfig, aspect: f32, mobile: bool) -> Self {
        Self {
            fov_deg: config.fov_deg,
            aspect,
            near: config.near,
            far: config.far,
            eye: if mobile { MOBILE_EYE } else { DESKTOP_EYE },
            target: LOOK_TARGET,
        }
    }

    /// OpenGL-style clip space, matching a WebGL host.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh_gl(self.fov_deg.to_radians(), self.aspect, self.near, self.far)
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, Vec3::Y)
    }

    pub fn uniform(&self) -> CameraUniform {
        CameraUniform {
            view: self.view_matrix().to_cols_array_2d(),
            projection: self.projection_matrix().to_cols_array_2d(),
        }
    }

    /// Update the aspect ratio after a viewport resize.
    pub fn set_aspect(&mut self, width: f32, height: f32) {
        if width > 0.0 && height > 0.0 {
            self.aspect = width / height;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn camera() -> PerspectiveCamera {
        PerspectiveCamera::new(&CameraConfig::default(), 16.0 / 9.0, false)
    }

    #[test]
    fn target_projects_to_screen_center() {
        let cam = camera();
        let clip = cam.projection_matrix() * cam.view_matrix() * LOOK_TARGET.extend(1.0);
        let ndc = clip.truncate() / clip.w;
        assert!(ndc.x.abs() < 1e-4 && ndc.y.abs() < 1e-4, "ndc = {ndc:?}");
    }

    #[test]
    fn set_aspect_ignores_degenerate_sizes() {
        let mut cam = camera();
        cam.set_aspect(800.0, 0.0);
        assert!((cam.aspect - 16.0 / 9.0).abs() < 1e-6);
        cam.set_aspect(800.0, 400.0);
        assert_eq!(cam.aspect, 2.0);
    }

    #[test]
    fn mobile_camera_sits_higher_and_further() {
        let cam = PerspectiveCamera::new(&CameraConfig::default(), 0.5, true);
        assert_eq!(cam.eye, MOBILE_EYE);
        assert!(cam.eye.y > DESKTOP_EYE.y && cam.eye.z > DESKTOP_EYE.z);
    }
}
