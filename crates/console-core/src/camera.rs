//! Perspective camera shared by the WebGPU pass, the CSS overlay renderer
//! and picking.

use crate::constants::{CAMERA_FAR, CAMERA_FOV_DEG, CAMERA_NEAR, CAMERA_START};
use crate::raycast::Ray;
use glam::{Mat4, Vec2, Vec3};

/// Right-handed look-at camera with perspective projection.
#[derive(Clone, Debug)]
pub struct PerspectiveCamera {
    pub position: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub aspect: f32,
    pub fovy_degrees: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl PerspectiveCamera {
    pub fn new(aspect: f32) -> Self {
        Self {
            position: Vec3::from_array(CAMERA_START),
            target: Vec3::ZERO,
            up: Vec3::Y,
            aspect,
            fovy_degrees: CAMERA_FOV_DEG,
            znear: CAMERA_NEAR,
            zfar: CAMERA_FAR,
        }
    }

    #[inline]
    pub fn fovy_radians(&self) -> f32 {
        self.fovy_degrees.to_radians()
    }

    pub fn set_viewport(&mut self, width: f32, height: f32) {
        if width > 0.0 && height > 0.0 {
            self.aspect = width / height;
        }
    }

    /// Clip-space projection (depth in 0..1).
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians(), self.aspect, self.znear, self.zfar)
    }

    /// World to view transform.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, self.up)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// Unit vector the camera looks along, in world space.
    pub fn world_direction(&self) -> Vec3 {
        (self.target - self.position).normalize_or_zero()
    }

    /// Ray from the eye through a point given in normalized device coordinates.
    pub fn ray_from_ndc(&self, ndc: Vec2) -> Ray {
        let inv = self.view_projection().inverse();
        let p = inv.project_point3(Vec3::new(ndc.x, ndc.y, 0.5));
        Ray::new(self.position, p - self.position)
    }
}
