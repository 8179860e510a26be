//! Orbit camera controller: rotate around a target on a sphere with damping
//! and polar/azimuth/distance limits. Panning is not supported.

use crate::camera::PerspectiveCamera;
use crate::constants::{
    ORBIT_DAMPING, ORBIT_MAX_AZIMUTH, ORBIT_MAX_DISTANCE, ORBIT_MAX_POLAR, ORBIT_MIN_AZIMUTH,
    ORBIT_MIN_DISTANCE, ORBIT_MIN_POLAR, ORBIT_ROTATE_SPEED, ORBIT_ZOOM_STEP,
};
use glam::Vec3;
use std::f32::consts::{PI, TAU};

const EPS: f32 = 1e-6;

/// Spherical coordinates with polar angle `phi` measured from +Y and azimuth
/// `theta` measured from +Z toward +X.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Spherical {
    pub radius: f32,
    pub phi: f32,
    pub theta: f32,
}

impl Spherical {
    pub fn from_vec3(v: Vec3) -> Self {
        let radius = v.length();
        if radius == 0.0 {
            return Self {
                radius,
                phi: 0.0,
                theta: 0.0,
            };
        }
        Self {
            radius,
            theta: v.x.atan2(v.z),
            phi: (v.y / radius).clamp(-1.0, 1.0).acos(),
        }
    }

    pub fn to_vec3(self) -> Vec3 {
        let s = self.phi.sin() * self.radius;
        Vec3::new(s * self.theta.sin(), self.phi.cos() * self.radius, s * self.theta.cos())
    }

    /// Keep `phi` off the poles.
    fn make_safe(&mut self) {
        self.phi = self.phi.clamp(EPS, PI - EPS);
    }
}

#[derive(Clone, Debug)]
pub struct OrbitControls {
    pub target: Vec3,
    /// Input is ignored while disabled; damping still settles.
    pub enabled: bool,
    pub damping: f32,
    pub rotate_speed: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    pub min_polar: f32,
    pub max_polar: f32,
    pub min_azimuth: f32,
    pub max_azimuth: f32,
    delta_theta: f32,
    delta_phi: f32,
    scale: f32,
}

impl Default for OrbitControls {
    fn default() -> Self {
        Self {
            target: Vec3::ZERO,
            enabled: true,
            damping: ORBIT_DAMPING,
            rotate_speed: ORBIT_ROTATE_SPEED,
            min_distance: ORBIT_MIN_DISTANCE,
            max_distance: ORBIT_MAX_DISTANCE,
            min_polar: ORBIT_MIN_POLAR,
            max_polar: ORBIT_MAX_POLAR,
            min_azimuth: ORBIT_MIN_AZIMUTH,
            max_azimuth: ORBIT_MAX_AZIMUTH,
            delta_theta: 0.0,
            delta_phi: 0.0,
            scale: 1.0,
        }
    }
}

impl OrbitControls {
    /// Pointer drag by `dx`,`dy` CSS pixels on a viewport `height` pixels tall.
    pub fn rotate_by_pixels(&mut self, dx: f32, dy: f32, height: f32) {
        if !self.enabled || height <= 0.0 {
            return;
        }
        self.delta_theta -= TAU * dx / height * self.rotate_speed;
        self.delta_phi -= TAU * dy / height * self.rotate_speed;
    }

    /// Wheel input: negative `delta_y` zooms in, positive zooms out.
    pub fn dolly(&mut self, delta_y: f32) {
        if !self.enabled {
            return;
        }
        if delta_y < 0.0 {
            self.scale *= ORBIT_ZOOM_STEP;
        } else if delta_y > 0.0 {
            self.scale /= ORBIT_ZOOM_STEP;
        }
    }

    /// Apply pending input and limits to `camera`. Returns true if it moved.
    pub fn update(&mut self, camera: &mut PerspectiveCamera) -> bool {
        let offset = camera.position - self.target;
        let mut s = Spherical::from_vec3(offset);

        if self.damping > 0.0 {
            s.theta += self.delta_theta * self.damping;
            s.phi += self.delta_phi * self.damping;
        } else {
            s.theta += self.delta_theta;
            s.phi += self.delta_phi;
        }

        s.theta = self.clamp_azimuth(s.theta);
        s.phi = s.phi.clamp(self.min_polar, self.max_polar);
        s.make_safe();
        s.radius = (s.radius * self.scale).clamp(self.min_distance, self.max_distance);

        let position = self.target + s.to_vec3();
        let moved = position.distance_squared(camera.position) > EPS;
        camera.position = position;
        camera.target = self.target;

        if self.damping > 0.0 {
            self.delta_theta *= 1.0 - self.damping;
            self.delta_phi *= 1.0 - self.damping;
        } else {
            self.delta_theta = 0.0;
            self.delta_phi = 0.0;
        }
        self.scale = 1.0;
        moved
    }

    fn clamp_azimuth(&self, theta: f32) -> f32 {
        let (mut min, mut max) = (self.min_azimuth, self.max_azimuth);
        if !min.is_finite() || !max.is_finite() {
            return theta;
        }
        if min < -PI {
            min += TAU;
        } else if min > PI {
            min -= TAU;
        }
        if max < -PI {
            max += TAU;
        } else if max > PI {
            max -= TAU;
        }
        if min <= max {
            theta.clamp(min, max)
        } else if theta > (min + max) / 2.0 {
            theta.max(min)
        } else {
            theta.min(max)
        }
    }
}
