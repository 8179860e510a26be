//! Per-frame view rules: screen-facing overlay visibility and cursor parallax.

use crate::constants::{FACING_THRESHOLD, PARALLAX_GAIN, PARALLAX_SMOOTHING};
use glam::{EulerRot, Quat, Vec2, Vec3};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OverlayVisibility {
    Visible,
    Hidden,
}

impl OverlayVisibility {
    #[inline]
    pub fn opacity(self) -> f32 {
        match self {
            Self::Visible => 1.0,
            Self::Hidden => 0.0,
        }
    }
}

/// Dot product of the group's forward (+Z) axis and the camera view direction.
#[inline]
pub fn facing_dot(group_rotation: Quat, camera_direction: Vec3) -> f32 {
    (group_rotation * Vec3::Z).dot(camera_direction)
}

/// The overlay shows only while the screen points toward the camera.
#[inline]
pub fn overlay_visibility(dot: f32) -> OverlayVisibility {
    if dot < FACING_THRESHOLD {
        OverlayVisibility::Visible
    } else {
        OverlayVisibility::Hidden
    }
}

/// One exponential-smoothing step: `current + factor * (target - current)`.
#[inline]
pub fn ease(current: f32, target: f32, factor: f32) -> f32 {
    current + factor * (target - current)
}

/// Cursor-driven tilt (about X) and pan (about Y) of the console group.
#[derive(Default, Clone, Copy, Debug, PartialEq)]
pub struct Parallax {
    /// `x`: tilt angle, `y`: pan angle, radians.
    pub angles: Vec2,
}

impl Parallax {
    #[inline]
    pub fn target(pointer_ndc: Vec2) -> Vec2 {
        Vec2::new(pointer_ndc.y * PARALLAX_GAIN, pointer_ndc.x * PARALLAX_GAIN)
    }

    /// Advance one frame toward the pointer target and return the new rotation.
    pub fn step(&mut self, pointer_ndc: Vec2) -> Quat {
        let target = Self::target(pointer_ndc);
        self.angles.x = ease(self.angles.x, target.x, PARALLAX_SMOOTHING);
        self.angles.y = ease(self.angles.y, target.y, PARALLAX_SMOOTHING);
        self.rotation()
    }

    #[inline]
    pub fn rotation(&self) -> Quat {
        Quat::from_euler(EulerRot::XYZ, self.angles.x, self.angles.y, 0.0)
    }
}
