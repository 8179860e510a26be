use crate::constants::{
    EMISSIVE_BRIGHTNESS_THRESHOLD, EMISSIVE_INTENSITY, SURFACE_METALNESS, SURFACE_ROUGHNESS,
};
use glam::{Vec3, Vec4};

/// Which faces of a surface are rendered (and pickable).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Side {
    Front,
    Back,
    Double,
}

/// Result of the brightness heuristic applied to a surface's base color.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SurfaceClass {
    /// Glows: white emissive, excluded from tone mapping so bloom catches it.
    Emissive,
    Matte,
}

/// Sum of the RGB channels, strictly above the threshold counts as emissive.
#[inline]
pub fn classify_surface(base_color: Vec3) -> SurfaceClass {
    let brightness = base_color.x + base_color.y + base_color.z;
    if brightness > EMISSIVE_BRIGHTNESS_THRESHOLD {
        SurfaceClass::Emissive
    } else {
        SurfaceClass::Matte
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Material {
    pub name: String,
    pub base_color: Vec4,
    pub opacity: f32,
    pub transparent: bool,
    pub roughness: f32,
    pub metalness: f32,
    pub side: Side,
    pub emissive: Vec3,
    pub emissive_intensity: f32,
    pub tone_mapped: bool,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            name: String::new(),
            base_color: Vec4::ONE,
            opacity: 1.0,
            transparent: false,
            roughness: 1.0,
            metalness: 1.0,
            side: Side::Front,
            emissive: Vec3::ZERO,
            emissive_intensity: 1.0,
            tone_mapped: true,
        }
    }
}

impl Material {
    /// Normalize a loaded surface for the console look and mark it emissive
    /// or matte from its base color.
    pub fn prepare(&mut self) -> SurfaceClass {
        self.transparent = false;
        self.opacity = 1.0;
        self.roughness = SURFACE_ROUGHNESS;
        self.metalness = SURFACE_METALNESS;
        self.side = Side::Front;

        let class = classify_surface(self.base_color.truncate());
        match class {
            SurfaceClass::Emissive => {
                self.emissive = Vec3::ONE;
                self.emissive_intensity = EMISSIVE_INTENSITY;
                self.tone_mapped = false;
            }
            SurfaceClass::Matte => {
                self.emissive = Vec3::ZERO;
                self.emissive_intensity = 0.0;
            }
        }
        class
    }

    #[inline]
    pub fn is_emissive(&self) -> bool {
        self.emissive_intensity > 0.0 && self.emissive != Vec3::ZERO
    }
}
