use glam::Vec3;

// Calibration and tuning constants shared by the core and the web frontend.
// Angles are in degrees where the name says so, radians otherwise.

// Overlay plane (screen calibration)
pub const OVERLAY_WIDTH_PX: u32 = 500;
pub const OVERLAY_HEIGHT_PX: u32 = 297;
pub const OVERLAY_SCALE: f32 = 0.008; // CSS pixels -> world units
pub const OVERLAY_POSITION: [f32; 3] = [0.0, 0.0, 0.21];
pub const OVERLAY_ROTATION_DEG: [f32; 3] = [-18.9, 0.0, 0.0];
pub const OVERLAY_BACKGROUND: &str = "transparent";

// Camera
pub const CAMERA_FOV_DEG: f32 = 75.0;
pub const CAMERA_NEAR: f32 = 0.1;
pub const CAMERA_FAR: f32 = 1000.0;
pub const CAMERA_START: [f32; 3] = [0.0, 0.0, 4.0];

// Orbit limits
pub const ORBIT_DAMPING: f32 = 0.05;
pub const ORBIT_MIN_DISTANCE: f32 = 3.0;
pub const ORBIT_MAX_DISTANCE: f32 = 8.0;
pub const ORBIT_MIN_POLAR: f32 = 0.2;
pub const ORBIT_MAX_POLAR: f32 = std::f32::consts::FRAC_PI_2 - 0.05;
pub const ORBIT_MIN_AZIMUTH: f32 = -std::f32::consts::PI / 1.8;
pub const ORBIT_MAX_AZIMUTH: f32 = std::f32::consts::PI / 1.8;
pub const ORBIT_ROTATE_SPEED: f32 = 1.0;
pub const ORBIT_ZOOM_STEP: f32 = 0.95; // dolly factor per wheel notch

// Model preparation
pub const MODEL_SCALE: f32 = 2.0;
pub const SURFACE_ROUGHNESS: f32 = 0.5;
pub const SURFACE_METALNESS: f32 = 0.5;
// Tunable: picked by eye against the shipped model, not derived.
pub const EMISSIVE_BRIGHTNESS_THRESHOLD: f32 = 2.0;
pub const EMISSIVE_INTENSITY: f32 = 3.0;

// Pointer interaction
pub const DPAD_DEADZONE: f32 = 0.005; // node-local units
pub const SCROLL_STEP: f64 = 100.0; // CSS pixels per D-pad press
pub const PRESS_SCALE: f32 = 0.95;
pub const PRESS_RESTORE_MS: i32 = 100;

// View-facing rule and parallax
// Tunable: screen is shown once it faces the camera by more than this.
pub const FACING_THRESHOLD: f32 = -0.1;
pub const PARALLAX_GAIN: f32 = 0.1; // radians at the edge of the viewport
pub const PARALLAX_SMOOTHING: f32 = 0.05; // per frame

// Lights
pub const AMBIENT_COLOR: u32 = 0x404060;
pub const AMBIENT_INTENSITY: f32 = 1.5;
pub const KEY_LIGHT_COLOR: u32 = 0xffffff;
pub const KEY_LIGHT_INTENSITY: f32 = 2.0;
pub const KEY_LIGHT_POSITION: [f32; 3] = [5.0, 5.0, 5.0];
pub const RIM_LIGHT_COLOR: u32 = 0x8a8aff;
pub const RIM_LIGHT_INTENSITY: f32 = 5.0;
pub const RIM_LIGHT_POSITION: [f32; 3] = [-5.0, 5.0, -5.0];
pub const RIM_LIGHT_ATTENUATION: f32 = 0.2;
pub const SCREEN_LIGHT_COLOR: u32 = 0xffffff;
pub const SCREEN_LIGHT_INTENSITY: f32 = 0.5;
pub const SCREEN_LIGHT_RANGE: f32 = 2.0;
pub const SCREEN_LIGHT_OFFSET_Z: f32 = 0.2; // in front of the overlay plane

// Post-processing
pub const BLOOM_STRENGTH: f32 = 1.5;
pub const BLOOM_RADIUS: f32 = 0.4;
pub const BLOOM_THRESHOLD: f32 = 0.85;

#[inline]
pub fn overlay_position() -> Vec3 {
    Vec3::from_array(OVERLAY_POSITION)
}

#[inline]
pub fn overlay_rotation_rad() -> Vec3 {
    let [x, y, z] = OVERLAY_ROTATION_DEG;
    Vec3::new(x.to_radians(), y.to_radians(), z.to_radians())
}

#[inline]
pub fn screen_light_position() -> Vec3 {
    overlay_position() + Vec3::new(0.0, 0.0, SCREEN_LIGHT_OFFSET_Z)
}

/// Convert a packed `0xRRGGBB` color to linear-ish float channels.
#[inline]
pub fn rgb_hex(hex: u32) -> Vec3 {
    Vec3::new(
        ((hex >> 16) & 0xff) as f32 / 255.0,
        ((hex >> 8) & 0xff) as f32 / 255.0,
        (hex & 0xff) as f32 / 255.0,
    )
}
