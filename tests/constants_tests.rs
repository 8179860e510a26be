// Host-side tests for constants and their relationships.
// The main crate is wasm-only, so the pure frontend constants are included directly.

#![allow(dead_code)]
mod constants {
    include!("../src/constants.rs");
}

use console_core::constants::*;
use constants::*;

#[test]
fn backing_size_follows_device_pixel_ratio() {
    assert_eq!(backing_size(800.0, 600.0, 1.0), (800, 600));
    assert_eq!(backing_size(800.0, 600.0, 1.5), (1200, 900));
}

#[test]
fn backing_size_clamps_ratio_and_never_hits_zero() {
    assert_eq!(backing_size(800.0, 600.0, 3.0), (1600, 1200));
    assert_eq!(backing_size(800.0, 600.0, 0.5), (800, 600));
    assert_eq!(backing_size(0.0, 0.0, 1.0), (1, 1));
}

#[test]
fn page_layers_stack_canvas_below_documents() {
    let canvas: i32 = CANVAS_Z_INDEX.parse().unwrap();
    let css: i32 = CSS_LAYER_Z_INDEX.parse().unwrap();
    assert!(canvas < css);
    assert_ne!(CANVAS_CONTAINER_ID, CSS_CONTAINER_ID);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn camera_start_lies_inside_orbit_limits() {
    let start = glam::Vec3::from_array(CAMERA_START).length();
    assert!(start >= ORBIT_MIN_DISTANCE && start <= ORBIT_MAX_DISTANCE);
    assert!(ORBIT_MIN_POLAR < ORBIT_MAX_POLAR);
    assert!(ORBIT_MAX_POLAR < std::f32::consts::FRAC_PI_2);
    assert!((ORBIT_MIN_AZIMUTH + ORBIT_MAX_AZIMUTH).abs() < 1e-6);
    assert!(ORBIT_ZOOM_STEP > 0.0 && ORBIT_ZOOM_STEP < 1.0);
}

#[test]
fn screen_light_sits_in_front_of_overlay() {
    let p = screen_light_position();
    assert!((p.z - 0.41).abs() < 1e-6);
    assert_eq!(p.x, overlay_position().x);
    assert_eq!(p.y, overlay_position().y);
}

#[test]
fn overlay_rotation_is_converted_to_radians() {
    let r = overlay_rotation_rad();
    assert!((r.x - (-18.9f32).to_radians()).abs() < 1e-6);
    assert_eq!(r.y, 0.0);
}

#[test]
fn hex_colors_unpack_per_channel() {
    let c = rgb_hex(RIM_LIGHT_COLOR);
    assert!((c.x - 0x8a as f32 / 255.0).abs() < 1e-6);
    assert!((c.y - 0x8a as f32 / 255.0).abs() < 1e-6);
    assert_eq!(c.z, 1.0);
    assert_eq!(rgb_hex(0x000000), glam::Vec3::ZERO);
}

#[test]
fn toggle_global_matches_the_inline_handler() {
    assert_eq!(TOGGLE_GLOBAL_NAME, "toggleDimensions");
}

#[test]
fn scene_pass_is_four_times_multisampled() {
    assert_eq!(SCENE_MSAA_SAMPLES, 4);
    assert!(SCENE_MSAA_SAMPLES.is_power_of_two());
}
