// Host-side tests for the orbit controller limits and damping.

use console_core::camera::PerspectiveCamera;
use console_core::constants::{
    ORBIT_MAX_AZIMUTH, ORBIT_MAX_DISTANCE, ORBIT_MAX_POLAR, ORBIT_MIN_AZIMUTH, ORBIT_MIN_DISTANCE,
    ORBIT_MIN_POLAR,
};
use console_core::orbit::{OrbitControls, Spherical};

fn settle(controls: &mut OrbitControls, camera: &mut PerspectiveCamera, frames: usize) {
    for _ in 0..frames {
        controls.update(camera);
    }
}

#[test]
fn spherical_round_trips_offsets() {
    let v = glam::Vec3::new(1.0, 2.0, 3.0);
    let back = Spherical::from_vec3(v).to_vec3();
    assert!((back - v).length() < 1e-5);
}

#[test]
fn first_update_pulls_camera_off_the_equator() {
    let mut camera = PerspectiveCamera::new(4.0 / 3.0);
    let mut controls = OrbitControls::default();
    assert!(controls.update(&mut camera));
    let s = Spherical::from_vec3(camera.position);
    assert!((s.phi - ORBIT_MAX_POLAR).abs() < 1e-4);
    assert!((s.radius - 4.0).abs() < 1e-4);
}

#[test]
fn dolly_is_clamped_to_distance_range() {
    let mut camera = PerspectiveCamera::new(1.0);
    let mut controls = OrbitControls::default();
    for _ in 0..100 {
        controls.dolly(-1.0);
    }
    controls.update(&mut camera);
    assert!((camera.position.length() - ORBIT_MIN_DISTANCE).abs() < 1e-4);

    for _ in 0..100 {
        controls.dolly(1.0);
    }
    controls.update(&mut camera);
    assert!((camera.position.length() - ORBIT_MAX_DISTANCE).abs() < 1e-4);
}

#[test]
fn dragging_up_stops_at_minimum_polar_angle() {
    let mut camera = PerspectiveCamera::new(1.0);
    let mut controls = OrbitControls::default();
    controls.rotate_by_pixels(0.0, 5000.0, 600.0);
    settle(&mut controls, &mut camera, 300);
    let s = Spherical::from_vec3(camera.position);
    assert!(s.phi >= ORBIT_MIN_POLAR - 1e-4);
    assert!((s.phi - ORBIT_MIN_POLAR).abs() < 1e-3);
}

#[test]
fn azimuth_is_clamped_both_ways() {
    let mut camera = PerspectiveCamera::new(1.0);
    let mut controls = OrbitControls::default();
    controls.rotate_by_pixels(5000.0, 0.0, 600.0);
    settle(&mut controls, &mut camera, 300);
    let theta = Spherical::from_vec3(camera.position).theta;
    assert!((theta - ORBIT_MIN_AZIMUTH).abs() < 1e-3);

    controls.rotate_by_pixels(-10000.0, 0.0, 600.0);
    settle(&mut controls, &mut camera, 300);
    let theta = Spherical::from_vec3(camera.position).theta;
    assert!((theta - ORBIT_MAX_AZIMUTH).abs() < 1e-3);
}

#[test]
fn disabled_controls_ignore_input() {
    let mut camera = PerspectiveCamera::new(1.0);
    let mut controls = OrbitControls::default();
    controls.update(&mut camera);
    let before = camera.position;

    controls.enabled = false;
    controls.rotate_by_pixels(300.0, 200.0, 600.0);
    controls.dolly(-1.0);
    assert!(!controls.update(&mut camera));
    assert!((camera.position - before).length() < 1e-5);
}

#[test]
fn damping_keeps_settling_after_disable() {
    let mut camera = PerspectiveCamera::new(1.0);
    let mut controls = OrbitControls::default();
    controls.update(&mut camera);
    controls.rotate_by_pixels(200.0, 0.0, 600.0);
    controls.update(&mut camera);

    controls.enabled = false;
    let before = camera.position;
    assert!(controls.update(&mut camera));
    assert!((camera.position - before).length() > 1e-4);
}

#[test]
fn zero_height_viewport_is_ignored() {
    let mut camera = PerspectiveCamera::new(1.0);
    let mut controls = OrbitControls::default();
    controls.update(&mut camera);
    let before = camera.position;
    controls.rotate_by_pixels(100.0, 100.0, 0.0);
    controls.update(&mut camera);
    assert!((camera.position - before).length() < 1e-5);
}
