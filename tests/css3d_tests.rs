// Host-side tests for the CSS matrix3d projection strings.

use console_core::camera::PerspectiveCamera;
use console_core::css3d::{
    camera_frame, camera_matrix_css, epsilon, focal_length_px, object_matrix_css,
};
use glam::{Mat4, Vec3};

#[test]
fn tiny_values_snap_to_zero() {
    assert_eq!(epsilon(1e-12), 0.0);
    assert_eq!(epsilon(-1e-11), 0.0);
    assert_eq!(epsilon(0.25), 0.25);
}

#[test]
fn identity_object_flips_y_and_centres_element() {
    assert_eq!(
        object_matrix_css(&Mat4::IDENTITY),
        "translate(-50%,-50%)matrix3d(1,0,0,0,0,-1,0,0,0,0,1,0,0,0,0,1)"
    );
}

#[test]
fn identity_camera_flips_y_row() {
    assert_eq!(
        camera_matrix_css(&Mat4::IDENTITY),
        "matrix3d(1,0,0,0,0,-1,0,0,0,0,1,0,0,0,0,1)"
    );
}

#[test]
fn camera_translation_y_is_negated() {
    let view = Mat4::from_translation(Vec3::new(2.0, 3.0, -4.0));
    assert_eq!(
        camera_matrix_css(&view),
        "matrix3d(1,0,0,0,0,-1,0,0,0,0,1,0,2,-3,-4,1)"
    );
}

#[test]
fn focal_length_matches_vertical_fov() {
    let camera = PerspectiveCamera::new(800.0 / 600.0);
    let expected = 300.0 / 37.5f32.to_radians().tan();
    assert!((focal_length_px(&camera, 600.0) - expected).abs() < 1e-2);
}

#[test]
fn camera_frame_pushes_back_and_recentres() {
    let camera = PerspectiveCamera::new(800.0 / 600.0);
    let frame = camera_frame(&camera, 800.0, 600.0);
    assert_eq!(frame.perspective_px, focal_length_px(&camera, 600.0));
    assert!(frame
        .transform
        .starts_with(&format!("translateZ({}px)matrix3d(", frame.perspective_px)));
    assert!(frame.transform.ends_with("translate(400px,300px)"));
}
