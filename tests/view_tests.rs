// Host-side tests for the overlay facing rule, parallax and surface classes.

use console_core::material::{classify_surface, Material, SurfaceClass};
use console_core::view::{ease, facing_dot, overlay_visibility, OverlayVisibility, Parallax};
use glam::{Quat, Vec2, Vec3};

#[test]
fn facing_threshold_is_strict() {
    assert_eq!(overlay_visibility(-0.1), OverlayVisibility::Hidden);
    assert_eq!(overlay_visibility(-0.11), OverlayVisibility::Visible);
    assert_eq!(overlay_visibility(0.5), OverlayVisibility::Hidden);
    assert_eq!(OverlayVisibility::Visible.opacity(), 1.0);
    assert_eq!(OverlayVisibility::Hidden.opacity(), 0.0);
}

#[test]
fn screen_faces_a_camera_looking_down_negative_z() {
    let dot = facing_dot(Quat::IDENTITY, Vec3::NEG_Z);
    assert!((dot + 1.0).abs() < 1e-6);
    assert_eq!(overlay_visibility(dot), OverlayVisibility::Visible);

    // Group turned around: the screen points away from the camera.
    let turned = Quat::from_rotation_y(std::f32::consts::PI);
    assert_eq!(
        overlay_visibility(facing_dot(turned, Vec3::NEG_Z)),
        OverlayVisibility::Hidden
    );
}

#[test]
fn ease_moves_a_fixed_fraction() {
    assert!((ease(0.0, 1.0, 0.05) - 0.05).abs() < 1e-6);
    assert_eq!(ease(0.3, 0.3, 0.05), 0.3);
}

#[test]
fn parallax_target_maps_pointer_axes() {
    let t = Parallax::target(Vec2::new(1.0, -0.5));
    // x: tilt from pointer y, y: pan from pointer x
    assert!((t.x + 0.05).abs() < 1e-6);
    assert!((t.y - 0.1).abs() < 1e-6);
}

#[test]
fn parallax_approaches_target_monotonically_without_overshoot() {
    let mut p = Parallax::default();
    let pointer = Vec2::new(1.0, 1.0);
    let mut prev = p.angles;
    for _ in 0..400 {
        p.step(pointer);
        assert!(p.angles.x >= prev.x && p.angles.y >= prev.y);
        assert!(p.angles.x <= 0.1 + 1e-6 && p.angles.y <= 0.1 + 1e-6);
        prev = p.angles;
    }
    assert!((p.angles - Vec2::splat(0.1)).length() < 1e-4);
}

#[test]
fn parallax_rotation_is_euler_xyz() {
    let p = Parallax {
        angles: Vec2::new(0.05, -0.08),
    };
    let expected = Quat::from_euler(glam::EulerRot::XYZ, 0.05, -0.08, 0.0);
    assert!(p.rotation().abs_diff_eq(expected, 1e-6));
}

#[test]
fn brightness_threshold_is_strict() {
    assert_eq!(classify_surface(Vec3::new(1.0, 1.0, 0.0)), SurfaceClass::Matte);
    assert_eq!(classify_surface(Vec3::new(1.0, 1.0, 0.01)), SurfaceClass::Emissive);
    assert_eq!(classify_surface(Vec3::ZERO), SurfaceClass::Matte);
}

#[test]
fn prepare_resets_surface_parameters() {
    let mut m = Material {
        opacity: 0.3,
        transparent: true,
        roughness: 0.9,
        metalness: 0.0,
        ..Material::default()
    };
    m.base_color = glam::Vec4::new(0.9, 0.8, 0.7, 0.3);
    assert_eq!(m.prepare(), SurfaceClass::Emissive);
    assert_eq!(m.opacity, 1.0);
    assert!(!m.transparent);
    assert_eq!((m.roughness, m.metalness), (0.5, 0.5));
    assert!(m.is_emissive());
    assert!(!m.tone_mapped);

    m.base_color = glam::Vec4::new(0.5, 0.5, 0.5, 1.0);
    assert_eq!(m.prepare(), SurfaceClass::Matte);
    assert!(!m.is_emissive());
}
