// Host-side tests for the application stage: modes, model attachment,
// per-frame updates and end-to-end clicks on the console fixture.

mod support;

use console_core::loader::{load_glb, MODEL_ROOT_NAME};
use console_core::mode::ViewMode;
use console_core::stage::{Stage, OVERLAY_NODE_NAME};
use console_core::ControlAction;
use glam::Vec3;
use support::console_glb;

const W: f32 = 800.0;
const H: f32 = 600.0;

fn stage_with_console() -> Stage {
    let mut stage = Stage::new(W, H);
    stage.attach_model(load_glb(&console_glb()).expect("fixture loads"));
    stage
}

/// Client pixel coordinates of a world point for the current camera.
fn to_client(stage: &Stage, world: Vec3) -> (f32, f32) {
    let ndc = stage.camera.view_projection().project_point3(world);
    ((ndc.x + 1.0) * 0.5 * W, (1.0 - ndc.y) * 0.5 * H)
}

fn click_at(stage: &mut Stage, world: Vec3) -> Option<ControlAction> {
    let (x, y) = to_client(stage, world);
    stage.click(x, y)
}

#[test]
fn toggling_twice_restores_immersive_mode() {
    let mut stage = Stage::new(W, H);
    assert_eq!(stage.mode(), ViewMode::Immersive);

    let flat = stage.toggle_mode();
    assert_eq!(stage.mode(), ViewMode::Flat);
    assert_eq!(flat.icon_class, "fas fa-cube");
    assert_eq!(flat.label, "RETURN TO 3D");
    assert!(!stage.controls.enabled);

    let back = stage.toggle_mode();
    assert_eq!(stage.mode(), ViewMode::Immersive);
    assert_eq!(back.icon_class, "fas fa-expand");
    assert_eq!(back.label, "SWITCH TO 2D");
    assert!(stage.controls.enabled);
}

#[test]
fn hovering_the_overlay_suspends_orbit() {
    let mut stage = Stage::new(W, H);
    stage.set_overlay_hovered(true);
    assert!(!stage.controls.enabled);
    stage.set_overlay_hovered(false);
    assert!(stage.controls.enabled);

    // Leaving the overlay in flat mode keeps the controls off.
    stage.set_mode(ViewMode::Flat);
    stage.set_overlay_hovered(true);
    stage.set_overlay_hovered(false);
    assert!(!stage.controls.enabled);
}

#[test]
fn attaching_again_replaces_the_model() {
    let mut stage = Stage::new(W, H);
    let first = stage.attach_model(load_glb(&console_glb()).unwrap());
    let second = stage.attach_model(load_glb(&console_glb()).unwrap());

    assert_eq!(stage.model(), Some(second));
    assert!(!stage.scene.is_attached(first));
    assert!(stage.scene.is_attached(second));
    let models = stage
        .scene
        .node(stage.console_group)
        .children()
        .iter()
        .filter(|c| stage.scene.node(**c).name == MODEL_ROOT_NAME)
        .count();
    assert_eq!(models, 1);
}

#[test]
fn overlay_and_light_hang_under_the_console_group() {
    let stage = Stage::new(W, H);
    let overlay = stage.scene.find_by_name(OVERLAY_NODE_NAME).unwrap();
    assert_eq!(overlay, stage.overlay.node);
    assert_eq!(stage.scene.node(overlay).parent(), Some(stage.console_group));
    assert!((stage.screen_light_world_position().z - 0.41).abs() < 1e-5);
    assert_eq!((stage.overlay.width_px, stage.overlay.height_px), (500, 297));
}

#[test]
fn initial_frame_shows_the_overlay() {
    let mut stage = Stage::new(W, H);
    let update = stage.frame();
    assert_eq!(update.overlay_opacity, 1.0);
    assert!(update.facing_dot < -0.9);
}

#[test]
fn pointer_at_viewport_edge_tilts_the_group() {
    let mut stage = Stage::new(W, H);
    stage.pointer_moved(W, 0.0);
    stage.frame();
    let rotation = stage.scene.node(stage.console_group).transform.rotation;
    assert!(rotation.angle_between(glam::Quat::IDENTITY) > 0.0);
    assert!(stage.parallax.angles.x > 0.0 && stage.parallax.angles.y > 0.0);
}

#[test]
fn resize_updates_camera_aspect() {
    let mut stage = Stage::new(W, H);
    stage.resize(1000.0, 500.0);
    assert_eq!(stage.camera.aspect, 2.0);
    assert_eq!(stage.viewport(), glam::Vec2::new(1000.0, 500.0));
}

// After loading, the fixture is scaled by 2 and recentred by (-1.25, 0.25, 0):
// D-pad centre (2.75, 0.25, 0) with half size 0.5, Button A at (2.75, -1.75, 0),
// screen centre at (-1.25, 0.25, 0).

#[test]
fn clicking_dpad_halves_scrolls_up_and_down() {
    let mut stage = stage_with_console();
    assert_eq!(
        click_at(&mut stage, Vec3::new(2.75, 0.5, 0.0)),
        Some(ControlAction::ScrollBy { top: -100.0 })
    );
    assert_eq!(
        click_at(&mut stage, Vec3::new(2.75, 0.0, 0.0)),
        Some(ControlAction::ScrollBy { top: 100.0 })
    );
}

#[test]
fn clicking_button_a_activates_primary() {
    let mut stage = stage_with_console();
    assert_eq!(
        click_at(&mut stage, Vec3::new(2.75, -1.75, 0.0)),
        Some(ControlAction::ActivatePrimary)
    );
}

#[test]
fn clicking_screen_or_empty_space_does_nothing() {
    let mut stage = stage_with_console();
    assert_eq!(click_at(&mut stage, Vec3::new(-1.25, 0.25, 0.0)), None);
    assert_eq!(stage.click(5.0, 5.0), None);
}

#[test]
fn clicks_before_the_model_loads_do_nothing() {
    let mut stage = Stage::new(W, H);
    assert_eq!(stage.click(W * 0.5, H * 0.5), None);
}
