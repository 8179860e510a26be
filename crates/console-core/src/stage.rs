//! Application context: everything the frame loop and the event handlers
//! share, owned in one place.

use crate::camera::PerspectiveCamera;
use crate::constants::{
    overlay_position, overlay_rotation_rad, screen_light_position, OVERLAY_HEIGHT_PX,
    OVERLAY_SCALE, OVERLAY_WIDTH_PX,
};
use crate::dispatch::{self, ControlAction};
use crate::loader::ModelAsset;
use crate::mode::{ModeChrome, ViewMode};
use crate::orbit::OrbitControls;
use crate::pointer::PointerState;
use crate::raycast;
use crate::scene::{NodeId, Scene, Transform};
use crate::view::{self, OverlayVisibility, Parallax};
use glam::{Mat4, Vec2, Vec3};

pub const CONSOLE_GROUP_NAME: &str = "ConsoleGroup";
pub const OVERLAY_NODE_NAME: &str = "ScreenOverlay";
pub const SCREEN_LIGHT_NAME: &str = "ScreenLight";

/// The DOM plane placed on the console screen.
#[derive(Clone, Debug)]
pub struct OverlayPlane {
    pub node: NodeId,
    pub width_px: u32,
    pub height_px: u32,
    pub visibility: OverlayVisibility,
    pub hovered: bool,
}

impl OverlayPlane {
    #[inline]
    pub fn opacity(&self) -> f32 {
        self.visibility.opacity()
    }
}

/// What the frame loop needs to push to the renderers after an update.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameUpdate {
    pub overlay_opacity: f32,
    pub facing_dot: f32,
}

pub struct Stage {
    pub scene: Scene,
    pub console_group: NodeId,
    pub screen_light: NodeId,
    pub overlay: OverlayPlane,
    pub camera: PerspectiveCamera,
    pub controls: OrbitControls,
    pub pointer: PointerState,
    pub parallax: Parallax,
    model: Option<NodeId>,
    mode: ViewMode,
    viewport: Vec2,
}

impl Stage {
    pub fn new(width: f32, height: f32) -> Self {
        let mut scene = Scene::new("Scene");
        let root = scene.root();
        let console_group = scene.add_node(root, CONSOLE_GROUP_NAME, Transform::IDENTITY);
        let screen_light = scene.add_node(
            console_group,
            SCREEN_LIGHT_NAME,
            Transform::from_translation(screen_light_position()),
        );
        let overlay_node = scene.add_node(
            console_group,
            OVERLAY_NODE_NAME,
            Transform::from_euler_xyz(
                overlay_position(),
                overlay_rotation_rad(),
                Vec3::splat(OVERLAY_SCALE),
            ),
        );

        let mut camera = PerspectiveCamera::new(1.0);
        camera.set_viewport(width, height);

        Self {
            scene,
            console_group,
            screen_light,
            overlay: OverlayPlane {
                node: overlay_node,
                width_px: OVERLAY_WIDTH_PX,
                height_px: OVERLAY_HEIGHT_PX,
                visibility: OverlayVisibility::Hidden,
                hovered: false,
            },
            camera,
            controls: OrbitControls::default(),
            pointer: PointerState::default(),
            parallax: Parallax::default(),
            model: None,
            mode: ViewMode::Immersive,
            viewport: Vec2::new(width, height),
        }
    }

    #[inline]
    pub fn model(&self) -> Option<NodeId> {
        self.model
    }

    #[inline]
    pub fn mode(&self) -> ViewMode {
        self.mode
    }

    #[inline]
    pub fn viewport(&self) -> Vec2 {
        self.viewport
    }

    /// Put a loaded model under the console group, replacing any earlier one.
    pub fn attach_model(&mut self, asset: ModelAsset) -> NodeId {
        if let Some(old) = self.model.take() {
            self.scene.detach(old);
        }
        let id = self.scene.graft(asset.scene, self.console_group);
        self.model = Some(id);
        id
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.viewport = Vec2::new(width, height);
        self.camera.set_viewport(width, height);
    }

    pub fn pointer_moved(&mut self, client_x: f32, client_y: f32) {
        self.pointer
            .set_client(client_x, client_y, self.viewport.x, self.viewport.y);
    }

    /// One animation step: orbit, parallax, then overlay visibility.
    pub fn frame(&mut self) -> FrameUpdate {
        self.controls.update(&mut self.camera);

        let rotation = self.parallax.step(self.pointer.ndc);
        self.scene.node_mut(self.console_group).transform.rotation = rotation;

        let dot = view::facing_dot(rotation, self.camera.world_direction());
        self.overlay.visibility = view::overlay_visibility(dot);

        FrameUpdate {
            overlay_opacity: self.overlay.opacity(),
            facing_dot: dot,
        }
    }

    /// Resolve a click at viewport pixel coordinates into a document action.
    pub fn click(&mut self, client_x: f32, client_y: f32) -> Option<ControlAction> {
        self.pointer_moved(client_x, client_y);
        let ray = self.camera.ray_from_ndc(self.pointer.ndc);
        let hits = raycast::intersect_descendants(&self.scene, self.console_group, &ray);
        if hits.is_empty() {
            return None;
        }
        dispatch::dispatch(&self.scene, &hits)
    }

    pub fn set_overlay_hovered(&mut self, hovered: bool) {
        self.overlay.hovered = hovered;
        self.sync_controls();
    }

    pub fn set_mode(&mut self, mode: ViewMode) -> ModeChrome {
        self.mode = mode;
        self.sync_controls();
        mode.chrome()
    }

    pub fn toggle_mode(&mut self) -> ModeChrome {
        self.set_mode(self.mode.toggled())
    }

    fn sync_controls(&mut self) {
        self.controls.enabled = self.mode.chrome().controls_enabled && !self.overlay.hovered;
    }

    pub fn overlay_world_matrix(&self) -> Mat4 {
        self.scene.world_matrix(self.overlay.node)
    }

    pub fn screen_light_world_position(&self) -> Vec3 {
        self.scene.world_matrix(self.screen_light).w_axis.truncate()
    }
}
