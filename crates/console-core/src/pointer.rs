use glam::Vec2;

/// Last known cursor position in normalized device coordinates.
#[derive(Default, Clone, Copy, Debug, PartialEq)]
pub struct PointerState {
    pub ndc: Vec2,
}

impl PointerState {
    pub fn set_client(&mut self, client_x: f32, client_y: f32, width: f32, height: f32) {
        self.ndc = client_to_ndc(client_x, client_y, width, height);
    }
}

/// Orbit drag in progress on the canvas.
#[derive(Default, Clone, Copy, Debug)]
pub struct DragState {
    pub active: bool,
    pub pointer_id: i32,
    pub last: Vec2,
}

/// Viewport pixels to NDC: x right, y up, both in [-1, 1].
#[inline]
pub fn client_to_ndc(client_x: f32, client_y: f32, width: f32, height: f32) -> Vec2 {
    if width <= 0.0 || height <= 0.0 {
        return Vec2::ZERO;
    }
    Vec2::new(
        (client_x / width) * 2.0 - 1.0,
        -(client_y / height) * 2.0 + 1.0,
    )
}
