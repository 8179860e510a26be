// Page wiring and asset locations for the web frontend.

pub const CANVAS_CONTAINER_ID: &str = "canvas-container";
pub const CSS_CONTAINER_ID: &str = "css-container";
pub const TOGGLE_ICON_ID: &str = "toggle-icon";
pub const TOGGLE_TEXT_ID: &str = "toggle-text";
/// Global the page's toggle button calls from its inline `onclick`.
pub const TOGGLE_GLOBAL_NAME: &str = "toggleDimensions";

pub const MODEL_URL: &str = "game_console.glb";
pub const DOCUMENT_URL: &str = "portfolio.html";

/// Multisampling of the lit scene pass; resolved into the HDR target.
pub const SCENE_MSAA_SAMPLES: u32 = 4;

pub const CANVAS_Z_INDEX: &str = "0";
pub const CSS_LAYER_Z_INDEX: &str = "1";

/// Device pixels per CSS pixel, clamped so huge DPR screens do not
/// allocate oversized HDR targets.
pub const MAX_DEVICE_PIXEL_RATIO: f64 = 2.0;

#[inline]
pub fn backing_size(css_width: f64, css_height: f64, dpr: f64) -> (u32, u32) {
    let dpr = dpr.clamp(1.0, MAX_DEVICE_PIXEL_RATIO);
    let w = (css_width * dpr).round().max(1.0) as u32;
    let h = (css_height * dpr).round().max(1.0) as u32;
    (w, h)
}
