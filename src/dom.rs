use crate::constants::{backing_size, CANVAS_Z_INDEX};
use anyhow::anyhow;
use wasm_bindgen::JsCast;
use web_sys as web;

#[inline]
pub fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

/// Layout viewport size in CSS pixels.
pub fn viewport_size(window: &web::Window) -> (f32, f32) {
    let w = window
        .inner_width()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(1.0);
    let h = window
        .inner_height()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(1.0);
    (w.max(1.0) as f32, h.max(1.0) as f32)
}

pub fn element_by_id(document: &web::Document, id: &str) -> anyhow::Result<web::HtmlElement> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| anyhow!("missing #{}", id))?
        .dyn_into::<web::HtmlElement>()
        .map_err(|e| anyhow!("#{} is not an HtmlElement: {:?}", id, e))
}

pub fn create_html_element(
    document: &web::Document,
    tag: &str,
) -> anyhow::Result<web::HtmlElement> {
    document
        .create_element(tag)
        .map_err(|e| anyhow!("create <{}>: {:?}", tag, e))?
        .dyn_into::<web::HtmlElement>()
        .map_err(|e| anyhow!("<{}> is not an HtmlElement: {:?}", tag, e))
}

/// Apply `(property, value)` pairs to an element's inline style.
pub fn set_styles(el: &web::HtmlElement, styles: &[(&str, &str)]) {
    let style = el.style();
    for (prop, value) in styles {
        _ = style.set_property(prop, value);
    }
}

/// Canvas filling the viewport, appended to `container`.
pub fn create_canvas(
    document: &web::Document,
    container: &web::HtmlElement,
) -> anyhow::Result<web::HtmlCanvasElement> {
    let canvas = document
        .create_element("canvas")
        .map_err(|e| anyhow!("create canvas: {:?}", e))?
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow!("{:?}", e))?;
    set_styles(
        &canvas,
        &[
            ("position", "absolute"),
            ("top", "0"),
            ("left", "0"),
            ("width", "100%"),
            ("height", "100%"),
            ("display", "block"),
            ("z-index", CANVAS_Z_INDEX),
        ],
    );
    container
        .append_child(&canvas)
        .map_err(|e| anyhow!("append canvas: {:?}", e))?;
    Ok(canvas)
}

pub fn sync_canvas_backing_size(window: &web::Window, canvas: &web::HtmlCanvasElement) {
    let (w, h) = viewport_size(window);
    let (w_px, h_px) = backing_size(w as f64, h as f64, window.device_pixel_ratio());
    if canvas.width() != w_px || canvas.height() != h_px {
        canvas.set_width(w_px);
        canvas.set_height(h_px);
    }
}
