use crate::constants::CSS_LAYER_Z_INDEX;
use crate::dom::{create_html_element, set_styles};
use anyhow::anyhow;
use console_core::css3d::{camera_frame, object_matrix_css};
use console_core::Stage;
use web_sys as web;

/// Positions DOM planes with CSS 3D transforms so they line up with the
/// WebGPU scene. The viewport element carries the perspective and the camera
/// element the inverse camera transform; planes are children of the camera.
pub struct CssRenderer {
    viewport: web::HtmlElement,
    camera_el: web::HtmlElement,
    width: f32,
    height: f32,
    last_perspective: String,
    last_camera: String,
    last_object: String,
}

impl CssRenderer {
    pub fn new(document: &web::Document, container: &web::HtmlElement) -> anyhow::Result<Self> {
        let viewport = create_html_element(document, "div")?;
        set_styles(
            &viewport,
            &[
                ("position", "absolute"),
                ("top", "0"),
                ("left", "0"),
                ("overflow", "hidden"),
                ("pointer-events", "none"),
                ("z-index", CSS_LAYER_Z_INDEX),
            ],
        );
        let camera_el = create_html_element(document, "div")?;
        set_styles(
            &camera_el,
            &[
                ("transform-style", "preserve-3d"),
                ("pointer-events", "none"),
            ],
        );
        viewport
            .append_child(&camera_el)
            .map_err(|e| anyhow!("append css camera: {:?}", e))?;
        container
            .append_child(&viewport)
            .map_err(|e| anyhow!("append css viewport: {:?}", e))?;
        Ok(Self {
            viewport,
            camera_el,
            width: 0.0,
            height: 0.0,
            last_perspective: String::new(),
            last_camera: String::new(),
            last_object: String::new(),
        })
    }

    pub fn add_object(&self, el: &web::HtmlElement) -> anyhow::Result<()> {
        set_styles(el, &[("position", "absolute"), ("pointer-events", "auto")]);
        self.camera_el
            .append_child(el)
            .map_err(|e| anyhow!("append css object: {:?}", e))?;
        Ok(())
    }

    pub fn set_size(&mut self, width: f32, height: f32) {
        self.width = width;
        self.height = height;
        let w = format!("{}px", width);
        let h = format!("{}px", height);
        set_styles(&self.viewport, &[("width", w.as_str()), ("height", h.as_str())]);
        set_styles(&self.camera_el, &[("width", w.as_str()), ("height", h.as_str())]);
    }

    /// Push this frame's camera and overlay transforms, skipping style writes
    /// whose value did not change.
    pub fn render(&mut self, stage: &Stage, object: &web::HtmlElement) {
        let frame = camera_frame(&stage.camera, self.width, self.height);

        let perspective = format!("{}px", frame.perspective_px);
        if perspective != self.last_perspective {
            _ = self.viewport.style().set_property("perspective", &perspective);
            self.last_perspective = perspective;
        }
        if frame.transform != self.last_camera {
            _ = self.camera_el.style().set_property("transform", &frame.transform);
            self.last_camera = frame.transform;
        }

        let object_transform = object_matrix_css(&stage.overlay_world_matrix());
        if object_transform != self.last_object {
            _ = object.style().set_property("transform", &object_transform);
            self.last_object = object_transform;
        }
    }
}
