use crate::constants::DOCUMENT_URL;
use crate::dom::{create_html_element, set_styles};
use anyhow::anyhow;
use console_core::constants::{OVERLAY_BACKGROUND, OVERLAY_HEIGHT_PX, OVERLAY_WIDTH_PX};
use console_core::Stage;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// The DOM side of the screen overlay: a fixed-size div holding the iframe.
pub struct OverlayElements {
    pub container: web::HtmlElement,
    pub iframe: web::HtmlIFrameElement,
    opacity: Cell<f32>,
}

impl OverlayElements {
    pub fn build(document: &web::Document) -> anyhow::Result<Self> {
        let container = create_html_element(document, "div")?;
        let width = format!("{}px", OVERLAY_WIDTH_PX);
        let height = format!("{}px", OVERLAY_HEIGHT_PX);
        set_styles(
            &container,
            &[
                ("width", width.as_str()),
                ("height", height.as_str()),
                ("background", OVERLAY_BACKGROUND),
                ("pointer-events", "auto"),
                ("opacity", "0"),
            ],
        );

        let iframe = document
            .create_element("iframe")
            .map_err(|e| anyhow!("create iframe: {:?}", e))?
            .dyn_into::<web::HtmlIFrameElement>()
            .map_err(|e| anyhow!("{:?}", e))?;
        iframe.set_src(DOCUMENT_URL);
        set_styles(
            &iframe,
            &[
                ("width", "100%"),
                ("height", "100%"),
                ("border", "0px"),
                ("pointer-events", "auto"),
            ],
        );
        container
            .append_child(&iframe)
            .map_err(|e| anyhow!("append iframe: {:?}", e))?;

        Ok(Self {
            container,
            iframe,
            opacity: Cell::new(0.0),
        })
    }

    /// Write the opacity style only when it changes.
    pub fn set_opacity(&self, opacity: f32) {
        if self.opacity.get() == opacity {
            return;
        }
        self.opacity.set(opacity);
        _ = self
            .container
            .style()
            .set_property("opacity", &opacity.to_string());
    }
}

/// Hovering the overlay hands the pointer to the page and pauses orbiting.
pub fn wire_hover(overlay: &OverlayElements, stage: Rc<RefCell<Stage>>) {
    for (event, hovered) in [("mouseenter", true), ("mouseleave", false)] {
        let stage = stage.clone();
        let closure = Closure::wrap(Box::new(move || {
            stage.borrow_mut().set_overlay_hovered(hovered);
        }) as Box<dyn FnMut()>);
        _ = overlay
            .container
            .add_event_listener_with_callback(event, closure.as_ref().unchecked_ref());
        closure.forget();
    }
}
