//! Applies console control actions to the document inside the overlay iframe.

use console_core::constants::{PRESS_RESTORE_MS, PRESS_SCALE};
use console_core::dispatch::{resolve, DocumentQuery, PRIMARY_ACTION, SCROLL_CONTAINER};
use console_core::ControlAction;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

struct EmbeddedDocument(web::Document);

impl DocumentQuery for EmbeddedDocument {
    type Element = web::Element;

    fn by_id(&self, id: &str) -> Option<web::Element> {
        self.0.get_element_by_id(id)
    }

    fn select(&self, selector: &str) -> Option<web::Element> {
        self.0.query_selector(selector).ok().flatten()
    }

    fn body(&self) -> Option<web::Element> {
        self.0.body().map(Into::into)
    }
}

pub fn apply(iframe: &web::HtmlIFrameElement, action: ControlAction) {
    let Some(doc) = iframe.content_document() else {
        log::debug!("[click] iframe document not accessible; {:?} dropped", action);
        return;
    };
    let doc = EmbeddedDocument(doc);
    match action {
        ControlAction::ScrollBy { top } => {
            if let Some(el) = resolve(&doc, SCROLL_CONTAINER) {
                let opts = smooth_scroll(top);
                el.scroll_by_with_scroll_to_options(&opts);
            } else {
                log::debug!("[click] no scroll container");
            }
        }
        ControlAction::ScrollToTop => {
            if let Some(el) = resolve(&doc, SCROLL_CONTAINER) {
                let opts = smooth_scroll(0.0);
                el.scroll_to_with_scroll_to_options(&opts);
            } else {
                log::debug!("[click] no scroll container");
            }
        }
        ControlAction::ActivatePrimary => {
            match resolve(&doc, PRIMARY_ACTION).and_then(|el| el.dyn_into::<web::HtmlElement>().ok())
            {
                Some(button) => {
                    button.click();
                    press_visual(button);
                }
                None => log::debug!("[click] no primary action element"),
            }
        }
    }
}

fn smooth_scroll(top: f64) -> web::ScrollToOptions {
    let opts = web::ScrollToOptions::new();
    opts.set_top(top);
    opts.set_behavior(web::ScrollBehavior::Smooth);
    opts
}

/// Shrink the element briefly; the restore runs from a one-shot timeout.
fn press_visual(el: web::HtmlElement) {
    _ = el
        .style()
        .set_property("transform", &format!("scale({})", PRESS_SCALE));
    let Some(window) = web::window() else {
        return;
    };
    let restore = Closure::once_into_js(move || {
        _ = el.style().set_property("transform", "scale(1)");
    });
    _ = window.set_timeout_with_callback_and_timeout_and_arguments_0(
        restore.unchecked_ref(),
        PRESS_RESTORE_MS,
    );
}
