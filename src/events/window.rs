use crate::css3d::CssRenderer;
use crate::dom;
use console_core::{LoadToken, Stage};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Keep camera aspect, canvas backing size and the CSS layer in step with
/// the window. The GPU surface follows the canvas size on the next frame.
pub fn wire_resize(
    canvas: web::HtmlCanvasElement,
    stage: Rc<RefCell<Stage>>,
    css: Rc<RefCell<CssRenderer>>,
) {
    let closure = Closure::wrap(Box::new(move || {
        let Some(window) = web::window() else {
            return;
        };
        let (w, h) = dom::viewport_size(&window);
        dom::sync_canvas_backing_size(&window, &canvas);
        stage.borrow_mut().resize(w, h);
        css.borrow_mut().set_size(w, h);
        log::debug!("[resize] {}x{} css px", w, h);
    }) as Box<dyn FnMut()>);
    if let Some(wnd) = web::window() {
        _ = wnd.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
    }
    closure.forget();
}

/// Cancel the in-flight model load when the page is unloaded. A page that
/// enters the back/forward cache keeps its load running.
pub fn wire_pagehide(token: LoadToken) {
    let closure = Closure::wrap(Box::new(move |ev: web::PageTransitionEvent| {
        if token.page_hidden(ev.persisted()) {
            log::info!("[model] page unloaded; cancelling load");
        }
    }) as Box<dyn FnMut(_)>);
    if let Some(wnd) = web::window() {
        _ = wnd.add_event_listener_with_callback("pagehide", closure.as_ref().unchecked_ref());
    }
    closure.forget();
}
