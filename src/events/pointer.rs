use crate::embed;
use crate::overlay::OverlayElements;
use console_core::pointer::DragState;
use console_core::Stage;
use glam::Vec2;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

#[derive(Clone)]
pub struct InputWiring {
    pub canvas: web::HtmlCanvasElement,
    pub stage: Rc<RefCell<Stage>>,
    pub drag: Rc<RefCell<DragState>>,
    pub overlay: Rc<OverlayElements>,
}

pub fn wire_input_handlers(w: InputWiring) {
    wire_mousemove(&w);
    wire_click(&w);
    wire_pointerdown(&w);
    wire_pointermove(&w);
    wire_pointerup(&w);
    wire_wheel(&w);
}

fn wire_mousemove(w: &InputWiring) {
    let w = w.clone();
    let closure = Closure::wrap(Box::new(move |ev: web::MouseEvent| {
        w.stage
            .borrow_mut()
            .pointer_moved(ev.client_x() as f32, ev.client_y() as f32);
    }) as Box<dyn FnMut(_)>);
    if let Some(wnd) = web::window() {
        _ = wnd.add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref());
    }
    closure.forget();
}

fn wire_click(w: &InputWiring) {
    let w = w.clone();
    let closure = Closure::wrap(Box::new(move |ev: web::MouseEvent| {
        let action = w
            .stage
            .borrow_mut()
            .click(ev.client_x() as f32, ev.client_y() as f32);
        if let Some(action) = action {
            embed::apply(&w.overlay.iframe, action);
        }
    }) as Box<dyn FnMut(_)>);
    if let Some(wnd) = web::window() {
        _ = wnd.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
    }
    closure.forget();
}

fn wire_pointerdown(w: &InputWiring) {
    let w = w.clone();
    let canvas_for_listener = w.canvas.clone();
    let closure = Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        if !w.stage.borrow().controls.enabled {
            return;
        }
        {
            let mut drag = w.drag.borrow_mut();
            drag.active = true;
            drag.pointer_id = ev.pointer_id();
            drag.last = Vec2::new(ev.client_x() as f32, ev.client_y() as f32);
        }
        _ = w.canvas.set_pointer_capture(ev.pointer_id());
    }) as Box<dyn FnMut(_)>);
    _ = canvas_for_listener
        .add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref());
    closure.forget();
}

fn wire_pointermove(w: &InputWiring) {
    let w = w.clone();
    let canvas_for_listener = w.canvas.clone();
    let closure = Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        let delta = {
            let mut drag = w.drag.borrow_mut();
            if !drag.active || drag.pointer_id != ev.pointer_id() {
                return;
            }
            let pos = Vec2::new(ev.client_x() as f32, ev.client_y() as f32);
            let delta = pos - drag.last;
            drag.last = pos;
            delta
        };
        let mut stage = w.stage.borrow_mut();
        let height = stage.viewport().y;
        stage.controls.rotate_by_pixels(delta.x, delta.y, height);
    }) as Box<dyn FnMut(_)>);
    _ = canvas_for_listener
        .add_event_listener_with_callback("pointermove", closure.as_ref().unchecked_ref());
    closure.forget();
}

fn wire_pointerup(w: &InputWiring) {
    let canvas_for_listener = w.canvas.clone();
    for event in ["pointerup", "pointercancel"] {
        let w = w.clone();
        let closure = Closure::wrap(Box::new(move |ev: web::PointerEvent| {
            let mut drag = w.drag.borrow_mut();
            if drag.active && drag.pointer_id == ev.pointer_id() {
                drag.active = false;
                _ = w.canvas.release_pointer_capture(ev.pointer_id());
            }
        }) as Box<dyn FnMut(_)>);
        _ = canvas_for_listener
            .add_event_listener_with_callback(event, closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

fn wire_wheel(w: &InputWiring) {
    let w = w.clone();
    let canvas_for_listener = w.canvas.clone();
    let closure = Closure::wrap(Box::new(move |ev: web::WheelEvent| {
        let mut stage = w.stage.borrow_mut();
        if !stage.controls.enabled {
            return;
        }
        stage.controls.dolly(ev.delta_y() as f32);
        ev.prevent_default();
    }) as Box<dyn FnMut(_)>);
    _ = canvas_for_listener
        .add_event_listener_with_callback("wheel", closure.as_ref().unchecked_ref());
    closure.forget();
}
