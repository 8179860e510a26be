use crate::css3d::CssRenderer;
use crate::overlay::OverlayElements;
use crate::render;
use console_core::Stage;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub struct FrameContext<'a> {
    pub stage: Rc<RefCell<Stage>>,
    pub canvas: web::HtmlCanvasElement,
    pub css: Rc<RefCell<CssRenderer>>,
    pub overlay: Rc<OverlayElements>,
    pub gpu: Option<render::GpuState<'a>>,
    pub last_visible: Option<bool>,
}

impl<'a> FrameContext<'a> {
    pub fn frame(&mut self) {
        let update = self.stage.borrow_mut().frame();
        self.overlay.set_opacity(update.overlay_opacity);

        let visible = update.overlay_opacity > 0.0;
        if self.last_visible != Some(visible) {
            log::debug!(
                "[view] overlay {} (facing dot {:.3})",
                if visible { "shown" } else { "hidden" },
                update.facing_dot
            );
            self.last_visible = Some(visible);
        }

        let stage = self.stage.borrow();
        if let Some(g) = &mut self.gpu {
            g.resize_if_needed(self.canvas.width(), self.canvas.height());
            match g.render(&stage) {
                Ok(()) => {}
                Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => g.reconfigure(),
                Err(e) => log::error!("render error: {:?}", e),
            }
        }
        self.css.borrow_mut().render(&stage, &self.overlay.container);
    }
}

pub async fn init_gpu(canvas: &web::HtmlCanvasElement) -> Option<render::GpuState<'static>> {
    // leak a canvas clone to satisfy 'static lifetime for surface
    let leaked_canvas = Box::leak(Box::new(canvas.clone()));
    match render::GpuState::new(leaked_canvas).await {
        Ok(g) => Some(g),
        Err(e) => {
            log::error!("WebGPU init error: {:?}", e);
            None
        }
    }
}

pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext<'static>>>) {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        frame_ctx.borrow_mut().frame();
        request_frame(&tick_clone);
    }) as Box<dyn FnMut()>));
    request_frame(&tick);
}

fn request_frame(tick: &Rc<RefCell<Option<Closure<dyn FnMut()>>>>) {
    let Some(w) = web::window() else {
        return;
    };
    if let Some(cb) = tick.borrow().as_ref() {
        _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}
