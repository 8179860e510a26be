#![cfg(target_arch = "wasm32")]
mod constants;
mod css3d;
mod dom;
mod embed;
mod events;
mod fetch;
mod frame;
mod overlay;
mod render;
mod ui;

use console_core::{load_glb, LoadToken, Stage};
use constants::{CANVAS_CONTAINER_ID, CSS_CONTAINER_ID, MODEL_URL, TOGGLE_GLOBAL_NAME};
use css3d::CssRenderer;
use instant::Instant;
use overlay::OverlayElements;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

thread_local! {
    static STAGE: RefCell<Option<Rc<RefCell<Stage>>>> = const { RefCell::new(None) };
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("console-web starting");
    expose_toggle();

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

async fn init() -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;

    let canvas_container = dom::element_by_id(&document, CANVAS_CONTAINER_ID)?;
    let css_container = dom::element_by_id(&document, CSS_CONTAINER_ID)?;

    let canvas = dom::create_canvas(&document, &canvas_container)?;
    dom::sync_canvas_backing_size(&window, &canvas);
    let (width, height) = dom::viewport_size(&window);

    let stage = Rc::new(RefCell::new(Stage::new(width, height)));
    STAGE.with(|s| *s.borrow_mut() = Some(stage.clone()));

    let mut css = CssRenderer::new(&document, &css_container)?;
    css.set_size(width, height);
    let overlay = Rc::new(OverlayElements::build(&document)?);
    css.add_object(&overlay.container)?;
    overlay::wire_hover(&overlay, stage.clone());
    let css = Rc::new(RefCell::new(css));

    let token = LoadToken::new();
    events::wire_pagehide(token.clone());
    spawn_local(load_model(stage.clone(), token));

    events::wire_resize(canvas.clone(), stage.clone(), css.clone());
    events::wire_input_handlers(events::InputWiring {
        canvas: canvas.clone(),
        stage: stage.clone(),
        drag: Rc::new(RefCell::new(Default::default())),
        overlay: overlay.clone(),
    });

    let gpu = frame::init_gpu(&canvas).await;
    if gpu.is_none() {
        log::warn!("[gpu] unavailable; only the document overlay will render");
    }
    let frame_ctx = Rc::new(RefCell::new(frame::FrameContext {
        stage,
        canvas,
        css,
        overlay,
        gpu,
        last_visible: None,
    }));
    frame::start_loop(frame_ctx);
    log::info!("console-web ready ({}x{})", width, height);
    Ok(())
}

async fn load_model(stage: Rc<RefCell<Stage>>, token: LoadToken) {
    let started = Instant::now();
    let result = async {
        let bytes = fetch::fetch_bytes(MODEL_URL).await?;
        log::info!("[model] fetched {} ({} bytes)", MODEL_URL, bytes.len());
        Ok::<_, anyhow::Error>(load_glb(&bytes)?)
    }
    .await;

    if token.is_cancelled() {
        log::info!("[model] load cancelled; result discarded");
        return;
    }
    match result {
        Ok(asset) => {
            let stats = asset.stats.clone();
            stage.borrow_mut().attach_model(asset);
            log::info!(
                "[model] ready in {:?}: {} meshes, {} triangles, {} emissive, {} controls",
                started.elapsed(),
                stats.meshes,
                stats.triangles,
                stats.emissive_surfaces,
                stats.controls
            );
        }
        Err(e) => log::error!("[model] load failed: {:?}", e),
    }
}

/// Make the toggle reachable as `window.toggleDimensions` for inline handlers.
fn expose_toggle() {
    let Some(window) = web::window() else {
        return;
    };
    let toggle = Closure::wrap(Box::new(toggle_dimensions) as Box<dyn FnMut()>);
    if let Err(e) = js_sys::Reflect::set(
        &window,
        &JsValue::from_str(TOGGLE_GLOBAL_NAME),
        toggle.as_ref(),
    ) {
        log::warn!("[mode] could not install window.{}: {:?}", TOGGLE_GLOBAL_NAME, e);
    }
    toggle.forget();
}

/// Switch between the 3D console and the flat page layout.
#[wasm_bindgen(js_name = toggleDimensions)]
pub fn toggle_dimensions() {
    let Some(document) = dom::window_document() else {
        return;
    };
    let Some(mode) = ui::toggle_body_mode(&document) else {
        return;
    };
    let chrome = STAGE
        .with(|s| s.borrow().as_ref().map(|stage| stage.borrow_mut().set_mode(mode)))
        .unwrap_or_else(|| mode.chrome());
    ui::apply_chrome(&document, &chrome);
    log::info!("[mode] {:?}", mode);
}
