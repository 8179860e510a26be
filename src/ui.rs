use crate::constants::{TOGGLE_ICON_ID, TOGGLE_TEXT_ID};
use console_core::mode::{ModeChrome, ViewMode, FLAT_MODE_CLASS};
use wasm_bindgen::JsCast;
use web_sys as web;

/// Flip the `flat-mode` class on `<body>` and report the resulting mode.
pub fn toggle_body_mode(document: &web::Document) -> Option<ViewMode> {
    let body = document.body()?;
    let classes = body.class_list();
    let flat = classes.toggle(FLAT_MODE_CLASS).ok()?;
    Some(ViewMode::from_flat(flat))
}

/// Update the toggle button's icon and label. Missing elements are skipped.
pub fn apply_chrome(document: &web::Document, chrome: &ModeChrome) {
    if let Some(icon) = document.get_element_by_id(TOGGLE_ICON_ID) {
        icon.set_class_name(chrome.icon_class);
    }
    if let Some(text) = document
        .get_element_by_id(TOGGLE_TEXT_ID)
        .and_then(|el| el.dyn_into::<web::HtmlElement>().ok())
    {
        text.set_inner_text(chrome.label);
    }
}
