use anyhow::Result;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys as web;

fn js_err(e: wasm_bindgen::JsValue) -> anyhow::Error {
    anyhow::anyhow!("{:?}", e)
}

/// GET `url` and return the body bytes; non-2xx statuses are errors.
pub async fn fetch_bytes(url: &str) -> Result<Vec<u8>> {
    let win = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let resp_val = JsFuture::from(win.fetch_with_str(url))
        .await
        .map_err(js_err)?;
    let resp: web::Response = resp_val.dyn_into().map_err(js_err)?;

    if !resp.ok() {
        anyhow::bail!("HTTP {} {} for {}", resp.status(), resp.status_text(), url);
    }

    let buf_promise = resp.array_buffer().map_err(js_err)?;
    let buf_val = JsFuture::from(buf_promise).await.map_err(js_err)?;
    let bytes = js_sys::Uint8Array::new(&buf_val);
    let mut out = vec![0u8; bytes.length() as usize];
    bytes.copy_to(&mut out);
    Ok(out)
}
