use crate::dom::js_err;
use backdrop_core::handoff;
use backdrop_render::LoadedImage;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys as web;

pub async fn fetch_image(url: &str) -> anyhow::Result<LoadedImage> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let resp = JsFuture::from(window.fetch_with_str(url))
        .await
        .map_err(js_err)?;
    let resp: web::Response = resp.dyn_into().map_err(js_err)?;
    if !resp.ok() {
        anyhow::bail!("HTTP {} fetching {}", resp.status(), url);
    }
    let buf = JsFuture::from(resp.array_buffer().map_err(js_err)?)
        .await
        .map_err(js_err)?;
    let bytes = js_sys::Uint8Array::new(&buf).to_vec();
    LoadedImage::decode(&bytes)
}

/// Single attempt; the outcome goes through `sender` and is silently dropped
/// when the mount is gone by then.
pub fn spawn_image_load(url: String, sender: handoff::Sender<LoadedImage>) {
    spawn_local(async move {
        match fetch_image(&url).await {
            Ok(image) => {
                if !sender.complete(image) {
                    log::debug!("[image] {} arrived after unmount", url);
                }
            }
            Err(e) => {
                log::warn!("[image] failed to load {}: {:?}", url, e);
                sender.fail(e.to_string());
            }
        }
    });
}
