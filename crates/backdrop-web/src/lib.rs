#![cfg(target_arch = "wasm32")]
mod controller;
pub mod dom;
mod events;
mod frame;
mod loader;

use backdrop_core::EffectConfig;
use controller::EffectController;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys as web;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("backdrop-web starting");
    Ok(())
}

/// Accepts an options object with camelCase keys, or a bare image URL string.
fn parse_options(options: &JsValue) -> anyhow::Result<EffectConfig> {
    if let Some(src) = options.as_string() {
        return Ok(EffectConfig::with_image(src));
    }
    if options.is_undefined() || options.is_null() {
        return Ok(EffectConfig::default());
    }
    let json: String = js_sys::JSON::stringify(options)
        .map_err(dom::js_err)?
        .into();
    Ok(serde_json::from_str(&json)?)
}

fn to_js(e: anyhow::Error) -> JsValue {
    JsError::new(&format!("{:#}", e)).into()
}

/// A running backdrop mounted into one container element.
#[wasm_bindgen]
pub struct Backdrop {
    controller: EffectController,
}

#[wasm_bindgen]
impl Backdrop {
    #[wasm_bindgen(constructor)]
    pub fn new(container: web::HtmlElement, options: JsValue) -> Result<Backdrop, JsValue> {
        let config = parse_options(&options).map_err(to_js)?;
        let controller = EffectController::new(container, config).map_err(to_js)?;
        Ok(Backdrop { controller })
    }

    /// Mount into the element with `id`. A missing element is logged and
    /// yields `undefined` rather than an exception.
    pub fn mount_by_id(id: &str, options: JsValue) -> Option<Backdrop> {
        let container = dom::window_document()
            .and_then(|(_, document)| document.get_element_by_id(id))
            .and_then(|el| el.dyn_into::<web::HtmlElement>().ok());
        let Some(container) = container else {
            log::warn!("[backdrop] no container element #{}", id);
            return None;
        };
        match Backdrop::new(container, options) {
            Ok(backdrop) => Some(backdrop),
            Err(e) => {
                log::error!("[backdrop] mount failed: {:?}", e);
                None
            }
        }
    }

    /// Remounts when the options differ from the current ones.
    pub fn set_options(&mut self, options: JsValue) -> Result<(), JsValue> {
        let config = parse_options(&options).map_err(to_js)?;
        self.controller.set_config(config).map_err(to_js)
    }

    pub fn unmount(&mut self) {
        self.controller.unmount();
    }

    #[wasm_bindgen(getter)]
    pub fn mounted(&self) -> bool {
        self.controller.is_mounted()
    }

    #[wasm_bindgen(getter, js_name = imageSrc)]
    pub fn image_src(&self) -> String {
        self.controller.config().image_src.clone()
    }
}
