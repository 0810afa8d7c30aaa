use backdrop_core::{ContainerRect, Viewport};
use wasm_bindgen::JsCast;
use web_sys as web;

#[inline]
pub fn window_document() -> Option<(web::Window, web::Document)> {
    let window = web::window()?;
    let document = window.document()?;
    Some((window, document))
}

#[inline]
pub fn js_err(e: wasm_bindgen::JsValue) -> anyhow::Error {
    anyhow::anyhow!(format!("{:?}", e))
}

const LAYER_STYLE: &str =
    "position:absolute;inset:0;width:100%;height:100%;display:block;pointer-events:none;";

/// The two stacked canvases living inside the host container.
pub struct Layers {
    pub container: web::HtmlElement,
    pub warp: web::HtmlCanvasElement,
    pub particles: web::HtmlCanvasElement,
    saved_position: String,
    saved_touch_action: String,
}

impl Layers {
    /// Append the warp canvas, then the particle canvas above it. On failure
    /// the container is left as it was found.
    pub fn create(document: &web::Document, container: &web::HtmlElement) -> anyhow::Result<Self> {
        let style = container.style();
        let saved_position = style.get_property_value("position").map_err(js_err)?;
        let saved_touch_action = style.get_property_value("touch-action").map_err(js_err)?;
        let layers = Self {
            container: container.clone(),
            warp: make_canvas(document, "backdrop-warp", 0)?,
            particles: make_canvas(document, "backdrop-particles", 1)?,
            saved_position,
            saved_touch_action,
        };
        if let Err(e) = layers.attach() {
            layers.detach();
            return Err(e);
        }
        Ok(layers)
    }

    fn attach(&self) -> anyhow::Result<()> {
        let style = self.container.style();
        if self.saved_position.is_empty() {
            style.set_property("position", "relative").map_err(js_err)?;
        }
        style.set_property("touch-action", "none").map_err(js_err)?;
        self.container.append_child(&self.warp).map_err(js_err)?;
        self.container.append_child(&self.particles).map_err(js_err)?;
        Ok(())
    }

    pub fn container_rect(&self) -> ContainerRect {
        let rect = self.container.get_bounding_client_rect();
        ContainerRect::new(
            rect.left() as f32,
            rect.top() as f32,
            rect.width() as f32,
            rect.height() as f32,
        )
    }

    /// Container size in CSS pixels.
    pub fn viewport(&self) -> Viewport {
        Viewport::new(
            self.container.client_width() as f32,
            self.container.client_height() as f32,
        )
    }

    /// Match canvas backing sizes to the container: the image layer at the
    /// device pixel ratio (capped at 2), the particle layer at one pixel per
    /// CSS pixel so sprite sizes stay in CSS units.
    pub fn sync_backing_sizes(&self) {
        let dpr = web::window().map(|w| w.device_pixel_ratio()).unwrap_or(1.0);
        let vp = self.viewport();
        set_backing_size(&self.warp, vp, dpr.min(2.0));
        set_backing_size(&self.particles, vp, 1.0);
    }

    pub fn detach(&self) {
        self.warp.remove();
        self.particles.remove();
        let style = self.container.style();
        restore_property(&style, "position", &self.saved_position);
        restore_property(&style, "touch-action", &self.saved_touch_action);
    }
}

fn make_canvas(
    document: &web::Document,
    class: &str,
    z_index: u32,
) -> anyhow::Result<web::HtmlCanvasElement> {
    let canvas: web::HtmlCanvasElement = document
        .create_element("canvas")
        .map_err(js_err)?
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;
    canvas.set_class_name(class);
    canvas
        .set_attribute("style", &format!("{}z-index:{};", LAYER_STYLE, z_index))
        .map_err(js_err)?;
    canvas.set_width(1);
    canvas.set_height(1);
    Ok(canvas)
}

fn set_backing_size(canvas: &web::HtmlCanvasElement, vp: Viewport, scale: f64) {
    // zero-area containers keep the previous size
    if vp.aspect().is_none() {
        return;
    }
    let w = (vp.width as f64 * scale) as u32;
    let h = (vp.height as f64 * scale) as u32;
    canvas.set_width(w.max(1));
    canvas.set_height(h.max(1));
}

fn restore_property(style: &web::CssStyleDeclaration, name: &str, value: &str) {
    let result = if value.is_empty() {
        style.remove_property(name).map(|_| ())
    } else {
        style.set_property(name, value)
    };
    if let Err(e) = result {
        log::warn!("[dom] restoring {} failed: {:?}", name, e);
    }
}
