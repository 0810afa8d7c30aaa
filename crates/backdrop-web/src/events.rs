use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// An attached DOM listener that can be detached again.
pub struct Listener {
    target: web::EventTarget,
    kind: &'static str,
    closure: Closure<dyn FnMut(web::Event)>,
}

impl Listener {
    pub fn attach(
        target: &web::EventTarget,
        kind: &'static str,
        handler: impl FnMut(web::Event) + 'static,
    ) -> anyhow::Result<Self> {
        let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(web::Event)>);
        target
            .add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref())
            .map_err(crate::dom::js_err)?;
        Ok(Self {
            target: target.clone(),
            kind,
            closure,
        })
    }

    pub fn remove(self) {
        if let Err(e) = self
            .target
            .remove_event_listener_with_callback(self.kind, self.closure.as_ref().unchecked_ref())
        {
            log::warn!("[events] removing {} listener failed: {:?}", self.kind, e);
        }
    }
}

/// Client coordinates of a pointer event.
#[inline]
pub fn client_position(ev: &web::Event) -> Option<glam::Vec2> {
    let ev = ev.dyn_ref::<web::MouseEvent>()?;
    Some(glam::Vec2::new(ev.client_x() as f32, ev.client_y() as f32))
}
