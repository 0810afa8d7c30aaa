use crate::dom::Layers;
use backdrop_core::handoff::{self, Poll};
use backdrop_core::{Dispose, EffectState, LayerSlots};
use backdrop_render::{GpuContext, ImageWarpPass, LoadedImage, ParticlePass, ParticleStyle};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LayerKind {
    Warp,
    Particles,
}

impl LayerKind {
    pub fn label(self) -> &'static str {
        match self {
            LayerKind::Warp => "warp",
            LayerKind::Particles => "particles",
        }
    }
}

/// One canvas with its own device and the pass drawn into it.
pub struct Layer<P> {
    pub gpu: GpuContext<'static>,
    pub pass: P,
}

impl<P: Dispose> Dispose for Layer<P> {
    fn dispose(self) {
        self.pass.dispose();
        self.gpu.dispose();
    }
}

/// Everything the per-frame callback touches, owned by one mount.
pub struct FrameContext {
    pub state: EffectState,
    pub layers: Rc<Layers>,
    image: handoff::Receiver<LoadedImage>,
    slots: LayerSlots<Layer<ImageWarpPass>, Layer<ParticlePass>, LoadedImage>,
}

impl FrameContext {
    pub fn new(
        state: EffectState,
        layers: Rc<Layers>,
        image: handoff::Receiver<LoadedImage>,
    ) -> Self {
        Self {
            state,
            layers,
            image,
            slots: LayerSlots::new(),
        }
    }

    /// Re-measure the container after a window resize.
    pub fn on_resize(&mut self) {
        self.layers.sync_backing_sizes();
        self.state.resize(self.layers.viewport());
    }

    /// Build the pass for a freshly created context. Contexts that arrive
    /// after release are destroyed on the spot.
    pub fn install(&mut self, kind: LayerKind, gpu: GpuContext<'static>) {
        let state = &self.state;
        let installed = match kind {
            LayerKind::Warp => self.slots.install_warp(gpu, |gpu, pending| {
                let mut pass = ImageWarpPass::new(
                    &gpu.device,
                    &gpu.queue,
                    gpu.format(),
                    state.field().size() as u32,
                );
                if let Some(image) = pending {
                    pass.set_image(&gpu.device, &gpu.queue, image);
                }
                pass.upload_field(&gpu.queue, state.field().data());
                Layer { gpu, pass }
            }),
            LayerKind::Particles => self.slots.install_particles(gpu, |gpu| {
                let style = ParticleStyle::from_config(state.config());
                let pass = ParticlePass::new(&gpu.device, gpu.format(), state.cloud(), style);
                Layer { gpu, pass }
            }),
        };
        if installed {
            log::info!("[gpu] {} layer ready", kind.label());
        } else {
            log::debug!("[gpu] {} context ready after unmount; released", kind.label());
        }
    }

    /// Destroy one layer's pass and device. Later installs are refused.
    pub fn release(&mut self, kind: LayerKind) {
        match kind {
            LayerKind::Warp => self.slots.release_warp(),
            LayerKind::Particles => self.slots.release_particles(),
        }
    }

    pub fn frame(&mut self, now_ms: f64) {
        match self.image.poll() {
            Poll::Ready(image) => {
                self.state.set_image_size(image.width, image.height);
                self.slots.offer_image(image, |layer, image| {
                    layer.pass.set_image(&layer.gpu.device, &layer.gpu.queue, image)
                });
            }
            Poll::Failed(reason) => {
                log::warn!("[image] keeping blank texture: {}", reason);
            }
            Poll::Pending | Poll::Done => {}
        }

        let snapshot = self.state.advance(now_ms);

        if let Some(layer) = self.slots.warp_mut() {
            layer
                .gpu
                .resize(self.layers.warp.width(), self.layers.warp.height());
            if let Some(data) = self.state.field_upload() {
                layer.pass.upload_field(&layer.gpu.queue, data);
            }
            layer.pass.prepare(&layer.gpu.queue, &snapshot);
            let pass = &layer.pass;
            if let Err(e) = layer.gpu.submit_frame("warp_encoder", |encoder, view| {
                pass.draw(encoder, view, wgpu::LoadOp::Clear(wgpu::Color::TRANSPARENT));
            }) {
                log::warn!("[warp] surface error: {:?}", e);
            }
        }

        if let Some(layer) = self.slots.particles_mut() {
            layer
                .gpu
                .resize(self.layers.particles.width(), self.layers.particles.height());
            layer
                .pass
                .prepare(&layer.gpu.queue, &snapshot, layer.gpu.size());
            let pass = &layer.pass;
            if let Err(e) = layer.gpu.submit_frame("particles_encoder", |encoder, view| {
                pass.draw(encoder, view, wgpu::LoadOp::Clear(wgpu::Color::TRANSPARENT));
            }) {
                log::warn!("[particles] surface error: {:?}", e);
            }
        }
    }
}

/// Self-rescheduling requestAnimationFrame loop that can be stopped.
pub struct AnimationLoop {
    handle: Rc<Cell<Option<i32>>>,
    tick: Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>,
}

impl AnimationLoop {
    pub fn start(mut on_frame: impl FnMut(f64) + 'static) -> anyhow::Result<Self> {
        let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
        let handle: Rc<Cell<Option<i32>>> = Rc::new(Cell::new(None));
        let tick: Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>> = Rc::new(RefCell::new(None));
        let tick_clone = tick.clone();
        let handle_tick = handle.clone();
        *tick.borrow_mut() = Some(Closure::wrap(Box::new(move |ts: f64| {
            handle_tick.set(None);
            on_frame(ts);
            let Some(w) = web::window() else {
                return;
            };
            let tick_ref = tick_clone.borrow();
            let Some(cb) = tick_ref.as_ref() else {
                return;
            };
            match w.request_animation_frame(cb.as_ref().unchecked_ref()) {
                Ok(id) => handle_tick.set(Some(id)),
                Err(e) => log::error!("[frame] request_animation_frame failed: {:?}", e),
            }
        }) as Box<dyn FnMut(f64)>));

        let id = match tick.borrow().as_ref() {
            Some(cb) => window
                .request_animation_frame(cb.as_ref().unchecked_ref())
                .map_err(crate::dom::js_err)?,
            None => anyhow::bail!("frame callback missing"),
        };
        handle.set(Some(id));
        Ok(Self { handle, tick })
    }

    pub fn cancel(self) {
        if let (Some(id), Some(w)) = (self.handle.take(), web::window()) {
            if let Err(e) = w.cancel_animation_frame(id) {
                log::warn!("[frame] cancel_animation_frame failed: {:?}", e);
            }
        }
        // breaks the closure's reference to itself
        self.tick.borrow_mut().take();
    }
}
