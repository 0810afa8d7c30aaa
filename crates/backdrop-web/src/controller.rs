//! Mount, run and tear down one backdrop inside a DOM container.

use crate::dom::{window_document, Layers};
use crate::events::{client_position, Listener};
use crate::frame::{AnimationLoop, FrameContext, LayerKind};
use crate::loader;
use backdrop_core::{handoff, Dispose, EffectConfig, EffectState, Lifecycle};
use backdrop_render::GpuContext;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

struct Mounted {
    lifecycle: Lifecycle,
}

pub struct EffectController {
    container: web::HtmlElement,
    config: EffectConfig,
    mounted: Option<Mounted>,
}

impl EffectController {
    pub fn new(container: web::HtmlElement, config: EffectConfig) -> anyhow::Result<Self> {
        let mut controller = Self {
            container,
            config,
            mounted: None,
        };
        controller.mount()?;
        Ok(controller)
    }

    pub fn config(&self) -> &EffectConfig {
        &self.config
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
            .as_ref()
            .map(|m| m.lifecycle.is_mounted())
            .unwrap_or(false)
    }

    /// Any difference from the current configuration remounts from scratch.
    /// Invalid configurations are rejected before anything is torn down.
    pub fn set_config(&mut self, config: EffectConfig) -> anyhow::Result<()> {
        if !self.config.remount_needed(&config)? && self.is_mounted() {
            return Ok(());
        }
        self.unmount();
        self.config = config;
        self.mount()
    }

    /// Idempotent.
    pub fn unmount(&mut self) {
        if let Some(mut mounted) = self.mounted.take() {
            let steps = mounted.lifecycle.unmount();
            log::info!("[controller] unmounted ({} teardown steps)", steps);
        }
    }

    fn mount(&mut self) -> anyhow::Result<()> {
        let (window, document) =
            window_document().ok_or_else(|| anyhow::anyhow!("no window/document"))?;
        let mut rng = StdRng::from_entropy();
        let state = EffectState::new(self.config.clone(), instant::now(), &mut rng)?;

        // Steps registered so far unwind if anything below fails
        let mut lifecycle = Lifecycle::new();
        let layers = Rc::new(Layers::create(&document, &self.container)?);
        lifecycle.defer("canvases", {
            let layers = layers.clone();
            move || layers.detach()
        });

        let (image_tx, image_rx) = handoff::channel();
        let ctx = Rc::new(RefCell::new(FrameContext::new(state, layers.clone(), image_rx)));
        ctx.borrow_mut().on_resize();

        for kind in [LayerKind::Warp, LayerKind::Particles] {
            let canvas = match kind {
                LayerKind::Warp => layers.warp.clone(),
                LayerKind::Particles => layers.particles.clone(),
            };
            spawn_gpu_init(Rc::downgrade(&ctx), kind, canvas);
            lifecycle.defer(kind.label(), {
                let ctx = ctx.clone();
                move || ctx.borrow_mut().release(kind)
            });
        }

        let resize = Listener::attach(&window, "resize", {
            let ctx = ctx.clone();
            move |_| ctx.borrow_mut().on_resize()
        })?;
        lifecycle.defer("resize listener", move || resize.remove());

        let pointer_move = Listener::attach(&self.container, "pointermove", {
            let ctx = ctx.clone();
            move |ev: web::Event| {
                let Some(client) = client_position(&ev) else {
                    return;
                };
                let mut ctx = ctx.borrow_mut();
                let rect = ctx.layers.container_rect();
                ctx.state.pointer_moved(client, rect);
            }
        })?;
        lifecycle.defer("pointermove listener", move || pointer_move.remove());

        let pointer_leave = Listener::attach(&self.container, "pointerleave", {
            let ctx = ctx.clone();
            move |_| ctx.borrow_mut().state.pointer_left()
        })?;
        lifecycle.defer("pointerleave listener", move || pointer_leave.remove());

        loader::spawn_image_load(self.config.image_src.clone(), image_tx);

        let animation = AnimationLoop::start({
            let ctx = ctx.clone();
            move |ts| ctx.borrow_mut().frame(ts)
        })?;
        lifecycle.defer("animation frame", move || animation.cancel());

        lifecycle.mark_mounted();
        log::info!(
            "[controller] mounted grid={} particles={} image={}",
            self.config.grid,
            self.config.particle_count,
            self.config.image_src
        );
        self.mounted = Some(Mounted { lifecycle });
        Ok(())
    }
}

impl Drop for EffectController {
    fn drop(&mut self) {
        self.unmount();
    }
}

/// WebGPU hands out one device per adapter request, so every canvas gets its
/// own instance, adapter and device.
fn spawn_gpu_init(ctx: Weak<RefCell<FrameContext>>, kind: LayerKind, canvas: web::HtmlCanvasElement) {
    spawn_local(async move {
        let (width, height) = (canvas.width(), canvas.height());
        let gpu = match GpuContext::new(wgpu::SurfaceTarget::Canvas(canvas), width, height).await {
            Ok(gpu) => gpu,
            Err(e) => {
                log::error!("[gpu] {} init error: {:?}", kind.label(), e);
                return;
            }
        };
        match ctx.upgrade() {
            Some(ctx) => ctx.borrow_mut().install(kind, gpu),
            None => {
                log::debug!("[gpu] {} context ready after unmount; releasing", kind.label());
                gpu.dispose();
            }
        }
    });
}
