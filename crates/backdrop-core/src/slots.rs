//! Holding area for the two render layers of one mount.
//!
//! GPU contexts are created asynchronously, so a layer may become ready
//! after its mount was released, and the image may arrive before the warp
//! layer exists. Once any layer is released, contexts that show up later are
//! disposed instead of stored.

use crate::lifecycle::Dispose;

pub struct LayerSlots<W, P, I> {
    warp: Option<W>,
    particles: Option<P>,
    pending_image: Option<I>,
    released: bool,
}

impl<W, P, I> Default for LayerSlots<W, P, I> {
    fn default() -> Self {
        Self {
            warp: None,
            particles: None,
            pending_image: None,
            released: false,
        }
    }
}

impl<W: Dispose, P: Dispose, I> LayerSlots<W, P, I> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_released(&self) -> bool {
        self.released
    }

    pub fn warp_mut(&mut self) -> Option<&mut W> {
        self.warp.as_mut()
    }

    pub fn particles_mut(&mut self) -> Option<&mut P> {
        self.particles.as_mut()
    }

    pub fn has_pending_image(&self) -> bool {
        self.pending_image.is_some()
    }

    /// Hand the image to the warp layer, or keep it until that layer installs.
    pub fn offer_image(&mut self, image: I, apply: impl FnOnce(&mut W, I)) {
        match &mut self.warp {
            Some(warp) => apply(warp, image),
            None => self.pending_image = Some(image),
        }
    }

    /// Build the warp layer from `context` together with any image that
    /// arrived early. Returns `false` when the context was disposed instead.
    pub fn install_warp<C: Dispose>(
        &mut self,
        context: C,
        build: impl FnOnce(C, Option<I>) -> W,
    ) -> bool {
        if self.released {
            context.dispose();
            return false;
        }
        let image = self.pending_image.take();
        if let Some(old) = self.warp.replace(build(context, image)) {
            old.dispose();
        }
        true
    }

    pub fn install_particles<C: Dispose>(
        &mut self,
        context: C,
        build: impl FnOnce(C) -> P,
    ) -> bool {
        if self.released {
            context.dispose();
            return false;
        }
        if let Some(old) = self.particles.replace(build(context)) {
            old.dispose();
        }
        true
    }

    pub fn release_warp(&mut self) {
        self.released = true;
        self.pending_image = None;
        if let Some(warp) = self.warp.take() {
            warp.dispose();
        }
    }

    pub fn release_particles(&mut self) {
        self.released = true;
        if let Some(particles) = self.particles.take() {
            particles.dispose();
        }
    }
}
