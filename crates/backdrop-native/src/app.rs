use backdrop_core::{ContainerRect, Dispose, EffectConfig, EffectState, Viewport};
use backdrop_render::{GpuContext, ImageWarpPass, LoadedImage, ParticlePass, ParticleStyle};
use glam::Vec2;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::PathBuf;
use std::sync::mpsc;
use std::thread;
use std::time::Instant;
use winit::dpi::{PhysicalPosition, PhysicalSize};
use winit::window::Window;

type ImageResult = anyhow::Result<LoadedImage>;

pub struct App<'w> {
    pub window: &'w Window,
    gpu: GpuContext<'w>,
    warp: ImageWarpPass,
    particles: ParticlePass,
    state: EffectState,
    image_rx: Option<mpsc::Receiver<ImageResult>>,
    start: Instant,
}

impl<'w> App<'w> {
    pub async fn new(
        window: &'w Window,
        config: EffectConfig,
        seed: Option<u64>,
    ) -> anyhow::Result<Self> {
        let mut rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let mut state = EffectState::new(config, 0.0, &mut rng)?;

        let size = window.inner_size();
        let gpu = GpuContext::new(window, size.width, size.height).await?;
        let warp = ImageWarpPass::new(
            &gpu.device,
            &gpu.queue,
            gpu.format(),
            state.field().size() as u32,
        );
        let particles = ParticlePass::new(
            &gpu.device,
            gpu.format(),
            state.cloud(),
            ParticleStyle::from_config(state.config()),
        );
        state.resize(Viewport::new(size.width as f32, size.height as f32));
        let image_rx = spawn_image_loader(PathBuf::from(&state.config().image_src))?;

        Ok(Self {
            window,
            gpu,
            warp,
            particles,
            state,
            image_rx: Some(image_rx),
            start: Instant::now(),
        })
    }

    pub fn resize(&mut self, size: PhysicalSize<u32>) {
        if self.gpu.resize(size.width, size.height) {
            self.state
                .resize(Viewport::new(size.width as f32, size.height as f32));
        }
    }

    /// Cursor positions are physical pixels relative to the client area.
    pub fn cursor_moved(&mut self, position: PhysicalPosition<f64>) {
        let (w, h) = self.gpu.size();
        let rect = ContainerRect::new(0.0, 0.0, w as f32, h as f32);
        self.state
            .pointer_moved(Vec2::new(position.x as f32, position.y as f32), rect);
    }

    pub fn cursor_left(&mut self) {
        self.state.pointer_left();
    }

    fn poll_image(&mut self) {
        let Some(rx) = &self.image_rx else {
            return;
        };
        let result = match rx.try_recv() {
            Ok(result) => result,
            Err(mpsc::TryRecvError::Empty) => return,
            Err(mpsc::TryRecvError::Disconnected) => Err(anyhow::anyhow!("image loader exited")),
        };
        self.image_rx = None;
        match result {
            Ok(image) => {
                self.state.set_image_size(image.width, image.height);
                self.warp.set_image(&self.gpu.device, &self.gpu.queue, image);
            }
            Err(e) => log::warn!("[image] keeping blank texture: {:?}", e),
        }
    }

    pub fn render(&mut self) -> Result<(), wgpu::SurfaceError> {
        self.poll_image();
        let now_ms = self.start.elapsed().as_secs_f64() * 1000.0;
        let snapshot = self.state.advance(now_ms);

        if let Some(data) = self.state.field_upload() {
            self.warp.upload_field(&self.gpu.queue, data);
        }
        self.warp.prepare(&self.gpu.queue, &snapshot);
        self.particles
            .prepare(&self.gpu.queue, &snapshot, self.gpu.size());

        let (warp, particles) = (&self.warp, &self.particles);
        self.gpu.submit_frame("frame_encoder", |encoder, view| {
            warp.draw(
                encoder,
                view,
                wgpu::LoadOp::Clear(wgpu::Color {
                    r: 0.0,
                    g: 0.0,
                    b: 0.0,
                    a: 1.0,
                }),
            );
            particles.draw(encoder, view, wgpu::LoadOp::Load);
        })
    }

    pub fn reconfigure(&self) {
        self.gpu.reconfigure();
    }
}

impl Dispose for App<'_> {
    fn dispose(self) {
        self.particles.dispose();
        self.warp.dispose();
        self.gpu.dispose();
        log::info!("[app] released GPU resources");
    }
}

fn spawn_image_loader(path: PathBuf) -> anyhow::Result<mpsc::Receiver<ImageResult>> {
    let (tx, rx) = mpsc::channel();
    thread::Builder::new()
        .name("image-loader".into())
        .spawn(move || {
            let result = std::fs::read(&path)
                .map_err(anyhow::Error::from)
                .and_then(|bytes| LoadedImage::decode(&bytes));
            match &result {
                Ok(img) => log::info!("[image] {} decoded {}x{}", path.display(), img.width, img.height),
                Err(e) => log::warn!("[image] failed to load {}: {:?}", path.display(), e),
            }
            // receiver gone means the window already closed
            let _ = tx.send(result);
        })?;
    Ok(rx)
}
