//! Per-mount simulation state driven once per frame by a host.
//!
//! The host owns one `EffectState`, forwards pointer and resize events into
//! it, calls [`EffectState::advance`] from its frame callback and hands the
//! returned [`FrameSnapshot`] plus the field data to the render passes.

use crate::camera::{OrthoCamera, PerspectiveCamera};
use crate::clock::{FrameClock, FrameTime};
use crate::cloud::PointCloud;
use crate::config::EffectConfig;
use crate::error::ConfigError;
use crate::field::VelocityField;
use crate::layout::{Viewport, WarpLayout};
use crate::motion::{GroupStep, ParticleGroup};
use crate::pointer::{ContainerRect, PointerTracker};
use glam::{Mat4, Vec2};
use rand::Rng;

/// Matrices and uniforms for one frame of both passes.
#[derive(Clone, Copy, Debug)]
pub struct FrameSnapshot {
    pub time: FrameTime,
    pub warp_view_proj: Mat4,
    pub warp_model: Mat4,
    pub particle_projection: Mat4,
    pub particle_view: Mat4,
    pub particle_model: Mat4,
    pub particle_time: f32,
}

pub struct EffectState {
    config: EffectConfig,
    field: VelocityField,
    cloud: PointCloud,
    pointer: PointerTracker,
    group: ParticleGroup,
    clock: FrameClock,
    image_aspect: f32,
    layout: WarpLayout,
}

impl EffectState {
    /// Validate `config` and build the seeded field and point cloud.
    pub fn new<R: Rng + ?Sized>(
        config: EffectConfig,
        start_ms: f64,
        rng: &mut R,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let palette = config.palette_rgb()?;
        let field = VelocityField::seeded(config.grid as usize, config.relaxation, rng);
        let cloud = PointCloud::generate(config.particle_count, &palette, rng);
        log::info!(
            "[state] grid={} particles={} palette={}",
            config.grid,
            cloud.len(),
            palette.len()
        );
        Ok(Self {
            pointer: PointerTracker::new(config.mouse_force),
            clock: FrameClock::new(start_ms, config.particle_speed),
            group: ParticleGroup::default(),
            image_aspect: 1.0,
            layout: WarpLayout::default(),
            config,
            field,
            cloud,
        })
    }

    pub fn config(&self) -> &EffectConfig {
        &self.config
    }

    pub fn field(&self) -> &VelocityField {
        &self.field
    }

    pub fn cloud(&self) -> &PointCloud {
        &self.cloud
    }

    pub fn pointer(&self) -> &PointerTracker {
        &self.pointer
    }

    pub fn group(&self) -> &ParticleGroup {
        &self.group
    }

    pub fn layout(&self) -> &WarpLayout {
        &self.layout
    }

    pub fn image_aspect(&self) -> f32 {
        self.image_aspect
    }

    pub fn pointer_moved(&mut self, client: Vec2, rect: ContainerRect) {
        self.pointer.on_move(client, rect);
    }

    pub fn pointer_left(&mut self) {
        self.pointer.on_leave();
    }

    /// Recompute the cover layout. Returns `false` (keeping the previous
    /// layout) for a zero-area container.
    pub fn resize(&mut self, viewport: Viewport) -> bool {
        match WarpLayout::compute(viewport, self.image_aspect) {
            Some(layout) => {
                self.layout = layout;
                true
            }
            None => {
                log::debug!(
                    "[state] ignoring resize to {}x{}",
                    viewport.width,
                    viewport.height
                );
                false
            }
        }
    }

    /// Record the loaded image's aspect and re-run the layout for the current viewport.
    pub fn set_image_size(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.image_aspect = width as f32 / height as f32;
        self.resize(self.layout.viewport);
    }

    /// Field texels when they changed since the last upload.
    pub fn field_upload(&mut self) -> Option<&[f32]> {
        if self.field.take_dirty() {
            Some(self.field.data())
        } else {
            None
        }
    }

    pub fn advance(&mut self, now_ms: f64) -> FrameSnapshot {
        let time = self.clock.tick(now_ms);

        self.field.decay();
        let n = self.field.size() as f32;
        let p = self.pointer;
        self.field.inject(
            n * p.position.x,
            n * p.position.y,
            p.velocity.x,
            p.velocity.y,
            self.config.influence_radius_cells(),
            self.config.distortion_strength,
        );

        self.group.update(&GroupStep {
            target: p.target,
            follow_strength: self.config.particle_mouse_force,
            smoothing: p.smoothing,
            elapsed: time.elapsed,
            speed: self.config.particle_speed,
            rotate: !self.config.disable_rotation,
        });

        let ortho = OrthoCamera::new(self.layout.frustum);
        let persp =
            PerspectiveCamera::for_particles(self.config.camera_distance, self.layout.container_aspect);
        let plane = self.layout.plane_size;
        FrameSnapshot {
            time,
            warp_view_proj: ortho.view_proj(),
            warp_model: Mat4::from_scale(plane.extend(1.0)),
            particle_projection: persp.projection_matrix(),
            particle_view: persp.view_matrix(),
            particle_model: self.group.model_matrix(),
            particle_time: self.group.time(),
        }
    }
}
