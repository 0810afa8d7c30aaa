//! Construction-time parameters for one mounted backdrop.
//!
//! Field names follow the camelCase option names accepted by the web
//! front-end. Every field has a default; only `imageSrc` must be supplied.
//! Two configurations are compared structurally to decide whether a mounted
//! instance has to be torn down and mounted again.

use crate::color;
use crate::constants::{DEFAULT_PALETTE, MAX_GRID, MAX_PARTICLES};
use crate::error::ConfigError;
use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EffectConfig {
    /// Velocity field resolution (cells per side).
    pub grid: u32,
    pub distortion_strength: f32,
    /// Per-frame decay factor of the velocity field.
    pub relaxation: f32,
    pub image_src: String,
    pub particle_count: usize,
    pub particle_spread: f32,
    pub particle_speed: f32,
    pub particle_colors: Vec<String>,
    pub particle_base_size: f32,
    pub size_randomness: f32,
    pub camera_distance: f32,
    pub disable_rotation: bool,
    /// Pointer velocity multiplier.
    pub mouse_force: f32,
    /// Pointer influence radius as a fraction of the grid side.
    pub mouse_radius: f32,
    /// How far the particle group follows the pointer target.
    pub particle_mouse_force: f32,
}

impl Default for EffectConfig {
    fn default() -> Self {
        Self {
            grid: 40,
            distortion_strength: 0.1,
            relaxation: 0.9,
            image_src: String::new(),
            particle_count: 400,
            particle_spread: 10.0,
            particle_speed: 0.1,
            particle_colors: DEFAULT_PALETTE.iter().map(|c| c.to_string()).collect(),
            particle_base_size: 100.0,
            size_randomness: 1.0,
            camera_distance: 20.0,
            disable_rotation: false,
            mouse_force: 1.5,
            mouse_radius: 0.2,
            particle_mouse_force: 0.5,
        }
    }
}

impl EffectConfig {
    pub fn with_image(image_src: impl Into<String>) -> Self {
        Self {
            image_src: image_src.into(),
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(2..=MAX_GRID).contains(&self.grid) {
            return Err(ConfigError::Grid {
                value: self.grid,
                max: MAX_GRID,
            });
        }
        if self.particle_count > MAX_PARTICLES {
            return Err(ConfigError::ParticleCount {
                value: self.particle_count,
                max: MAX_PARTICLES,
            });
        }
        if self.image_src.trim().is_empty() {
            return Err(ConfigError::MissingImage);
        }
        let floats = [
            ("distortionStrength", self.distortion_strength),
            ("relaxation", self.relaxation),
            ("particleSpread", self.particle_spread),
            ("particleSpeed", self.particle_speed),
            ("particleBaseSize", self.particle_base_size),
            ("sizeRandomness", self.size_randomness),
            ("cameraDistance", self.camera_distance),
            ("mouseForce", self.mouse_force),
            ("mouseRadius", self.mouse_radius),
            ("particleMouseForce", self.particle_mouse_force),
        ];
        for (field, value) in floats {
            if !value.is_finite() {
                return Err(ConfigError::NotFinite { field, value });
            }
        }
        if !(self.relaxation > 0.0 && self.relaxation < 1.0) {
            return Err(ConfigError::Relaxation(self.relaxation));
        }
        if self.camera_distance <= 0.0 {
            return Err(ConfigError::NotPositive {
                field: "cameraDistance",
                value: self.camera_distance,
            });
        }
        for (field, value) in [
            ("mouseRadius", self.mouse_radius),
            ("particleBaseSize", self.particle_base_size),
        ] {
            if value < 0.0 {
                return Err(ConfigError::Negative { field, value });
            }
        }
        self.palette_rgb()?;
        Ok(())
    }

    /// Whether moving from `self` to `next` needs a fresh mount. `next` is
    /// validated first so a rejected configuration never reaches teardown.
    pub fn remount_needed(&self, next: &EffectConfig) -> Result<bool, ConfigError> {
        next.validate()?;
        Ok(next != self)
    }

    /// Configured palette as normalized RGB, or the all-white default when empty.
    pub fn palette_rgb(&self) -> Result<Vec<[f32; 3]>, ConfigError> {
        color::parse_palette(&self.particle_colors, &DEFAULT_PALETTE)
            .map_err(|(index, source)| ConfigError::Palette { index, source })
    }

    /// Influence radius in grid cells.
    pub fn influence_radius_cells(&self) -> f32 {
        self.grid as f32 * self.mouse_radius
    }
}
