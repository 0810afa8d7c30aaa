// Shared tuning constants used by both web and native frontends.

// Velocity field
pub const FIELD_SEED_MIN: f32 = -125.0; // initial cell values are drawn from [MIN, MIN + SPAN)
pub const FIELD_SEED_SPAN: f32 = 255.0;
pub const INJECT_GAIN: f32 = 100.0; // multiplies distortion strength when injecting
pub const FALLOFF_MAX: f32 = 10.0; // clamp for the inverse-distance falloff
pub const FIELD_CHANNELS: usize = 4; // rgba texel per cell, only rg used
pub const MAX_GRID: u32 = 4096; // keeps the field texture within every device's 2D limit

// Image warp
pub const WARP_LOOKUP_SCALE: f32 = 0.02; // uv offset per unit of field value
pub const ORTHO_FRUSTUM_HEIGHT: f32 = 1.0;
pub const ORTHO_NEAR: f32 = -1000.0;
pub const ORTHO_FAR: f32 = 1000.0;
pub const ORTHO_EYE_Z: f32 = 2.0;

// Particles
pub const PARTICLE_FOV_DEGREES: f32 = 15.0;
pub const PARTICLE_NEAR: f32 = 0.1;
pub const PARTICLE_FAR: f32 = 100.0;
pub const PARTICLE_DEPTH_STRETCH: f32 = 10.0; // z of every point is stretched in the vertex stage
pub const PARTICLE_TIME_PER_FRAME: f64 = 1.0 / 60.0; // scaled by particle speed
pub const ROTATION_X_FREQ: f64 = 0.0002;
pub const ROTATION_X_AMP: f32 = 0.1;
pub const ROTATION_Y_FREQ: f64 = 0.0005;
pub const ROTATION_Y_AMP: f32 = 0.15;
pub const ROTATION_Z_STEP: f32 = 0.01; // per frame, scaled by particle speed
pub const OSCILLATION_AMP_MIN: f32 = 0.1;
pub const OSCILLATION_AMP_MAX: f32 = 1.5;
pub const OSCILLATION_PHASE_SCALE: f32 = 6.28;
pub const MAX_PARTICLES: usize = 1_000_000;
pub const SPRITE_MAX_ALPHA: f32 = 0.8;
pub const SPRITE_SHIMMER: f32 = 0.2; // amplitude of the per-fragment color wobble

// Pointer
pub const POINTER_SMOOTHING: f32 = 0.1; // lerp factor for the particle group follow
pub const POINTER_REST: [f32; 2] = [0.5, 0.5];

// Clock
// Common period (ms) of both rotation oscillators: 2π / 0.0001.
pub const ELAPSED_WRAP_MS: f64 = std::f64::consts::TAU * 10_000.0;

// Palette used when none is configured
pub const DEFAULT_PALETTE: [&str; 3] = ["#ffffff", "#ffffff", "#ffffff"];
