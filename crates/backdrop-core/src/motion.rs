//! Particle group transform and the per-point motion contract shared with the
//! particle vertex shader.

use crate::constants::{
    OSCILLATION_AMP_MAX, OSCILLATION_AMP_MIN, OSCILLATION_PHASE_SCALE, PARTICLE_TIME_PER_FRAME,
    ROTATION_X_AMP, ROTATION_X_FREQ, ROTATION_Y_AMP, ROTATION_Y_FREQ, ROTATION_Z_STEP,
    SPRITE_MAX_ALPHA, SPRITE_SHIMMER,
};
use glam::{EulerRot, Mat4, Vec2, Vec3, Vec4};
use std::f32::consts::TAU;

#[inline]
fn smoothstep(edge0: f32, edge1: f32, x: f32) -> f32 {
    let t = ((x - edge0) / (edge1 - edge0)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

#[inline]
fn mix(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Whole-cloud transform plus the shader time uniform.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ParticleGroup {
    pub position: Vec2,
    /// Euler angles (x, y, z) in radians.
    pub rotation: Vec3,
    time: f64,
}

pub struct GroupStep {
    pub target: Vec2,
    pub follow_strength: f32,
    pub smoothing: f32,
    /// Wrapped accumulated elapsed time (ms, speed-scaled).
    pub elapsed: f64,
    pub speed: f32,
    pub rotate: bool,
}

impl ParticleGroup {
    pub fn update(&mut self, step: &GroupStep) {
        self.time += PARTICLE_TIME_PER_FRAME * step.speed as f64;
        self.position += (step.target * step.follow_strength - self.position) * step.smoothing;
        if step.rotate {
            self.rotation.x = (step.elapsed * ROTATION_X_FREQ).sin() as f32 * ROTATION_X_AMP;
            self.rotation.y = (step.elapsed * ROTATION_Y_FREQ).cos() as f32 * ROTATION_Y_AMP;
            self.rotation.z = (self.rotation.z + ROTATION_Z_STEP * step.speed).rem_euclid(TAU);
        }
    }

    pub fn time(&self) -> f32 {
        self.time as f32
    }

    pub fn model_matrix(&self) -> Mat4 {
        let rot = Mat4::from_euler(
            EulerRot::YXZ,
            self.rotation.y,
            self.rotation.x,
            self.rotation.z,
        );
        Mat4::from_translation(self.position.extend(0.0)) * rot
    }
}

/// World-space offset of one point at `time`; each axis runs its own sine whose
/// frequency, phase and amplitude come from the point's fixed random vector.
pub fn oscillation_offset(random: Vec4, time: f32) -> Vec3 {
    let amp = |r: f32| mix(OSCILLATION_AMP_MIN, OSCILLATION_AMP_MAX, r);
    Vec3::new(
        (time * random.z + OSCILLATION_PHASE_SCALE * random.w).sin() * amp(random.x),
        (time * random.y + OSCILLATION_PHASE_SCALE * random.x).sin() * amp(random.w),
        (time * random.w + OSCILLATION_PHASE_SCALE * random.y).sin() * amp(random.z),
    )
}

/// Sprite size in pixels for a point at `view_distance` from the eye.
pub fn point_size(base_size: f32, size_randomness: f32, random_x: f32, view_distance: f32) -> f32 {
    base_size * (1.0 + size_randomness * (random_x - 0.5)) / view_distance.max(f32::EPSILON)
}

/// Premultiplied fragment color of a sprite at quad coordinate `uv` in [0,1]².
/// `None` where the fragment is discarded outside the disc.
pub fn sprite_color(color: Vec3, uv: Vec2, time: f32, random_y: f32) -> Option<Vec4> {
    let d = uv.distance(Vec2::splat(0.5));
    let alpha = (1.0 - smoothstep(0.4, 0.5, d)) * SPRITE_MAX_ALPHA;
    if alpha <= 0.0 {
        return None;
    }
    let phase =
        Vec3::new(uv.y, uv.x, uv.x) + Vec3::splat(time + random_y * OSCILLATION_PHASE_SCALE);
    let shimmer = Vec3::new(phase.x.sin(), phase.y.sin(), phase.z.sin()) * SPRITE_SHIMMER;
    let c = (color + shimmer).clamp(Vec3::ZERO, Vec3::ONE);
    Some((c * alpha).extend(alpha))
}
