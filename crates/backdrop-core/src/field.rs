//! Square grid of 2D displacement vectors that remembers recent pointer motion.
//!
//! The backing store is laid out as an RGBA f32 texture of `size × size`
//! texels so it can be uploaded as-is. Cell `(i, j)` lives at texel
//! `i + size * j`; `i` is the column and `j` the row counted from the bottom.
//! Only the first two channels are written.

use crate::constants::{FALLOFF_MAX, FIELD_CHANNELS, FIELD_SEED_MIN, FIELD_SEED_SPAN, INJECT_GAIN};
use glam::Vec2;
use rand::Rng;

#[derive(Clone, Debug)]
pub struct VelocityField {
    size: usize,
    decay: f32,
    data: Vec<f32>,
    dirty: bool,
}

impl VelocityField {
    /// All-zero field.
    pub fn new(size: usize, decay: f32) -> Self {
        Self {
            size,
            decay,
            data: vec![0.0; FIELD_CHANNELS * size * size],
            dirty: true,
        }
    }

    /// Field whose x/y channels start with uniform noise in [-125, 130).
    pub fn seeded<R: Rng + ?Sized>(size: usize, decay: f32, rng: &mut R) -> Self {
        let mut field = Self::new(size, decay);
        for texel in field.data.chunks_exact_mut(FIELD_CHANNELS) {
            texel[0] = rng.gen::<f32>() * FIELD_SEED_SPAN + FIELD_SEED_MIN;
            texel[1] = rng.gen::<f32>() * FIELD_SEED_SPAN + FIELD_SEED_MIN;
        }
        field
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn decay_factor(&self) -> f32 {
        self.decay
    }

    /// Raw RGBA texel data, row by row.
    pub fn data(&self) -> &[f32] {
        &self.data
    }

    pub fn get(&self, i: usize, j: usize) -> Option<Vec2> {
        if i >= self.size || j >= self.size {
            return None;
        }
        let index = FIELD_CHANNELS * (i + self.size * j);
        Some(Vec2::new(self.data[index], self.data[index + 1]))
    }

    pub fn set(&mut self, i: usize, j: usize, value: Vec2) {
        if i >= self.size || j >= self.size {
            return;
        }
        let index = FIELD_CHANNELS * (i + self.size * j);
        self.data[index] = value.x;
        self.data[index + 1] = value.y;
        self.dirty = true;
    }

    /// Euclidean norm over every cell's x/y pair.
    pub fn norm(&self) -> f32 {
        self.data
            .chunks_exact(FIELD_CHANNELS)
            .map(|t| t[0] * t[0] + t[1] * t[1])
            .sum::<f32>()
            .sqrt()
    }

    pub fn decay(&mut self) {
        let decay = self.decay;
        for texel in self.data.chunks_exact_mut(FIELD_CHANNELS) {
            texel[0] *= decay;
            texel[1] *= decay;
        }
        self.dirty = true;
    }

    /// Push the pointer velocity into every cell within `radius` grid units of
    /// `(pointer_x, pointer_y)`, weighted by a clamped inverse-distance falloff.
    ///
    /// Channel 1 receives the negated y contribution: the field is sampled in
    /// texture space while pointer velocity is measured in screen space.
    pub fn inject(
        &mut self,
        pointer_x: f32,
        pointer_y: f32,
        velocity_x: f32,
        velocity_y: f32,
        radius: f32,
        strength: f32,
    ) {
        let radius_sq = radius * radius;
        let gain = strength * INJECT_GAIN;
        for i in 0..self.size {
            for j in 0..self.size {
                let dx = pointer_x - i as f32;
                let dy = pointer_y - j as f32;
                let dist_sq = dx * dx + dy * dy;
                if dist_sq >= radius_sq {
                    continue;
                }
                let falloff = if dist_sq > 0.0 {
                    (radius / dist_sq.sqrt()).min(FALLOFF_MAX)
                } else {
                    FALLOFF_MAX
                };
                let index = FIELD_CHANNELS * (i + self.size * j);
                self.data[index] += gain * velocity_x * falloff;
                self.data[index + 1] -= gain * velocity_y * falloff;
            }
        }
        self.dirty = true;
    }

    /// Returns whether the field changed since the last call, clearing the flag.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::replace(&mut self.dirty, false)
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }
}
