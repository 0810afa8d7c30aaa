//! Camera descriptions for both passes.
//!
//! These types intentionally avoid referencing platform-specific APIs and are
//! suitable for use on both native and web targets.

use crate::constants::{
    ORTHO_EYE_Z, ORTHO_FAR, ORTHO_NEAR, PARTICLE_FAR, PARTICLE_FOV_DEGREES, PARTICLE_NEAR,
};
use crate::layout::OrthoFrustum;
use glam::{Mat4, Vec3};

/// Simple right-handed camera description with perspective projection.
#[derive(Clone, Debug)]
pub struct PerspectiveCamera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub aspect: f32,
    pub fovy_radians: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl PerspectiveCamera {
    /// Particle camera: narrow field of view looking down -Z from `distance`.
    pub fn for_particles(distance: f32, aspect: f32) -> Self {
        Self {
            eye: Vec3::new(0.0, 0.0, distance),
            target: Vec3::ZERO,
            up: Vec3::Y,
            aspect,
            fovy_radians: PARTICLE_FOV_DEGREES.to_radians(),
            znear: PARTICLE_NEAR,
            zfar: PARTICLE_FAR,
        }
    }

    /// Compute the clip-space projection matrix.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, self.aspect, self.znear, self.zfar)
    }
    /// Compute the view matrix that transforms world to view space.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }
}

/// Orthographic camera looking at the image plane.
#[derive(Clone, Debug)]
pub struct OrthoCamera {
    pub frustum: OrthoFrustum,
    pub eye: Vec3,
    pub znear: f32,
    pub zfar: f32,
}

impl OrthoCamera {
    pub fn new(frustum: OrthoFrustum) -> Self {
        Self {
            frustum,
            eye: Vec3::new(0.0, 0.0, ORTHO_EYE_Z),
            znear: ORTHO_NEAR,
            zfar: ORTHO_FAR,
        }
    }

    pub fn projection_matrix(&self) -> Mat4 {
        let f = &self.frustum;
        Mat4::orthographic_rh(f.left, f.right, f.bottom, f.top, self.znear, self.zfar)
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, Vec3::new(self.eye.x, self.eye.y, 0.0), Vec3::Y)
    }

    pub fn view_proj(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }
}
