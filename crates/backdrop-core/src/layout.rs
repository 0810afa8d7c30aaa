//! Cover-fit sizing of the image plane and the matching orthographic frustum.

use crate::constants::ORTHO_FRUSTUM_HEIGHT;
use glam::Vec2;

/// Container size in pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Width over height, `None` when either side is zero (or not finite).
    pub fn aspect(&self) -> Option<f32> {
        let aspect = self.width / self.height;
        (self.width > 0.0 && self.height > 0.0 && aspect.is_finite()).then_some(aspect)
    }

    pub fn area(&self) -> f32 {
        self.width * self.height
    }
}

/// Scale factor that makes an image of `image_aspect` cover a container of
/// `container_aspect` when the plane height is the frustum height.
#[inline]
pub fn cover_scale(container_aspect: f32, image_aspect: f32) -> f32 {
    (container_aspect / image_aspect).max(1.0)
}

/// Plane dimensions `(image_aspect·scale, scale)` in frustum units.
#[inline]
pub fn cover_plane_size(container_aspect: f32, image_aspect: f32) -> Vec2 {
    let scale = cover_scale(container_aspect, image_aspect);
    Vec2::new(image_aspect * scale, scale)
}

/// Orthographic frustum bounds, centered on the origin.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OrthoFrustum {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
}

impl OrthoFrustum {
    pub fn for_aspect(aspect: f32) -> Self {
        let height = ORTHO_FRUSTUM_HEIGHT;
        let width = height * aspect;
        Self {
            left: -width / 2.0,
            right: width / 2.0,
            top: height / 2.0,
            bottom: -height / 2.0,
        }
    }

    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    pub fn height(&self) -> f32 {
        self.top - self.bottom
    }
}

/// Everything the warp pass needs after a resize.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WarpLayout {
    pub viewport: Viewport,
    pub container_aspect: f32,
    pub plane_size: Vec2,
    pub frustum: OrthoFrustum,
}

impl WarpLayout {
    /// Recompute for a new container size. `None` for a zero-area container
    /// or a degenerate image aspect; callers keep their previous layout.
    pub fn compute(viewport: Viewport, image_aspect: f32) -> Option<Self> {
        let container_aspect = viewport.aspect()?;
        if !(image_aspect > 0.0 && image_aspect.is_finite()) {
            return None;
        }
        Some(Self {
            viewport,
            container_aspect,
            plane_size: cover_plane_size(container_aspect, image_aspect),
            frustum: OrthoFrustum::for_aspect(container_aspect),
        })
    }

    /// True when the plane covers the whole frustum.
    pub fn covers(&self) -> bool {
        const EPS: f32 = 1e-5;
        self.plane_size.x + EPS >= self.frustum.width()
            && self.plane_size.y + EPS >= self.frustum.height()
    }
}

impl Default for WarpLayout {
    fn default() -> Self {
        Self {
            viewport: Viewport::new(1.0, 1.0),
            container_aspect: 1.0,
            plane_size: Vec2::ONE,
            frustum: OrthoFrustum::for_aspect(1.0),
        }
    }
}
