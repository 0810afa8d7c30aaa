use crate::constants::{POINTER_REST, POINTER_SMOOTHING};
use glam::Vec2;

/// Client-space rectangle of the host container (CSS px on the web,
/// physical px on native).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ContainerRect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl ContainerRect {
    pub fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Map a client point into [0,1]² with y pointing up. `None` for an empty rect.
    pub fn normalize(&self, client: Vec2) -> Option<Vec2> {
        if !(self.width > 0.0 && self.height > 0.0) {
            return None;
        }
        let x = (client.x - self.left) / self.width;
        let y = 1.0 - (client.y - self.top) / self.height;
        Some(Vec2::new(x, y))
    }
}

/// Pointer position, velocity and follow target in image space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerTracker {
    pub position: Vec2,
    pub previous: Vec2,
    pub velocity: Vec2,
    /// Signed target centered at 0, in [-1, 1] while over the container.
    pub target: Vec2,
    pub force: f32,
    pub smoothing: f32,
}

impl PointerTracker {
    pub fn new(force: f32) -> Self {
        let rest = Vec2::from(POINTER_REST);
        Self {
            position: rest,
            previous: rest,
            velocity: Vec2::ZERO,
            target: Vec2::ZERO,
            force,
            smoothing: POINTER_SMOOTHING,
        }
    }

    pub fn on_move(&mut self, client: Vec2, rect: ContainerRect) {
        let Some(pos) = rect.normalize(client) else {
            return;
        };
        self.velocity = (pos - self.previous) * self.force;
        self.target = (pos - 0.5) * 2.0;
        self.position = pos;
        self.previous = pos;
    }

    pub fn on_leave(&mut self) {
        *self = Self::new(self.force);
    }

    pub fn is_at_rest(&self) -> bool {
        self.position == Vec2::from(POINTER_REST)
            && self.previous == self.position
            && self.velocity == Vec2::ZERO
            && self.target == Vec2::ZERO
    }
}
