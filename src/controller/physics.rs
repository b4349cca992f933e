use glam::Vec3;

use crate::model::GROUNDED_VELOCITY;
use crate::utils::LayerMask;

/// Result of a successful host raycast.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    pub point: Vec3,
    pub distance: f32,
    pub layer: u8,
}

/// Host physics capability: a capsule sweep and a filtered raycast.
pub trait PhysicsSurface {
    /// Sweep the avatar capsule from `from` by `displacement` and return
    /// where it comes to rest.
    fn move_avatar(&mut self, from: Vec3, displacement: Vec3) -> Vec3;

    fn raycast(&self, origin: Vec3, direction: Vec3, max_distance: f32, mask: LayerMask) -> Option<RayHit>;
}

/// Fixed-length downward contact probe.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GroundProbe {
    pub origin_offset: Vec3,
    pub distance: f32,
    pub mask: LayerMask,
}

impl GroundProbe {
    /// Cast down from the probe origin above `position`.
    pub fn probe<P: PhysicsSurface + ?Sized>(&self, physics: &P, position: Vec3) -> Option<RayHit> {
        physics.raycast(position + self.origin_offset, Vec3::NEG_Y, self.distance, self.mask)
    }

    pub fn is_grounded<P: PhysicsSurface + ?Sized>(&self, physics: &P, position: Vec3) -> bool {
        self.probe(physics, position).is_some()
    }
}

/// Gravity integration with the grounded clamp.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VerticalMotion {
    pub gravity: f32,
}

impl VerticalMotion {
    /// Pin a grounded, falling avatar to [`GROUNDED_VELOCITY`]; otherwise
    /// accumulate gravity.
    pub fn integrate(&self, velocity: f32, grounded: bool, dt: f32) -> f32 {
        if grounded && velocity < 0.0 {
            GROUNDED_VELOCITY
        } else {
            velocity + self.gravity * dt
        }
    }

    /// Launch speed that peaks at exactly `height` under this gravity.
    pub fn jump_velocity(&self, height: f32) -> f32 {
        (height * -2.0 * self.gravity).sqrt()
    }
}
