use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Bit set of physics layers a probe is allowed to hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LayerMask(pub u32);

impl LayerMask {
    pub const NONE: Self = Self(0);
    pub const ALL: Self = Self(u32::MAX);

    /// Mask with a single layer set. Layers past 31 yield an empty mask.
    pub const fn layer(index: u8) -> Self {
        if index < 32 {
            Self(1 << index)
        } else {
            Self::NONE
        }
    }

    pub const fn with(self, index: u8) -> Self {
        Self(self.0 | Self::layer(index).0)
    }

    pub const fn contains(self, index: u8) -> bool {
        self.0 & Self::layer(index).0 != 0
    }
}

impl Default for LayerMask {
    fn default() -> Self {
        Self::ALL
    }
}

macro_rules! host_handle {
    ($($(#[$meta:meta])* $name:ident),* $(,)?) => {
        $(
            $(#[$meta])*
            #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
            #[serde(transparent)]
            pub struct $name(pub u32);
        )*
    };
}

host_handle! {
    /// Audio emitter owned by the host mixer.
    AudioSourceId,
    /// Loaded audio clip owned by the host.
    AudioClipId,
    /// Scene object a component is attached to.
    ObjectId,
    /// Material-bearing surface (renderer) on a scene object.
    RendererId,
}

/// Clamp to `[0, 1]`.
pub fn clamp01(t: f32) -> f32 {
    t.clamp(0.0, 1.0)
}

/// Frame-rate dependent exponential approach: `lerp(current, target, clamp01(dt * rate))`.
pub fn ease_toward(current: Vec3, target: Vec3, rate: f32, dt: f32) -> Vec3 {
    current.lerp(target, clamp01(dt * rate))
}

/// Wrap an angle in degrees into `[0, 360)`.
pub fn wrap_degrees(angle: f32) -> f32 {
    let wrapped = angle.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn layer_mask_membership() {
        let ground = LayerMask::layer(3).with(5);
        assert!(ground.contains(3));
        assert!(ground.contains(5));
        assert!(!ground.contains(4));
        assert_eq!(LayerMask::layer(40), LayerMask::NONE);
    }

    #[test]
    fn wrap_degrees_stays_in_range() {
        assert_relative_eq!(wrap_degrees(370.0), 10.0, epsilon = 1e-4);
        assert_relative_eq!(wrap_degrees(-90.0), 270.0, epsilon = 1e-4);
        let tiny = wrap_degrees(-1e-7);
        assert!((0.0..360.0).contains(&tiny));
    }

    #[test]
    fn ease_toward_saturates() {
        let rest = Vec3::new(0.0, 1.6, 0.0);
        let from = Vec3::new(0.0, 1.7, 0.0);
        assert_eq!(ease_toward(from, rest, 8.0, 1.0), rest);
        let half = ease_toward(from, rest, 8.0, 1.0 / 16.0);
        assert_relative_eq!(half.y, 1.65, epsilon = 1e-5);
    }
}
