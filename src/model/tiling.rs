use glam::{Vec2, Vec3};

/// Texture repeat derived from an object's world scale.
///
/// World X drives U and world Z drives V; world Y is ignored, which is the
/// convention for floor and wall slabs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TilingState {
    pub repeat: Vec2,
}

impl TilingState {
    pub fn compute(pixels_per_meter: f32, texture_resolution: u32, world_scale: Vec3) -> Self {
        let texels = texel_ratio(pixels_per_meter, texture_resolution);
        Self {
            repeat: Vec2::new(texels * world_scale.x, texels * world_scale.z),
        }
    }
}

/// Number of texture repeats per world unit.
pub fn texel_ratio(pixels_per_meter: f32, texture_resolution: u32) -> f32 {
    pixels_per_meter / texture_resolution as f32
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Vec3::new(3.0, 1.0, 5.0))]
    #[case(Vec3::new(3.0, 0.01, 5.0))]
    #[case(Vec3::new(3.0, 250.0, 5.0))]
    fn repeat_follows_horizontal_axes(#[case] scale: Vec3) {
        let tiling = TilingState::compute(2048.0, 1024, scale);
        assert_eq!(tiling.repeat, Vec2::new(6.0, 10.0));
    }

    #[test]
    fn default_density_ratio() {
        let ratio = texel_ratio(2094.5, 4096);
        assert!((ratio - 0.511_352_5).abs() < 1e-6);
    }
}
