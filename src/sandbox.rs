//! In-memory host surfaces for the headless driver and tests.

use std::collections::HashMap;

use glam::{Vec2, Vec3};

use crate::controller::physics::{PhysicsSurface, RayHit};
use crate::utils::{AudioClipId, AudioSourceId, LayerMask, ObjectId, RendererId};
use crate::view::{AudioSurface, MaterialMode, MaterialSurface};

/// Infinite horizontal ground plane on a single physics layer, with optional
/// walls bounding the walkable area.
#[derive(Debug, Clone, PartialEq)]
pub struct FlatGround {
    pub height: f32,
    pub layer: u8,
    pub bounds: Option<(Vec2, Vec2)>,
}

impl FlatGround {
    pub fn new(height: f32) -> Self {
        Self { height, layer: 0, bounds: None }
    }

    pub fn on_layer(mut self, layer: u8) -> Self {
        self.layer = layer;
        self
    }

    pub fn bounded(mut self, min: Vec2, max: Vec2) -> Self {
        self.bounds = Some((min, max));
        self
    }
}

impl PhysicsSurface for FlatGround {
    fn move_avatar(&mut self, from: Vec3, displacement: Vec3) -> Vec3 {
        let mut to = from + displacement;
        // the capsule cannot sink through the floor
        if to.y < self.height {
            to.y = self.height;
        }
        if let Some((min, max)) = self.bounds {
            to.x = to.x.clamp(min.x, max.x);
            to.z = to.z.clamp(min.y, max.y);
        }
        to
    }

    fn raycast(&self, origin: Vec3, direction: Vec3, max_distance: f32, mask: LayerMask) -> Option<RayHit> {
        if !mask.contains(self.layer) {
            return None;
        }
        let direction = direction.normalize_or_zero();
        if direction.y.abs() <= f32::EPSILON {
            return None;
        }
        let distance = (self.height - origin.y) / direction.y;
        if !(0.0..=max_distance).contains(&distance) {
            return None;
        }
        Some(RayHit { point: origin + direction * distance, distance, layer: self.layer })
    }
}

/// Records every one-shot request instead of mixing audio.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MixerLog {
    pub played: Vec<(AudioSourceId, AudioClipId)>,
}

impl MixerLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self, clip: AudioClipId) -> usize {
        self.played.iter().filter(|(_, c)| *c == clip).count()
    }
}

impl AudioSurface for MixerLog {
    fn play_one_shot(&mut self, source: AudioSourceId, clip: AudioClipId) {
        tracing::info!(source = source.0, clip = clip.0, "one shot");
        self.played.push((source, clip));
    }
}

/// Shared material assets plus lazily created per-renderer instances.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MaterialTable {
    attached: HashMap<ObjectId, RendererId>,
    shared: HashMap<RendererId, Vec2>,
    instances: HashMap<RendererId, Vec2>,
}

impl MaterialTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Put a renderer with a shared material on `object`.
    pub fn attach(&mut self, object: ObjectId, renderer: RendererId, texture_scale: Vec2) {
        self.attached.insert(object, renderer);
        self.shared.insert(renderer, texture_scale);
    }

    pub fn is_instanced(&self, renderer: RendererId) -> bool {
        self.instances.contains_key(&renderer)
    }

    pub fn is_empty(&self) -> bool {
        self.shared.is_empty() && self.instances.is_empty()
    }
}

impl MaterialSurface for MaterialTable {
    fn renderer_on(&self, object: ObjectId) -> Option<RendererId> {
        self.attached.get(&object).copied()
    }

    fn texture_scale(&self, renderer: RendererId, mode: MaterialMode) -> Option<Vec2> {
        match mode {
            MaterialMode::Simulation => self
                .instances
                .get(&renderer)
                .or_else(|| self.shared.get(&renderer))
                .copied(),
            MaterialMode::Authoring => self.shared.get(&renderer).copied(),
        }
    }

    fn set_texture_scale(&mut self, renderer: RendererId, mode: MaterialMode, scale: Vec2) {
        match mode {
            MaterialMode::Simulation => {
                if !self.instances.contains_key(&renderer) {
                    tracing::debug!(renderer = renderer.0, "instancing material");
                }
                self.instances.insert(renderer, scale);
            }
            MaterialMode::Authoring => {
                self.shared.insert(renderer, scale);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn probe_respects_layer_and_length() {
        let ground = FlatGround::new(0.0).on_layer(3);
        let origin = Vec3::new(0.0, 0.1, 0.0);
        assert!(ground.raycast(origin, Vec3::NEG_Y, 0.2, LayerMask::layer(3)).is_some());
        assert!(ground.raycast(origin, Vec3::NEG_Y, 0.2, LayerMask::layer(4)).is_none());
        assert!(ground.raycast(origin, Vec3::NEG_Y, 0.05, LayerMask::ALL).is_none());
        assert!(ground.raycast(origin, Vec3::Y, 10.0, LayerMask::ALL).is_none());
    }

    #[test]
    fn capsule_stops_at_floor_and_walls() {
        let mut ground = FlatGround::new(1.0).bounded(Vec2::splat(-5.0), Vec2::splat(5.0));
        let to = ground.move_avatar(Vec3::new(4.0, 1.5, 0.0), Vec3::new(3.0, -2.0, -9.0));
        assert_eq!(to, Vec3::new(5.0, 1.0, -5.0));
    }
}
