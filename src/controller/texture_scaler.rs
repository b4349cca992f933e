use glam::{Vec2, Vec3};

use crate::config::TextureScalerSettings;
use crate::model::TilingState;
use crate::utils::{ObjectId, RendererId};
use crate::view::{MaterialMode, MaterialSurface};

/// Keeps texel density constant on a resizable surface by rewriting the
/// material's texture repeat from the object's world scale.
#[derive(Debug, Clone, PartialEq)]
pub struct TextureScaler {
    object: ObjectId,
    settings: TextureScalerSettings,
}

impl TextureScaler {
    pub fn new(object: ObjectId, settings: TextureScalerSettings) -> Self {
        if let Err(err) = settings.validate() {
            tracing::warn!(object = object.0, %err, "texture scaler will not write tiling");
        }
        Self { object, settings }
    }

    pub fn object(&self) -> ObjectId {
        self.object
    }

    pub fn target(&self) -> Option<RendererId> {
        self.settings.target
    }

    pub fn settings(&self) -> &TextureScalerSettings {
        &self.settings
    }

    /// Settings were edited: bind to the object's own renderer if no target
    /// is set yet.
    pub fn validate<M: MaterialSurface + ?Sized>(&mut self, materials: &M) {
        if self.settings.target.is_some() {
            return;
        }
        self.settings.target = materials.renderer_on(self.object);
        match self.settings.target {
            Some(renderer) => tracing::debug!(object = self.object.0, renderer = renderer.0, "auto-bound texture target"),
            None => tracing::debug!(object = self.object.0, "no renderer to bind"),
        }
    }

    pub fn tiling(&self, world_scale: Vec3) -> TilingState {
        TilingState::compute(self.settings.pixels_per_meter, self.settings.texture_resolution, world_scale)
    }

    /// Write the tiling for this frame. Returns the repeat written, or `None`
    /// when there is no target or the density settings are unusable.
    pub fn update<M: MaterialSurface + ?Sized>(
        &self,
        world_scale: Vec3,
        mode: MaterialMode,
        materials: &mut M,
    ) -> Option<Vec2> {
        let Some(renderer) = self.settings.target else {
            tracing::trace!(object = self.object.0, "texture scaler unbound, skipping");
            return None;
        };
        if self.settings.validate().is_err() {
            tracing::trace!(object = self.object.0, "texture scaler settings invalid, skipping");
            return None;
        }
        let repeat = self.tiling(world_scale).repeat;
        materials.set_texture_scale(renderer, mode, repeat);
        Some(repeat)
    }
}
