use glam::Vec2;

use crate::utils::{ObjectId, RendererId};

/// Which copy of a renderer's material a write lands on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MaterialMode {
    /// Running simulation: write the per-instance material, instancing it
    /// from the shared asset on first touch.
    Simulation,
    /// Authoring/edit context: write the shared asset directly.
    Authoring,
}

/// Host render/material capability.
pub trait MaterialSurface {
    /// Renderer attached to the same scene object, if any.
    fn renderer_on(&self, object: ObjectId) -> Option<RendererId>;

    fn texture_scale(&self, renderer: RendererId, mode: MaterialMode) -> Option<Vec2>;

    fn set_texture_scale(&mut self, renderer: RendererId, mode: MaterialMode, scale: Vec2);
}
