use std::fs;
use std::path::Path;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::error::{Result, StriderError};
use crate::utils::{AudioClipId, AudioSourceId, LayerMask, RendererId};

/// Top-level settings file.
///
/// Every section and field falls back to its default, so an empty file is a
/// valid configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StriderConfig {
    pub movement: MovementSettings,
    pub texture: TextureScalerSettings,
}

impl StriderConfig {
    /// Read and validate a TOML settings file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| StriderError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&content)?;
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content).map_err(|source| StriderError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn validate(&self) -> Result<()> {
        self.movement.validate()?;
        self.texture.validate()
    }
}

// =================================================================================================
//
//                                            Movement
//
// =================================================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MovementSettings {
    pub walk_speed: f32,
    pub run_speed: f32,
    pub jump_height: f32,
    /// Must be negative.
    pub gravity: f32,

    /// Degrees of rotation per unit of look input.
    pub mouse_sensitivity: f32,
    /// Pitch limit in degrees, applied symmetrically.
    pub max_look_angle: f32,

    pub ground_check_distance: f32,
    pub ground_mask: LayerMask,
    /// Probe origin relative to the avatar's foot point.
    pub ground_check_origin: Vec3,

    pub bob_frequency: f32,
    pub bob_amplitude: f32,
    pub run_bob_multiplier: f32,

    /// Camera position relative to the avatar's foot point when at rest.
    pub camera_offset: Vec3,

    pub land_sound_cooldown: f32,
    pub audio: AudioBindings,
}

impl Default for MovementSettings {
    fn default() -> Self {
        Self {
            walk_speed: 5.0,
            run_speed: 9.0,
            jump_height: 2.0,
            gravity: -9.81,
            mouse_sensitivity: 2.0,
            max_look_angle: 80.0,
            ground_check_distance: 0.2,
            ground_mask: LayerMask::default(),
            ground_check_origin: Vec3::new(0.0, 0.1, 0.0),
            bob_frequency: 1.5,
            bob_amplitude: 0.05,
            run_bob_multiplier: 1.5,
            camera_offset: Vec3::new(0.0, 1.6, 0.0),
            land_sound_cooldown: 0.2,
            audio: AudioBindings::default(),
        }
    }
}

impl MovementSettings {
    pub fn validate(&self) -> Result<()> {
        positive("movement.walk_speed", self.walk_speed)?;
        positive("movement.run_speed", self.run_speed)?;
        positive("movement.jump_height", self.jump_height)?;
        if !(self.gravity < 0.0) {
            return Err(StriderError::invalid("movement.gravity", format!("must be negative, got {}", self.gravity)));
        }
        non_negative("movement.mouse_sensitivity", self.mouse_sensitivity)?;
        if !(self.max_look_angle > 0.0 && self.max_look_angle <= 90.0) {
            return Err(StriderError::invalid(
                "movement.max_look_angle",
                format!("must be in (0, 90], got {}", self.max_look_angle),
            ));
        }
        positive("movement.ground_check_distance", self.ground_check_distance)?;
        non_negative("movement.bob_frequency", self.bob_frequency)?;
        non_negative("movement.bob_amplitude", self.bob_amplitude)?;
        non_negative("movement.run_bob_multiplier", self.run_bob_multiplier)?;
        non_negative("movement.land_sound_cooldown", self.land_sound_cooldown)
    }
}

/// Host audio handles used for movement cues. Anything left unset simply
/// produces no sound.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioBindings {
    pub footstep_source: Option<AudioSourceId>,
    pub footstep_clips: Vec<AudioClipId>,
    pub jump_clip: Option<AudioClipId>,
    pub land_clip: Option<AudioClipId>,
}

// =================================================================================================
//
//                                            Texture
//
// =================================================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextureScalerSettings {
    pub target: Option<RendererId>,
    pub pixels_per_meter: f32,
    pub texture_resolution: u32,
}

impl Default for TextureScalerSettings {
    fn default() -> Self {
        Self {
            target: None,
            pixels_per_meter: 2094.5,
            texture_resolution: 4096,
        }
    }
}

impl TextureScalerSettings {
    pub fn validate(&self) -> Result<()> {
        positive("texture.pixels_per_meter", self.pixels_per_meter)?;
        if self.texture_resolution == 0 {
            return Err(StriderError::invalid("texture.texture_resolution", "must be non-zero"));
        }
        Ok(())
    }

    /// Take `texture_resolution` from the width of an image on disk.
    pub fn with_resolution_from_image(mut self, path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let (width, height) = image::image_dimensions(path).map_err(|source| StriderError::Texture {
            path: path.to_path_buf(),
            source,
        })?;
        if width == 0 {
            return Err(StriderError::invalid("texture.texture_resolution", "image has zero width"));
        }
        if width != height {
            tracing::warn!(path = %path.display(), width, height, "non-square texture, using width");
        }
        self.texture_resolution = width;
        Ok(self)
    }
}

fn positive(field: &'static str, value: f32) -> Result<()> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(StriderError::invalid(field, format!("must be positive, got {value}")))
    }
}

fn non_negative(field: &'static str, value: f32) -> Result<()> {
    if value >= 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(StriderError::invalid(field, format!("must be non-negative, got {value}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_yields_defaults() {
        let config = StriderConfig::from_toml_str("").unwrap();
        assert_eq!(config, StriderConfig::default());
        assert_eq!(config.movement.walk_speed, 5.0);
        assert_eq!(config.texture.texture_resolution, 4096);
    }

    #[test]
    fn partial_sections_override_fields() {
        let config = StriderConfig::from_toml_str(
            r#"
            [movement]
            run_speed = 12.0
            ground_mask = 8
            ground_check_origin = [0.0, 0.05, 0.0]

            [movement.audio]
            footstep_source = 1
            footstep_clips = [10, 11, 12]
            land_clip = 20

            [texture]
            target = 7
            pixels_per_meter = 2048.0
            texture_resolution = 1024
            "#,
        )
        .unwrap();
        assert_eq!(config.movement.run_speed, 12.0);
        assert_eq!(config.movement.walk_speed, 5.0);
        assert_eq!(config.movement.ground_mask, LayerMask::layer(3));
        assert_eq!(config.movement.audio.footstep_clips.len(), 3);
        assert_eq!(config.movement.audio.jump_clip, None);
        assert_eq!(config.texture.target, Some(RendererId(7)));
    }

    #[test]
    fn rejects_upward_gravity() {
        let err = StriderConfig::from_toml_str("[movement]\ngravity = 9.81\n").unwrap_err();
        assert!(matches!(err, StriderError::Invalid { field: "movement.gravity", .. }));
    }

    #[test]
    fn rejects_zero_resolution() {
        let err = StriderConfig::from_toml_str("[texture]\ntexture_resolution = 0\n").unwrap_err();
        assert!(matches!(err, StriderError::Invalid { field: "texture.texture_resolution", .. }));
    }

    #[test]
    fn reports_parse_errors() {
        let err = StriderConfig::from_toml_str("[movement\n").unwrap_err();
        assert!(matches!(err, StriderError::ConfigParse(_)));
    }

    #[test]
    fn save_then_load_preserves_settings() {
        let mut config = StriderConfig::default();
        config.movement.max_look_angle = 70.0;
        config.texture.target = Some(RendererId(3));
        let path = std::env::temp_dir().join(format!("strider-config-{}.toml", std::process::id()));
        config.save(&path).unwrap();
        let loaded = StriderConfig::load(&path).unwrap();
        let _ = fs::remove_file(&path);
        assert_eq!(loaded, config);
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = StriderConfig::load("/nonexistent/strider.toml").unwrap_err();
        assert!(matches!(err, StriderError::Io { .. }));
    }
}
