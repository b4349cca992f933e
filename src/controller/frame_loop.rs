use glam::Vec3;

use crate::model::AvatarPose;
use crate::utils::ObjectId;
use crate::view::{audio, AudioSurface, MaterialMode, MaterialSurface};

use super::input::{InputProcessor, InputSnapshot, InputState};
use super::movement::{FrameOutput, MovementController};
use super::physics::PhysicsSurface;
use super::texture_scaler::TextureScaler;

/// Largest frame step fed to the controllers, in seconds. Longer stalls
/// (debugger, tab switch) are treated as one slow frame.
pub const MAX_FRAME_DT: f32 = 0.1;

/// A texture scaler plus the world scale of the object it sits on.
#[derive(Debug, Clone, PartialEq)]
pub struct TiledObject {
    pub scaler: TextureScaler,
    pub world_scale: Vec3,
}

/// Main frame loop state: owns the controllers and the host surfaces and
/// runs one update per call to [`FrameLoop::step`].
pub struct FrameLoop<P, A, M> {
    pub controller: MovementController,
    pub tiled: Vec<TiledObject>,
    pub input_state: InputState,
    pub input_processor: InputProcessor,
    pub physics: P,
    pub audio: A,
    pub materials: M,
    pub mode: MaterialMode,
    frame: u64,
}

impl<P, A, M> FrameLoop<P, A, M>
where
    P: PhysicsSurface,
    A: AudioSurface,
    M: MaterialSurface,
{
    pub fn new(controller: MovementController, physics: P, audio: A, materials: M) -> Self {
        Self {
            controller,
            tiled: Vec::new(),
            input_state: InputState::new(),
            input_processor: InputProcessor::default(),
            physics,
            audio,
            materials,
            mode: MaterialMode::Simulation,
            frame: 0,
        }
    }

    /// Register a scaler; it is validated (auto-bound) against the material surface.
    pub fn add_tiled(&mut self, mut scaler: TextureScaler, world_scale: Vec3) -> ObjectId {
        scaler.validate(&self.materials);
        let object = scaler.object();
        self.tiled.push(TiledObject { scaler, world_scale });
        object
    }

    pub fn set_world_scale(&mut self, object: ObjectId, world_scale: Vec3) {
        for tiled in self.tiled.iter_mut().filter(|t| t.scaler.object() == object) {
            tiled.world_scale = world_scale;
        }
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn pose(&self) -> AvatarPose {
        self.controller.pose()
    }

    /// Update everything for one frame, reading input from `input_state`.
    pub fn step(&mut self, raw_dt: f32) -> FrameOutput {
        let input = self.input_processor.snapshot(&mut self.input_state);
        self.step_with(raw_dt, &input)
    }

    /// Same as [`FrameLoop::step`] with an externally built snapshot.
    pub fn step_with(&mut self, raw_dt: f32, input: &InputSnapshot) -> FrameOutput {
        let dt = if raw_dt.is_finite() { raw_dt.clamp(0.0, MAX_FRAME_DT) } else { 0.0 };
        self.frame += 1;

        let output = self.controller.tick(dt, input, &mut self.physics);
        audio::play_all(&mut self.audio, &output.audio);

        self.refresh_tiling(self.mode);

        tracing::trace!(frame = self.frame, dt, position = ?output.pose.position, grounded = output.pose.is_grounded, "frame");
        output
    }

    /// Rewrite every tiled material. Also the entry point for edit-time
    /// refreshes with [`MaterialMode::Authoring`].
    pub fn refresh_tiling(&mut self, mode: MaterialMode) {
        for tiled in &self.tiled {
            tiled.scaler.update(tiled.world_scale, mode, &mut self.materials);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{AudioBindings, MovementSettings, TextureScalerSettings};
    use crate::controller::input::InputEvent;
    use crate::sandbox::{FlatGround, MaterialTable, MixerLog};
    use crate::utils::{AudioClipId, AudioSourceId, RendererId};
    use glam::Vec2;

    fn frame_loop() -> FrameLoop<FlatGround, MixerLog, MaterialTable> {
        let settings = MovementSettings {
            audio: AudioBindings {
                footstep_source: Some(AudioSourceId(1)),
                footstep_clips: vec![AudioClipId(10)],
                jump_clip: Some(AudioClipId(20)),
                land_clip: Some(AudioClipId(30)),
            },
            ..MovementSettings::default()
        };
        let controller = MovementController::with_seed(settings, Vec3::ZERO, 5);
        FrameLoop::new(controller, FlatGround::new(0.0), MixerLog::new(), MaterialTable::new())
    }

    #[test]
    fn clamps_long_frames() {
        let mut fl = frame_loop();
        fl.step(0.0);
        fl.input_state.process_event(&InputEvent::KeyDown("w".to_string()));
        let before = fl.pose().position;
        fl.step(5.0);
        let moved = fl.pose().position - before;
        assert!((moved.length() - 5.0 * MAX_FRAME_DT).abs() < 1e-4);
        assert_eq!(fl.frame(), 2);
    }

    #[test]
    fn held_jump_key_jumps_once_and_plays_through_mixer() {
        let mut fl = frame_loop();
        fl.step(1.0 / 60.0);
        fl.input_state.process_event(&InputEvent::KeyDown(" ".to_string()));
        for _ in 0..120 {
            fl.step(1.0 / 60.0);
        }
        assert_eq!(fl.audio.count(AudioClipId(20)), 1);
        // airtime is about 1.3s, two seconds cover the landing
        assert_eq!(fl.audio.count(AudioClipId(30)), 1);
    }

    #[test]
    fn scalers_track_scale_changes() {
        let mut fl = frame_loop();
        fl.materials.attach(ObjectId(7), RendererId(70), Vec2::ONE);
        let settings = TextureScalerSettings { target: None, pixels_per_meter: 1024.0, texture_resolution: 1024 };
        let object = fl.add_tiled(TextureScaler::new(ObjectId(7), settings), Vec3::new(2.0, 1.0, 3.0));

        fl.step(1.0 / 60.0);
        assert_eq!(fl.materials.texture_scale(RendererId(70), MaterialMode::Simulation), Some(Vec2::new(2.0, 3.0)));

        fl.set_world_scale(object, Vec3::new(4.0, 9.0, 1.0));
        fl.step(1.0 / 60.0);
        assert_eq!(fl.materials.texture_scale(RendererId(70), MaterialMode::Simulation), Some(Vec2::new(4.0, 1.0)));
        assert_eq!(fl.materials.texture_scale(RendererId(70), MaterialMode::Authoring), Some(Vec2::ONE));

        fl.refresh_tiling(MaterialMode::Authoring);
        assert_eq!(fl.materials.texture_scale(RendererId(70), MaterialMode::Authoring), Some(Vec2::new(4.0, 1.0)));
    }
}
