use glam::{Vec2, Vec3};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::config::MovementSettings;
use crate::model::camera::{body_forward, body_right};
use crate::model::{AvatarMotionState, AvatarPose};
use crate::utils::{ease_toward, wrap_degrees};
use crate::view::{AudioCue, AudioEvent};

use super::input::InputSnapshot;
use super::physics::{GroundProbe, PhysicsSurface, VerticalMotion};

/// Input magnitude above which the avatar counts as walking.
const MOVE_THRESHOLD: f32 = 0.1;
/// Camera return speed toward its rest offset, per second.
const CAMERA_RETURN_RATE: f32 = 8.0;
/// `sin(bob_phase)` below this is the foot-down trough of the gait.
const FOOTSTEP_TRIGGER: f32 = -0.95;
/// `sin(bob_phase)` above this re-arms the footstep latch.
const FOOTSTEP_REARM: f32 = -0.5;

/// What a single tick hands back to the host.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameOutput {
    pub pose: AvatarPose,
    pub audio: Vec<AudioEvent>,
}

/// First-person character controller.
///
/// Owns the avatar's motion state and advances it once per frame in a fixed
/// order: look, planar move + ground probe + gravity, jump, head bob,
/// footsteps, landing. Physics goes through the injected [`PhysicsSurface`];
/// sounds are returned as [`AudioEvent`]s for the host to play.
pub struct MovementController {
    settings: MovementSettings,
    probe: GroundProbe,
    vertical: VerticalMotion,
    state: AvatarMotionState,
    rng: ChaCha8Rng,
}

impl MovementController {
    pub fn new(settings: MovementSettings, spawn: Vec3) -> Self {
        let rng = ChaCha8Rng::from_rng(&mut rand::rng());
        Self::build(settings, spawn, rng)
    }

    /// Deterministic footstep selection, for replays and tests.
    pub fn with_seed(settings: MovementSettings, spawn: Vec3, seed: u64) -> Self {
        Self::build(settings, spawn, ChaCha8Rng::seed_from_u64(seed))
    }

    fn build(settings: MovementSettings, spawn: Vec3, rng: ChaCha8Rng) -> Self {
        let probe = GroundProbe {
            origin_offset: settings.ground_check_origin,
            distance: settings.ground_check_distance,
            mask: settings.ground_mask,
        };
        let vertical = VerticalMotion { gravity: settings.gravity };
        let state = AvatarMotionState::new(spawn, settings.camera_offset);
        tracing::debug!(?spawn, walk = settings.walk_speed, run = settings.run_speed, "movement controller attached");
        Self { settings, probe, vertical, state, rng }
    }

    pub fn settings(&self) -> &MovementSettings {
        &self.settings
    }

    pub fn state(&self) -> &AvatarMotionState {
        &self.state
    }

    pub fn pose(&self) -> AvatarPose {
        AvatarPose::from(&self.state)
    }

    /// Host-side reposition (respawn, portal). Velocity is kept.
    pub fn teleport(&mut self, position: Vec3) {
        self.state.position = position;
    }

    pub fn is_moving(&self) -> bool {
        self.state.move_input.length() > MOVE_THRESHOLD && self.state.is_grounded
    }

    /// Advance one frame.
    pub fn tick<P: PhysicsSurface + ?Sized>(&mut self, dt: f32, input: &InputSnapshot, physics: &mut P) -> FrameOutput {
        let mut audio = Vec::new();

        self.apply_look(input.look_delta);
        self.apply_movement(input, physics, dt);
        audio.extend(self.apply_jump(input.jump_pressed));
        self.apply_head_bob(input.run_held, dt);
        audio.extend(self.apply_footsteps());
        audio.extend(self.apply_landing(dt));

        FrameOutput { pose: self.pose(), audio }
    }

    fn apply_look(&mut self, look_delta: Vec2) {
        let look = look_delta * self.settings.mouse_sensitivity;
        let max = self.settings.max_look_angle;
        self.state.yaw = wrap_degrees(self.state.yaw + look.x);
        self.state.camera.pitch = (self.state.camera.pitch + look.y).clamp(-max, max);
    }

    fn apply_movement<P: PhysicsSurface + ?Sized>(&mut self, input: &InputSnapshot, physics: &mut P, dt: f32) {
        self.state.move_input = input.move_axis;
        let speed = if input.run_held { self.settings.run_speed } else { self.settings.walk_speed };
        let planar = body_right(self.state.yaw) * input.move_axis.x + body_forward(self.state.yaw) * input.move_axis.y;
        self.state.position = physics.move_avatar(self.state.position, planar * speed * dt);

        let contact = self.probe.probe(&*physics, self.state.position);
        self.state.is_grounded = contact.is_some();
        if let Some(hit) = contact.filter(|_| !self.state.was_grounded_last_frame) {
            tracing::trace!(distance = hit.distance, layer = hit.layer, point = ?hit.point, "ground contact");
        }

        self.state.vertical_velocity = self.vertical.integrate(self.state.vertical_velocity, self.state.is_grounded, dt);
        let fall = Vec3::Y * self.state.vertical_velocity * dt;
        self.state.position = physics.move_avatar(self.state.position, fall);
    }

    fn apply_jump(&mut self, jump_pressed: bool) -> Option<AudioEvent> {
        if !(jump_pressed && self.state.is_grounded) {
            return None;
        }
        self.state.vertical_velocity = self.vertical.jump_velocity(self.settings.jump_height);
        tracing::debug!(velocity = self.state.vertical_velocity, "jump");
        let audio = &self.settings.audio;
        AudioEvent::resolve(AudioCue::Jump, audio.footstep_source, audio.jump_clip)
    }

    fn apply_head_bob(&mut self, running: bool, dt: f32) {
        let camera = &mut self.state.camera;
        if self.state.move_input.length() > MOVE_THRESHOLD && self.state.is_grounded {
            let multiplier = if running { self.settings.run_bob_multiplier } else { 1.0 };
            self.state.bob_phase += dt * self.settings.bob_frequency * multiplier;
            let mut offset = camera.rest_offset;
            offset.y += self.state.bob_phase.sin() * self.settings.bob_amplitude;
            camera.local_offset = offset;
        } else {
            self.state.bob_phase = 0.0;
            camera.local_offset = ease_toward(camera.local_offset, camera.rest_offset, CAMERA_RETURN_RATE, dt);
        }
    }

    fn apply_footsteps(&mut self) -> Option<AudioEvent> {
        if !self.is_moving() {
            self.state.footstep_armed = true;
            return None;
        }

        let wave = self.state.bob_phase.sin();
        let mut event = None;
        if wave < FOOTSTEP_TRIGGER && self.state.footstep_armed {
            self.state.footstep_armed = false;
            event = self.pick_footstep();
            tracing::trace!(phase = self.state.bob_phase, played = event.is_some(), "footstep");
        }
        if wave > FOOTSTEP_REARM {
            self.state.footstep_armed = true;
        }
        event
    }

    fn pick_footstep(&mut self) -> Option<AudioEvent> {
        let audio = &self.settings.audio;
        if audio.footstep_clips.is_empty() {
            return None;
        }
        let index = self.rng.random_range(0..audio.footstep_clips.len());
        AudioEvent::resolve(AudioCue::Footstep, audio.footstep_source, audio.footstep_clips.get(index).copied())
    }

    fn apply_landing(&mut self, dt: f32) -> Option<AudioEvent> {
        self.state.land_sound_timer += dt;

        let mut event = None;
        let landed = !self.state.was_grounded_last_frame && self.state.is_grounded;
        if landed && self.state.land_sound_timer > self.settings.land_sound_cooldown {
            tracing::debug!(since_last = self.state.land_sound_timer, "landed");
            self.state.land_sound_timer = 0.0;
            let audio = &self.settings.audio;
            event = AudioEvent::resolve(AudioCue::Land, audio.footstep_source, audio.land_clip);
        }

        self.state.was_grounded_last_frame = self.state.is_grounded;
        event
    }
}
