use glam::{Vec2, Vec3};

use super::camera::CameraRig;

/// Vertical velocity a grounded avatar is pinned to. Must stay below zero so
/// the capsule keeps pressing into the floor.
pub const GROUNDED_VELOCITY: f32 = -2.0;

/// Per-avatar motion state, mutated once per frame by the movement controller.
#[derive(Debug, Clone, PartialEq)]
pub struct AvatarMotionState {
    pub position: Vec3,
    pub yaw: f32,
    pub vertical_velocity: f32,
    pub is_grounded: bool,
    pub was_grounded_last_frame: bool,
    pub bob_phase: f32,
    pub footstep_armed: bool,
    pub land_sound_timer: f32,
    /// Last frame's move input, kept for bob and footsteps.
    pub move_input: Vec2,
    pub camera: CameraRig,
}

impl AvatarMotionState {
    pub fn new(position: Vec3, camera_rest_offset: Vec3) -> Self {
        Self {
            position,
            yaw: 0.0,
            vertical_velocity: 0.0,
            is_grounded: false,
            was_grounded_last_frame: true,
            bob_phase: 0.0,
            footstep_armed: true,
            land_sound_timer: 0.0,
            move_input: Vec2::ZERO,
            camera: CameraRig::new(camera_rest_offset),
        }
    }
}

/// Snapshot of the pose written back to the host after a frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AvatarPose {
    pub position: Vec3,
    pub yaw: f32,
    pub pitch: f32,
    pub camera_local_offset: Vec3,
    pub is_grounded: bool,
}

impl From<&AvatarMotionState> for AvatarPose {
    fn from(state: &AvatarMotionState) -> Self {
        Self {
            position: state.position,
            yaw: state.yaw,
            pitch: state.camera.pitch,
            camera_local_offset: state.camera.local_offset,
            is_grounded: state.is_grounded,
        }
    }
}
