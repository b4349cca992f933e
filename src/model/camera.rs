use glam::{Quat, Vec3};

/// Avatar body frame: right-handed, Y up, yaw 0 looks down -Z and positive
/// yaw turns right (clockwise seen from above).
pub fn body_forward(yaw_degrees: f32) -> Vec3 {
    let yaw = yaw_degrees.to_radians();
    Vec3::new(yaw.sin(), 0.0, -yaw.cos())
}

pub fn body_right(yaw_degrees: f32) -> Vec3 {
    let yaw = yaw_degrees.to_radians();
    Vec3::new(yaw.cos(), 0.0, yaw.sin())
}

pub fn body_rotation(yaw_degrees: f32) -> Quat {
    Quat::from_rotation_y(-yaw_degrees.to_radians())
}

/// First-person camera attached to the avatar body.
///
/// Only pitch lives here; yaw belongs to the body. `local_offset` is the
/// position relative to the body origin and carries the head bob.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraRig {
    pub rest_offset: Vec3,
    pub local_offset: Vec3,
    pub pitch: f32,
}

impl CameraRig {
    pub fn new(rest_offset: Vec3) -> Self {
        Self { rest_offset, local_offset: rest_offset, pitch: 0.0 }
    }

    /// Rotation relative to the body; positive pitch looks up.
    pub fn local_rotation(&self) -> Quat {
        Quat::from_rotation_x(self.pitch.to_radians())
    }

    pub fn eye(&self, body_position: Vec3, yaw_degrees: f32) -> Vec3 {
        body_position + body_rotation(yaw_degrees) * self.local_offset
    }

    pub fn forward(&self, yaw_degrees: f32) -> Vec3 {
        (body_rotation(yaw_degrees) * self.local_rotation() * Vec3::NEG_Z).normalize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn positive_yaw_turns_right() {
        let f = body_forward(90.0);
        assert_relative_eq!(f.x, 1.0, epsilon = 1e-5);
        assert_relative_eq!(f.z, 0.0, epsilon = 1e-5);
        assert_relative_eq!(body_right(0.0).x, 1.0, epsilon = 1e-5);
        let rotated = body_rotation(90.0) * Vec3::NEG_Z;
        assert_relative_eq!(rotated.x, f.x, epsilon = 1e-5);
        assert_relative_eq!(rotated.z, f.z, epsilon = 1e-5);
    }

    #[test]
    fn pitch_tilts_only_the_view() {
        let mut rig = CameraRig::new(Vec3::new(0.0, 1.6, 0.0));
        rig.pitch = 45.0;
        let f = rig.forward(0.0);
        assert!(f.y > 0.7);
        assert!(f.z < -0.7);
        assert_eq!(rig.eye(Vec3::ZERO, 0.0), Vec3::new(0.0, 1.6, 0.0));
    }

    #[test]
    fn new_rig_rests_level() {
        let rest = Vec3::new(0.0, 1.6, 0.0);
        assert_eq!(CameraRig::new(rest), CameraRig { rest_offset: rest, local_offset: rest, pitch: 0.0 });
    }

    #[test]
    fn eye_follows_body_yaw_and_bob() {
        let mut rig = CameraRig::new(Vec3::new(0.0, 1.6, 0.5));
        rig.local_offset.y += 0.05;
        let eye = rig.eye(Vec3::new(1.0, 0.0, 0.0), 90.0);
        // +Z behind the body ends up at -X after turning right
        assert_relative_eq!(eye.x, 0.5, epsilon = 1e-5);
        assert_relative_eq!(eye.y, 1.65, epsilon = 1e-5);
        assert_relative_eq!(eye.z, 0.0, epsilon = 1e-5);
    }
}
