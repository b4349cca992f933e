// MODEL: Avatar and tiling state
pub mod camera;
pub mod motion;
pub mod tiling;

pub use camera::CameraRig;
pub use motion::{AvatarMotionState, AvatarPose, GROUNDED_VELOCITY};
pub use tiling::TilingState;
