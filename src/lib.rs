//! First-person movement and scale-driven texture tiling for a host engine.
//!
//! Both components are driven once per frame by a host loop and talk to the
//! engine only through the narrow traits in [`controller::physics`] and
//! [`view`], so they run headless under [`sandbox`] surfaces.

pub mod logging;
pub mod utils;
pub mod error;
pub mod config;
pub mod sandbox;

// MVC Architecture
pub mod model;
pub mod view;
pub mod controller;

pub use config::{AudioBindings, MovementSettings, StriderConfig, TextureScalerSettings};
pub use controller::{FrameLoop, FrameOutput, InputSnapshot, MovementController, TextureScaler};
pub use error::{Result, StriderError};
pub use model::{AvatarMotionState, AvatarPose, TilingState};
pub use view::{AudioCue, AudioEvent, MaterialMode};
