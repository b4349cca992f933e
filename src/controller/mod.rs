// CONTROLLER: Input, movement, tiling and the frame loop
pub mod input;
pub mod physics;
pub mod movement;
pub mod texture_scaler;
pub mod frame_loop;

pub use input::{InputEvent, InputProcessor, InputSnapshot, InputState, KeyBindings};
pub use physics::{GroundProbe, PhysicsSurface, RayHit, VerticalMotion};
pub use movement::{FrameOutput, MovementController};
pub use texture_scaler::TextureScaler;
pub use frame_loop::{FrameLoop, TiledObject, MAX_FRAME_DT};
