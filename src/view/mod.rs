// VIEW: Host audio and material surfaces
pub mod audio;
pub mod material;

pub use audio::{AudioCue, AudioEvent, AudioSurface};
pub use material::{MaterialMode, MaterialSurface};
