//! Input collection: winit events accumulated into one snapshot per frame.

pub mod frame;
pub mod mouse;

pub use frame::{FrameInput, InputState};
pub use mouse::MouseState;
