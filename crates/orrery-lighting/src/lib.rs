//! Point-light lighting for the orrery: the camera-space light vector and the
//! tangent-space normal-mapping program used by the one normal-mapped body.

pub mod light;
pub mod normal_map;
pub mod pipeline;

pub use light::light_position_view;
pub use normal_map::{TangentFrame, decode_normal, shade};
pub use pipeline::LightingPipeline;
