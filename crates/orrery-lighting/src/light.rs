//! Light position in camera space.

use glam::{Mat4, Vec3};

/// Transform the emitter's world position by the view matrix (as a point,
/// so the camera translation applies).
pub fn light_position_view(view: Mat4, emitter_world: Vec3) -> Vec3 {
    view.transform_point3(emitter_world)
}
