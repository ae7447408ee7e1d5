/*!
Math aliases and render <-> physics space conversions.

Two coordinate spaces coexist:
- render space: object/world units as authored.
- physics space: render space multiplied by a fixed linear factor (`PHYSICS_SCALE` by default).

Everything that crosses the thread boundary is in physics space. The render side converts
back only when it writes a pose onto a scene node. Rotations are scale-invariant and are
never converted.
*/

use nalgebra as na;

/// Common math aliases for clarity and consistency.
pub type Vec3 = na::Vector3<f32>;
pub type Quat = na::UnitQuaternion<f32>;

/// Converts a render-space vector into physics space.
#[inline]
pub fn to_physics(v: Vec3, physics_scale: f32) -> Vec3 {
    v * physics_scale
}

/// Converts a physics-space vector back into render space.
#[inline]
pub fn to_render(v: Vec3, physics_scale: f32) -> Vec3 {
    v / physics_scale
}
