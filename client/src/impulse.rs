use shared::Vec3;

/// One-shot impulse pulling a freshly created body back towards the world origin.
///
/// The impulse is `-p̂ * coefficient * mass * physics_scale`, where `p̂` is the unit direction
/// of `position`. Direction does not depend on which space `position` is expressed in, so the
/// render-side node position can be passed directly. A node sitting on the origin has no
/// direction to pull along and gets `None`.
pub fn restoring_impulse(
    position: Vec3,
    mass: f32,
    coefficient: f32,
    physics_scale: f32,
) -> Option<Vec3> {
    let towards_origin = (-position).try_normalize(f32::EPSILON)?;
    Some(towards_origin * (coefficient * mass * physics_scale))
}
