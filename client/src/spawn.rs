//! Randomised placement of freshly loaded objects.

use crate::scene::MeshNode;
use rand::Rng;
use shared::{ANGVEL_MIN, ANGVEL_SPREAD, Quat, Vec3};
use std::f32::consts::{PI, TAU};

/// Uniform point in the axis-aligned cube of side `zone_size` centred on the origin.
/// A zone without a usable size (zero, negative or non-finite) places at the origin.
pub fn random_position(rng: &mut impl Rng, zone_size: f32) -> Vec3 {
    let half = zone_size * 0.5;
    if !half.is_finite() || half <= 0.0 {
        return Vec3::zeros();
    }
    Vec3::new(
        rng.gen_range(-half..half),
        rng.gen_range(-half..half),
        rng.gen_range(-half..half),
    )
}

/// Initial spin: each component in `[ANGVEL_MIN, ANGVEL_MIN + ANGVEL_SPREAD)`, then turned
/// by a random rotation so objects do not all spin about similar axes.
pub fn random_angvel(rng: &mut impl Rng) -> Vec3 {
    let mut component = || ANGVEL_MIN + rng.gen_range(0.0..ANGVEL_SPREAD);
    let spin = Vec3::new(component(), component(), component());

    let turn = Quat::from_euler_angles(
        rng.gen_range(0.0..TAU),
        rng.gen_range(0.0..TAU),
        rng.gen_range(0.0..TAU),
    );
    turn * spin
}

/// Poses a loaded root: moved to `position`, flipped half a turn about its local Z axis and
/// scaled uniformly.
pub fn place(node: &mut MeshNode, position: Vec3, object_scale: f32) {
    node.translation = position;
    node.rotation *= Quat::from_axis_angle(&Vec3::z_axis(), PI);
    node.scale = Vec3::repeat(object_scale);
}
