//! Rigid-body creation descriptors and their Rapier builders.
//!
//! The render thread fills these from loaded mesh hierarchies; the physics thread turns them
//! into Rapier bodies and colliders. Everything in here is already in physics space.

use crate::{ObjectId, Quat, Vec3};
use rapier3d::prelude::*;

/// One convex-hull collider attached to a dynamic body.
#[derive(Clone, Debug, PartialEq)]
pub struct ColliderDesc {
    /// Offset of the collider relative to its parent body (physics space).
    pub translation_wrt_parent: Vec3,
    /// Rotation of the collider relative to its parent body.
    pub rotation_wrt_parent: Quat,
    /// Flat `[x0, y0, z0, x1, ...]` point cloud (physics space) the hull is computed from.
    pub vertices: Vec<f32>,
}

impl ColliderDesc {
    /// Number of points in the vertex buffer.
    #[inline]
    pub fn point_count(&self) -> usize {
        self.vertices.len() / 3
    }

    /// Reinterprets the flat vertex buffer as Rapier points.
    ///
    /// A trailing partial triple is ignored; producers reject such buffers before sending.
    pub fn points(&self) -> Vec<Point<Real>> {
        self.vertices
            .chunks_exact(3)
            .map(|v| point![v[0], v[1], v[2]])
            .collect()
    }
}

/// Everything needed to build one dynamic body with convex-hull colliders.
///
/// Invariant: `colliders` is never empty. Producers return a construction error instead of
/// building an empty descriptor, since a body without colliders has no mass and no shape.
#[derive(Clone, Debug, PartialEq)]
pub struct BodyDesc {
    pub object_id: ObjectId,
    /// Initial body translation (physics space).
    pub translation: Vec3,
    /// Initial body rotation.
    pub rotation: Quat,
    pub colliders: Vec<ColliderDesc>,
}

/// Oriented box collider of a static body.
#[derive(Clone, Debug, PartialEq)]
pub struct CuboidDesc {
    pub translation_wrt_parent: Vec3,
    pub rotation_wrt_parent: Quat,
    pub half_extents: Vec3,
}

/// Static body made of cuboids.
///
/// Reserved in the protocol; the physics thread does not build these yet.
#[derive(Clone, Debug, PartialEq)]
pub struct StaticBodyDesc {
    pub object_id: ObjectId,
    pub translation: Vec3,
    pub rotation: Quat,
    pub cuboids: Vec<CuboidDesc>,
}

/// Builds the dynamic rigid body for a descriptor, posed at its initial transform.
pub fn rigid_body_from_desc(desc: &BodyDesc) -> RigidBody {
    RigidBodyBuilder::dynamic()
        .translation(desc.translation)
        .rotation(desc.rotation.scaled_axis())
        .build()
}

/// Builds a convex-hull collider for one descriptor entry.
///
/// The local pose is the collider's offset relative to its parent body.
/// Returns `None` when Rapier cannot compute a hull (fewer than four points, all coplanar, ...).
pub fn collider_from_desc(desc: &ColliderDesc) -> Option<Collider> {
    // A 3D hull needs at least four points; don't hand smaller clouds to the hull builder.
    if desc.point_count() < 4 {
        return None;
    }
    let builder = ColliderBuilder::convex_hull(&desc.points())?;
    Some(
        builder
            .translation(desc.translation_wrt_parent)
            .rotation(desc.rotation_wrt_parent.scaled_axis())
            .build(),
    )
}
