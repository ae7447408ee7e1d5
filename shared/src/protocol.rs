/*!
Messages exchanged between the render thread and the physics thread.

There is exactly one channel per direction. Each channel is FIFO with at-most-once delivery;
no ordering is guaranteed *between* the two directions. In particular the render side can
receive an `active` report that names an object before it has seen that object's `rigidBody`
acknowledgement, and the physics side can receive a control message for an object whose
creation it has not processed yet. Handlers on both sides treat unresolved identifiers as
no-ops.

Each message kind keeps the tag it is known by in logs (`kind()`), so the two sides can be
correlated when reading output from both threads.

All vectors are in physics space.
*/

use crate::{BodyDesc, ObjectId, Quat, StaticBodyDesc, Vec3};

/// Render thread -> physics thread.
#[derive(Clone, Debug, PartialEq)]
pub enum ToPhysics {
    /// Build the simulation world. Acknowledged with [`ToRender::World`].
    World { gravity: Vec3 },
    /// Begin (or restart) the fixed-period tick.
    Start,
    /// Halt the tick.
    Stop,
    /// Create one dynamic body with one convex-hull collider per descriptor entry.
    /// Acknowledged with [`ToRender::RigidBody`].
    DynamicBodyWithConvexHullColliders(BodyDesc),
    /// Reserved: static body built from cuboids. Currently ignored by the physics thread.
    StaticBodyWithCuboidColliders(StaticBodyDesc),
    /// Overwrite the angular velocity of an existing body. No acknowledgement.
    SetAngvel { object_id: ObjectId, angvel: Vec3 },
    /// Apply a one-shot impulse to an existing body. No acknowledgement.
    ApplyImpulse { object_id: ObjectId, impulse: Vec3 },
}

impl ToPhysics {
    pub fn kind(&self) -> &'static str {
        match self {
            ToPhysics::World { .. } => "world",
            ToPhysics::Start => "start",
            ToPhysics::Stop => "stop",
            ToPhysics::DynamicBodyWithConvexHullColliders(_) => {
                "dynamicBodyWithConvexHullColliders"
            }
            ToPhysics::StaticBodyWithCuboidColliders(_) => "staticBodyWithCuboidColliders",
            ToPhysics::SetAngvel { .. } => "setAngvel",
            ToPhysics::ApplyImpulse { .. } => "applyImpulse",
        }
    }
}

/// Pose of one non-sleeping body at the end of a tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ActiveBody {
    pub object_id: ObjectId,
    /// Physics-space translation.
    pub translation: Vec3,
    pub rotation: Quat,
}

/// Physics thread -> render thread.
#[derive(Clone, Debug, PartialEq)]
pub enum ToRender {
    /// The physics thread is up and ready to receive `world`.
    Init,
    /// The world requested by [`ToPhysics::World`] exists.
    World,
    /// A dynamic body was created for `object_id`.
    RigidBody { object_id: ObjectId, mass: f32 },
    /// Bodies that are awake after the latest tick. Never sent empty; order is insignificant.
    Active(Vec<ActiveBody>),
}

impl ToRender {
    pub fn kind(&self) -> &'static str {
        match self {
            ToRender::Init => "init",
            ToRender::World => "world",
            ToRender::RigidBody { .. } => "rigidBody",
            ToRender::Active(_) => "active",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_match_protocol_tags() {
        let object_id = 1;
        let to_physics = [
            (ToPhysics::World { gravity: Vec3::zeros() }, "world"),
            (ToPhysics::Start, "start"),
            (ToPhysics::Stop, "stop"),
            (
                ToPhysics::SetAngvel {
                    object_id,
                    angvel: Vec3::x(),
                },
                "setAngvel",
            ),
            (
                ToPhysics::ApplyImpulse {
                    object_id,
                    impulse: Vec3::y(),
                },
                "applyImpulse",
            ),
        ];
        for (msg, kind) in to_physics {
            assert_eq!(msg.kind(), kind);
        }

        let to_render = [
            (ToRender::Init, "init"),
            (ToRender::World, "world"),
            (ToRender::RigidBody { object_id, mass: 1.0 }, "rigidBody"),
            (ToRender::Active(Vec::new()), "active"),
        ];
        for (msg, kind) in to_render {
            assert_eq!(msg.kind(), kind);
        }
    }
}
