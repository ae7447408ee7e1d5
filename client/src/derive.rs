//! Turning a loaded, placed [`MeshNode`] into the body descriptor the physics thread builds
//! from.
//!
//! Everything in the descriptor is in physics space. The root's scale is baked into the
//! vertices and the child offsets because Rapier colliders carry no scale:
//!
//! - vertex:       `v[c] * scale[c] * physics_scale`
//! - child offset: `t[c] * scale[c] * physics_scale`
//! - rotations:    copied unscaled
//!
//! Only direct mesh children become colliders. Group children are skipped, as are meshes
//! without any positions.

use crate::{error::DeriveError, scene::MeshNode};
use shared::{BodyDesc, ColliderDesc, ObjectId, to_physics};

pub fn derive_body_desc(
    object_id: ObjectId,
    node: &MeshNode,
    physics_scale: f32,
) -> Result<BodyDesc, DeriveError> {
    let scale = node.scale * physics_scale;
    let mut colliders = Vec::with_capacity(node.children.len());

    for child in &node.children {
        let Some(positions) = child.positions() else {
            continue;
        };
        if positions.is_empty() {
            continue;
        }
        if positions.len() % 3 != 0 {
            return Err(DeriveError::MalformedVertices {
                object_id,
                child: child.name.clone(),
                len: positions.len(),
            });
        }

        let vertices = positions
            .chunks_exact(3)
            .flat_map(|v| [v[0] * scale.x, v[1] * scale.y, v[2] * scale.z])
            .collect();

        colliders.push(ColliderDesc {
            translation_wrt_parent: child.translation.component_mul(&scale),
            rotation_wrt_parent: child.rotation,
            vertices,
        });
    }

    if colliders.is_empty() {
        return Err(DeriveError::NoColliders {
            object_id,
            name: node.name.clone(),
        });
    }

    Ok(BodyDesc {
        object_id,
        translation: to_physics(node.translation, physics_scale),
        rotation: node.rotation,
        colliders,
    })
}
