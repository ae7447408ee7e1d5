//! Identity bridge between render-side object ids and Rapier body handles.
//!
//! The bridge is owned by the physics worker and never leaves the physics thread: the render
//! side only ever sees [`ObjectId`]s, Rapier handles only ever live here.
//!
//! Entries are written exactly once, synchronously inside body creation and before the
//! creation is acknowledged, so by the time any report could name a handle its object id is
//! known. There is no removal path.

use crate::error::IdentityError;
use shared::rapier3d::{parry::utils::hashmap::HashMap, prelude::RigidBodyHandle};
use shared::ObjectId;

/// One-to-one `ObjectId <-> RigidBodyHandle` mapping.
#[derive(Debug, Default)]
pub struct IdentityBridge {
    handles: HashMap<ObjectId, RigidBodyHandle>,
    objects: HashMap<RigidBodyHandle, ObjectId>,
}

impl IdentityBridge {
    pub fn new() -> Self {
        Self::default()
    }

    /// Installs both directions of the mapping.
    ///
    /// Either side being bound already is rejected and leaves the bridge unchanged, so the
    /// mapping stays a bijection.
    pub fn register(
        &mut self,
        object_id: ObjectId,
        handle: RigidBodyHandle,
    ) -> Result<(), IdentityError> {
        if self.handles.contains_key(&object_id) {
            return Err(IdentityError::ObjectAlreadyRegistered(object_id));
        }
        if let Some(owner) = self.objects.get(&handle) {
            return Err(IdentityError::HandleAlreadyRegistered(*owner));
        }

        self.handles.insert(object_id, handle);
        self.objects.insert(handle, object_id);
        Ok(())
    }

    /// Body handle for an object id, `None` if the object has no body (yet).
    #[inline]
    pub fn handle_of(&self, object_id: ObjectId) -> Option<RigidBodyHandle> {
        self.handles.get(&object_id).copied()
    }

    /// Object id for a body handle, `None` if the handle was never registered.
    #[inline]
    pub fn object_of(&self, handle: RigidBodyHandle) -> Option<ObjectId> {
        self.objects.get(&handle).copied()
    }

    #[inline]
    pub fn contains_object(&self, object_id: ObjectId) -> bool {
        self.handles.contains_key(&object_id)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.handles.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }
}
