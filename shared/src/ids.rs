/// Render-side identifier of a spawned scene node.
///
/// # Why this exists
/// The physics thread hands out its own rigid-body handles, which are meaningless on the render
/// side. Every message crossing the boundary names objects by this identifier instead, and the
/// physics side keeps the translation table (see `physics_server::IdentityBridge`).
///
/// # Invariants
/// - Assigned once, when the node is created, by an [`ObjectIdAllocator`].
/// - Stable for the node's lifetime.
/// - Never reused for the lifetime of the process (there is no removal path).
/// - `0` is never handed out, so it can be used as a sentinel in logs and tests.
pub type ObjectId = u64;

/// Monotonic source of [`ObjectId`]s.
///
/// One allocator is owned by the render context. Identifiers start at 1 and increase by one per
/// allocation, including allocations whose object later fails to spawn: a burnt identifier is
/// never handed out again.
#[derive(Debug)]
pub struct ObjectIdAllocator {
    next: ObjectId,
}

impl Default for ObjectIdAllocator {
    fn default() -> Self {
        Self { next: 1 }
    }
}

impl ObjectIdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hands out the next identifier.
    ///
    /// # Panics
    /// Panics if the `u64` space is exhausted, which would require allocating for centuries.
    pub fn allocate(&mut self) -> ObjectId {
        let id = self.next;
        self.next = self
            .next
            .checked_add(1)
            .expect("ObjectId space exhausted.");
        id
    }

    /// Number of identifiers handed out so far.
    pub fn allocated(&self) -> u64 {
        self.next - 1
    }
}
