use shared::ObjectId;

/// Failures of the identity bridge. Lookups never fail; only a second registration does.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentityError {
    #[error("object {0} is already bound to a rigid body")]
    ObjectAlreadyRegistered(ObjectId),

    #[error("rigid body handle is already bound to object {0}")]
    HandleAlreadyRegistered(ObjectId),
}

/// Fatal errors of the physics worker.
///
/// Each of these means the render side broke the protocol contract (or went away); the worker
/// loop stops and hands the error back through the thread's join handle.
#[derive(thiserror::Error, Debug)]
pub enum WorkerError {
    #[error("`{kind}` received before the world was created")]
    WorldNotReady { kind: &'static str },

    #[error("`world` received but the world already exists")]
    WorldAlreadyCreated,

    #[error(transparent)]
    Identity(#[from] IdentityError),

    #[error("render side hung up")]
    Disconnected,

    #[error("physics thread panicked")]
    Panicked,
}
