use shared::{ConfigError, ObjectId};
use std::path::PathBuf;

/// Why a loaded node could not be turned into a body descriptor.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum DeriveError {
    #[error("object {object_id} (`{name}`) has no mesh children to build colliders from")]
    NoColliders { object_id: ObjectId, name: String },

    #[error("object {object_id}: child `{child}` has {len} position floats, not a multiple of 3")]
    MalformedVertices {
        object_id: ObjectId,
        child: String,
        len: usize,
    },
}

#[derive(thiserror::Error, Debug)]
pub enum LoadError {
    #[error("unknown built-in asset `{0}`")]
    UnknownBuiltin(String),

    #[error("failed to load `{path}`: {source}")]
    Obj {
        path: PathBuf,
        #[source]
        source: tobj::LoadError,
    },
}

#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderError {
    /// The physics thread is gone; nothing more can be simulated.
    #[error("physics thread disconnected")]
    PhysicsDisconnected,
}

/// Everything that can end the `scene` binary.
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("failed to start a thread: {0}")]
    Thread(#[from] std::io::Error),

    #[error(transparent)]
    Render(#[from] RenderError),

    #[error("physics worker: {0}")]
    Physics(#[from] physics_server::WorkerError),
}
