//! Render side of the scene: loads and places objects, describes them to the physics thread
//! and mirrors the transforms it reports back.

pub mod assets;
pub mod context;
pub mod derive;
pub mod error;
pub mod impulse;
pub mod loader;
pub mod scene;
pub mod spawn;
pub mod surface;

pub use assets::{AssetLibrary, MeshSource};
pub use context::{RenderContext, SpawnStats};
pub use derive::derive_body_desc;
pub use error::{AppError, DeriveError, LoadError, RenderError};
pub use impulse::restoring_impulse;
pub use scene::{ChildKind, MeshChild, MeshNode, SceneGraph};
pub use surface::{LogSurface, RenderSurface};
