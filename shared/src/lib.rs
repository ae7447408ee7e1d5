pub mod body;
pub mod config;
pub mod constants;
pub mod ids;
pub mod protocol;
pub mod types;

// Re-export Rapier so the physics crate builds against exactly the version the descriptors
// were written for.
pub use rapier3d;

pub use body::{
    BodyDesc, ColliderDesc, CuboidDesc, StaticBodyDesc, collider_from_desc, rigid_body_from_desc,
};
pub use config::{ConfigError, SceneConfig};
pub use constants::{
    ANGVEL_MIN, ANGVEL_SPREAD, BUILTIN_ASSET_PREFIX, IMPULSE_COEFFICIENT, NUM_OBJECTS,
    OBJECT_SCALE, PHYSICS_SCALE, SPAWN_ZONE_SIZE, TICK_INTERVAL,
};
pub use ids::{ObjectId, ObjectIdAllocator};
pub use protocol::{ActiveBody, ToPhysics, ToRender};
pub use types::{Quat, Vec3, to_physics, to_render};
