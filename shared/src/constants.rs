use std::time::Duration;

/// Linear factor converting render-space units into physics-space units.
///
/// Convention:
/// - `physics = render * PHYSICS_SCALE`
/// - `render = physics / PHYSICS_SCALE`
///
/// Rapier behaves best when bodies are roughly meter-sized. Authored models are hundreds of
/// units across, so everything crossing the thread boundary is shrunk by this factor.
pub const PHYSICS_SCALE: f32 = 0.001;

/// Uniform scale applied to every spawned object's root node (render space).
pub const OBJECT_SCALE: f32 = 0.01;

/// Side length of the cube, centered on the origin, that objects are spawned in (render units).
pub const SPAWN_ZONE_SIZE: f32 = 1000.0;

/// Default number of objects spawned once the physics world is ready.
pub const NUM_OBJECTS: usize = 100;

/// Coefficient of the one-shot restoring impulse applied after a body is created.
///
/// `|impulse| = IMPULSE_COEFFICIENT * mass * PHYSICS_SCALE`
pub const IMPULSE_COEFFICIENT: f32 = 0.5;

/// Target period of the physics tick (~60 Hz, best effort).
pub const TICK_INTERVAL: Duration = Duration::from_millis(16);

/// Lower bound of each random angular velocity component before rotation (rad/s).
pub const ANGVEL_MIN: f32 = 0.05;

/// Width of the random angular velocity component range (rad/s).
pub const ANGVEL_SPREAD: f32 = 0.1;

/// Name prefix that resolves an asset to a procedural primitive instead of a file.
pub const BUILTIN_ASSET_PREFIX: &str = "builtin:";
