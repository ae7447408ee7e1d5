//! Physics side of the scene: owns the Rapier world and streams body transforms back to the
//! render thread.
//!
//! - `worker`: request handling, state machine and tick reporting.
//! - `world`:  Rapier sets/pipeline and body construction.
//! - `bridge`: object id <-> body handle mapping, private to this thread.
//! - `tick`:   the cancellable fixed-period ticker.
//! - `runner`: spawning the worker thread and wiring the channels.

pub mod bridge;
pub mod error;
pub mod runner;
pub mod tick;
pub mod worker;
pub mod world;

pub use bridge::IdentityBridge;
pub use error::{IdentityError, WorkerError};
pub use runner::{spawn, PhysicsLink, PhysicsThread};
pub use tick::TickDriver;
pub use worker::{PhysicsWorker, WorkerState};
pub use world::{CreatedBody, PhysicsWorld};
