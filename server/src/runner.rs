//! Spawning the physics worker on its own thread.
//!
//! The two threads share nothing but a pair of unbounded channels. The render side owns the
//! returned [`PhysicsLink`]; dropping it (or its sender) closes the inbox, which ends the
//! worker loop, after which [`PhysicsThread::join`] returns.

use crate::{error::WorkerError, worker::PhysicsWorker};
use crossbeam_channel::{unbounded, Receiver, Sender};
use shared::{ToPhysics, ToRender};
use std::{
    thread::{self, JoinHandle},
    time::Duration,
};

/// Render-side ends of the channel pair.
#[derive(Debug)]
pub struct PhysicsLink {
    pub to_physics: Sender<ToPhysics>,
    pub from_physics: Receiver<ToRender>,
}

#[derive(Debug)]
pub struct PhysicsThread {
    handle: JoinHandle<Result<(), WorkerError>>,
}

impl PhysicsThread {
    /// Waits for the worker loop to finish. Only returns once every [`PhysicsLink`] sender
    /// has been dropped (or the worker failed).
    pub fn join(self) -> Result<(), WorkerError> {
        self.handle.join().map_err(|_| WorkerError::Panicked)?
    }
}

/// Starts the physics thread. Its first message is always [`ToRender::Init`].
pub fn spawn(tick_interval: Duration) -> std::io::Result<(PhysicsLink, PhysicsThread)> {
    let (to_physics, inbox) = unbounded();
    let (outbox, from_physics) = unbounded();

    let handle = thread::Builder::new()
        .name("physics".to_string())
        .spawn(move || {
            let result = PhysicsWorker::new(outbox, tick_interval).run(inbox);
            if let Err(err) = &result {
                log::error!("Physics worker failed: {err}");
            }
            result
        })?;

    Ok((
        PhysicsLink {
            to_physics,
            from_physics,
        },
        PhysicsThread { handle },
    ))
}
