//! Background asset loading.
//!
//! Every request runs on its own short-lived thread and posts its outcome back through one
//! shared channel. Completions are picked up by the render loop with [`AssetLoader::try_completed`],
//! so loaded objects always enter the scene on the render thread, in completion order.

use crate::{assets::MeshSource, error::LoadError, scene::MeshNode};
use crossbeam_channel::{Receiver, Sender, unbounded};
use std::{sync::Arc, thread};

#[derive(Debug)]
pub struct LoadOutcome {
    pub name: String,
    pub result: Result<MeshNode, LoadError>,
}

pub struct AssetLoader<S: MeshSource> {
    source: Arc<S>,
    completed_tx: Sender<LoadOutcome>,
    completed_rx: Receiver<LoadOutcome>,
    pending: usize,
}

impl<S: MeshSource> AssetLoader<S> {
    pub fn new(source: S) -> Self {
        let (completed_tx, completed_rx) = unbounded();
        Self {
            source: Arc::new(source),
            completed_tx,
            completed_rx,
            pending: 0,
        }
    }

    /// Starts loading `name` in the background.
    pub fn request(&mut self, name: &str) -> std::io::Result<()> {
        let source = Arc::clone(&self.source);
        let completed = self.completed_tx.clone();
        let name = name.to_string();

        thread::Builder::new()
            .name(format!("load:{name}"))
            .spawn(move || {
                let result = source.load(&name);
                // The render context may already be gone at shutdown.
                let _ = completed.send(LoadOutcome { name, result });
            })?;

        self.pending += 1;
        Ok(())
    }

    /// Next finished load, if any, without blocking.
    pub fn try_completed(&mut self) -> Option<LoadOutcome> {
        let outcome = self.completed_rx.try_recv().ok()?;
        self.pending = self.pending.saturating_sub(1);
        Some(outcome)
    }

    /// Requests that have not been picked up yet.
    #[inline]
    pub fn pending(&self) -> usize {
        self.pending
    }
}
