//! Render-thread half of the scene.
//!
//! [`RenderContext`] answers every [`ToRender`] message from the physics thread:
//!
//! | message     | reaction                                                      |
//! |-------------|---------------------------------------------------------------|
//! | `init`      | ask for a world with the configured gravity                   |
//! | `world`     | start the simulation, then request `num_objects` random loads |
//! | `rigidBody` | give the new body a one-shot impulse towards the origin      |
//! | `active`    | copy the reported transforms into the scene graph             |
//!
//! Loaded objects are placed, registered under a fresh [`ObjectId`] and described to the
//! physics thread from [`RenderContext::frame`], which also drains the physics inbox and
//! presents the scene.

use crate::{
    assets::MeshSource,
    derive::derive_body_desc,
    error::RenderError,
    impulse::restoring_impulse,
    loader::{AssetLoader, LoadOutcome},
    scene::SceneGraph,
    spawn::{place, random_angvel, random_position},
    surface::RenderSurface,
};
use crossbeam_channel::TryRecvError;
use physics_server::PhysicsLink;
use rand::{Rng, SeedableRng, rngs::StdRng};
use shared::{ActiveBody, ObjectId, ObjectIdAllocator, SceneConfig, ToPhysics, ToRender};

/// Counters for how the spawn batch went.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SpawnStats {
    pub requested: usize,
    pub spawned: usize,
    pub failed: usize,
}

pub struct RenderContext<S: MeshSource, R: RenderSurface> {
    config: SceneConfig,
    link: PhysicsLink,
    scene: SceneGraph,
    ids: ObjectIdAllocator,
    loader: AssetLoader<S>,
    surface: R,
    rng: StdRng,
    stats: SpawnStats,
}

impl<S: MeshSource, R: RenderSurface> RenderContext<S, R> {
    pub fn new(config: SceneConfig, link: PhysicsLink, source: S, surface: R) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            config,
            link,
            scene: SceneGraph::new(),
            ids: ObjectIdAllocator::new(),
            loader: AssetLoader::new(source),
            surface,
            rng,
            stats: SpawnStats::default(),
        }
    }

    #[inline]
    pub fn scene(&self) -> &SceneGraph {
        &self.scene
    }

    #[inline]
    pub fn surface(&self) -> &R {
        &self.surface
    }

    #[inline]
    pub fn stats(&self) -> SpawnStats {
        self.stats
    }

    /// Loads requested but not yet turned into objects.
    #[inline]
    pub fn pending_loads(&self) -> usize {
        self.loader.pending()
    }

    /// One render frame: handle everything the physics thread sent, spawn whatever finished
    /// loading, then present.
    pub fn frame(&mut self) -> Result<(), RenderError> {
        loop {
            match self.link.from_physics.try_recv() {
                Ok(msg) => self.handle(msg)?,
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => return Err(RenderError::PhysicsDisconnected),
            }
        }

        while let Some(outcome) = self.loader.try_completed() {
            self.on_loaded(outcome)?;
        }

        self.surface.present(&self.scene);
        Ok(())
    }

    pub fn handle(&mut self, msg: ToRender) -> Result<(), RenderError> {
        match msg {
            ToRender::Init => {
                log::info!("Physics worker ready, creating world");
                self.send(ToPhysics::World {
                    gravity: self.config.gravity(),
                })
            }
            ToRender::World => {
                self.send(ToPhysics::Start)?;
                self.spawn_batch();
                Ok(())
            }
            ToRender::RigidBody { object_id, mass } => self.on_body_created(object_id, mass),
            ToRender::Active(report) => {
                self.on_active(&report);
                Ok(())
            }
        }
    }

    /// Sends `stop` and hangs up, which lets the physics thread finish.
    pub fn shutdown(self) {
        if self.link.to_physics.send(ToPhysics::Stop).is_err() {
            log::debug!("Physics thread already gone at shutdown");
        }
        log::info!(
            "Shutting down with {} objects ({} of {} spawned, {} failed)",
            self.scene.len(),
            self.stats.spawned,
            self.stats.requested,
            self.stats.failed
        );
    }

    fn send(&self, msg: ToPhysics) -> Result<(), RenderError> {
        self.link
            .to_physics
            .send(msg)
            .map_err(|_| RenderError::PhysicsDisconnected)
    }

    fn spawn_batch(&mut self) {
        let catalogue = &self.config.objects;
        if catalogue.is_empty() {
            return;
        }

        for _ in 0..self.config.num_objects {
            let name = &catalogue[self.rng.gen_range(0..catalogue.len())];
            self.stats.requested += 1;
            if let Err(err) = self.loader.request(name) {
                log::error!("Could not start loading `{name}`: {err}");
                self.stats.failed += 1;
            }
        }
        log::info!("Requested {} objects", self.config.num_objects);
    }

    fn on_loaded(&mut self, outcome: LoadOutcome) -> Result<(), RenderError> {
        let LoadOutcome { name, result } = outcome;
        let mut node = match result {
            Ok(node) => node,
            Err(err) => {
                log::warn!("Skipping `{name}`: {err}");
                self.stats.failed += 1;
                return Ok(());
            }
        };

        let position = random_position(&mut self.rng, self.config.spawn_zone_size);
        place(&mut node, position, self.config.object_scale);

        let object_id = self.ids.allocate();
        let desc = match derive_body_desc(object_id, &node, self.config.physics_scale) {
            Ok(desc) => desc,
            Err(err) => {
                log::warn!("Skipping `{name}`: {err}");
                self.stats.failed += 1;
                return Ok(());
            }
        };

        let angvel = random_angvel(&mut self.rng);
        self.send(ToPhysics::DynamicBodyWithConvexHullColliders(desc))?;
        self.send(ToPhysics::SetAngvel { object_id, angvel })?;

        self.scene.insert(object_id, node);
        self.stats.spawned += 1;
        log::debug!("Spawned `{name}` as object {object_id} at {position:?}");
        Ok(())
    }

    fn on_body_created(&mut self, object_id: ObjectId, mass: f32) -> Result<(), RenderError> {
        let Some(node) = self.scene.get(object_id) else {
            log::warn!("Body created for unknown object {object_id}");
            return Ok(());
        };

        let Some(impulse) = restoring_impulse(
            node.translation,
            mass,
            self.config.impulse_coefficient,
            self.config.physics_scale,
        ) else {
            return Ok(());
        };

        self.send(ToPhysics::ApplyImpulse { object_id, impulse })
    }

    fn on_active(&mut self, report: &[ActiveBody]) {
        let applied = self.scene.apply_active(report, self.config.physics_scale);
        if applied < report.len() {
            log::debug!(
                "Dropped {} of {} active entries for unknown objects",
                report.len() - applied,
                report.len()
            );
        }
    }
}
