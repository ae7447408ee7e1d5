//! Physics worker: the state machine behind the physics thread.
//!
//! Responsibilities
//! - Apply every [`ToPhysics`] request in arrival order.
//! - Own the Rapier world and the identity bridge; neither ever leaves this thread.
//! - On every tick while running: step once, collect awake bodies, translate their handles to
//!   object ids and emit one `active` report (only if there is something to report).
//!
//! States
//! ```text
//! Uninitialized --world--> WorldReady --start--> Running <--start/stop--> Stopped
//! ```
//! `start` while running re-arms the ticker (cancel, then reschedule). `stop` outside of
//! `Running` is a no-op.
//!
//! Error policy
//! - Requests naming an object without a body are no-ops (the creation may simply not have
//!   been processed yet; ordering across the two directions is not guaranteed).
//! - Requests that need a world before `world` arrived, a second `world`, or a reused object
//!   id are protocol violations and fatal.

use crate::{
    bridge::IdentityBridge,
    error::{IdentityError, WorkerError},
    tick::TickDriver,
    world::PhysicsWorld,
};
use crossbeam_channel::{Receiver, Sender};
use shared::{ActiveBody, BodyDesc, ObjectId, StaticBodyDesc, ToPhysics, ToRender, Vec3};
use std::time::{Duration, Instant};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WorkerState {
    Uninitialized,
    WorldReady,
    Running,
    Stopped,
}

pub struct PhysicsWorker {
    state: WorkerState,
    world: Option<PhysicsWorld>,
    bridge: IdentityBridge,
    ticks: TickDriver,
    outbox: Sender<ToRender>,
}

impl PhysicsWorker {
    pub fn new(outbox: Sender<ToRender>, tick_interval: Duration) -> Self {
        Self {
            state: WorkerState::Uninitialized,
            world: None,
            bridge: IdentityBridge::new(),
            ticks: TickDriver::new(tick_interval),
            outbox,
        }
    }

    #[inline]
    pub fn state(&self) -> WorkerState {
        self.state
    }

    #[inline]
    pub fn bridge(&self) -> &IdentityBridge {
        &self.bridge
    }

    #[inline]
    pub fn ticks(&self) -> &TickDriver {
        &self.ticks
    }

    #[inline]
    pub fn world(&self) -> Option<&PhysicsWorld> {
        self.world.as_ref()
    }

    /// Tells the render side the engine is up.
    pub fn announce(&self) -> Result<(), WorkerError> {
        self.emit(ToRender::Init)
    }

    /// Applies one request.
    pub fn handle(&mut self, msg: ToPhysics) -> Result<(), WorkerError> {
        log::trace!("physics <- {}", msg.kind());
        match msg {
            ToPhysics::World { gravity } => self.create_world(gravity),
            ToPhysics::Start => self.start(),
            ToPhysics::Stop => {
                self.stop();
                Ok(())
            }
            ToPhysics::DynamicBodyWithConvexHullColliders(desc) => self.create_dynamic_body(&desc),
            ToPhysics::StaticBodyWithCuboidColliders(desc) => {
                self.create_static_body(&desc);
                Ok(())
            }
            ToPhysics::SetAngvel { object_id, angvel } => self.set_angvel(object_id, angvel),
            ToPhysics::ApplyImpulse { object_id, impulse } => {
                self.apply_impulse(object_id, impulse)
            }
        }
    }

    /// One simulation tick: step, then report awake bodies.
    ///
    /// Does nothing unless the worker is running.
    pub fn tick(&mut self) -> Result<(), WorkerError> {
        if self.state != WorkerState::Running {
            return Ok(());
        }
        let Some(world) = self.world.as_mut() else {
            return Ok(());
        };

        world.step();

        let report = self.active_report();
        if report.is_empty() {
            return Ok(());
        }
        self.emit(ToRender::Active(report))
    }

    /// Awake bodies translated to object ids. Bodies without a registered id are skipped.
    pub fn active_report(&self) -> Vec<ActiveBody> {
        let Some(world) = self.world.as_ref() else {
            return Vec::new();
        };

        world
            .active_bodies()
            .filter_map(|(handle, translation, rotation)| {
                let object_id = self.bridge.object_of(handle)?;
                Some(ActiveBody {
                    object_id,
                    translation,
                    rotation,
                })
            })
            .collect()
    }

    /// Runs the worker until the render side hangs up or a fatal error occurs.
    ///
    /// Incoming requests and ticks are serialized on this thread, so a step never overlaps a
    /// request or another step.
    pub fn run(mut self, inbox: Receiver<ToPhysics>) -> Result<(), WorkerError> {
        self.announce()?;

        loop {
            // Cloning a receiver is cheap, and keeps `self` free for the arms below.
            let ticker = self
                .ticks
                .receiver()
                .cloned()
                .unwrap_or_else(crossbeam_channel::never::<Instant>);

            crossbeam_channel::select! {
                recv(inbox) -> msg => match msg {
                    Ok(msg) => self.handle(msg)?,
                    Err(_) => {
                        log::info!("Render side closed the channel, stopping physics");
                        return Ok(());
                    }
                },
                recv(ticker) -> _ => self.tick()?,
            }
        }
    }

    fn create_world(&mut self, gravity: Vec3) -> Result<(), WorkerError> {
        if self.state != WorkerState::Uninitialized {
            return Err(WorkerError::WorldAlreadyCreated);
        }

        self.world = Some(PhysicsWorld::new(gravity));
        self.state = WorkerState::WorldReady;
        log::info!("Physics world created with gravity {:?}", gravity.as_slice());

        self.emit(ToRender::World)
    }

    fn start(&mut self) -> Result<(), WorkerError> {
        match self.state {
            WorkerState::Uninitialized => Err(WorkerError::WorldNotReady { kind: "start" }),
            WorkerState::WorldReady | WorkerState::Stopped | WorkerState::Running => {
                if self.state == WorkerState::Running {
                    log::debug!("`start` while running, restarting the tick");
                }
                self.ticks.arm();
                self.state = WorkerState::Running;
                log::info!("Physics ticking every {:?}", self.ticks.interval());
                Ok(())
            }
        }
    }

    fn stop(&mut self) {
        if self.state != WorkerState::Running {
            log::debug!("`stop` in state {:?} ignored", self.state);
            return;
        }
        self.ticks.disarm();
        self.state = WorkerState::Stopped;
        log::info!("Physics stopped");
    }

    fn create_dynamic_body(&mut self, desc: &BodyDesc) -> Result<(), WorkerError> {
        let world = self.world.as_mut().ok_or(WorkerError::WorldNotReady {
            kind: "dynamicBodyWithConvexHullColliders",
        })?;

        // Checked before touching the world so a reused id leaves no orphan body behind.
        if self.bridge.contains_object(desc.object_id) {
            return Err(IdentityError::ObjectAlreadyRegistered(desc.object_id).into());
        }

        let Some(created) = world.create_dynamic_body(desc) else {
            log::error!(
                "Object {}: none of its {} colliders has a convex hull, body not created",
                desc.object_id,
                desc.colliders.len()
            );
            return Ok(());
        };

        // Registered before the acknowledgement leaves this thread.
        self.bridge.register(desc.object_id, created.handle)?;
        log::debug!(
            "Object {}: body created ({} colliders, mass {})",
            desc.object_id,
            created.colliders,
            created.mass
        );

        self.emit(ToRender::RigidBody {
            object_id: desc.object_id,
            mass: created.mass,
        })
    }

    fn create_static_body(&mut self, desc: &StaticBodyDesc) {
        log::debug!(
            "Object {}: static cuboid bodies are not supported yet, ignoring {} cuboids",
            desc.object_id,
            desc.cuboids.len()
        );
    }

    fn set_angvel(&mut self, object_id: ObjectId, angvel: Vec3) -> Result<(), WorkerError> {
        let world = self
            .world
            .as_mut()
            .ok_or(WorkerError::WorldNotReady { kind: "setAngvel" })?;

        let Some(handle) = self.bridge.handle_of(object_id) else {
            log::warn!("setAngvel: object {object_id} has no body, ignoring");
            return Ok(());
        };
        if !world.set_angvel(handle, angvel) {
            log::warn!("setAngvel: body of object {object_id} is gone, ignoring");
        }
        Ok(())
    }

    fn apply_impulse(&mut self, object_id: ObjectId, impulse: Vec3) -> Result<(), WorkerError> {
        let world = self
            .world
            .as_mut()
            .ok_or(WorkerError::WorldNotReady {
                kind: "applyImpulse",
            })?;

        let Some(handle) = self.bridge.handle_of(object_id) else {
            log::warn!("applyImpulse: object {object_id} has no body, ignoring");
            return Ok(());
        };
        if !world.apply_impulse(handle, impulse) {
            log::warn!("applyImpulse: body of object {object_id} is gone, ignoring");
        }
        Ok(())
    }

    fn emit(&self, msg: ToRender) -> Result<(), WorkerError> {
        log::trace!("physics -> {}", msg.kind());
        self.outbox
            .send(msg)
            .map_err(|_| WorkerError::Disconnected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use crossbeam_channel::{unbounded, Receiver};
    use shared::{ColliderDesc, Quat, PHYSICS_SCALE};

    fn worker() -> (PhysicsWorker, Receiver<ToRender>) {
        let (tx, rx) = unbounded();
        (PhysicsWorker::new(tx, Duration::from_millis(16)), rx)
    }

    fn tetrahedron_body(object_id: ObjectId, translation: Vec3) -> ToPhysics {
        ToPhysics::DynamicBodyWithConvexHullColliders(BodyDesc {
            object_id,
            translation,
            rotation: Quat::identity(),
            colliders: vec![ColliderDesc {
                translation_wrt_parent: Vec3::zeros(),
                rotation_wrt_parent: Quat::identity(),
                vertices: vec![
                    0.0, 0.0, 0.0, //
                    0.1, 0.0, 0.0, //
                    0.0, 0.1, 0.0, //
                    0.0, 0.0, 0.1,
                ],
            }],
        })
    }

    fn ready_worker() -> (PhysicsWorker, Receiver<ToRender>) {
        let (mut worker, rx) = worker();
        worker
            .handle(ToPhysics::World {
                gravity: Vec3::zeros(),
            })
            .unwrap();
        assert_eq!(rx.try_recv(), Ok(ToRender::World));
        (worker, rx)
    }

    #[test]
    fn world_request_is_acknowledged() {
        let (mut worker, rx) = worker();
        assert_eq!(worker.state(), WorkerState::Uninitialized);

        worker
            .handle(ToPhysics::World {
                gravity: Vec3::new(0.0, -9.81, 0.0),
            })
            .unwrap();

        assert_eq!(worker.state(), WorkerState::WorldReady);
        assert_eq!(rx.try_recv(), Ok(ToRender::World));
        assert_eq!(
            worker.world().map(PhysicsWorld::gravity),
            Some(Vec3::new(0.0, -9.81, 0.0))
        );
    }

    #[test]
    fn second_world_request_is_fatal() {
        let (mut worker, _rx) = ready_worker();
        let err = worker
            .handle(ToPhysics::World {
                gravity: Vec3::zeros(),
            })
            .unwrap_err();
        assert!(matches!(err, WorkerError::WorldAlreadyCreated));
    }

    #[test]
    fn requests_before_world_are_fatal() {
        let (mut worker, rx) = worker();

        assert!(matches!(
            worker.handle(ToPhysics::Start),
            Err(WorkerError::WorldNotReady { kind: "start" })
        ));
        assert!(matches!(
            worker.handle(tetrahedron_body(1, Vec3::zeros())),
            Err(WorkerError::WorldNotReady { .. })
        ));
        assert!(matches!(
            worker.handle(ToPhysics::ApplyImpulse {
                object_id: 1,
                impulse: Vec3::x()
            }),
            Err(WorkerError::WorldNotReady {
                kind: "applyImpulse"
            })
        ));
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn body_creation_registers_identity_and_acknowledges_mass() {
        let (mut worker, rx) = ready_worker();

        worker.handle(tetrahedron_body(42, Vec3::zeros())).unwrap();

        match rx.try_recv() {
            Ok(ToRender::RigidBody { object_id, mass }) => {
                assert_eq!(object_id, 42);
                assert!(mass > 0.0);
            }
            other => panic!("expected rigidBody ack, got {other:?}"),
        }

        let handle = worker.bridge().handle_of(42).expect("registered");
        assert_eq!(worker.bridge().object_of(handle), Some(42));
    }

    #[test]
    fn reused_object_id_is_fatal_and_creates_nothing() {
        let (mut worker, rx) = ready_worker();
        worker.handle(tetrahedron_body(1, Vec3::zeros())).unwrap();
        let _ack = rx.try_recv().unwrap();

        let err = worker
            .handle(tetrahedron_body(1, Vec3::x()))
            .unwrap_err();

        assert!(matches!(err, WorkerError::Identity(_)));
        assert_eq!(worker.world().unwrap().body_count(), 1);
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn body_without_hull_is_not_acknowledged() {
        let (mut worker, rx) = ready_worker();
        let mut msg = tetrahedron_body(3, Vec3::zeros());
        if let ToPhysics::DynamicBodyWithConvexHullColliders(desc) = &mut msg {
            desc.colliders[0].vertices.truncate(6);
        }

        worker.handle(msg).unwrap();

        assert!(rx.try_recv().is_err());
        assert!(worker.bridge().is_empty());
    }

    #[test]
    fn controls_for_unknown_objects_are_no_ops() {
        let (mut worker, rx) = ready_worker();

        worker
            .handle(ToPhysics::SetAngvel {
                object_id: 99,
                angvel: Vec3::x(),
            })
            .unwrap();
        worker
            .handle(ToPhysics::ApplyImpulse {
                object_id: 99,
                impulse: Vec3::x(),
            })
            .unwrap();

        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn static_bodies_are_ignored() {
        let (mut worker, rx) = ready_worker();
        worker
            .handle(ToPhysics::StaticBodyWithCuboidColliders(StaticBodyDesc {
                object_id: 5,
                translation: Vec3::zeros(),
                rotation: Quat::identity(),
                cuboids: Vec::new(),
            }))
            .unwrap();

        assert!(rx.try_recv().is_err());
        assert_eq!(worker.world().unwrap().body_count(), 0);
    }

    #[test]
    fn start_twice_keeps_a_single_ticker() {
        let (mut worker, _rx) = ready_worker();

        worker.handle(ToPhysics::Start).unwrap();
        let first = worker.ticks().receiver().cloned().unwrap();
        worker.handle(ToPhysics::Start).unwrap();

        assert_eq!(worker.state(), WorkerState::Running);
        assert_eq!(worker.ticks().arms(), 2);
        assert!(!worker.ticks().receiver().unwrap().same_channel(&first));
    }

    #[test]
    fn stop_and_restart_transitions() {
        let (mut worker, _rx) = ready_worker();

        // Not running yet: ignored.
        worker.handle(ToPhysics::Stop).unwrap();
        assert_eq!(worker.state(), WorkerState::WorldReady);

        worker.handle(ToPhysics::Start).unwrap();
        worker.handle(ToPhysics::Stop).unwrap();
        assert_eq!(worker.state(), WorkerState::Stopped);
        assert!(!worker.ticks().is_armed());

        worker.handle(ToPhysics::Start).unwrap();
        assert_eq!(worker.state(), WorkerState::Running);
        assert!(worker.ticks().is_armed());
    }

    #[test]
    fn tick_without_awake_bodies_emits_nothing() {
        let (mut worker, rx) = ready_worker();
        worker.handle(ToPhysics::Start).unwrap();

        for _ in 0..5 {
            worker.tick().unwrap();
        }

        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn tick_when_not_running_does_not_step() {
        let (mut worker, rx) = ready_worker();
        worker.handle(tetrahedron_body(1, Vec3::zeros())).unwrap();
        let _ack = rx.try_recv().unwrap();
        worker
            .handle(ToPhysics::ApplyImpulse {
                object_id: 1,
                impulse: Vec3::x(),
            })
            .unwrap();

        worker.tick().unwrap();

        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn tick_reports_impulsed_body_and_round_trips_scale() {
        let (mut worker, rx) = ready_worker();

        // A body 100 render units out on +x, pushed back toward the origin.
        let render_start = Vec3::new(100.0, 0.0, 0.0);
        let physics_start = render_start * PHYSICS_SCALE;
        worker.handle(tetrahedron_body(7, physics_start)).unwrap();
        let Ok(ToRender::RigidBody { mass, .. }) = rx.try_recv() else {
            panic!("expected rigidBody ack");
        };

        worker.handle(ToPhysics::Start).unwrap();

        // Before the impulse the report reconstructs the spawn position exactly.
        worker.tick().unwrap();
        let Ok(ToRender::Active(report)) = rx.try_recv() else {
            panic!("new bodies are awake");
        };
        assert_eq!(report.len(), 1);
        assert_eq!(report[0].object_id, 7);
        assert_relative_eq!(
            report[0].translation / PHYSICS_SCALE,
            render_start,
            epsilon = 1.0e-3
        );

        worker
            .handle(ToPhysics::ApplyImpulse {
                object_id: 7,
                impulse: Vec3::new(-mass, 0.0, 0.0),
            })
            .unwrap();
        worker.tick().unwrap();

        let Ok(ToRender::Active(report)) = rx.try_recv() else {
            panic!("impulsed body is awake");
        };
        assert!(report[0].translation.x < physics_start.x);
    }
}
