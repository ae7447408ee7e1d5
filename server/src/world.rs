//! Rapier world owned by the physics thread.
//!
//! This module is responsible for:
//! - Holding every Rapier set and pipeline the simulation needs.
//! - Building dynamic bodies with convex-hull colliders from [`BodyDesc`]s.
//! - Stepping the simulation by one fixed step.
//! - Enumerating the bodies Rapier still considers awake.
//!
//! It knows nothing about object ids or messages; that is the worker's job. Handles returned
//! from here must not leave the physics thread.

use shared::rapier3d::prelude::*;
use shared::{collider_from_desc, rigid_body_from_desc, BodyDesc, Quat, Vec3};

/// A dynamic body that was just created.
#[derive(Clone, Copy, Debug)]
pub struct CreatedBody {
    pub handle: RigidBodyHandle,
    /// Mass of the body, derived from its colliders' shapes at the default density.
    pub mass: f32,
    /// Number of descriptor colliders that produced a hull.
    pub colliders: usize,
}

pub struct PhysicsWorld {
    gravity: Vector<Real>,
    integration_parameters: IntegrationParameters,
    pipeline: PhysicsPipeline,
    islands: IslandManager,
    broad_phase: BroadPhaseBvh,
    narrow_phase: NarrowPhase,
    bodies: RigidBodySet,
    colliders: ColliderSet,
    impulse_joints: ImpulseJointSet,
    multibody_joints: MultibodyJointSet,
    ccd_solver: CCDSolver,
}

impl PhysicsWorld {
    pub fn new(gravity: Vec3) -> Self {
        Self {
            gravity,
            integration_parameters: IntegrationParameters::default(),
            pipeline: PhysicsPipeline::new(),
            islands: IslandManager::new(),
            broad_phase: BroadPhaseBvh::new(),
            narrow_phase: NarrowPhase::new(),
            bodies: RigidBodySet::new(),
            colliders: ColliderSet::new(),
            impulse_joints: ImpulseJointSet::new(),
            multibody_joints: MultibodyJointSet::new(),
            ccd_solver: CCDSolver::new(),
        }
    }

    #[inline]
    pub fn gravity(&self) -> Vec3 {
        self.gravity
    }

    /// Number of rigid bodies in the world.
    #[inline]
    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    /// Creates a dynamic body posed at the descriptor's transform with one convex-hull collider
    /// per descriptor entry.
    ///
    /// Entries whose point cloud has no hull are skipped with a warning. If no entry produces a
    /// hull nothing is inserted and `None` is returned, since an empty dynamic body has no mass
    /// and no shape.
    pub fn create_dynamic_body(&mut self, desc: &BodyDesc) -> Option<CreatedBody> {
        let colliders: Vec<Collider> = desc
            .colliders
            .iter()
            .enumerate()
            .filter_map(|(index, collider_desc)| {
                let collider = collider_from_desc(collider_desc);
                if collider.is_none() {
                    log::warn!(
                        "Object {}: collider {} ({} points) has no convex hull, skipping",
                        desc.object_id,
                        index,
                        collider_desc.point_count()
                    );
                }
                collider
            })
            .collect();

        if colliders.is_empty() {
            return None;
        }

        let mass: f32 = colliders.iter().map(Collider::mass).sum();
        let count = colliders.len();

        let handle = self.bodies.insert(rigid_body_from_desc(desc));
        for collider in colliders {
            self.colliders
                .insert_with_parent(collider, handle, &mut self.bodies);
        }

        Some(CreatedBody {
            handle,
            mass,
            colliders: count,
        })
    }

    /// Overwrites a body's angular velocity and wakes it. Returns `false` for a stale handle.
    pub fn set_angvel(&mut self, handle: RigidBodyHandle, angvel: Vec3) -> bool {
        match self.bodies.get_mut(handle) {
            Some(body) => {
                body.set_angvel(angvel, true);
                true
            }
            None => false,
        }
    }

    /// Applies a one-shot impulse at the body's center of mass and wakes it.
    /// Returns `false` for a stale handle.
    pub fn apply_impulse(&mut self, handle: RigidBodyHandle, impulse: Vec3) -> bool {
        match self.bodies.get_mut(handle) {
            Some(body) => {
                body.apply_impulse(impulse, true);
                true
            }
            None => false,
        }
    }

    /// Advances the simulation by one fixed step (`IntegrationParameters::dt`).
    pub fn step(&mut self) {
        let hooks = ();
        let events = ();

        self.pipeline.step(
            &self.gravity,
            &self.integration_parameters,
            &mut self.islands,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.bodies,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            &mut self.ccd_solver,
            &hooks,
            &events,
        );
    }

    /// Dynamic bodies the solver has not put to sleep, with their current pose.
    pub fn active_bodies(&self) -> impl Iterator<Item = (RigidBodyHandle, Vec3, Quat)> + '_ {
        self.bodies
            .iter()
            .filter(|(_, body)| body.is_dynamic() && !body.is_sleeping())
            .map(|(handle, body)| (handle, *body.translation(), *body.rotation()))
    }

    pub fn body_pose(&self, handle: RigidBodyHandle) -> Option<(Vec3, Quat)> {
        self.bodies
            .get(handle)
            .map(|body| (*body.translation(), *body.rotation()))
    }
}
