//! # Batched Scene
//!
//! The scene owns every actor and its per-environment state. Each actor is
//! replicated across `num_envs` parallel instances; poses and velocities are
//! stored as one vector per actor, indexed by environment instance.

use glam::Vec3;
use tracing::debug;

use crate::builder::{ActorBuilder, VisualShape};
use crate::camera::CameraSpec;
use crate::error::PhysicsError;
use crate::integrator::integrate_actors;
use crate::shapes::Shape;
use crate::types::{ActorId, BodyType, Pose};

/// A rigid actor replicated across environment instances.
#[derive(Clone, Debug)]
pub struct Actor {
    pub name: String,
    pub body_type: BodyType,
    pub visuals: Vec<VisualShape>,
    pub collisions: Vec<Shape>,
    pub mass: f32,
    pub(crate) poses: Vec<Pose>,
    pub(crate) linear_velocities: Vec<Vec3>,
}

impl Actor {
    /// Current pose for every environment instance.
    #[must_use]
    pub fn poses(&self) -> &[Pose] {
        &self.poses
    }

    #[must_use]
    pub fn linear_velocities(&self) -> &[Vec3] {
        &self.linear_velocities
    }

    #[must_use]
    pub fn is_static(&self) -> bool {
        self.body_type == BodyType::Static
    }
}

/// Container for all actors and cameras of a batched simulation.
#[derive(Clone, Debug)]
pub struct Scene {
    num_envs: usize,
    actors: Vec<Actor>,
    cameras: Vec<CameraSpec>,
    elapsed_sim_steps: u64,
}

impl Scene {
    /// Create an empty scene with `num_envs` parallel instances.
    ///
    /// # Errors
    ///
    /// Returns [`PhysicsError::NoEnvironments`] when `num_envs` is zero.
    pub fn new(num_envs: usize) -> Result<Self, PhysicsError> {
        if num_envs == 0 {
            return Err(PhysicsError::NoEnvironments);
        }
        Ok(Self {
            num_envs,
            actors: Vec::new(),
            cameras: Vec::new(),
            elapsed_sim_steps: 0,
        })
    }

    #[must_use]
    pub fn num_envs(&self) -> usize {
        self.num_envs
    }

    #[must_use]
    pub fn create_actor_builder(&self) -> ActorBuilder {
        ActorBuilder::new()
    }

    pub(crate) fn insert_actor(
        &mut self,
        name: String,
        body_type: BodyType,
        visuals: Vec<VisualShape>,
        collisions: Vec<Shape>,
        mass: f32,
        initial_pose: Pose,
    ) -> ActorId {
        debug!("Adding {:?} actor {name}", body_type);
        self.actors.push(Actor {
            name,
            body_type,
            visuals,
            collisions,
            mass,
            poses: vec![initial_pose; self.num_envs],
            linear_velocities: vec![Vec3::ZERO; self.num_envs],
        });
        ActorId(self.actors.len() - 1)
    }

    #[must_use]
    pub fn actors(&self) -> &[Actor] {
        &self.actors
    }

    /// Look up an actor by handle.
    ///
    /// # Errors
    ///
    /// Returns [`PhysicsError::UnknownActor`] for a handle from another scene.
    pub fn actor(&self, id: ActorId) -> Result<&Actor, PhysicsError> {
        self.actors.get(id.0).ok_or(PhysicsError::UnknownActor(id))
    }

    fn actor_mut(&mut self, id: ActorId) -> Result<&mut Actor, PhysicsError> {
        self.actors.get_mut(id.0).ok_or(PhysicsError::UnknownActor(id))
    }

    /// Per-environment poses of an actor.
    ///
    /// # Errors
    ///
    /// Returns [`PhysicsError::UnknownActor`] for an invalid handle.
    pub fn pose(&self, id: ActorId) -> Result<&[Pose], PhysicsError> {
        Ok(self.actor(id)?.poses())
    }

    /// Set the pose of an actor in the listed environment instances.
    ///
    /// `poses` holds either one pose per entry of `env_idx` or a single pose
    /// broadcast to all of them. Velocities of the touched instances are
    /// cleared.
    ///
    /// # Errors
    ///
    /// Fails on an unknown actor, an out-of-range environment index or a pose
    /// count that matches neither `env_idx.len()` nor one.
    pub fn set_pose(&mut self, id: ActorId, env_idx: &[usize], poses: &[Pose]) -> Result<(), PhysicsError> {
        let num_envs = self.num_envs;
        if poses.len() != env_idx.len() && poses.len() != 1 {
            return Err(PhysicsError::PoseCountMismatch {
                expected: env_idx.len(),
                got: poses.len(),
            });
        }
        check_env_idx(env_idx, num_envs)?;
        let actor = self.actor_mut(id)?;
        for (i, &env) in env_idx.iter().enumerate() {
            let pose = if poses.len() == 1 { poses[0] } else { poses[i] };
            actor.poses[env] = pose;
            actor.linear_velocities[env] = Vec3::ZERO;
        }
        Ok(())
    }

    /// Broadcast one pose to every environment instance.
    ///
    /// # Errors
    ///
    /// Returns [`PhysicsError::UnknownActor`] for an invalid handle.
    pub fn set_pose_all(&mut self, id: ActorId, pose: Pose) -> Result<(), PhysicsError> {
        let all: Vec<usize> = (0..self.num_envs).collect();
        self.set_pose(id, &all, &[pose])
    }

    /// Set the linear velocity of a dynamic actor in one environment instance.
    ///
    /// # Errors
    ///
    /// Fails for static actors, unknown actors and out-of-range indices.
    pub fn set_linear_velocity(&mut self, id: ActorId, env: usize, velocity: Vec3) -> Result<(), PhysicsError> {
        check_env_idx(&[env], self.num_envs)?;
        let actor = self.actor_mut(id)?;
        if actor.is_static() {
            return Err(PhysicsError::StaticActor(actor.name.clone()));
        }
        actor.linear_velocities[env] = velocity;
        Ok(())
    }

    pub fn add_camera(&mut self, camera: CameraSpec) {
        debug!("Adding camera {}", camera.name);
        self.cameras.retain(|c| c.name != camera.name);
        self.cameras.push(camera);
    }

    #[must_use]
    pub fn cameras(&self) -> &[CameraSpec] {
        &self.cameras
    }

    #[must_use]
    pub fn elapsed_sim_steps(&self) -> u64 {
        self.elapsed_sim_steps
    }

    /// Advance every environment instance by `dt` seconds.
    pub fn step(&mut self, dt: f32) {
        integrate_actors(&mut self.actors, dt);
        self.elapsed_sim_steps += 1;
    }
}

pub(crate) fn check_env_idx(env_idx: &[usize], num_envs: usize) -> Result<(), PhysicsError> {
    match env_idx.iter().find(|&&index| index >= num_envs) {
        Some(&index) => Err(PhysicsError::EnvIndexOutOfRange { index, num_envs }),
        None => Ok(()),
    }
}
