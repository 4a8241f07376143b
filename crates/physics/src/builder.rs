//! # Actor Builder
//!
//! Accumulates visual and collision shapes for a single actor and inserts it
//! into a [`Scene`]. An actor is replicated once per environment instance,
//! each copy starting at the builder's initial pose.

use crate::error::PhysicsError;
use crate::shapes::Shape;
use crate::types::{ActorId, BodyType, Pose, Rgba};
use crate::Scene;

const DENSITY: f32 = 1000.0;

/// A visual shape with its render material color.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct VisualShape {
    pub shape: Shape,
    pub color: Rgba,
}

/// Builder for a rigid actor.
#[derive(Clone, Debug)]
pub struct ActorBuilder {
    initial_pose: Pose,
    visuals: Vec<VisualShape>,
    collisions: Vec<Shape>,
}

impl Default for ActorBuilder {
    fn default() -> Self {
        Self {
            initial_pose: Pose::IDENTITY,
            visuals: Vec::new(),
            collisions: Vec::new(),
        }
    }
}

impl ActorBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_initial_pose(&mut self, pose: Pose) -> &mut Self {
        self.initial_pose = pose;
        self
    }

    pub fn add_visual(&mut self, shape: Shape, color: Rgba) -> &mut Self {
        self.visuals.push(VisualShape { shape, color });
        self
    }

    pub fn add_collision(&mut self, shape: Shape) -> &mut Self {
        self.collisions.push(shape);
        self
    }

    pub fn add_capsule_visual(&mut self, radius: f32, half_length: f32, color: Rgba) -> &mut Self {
        self.add_visual(Shape::capsule(radius, half_length), color)
    }

    pub fn add_capsule_collision(&mut self, radius: f32, half_length: f32) -> &mut Self {
        self.add_collision(Shape::capsule(radius, half_length))
    }

    pub fn add_box_visual(&mut self, half_size: [f32; 3], color: Rgba) -> &mut Self {
        self.add_visual(Shape::cuboid(half_size), color)
    }

    pub fn add_box_collision(&mut self, half_size: [f32; 3]) -> &mut Self {
        self.add_collision(Shape::cuboid(half_size))
    }

    pub fn add_cylinder_visual(&mut self, radius: f32, half_length: f32, color: Rgba) -> &mut Self {
        self.add_visual(Shape::cylinder(radius, half_length), color)
    }

    pub fn add_cylinder_collision(&mut self, radius: f32, half_length: f32) -> &mut Self {
        self.add_collision(Shape::cylinder(radius, half_length))
    }

    /// Insert a dynamic actor, one copy per environment instance.
    ///
    /// # Errors
    ///
    /// Returns [`PhysicsError::EmptyBuilder`] when no shapes were added.
    pub fn build(&self, scene: &mut Scene, name: &str) -> Result<ActorId, PhysicsError> {
        self.insert(scene, name, BodyType::Dynamic)
    }

    /// Insert a static actor. Static actors are never integrated.
    ///
    /// # Errors
    ///
    /// Returns [`PhysicsError::EmptyBuilder`] when no shapes were added.
    pub fn build_static(&self, scene: &mut Scene, name: &str) -> Result<ActorId, PhysicsError> {
        self.insert(scene, name, BodyType::Static)
    }

    fn insert(&self, scene: &mut Scene, name: &str, body_type: BodyType) -> Result<ActorId, PhysicsError> {
        if self.visuals.is_empty() && self.collisions.is_empty() {
            return Err(PhysicsError::EmptyBuilder(name.to_owned()));
        }
        let mass = match body_type {
            BodyType::Static => 0.0,
            BodyType::Dynamic => self.collisions.iter().map(Shape::volume).sum::<f32>() * DENSITY,
        };
        Ok(scene.insert_actor(
            name.to_owned(),
            body_type,
            self.visuals.clone(),
            self.collisions.clone(),
            mass,
            self.initial_pose,
        ))
    }
}
