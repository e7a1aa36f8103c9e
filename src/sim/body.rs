//! Rigid body representation
//!
//! Bodies are owned exclusively by the [`PhysicsWorld`](super::physics::PhysicsWorld);
//! everything else holds [`BodyId`] handles.

use glam::{Quat, Vec3};

/// Opaque handle to a body registered in a physics world
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BodyId(pub(crate) u32);

/// Collision shape descriptor
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    Sphere { radius: f32 },
    /// Axis-aligned box
    Cuboid { half_extents: Vec3 },
}

/// Collision material tag.
///
/// `Sensor` pairings produce contact events with zero physical response: no
/// impulse, no positional correction against the other body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Material {
    Solid,
    Sensor,
}

/// A rigid body: static/kinematic at mass 0, dynamic above
#[derive(Debug, Clone)]
pub struct RigidBody {
    pub position: Vec3,
    pub orientation: Quat,
    pub velocity: Vec3,
    pub shape: Shape,
    pub mass: f32,
    pub material: Material,
    /// Dynamic bodies with fixed rotation keep an identity orientation
    pub fixed_rotation: bool,
}

impl RigidBody {
    fn base(shape: Shape, position: Vec3, mass: f32, material: Material) -> Self {
        Self {
            position,
            orientation: Quat::IDENTITY,
            velocity: Vec3::ZERO,
            shape,
            mass,
            material,
            fixed_rotation: false,
        }
    }

    /// Static or kinematic body: positioned by game logic, immune to gravity
    pub fn kinematic(shape: Shape, position: Vec3) -> Self {
        Self::base(shape, position, 0.0, Material::Solid)
    }

    /// Kinematic sensor: reports contacts, pushes nothing
    pub fn sensor(shape: Shape, position: Vec3) -> Self {
        Self::base(shape, position, 0.0, Material::Sensor)
    }

    /// Dynamic body under gravity
    pub fn dynamic(shape: Shape, position: Vec3, mass: f32) -> Self {
        Self::base(shape, position, mass, Material::Solid)
    }

    pub fn with_fixed_rotation(mut self) -> Self {
        self.fixed_rotation = true;
        self
    }

    pub fn is_dynamic(&self) -> bool {
        self.mass > 0.0
    }
}
