//! Pooled obstacle and pickup entities
//!
//! Entities are created once per session and recycled in place: crossing
//! the viewpoint threshold re-rolls a fresh spawn position instead of
//! destroying the body, so a pool's set of live handles never changes size
//! between `populate` and `teardown_all`.

use glam::{Quat, Vec3};

use crate::bridge::{RenderBridge, VisualId};
use crate::config::PoolConfig;

use super::body::{BodyId, RigidBody, Shape};
use super::physics::PhysicsWorld;
use super::rng::RangeSampler;

/// What a pool spawns
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityCategory {
    Powerup,
    Enemy,
}

/// One pooled entity: a sensor body paired with its visual proxy
#[derive(Debug, Clone, Copy)]
pub struct Entity {
    pub body: BodyId,
    pub visual: VisualId,
}

/// Fixed-size pool of sensor entities marching down the approach axis.
///
/// Inert (empty) until `populate` runs; every operation on an empty pool is
/// a safe no-op, which covers the window before the category's visual
/// template has resolved.
#[derive(Debug)]
pub struct EntityPool {
    category: EntityCategory,
    config: PoolConfig,
    entities: Vec<Entity>,
}

impl EntityPool {
    pub fn new(category: EntityCategory, config: PoolConfig) -> Self {
        Self {
            category,
            config,
            entities: Vec::new(),
        }
    }

    pub fn category(&self) -> EntityCategory {
        self.category
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    pub fn contains_body(&self, id: BodyId) -> bool {
        self.entities.iter().any(|entity| entity.body == id)
    }

    fn spawn_position(config: &PoolConfig, rng: &mut RangeSampler) -> Vec3 {
        let x = rng.sample(config.bounds.x_max, config.bounds.x_min);
        let z = rng.sample(config.bounds.z_max, config.bounds.z_min);
        Vec3::new(x as f32, 0.0, z as f32)
    }

    /// Create the configured number of entities from a loaded template.
    /// A second call on a live pool is a no-op.
    pub fn populate(
        &mut self,
        world: &mut PhysicsWorld,
        bridge: &mut dyn RenderBridge,
        template: VisualId,
        rng: &mut RangeSampler,
    ) {
        if !self.entities.is_empty() {
            return;
        }
        for _ in 0..self.config.count {
            let position = Self::spawn_position(&self.config, rng);
            let body = world.add_body(RigidBody::sensor(
                Shape::Sphere {
                    radius: self.config.radius,
                },
                position,
            ));
            let visual = bridge.clone_visual(template);
            bridge.sync_transform(visual, position, Quat::IDENTITY);
            self.entities.push(Entity { body, visual });
        }
        log::debug!(
            "populated {:?} pool with {} entities",
            self.category,
            self.entities.len()
        );
    }

    /// March every entity toward the player by `speed * difficulty` along
    /// the approach axis, recycling any that crossed `threshold_z`, then
    /// push the resulting transforms to the bridge.
    pub fn advance(
        &mut self,
        world: &mut PhysicsWorld,
        bridge: &mut dyn RenderBridge,
        rng: &mut RangeSampler,
        difficulty: f64,
        threshold_z: f32,
    ) {
        let step = self.config.speed * difficulty as f32;
        for entity in &self.entities {
            let Some(body) = world.body_mut(entity.body) else {
                continue;
            };
            body.position.z += step;
            if body.position.z > threshold_z {
                body.position = Self::spawn_position(&self.config, rng);
            }
            let (position, orientation) = (body.position, body.orientation);
            bridge.sync_transform(entity.visual, position, orientation);
        }
    }

    /// Immediately relocate the one entity owning `body` (the pickup
    /// collection path); every other entity is untouched.
    pub fn recycle(
        &mut self,
        world: &mut PhysicsWorld,
        bridge: &mut dyn RenderBridge,
        rng: &mut RangeSampler,
        body: BodyId,
    ) {
        let Some(entity) = self.entities.iter().find(|entity| entity.body == body) else {
            return;
        };
        let position = Self::spawn_position(&self.config, rng);
        if let Some(rigid) = world.body_mut(entity.body) {
            rigid.position = position;
            let orientation = rigid.orientation;
            bridge.sync_transform(entity.visual, position, orientation);
        }
    }

    /// Remove every entity's body from the world and detach its visual.
    /// Empties the pool; used once per session, on game over.
    pub fn teardown_all(&mut self, world: &mut PhysicsWorld, bridge: &mut dyn RenderBridge) {
        for entity in self.entities.drain(..) {
            world.remove_body(entity.body);
            bridge.remove_visual(entity.visual);
        }
    }
}
