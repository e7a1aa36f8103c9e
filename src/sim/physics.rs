//! Fixed-step physics world
//!
//! Minimal rigid-body world for the runner: gravity integration for dynamic
//! bodies, sphere/box narrow phase, begin-only contact events in handle
//! order. Pairs of mass-0 bodies are skipped outright, so kinematic
//! obstacles never grind against the ground or each other, and sensor
//! bodies report contacts without ever pushing back.

use std::collections::HashSet;

use glam::Vec3;

use super::body::{BodyId, Material, RigidBody, Shape};

/// A newly-overlapping body pair reported by [`PhysicsWorld::step`].
///
/// A pair that stays overlapped across steps is reported once, when the
/// overlap begins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Contact {
    pub a: BodyId,
    pub b: BodyId,
}

impl Contact {
    /// The other body of the pair, if `id` is one of them
    pub fn other(&self, id: BodyId) -> Option<BodyId> {
        if self.a == id {
            Some(self.b)
        } else if self.b == id {
            Some(self.a)
        } else {
            None
        }
    }
}

/// Owns every registered body and advances them at a fixed timestep
#[derive(Debug)]
pub struct PhysicsWorld {
    gravity: Vec3,
    bodies: Vec<Option<RigidBody>>,
    /// Pairs overlapping as of the last step, keyed (low, high)
    overlapping: HashSet<(BodyId, BodyId)>,
}

impl PhysicsWorld {
    pub fn new(gravity: Vec3) -> Self {
        Self {
            gravity,
            bodies: Vec::new(),
            overlapping: HashSet::new(),
        }
    }

    pub fn add_body(&mut self, body: RigidBody) -> BodyId {
        let id = BodyId(self.bodies.len() as u32);
        self.bodies.push(Some(body));
        id
    }

    /// Detach a body. Removing an already-removed handle is a no-op.
    pub fn remove_body(&mut self, id: BodyId) {
        if let Some(slot) = self.bodies.get_mut(id.0 as usize) {
            if slot.take().is_some() {
                self.overlapping.retain(|&(a, b)| a != id && b != id);
            }
        }
    }

    pub fn body(&self, id: BodyId) -> Option<&RigidBody> {
        self.bodies.get(id.0 as usize)?.as_ref()
    }

    pub fn body_mut(&mut self, id: BodyId) -> Option<&mut RigidBody> {
        self.bodies.get_mut(id.0 as usize)?.as_mut()
    }

    pub fn contains(&self, id: BodyId) -> bool {
        self.body(id).is_some()
    }

    /// Number of registered bodies
    pub fn body_count(&self) -> usize {
        self.bodies.iter().filter(|slot| slot.is_some()).count()
    }

    /// Advance one fixed interval: integrate dynamics, then run the narrow
    /// phase and return the contacts that began this step. A step with zero
    /// bodies is a valid no-op.
    pub fn step(&mut self, dt: f32) -> Vec<Contact> {
        self.integrate(dt);
        self.collide()
    }

    fn integrate(&mut self, dt: f32) {
        for (index, slot) in self.bodies.iter_mut().enumerate() {
            let Some(body) = slot else { continue };
            if !body.is_dynamic() {
                continue;
            }
            let prev_position = body.position;
            let prev_velocity = body.velocity;
            body.velocity += self.gravity * dt;
            body.position += body.velocity * dt;
            if !(body.position.is_finite() && body.velocity.is_finite()) {
                log::warn!("body {index} produced a non-finite state; clamping to last valid");
                body.position = if prev_position.is_finite() {
                    prev_position
                } else {
                    Vec3::ZERO
                };
                body.velocity = if prev_velocity.is_finite() {
                    prev_velocity
                } else {
                    Vec3::ZERO
                };
            }
        }
    }

    fn collide(&mut self) -> Vec<Contact> {
        let mut contacts = Vec::new();
        let mut now = HashSet::new();
        let count = self.bodies.len();
        for i in 0..count {
            for j in (i + 1)..count {
                let (head, tail) = self.bodies.split_at_mut(j);
                let Some(a) = head[i].as_mut() else { continue };
                let Some(b) = tail[0].as_mut() else { continue };
                // Mass-0 pairs never interact
                if !a.is_dynamic() && !b.is_dynamic() {
                    continue;
                }
                let Some((normal, penetration)) = overlap(a, b) else {
                    continue;
                };
                let key = (BodyId(i as u32), BodyId(j as u32));
                now.insert(key);
                if !self.overlapping.contains(&key) {
                    contacts.push(Contact { a: key.0, b: key.1 });
                }
                if a.material == Material::Solid && b.material == Material::Solid {
                    resolve(a, b, normal, penetration);
                }
            }
        }
        self.overlapping = now;
        contacts
    }
}

/// Overlap test; the normal points from `a` toward `b`
fn overlap(a: &RigidBody, b: &RigidBody) -> Option<(Vec3, f32)> {
    match (a.shape, b.shape) {
        (Shape::Sphere { radius: ra }, Shape::Sphere { radius: rb }) => {
            let delta = b.position - a.position;
            let reach = ra + rb;
            let dist_sq = delta.length_squared();
            if dist_sq >= reach * reach {
                return None;
            }
            let dist = dist_sq.sqrt();
            let normal = if dist > 1e-6 { delta / dist } else { Vec3::Y };
            Some((normal, reach - dist))
        }
        (Shape::Sphere { radius }, Shape::Cuboid { half_extents }) => {
            sphere_cuboid(a.position, radius, b.position, half_extents)
                .map(|(normal, pen)| (-normal, pen))
        }
        (Shape::Cuboid { half_extents }, Shape::Sphere { radius }) => {
            sphere_cuboid(b.position, radius, a.position, half_extents)
        }
        (Shape::Cuboid { half_extents: ha }, Shape::Cuboid { half_extents: hb }) => {
            let delta = b.position - a.position;
            let depth = ha + hb - delta.abs();
            if depth.min_element() <= 0.0 {
                return None;
            }
            // Separate along the axis of least penetration
            let (axis, pen) = if depth.x <= depth.y && depth.x <= depth.z {
                (Vec3::X, depth.x)
            } else if depth.y <= depth.z {
                (Vec3::Y, depth.y)
            } else {
                (Vec3::Z, depth.z)
            };
            let sign = if delta.dot(axis) >= 0.0 { 1.0 } else { -1.0 };
            Some((axis * sign, pen))
        }
    }
}

/// Sphere vs axis-aligned box; the normal points from the box toward the
/// sphere center
fn sphere_cuboid(
    center: Vec3,
    radius: f32,
    box_position: Vec3,
    half_extents: Vec3,
) -> Option<(Vec3, f32)> {
    let local = center - box_position;
    let closest = local.clamp(-half_extents, half_extents);
    let delta = local - closest;
    let dist_sq = delta.length_squared();
    if dist_sq > radius * radius {
        return None;
    }
    if dist_sq > 1e-12 {
        let dist = dist_sq.sqrt();
        return Some((delta / dist, radius - dist));
    }
    // Center inside the box: push out through the nearest face
    let depth = half_extents - local.abs();
    let (axis, face_depth) = if depth.x <= depth.y && depth.x <= depth.z {
        (Vec3::X, depth.x)
    } else if depth.y <= depth.z {
        (Vec3::Y, depth.y)
    } else {
        (Vec3::Z, depth.z)
    };
    let sign = if local.dot(axis) >= 0.0 { 1.0 } else { -1.0 };
    Some((axis * sign, radius + face_depth))
}

/// Inelastic positional correction between two solid bodies, at least one
/// of which is dynamic
fn resolve(a: &mut RigidBody, b: &mut RigidBody, normal: Vec3, penetration: f32) {
    match (a.is_dynamic(), b.is_dynamic()) {
        (true, false) => {
            a.position -= normal * penetration;
            let approach = a.velocity.dot(normal);
            if approach > 0.0 {
                a.velocity -= normal * approach;
            }
        }
        (false, true) => {
            b.position += normal * penetration;
            let approach = b.velocity.dot(normal);
            if approach < 0.0 {
                b.velocity -= normal * approach;
            }
        }
        (true, true) => {
            a.position -= normal * (penetration * 0.5);
            b.position += normal * (penetration * 0.5);
            let relative = (b.velocity - a.velocity).dot(normal);
            if relative < 0.0 {
                a.velocity += normal * (relative * 0.5);
                b.velocity -= normal * (relative * 0.5);
            }
        }
        (false, false) => {}
    }
}
