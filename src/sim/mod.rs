//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay deterministic:
//! - Fixed timestep only
//! - Seeded RNG only, for spawn placement
//! - Contact events reported in handle order every step
//! - No rendering or platform dependencies (those sit behind `crate::bridge`)
//!
//! The one sanctioned cross-thread value is the difficulty factor, which a
//! background clock bumps on a wall-clock cadence and the tick reads once.

pub mod body;
pub mod clock;
pub mod input;
pub mod physics;
pub mod pool;
pub mod rng;
pub mod session;
pub mod tick;

pub use body::{BodyId, Material, RigidBody, Shape};
pub use clock::DifficultyClock;
pub use input::Command;
pub use physics::{Contact, PhysicsWorld};
pub use pool::{Entity, EntityCategory, EntityPool};
pub use rng::RangeSampler;
pub use session::{GAME_OVER_MESSAGE, GamePhase, Player, Session};
pub use tick::{run_frame, tick};
