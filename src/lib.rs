//! Sun Dash - an endless-runner dodge-and-collect game core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, entity pools, game state)
//! - `config`: Data-driven tuning with fail-fast validation
//! - `bridge`: Narrow interfaces to the rendering/UI collaborators
//!
//! The crate owns the game rules only. Meshes, textures, camera, and window
//! handling belong to whatever sits behind [`bridge::RenderBridge`]; the demo
//! binary drives the core headlessly.

pub mod bridge;
pub mod config;
pub mod sim;

pub use config::GameConfig;

/// Reference game constants (the defaults behind [`GameConfig::default`])
pub mod consts {
    /// Fixed simulation timestep (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Gravity along y
    pub const GRAVITY_Y: f32 = -9.82;

    /// Ground slab half extents
    pub const GROUND_HALF_EXTENTS: [f32; 3] = [15.0, 0.5, 15.0];
    /// Ground slab center height
    pub const GROUND_Y: f32 = -1.0;

    /// Player collision sphere radius
    pub const PLAYER_RADIUS: f32 = 0.37;
    /// Player mass (dynamic body)
    pub const PLAYER_MASS: f32 = 1.0;
    /// Sideways shift per move command
    pub const MOVE_STEP: f32 = 0.1;
    /// Absolute height a jump command snaps the player to
    pub const JUMP_HEIGHT: f32 = 1.8;
    /// Vertical velocity applied to the player on game over
    pub const EJECT_UP: f32 = 5.0;
    /// Approach-axis velocity applied to the player on game over
    pub const EJECT_FORWARD: f32 = 5.0;

    /// Obstacles recycle (and the ejected player despawns) past this z
    pub const VIEWPOINT_Z: f32 = 4.5;

    /// Powerup sensor radius
    pub const POWERUP_RADIUS: f32 = 0.1;
    /// Powerup pool size
    pub const POWERUP_COUNT: usize = 10;
    /// Powerup approach speed per tick, before difficulty scaling
    pub const POWERUP_SPEED: f32 = 0.06;

    /// Enemy sensor radius
    pub const ENEMY_RADIUS: f32 = 0.38;
    /// Enemy pool size
    pub const ENEMY_COUNT: usize = 3;
    /// Enemy approach speed per tick, before difficulty scaling
    pub const ENEMY_SPEED: f32 = 0.1;

    /// Spawn x range, inclusive integers on the ground plane
    pub const SPAWN_X: (i32, i32) = (-8, 8);
    /// Spawn z range, behind the far edge of the play field
    pub const SPAWN_Z: (i32, i32) = (-10, -5);

    /// Wall-clock seconds between difficulty increments
    pub const DIFFICULTY_INTERVAL_SECS: u64 = 5;
    /// Per-interval difficulty increment
    pub const DIFFICULTY_DELTA: f64 = 0.1;
}
