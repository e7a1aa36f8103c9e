//! Game tuning configuration
//!
//! Every gameplay constant lives here so a deployment can override the
//! reference setup from JSON. Validation is fail-fast: a config that asks
//! for an empty pool or inverted spawn bounds is a construction error, never
//! something to silently clamp.

use std::time::Duration;

use glam::Vec3;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Rejected configuration values
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{pool} pool size must be at least 1")]
    EmptyPool { pool: &'static str },
    #[error("{pool} spawn bounds are inverted on {axis}: [{min}, {max}]")]
    InvertedBounds {
        pool: &'static str,
        axis: char,
        min: i32,
        max: i32,
    },
    #[error("{field} must be positive (got {value})")]
    NonPositive { field: &'static str, value: f64 },
    #[error("difficulty delta must not be negative (got {0})")]
    NegativeDelta(f64),
    #[error("difficulty cap must be at least the starting factor 1.0 (got {0})")]
    CapBelowStart(f64),
    #[error("config is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Inclusive integer spawn ranges on the ground plane
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SpawnBounds {
    pub x_min: i32,
    pub x_max: i32,
    pub z_min: i32,
    pub z_max: i32,
}

/// One obstacle/pickup pool
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PoolConfig {
    /// Fixed number of entities; the pool never grows or shrinks mid-session
    pub count: usize,
    /// Sensor sphere radius
    pub radius: f32,
    /// Approach speed per tick, scaled by the difficulty factor
    pub speed: f32,
    pub bounds: SpawnBounds,
}

/// The player body and its command tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerConfig {
    pub radius: f32,
    pub mass: f32,
    pub spawn: Vec3,
    /// Sideways shift per move command
    pub move_step: f32,
    /// Absolute height a jump snaps to; repeated jumps do not stack
    pub jump_height: f32,
    /// Vertical velocity set on game over
    pub eject_up: f32,
    /// Approach-axis velocity set on game over
    pub eject_forward: f32,
}

/// The static slab the player stands on
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroundConfig {
    pub half_extents: Vec3,
    pub y: f32,
}

/// Difficulty ramp: the factor starts at 1.0 and gains `delta` every
/// `interval` of wall time, optionally clamped to `cap`.
///
/// `cap: None` reproduces the unbounded reference ramp; set a cap to bound
/// late-session obstacle speed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DifficultyGrowth {
    pub interval: Duration,
    pub delta: f64,
    pub cap: Option<f64>,
}

/// Complete game tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameConfig {
    /// Seed for all spawn placement
    pub seed: u64,
    /// Fixed physics timestep in seconds
    pub timestep: f32,
    pub gravity: Vec3,
    /// Obstacles recycle and the ejected player despawns past this z
    pub viewpoint_z: f32,
    pub ground: GroundConfig,
    pub player: PlayerConfig,
    pub powerups: PoolConfig,
    pub enemies: PoolConfig,
    pub difficulty: DifficultyGrowth,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            timestep: SIM_DT,
            gravity: Vec3::new(0.0, GRAVITY_Y, 0.0),
            viewpoint_z: VIEWPOINT_Z,
            ground: GroundConfig {
                half_extents: Vec3::from_array(GROUND_HALF_EXTENTS),
                y: GROUND_Y,
            },
            player: PlayerConfig {
                radius: PLAYER_RADIUS,
                mass: PLAYER_MASS,
                spawn: Vec3::ZERO,
                move_step: MOVE_STEP,
                jump_height: JUMP_HEIGHT,
                eject_up: EJECT_UP,
                eject_forward: EJECT_FORWARD,
            },
            powerups: PoolConfig {
                count: POWERUP_COUNT,
                radius: POWERUP_RADIUS,
                speed: POWERUP_SPEED,
                bounds: SpawnBounds {
                    x_min: SPAWN_X.0,
                    x_max: SPAWN_X.1,
                    z_min: SPAWN_Z.0,
                    z_max: SPAWN_Z.1,
                },
            },
            enemies: PoolConfig {
                count: ENEMY_COUNT,
                radius: ENEMY_RADIUS,
                speed: ENEMY_SPEED,
                bounds: SpawnBounds {
                    x_min: SPAWN_X.0,
                    x_max: SPAWN_X.1,
                    z_min: SPAWN_Z.0,
                    z_max: SPAWN_Z.1,
                },
            },
            difficulty: DifficultyGrowth {
                interval: Duration::from_secs(DIFFICULTY_INTERVAL_SECS),
                delta: DIFFICULTY_DELTA,
                cap: None,
            },
        }
    }
}

impl GameConfig {
    /// Parse and validate a JSON config
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject invalid tuning before any session state is built
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.timestep <= 0.0 {
            return Err(ConfigError::NonPositive {
                field: "timestep",
                value: self.timestep as f64,
            });
        }
        if self.player.radius <= 0.0 {
            return Err(ConfigError::NonPositive {
                field: "player.radius",
                value: self.player.radius as f64,
            });
        }
        if self.player.mass <= 0.0 {
            return Err(ConfigError::NonPositive {
                field: "player.mass",
                value: self.player.mass as f64,
            });
        }
        Self::validate_pool("powerups", &self.powerups)?;
        Self::validate_pool("enemies", &self.enemies)?;
        if self.difficulty.interval.is_zero() {
            return Err(ConfigError::NonPositive {
                field: "difficulty.interval",
                value: 0.0,
            });
        }
        if self.difficulty.delta < 0.0 {
            return Err(ConfigError::NegativeDelta(self.difficulty.delta));
        }
        if let Some(cap) = self.difficulty.cap {
            if cap < 1.0 {
                return Err(ConfigError::CapBelowStart(cap));
            }
        }
        Ok(())
    }

    fn validate_pool(name: &'static str, pool: &PoolConfig) -> Result<(), ConfigError> {
        if pool.count == 0 {
            return Err(ConfigError::EmptyPool { pool: name });
        }
        if pool.radius <= 0.0 {
            return Err(ConfigError::NonPositive {
                field: "pool radius",
                value: pool.radius as f64,
            });
        }
        if pool.speed <= 0.0 {
            return Err(ConfigError::NonPositive {
                field: "pool speed",
                value: pool.speed as f64,
            });
        }
        let b = pool.bounds;
        if b.x_min > b.x_max {
            return Err(ConfigError::InvertedBounds {
                pool: name,
                axis: 'x',
                min: b.x_min,
                max: b.x_max,
            });
        }
        if b.z_min > b.z_max {
            return Err(ConfigError::InvertedBounds {
                pool: name,
                axis: 'z',
                min: b.z_min,
                max: b.z_max,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(GameConfig::default().validate().is_ok());
    }

    #[test]
    fn test_empty_pool_rejected() {
        let mut config = GameConfig::default();
        config.enemies.count = 0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::EmptyPool { pool: "enemies" })
        ));
    }

    #[test]
    fn test_inverted_bounds_rejected() {
        let mut config = GameConfig::default();
        config.powerups.bounds.x_min = 9;
        config.powerups.bounds.x_max = -9;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvertedBounds { axis: 'x', .. })
        ));
    }

    #[test]
    fn test_zero_timestep_rejected() {
        let mut config = GameConfig::default();
        config.timestep = 0.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_cap_below_start_rejected() {
        let mut config = GameConfig::default();
        config.difficulty.cap = Some(0.5);
        assert!(matches!(config.validate(), Err(ConfigError::CapBelowStart(_))));
    }

    #[test]
    fn test_json_round_trip() {
        let config = GameConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let parsed = GameConfig::from_json(&json).unwrap();
        assert_eq!(parsed.enemies.count, config.enemies.count);
        assert_eq!(parsed.difficulty.delta, config.difficulty.delta);
    }

    #[test]
    fn test_invalid_json_rejected() {
        assert!(matches!(
            GameConfig::from_json("{not json"),
            Err(ConfigError::Json(_))
        ));
    }
}
