//! Session state and the contact-driven state machine
//!
//! All mutable game state sits behind one owner: score, phase, pools,
//! player, physics world, clock, and spawn sampler. Contacts come in as an
//! explicit queue drained once per step; the session maps them to effects
//! (score + recycle for powerups, the terminal death sequence for enemies).

use glam::Quat;

use crate::bridge::{
    AssetKind, AssetSource, GameOverDisplay, RenderBridge, ScoreDisplay, VisualId,
};
use crate::config::{ConfigError, GameConfig};

use super::body::{BodyId, RigidBody, Shape};
use super::clock::DifficultyClock;
use super::physics::{Contact, PhysicsWorld};
use super::pool::{EntityCategory, EntityPool};
use super::rng::RangeSampler;

/// Message pushed to the game-over display on death
pub const GAME_OVER_MESSAGE: &str = "GAME OVER! Press Enter to restart";

/// Current phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    Playing,
    GameOver,
}

/// The player's body/visual pair
#[derive(Debug, Clone, Copy)]
pub struct Player {
    pub body: BodyId,
    pub visual: VisualId,
}

/// One game session, from first tick to restart
pub struct Session {
    pub config: GameConfig,
    pub phase: GamePhase,
    pub score: u64,
    pub world: PhysicsWorld,
    pub clock: DifficultyClock,
    pub powerups: EntityPool,
    pub enemies: EntityPool,
    /// `None` before the player template resolves and after the terminal
    /// death ejection removes the body
    pub player: Option<Player>,
    pub(crate) rng: RangeSampler,
    ground: BodyId,
}

impl Session {
    /// Validate the config and build the inert session skeleton: ground
    /// registered, pools empty, no player until assets resolve.
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: GameConfig) -> Self {
        let mut world = PhysicsWorld::new(config.gravity);
        let ground = world.add_body(RigidBody::kinematic(
            Shape::Cuboid {
                half_extents: config.ground.half_extents,
            },
            glam::Vec3::new(0.0, config.ground.y, 0.0),
        ));
        Self {
            phase: GamePhase::Playing,
            score: 0,
            world,
            clock: DifficultyClock::new(config.difficulty.clone()),
            powerups: EntityPool::new(EntityCategory::Powerup, config.powerups.clone()),
            enemies: EntityPool::new(EntityCategory::Enemy, config.enemies.clone()),
            player: None,
            rng: RangeSampler::from_seed(config.seed),
            ground,
            config,
        }
    }

    pub fn ground(&self) -> BodyId {
        self.ground
    }

    /// Current difficulty factor (one consistent read)
    pub fn difficulty(&self) -> f64 {
        self.clock.factor()
    }

    /// Poll the asset source and bring whatever just resolved to life.
    /// Returns true once the player and both pools are live. Safe to call
    /// every frame; already-live parts are skipped.
    pub fn try_populate(
        &mut self,
        assets: &mut dyn AssetSource,
        bridge: &mut dyn RenderBridge,
    ) -> bool {
        if self.phase == GamePhase::GameOver {
            return false;
        }
        if self.player.is_none() {
            if let Some(template) = assets.poll_template(AssetKind::Player) {
                let spawn = self.config.player.spawn;
                let body = self.world.add_body(
                    RigidBody::dynamic(
                        Shape::Sphere {
                            radius: self.config.player.radius,
                        },
                        spawn,
                        self.config.player.mass,
                    )
                    .with_fixed_rotation(),
                );
                let visual = bridge.clone_visual(template);
                bridge.sync_transform(visual, spawn, Quat::IDENTITY);
                self.player = Some(Player { body, visual });
                log::debug!("player body live at {spawn}");
            }
        }
        if self.powerups.is_empty() {
            if let Some(template) = assets.poll_template(AssetKind::Powerup) {
                self.powerups
                    .populate(&mut self.world, bridge, template, &mut self.rng);
            }
        }
        if self.enemies.is_empty() {
            if let Some(template) = assets.poll_template(AssetKind::Enemy) {
                self.enemies
                    .populate(&mut self.world, bridge, template, &mut self.rng);
            }
        }
        self.player.is_some() && !self.powerups.is_empty() && !self.enemies.is_empty()
    }

    /// Route one contact event. Only player contacts matter; once the
    /// session is over, further contacts are ignored, so a step that
    /// delivers several enemy hits still transitions exactly once.
    pub(crate) fn on_contact(
        &mut self,
        contact: Contact,
        bridge: &mut dyn RenderBridge,
        score_display: &mut dyn ScoreDisplay,
        game_over_display: &mut dyn GameOverDisplay,
    ) {
        if self.phase != GamePhase::Playing {
            return;
        }
        let Some(player) = self.player else {
            return;
        };
        let Some(other) = contact.other(player.body) else {
            return;
        };
        if self.powerups.contains_body(other) {
            self.score += 1;
            score_display.set_score(self.score);
            self.powerups
                .recycle(&mut self.world, bridge, &mut self.rng, other);
            log::debug!("powerup collected, score {}", self.score);
        } else if self.enemies.contains_body(other) {
            self.enter_game_over(bridge, game_over_display);
        }
    }

    /// Terminal transition: announce, eject the player, tear both pools
    /// down. The physics world keeps stepping so the ejection plays out.
    fn enter_game_over(
        &mut self,
        bridge: &mut dyn RenderBridge,
        game_over_display: &mut dyn GameOverDisplay,
    ) {
        self.phase = GamePhase::GameOver;
        game_over_display.show(GAME_OVER_MESSAGE);
        if let Some(player) = self.player {
            if let Some(body) = self.world.body_mut(player.body) {
                body.velocity.y = self.config.player.eject_up;
                body.velocity.z = self.config.player.eject_forward;
            }
        }
        self.powerups.teardown_all(&mut self.world, bridge);
        self.enemies.teardown_all(&mut self.world, bridge);
        log::info!("game over at score {}", self.score);
    }

    /// After the ejection has carried the player past the viewpoint, remove
    /// the body from the world and detach its visual.
    pub(crate) fn despawn_player_if_gone(&mut self, bridge: &mut dyn RenderBridge) {
        if self.phase != GamePhase::GameOver {
            return;
        }
        let Some(player) = self.player else {
            return;
        };
        let Some(body) = self.world.body(player.body) else {
            return;
        };
        if body.position.z > self.config.viewpoint_z {
            self.world.remove_body(player.body);
            bridge.remove_visual(player.visual);
            self.player = None;
            log::debug!("player despawned past the viewpoint");
        }
    }

    /// Full reinitialization, equivalent to a fresh session: score 0,
    /// Playing phase, difficulty back to 1.0, new world, pools repopulated
    /// to their configured counts.
    pub fn restart(
        &mut self,
        bridge: &mut dyn RenderBridge,
        assets: &mut dyn AssetSource,
        score_display: &mut dyn ScoreDisplay,
    ) {
        self.powerups.teardown_all(&mut self.world, bridge);
        self.enemies.teardown_all(&mut self.world, bridge);
        if let Some(player) = self.player.take() {
            self.world.remove_body(player.body);
            bridge.remove_visual(player.visual);
        }
        let was_running = self.clock.is_running();
        *self = Self::build(self.config.clone());
        if was_running {
            self.clock.start();
        }
        self.try_populate(assets, bridge);
        score_display.set_score(self.score);
        log::info!("session restarted");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bridge::{HeadlessBridge, InstantAssets, PendingAssets};
    use glam::Vec3;

    #[derive(Default)]
    pub(crate) struct RecordingScore {
        pub updates: Vec<u64>,
    }

    impl ScoreDisplay for RecordingScore {
        fn set_score(&mut self, score: u64) {
            self.updates.push(score);
        }
    }

    #[derive(Default)]
    pub(crate) struct RecordingBanner {
        pub messages: Vec<String>,
    }

    impl GameOverDisplay for RecordingBanner {
        fn show(&mut self, message: &str) {
            self.messages.push(message.to_string());
        }
    }

    fn live_session() -> (Session, HeadlessBridge) {
        let mut session = Session::new(GameConfig::default()).unwrap();
        let mut bridge = HeadlessBridge::new();
        assert!(session.try_populate(&mut InstantAssets, &mut bridge));
        (session, bridge)
    }

    fn enemy_contact(session: &Session) -> Contact {
        Contact {
            a: session.player.unwrap().body,
            b: session.enemies.entities()[0].body,
        }
    }

    #[test]
    fn test_new_session_is_inert_until_assets_resolve() {
        let mut session = Session::new(GameConfig::default()).unwrap();
        let mut bridge = HeadlessBridge::new();
        let mut assets = PendingAssets::default();
        assert!(!session.try_populate(&mut assets, &mut bridge));
        assert!(session.player.is_none());
        assert!(session.powerups.is_empty());
        // Only the ground is registered; stepping is still valid
        assert_eq!(session.world.body_count(), 1);
        assert!(session.world.contains(session.ground()));
        session.world.step(session.config.timestep);

        assets.ready = true;
        assert!(session.try_populate(&mut assets, &mut bridge));
        assert_eq!(session.powerups.len(), 10);
        assert_eq!(session.enemies.len(), 3);
        assert_eq!(session.world.body_count(), 1 + 10 + 3 + 1);
    }

    #[test]
    fn test_powerup_contact_scores_and_recycles() {
        let (mut session, mut bridge) = live_session();
        let mut score = RecordingScore::default();
        let mut banner = RecordingBanner::default();
        let target = session.powerups.entities()[0].body;
        let others: Vec<Vec3> = session.powerups.entities()[1..]
            .iter()
            .map(|entity| session.world.body(entity.body).unwrap().position)
            .collect();

        let contact = Contact {
            a: session.player.unwrap().body,
            b: target,
        };
        session.on_contact(contact, &mut bridge, &mut score, &mut banner);

        assert_eq!(session.score, 1);
        assert_eq!(score.updates, vec![1]);
        assert_eq!(session.phase, GamePhase::Playing);
        assert!(banner.messages.is_empty());
        // Only the collected powerup moved
        for (entity, before) in session.powerups.entities()[1..].iter().zip(others) {
            assert_eq!(session.world.body(entity.body).unwrap().position, before);
        }
        let relocated = session.world.body(target).unwrap().position;
        assert!((-10.0..=-5.0).contains(&relocated.z));
    }

    #[test]
    fn test_enemy_contact_transitions_exactly_once() {
        let (mut session, mut bridge) = live_session();
        let mut score = RecordingScore::default();
        let mut banner = RecordingBanner::default();
        let player_body = session.player.unwrap().body;
        let first = enemy_contact(&session);
        let second = Contact {
            a: player_body,
            b: session.enemies.entities()[1].body,
        };

        session.on_contact(first, &mut bridge, &mut score, &mut banner);
        // A second enemy hit in the same step finds the pools already gone
        session.on_contact(second, &mut bridge, &mut score, &mut banner);

        assert_eq!(session.phase, GamePhase::GameOver);
        assert_eq!(banner.messages, vec![GAME_OVER_MESSAGE.to_string()]);
        assert!(session.powerups.is_empty());
        assert!(session.enemies.is_empty());
        // Ground and player remain
        assert_eq!(session.world.body_count(), 2);
        let body = session.world.body(player_body).unwrap();
        assert_eq!(body.velocity.y, 5.0);
        assert_eq!(body.velocity.z, 5.0);
    }

    #[test]
    fn test_score_untouched_by_death() {
        let (mut session, mut bridge) = live_session();
        let mut score = RecordingScore::default();
        let mut banner = RecordingBanner::default();
        session.score = 7;
        session.on_contact(enemy_contact(&session), &mut bridge, &mut score, &mut banner);
        assert_eq!(session.score, 7);
        assert!(score.updates.is_empty());
    }

    #[test]
    fn test_player_despawns_past_viewpoint() {
        let (mut session, mut bridge) = live_session();
        let mut score = RecordingScore::default();
        let mut banner = RecordingBanner::default();
        session.on_contact(enemy_contact(&session), &mut bridge, &mut score, &mut banner);

        let player = session.player.unwrap();
        session.despawn_player_if_gone(&mut bridge);
        assert!(session.player.is_some());

        session.world.body_mut(player.body).unwrap().position.z = 5.0;
        session.despawn_player_if_gone(&mut bridge);
        assert!(session.player.is_none());
        assert!(!session.world.contains(player.body));
        assert!(bridge.removed.contains(&player.visual));
        // Second call with no player is a no-op
        session.despawn_player_if_gone(&mut bridge);
    }

    #[test]
    fn test_restart_is_a_fresh_session() {
        let (mut session, mut bridge) = live_session();
        let mut score = RecordingScore::default();
        let mut banner = RecordingBanner::default();
        session.score = 4;
        session.on_contact(enemy_contact(&session), &mut bridge, &mut score, &mut banner);
        assert_eq!(session.phase, GamePhase::GameOver);

        session.restart(&mut bridge, &mut InstantAssets, &mut score);

        assert_eq!(session.phase, GamePhase::Playing);
        assert_eq!(session.score, 0);
        assert_eq!(session.difficulty(), 1.0);
        assert_eq!(session.powerups.len(), 10);
        assert_eq!(session.enemies.len(), 3);
        assert!(session.player.is_some());
        assert_eq!(score.updates.last(), Some(&0));
        assert_eq!(session.world.body_count(), 1 + 10 + 3 + 1);
    }
}
