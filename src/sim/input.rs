//! Discrete input commands
//!
//! Commands mutate the player body directly: no smoothing, no queueing.
//! Each one is applied the moment it arrives and is idempotent with respect
//! to ordering within a frame.

use crate::bridge::{AssetSource, RenderBridge, ScoreDisplay};

use super::session::Session;

/// The discrete command set delivered by the input collaborator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    MoveLeft,
    MoveRight,
    Jump,
    Reset,
    Restart,
}

impl Command {
    /// Translate a key name to a command. Unrecognized keys are ignored.
    pub fn from_key(key: &str) -> Option<Command> {
        match key {
            "a" | "A" | "ArrowLeft" => Some(Command::MoveLeft),
            "d" | "D" | "ArrowRight" => Some(Command::MoveRight),
            " " | "ArrowUp" => Some(Command::Jump),
            "r" | "R" => Some(Command::Reset),
            "Enter" => Some(Command::Restart),
            _ => None,
        }
    }
}

impl Session {
    /// Apply one command immediately. Commands that need a player body are
    /// safe no-ops until the player's assets resolve.
    pub fn apply_command(
        &mut self,
        command: Command,
        bridge: &mut dyn RenderBridge,
        assets: &mut dyn AssetSource,
        score_display: &mut dyn ScoreDisplay,
    ) {
        if command == Command::Restart {
            self.restart(bridge, assets, score_display);
            return;
        }
        let Some(player) = self.player else {
            return;
        };
        let step = self.config.player.move_step;
        let jump_height = self.config.player.jump_height;
        let spawn = self.config.player.spawn;
        let Some(body) = self.world.body_mut(player.body) else {
            return;
        };
        match command {
            Command::MoveLeft => body.position.x -= step,
            Command::MoveRight => body.position.x += step,
            // Absolute, not additive: re-jumps before landing do not stack
            Command::Jump => body.position.y = jump_height,
            // Back to the spawn point; velocity is left alone
            Command::Reset => body.position = spawn,
            Command::Restart => {}
        }
    }
}
