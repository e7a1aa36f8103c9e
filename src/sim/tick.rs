//! Per-tick orchestration
//!
//! One fixed step: difficulty read, obstacle advance, physics step, contact
//! routing, death housekeeping, transform push. The binary drives `tick`
//! through `run_frame`, a wall-clock accumulator with a substep cap.

use crate::bridge::{GameOverDisplay, RenderBridge, ScoreDisplay};

use super::session::{GamePhase, Session};

/// Advance the session by one fixed timestep
pub fn tick(
    session: &mut Session,
    bridge: &mut dyn RenderBridge,
    score_display: &mut dyn ScoreDisplay,
    game_over_display: &mut dyn GameOverDisplay,
) {
    let dt = session.config.timestep;
    // One consistent read per tick; the clock thread may bump it between ticks
    let difficulty = session.clock.factor();

    // Obstacle advancement stops at game over; the pools are torn down and
    // only the player's ejection keeps simulating
    if session.phase == GamePhase::Playing {
        let threshold_z = session.config.viewpoint_z;
        session
            .powerups
            .advance(&mut session.world, bridge, &mut session.rng, difficulty, threshold_z);
        session
            .enemies
            .advance(&mut session.world, bridge, &mut session.rng, difficulty, threshold_z);
    }

    let contacts = session.world.step(dt);
    for contact in contacts {
        session.on_contact(contact, bridge, score_display, game_over_display);
    }

    session.despawn_player_if_gone(bridge);

    if let Some(player) = session.player {
        if let Some(body) = session.world.body(player.body) {
            bridge.sync_transform(player.visual, body.position, body.orientation);
        }
    }
}

/// Run as many fixed ticks as `frame_dt` wall time covers, capped at
/// [`MAX_SUBSTEPS`](crate::consts::MAX_SUBSTEPS) per frame. Leftover time
/// stays in `accumulator` for the next frame.
pub fn run_frame(
    session: &mut Session,
    accumulator: &mut f32,
    frame_dt: f32,
    bridge: &mut dyn RenderBridge,
    score_display: &mut dyn ScoreDisplay,
    game_over_display: &mut dyn GameOverDisplay,
) {
    let dt = session.config.timestep;
    *accumulator += frame_dt.min(0.1);
    let mut substeps = 0;
    while *accumulator >= dt && substeps < crate::consts::MAX_SUBSTEPS {
        tick(session, bridge, score_display, game_over_display);
        *accumulator -= dt;
        substeps += 1;
    }
}
