//! Per-tick orchestration and win/lose/progression logic
//!
//! The host drives one [`tick`] per display refresh with the elapsed wall
//! time. A tick runs to completion; outside a playing phase it fully no-ops,
//! so hosts may call it defensively every frame.

use super::{collision, grid, powerup};
use super::state::{GameEvent, GameOutcome, GamePhase, GameState};
use crate::consts::*;

/// Snapshot of one tick's results for the presentation layer
#[derive(Debug, Clone)]
pub struct TickResult {
    /// Everything that happened this tick, in resolution order
    pub events: Vec<GameEvent>,
    pub score: u64,
    pub lives: u8,
    pub elapsed_ms: f32,
    /// Set when the run has ended (this tick or earlier)
    pub outcome: Option<GameOutcome>,
}

/// Advance the simulation by `dt_ms` milliseconds of wall time.
///
/// Timers (power-up expiry, infinite spawns, elapsed time) scale with
/// `dt_ms`; entity motion advances by fixed per-tick amounts, tying speeds
/// to the nominal refresh step like the original game.
pub fn tick(state: &mut GameState, dt_ms: f32) -> TickResult {
    let mut events = Vec::new();

    if !matches!(state.phase, GamePhase::Playing | GamePhase::InfinitePlaying) {
        return result(state, events);
    }

    state.elapsed_ms += dt_ms;

    // Physics: paddle first, then balls against walls/paddle/floor
    collision::advance_paddle(
        &mut state.paddle,
        state.paddle_intent,
        &mut state.balls,
        state.tuning.paddle_speed,
    );
    collision::advance_balls(&mut state.balls, &state.paddle, &mut events);
    if events.contains(&GameEvent::AllBallsLost) {
        state.lives = state.lives.saturating_sub(1);
        state.spawn_ball_attached();
    }

    // Brick impacts, then deferred drop rolls for the bricks that broke
    let destroyed = collision::handle_brick_collisions(
        &mut state.balls,
        &mut state.bricks,
        &mut state.score,
        &mut events,
    );
    for at in destroyed {
        if let Some(power_up) = powerup::roll_drop(at, &state.tuning, &mut state.rng) {
            state.power_ups.push(power_up);
        }
    }

    // Power-up lifecycle and the paddle-expand countdown
    powerup::advance_power_ups(state, &mut events);
    powerup::update_paddle_expand(state, dt_ms);

    // Win only exists in leveled mode; lose always applies
    if state.phase == GamePhase::Playing && state.all_bricks_destroyed() {
        state.phase = GamePhase::Win;
        log::info!(
            "Level {} cleared, score {}, {:.0} ms",
            state.level,
            state.score,
            state.elapsed_ms
        );
    } else if state.lives == 0 {
        state.phase = GamePhase::Lose;
        log::info!("Game over, score {}, {:.0} ms", state.score, state.elapsed_ms);
    }

    if state.phase == GamePhase::InfinitePlaying {
        update_infinite(state, dt_ms);
    }

    result(state, events)
}

/// Infinite-mode spawner and brick drift
fn update_infinite(state: &mut GameState, dt_ms: f32) {
    state.infinite_spawn_ms += dt_ms;
    if state.infinite_spawn_ms > state.tuning.infinite_spawn_interval_ms {
        // The accumulator resets even when the cap blocks the spawn
        if state.brick_count() < state.tuning.infinite_brick_cap {
            let row = grid::spawn_infinite_row(&state.tuning, &mut state.rng);
            state.bricks.push(row);
        }
        state.infinite_spawn_ms = 0.0;
    }

    let fall = state.tuning.infinite_fall_speed;
    for brick in state.bricks.iter_mut().flatten() {
        brick.pos.y += fall;
        if brick.pos.y > CANVAS_HEIGHT {
            brick.hp = 0;
        }
    }
    // Cleanup pass: drop rows with no surviving brick
    state.bricks.retain(|row| row.iter().any(|b| b.hp > 0));
}

fn result(state: &GameState, events: Vec<GameEvent>) -> TickResult {
    let outcome = match state.phase {
        GamePhase::Win => Some(GameOutcome::Win),
        GamePhase::Lose => Some(GameOutcome::Lose),
        _ => None,
    };
    TickResult {
        events,
        score: state.score,
        lives: state.lives,
        elapsed_ms: state.elapsed_ms,
        outcome,
    }
}
