//! Power-up lifecycle: drop rolls, falling pickups, and effect application
//!
//! Pickups fall straight down, are applied when they enter the paddle span,
//! and vanish unapplied below the canvas. Deactivation and purging are two
//! separate steps so the collection is never mutated while being iterated.

use glam::Vec2;
use rand::Rng;

use super::state::{Ball, BallState, GameEvent, GameState, PowerUp, PowerUpKind};
use crate::consts::*;
use crate::tuning::Tuning;

/// Roll a power-up drop for a destroyed brick. Spawns at the brick center
/// with a uniform pick among the three kinds.
pub fn roll_drop(at: Vec2, tuning: &Tuning, rng: &mut impl Rng) -> Option<PowerUp> {
    if !rng.random_bool(tuning.power_up_drop_chance) {
        return None;
    }
    let kind = match rng.random_range(0..3) {
        0 => PowerUpKind::ExpandPaddle,
        1 => PowerUpKind::ExtraBall,
        _ => PowerUpKind::ExtraLife,
    };
    Some(PowerUp {
        pos: at,
        kind,
        active: true,
    })
}

/// Advance all pickups one tick: fall, catch, or miss. Caught effects are
/// applied after the purge pass.
pub fn advance_power_ups(state: &mut GameState, events: &mut Vec<GameEvent>) {
    let fall = state.tuning.power_up_fall_speed;
    let mut caught: Vec<PowerUpKind> = Vec::new();

    for power_up in state.power_ups.iter_mut() {
        power_up.pos.y += fall;
        if power_up.pos.y > state.paddle.y && state.paddle.span_contains(power_up.pos.x) {
            caught.push(power_up.kind);
            power_up.active = false;
            events.push(GameEvent::PowerUpCaught(power_up.kind));
        } else if power_up.pos.y > CANVAS_HEIGHT {
            power_up.active = false;
            events.push(GameEvent::PowerUpMissed);
        }
    }
    state.power_ups.retain(|p| p.active);

    for kind in caught {
        apply(state, kind);
    }
}

/// Apply one caught power-up effect
pub fn apply(state: &mut GameState, kind: PowerUpKind) {
    log::debug!("Applying power-up {kind:?}");
    match kind {
        PowerUpKind::ExpandPaddle => {
            let cap = state.paddle.original_width * PADDLE_EXPAND_CAP;
            // Ignored entirely once the cap is reached; otherwise widen,
            // clamp, and refresh the countdown to its full duration
            if state.paddle.width < cap {
                state.paddle.width = (state.paddle.width + PADDLE_EXPAND_STEP).min(cap);
                state.paddle_expand_ms = state.tuning.paddle_expand_ms;
            }
        }
        PowerUpKind::ExtraBall => {
            // Clone the first ball with its velocity negated
            if let Some(first) = state.balls.first().cloned() {
                state.balls.push(Ball {
                    pos: first.pos,
                    vel: -first.vel,
                    radius: first.radius,
                    state: BallState::Free,
                });
            }
        }
        PowerUpKind::ExtraLife => {
            if state.lives < MAX_LIVES {
                state.lives += 1;
            }
        }
    }
}

/// Count down the paddle-expand effect by the caller-supplied delta; on
/// expiry the width snaps back to the stored original, regardless of how
/// many pickups were caught in between.
pub fn update_paddle_expand(state: &mut GameState, dt_ms: f32) {
    if state.paddle_expand_ms > 0.0 {
        state.paddle_expand_ms -= dt_ms;
        if state.paddle_expand_ms <= 0.0 {
            state.paddle_expand_ms = 0.0;
            state.paddle.width = state.paddle.original_width;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn playing_state() -> GameState {
        let mut state = GameState::new(11);
        state.start_level(2).unwrap();
        state
    }

    #[test]
    fn test_expand_caps_at_one_and_a_half_times_original() {
        let mut state = playing_state();
        assert_eq!(state.paddle.width, 100.0);

        apply(&mut state, PowerUpKind::ExpandPaddle);
        assert_eq!(state.paddle.width, 130.0);

        apply(&mut state, PowerUpKind::ExpandPaddle);
        assert_eq!(state.paddle.width, 150.0);

        // At the cap the pickup has no effect
        apply(&mut state, PowerUpKind::ExpandPaddle);
        assert_eq!(state.paddle.width, 150.0);
    }

    #[test]
    fn test_expand_timer_restores_original_width() {
        let mut state = playing_state();
        apply(&mut state, PowerUpKind::ExpandPaddle);
        apply(&mut state, PowerUpKind::ExpandPaddle);
        assert_eq!(state.paddle.width, 150.0);

        // 10s-equivalent in uneven steps
        update_paddle_expand(&mut state, 9_999.0);
        assert_eq!(state.paddle.width, 150.0);
        update_paddle_expand(&mut state, 2.0);
        assert_eq!(state.paddle.width, 100.0);
        assert_eq!(state.paddle_expand_ms, 0.0);
    }

    #[test]
    fn test_second_pickup_mid_countdown_refreshes_timer() {
        let mut state = playing_state();
        apply(&mut state, PowerUpKind::ExpandPaddle);
        assert_eq!(state.paddle.width, 130.0);

        // Halfway through the countdown, a second pickup below the cap
        // restarts the timer in full rather than stacking
        update_paddle_expand(&mut state, 5_000.0);
        apply(&mut state, PowerUpKind::ExpandPaddle);
        assert_eq!(state.paddle.width, 150.0);
        assert_eq!(state.paddle_expand_ms, state.tuning.paddle_expand_ms);

        // The first pickup's remainder would have expired long before this
        update_paddle_expand(&mut state, 9_999.0);
        assert_eq!(state.paddle.width, 150.0);
        update_paddle_expand(&mut state, 2.0);
        assert_eq!(state.paddle.width, 100.0);
    }

    #[test]
    fn test_extra_ball_negates_reference_velocity() {
        let mut state = playing_state();
        state.launch_ball();
        let vel = state.balls[0].vel;

        apply(&mut state, PowerUpKind::ExtraBall);
        assert_eq!(state.balls.len(), 2);
        assert_eq!(state.balls[1].vel, -vel);
        assert_eq!(state.balls[1].pos, state.balls[0].pos);
        assert_eq!(state.balls[1].state, BallState::Free);
    }

    #[test]
    fn test_extra_life_capped_at_three() {
        let mut state = playing_state();
        apply(&mut state, PowerUpKind::ExtraLife);
        assert_eq!(state.lives, 3);

        state.lives = 1;
        apply(&mut state, PowerUpKind::ExtraLife);
        assert_eq!(state.lives, 2);
    }

    #[test]
    fn test_caught_power_up_is_applied_and_purged() {
        let mut state = playing_state();
        state.lives = 1;
        let x = state.paddle.center_x();
        state.power_ups.push(PowerUp {
            pos: Vec2::new(x, state.paddle.y - 1.0),
            kind: PowerUpKind::ExtraLife,
            active: true,
        });

        let mut events = Vec::new();
        advance_power_ups(&mut state, &mut events);
        assert!(state.power_ups.is_empty());
        assert_eq!(state.lives, 2);
        assert_eq!(
            events,
            vec![GameEvent::PowerUpCaught(PowerUpKind::ExtraLife)]
        );
    }

    #[test]
    fn test_missed_power_up_expires_unapplied() {
        let mut state = playing_state();
        state.lives = 1;
        state.power_ups.push(PowerUp {
            pos: Vec2::new(10.0, CANVAS_HEIGHT + 1.0),
            kind: PowerUpKind::ExtraLife,
            active: true,
        });

        let mut events = Vec::new();
        advance_power_ups(&mut state, &mut events);
        assert!(state.power_ups.is_empty());
        assert_eq!(state.lives, 1);
        assert_eq!(events, vec![GameEvent::PowerUpMissed]);
    }

    #[test]
    fn test_roll_drop_guaranteed_and_disabled() {
        use rand::SeedableRng;
        use rand_pcg::Pcg32;

        let mut rng = Pcg32::seed_from_u64(5);
        let mut tuning = Tuning::default();

        tuning.power_up_drop_chance = 1.0;
        let drop = roll_drop(Vec2::new(72.5, 40.0), &tuning, &mut rng);
        assert!(drop.is_some());
        assert_eq!(drop.as_ref().map(|p| p.pos), Some(Vec2::new(72.5, 40.0)));

        tuning.power_up_drop_chance = 0.0;
        assert!(roll_drop(Vec2::ZERO, &tuning, &mut rng).is_none());
    }
}
