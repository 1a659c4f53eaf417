//! Data-driven game balance
//!
//! Everything timed or probabilistic reads its parameters from [`Tuning`]
//! instead of hard-coded literals, so a host can deserialize a tweaked
//! balance file without recompiling. Defaults reproduce the legacy feel.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Tunable simulation parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Horizontal paddle speed, pixels per tick
    pub paddle_speed: f32,
    /// Launch speed per axis, pixels per tick
    pub ball_launch_speed: f32,
    /// Power-up fall speed, pixels per tick
    pub power_up_fall_speed: f32,
    /// Probability that a destroyed brick drops a power-up
    pub power_up_drop_chance: f64,
    /// ExpandPaddle effect duration (milliseconds)
    pub paddle_expand_ms: f32,
    /// Infinite mode: milliseconds between spawn attempts
    pub infinite_spawn_interval_ms: f32,
    /// Infinite mode: bricks on screen before spawning stops
    pub infinite_brick_cap: usize,
    /// Infinite mode: downward brick drift, pixels per tick
    pub infinite_fall_speed: f32,
    /// Infinite mode: probability a spawned brick takes two hits
    pub infinite_two_hit_chance: f64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            paddle_speed: PADDLE_SPEED,
            ball_launch_speed: BALL_LAUNCH_SPEED,
            power_up_fall_speed: 2.0,
            power_up_drop_chance: 1.0 / 8.0,
            paddle_expand_ms: 10_000.0,
            infinite_spawn_interval_ms: 3_000.0,
            infinite_brick_cap: 20,
            infinite_fall_speed: 1.0,
            infinite_two_hit_chance: 0.2,
        }
    }
}
