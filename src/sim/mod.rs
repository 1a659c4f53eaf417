//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only
//! - Stable iteration order (layout order for bricks, insertion order for balls)
//! - Caller-supplied elapsed time, no wall clock reads
//! - No rendering or platform dependencies

pub mod collision;
pub mod grid;
pub mod powerup;
pub mod state;
pub mod tick;

pub use state::{
    Ball, BallState, Brick, GameEvent, GameOutcome, GamePhase, GameState, InvalidLevel, Paddle,
    PaddleDir, PowerUp, PowerUpKind,
};
pub use tick::{TickResult, tick};
