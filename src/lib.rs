//! Brickfall - simulation core for a brick-breaker arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, game state)
//! - `tuning`: Data-driven game balance
//!
//! Rendering, audio, and input plumbing are host concerns: the host feeds
//! paddle intents and elapsed time in, and maps the returned [`sim::GameEvent`]s
//! to sounds and visual effects.

pub mod sim;
pub mod tuning;

pub use sim::{GameEvent, GameOutcome, GamePhase, GameState, PaddleDir, TickResult};
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Play area dimensions (pixels)
    pub const CANVAS_WIDTH: f32 = 800.0;
    pub const CANVAS_HEIGHT: f32 = 600.0;

    /// Paddle defaults
    pub const PADDLE_WIDTH: f32 = 100.0;
    pub const PADDLE_HEIGHT: f32 = 15.0;
    /// Gap between paddle top and the bottom of the canvas
    pub const PADDLE_BOTTOM_MARGIN: f32 = 20.0;
    /// Horizontal paddle speed, pixels per tick
    pub const PADDLE_SPEED: f32 = 2.0;
    /// Widening per ExpandPaddle pickup (pixels)
    pub const PADDLE_EXPAND_STEP: f32 = 30.0;
    /// Hard cap on paddle width as a multiple of the original
    pub const PADDLE_EXPAND_CAP: f32 = 1.5;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 8.0;
    /// Launch speed per axis, pixels per tick
    pub const BALL_LAUNCH_SPEED: f32 = 4.0;

    /// Brick grid geometry
    pub const BRICK_WIDTH: f32 = 75.0;
    pub const BRICK_HEIGHT: f32 = 20.0;
    pub const BRICK_PADDING: f32 = 10.0;
    pub const BRICK_OFFSET_TOP: f32 = 30.0;
    pub const BRICK_OFFSET_LEFT: f32 = 35.0;
    pub const GRID_COLS: u32 = 8;

    /// Score awarded per brick hit
    pub const BRICK_HIT_SCORE: u64 = 10;

    /// Level range accepted by the state machine
    pub const MIN_LEVEL: u32 = 1;
    pub const MAX_LEVEL: u32 = 10;

    /// Lives at level start, also the ExtraLife cap
    pub const MAX_LIVES: u8 = 3;
}
