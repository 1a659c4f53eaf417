//! Game state and core simulation types
//!
//! All state that must be persisted for Continue/determinism lives here.

use std::fmt;

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::grid;
use crate::consts::*;
use crate::tuning::Tuning;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title menu, nothing simulated
    Menu,
    /// Level picker
    LevelSelect,
    /// Active leveled gameplay
    Playing,
    /// Survival mode: no win condition, bricks stream in
    InfinitePlaying,
    /// Level cleared
    Win,
    /// Ran out of lives
    Lose,
}

/// Terminal result of a run, reported from [`super::tick`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameOutcome {
    Win,
    Lose,
}

/// Paddle movement intent supplied by the host's input layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PaddleDir {
    Left,
    Right,
    #[default]
    None,
}

/// Events emitted by one tick, mapped to sound/visual effects by the host
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    WallHit,
    PaddleHit,
    /// A brick was struck (emitted for every contact, breaking or not)
    BrickHit,
    /// A brick's hp reached zero; carries the brick center for drop rolls
    BrickDestroyed { at: Vec2 },
    BallLost,
    /// The last active ball left the play area
    AllBallsLost,
    PowerUpCaught(PowerUpKind),
    PowerUpMissed,
}

/// Ball state - attached to paddle or free-moving
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BallState {
    /// Riding the paddle center with zero velocity, awaiting launch
    Attached,
    /// Free-moving
    Free,
}

/// A ball entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub state: BallState,
}

impl Ball {
    /// New ball resting on the paddle
    pub fn attached_to(paddle: &Paddle) -> Self {
        let mut ball = Self {
            pos: Vec2::ZERO,
            vel: Vec2::ZERO,
            radius: BALL_RADIUS,
            state: BallState::Attached,
        };
        ball.update_attached(paddle);
        ball
    }

    /// Re-center an attached ball over the paddle (called every tick)
    pub fn update_attached(&mut self, paddle: &Paddle) {
        if self.state == BallState::Attached {
            self.pos = Vec2::new(paddle.center_x(), paddle.y - self.radius);
        }
    }
}

/// The player's paddle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paddle {
    /// Left edge
    pub x: f32,
    /// Top edge (fixed)
    pub y: f32,
    /// Current width, `[original_width, 1.5 * original_width]`
    pub width: f32,
    pub height: f32,
    /// Width to restore when the expand effect ends
    pub original_width: f32,
}

impl Default for Paddle {
    fn default() -> Self {
        Self {
            x: CANVAS_WIDTH / 2.0 - PADDLE_WIDTH / 2.0,
            y: CANVAS_HEIGHT - PADDLE_BOTTOM_MARGIN,
            width: PADDLE_WIDTH,
            height: PADDLE_HEIGHT,
            original_width: PADDLE_WIDTH,
        }
    }
}

impl Paddle {
    pub fn center_x(&self) -> f32 {
        self.x + self.width / 2.0
    }

    /// Strict center-x span test used for ball and power-up catches.
    /// Deliberately ignores the ball's radius; edge grazes under-detect.
    pub fn span_contains(&self, x: f32) -> bool {
        x > self.x && x < self.x + self.width
    }
}

/// A brick. Zero hp marks a tombstone: kept in the grid (leveled mode scans
/// all bricks for the win check) until a cleanup pass drops its row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Brick {
    /// Top-left corner
    pub pos: Vec2,
    pub hp: u8,
}

/// Power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PowerUpKind {
    ExpandPaddle,
    ExtraBall,
    ExtraLife,
}

/// A falling pickup entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PowerUp {
    pub pos: Vec2,
    pub kind: PowerUpKind,
    /// Cleared on catch or miss; inactive entries are purged post-iteration
    pub active: bool,
}

/// A level outside the accepted range was requested; prior state is untouched
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidLevel(pub u32);

impl fmt::Display for InvalidLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "level {} outside {}..={}", self.0, MIN_LEVEL, MAX_LEVEL)
    }
}

impl std::error::Error for InvalidLevel {}

/// Complete game state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Seeded RNG; the only randomness source in the simulation
    pub rng: Pcg32,
    /// Balance parameters
    pub tuning: Tuning,
    /// Current phase
    pub phase: GamePhase,
    /// Current level (1..=10), meaningful outside infinite mode
    pub level: u32,
    /// Which mode the current/last run used (for restart)
    pub infinite_mode: bool,
    pub lives: u8,
    pub score: u64,
    /// Accumulated play time, milliseconds; frozen on Win/Lose
    pub elapsed_ms: f32,
    pub paddle: Paddle,
    /// Host-supplied movement intent, applied each tick
    pub paddle_intent: PaddleDir,
    /// Remaining ExpandPaddle time, milliseconds; 0 when inactive
    pub paddle_expand_ms: f32,
    pub balls: Vec<Ball>,
    /// Rows of bricks in layout order
    pub bricks: Vec<Vec<Brick>>,
    pub power_ups: Vec<PowerUp>,
    /// Infinite-mode spawn accumulator, milliseconds
    pub infinite_spawn_ms: f32,
}

impl GameState {
    /// Create a new game state at the menu with the given seed
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(seed, Tuning::default())
    }

    pub fn with_tuning(seed: u64, tuning: Tuning) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            tuning,
            phase: GamePhase::Menu,
            level: MIN_LEVEL,
            infinite_mode: false,
            lives: MAX_LIVES,
            score: 0,
            elapsed_ms: 0.0,
            paddle: Paddle::default(),
            paddle_intent: PaddleDir::None,
            paddle_expand_ms: 0.0,
            balls: Vec::new(),
            bricks: Vec::new(),
            power_ups: Vec::new(),
            infinite_spawn_ms: 0.0,
        }
    }

    /// Start a leveled run. Out-of-range levels are rejected with no state change.
    pub fn start_level(&mut self, level: u32) -> Result<(), InvalidLevel> {
        if !(MIN_LEVEL..=MAX_LEVEL).contains(&level) {
            return Err(InvalidLevel(level));
        }
        self.level = level;
        self.infinite_mode = false;
        self.reset_round();
        self.bricks = grid::build_level_grid(level, &mut self.rng);
        self.phase = GamePhase::Playing;
        log::info!("Starting level {level}");
        Ok(())
    }

    /// Enter (or restart) infinite survival mode
    pub fn start_infinite_mode(&mut self) {
        self.infinite_mode = true;
        self.reset_round();
        self.bricks = grid::infinite_seed();
        self.phase = GamePhase::InfinitePlaying;
        log::info!("Starting infinite mode");
    }

    /// From the win screen, move on to the next level. Advancing past the
    /// last level is rejected like any other out-of-range request.
    pub fn advance_to_next_level(&mut self) -> Result<(), InvalidLevel> {
        if self.phase != GamePhase::Win {
            return Ok(());
        }
        self.start_level(self.level + 1)
    }

    /// From the lose screen, rebuild the same level or re-enter infinite mode
    pub fn restart_current_level(&mut self) {
        if self.phase != GamePhase::Lose {
            return;
        }
        if self.infinite_mode {
            self.start_infinite_mode();
        } else {
            // The stored level was validated when the run started
            let level = self.level;
            let _ = self.start_level(level);
        }
    }

    /// Back out to the level picker from any screen
    pub fn return_to_level_select(&mut self) {
        self.phase = GamePhase::LevelSelect;
    }

    pub fn set_paddle_intent(&mut self, dir: PaddleDir) {
        self.paddle_intent = dir;
    }

    /// Launch the attached ball. No-op when nothing is attached or the game
    /// is not in a playing phase, so hosts may call this defensively.
    pub fn launch_ball(&mut self) {
        if !matches!(self.phase, GamePhase::Playing | GamePhase::InfinitePlaying) {
            return;
        }
        let speed = self.tuning.ball_launch_speed;
        let dx_sign = if self.rng.random_bool(0.5) { 1.0 } else { -1.0 };
        for ball in &mut self.balls {
            if ball.state == BallState::Attached {
                ball.vel = Vec2::new(speed * dx_sign, -speed);
                ball.state = BallState::Free;
            }
        }
    }

    /// Reset the ball set to a single attached ball (life loss, round start)
    pub fn spawn_ball_attached(&mut self) {
        self.balls.clear();
        self.balls.push(Ball::attached_to(&self.paddle));
    }

    /// Total brick entries, tombstones included (infinite-mode spawn cap)
    pub fn brick_count(&self) -> usize {
        self.bricks.iter().map(Vec::len).sum()
    }

    /// Leveled-mode win condition: every brick in the grid is a tombstone
    pub fn all_bricks_destroyed(&self) -> bool {
        self.bricks.iter().flatten().all(|b| b.hp == 0)
    }

    /// Per-run state shared by every level/mode entry
    fn reset_round(&mut self) {
        self.lives = MAX_LIVES;
        self.score = 0;
        self.elapsed_ms = 0.0;
        self.paddle.width = self.paddle.original_width;
        self.paddle_expand_ms = 0.0;
        self.paddle_intent = PaddleDir::None;
        self.power_ups.clear();
        self.infinite_spawn_ms = 0.0;
        self.spawn_ball_attached();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_level_builds_grid_and_resets() {
        let mut state = GameState::new(7);
        state.score = 999;
        state.lives = 1;

        state.start_level(1).unwrap();
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.bricks.len(), 4);
        assert!(state.bricks.iter().all(|row| row.len() == 8));
        assert_eq!(state.score, 0);
        assert_eq!(state.lives, MAX_LIVES);
        assert_eq!(state.balls.len(), 1);
        assert_eq!(state.balls[0].state, BallState::Attached);
    }

    #[test]
    fn test_start_level_out_of_range_rejected() {
        let mut state = GameState::new(7);
        state.start_level(3).unwrap();
        state.score = 40;
        let bricks_before = state.brick_count();

        assert_eq!(state.start_level(11), Err(InvalidLevel(11)));
        assert_eq!(state.start_level(0), Err(InvalidLevel(0)));

        // Prior state untouched: no reset, no grid rebuild
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.level, 3);
        assert_eq!(state.score, 40);
        assert_eq!(state.brick_count(), bricks_before);
    }

    #[test]
    fn test_launch_ball_only_when_attached() {
        let mut state = GameState::new(7);

        // Not playing yet: defensive no-op
        state.launch_ball();
        assert!(state.balls.is_empty());

        state.start_level(1).unwrap();
        state.launch_ball();
        let ball = &state.balls[0];
        assert_eq!(ball.state, BallState::Free);
        assert_eq!(ball.vel.y, -BALL_LAUNCH_SPEED);
        assert_eq!(ball.vel.x.abs(), BALL_LAUNCH_SPEED);

        // Launching again changes nothing
        let vel = state.balls[0].vel;
        state.launch_ball();
        assert_eq!(state.balls[0].vel, vel);
    }

    #[test]
    fn test_advance_past_last_level_rejected() {
        let mut state = GameState::new(7);
        state.start_level(MAX_LEVEL).unwrap();
        state.phase = GamePhase::Win;
        assert_eq!(state.advance_to_next_level(), Err(InvalidLevel(MAX_LEVEL + 1)));
        assert_eq!(state.phase, GamePhase::Win);
    }

    #[test]
    fn test_restart_after_lose_rebuilds_same_mode() {
        let mut state = GameState::new(7);
        state.start_level(2).unwrap();
        state.phase = GamePhase::Lose;
        state.restart_current_level();
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.level, 2);

        state.start_infinite_mode();
        state.phase = GamePhase::Lose;
        state.restart_current_level();
        assert_eq!(state.phase, GamePhase::InfinitePlaying);
        assert!(state.bricks.is_empty());
    }
}
