//! Brick grid construction
//!
//! Builds the per-level rectangular layout and seeds infinite-mode rows.
//! Hit-point assignment draws from the injected RNG so a seeded run
//! reproduces its grid exactly.

use glam::Vec2;
use rand::Rng;

use super::state::Brick;
use crate::consts::*;
use crate::tuning::Tuning;

/// Rows in the leveled grid: 4 early on, growing past level 3
pub fn row_count(level: u32) -> u32 {
    if level <= 3 { 4 } else { 5 + (level - 3) }
}

/// Build the full grid for a level, `row_count x GRID_COLS`, layout order
pub fn build_level_grid(level: u32, rng: &mut impl Rng) -> Vec<Vec<Brick>> {
    (0..row_count(level))
        .map(|r| {
            (0..GRID_COLS)
                .map(|c| {
                    let x = c as f32 * (BRICK_WIDTH + BRICK_PADDING) + BRICK_OFFSET_LEFT;
                    let y = r as f32 * (BRICK_HEIGHT + BRICK_PADDING) + BRICK_OFFSET_TOP;
                    Brick {
                        pos: Vec2::new(x, y),
                        hp: brick_hp(level, rng),
                    }
                })
                .collect()
        })
        .collect()
}

/// Infinite mode starts with no bricks; the spawner streams them in
pub fn infinite_seed() -> Vec<Vec<Brick>> {
    Vec::new()
}

/// One single-brick row at a random x, entering from above the canvas
pub fn spawn_infinite_row(tuning: &Tuning, rng: &mut impl Rng) -> Vec<Brick> {
    let x = rng.random_range(0.0..CANVAS_WIDTH - BRICK_WIDTH);
    let hp = if rng.random_bool(tuning.infinite_two_hit_chance) {
        2
    } else {
        1
    };
    vec![Brick {
        pos: Vec2::new(x, -BRICK_HEIGHT),
        hp,
    }]
}

/// Hit points for one brick of a leveled grid:
/// level 1 is all two-hit bricks, level 4 rolls 1-in-6, level 5 and up
/// roll 1-in-7, levels 2-3 are plain
fn brick_hp(level: u32, rng: &mut impl Rng) -> u8 {
    match level {
        1 => 2,
        4 => {
            if rng.random_bool(1.0 / 6.0) {
                2
            } else {
                1
            }
        }
        l if l >= 5 => {
            if rng.random_bool(1.0 / 7.0) {
                2
            } else {
                1
            }
        }
        _ => 1,
    }
}
