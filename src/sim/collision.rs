//! Physics and collision resolution
//!
//! Axis-aligned post-move overlap tests with velocity-sign flips; no swept
//! collision, no impulse resolution. The paddle test compares the ball's
//! center x against the paddle span, so edge grazes under-detect and fast
//! balls can tunnel. That is observable legacy behavior, kept as-is.

use crate::consts::*;

use super::state::{Ball, BallState, Brick, GameEvent, Paddle, PaddleDir};
use glam::Vec2;

/// Move the paddle by the host intent, clamp it to the canvas, and drag any
/// attached balls along.
pub fn advance_paddle(paddle: &mut Paddle, intent: PaddleDir, balls: &mut [Ball], speed: f32) {
    let dx = match intent {
        PaddleDir::Left => -speed,
        PaddleDir::Right => speed,
        PaddleDir::None => 0.0,
    };
    paddle.x = (paddle.x + dx).clamp(0.0, CANVAS_WIDTH - paddle.width);

    for ball in balls {
        ball.update_attached(paddle);
    }
}

/// Integrate free balls and resolve, in fixed order per ball: side walls,
/// top wall, paddle, bottom exit. Balls that left the play area are purged
/// in a separate pass after iteration; emptying the set emits
/// [`GameEvent::AllBallsLost`] (the caller handles life loss and respawn).
pub fn advance_balls(balls: &mut Vec<Ball>, paddle: &Paddle, events: &mut Vec<GameEvent>) {
    for ball in balls.iter_mut() {
        if ball.state != BallState::Free {
            continue;
        }
        ball.pos += ball.vel;

        // Side walls
        if ball.pos.x + ball.radius > CANVAS_WIDTH || ball.pos.x - ball.radius < 0.0 {
            ball.vel.x = -ball.vel.x;
            events.push(GameEvent::WallHit);
        }

        // Top wall
        if ball.pos.y - ball.radius < 0.0 {
            ball.vel.y = -ball.vel.y;
            events.push(GameEvent::WallHit);
        }

        // Paddle: center-x span test, then snap above the paddle top
        if ball.pos.y + ball.radius > paddle.y && paddle.span_contains(ball.pos.x) {
            ball.vel.y = -ball.vel.y;
            ball.pos.y = paddle.y - ball.radius;
            events.push(GameEvent::PaddleHit);
        }
    }

    // Purge balls below the play area (separate pass, never mid-iteration)
    let before = balls.len();
    balls.retain(|b| !(b.state == BallState::Free && b.pos.y - b.radius > CANVAS_HEIGHT));
    for _ in balls.len()..before {
        events.push(GameEvent::BallLost);
    }
    if before > balls.len() && balls.is_empty() {
        events.push(GameEvent::AllBallsLost);
    }
}

/// Resolve every (ball, live brick) overlap: flip vertical velocity,
/// decrement hp, award score. No early exit, so one ball can strike several
/// bricks in the same tick. Returns the centers of bricks destroyed this
/// tick for deferred power-up drop rolls.
pub fn handle_brick_collisions(
    balls: &mut [Ball],
    bricks: &mut [Vec<Brick>],
    score: &mut u64,
    events: &mut Vec<GameEvent>,
) -> Vec<Vec2> {
    let mut destroyed = Vec::new();

    for ball in balls.iter_mut() {
        for brick in bricks.iter_mut().flatten() {
            if brick.hp == 0 {
                continue;
            }
            let in_x = ball.pos.x > brick.pos.x && ball.pos.x < brick.pos.x + BRICK_WIDTH;
            let in_y = ball.pos.y - ball.radius < brick.pos.y + BRICK_HEIGHT
                && ball.pos.y + ball.radius > brick.pos.y;
            if in_x && in_y {
                ball.vel.y = -ball.vel.y;
                brick.hp -= 1;
                *score += BRICK_HIT_SCORE;
                events.push(GameEvent::BrickHit);
                if brick.hp == 0 {
                    let at = brick.pos + Vec2::new(BRICK_WIDTH / 2.0, BRICK_HEIGHT / 2.0);
                    events.push(GameEvent::BrickDestroyed { at });
                    destroyed.push(at);
                }
            }
        }
    }

    destroyed
}
