//! Axis-aligned collision tests and response rules
//!
//! Every hit test is a bounding-box overlap. Functions take the entities
//! involved explicitly and mutate them in place; nothing here reaches back
//! into the orchestrator.

use crate::consts::*;

use super::state::{Ball, Brick, Laser, Paddle, Powerup, Shield};

/// Overlap test between two boxes given as (left, top, width, height)
#[inline]
pub fn aabb_overlap(a: (f32, f32, f32, f32), b: (f32, f32, f32, f32)) -> bool {
    a.0 + a.2 >= b.0 && a.0 <= b.0 + b.2 && a.1 + a.3 >= b.1 && a.1 <= b.1 + b.3
}

/// Outcome of the wall check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WallContact {
    None,
    Bounced,
    /// Top edge passed below the playfield bottom; no bounce
    Lost,
}

/// Reflect off the side and top walls, clamping the ball back inside.
/// Reports `Lost` once the ball exits below the playfield.
pub fn ball_walls(ball: &mut Ball, width: f32, height: f32) -> WallContact {
    let mut bounced = false;

    if ball.pos.x - ball.radius <= 0.0 || ball.pos.x + ball.radius >= width {
        ball.vel.x = -ball.vel.x;
        ball.pos.x = ball.pos.x.clamp(ball.radius, width - ball.radius);
        bounced = true;
    }

    if ball.pos.y - ball.radius <= 0.0 {
        ball.vel.y = -ball.vel.y;
        ball.pos.y = ball.radius;
        bounced = true;
    }

    if ball.pos.y - ball.radius > height {
        return WallContact::Lost;
    }

    if bounced {
        WallContact::Bounced
    } else {
        WallContact::None
    }
}

/// Outcome of the paddle check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaddleContact {
    None,
    Bounced,
    /// Sticky paddle caught the ball
    Stuck,
}

/// Bounce off the paddle, angling by strike offset, or attach when sticky.
///
/// The bounce always sends the ball upward and floors its speed at
/// `BALL_MIN_SPEED` so a near-horizontal strike can't leave it crawling.
pub fn ball_paddle(ball: &mut Ball, paddle: &Paddle, sticky: bool) -> PaddleContact {
    if ball.attached {
        return PaddleContact::None;
    }
    if !aabb_overlap(ball.rect(), paddle.rect()) {
        return PaddleContact::None;
    }

    if sticky {
        let half = paddle.width / 2.0;
        let offset = (ball.pos.x - paddle.center_x()).clamp(-half, half);
        ball.attach(offset);
        ball.follow_paddle(paddle);
        return PaddleContact::Stuck;
    }

    let hit_pos = (ball.pos.x - paddle.center_x()) / (paddle.width / 2.0);
    ball.vel.y = -ball.vel.y.abs();
    ball.vel.x = hit_pos * 3.0;

    let speed = ball.vel.length();
    if speed < BALL_MIN_SPEED {
        ball.vel = ball.vel.normalize_or_zero() * BALL_MIN_SPEED;
    }

    // Sit just above the paddle so the ball can't sink in
    ball.pos.y = paddle.pos.y - ball.radius;
    PaddleContact::Bounced
}

/// Scan bricks in grid order; the first intact overlap consumes the
/// collision and reflects off the axis with the larger center-offset ratio.
/// Fireballs never reflect and keep scanning, so one pass can start several
/// destructions. Returns the indices of bricks hit this call.
pub fn ball_bricks(ball: &mut Ball, bricks: &mut [Brick]) -> Vec<usize> {
    let mut hits = Vec::new();
    for (idx, brick) in bricks.iter_mut().enumerate() {
        if !brick.is_intact() {
            continue;
        }
        if !aabb_overlap(ball.rect(), brick.rect()) {
            continue;
        }

        brick.start_destruction();
        hits.push(idx);

        if ball.fireball {
            continue;
        }

        let d = ball.pos - brick.center();
        if (d.x / brick.width).abs() > (d.y / brick.height).abs() {
            ball.vel.x = -ball.vel.x;
        } else {
            ball.vel.y = -ball.vel.y;
        }
        break;
    }
    hits
}

/// Always reflects upward off the shield and spends one hit.
pub fn ball_shield(ball: &mut Ball, shield: &mut Shield) -> bool {
    if !shield.active() {
        return false;
    }
    if !aabb_overlap(ball.rect(), shield.rect()) {
        return false;
    }
    ball.vel.y = -ball.vel.y.abs();
    ball.pos.y = shield.pos.y - ball.radius;
    shield.register_hit();
    true
}

/// Vertical-segment vs box test against the brick grid. On hit the laser
/// deactivates and the brick starts its destruction (same one-shot rule as
/// ball hits); the ball's trajectory is never touched.
pub fn laser_bricks(laser: &mut Laser, bricks: &mut [Brick]) -> Option<usize> {
    let x = laser.pos.x + LASER_WIDTH / 2.0;
    let top = laser.pos.y;
    let bottom = laser.pos.y + LASER_HEIGHT;

    for (idx, brick) in bricks.iter_mut().enumerate() {
        if !brick.is_intact() {
            continue;
        }
        let (bx, by, bw, bh) = brick.rect();
        if x >= bx && x <= bx + bw && bottom >= by && top <= by + bh {
            laser.active = false;
            brick.start_destruction();
            return Some(idx);
        }
    }
    None
}

/// Catch check; marks the powerup collected (terminal) on overlap.
pub fn powerup_paddle(powerup: &mut Powerup, paddle: &Paddle) -> bool {
    if powerup.collected {
        return false;
    }
    if aabb_overlap(powerup.rect(), paddle.rect()) {
        powerup.collected = true;
        return true;
    }
    false
}
