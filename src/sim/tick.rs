//! Per-frame simulation step
//!
//! One `tick` per display refresh. Motion advances in the classic
//! pixels-per-tick units scaled by `dt * TICK_HZ`; effect clocks accumulate
//! the raw wall-clock `dt`. The per-tick order is fixed: launch, fire,
//! paddle, balls, lasers, shield, powerups, life bookkeeping, win check,
//! cosmetic lifecycles.

use rand::Rng;

use crate::consts::*;
use crate::ui::UiSync;

use super::collision::{self, PaddleContact, WallContact};
use super::effects::{self, PowerupKind};
use super::state::{GameState, Laser, Phase, Powerup, ScorePopup, spawn_burst};

/// Logical input keys, as delivered by the host's key-event collaborator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    ArrowLeft,
    ArrowRight,
    ArrowUp,
    Space,
}

/// Immutable input snapshot for one tick
#[derive(Debug, Clone, Copy, Default)]
pub struct InputState {
    pub left: bool,
    pub right: bool,
    pub launch: bool,
    pub fire: bool,
}

impl InputState {
    /// Reduce a held-key predicate to the tick snapshot
    pub fn from_held(held: impl Fn(Key) -> bool) -> Self {
        Self {
            left: held(Key::ArrowLeft),
            right: held(Key::ArrowRight),
            launch: held(Key::ArrowUp) || held(Key::Space),
            fire: held(Key::Space),
        }
    }
}

/// Advance the session by one frame of real time `dt` (seconds)
pub fn tick(state: &mut GameState, input: &InputState, dt: f32, ui: &mut dyn UiSync) {
    if state.phase != Phase::Playing {
        return;
    }
    let frames = dt * TICK_HZ;

    // 1. Launch attached balls with a small random angle perturbation
    if input.launch {
        for i in 0..state.balls.len() {
            if state.balls[i].attached {
                let jitter = state.rng.random_range(-LAUNCH_JITTER..=LAUNCH_JITTER);
                state.balls[i].launch(jitter);
            }
        }
    }

    // 2. Fire a laser from the paddle center, capped at MAX_LASERS live
    if input.fire
        && state.effects.laser.is_active()
        && state.lasers.iter().filter(|l| l.active).count() < MAX_LASERS
    {
        state
            .lasers
            .push(Laser::new(state.paddle.center_x(), state.paddle.pos.y));
    }

    // 3. Paddle, barrel decoration, paddle-owned particles
    state
        .paddle
        .update(input.left, input.right, frames, PLAYFIELD_WIDTH);
    state.paddle.advance_decorations(frames, dt);

    // 4. Balls. Attached balls only follow the paddle; free balls advance
    // and resolve wall, paddle, shield, brick contacts in that order.
    let sticky = state.effects.sticky.is_active();
    let mut brick_hits: Vec<usize> = Vec::new();
    let mut balls = std::mem::take(&mut state.balls);
    balls.retain_mut(|ball| {
        if ball.attached {
            ball.follow_paddle(&state.paddle);
            return true;
        }
        ball.advance(frames);
        if collision::ball_walls(ball, PLAYFIELD_WIDTH, PLAYFIELD_HEIGHT) == WallContact::Lost {
            return false;
        }
        // A sticky catch re-attaches the ball; attached balls skip the rest
        if collision::ball_paddle(ball, &state.paddle, sticky) == PaddleContact::Stuck {
            return true;
        }
        if let Some(shield) = &mut state.shield {
            collision::ball_shield(ball, shield);
        }
        brick_hits.extend(collision::ball_bricks(ball, &mut state.bricks));
        ball.record_trail();
        true
    });
    state.balls = balls;
    for idx in brick_hits {
        on_brick_destruction(state, idx);
    }

    // 5. Lasers
    let mut laser_hits: Vec<usize> = Vec::new();
    for laser in &mut state.lasers {
        if !laser.active {
            continue;
        }
        laser.advance(frames);
        if let Some(idx) = collision::laser_bricks(laser, &mut state.bricks) {
            laser_hits.push(idx);
        }
    }
    for idx in laser_hits {
        on_brick_destruction(state, idx);
    }
    state.lasers.retain(|l| l.active && !l.off_screen());

    // 6. Shield drops once its hit budget is spent
    if state.shield.as_ref().is_some_and(|s| !s.active()) {
        state.shield = None;
    }

    // 7. Powerups: fall, get caught, or leave the playfield
    let mut caught: Vec<PowerupKind> = Vec::new();
    state.powerups.retain_mut(|p| {
        p.advance(frames);
        if collision::powerup_paddle(p, &state.paddle) {
            caught.push(p.kind);
            return false;
        }
        p.pos.y <= PLAYFIELD_HEIGHT
    });
    for kind in caught {
        effects::apply_powerup(state, kind);
    }

    // Timed effect windows close on wall-clock time
    effects::advance_effects(state, dt);

    // 8. Life bookkeeping once the ball set is empty
    if state.balls.is_empty() {
        state.lives = state.lives.saturating_sub(1);
        if state.lives == 0 {
            state.phase = Phase::GameOver;
            log::info!("game over with score {}", state.score);
            ui.game_over(state.score);
        } else {
            effects::clear_effects(state);
            state.spawn_attached_ball();
        }
    }

    // 9. Win once every brick is destroyed
    if state.phase == Phase::Playing && state.bricks.iter().all(|b| b.destroyed) {
        state.phase = Phase::Won;
        log::info!("won with score {}", state.score);
        ui.won(state.score);
    }

    // 10. Cosmetic lifecycles
    for brick in &mut state.bricks {
        brick.advance(dt);
    }
    for p in &mut state.particles {
        p.advance(frames, dt);
    }
    state.particles.retain(|p| p.alive());
    state.popups.retain_mut(|p| {
        p.advance(frames, dt);
        p.alive()
    });

    ui.hud(state.score, state.lives);
}

/// Bookkeeping for a brick whose destruction just started: score, debris
/// burst, score popup, and an independent 25% roll for a powerup drop.
fn on_brick_destruction(state: &mut GameState, idx: usize) {
    let (center, below, color) = {
        let brick = &state.bricks[idx];
        let center = brick.center();
        let below = glam::Vec2::new(center.x, brick.pos.y + brick.height);
        (center, below, brick.color)
    };

    state.score += SCORE_PER_BRICK;
    spawn_burst(&mut state.particles, &mut state.rng, center, color, 12);
    state.popups.push(ScorePopup::new(center, SCORE_PER_BRICK));

    if state.rng.random_bool(POWERUP_DROP_CHANCE) {
        let kind = PowerupKind::random(&mut state.rng);
        state.powerups.push(Powerup::new(kind, below));
    }
}
