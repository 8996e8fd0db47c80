//! Powerup effect engine
//!
//! Each timed effect owns a slot: a small state machine that activates,
//! accumulates wall-clock time, and expires. Reactivating a slot overwrites
//! it outright (the cancel-then-restart rule), so no stale clock is left to
//! fire after a reset or across a restart.

use glam::Vec2;
use rand::Rng;

use crate::consts::*;

use super::state::{Ball, GameState, LaserBarrel, Shield, spawn_burst};

/// The nine powerup kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PowerupKind {
    Enlarge,
    Sticky,
    Laser,
    SlowMotion,
    Shield,
    Fireball,
    MysteryBox,
    ExtraLife,
    MultiBall,
}

impl PowerupKind {
    pub const ALL: [PowerupKind; 9] = [
        PowerupKind::Enlarge,
        PowerupKind::Sticky,
        PowerupKind::Laser,
        PowerupKind::SlowMotion,
        PowerupKind::Shield,
        PowerupKind::Fireball,
        PowerupKind::MysteryBox,
        PowerupKind::ExtraLife,
        PowerupKind::MultiBall,
    ];

    /// Every kind except `MysteryBox`; the pool a mystery box resolves from
    const NON_MYSTERY: [PowerupKind; 8] = [
        PowerupKind::Enlarge,
        PowerupKind::Sticky,
        PowerupKind::Laser,
        PowerupKind::SlowMotion,
        PowerupKind::Shield,
        PowerupKind::Fireball,
        PowerupKind::ExtraLife,
        PowerupKind::MultiBall,
    ];

    /// Uniform draw over every kind (brick drops)
    pub fn random(rng: &mut impl Rng) -> Self {
        Self::ALL[rng.random_range(0..Self::ALL.len())]
    }

    /// Uniform draw over every kind except `MysteryBox`
    pub fn random_other(rng: &mut impl Rng) -> Self {
        Self::NON_MYSTERY[rng.random_range(0..Self::NON_MYSTERY.len())]
    }

    /// Pickup box size; paddle-shaped effects render wide
    pub fn size(self) -> (f32, f32) {
        match self {
            PowerupKind::Enlarge | PowerupKind::Sticky | PowerupKind::Laser => (28.0, 12.0),
            _ => (20.0, 20.0),
        }
    }

    /// Palette index for the pickup box
    pub fn palette_index(self) -> u32 {
        match self {
            PowerupKind::Enlarge => 1,
            PowerupKind::Sticky => 8,
            PowerupKind::Laser => 0,
            PowerupKind::SlowMotion => 2,
            PowerupKind::Shield => 3,
            PowerupKind::Fireball => 7,
            PowerupKind::MysteryBox => 6,
            PowerupKind::ExtraLife => 0,
            PowerupKind::MultiBall => 4,
        }
    }

    /// Symbol drawn on the pickup box
    pub fn symbol(self) -> &'static str {
        match self {
            PowerupKind::Enlarge => "W",
            PowerupKind::Sticky => "S",
            PowerupKind::Laser => "L",
            PowerupKind::SlowMotion => "~",
            PowerupKind::Shield => "O",
            PowerupKind::Fireball => "F",
            PowerupKind::MysteryBox => "?",
            PowerupKind::ExtraLife => "+",
            PowerupKind::MultiBall => "M",
        }
    }
}

/// A timed effect slot
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum Slot {
    #[default]
    Inactive,
    Active {
        elapsed: f32,
    },
}

impl Slot {
    pub fn is_active(self) -> bool {
        matches!(self, Slot::Active { .. })
    }

    pub fn elapsed(self) -> Option<f32> {
        match self {
            Slot::Active { elapsed } => Some(elapsed),
            Slot::Inactive => None,
        }
    }

    /// Cancel any running window and start a fresh one
    fn restart(&mut self) {
        *self = Slot::Active { elapsed: 0.0 };
    }

    /// Accumulate time; true exactly once, when the window closes
    fn advance(&mut self, dt: f32, duration: f32) -> bool {
        if let Slot::Active { elapsed } = self {
            *elapsed += dt;
            if *elapsed >= duration {
                *self = Slot::Inactive;
                return true;
            }
        }
        false
    }
}

/// Which glow drives the paddle color this tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GlowKind {
    Warning,
    Enlarged,
    Sticky,
}

/// Active effect slots. One live window per kind at any time.
#[derive(Debug, Clone, Default)]
pub struct Effects {
    pub enlarge: Slot,
    pub sticky: Slot,
    pub laser: Slot,
    pub slow: Slot,
    pub fireball: Slot,
    /// Sticky particle stream accumulator
    emit_accum: f32,
}

fn oscillate(t: f32, freq: f32) -> f32 {
    0.5 + 0.5 * (t * freq).sin()
}

impl Effects {
    /// Paddle glow, priority warning > enlarged > sticky > none. Intensity
    /// oscillates with the slot clock; the warning phase pulses faster.
    pub fn paddle_glow(&self) -> Option<(GlowKind, f32)> {
        if let Some(elapsed) = self.enlarge.elapsed() {
            if elapsed >= ENLARGE_WARNING_AT {
                return Some((GlowKind::Warning, oscillate(elapsed, 10.0)));
            }
            return Some((GlowKind::Enlarged, oscillate(elapsed, 4.0)));
        }
        if let Some(elapsed) = self.sticky.elapsed() {
            return Some((GlowKind::Sticky, oscillate(elapsed, 3.0)));
        }
        None
    }
}

/// Apply a caught powerup. Mystery boxes resolve to another kind first.
pub fn apply_powerup(state: &mut GameState, kind: PowerupKind) {
    log::debug!("powerup applied: {kind:?}");
    match kind {
        PowerupKind::Enlarge => {
            state.paddle.enlarge();
            state.effects.enlarge.restart();
        }
        PowerupKind::Sticky => {
            state.effects.sticky.restart();
            state.effects.emit_accum = 0.0;
        }
        PowerupKind::Laser => {
            // A fresh barrel replaces one mid-teardown
            state.paddle.barrel = Some(LaserBarrel::new(&state.paddle));
            state.effects.laser.restart();
        }
        PowerupKind::SlowMotion => {
            // Scale only on entry; a retrigger resets the clock, never the speed
            if !state.effects.slow.is_active() {
                for ball in state.balls.iter_mut().filter(|b| !b.attached) {
                    ball.vel *= 0.5;
                }
            }
            state.effects.slow.restart();
        }
        PowerupKind::Shield => {
            state.shield = Some(Shield::new(&state.paddle));
        }
        PowerupKind::Fireball => {
            for ball in &mut state.balls {
                ball.fireball = true;
            }
            state.effects.fireball.restart();
        }
        PowerupKind::MysteryBox => {
            let inner = PowerupKind::random_other(&mut state.rng);
            log::debug!("mystery box resolved to {inner:?}");
            let burst_at = Vec2::new(state.paddle.center_x(), state.paddle.pos.y);
            spawn_burst(
                &mut state.paddle.particles,
                &mut state.rng,
                burst_at,
                MYSTERY_BURST_COLOR,
                16,
            );
            apply_powerup(state, inner);
        }
        PowerupKind::ExtraLife => {
            state.lives += 1;
        }
        PowerupKind::MultiBall => {
            multi_ball(state);
        }
    }
}

/// Palette index for the mystery-box burst
const MYSTERY_BURST_COLOR: u32 = 6;
/// Palette index for barrel teardown debris
const BARREL_DEBRIS_COLOR: u32 = 7;
/// Palette index for the sticky particle stream
const STICKY_STREAM_COLOR: u32 = 8;

/// Multi-ball branches on the current ball set. With a ball on the paddle
/// the whole set is replaced by three attached balls fanned out above it;
/// otherwise every free ball splits into three.
fn multi_ball(state: &mut GameState) {
    if state.balls.iter().any(|b| b.attached) {
        state.balls.clear();
        for offset in [-15.0, 0.0, 15.0] {
            let ball = Ball::attached_to(&state.paddle, offset);
            state.balls.push(ball);
        }
        return;
    }

    let mut spawned = Vec::with_capacity(state.balls.len() * 2);
    for ball in &state.balls {
        for (dx, dvx) in [(-10.0, -1.5), (10.0, 1.5)] {
            let mut split = Ball::free(
                ball.pos + Vec2::new(dx, 0.0),
                Vec2::new(ball.vel.x + dvx, ball.vel.y),
            );
            split.fireball = ball.fireball;
            spawned.push(split);
        }
    }
    state.balls.extend(spawned);
}

/// Advance every slot by wall-clock `dt`, firing expiry consequences
/// exactly once per window.
pub fn advance_effects(state: &mut GameState, dt: f32) {
    if state.effects.enlarge.advance(dt, ENLARGE_SECS) {
        state.paddle.reset_width();
        log::debug!("enlarge expired");
    }

    if state.effects.sticky.is_active() {
        state.effects.emit_accum += dt;
        while state.effects.emit_accum >= STICKY_EMIT_INTERVAL {
            state.effects.emit_accum -= STICKY_EMIT_INTERVAL;
            let x = state
                .rng
                .random_range(state.paddle.pos.x..state.paddle.pos.x + state.paddle.width);
            let pos = Vec2::new(x, state.paddle.pos.y);
            spawn_burst(
                &mut state.paddle.particles,
                &mut state.rng,
                pos,
                STICKY_STREAM_COLOR,
                1,
            );
        }
    }
    if state.effects.sticky.advance(dt, STICKY_SECS) {
        state.effects.emit_accum = 0.0;
        state.paddle.particles.clear();
        log::debug!("sticky expired");
    }

    if state.effects.laser.advance(dt, LASER_SECS) {
        let debris_at = state
            .paddle
            .barrel
            .as_ref()
            .map(|b| b.pos + Vec2::new(b.width / 2.0, b.height / 2.0));
        if let Some(barrel) = &mut state.paddle.barrel {
            barrel.begin_teardown();
        }
        if let Some(pos) = debris_at {
            spawn_burst(
                &mut state.paddle.particles,
                &mut state.rng,
                pos,
                BARREL_DEBRIS_COLOR,
                10,
            );
        }
        log::debug!("laser expired");
    }

    if state.effects.slow.advance(dt, SLOW_SECS) {
        for ball in state.balls.iter_mut().filter(|b| !b.attached) {
            ball.vel *= 2.0;
        }
        log::debug!("slow motion expired");
    }

    if state.effects.fireball.advance(dt, FIREBALL_SECS) {
        for ball in &mut state.balls {
            ball.fireball = false;
        }
        log::debug!("fireball expired");
    }
}

/// Life-loss baseline: every slot cleared with no expiry side effects, the
/// paddle back to its original shape, fireball tint and shield gone.
pub fn clear_effects(state: &mut GameState) {
    state.effects = Effects::default();
    state.paddle.reset_width();
    state.paddle.particles.clear();
    state.paddle.barrel = None;
    state.shield = None;
    for ball in &mut state.balls {
        ball.fireball = false;
    }
    log::debug!("all effects cleared");
}
