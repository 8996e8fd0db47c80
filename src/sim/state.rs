//! Entities and session state
//!
//! Everything the orchestrator owns lives here. Entities carry their own
//! per-tick update rules; the collision and effect consequences are applied
//! by `tick` in a fixed order.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::effects::{Effects, PowerupKind};
use crate::consts::*;

/// Session phase. Terminal once it leaves `Playing`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Playing,
    GameOver,
    Won,
}

/// A ball. Attached balls ride the paddle and skip every collision check.
#[derive(Debug, Clone)]
pub struct Ball {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    /// Riding the paddle; position is recomputed from the paddle each tick
    pub attached: bool,
    /// Set on launch; cleared whenever the ball (re)attaches
    pub launched: bool,
    /// Passes through bricks without reflecting
    pub fireball: bool,
    /// Horizontal offset from the paddle center while attached
    pub paddle_offset: f32,
    /// Recent positions, most recent last
    pub trail: Vec<Vec2>,
}

impl Ball {
    /// A free-moving ball
    pub fn free(pos: Vec2, vel: Vec2) -> Self {
        Self {
            pos,
            vel,
            radius: BALL_RADIUS,
            attached: false,
            launched: true,
            fireball: false,
            paddle_offset: 0.0,
            trail: Vec::with_capacity(TRAIL_LENGTH),
        }
    }

    /// A ball riding the paddle at the given offset from its center
    pub fn attached_to(paddle: &Paddle, offset: f32) -> Self {
        let mut ball = Self::free(Vec2::ZERO, Vec2::ZERO);
        ball.attach(offset);
        ball.follow_paddle(paddle);
        ball
    }

    /// Bounding box as (left, top, width, height)
    pub fn rect(&self) -> (f32, f32, f32, f32) {
        (
            self.pos.x - self.radius,
            self.pos.y - self.radius,
            self.radius * 2.0,
            self.radius * 2.0,
        )
    }

    /// Re-attach to the paddle (sticky catch, multi-ball respawn)
    pub fn attach(&mut self, offset: f32) {
        self.attached = true;
        self.launched = false;
        self.paddle_offset = offset;
        self.vel = Vec2::ZERO;
        self.trail.clear();
    }

    /// Leave the paddle at `jitter` radians off straight-up
    pub fn launch(&mut self, jitter: f32) {
        self.vel = Vec2::new(jitter.sin(), -jitter.cos()) * BALL_LAUNCH_SPEED;
        self.attached = false;
        self.launched = true;
    }

    /// Reposition on top of the paddle (attached balls, every tick)
    pub fn follow_paddle(&mut self, paddle: &Paddle) {
        self.pos = Vec2::new(
            paddle.center_x() + self.paddle_offset,
            paddle.pos.y - self.radius,
        );
    }

    pub fn advance(&mut self, frames: f32) {
        self.pos += self.vel * frames;
    }

    /// Record current position, evicting the oldest past `TRAIL_LENGTH`
    pub fn record_trail(&mut self) {
        self.trail.push(self.pos);
        if self.trail.len() > TRAIL_LENGTH {
            self.trail.remove(0);
        }
    }
}

/// The player's paddle. Owns its decorations: the laser barrel and the
/// transient particle stream the sticky effect emits.
#[derive(Debug, Clone)]
pub struct Paddle {
    /// Top-left corner
    pub pos: Vec2,
    pub width: f32,
    pub height: f32,
    pub speed: f32,
    original_width: f32,
    pub barrel: Option<LaserBarrel>,
    pub particles: Vec<Particle>,
}

impl Default for Paddle {
    fn default() -> Self {
        Self {
            pos: Vec2::new(
                PLAYFIELD_WIDTH / 2.0 - PADDLE_WIDTH / 2.0,
                PLAYFIELD_HEIGHT - PADDLE_BOTTOM_OFFSET,
            ),
            width: PADDLE_WIDTH,
            height: PADDLE_HEIGHT,
            speed: PADDLE_SPEED,
            original_width: PADDLE_WIDTH,
            barrel: None,
            particles: Vec::new(),
        }
    }
}

impl Paddle {
    pub fn center_x(&self) -> f32 {
        self.pos.x + self.width / 2.0
    }

    pub fn rect(&self) -> (f32, f32, f32, f32) {
        (self.pos.x, self.pos.y, self.width, self.height)
    }

    /// Move per held input and clamp inside the playfield
    pub fn update(&mut self, left: bool, right: bool, frames: f32, playfield_width: f32) {
        if left {
            self.pos.x -= self.speed * frames;
        }
        if right {
            self.pos.x += self.speed * frames;
        }
        self.pos.x = self.pos.x.clamp(0.0, playfield_width - self.width);
    }

    /// Grow to 1.5x original, capped
    pub fn enlarge(&mut self) {
        self.width = (self.original_width * 1.5).min(PADDLE_MAX_WIDTH);
    }

    pub fn reset_width(&mut self) {
        self.width = self.original_width;
    }

    /// Advance the barrel decoration and the owned particle stream
    pub fn advance_decorations(&mut self, frames: f32, dt: f32) {
        let center = self.center_x();
        let top = self.pos.y;
        if let Some(barrel) = &mut self.barrel {
            barrel.follow(center, top);
            barrel.advance(dt);
        }
        if self.barrel.as_ref().is_some_and(LaserBarrel::finished) {
            self.barrel = None;
        }
        for p in &mut self.particles {
            p.advance(frames, dt);
        }
        self.particles.retain(Particle::alive);
    }
}

/// Decorative laser barrel riding the paddle. Once the laser effect ends it
/// plays a one-shot teardown animation and removes itself.
#[derive(Debug, Clone)]
pub struct LaserBarrel {
    pub pos: Vec2,
    pub width: f32,
    pub height: f32,
    /// Teardown clock in animation units; the barrel is gone past 1
    pub teardown: Option<f32>,
}

/// Teardown animation-units advanced per wall-clock second
const BARREL_TEARDOWN_RATE: f32 = 1.6;

impl LaserBarrel {
    pub fn new(paddle: &Paddle) -> Self {
        let mut barrel = Self {
            pos: Vec2::ZERO,
            width: 10.0,
            height: 12.0,
            teardown: None,
        };
        barrel.follow(paddle.center_x(), paddle.pos.y);
        barrel
    }

    /// Track the paddle's horizontal center, sitting on its top edge
    pub fn follow(&mut self, paddle_center_x: f32, paddle_top: f32) {
        self.pos = Vec2::new(paddle_center_x - self.width / 2.0, paddle_top - self.height);
    }

    pub fn begin_teardown(&mut self) {
        if self.teardown.is_none() {
            self.teardown = Some(0.0);
        }
    }

    pub fn advance(&mut self, dt: f32) {
        if let Some(t) = &mut self.teardown {
            *t += dt * BARREL_TEARDOWN_RATE;
        }
    }

    pub fn dismantling(&self) -> bool {
        self.teardown.is_some()
    }

    pub fn finished(&self) -> bool {
        self.teardown.is_some_and(|t| t > 1.0)
    }
}

/// A brick. `destroying` gates the one-shot destruction animation; once
/// `destroyed` the brick is permanently inert.
#[derive(Debug, Clone)]
pub struct Brick {
    pub pos: Vec2,
    pub width: f32,
    pub height: f32,
    pub destroyed: bool,
    pub destroying: bool,
    /// Destruction animation progress in [0, 1]
    pub progress: f32,
    /// Palette index for rendering
    pub color: u32,
}

impl Brick {
    pub fn new(pos: Vec2, color: u32) -> Self {
        Self {
            pos,
            width: BRICK_WIDTH,
            height: BRICK_HEIGHT,
            destroyed: false,
            destroying: false,
            progress: 0.0,
            color,
        }
    }

    pub fn rect(&self) -> (f32, f32, f32, f32) {
        (self.pos.x, self.pos.y, self.width, self.height)
    }

    pub fn center(&self) -> Vec2 {
        self.pos + Vec2::new(self.width / 2.0, self.height / 2.0)
    }

    /// Still collidable: neither destroyed nor mid-animation
    pub fn is_intact(&self) -> bool {
        !self.destroyed && !self.destroying
    }

    /// One-shot: returns false if destruction already started or finished
    pub fn start_destruction(&mut self) -> bool {
        if !self.is_intact() {
            return false;
        }
        self.destroying = true;
        self.progress = 0.0;
        true
    }

    pub fn advance(&mut self, dt: f32) {
        if self.destroying {
            self.progress += dt / BRICK_DESTRUCTION_SECS;
            if self.progress >= 1.0 {
                self.progress = 1.0;
                self.destroying = false;
                self.destroyed = true;
            }
        }
    }
}

/// A falling pickup. `collected` is terminal.
#[derive(Debug, Clone)]
pub struct Powerup {
    pub pos: Vec2,
    pub vel: Vec2,
    pub kind: PowerupKind,
    pub collected: bool,
}

impl Powerup {
    /// Spawn centered under the given point (a destroyed brick's bottom)
    pub fn new(kind: PowerupKind, below: Vec2) -> Self {
        let (w, _) = kind.size();
        Self {
            pos: Vec2::new(below.x - w / 2.0, below.y),
            vel: Vec2::new(0.0, POWERUP_FALL_SPEED),
            kind,
            collected: false,
        }
    }

    pub fn rect(&self) -> (f32, f32, f32, f32) {
        let (w, h) = self.kind.size();
        (self.pos.x, self.pos.y, w, h)
    }

    pub fn advance(&mut self, frames: f32) {
        self.pos += self.vel * frames;
    }
}

/// An upward beam segment. `active` is terminal on hit or off-screen.
#[derive(Debug, Clone)]
pub struct Laser {
    /// Top of the beam
    pub pos: Vec2,
    pub vel: Vec2,
    pub active: bool,
}

impl Laser {
    pub fn new(center_x: f32, y: f32) -> Self {
        Self {
            pos: Vec2::new(center_x - LASER_WIDTH / 2.0, y - LASER_HEIGHT),
            vel: Vec2::new(0.0, -LASER_SPEED),
            active: true,
        }
    }

    pub fn advance(&mut self, frames: f32) {
        self.pos += self.vel * frames;
    }

    pub fn off_screen(&self) -> bool {
        self.pos.y + LASER_HEIGHT < 0.0
    }
}

/// Barrier above the paddle absorbing ball losses until its hits run out.
#[derive(Debug, Clone)]
pub struct Shield {
    pub pos: Vec2,
    pub width: f32,
    pub height: f32,
    pub hits: u32,
    pub max_hits: u32,
}

impl Shield {
    /// Spans the playfield just above the paddle
    pub fn new(paddle: &Paddle) -> Self {
        Self {
            pos: Vec2::new(0.0, paddle.pos.y - SHIELD_GAP - SHIELD_HEIGHT),
            width: PLAYFIELD_WIDTH,
            height: SHIELD_HEIGHT,
            hits: 0,
            max_hits: SHIELD_MAX_HITS,
        }
    }

    pub fn rect(&self) -> (f32, f32, f32, f32) {
        (self.pos.x, self.pos.y, self.width, self.height)
    }

    /// Permanently inactive once the hit budget is spent
    pub fn active(&self) -> bool {
        self.hits < self.max_hits
    }

    pub fn register_hit(&mut self) {
        self.hits += 1;
    }

    /// Render opacity as a pure function of remaining hits
    pub fn alpha(&self) -> f32 {
        (self.max_hits.saturating_sub(self.hits)) as f32 / self.max_hits as f32
    }
}

/// A cosmetic debris particle
#[derive(Debug, Clone)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Decays from 1 to 0
    pub life: f32,
    pub size: f32,
    /// Palette index for rendering
    pub color: u32,
}

/// Particles smaller than this are treated as gone
const PARTICLE_MIN_SIZE: f32 = 0.5;

impl Particle {
    pub fn advance(&mut self, frames: f32, dt: f32) {
        self.pos += self.vel * frames;
        self.vel.y += 0.08 * frames;
        self.vel *= 0.98_f32.powf(frames);
        self.life -= dt * 1.8;
        self.size *= 0.97_f32.powf(frames);
    }

    pub fn alive(&self) -> bool {
        self.life > 0.0 && self.size > PARTICLE_MIN_SIZE
    }
}

/// Push a burst of debris particles, evicting the oldest past the budget
pub fn spawn_burst(
    particles: &mut Vec<Particle>,
    rng: &mut Pcg32,
    pos: Vec2,
    color: u32,
    count: usize,
) {
    for _ in 0..count {
        if particles.len() >= MAX_PARTICLES {
            particles.remove(0);
        }
        let angle = rng.random_range(0.0..std::f32::consts::TAU);
        let speed = rng.random_range(0.5..2.5);
        particles.push(Particle {
            pos,
            vel: Vec2::new(angle.cos(), angle.sin()) * speed,
            life: rng.random_range(0.7..1.0),
            size: rng.random_range(2.0..5.0),
            color,
        });
    }
}

/// A floating score label
#[derive(Debug, Clone)]
pub struct ScorePopup {
    pub pos: Vec2,
    pub vel: Vec2,
    pub text: String,
    /// Decays from 1 to 0
    pub life: f32,
}

impl ScorePopup {
    pub fn new(pos: Vec2, amount: u32) -> Self {
        Self {
            pos,
            vel: Vec2::new(0.0, -0.5),
            text: format!("+{amount}"),
            life: 1.0,
        }
    }

    pub fn advance(&mut self, frames: f32, dt: f32) {
        self.pos += self.vel * frames;
        self.life -= dt * 1.2;
    }

    pub fn alive(&self) -> bool {
        self.life > 0.0
    }
}

/// Complete session state. The orchestrator exclusively owns every
/// collection; entities only ever see siblings passed into collision calls.
#[derive(Debug, Clone)]
pub struct GameState {
    pub seed: u64,
    pub score: u32,
    pub lives: u32,
    pub phase: Phase,
    pub paddle: Paddle,
    pub balls: Vec<Ball>,
    pub bricks: Vec<Brick>,
    pub powerups: Vec<Powerup>,
    pub lasers: Vec<Laser>,
    pub shield: Option<Shield>,
    pub particles: Vec<Particle>,
    pub popups: Vec<ScorePopup>,
    pub effects: Effects,
    pub(crate) rng: Pcg32,
}

/// Brick palette size; indices feed the render layer
const BRICK_COLOR_COUNT: u32 = 6;

impl GameState {
    /// A fresh session with the given RNG seed
    pub fn new(seed: u64) -> Self {
        let mut state = Self {
            seed,
            score: 0,
            lives: 3,
            phase: Phase::Playing,
            paddle: Paddle::default(),
            balls: Vec::new(),
            bricks: Vec::new(),
            powerups: Vec::new(),
            lasers: Vec::new(),
            shield: None,
            particles: Vec::new(),
            popups: Vec::new(),
            effects: Effects::default(),
            rng: Pcg32::seed_from_u64(seed),
        };
        state.spawn_attached_ball();
        state.create_bricks();
        log::info!("session started with seed {seed}");
        state
    }

    /// One ball riding the paddle center
    pub fn spawn_attached_ball(&mut self) {
        let ball = Ball::attached_to(&self.paddle, 0.0);
        self.balls.push(ball);
    }

    /// Lay out the full brick grid, centered horizontally
    pub fn create_bricks(&mut self) {
        self.bricks.clear();
        let stride_x = BRICK_WIDTH + BRICK_PADDING;
        let stride_y = BRICK_HEIGHT + BRICK_PADDING;
        let grid_width = BRICK_COLS as f32 * stride_x - BRICK_PADDING;
        let offset_x = (PLAYFIELD_WIDTH - grid_width) / 2.0;
        for row in 0..BRICK_ROWS {
            for col in 0..BRICK_COLS {
                let pos = Vec2::new(
                    offset_x + col as f32 * stride_x,
                    BRICK_TOP_OFFSET + row as f32 * stride_y,
                );
                let color = self.rng.random_range(0..BRICK_COLOR_COUNT);
                self.bricks.push(Brick::new(pos, color));
            }
        }
    }

    /// Fresh session: score 0, lives 3, Playing, all collections rebuilt
    pub fn restart(&mut self) {
        self.score = 0;
        self.lives = 3;
        self.phase = Phase::Playing;
        self.paddle = Paddle::default();
        self.balls.clear();
        self.powerups.clear();
        self.lasers.clear();
        self.shield = None;
        self.particles.clear();
        self.popups.clear();
        self.effects = Effects::default();
        self.spawn_attached_ball();
        self.create_bricks();
        log::info!("session restarted");
    }
}
