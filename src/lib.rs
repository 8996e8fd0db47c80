//! Brick Blitz - a brick-breaking arcade game simulation core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, collisions, powerup effects, game loop)
//! - `render`: Abstract drawing surface contract
//! - `ui`: HUD and session-event sync contract
//! - `settings`: Quality presets and preferences

pub mod render;
pub mod settings;
pub mod sim;
pub mod ui;

pub use settings::{QualityPreset, Settings};

/// Game configuration constants
pub mod consts {
    /// Reference tick rate. Velocities are expressed in pixels per tick at
    /// this rate; `tick` scales motion by `dt * TICK_HZ` so the classic
    /// per-frame constants stay framerate-independent.
    pub const TICK_HZ: f32 = 60.0;

    /// Playfield dimensions
    pub const PLAYFIELD_WIDTH: f32 = 800.0;
    pub const PLAYFIELD_HEIGHT: f32 = 600.0;

    /// Paddle defaults
    pub const PADDLE_WIDTH: f32 = 100.0;
    pub const PADDLE_HEIGHT: f32 = 15.0;
    pub const PADDLE_SPEED: f32 = 6.0;
    /// Hard cap on the enlarged paddle width
    pub const PADDLE_MAX_WIDTH: f32 = 150.0;
    /// Distance from the playfield bottom to the paddle top
    pub const PADDLE_BOTTOM_OFFSET: f32 = 40.0;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 8.0;
    /// Minimum speed after a paddle bounce
    pub const BALL_MIN_SPEED: f32 = 4.0;
    /// Speed of a freshly launched ball
    pub const BALL_LAUNCH_SPEED: f32 = 5.0;
    /// Launch direction jitter, radians either side of straight up
    pub const LAUNCH_JITTER: f32 = 0.25;
    /// Trail history length (oldest point evicted on overflow)
    pub const TRAIL_LENGTH: usize = 8;

    /// Brick grid
    pub const BRICK_ROWS: usize = 5;
    pub const BRICK_COLS: usize = 9;
    pub const BRICK_WIDTH: f32 = 70.0;
    pub const BRICK_HEIGHT: f32 = 20.0;
    pub const BRICK_PADDING: f32 = 5.0;
    pub const BRICK_TOP_OFFSET: f32 = 40.0;
    /// Wall-clock seconds for the destruction animation to play out
    pub const BRICK_DESTRUCTION_SECS: f32 = 0.3;

    /// Powerups
    pub const POWERUP_DROP_CHANCE: f64 = 0.25;
    pub const POWERUP_FALL_SPEED: f32 = 2.0;

    /// Lasers
    pub const LASER_SPEED: f32 = 8.0;
    pub const LASER_WIDTH: f32 = 3.0;
    pub const LASER_HEIGHT: f32 = 14.0;
    /// Simultaneous live laser cap
    pub const MAX_LASERS: usize = 3;

    /// Shield
    pub const SHIELD_MAX_HITS: u32 = 3;
    pub const SHIELD_HEIGHT: f32 = 6.0;
    /// Gap between the paddle top and the shield
    pub const SHIELD_GAP: f32 = 12.0;

    /// Effect windows (wall-clock seconds)
    pub const ENLARGE_SECS: f32 = 10.0;
    pub const ENLARGE_WARNING_AT: f32 = 8.0;
    pub const STICKY_SECS: f32 = 10.0;
    pub const STICKY_EMIT_INTERVAL: f32 = 0.15;
    pub const LASER_SECS: f32 = 10.0;
    pub const SLOW_SECS: f32 = 8.0;
    pub const FIREBALL_SECS: f32 = 8.0;

    /// Score awarded per destroyed brick
    pub const SCORE_PER_BRICK: u32 = 10;

    /// Global particle budget (oldest evicted when full)
    pub const MAX_PARTICLES: usize = 256;
}
