//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay pure:
//! - One entry point (`tick`) driven by real elapsed time
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod collision;
pub mod effects;
pub mod state;
pub mod tick;

pub use effects::{Effects, GlowKind, PowerupKind, advance_effects, apply_powerup, clear_effects};
pub use state::{
    Ball, Brick, GameState, Laser, LaserBarrel, Paddle, Particle, Phase, Powerup, ScorePopup,
    Shield,
};
pub use tick::{InputState, Key, tick};
