//! Headless driver
//!
//! Plays a seeded session with a simple ball-tracking policy and reports
//! the outcome. Doubles as a smoke test for the simulation core and the
//! render/UI contracts without any window or canvas.

use brick_blitz::consts::*;
use brick_blitz::render::{Recording, draw_frame};
use brick_blitz::sim::{GameState, InputState, Phase, tick};
use brick_blitz::ui::LogUi;
use brick_blitz::{QualityPreset, Settings};

/// Hard stop after ten minutes of simulated play
const MAX_TICKS: u64 = 10 * 60 * 60;

fn main() {
    env_logger::init();

    let seed: u64 = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or_else(rand::random);

    let settings = std::env::args()
        .nth(2)
        .and_then(|arg| QualityPreset::parse(&arg))
        .map(Settings::from_preset)
        .unwrap_or_default();

    let mut state = GameState::new(seed);
    let mut ui = LogUi::default();

    let dt = 1.0 / TICK_HZ;
    let mut ticks: u64 = 0;
    while state.phase == Phase::Playing && ticks < MAX_TICKS {
        let input = tracking_input(&state);
        tick(&mut state, &input, dt, &mut ui);
        ticks += 1;
    }

    // One frame through the recording surface to exercise the render contract
    let mut frame = Recording::default();
    draw_frame(&state, &settings, &mut frame);
    log::info!("final frame captured as {} draw commands", frame.commands.len());

    println!(
        "seed {seed}: {:?} with score {} and {} lives after {ticks} ticks",
        state.phase, state.score, state.lives
    );
}

/// Chase the lowest free ball (or the playfield center when serving),
/// launching and firing whenever those inputs can do something.
fn tracking_input(state: &GameState) -> InputState {
    let target = state
        .balls
        .iter()
        .filter(|b| !b.attached)
        .max_by(|a, b| a.pos.y.total_cmp(&b.pos.y))
        .map(|b| b.pos.x)
        .unwrap_or(PLAYFIELD_WIDTH / 2.0);

    let center = state.paddle.center_x();
    InputState {
        left: target < center - 4.0,
        right: target > center + 4.0,
        launch: true,
        fire: true,
    }
}
