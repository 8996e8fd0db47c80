//! UI sync contract
//!
//! The orchestrator reports HUD values after every tick and fires a
//! one-shot event when the session ends. Hosts wire these to whatever
//! score/lives/overlay widgets they own.

/// Receives per-tick HUD values and the one-shot session-end events
pub trait UiSync {
    fn hud(&mut self, score: u32, lives: u32);
    fn game_over(&mut self, final_score: u32);
    fn won(&mut self, final_score: u32);
}

/// Logs HUD changes and session events; the headless driver's UI
#[derive(Debug, Default)]
pub struct LogUi {
    last: Option<(u32, u32)>,
}

impl UiSync for LogUi {
    fn hud(&mut self, score: u32, lives: u32) {
        if self.last != Some((score, lives)) {
            log::info!("score {score} lives {lives}");
            self.last = Some((score, lives));
        }
    }

    fn game_over(&mut self, final_score: u32) {
        log::info!("game over, final score {final_score}");
    }

    fn won(&mut self, final_score: u32) {
        log::info!("won, final score {final_score}");
    }
}

/// Ignores everything; for callers that don't watch the HUD
#[derive(Debug, Default)]
pub struct NullUi;

impl UiSync for NullUi {
    fn hud(&mut self, _score: u32, _lives: u32) {}
    fn game_over(&mut self, _final_score: u32) {}
    fn won(&mut self, _final_score: u32) {}
}

/// Records events for assertions in tests
#[derive(Debug, Default)]
pub struct EventLog {
    pub hud: Vec<(u32, u32)>,
    pub game_over: Vec<u32>,
    pub won: Vec<u32>,
}

impl UiSync for EventLog {
    fn hud(&mut self, score: u32, lives: u32) {
        self.hud.push((score, lives));
    }

    fn game_over(&mut self, final_score: u32) {
        self.game_over.push(final_score);
    }

    fn won(&mut self, final_score: u32) {
        self.won.push(final_score);
    }
}
