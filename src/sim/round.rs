//! Round lifecycle: Welcome -> Playing -> GameOver

use super::difficulty::Difficulty;
use super::spawn::spawn_first_enemy;
use super::state::{GameEvent, GamePhase, GameState, Player};
use crate::whole_seconds;

/// Outcome of a finished round
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundResult {
    /// Whole seconds survived
    pub seconds: u64,
    /// Whether this beat the previous best
    pub new_record: bool,
}

impl GameState {
    /// Start (or restart) a round from any phase.
    ///
    /// Resets entities, timers, multiplier, charges and pending effects, then
    /// places the first enemy away from the player.
    pub fn start_round(&mut self) {
        self.player = Player::new(&self.tuning);
        self.enemies.clear();
        self.power_ups.clear();
        self.scheduled.clear();
        self.elapsed_ms = 0.0;
        self.time_ticks = 0;
        self.since_enemy_spawn_ms = 0.0;
        self.difficulty = Difficulty::default();
        self.slow_charges = 0;
        self.round += 1;
        self.phase = GamePhase::Playing;
        self.events.push(GameEvent::RoundStarted);

        spawn_first_enemy(self);
        log::info!("Round {} started", self.round);
    }

    /// End the current round and settle the best time.
    ///
    /// Returns `None` when no round is in progress.
    pub fn end_round(&mut self) -> Option<RoundResult> {
        if self.phase != GamePhase::Playing {
            return None;
        }
        self.phase = GamePhase::GameOver;

        let seconds = whole_seconds(self.elapsed_ms);
        let new_record = seconds > self.best_secs;
        self.best_secs = self.best_secs.max(seconds);
        self.last_score = Some(seconds);

        self.events.push(GameEvent::GameOver { seconds });
        if new_record {
            self.events.push(GameEvent::NewRecord { seconds });
            log::info!("Round {} over after {}s - new record!", self.round, seconds);
        } else {
            log::info!(
                "Round {} over after {}s (best {}s)",
                self.round,
                seconds,
                self.best_secs
            );
        }

        Some(RoundResult {
            seconds,
            new_record,
        })
    }

    /// Back to the title screen. Entities stay until the next start.
    pub fn go_home(&mut self) {
        self.phase = GamePhase::Welcome;
    }
}
