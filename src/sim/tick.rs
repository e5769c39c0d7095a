//! Fixed timestep simulation tick
//!
//! Core game loop that advances the simulation deterministically.

use glam::Vec2;

use super::collision::{first_enemy_hit, power_up_hits};
use super::effects::{activate, process_due, use_slow_charge};
use super::spawn::run_spawner;
use super::state::{GameEvent, GamePhase, GameState};
use crate::tuning::{ControlScheme, SlowActivation};

/// Arrow keys currently held
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DirectionKeys {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

impl DirectionKeys {
    /// Movement direction, one unit per held key (opposite keys cancel)
    pub fn axis(&self) -> Vec2 {
        let x = self.right as i32 - self.left as i32;
        let y = self.down as i32 - self.up as i32;
        Vec2::new(x as f32, y as f32)
    }
}

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Pointer position in arena coordinates, when it moved
    pub pointer: Option<Vec2>,
    /// Held direction keys
    pub keys: DirectionKeys,
    /// Spend a stored slow charge (one-shot)
    pub use_slow: bool,
    /// Start or restart a round (one-shot)
    pub start: bool,
    /// Back to the title screen (one-shot)
    pub home: bool,
}

/// Advance the game state by one timestep of `dt_ms` milliseconds
pub fn tick(state: &mut GameState, input: &TickInput, dt_ms: f64) {
    if input.start && state.phase != GamePhase::Playing {
        state.start_round();
    }
    if let Some(pointer) = input.pointer {
        state.player.target = pointer;
    }
    if input.home && state.phase != GamePhase::Welcome {
        state.go_home();
    }

    // Only a running round is simulated
    if state.phase != GamePhase::Playing {
        return;
    }

    state.time_ticks += 1;
    state.elapsed_ms += dt_ms;

    // Deferred effects first, so a revert lands before this tick's movement
    process_due(state);

    if input.use_slow && state.tuning.slow_activation == SlowActivation::Accumulate {
        use_slow_charge(state);
    }

    let (w, h) = (state.tuning.width, state.tuning.height);

    match state.tuning.control {
        ControlScheme::Pointer => state.player.follow_pointer(w, h),
        ControlScheme::Keys => {
            let speed = state.tuning.player_key_speed;
            state.player.steer(input.keys.axis(), speed, dt_ms, w, h);
        }
    }

    for enemy in &mut state.enemies {
        for _ in 0..enemy.update(w, h) {
            state.events.push(GameEvent::EnemyBounced);
        }
    }

    let events = &mut state.events;
    state.power_ups.retain_mut(|p| {
        let alive = p.update(dt_ms);
        if !alive {
            events.push(GameEvent::PowerUpExpired { kind: p.kind });
        }
        alive
    });

    run_spawner(state, dt_ms);

    let interval = state.tuning.speed_increase_interval_ms;
    let increment = state.tuning.speed_increment;
    if let Some(multiplier) = state.difficulty.advance(dt_ms, interval, increment) {
        state.events.push(GameEvent::SpeedIncreased { multiplier });
        log::info!("Enemy speed now {:.1}x", multiplier);
    }

    if first_enemy_hit(&state.player, &state.enemies).is_some() {
        state.end_round();
        return;
    }

    let hits = power_up_hits(&state.player, &state.power_ups);
    let mut collected = Vec::with_capacity(hits.len());
    for &idx in hits.iter().rev() {
        collected.push(state.power_ups.remove(idx).kind);
    }
    for kind in collected.into_iter().rev() {
        activate(state, kind);
    }
}
