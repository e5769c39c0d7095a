//! Data-driven game balance
//!
//! Every number the simulation uses lives here so a round can be replayed
//! or re-balanced without touching the simulation code. The defaults are the
//! classic 800x600 balance.

use serde::{Deserialize, Serialize};

use crate::consts::{ARENA_HEIGHT, ARENA_WIDTH};

/// How the player ball is steered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ControlScheme {
    /// Ball eases toward the mouse pointer
    #[default]
    Pointer,
    /// Ball moves at a fixed speed while arrow keys are held
    Keys,
}

/// When a collected Slow power-up takes effect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SlowActivation {
    /// Pickup stores a charge, spent with the "use slow" key
    #[default]
    Accumulate,
    /// Pickup slows enemies right away
    Immediate,
}

/// Initial direction of newly spawned enemies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SpawnTrajectory {
    /// Uniform random heading with a per-axis minimum speed
    #[default]
    Random,
    /// Heads for a random point inside the arena
    Aimed,
}

impl ControlScheme {
    pub fn as_str(&self) -> &'static str {
        match self {
            ControlScheme::Pointer => "Mouse",
            ControlScheme::Keys => "Arrows",
        }
    }
}

impl SlowActivation {
    pub fn as_str(&self) -> &'static str {
        match self {
            SlowActivation::Accumulate => "Stored (R)",
            SlowActivation::Immediate => "Instant",
        }
    }
}

impl SpawnTrajectory {
    pub fn as_str(&self) -> &'static str {
        match self {
            SpawnTrajectory::Random => "Random",
            SpawnTrajectory::Aimed => "Aimed",
        }
    }
}

/// Gameplay balance for one round
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Arena ===
    pub width: f32,
    pub height: f32,

    // === Player ===
    pub player_radius: f32,
    /// Fraction of the remaining distance covered per tick (pointer scheme)
    pub player_smoothing: f32,
    /// Units per millisecond while a key is held (keys scheme)
    pub player_key_speed: f32,

    // === Enemies ===
    pub enemy_radius: f32,
    /// Units per tick at speed multiplier 1.0
    pub enemy_base_speed: f32,
    /// Minimum share of the spawn speed on each axis (random trajectory)
    pub enemy_min_axis_fraction: f32,
    /// Distance outside the arena where edge spawns appear
    pub spawn_offset: f32,
    pub enemy_spawn_interval_ms: f64,
    pub first_enemy_min_distance: f32,

    // === Power-ups ===
    pub power_up_radius: f32,
    pub power_up_lifetime_ms: f64,
    /// Spawn probability per tick
    pub power_up_chance: f64,
    /// Inset from each edge for power-up placement (never below the radius)
    pub power_up_margin: f32,

    // === Effects ===
    pub slow_factor: f32,
    pub slow_duration_ms: f64,

    // === Difficulty ===
    pub speed_increase_interval_ms: f64,
    pub speed_increment: f32,

    // === Variants ===
    pub control: ControlScheme,
    pub slow_activation: SlowActivation,
    pub trajectory: SpawnTrajectory,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            width: ARENA_WIDTH,
            height: ARENA_HEIGHT,

            player_radius: 15.0,
            player_smoothing: 0.1,
            player_key_speed: 0.25,

            enemy_radius: 12.0,
            enemy_base_speed: 2.5,
            enemy_min_axis_fraction: 0.5,
            spawn_offset: 20.0,
            enemy_spawn_interval_ms: 8000.0,
            first_enemy_min_distance: 150.0,

            power_up_radius: 12.0,
            power_up_lifetime_ms: 15_000.0,
            power_up_chance: 0.001,
            power_up_margin: 25.0,

            slow_factor: 0.5,
            slow_duration_ms: 5000.0,

            speed_increase_interval_ms: 20_000.0,
            speed_increment: 0.2,

            control: ControlScheme::default(),
            slow_activation: SlowActivation::default(),
            trajectory: SpawnTrajectory::default(),
        }
    }
}

impl Tuning {
    /// Spawn speed for the given difficulty multiplier
    pub fn enemy_speed(&self, multiplier: f32) -> f32 {
        self.enemy_base_speed * multiplier
    }

    /// Effective power-up inset (keeps pickups fully on screen)
    pub fn power_up_inset(&self) -> f32 {
        self.power_up_margin.max(self.power_up_radius)
    }

    /// Slow factor guarded against zero so the revert can always divide
    pub fn effective_slow_factor(&self) -> f32 {
        if self.slow_factor.abs() < f32::EPSILON {
            1.0
        } else {
            self.slow_factor
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_classic_balance() {
        let t = Tuning::default();
        assert_eq!(t.width, 800.0);
        assert_eq!(t.height, 600.0);
        assert_eq!(t.enemy_spawn_interval_ms, 8000.0);
        assert_eq!(t.speed_increase_interval_ms, 20_000.0);
        assert!((t.enemy_speed(1.2) - 3.0).abs() < 1e-6);
    }

    #[test]
    fn test_power_up_inset_never_below_radius() {
        let t = Tuning {
            power_up_margin: 4.0,
            ..Default::default()
        };
        assert_eq!(t.power_up_inset(), t.power_up_radius);
    }

    #[test]
    fn test_partial_json_falls_back_to_defaults() {
        let t: Tuning = serde_json::from_str(r#"{"slow_factor":0.3,"trajectory":"Aimed"}"#)
            .expect("valid tuning json");
        assert!((t.slow_factor - 0.3).abs() < 1e-6);
        assert_eq!(t.trajectory, SpawnTrajectory::Aimed);
        assert_eq!(t.enemy_radius, 12.0);
    }

    #[test]
    fn test_zero_slow_factor_is_neutralised() {
        let t = Tuning {
            slow_factor: 0.0,
            ..Default::default()
        };
        assert_eq!(t.effective_slow_factor(), 1.0);
    }
}
