//! Game state and core simulation types
//!
//! Everything a round needs lives in [`GameState`]; the driver owns it and
//! collaborators only read it between ticks.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::difficulty::Difficulty;
use super::effects::EffectQueue;
use crate::clamp_to_arena;
use crate::tuning::Tuning;

/// Current phase of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title screen, nothing simulated
    Welcome,
    /// Active round
    Playing,
    /// Round ended, simulation frozen
    GameOver,
}

/// The player's ball
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    pub radius: f32,
    /// Fraction of the remaining distance covered per tick
    pub smoothing: f32,
    /// Last known pointer position (unclamped)
    pub target: Vec2,
}

impl Player {
    /// Player in the middle of the arena, pointer resting on it
    pub fn new(tuning: &Tuning) -> Self {
        let center = Vec2::new(tuning.width / 2.0, tuning.height / 2.0);
        Self {
            pos: center,
            radius: tuning.player_radius,
            smoothing: tuning.player_smoothing,
            target: center,
        }
    }

    /// Ease toward the pointer target, clamped so the ball stays on screen.
    ///
    /// Moves a fixed fraction of the remaining distance, so it approaches the
    /// target asymptotically and never overshoots.
    pub fn follow_pointer(&mut self, width: f32, height: f32) {
        let target = clamp_to_arena(self.target, self.radius, width, height);
        self.pos += (target - self.pos) * self.smoothing;
    }

    /// Move along `axis` (components in -1..=1) at `speed` units per ms
    pub fn steer(&mut self, axis: Vec2, speed: f32, dt_ms: f64, width: f32, height: f32) {
        let step = speed * dt_ms as f32;
        self.pos = clamp_to_arena(self.pos + axis * step, self.radius, width, height);
    }
}

/// A bouncing enemy ball
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub id: u32,
    pub pos: Vec2,
    /// Units per tick
    pub vel: Vec2,
    pub radius: f32,
}

impl Enemy {
    pub fn new(id: u32, pos: Vec2, vel: Vec2, radius: f32) -> Self {
        Self {
            id,
            pos,
            vel,
            radius,
        }
    }

    /// Advance one tick and bounce off the arena walls.
    ///
    /// Returns the number of reflections (0-2). A ball still entering from
    /// off-screen is pulled onto the boundary without reflecting.
    pub fn update(&mut self, width: f32, height: f32) -> u32 {
        self.pos += self.vel;
        let bx = bounce_axis(&mut self.pos.x, &mut self.vel.x, self.radius, width);
        let by = bounce_axis(&mut self.pos.y, &mut self.vel.y, self.radius, height);
        bx as u32 + by as u32
    }
}

fn bounce_axis(pos: &mut f32, vel: &mut f32, radius: f32, extent: f32) -> bool {
    let lo = radius;
    let hi = (extent - radius).max(radius);
    if *pos < lo {
        *pos = lo;
        if *vel < 0.0 {
            *vel = -*vel;
            return true;
        }
    } else if *pos > hi {
        *pos = hi;
        if *vel > 0.0 {
            *vel = -*vel;
            return true;
        }
    }
    false
}

/// Power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PowerUpKind {
    /// Halves enemy speed for a while
    Slow,
    /// Removes one enemy at random
    Destroy,
}

/// A collectible power-up
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PowerUp {
    pub id: u32,
    pub kind: PowerUpKind,
    pub pos: Vec2,
    pub radius: f32,
    /// Milliseconds left before it vanishes
    pub remaining_ms: f64,
    pub lifetime_ms: f64,
}

impl PowerUp {
    pub fn new(id: u32, kind: PowerUpKind, pos: Vec2, radius: f32, lifetime_ms: f64) -> Self {
        Self {
            id,
            kind,
            pos,
            radius,
            remaining_ms: lifetime_ms,
            lifetime_ms,
        }
    }

    /// Age by `dt_ms`; returns whether it is still alive
    pub fn update(&mut self, dt_ms: f64) -> bool {
        self.remaining_ms -= dt_ms;
        self.remaining_ms > 0.0
    }

    /// Time since spawn (drives the pulse animation)
    pub fn age_ms(&self) -> f64 {
        self.lifetime_ms - self.remaining_ms
    }
}

/// Something that happened during a tick, for audio/UI collaborators
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    RoundStarted,
    EnemySpawned { id: u32 },
    EnemyBounced,
    PowerUpSpawned { kind: PowerUpKind },
    PowerUpExpired { kind: PowerUpKind },
    PowerUpCollected { kind: PowerUpKind },
    EnemyDestroyed { id: u32 },
    SlowCharged { charges: u32 },
    SlowApplied { affected: usize },
    SlowReverted { restored: usize },
    SpeedIncreased { multiplier: f32 },
    GameOver { seconds: u64 },
    NewRecord { seconds: u64 },
}

/// Per-frame numbers for the HUD
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HudStats {
    pub phase: GamePhase,
    pub elapsed_secs: u64,
    pub enemy_count: usize,
    pub speed_multiplier: f32,
    pub slow_charges: u32,
    pub best_secs: u64,
    /// Score of the most recent finished round
    pub last_score: Option<u64>,
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Seed the RNG was created from
    pub seed: u64,
    pub rng: Pcg32,
    pub tuning: Tuning,
    pub phase: GamePhase,
    /// Survival time of the current round
    pub elapsed_ms: f64,
    /// Simulation tick counter for the current round
    pub time_ticks: u64,
    /// Best survival time in whole seconds
    pub best_secs: u64,
    pub last_score: Option<u64>,
    pub difficulty: Difficulty,
    /// Time accumulated toward the next enemy spawn
    pub since_enemy_spawn_ms: f64,
    pub slow_charges: u32,
    pub player: Player,
    /// Live enemies (spawn order)
    pub enemies: Vec<Enemy>,
    /// Live power-ups (spawn order)
    pub power_ups: Vec<PowerUp>,
    /// Deferred effect actions (slow reverts)
    pub scheduled: EffectQueue,
    /// Events produced since the driver last drained them
    pub events: Vec<GameEvent>,
    /// Rounds started so far
    pub round: u32,
    next_id: u32,
}

impl GameState {
    /// Create a game sitting on the welcome screen
    pub fn new(seed: u64, tuning: Tuning, best_secs: u64) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            player: Player::new(&tuning),
            tuning,
            phase: GamePhase::Welcome,
            elapsed_ms: 0.0,
            time_ticks: 0,
            best_secs,
            last_score: None,
            difficulty: Difficulty::default(),
            since_enemy_spawn_ms: 0.0,
            slow_charges: 0,
            enemies: Vec::new(),
            power_ups: Vec::new(),
            scheduled: EffectQueue::default(),
            events: Vec::new(),
            round: 0,
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Take the events produced since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Read-only numbers for the HUD
    pub fn hud(&self) -> HudStats {
        HudStats {
            phase: self.phase,
            elapsed_secs: crate::whole_seconds(self.elapsed_ms),
            enemy_count: self.enemies.len(),
            speed_multiplier: self.difficulty.multiplier,
            slow_charges: self.slow_charges,
            best_secs: self.best_secs,
            last_score: self.last_score,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const W: f32 = 800.0;
    const H: f32 = 600.0;

    #[test]
    fn test_pointer_follow_never_overshoots() {
        let mut player = Player::new(&Tuning::default());
        player.target = Vec2::new(700.0, 100.0);
        let mut last_dist = player.pos.distance(player.target);
        for _ in 0..60 {
            player.follow_pointer(W, H);
            let dist = player.pos.distance(player.target);
            assert!(dist < last_dist);
            assert!(player.pos.x < 700.0 && player.pos.y > 100.0);
            last_dist = dist;
        }
        assert!(last_dist < 2.0);
    }

    #[test]
    fn test_pointer_target_is_clamped() {
        let mut player = Player::new(&Tuning::default());
        player.target = Vec2::new(-500.0, 5000.0);
        for _ in 0..500 {
            player.follow_pointer(W, H);
        }
        assert!(player.pos.x >= player.radius);
        assert!(player.pos.y <= H - player.radius);
        assert!((player.pos.x - player.radius).abs() < 0.01);
    }

    #[test]
    fn test_steer_stops_at_walls() {
        let mut player = Player::new(&Tuning::default());
        for _ in 0..1000 {
            player.steer(Vec2::new(1.0, -1.0), 0.25, 16.0, W, H);
        }
        assert_eq!(player.pos, Vec2::new(W - player.radius, player.radius));
    }

    #[test]
    fn test_enemy_bounce_flips_and_clamps() {
        let mut enemy = Enemy::new(1, Vec2::new(790.0, 300.0), Vec2::new(3.0, 0.0), 12.0);
        let bounces = enemy.update(W, H);
        assert_eq!(bounces, 1);
        assert_eq!(enemy.pos.x, W - 12.0);
        assert_eq!(enemy.vel.x, -3.0);
    }

    #[test]
    fn test_enemy_corner_bounces_both_axes() {
        let mut enemy = Enemy::new(1, Vec2::new(13.0, 13.0), Vec2::new(-2.0, -2.0), 12.0);
        assert_eq!(enemy.update(W, H), 2);
        assert_eq!(enemy.vel, Vec2::new(2.0, 2.0));
    }

    #[test]
    fn test_enemy_entering_from_offscreen_does_not_reflect() {
        let mut enemy = Enemy::new(1, Vec2::new(-20.0, 300.0), Vec2::new(2.0, 0.0), 12.0);
        assert_eq!(enemy.update(W, H), 0);
        assert_eq!(enemy.pos.x, 12.0);
        assert_eq!(enemy.vel.x, 2.0);
    }

    #[test]
    fn test_power_up_expires_exactly_on_zero() {
        let mut p = PowerUp::new(1, PowerUpKind::Slow, Vec2::ZERO, 12.0, 32.0);
        assert!(p.update(16.0));
        assert!(!p.update(16.0));
        assert_eq!(p.age_ms(), 32.0);
    }

    #[test]
    fn test_hud_reports_whole_seconds() {
        let mut state = GameState::new(1, Tuning::default(), 7);
        state.elapsed_ms = 2999.0;
        let hud = state.hud();
        assert_eq!(hud.elapsed_secs, 2);
        assert_eq!(hud.best_secs, 7);
        assert_eq!(hud.phase, GamePhase::Welcome);
    }

    proptest! {
        #[test]
        fn prop_enemy_stays_in_bounds(
            x in -40.0f32..840.0,
            y in -40.0f32..640.0,
            vx in -8.0f32..8.0,
            vy in -8.0f32..8.0,
            ticks in 1usize..200,
        ) {
            let mut enemy = Enemy::new(1, Vec2::new(x, y), Vec2::new(vx, vy), 12.0);
            for _ in 0..ticks {
                enemy.update(W, H);
                prop_assert!(enemy.pos.x >= 12.0 && enemy.pos.x <= W - 12.0);
                prop_assert!(enemy.pos.y >= 12.0 && enemy.pos.y <= H - 12.0);
            }
        }

        #[test]
        fn prop_bounce_preserves_axis_speed(
            x in 12.0f32..788.0,
            y in 12.0f32..588.0,
            vx in -8.0f32..8.0,
            vy in -8.0f32..8.0,
        ) {
            let mut enemy = Enemy::new(1, Vec2::new(x, y), Vec2::new(vx, vy), 12.0);
            enemy.update(W, H);
            prop_assert_eq!(enemy.vel.x.abs(), vx.abs());
            prop_assert_eq!(enemy.vel.y.abs(), vy.abs());
        }

        #[test]
        fn prop_power_up_alive_iff_positive(lifetime in 1.0f64..20_000.0, dt in 1.0f64..50.0) {
            let mut p = PowerUp::new(1, PowerUpKind::Destroy, Vec2::ZERO, 12.0, lifetime);
            let alive = p.update(dt);
            prop_assert_eq!(alive, lifetime - dt > 0.0);
        }
    }
}
