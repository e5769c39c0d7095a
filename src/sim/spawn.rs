//! Enemy and power-up spawning

use glam::Vec2;
use rand::Rng;
use std::f32::consts::TAU;

use super::state::{Enemy, GameEvent, GameState, PowerUp, PowerUpKind};
use crate::tuning::SpawnTrajectory;

/// Resampling attempts when placing the first enemy away from the player
const FIRST_ENEMY_ATTEMPTS: u32 = 32;

/// Arena side an enemy enters from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    Top,
    Right,
    Bottom,
    Left,
}

impl Edge {
    pub const ALL: [Edge; 4] = [Edge::Top, Edge::Right, Edge::Bottom, Edge::Left];

    pub fn random(rng: &mut impl Rng) -> Self {
        Self::ALL[rng.random_range(0..Self::ALL.len())]
    }
}

/// Uniform sample in `[lo, hi)`, collapsing to `lo` for an empty range
fn uniform(rng: &mut impl Rng, lo: f32, hi: f32) -> f32 {
    if hi > lo { rng.random_range(lo..hi) } else { lo }
}

/// Point just outside `edge`, uniform along it
pub fn edge_spawn_point(rng: &mut impl Rng, edge: Edge, width: f32, height: f32, offset: f32) -> Vec2 {
    match edge {
        Edge::Top => Vec2::new(uniform(rng, 0.0, width), -offset),
        Edge::Right => Vec2::new(width + offset, uniform(rng, 0.0, height)),
        Edge::Bottom => Vec2::new(uniform(rng, 0.0, width), height + offset),
        Edge::Left => Vec2::new(-offset, uniform(rng, 0.0, height)),
    }
}

/// Uniform point where a circle of `radius` fits inside the arena
pub fn interior_point(rng: &mut impl Rng, radius: f32, width: f32, height: f32) -> Vec2 {
    Vec2::new(
        uniform(rng, radius, width - radius),
        uniform(rng, radius, height - radius),
    )
}

/// Random heading at `speed`, each axis pushed up to `min_fraction * speed`
/// so nothing crawls along a wall.
pub fn random_velocity(rng: &mut impl Rng, speed: f32, min_fraction: f32) -> Vec2 {
    let angle = rng.random::<f32>() * TAU;
    let floor = speed * min_fraction;
    let lift = |v: f32| {
        if v.abs() < floor {
            if v > 0.0 { floor } else { -floor }
        } else {
            v
        }
    };
    Vec2::new(lift(angle.cos() * speed), lift(angle.sin() * speed))
}

/// Velocity of magnitude `speed` from `from` toward `target`
pub fn aimed_velocity(from: Vec2, target: Vec2, speed: f32) -> Vec2 {
    (target - from).normalize_or_zero() * speed
}

fn enemy_velocity(state: &mut GameState, from: Vec2) -> Vec2 {
    let speed = state.tuning.enemy_speed(state.difficulty.multiplier);
    let min_fraction = state.tuning.enemy_min_axis_fraction;
    match state.tuning.trajectory {
        SpawnTrajectory::Random => random_velocity(&mut state.rng, speed, min_fraction),
        SpawnTrajectory::Aimed => {
            let target = interior_point(
                &mut state.rng,
                state.tuning.enemy_radius,
                state.tuning.width,
                state.tuning.height,
            );
            let vel = aimed_velocity(from, target, speed);
            if vel == Vec2::ZERO {
                random_velocity(&mut state.rng, speed, min_fraction)
            } else {
                vel
            }
        }
    }
}

fn push_enemy(state: &mut GameState, pos: Vec2) -> u32 {
    let vel = enemy_velocity(state, pos);
    let id = state.next_entity_id();
    state
        .enemies
        .push(Enemy::new(id, pos, vel, state.tuning.enemy_radius));
    state.events.push(GameEvent::EnemySpawned { id });
    log::debug!("Enemy {} spawned at ({:.0}, {:.0})", id, pos.x, pos.y);
    id
}

/// Spawn an enemy just outside a random edge
pub fn spawn_enemy(state: &mut GameState) -> u32 {
    let edge = Edge::random(&mut state.rng);
    let pos = edge_spawn_point(
        &mut state.rng,
        edge,
        state.tuning.width,
        state.tuning.height,
        state.tuning.spawn_offset,
    );
    push_enemy(state, pos)
}

/// Spawn the opening enemy inside the arena, away from the player.
///
/// Resamples until the minimum distance holds; after a bounded number of
/// attempts the farthest candidate wins.
pub fn spawn_first_enemy(state: &mut GameState) -> u32 {
    let (w, h, r) = (state.tuning.width, state.tuning.height, state.tuning.enemy_radius);
    let min_dist = state.tuning.first_enemy_min_distance;
    let player = state.player.pos;

    let mut best = interior_point(&mut state.rng, r, w, h);
    for _ in 0..FIRST_ENEMY_ATTEMPTS {
        if best.distance(player) >= min_dist {
            break;
        }
        let candidate = interior_point(&mut state.rng, r, w, h);
        if candidate.distance(player) > best.distance(player) {
            best = candidate;
        }
    }
    push_enemy(state, best)
}

/// Spawn a power-up of random kind inside the inset arena
pub fn spawn_power_up(state: &mut GameState) -> u32 {
    let inset = state.tuning.power_up_inset();
    let pos = interior_point(&mut state.rng, inset, state.tuning.width, state.tuning.height);
    let kind = if state.rng.random_bool(0.5) {
        PowerUpKind::Slow
    } else {
        PowerUpKind::Destroy
    };
    let id = state.next_entity_id();
    state.power_ups.push(PowerUp::new(
        id,
        kind,
        pos,
        state.tuning.power_up_radius,
        state.tuning.power_up_lifetime_ms,
    ));
    state.events.push(GameEvent::PowerUpSpawned { kind });
    log::debug!("{:?} power-up spawned at ({:.0}, {:.0})", kind, pos.x, pos.y);
    id
}

/// Per-tick spawner: enemies on a fixed interval, power-ups by chance
pub fn run_spawner(state: &mut GameState, dt_ms: f64) {
    let interval = state.tuning.enemy_spawn_interval_ms;
    if interval > 0.0 {
        state.since_enemy_spawn_ms += dt_ms;
        if state.since_enemy_spawn_ms >= interval {
            state.since_enemy_spawn_ms -= interval;
            spawn_enemy(state);
        }
    }

    let chance = state.tuning.power_up_chance.clamp(0.0, 1.0);
    if chance > 0.0 && state.rng.random_bool(chance) {
        spawn_power_up(state);
    }
}
