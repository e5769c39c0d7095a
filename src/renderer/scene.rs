//! Scene assembly: game state -> triangle list
//!
//! Reads the state only. Output is in arena coordinates (origin top-left,
//! y down); `RenderState` maps it to clip space.

use glam::Vec2;

use super::shapes::{circle, diagonal_gradient_rect, glow, line, ring};
use super::vertex::{Vertex, colors};
use crate::sim::{GamePhase, GameState, PowerUp, PowerUpKind};

const BALL_SEGMENTS: u32 = 32;
const PLAYER_GLOW: f32 = 15.0;
const ENEMY_GLOW: f32 = 10.0;
const POWER_UP_GLOW: f32 = 15.0;

/// Extra radius of a power-up's pulse, in arena units
pub fn power_up_pulse(power_up: &PowerUp) -> f32 {
    ((power_up.age_ms() * 0.01).sin() * 2.0) as f32
}

/// Build the full frame for `state`
pub fn build(state: &GameState) -> Vec<Vertex> {
    let t = &state.tuning;
    let mut vertices = diagonal_gradient_rect(
        Vec2::ZERO,
        Vec2::new(t.width, t.height),
        colors::BACKGROUND_TOP,
        colors::BACKGROUND_BOTTOM,
    );

    // The welcome screen covers an empty arena
    if state.phase == GamePhase::Welcome {
        return vertices;
    }

    for power_up in &state.power_ups {
        push_power_up(&mut vertices, power_up);
    }

    for enemy in &state.enemies {
        vertices.extend(glow(enemy.pos, enemy.radius, colors::ENEMY, ENEMY_GLOW, BALL_SEGMENTS));
        vertices.extend(circle(enemy.pos, enemy.radius, colors::ENEMY, BALL_SEGMENTS));
    }

    let player = &state.player;
    vertices.extend(glow(player.pos, player.radius, colors::PLAYER, PLAYER_GLOW, BALL_SEGMENTS));
    vertices.extend(circle(player.pos, player.radius, colors::PLAYER, BALL_SEGMENTS));

    vertices
}

fn push_power_up(vertices: &mut Vec<Vertex>, power_up: &PowerUp) {
    let color = match power_up.kind {
        PowerUpKind::Slow => colors::POWER_UP_SLOW,
        PowerUpKind::Destroy => colors::POWER_UP_DESTROY,
    };
    let r = (power_up.radius + power_up_pulse(power_up)).max(1.0);
    let c = power_up.pos;

    vertices.extend(glow(c, r, color, POWER_UP_GLOW, BALL_SEGMENTS));
    vertices.extend(circle(c, r, color, BALL_SEGMENTS));

    // Symbol: a clock face for Slow, a burst for Destroy
    let s = power_up.radius * 0.55;
    match power_up.kind {
        PowerUpKind::Slow => {
            vertices.extend(ring(c, s - 1.5, s, colors::SYMBOL, colors::SYMBOL, 16));
            vertices.extend(line(c, c + Vec2::new(0.0, -s * 0.8), 1.5, colors::SYMBOL));
            vertices.extend(line(c, c + Vec2::new(s * 0.6, 0.0), 1.5, colors::SYMBOL));
        }
        PowerUpKind::Destroy => {
            for dir in [
                Vec2::new(1.0, 1.0),
                Vec2::new(1.0, -1.0),
                Vec2::new(1.0, 0.0),
                Vec2::new(0.0, 1.0),
            ] {
                let d = dir.normalize() * s;
                vertices.extend(line(c - d, c + d, 1.5, colors::SYMBOL));
            }
        }
    }
}
