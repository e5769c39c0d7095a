//! Collision detection between circular bodies
//!
//! Everything in the arena is a circle, so a hit is just two centres closer
//! than the sum of their radii. Touching edges do not count.

use glam::Vec2;

use super::state::{Enemy, Player, PowerUp};

/// Anything with a circular footprint
pub trait Body {
    fn center(&self) -> Vec2;
    fn radius(&self) -> f32;
}

impl Body for Player {
    fn center(&self) -> Vec2 {
        self.pos
    }
    fn radius(&self) -> f32 {
        self.radius
    }
}

impl Body for Enemy {
    fn center(&self) -> Vec2 {
        self.pos
    }
    fn radius(&self) -> f32 {
        self.radius
    }
}

impl Body for PowerUp {
    fn center(&self) -> Vec2 {
        self.pos
    }
    fn radius(&self) -> f32 {
        self.radius
    }
}

/// Circle overlap test
#[inline]
pub fn circles_overlap(a_pos: Vec2, a_radius: f32, b_pos: Vec2, b_radius: f32) -> bool {
    a_pos.distance(b_pos) < a_radius + b_radius
}

/// Whether two bodies overlap (symmetric)
#[inline]
pub fn collides<A: Body + ?Sized, B: Body + ?Sized>(a: &A, b: &B) -> bool {
    circles_overlap(a.center(), a.radius(), b.center(), b.radius())
}

/// Index of the first enemy touching the player, if any
pub fn first_enemy_hit(player: &Player, enemies: &[Enemy]) -> Option<usize> {
    enemies.iter().position(|e| collides(player, e))
}

/// Indices of every power-up touching the player, in store order
pub fn power_up_hits(player: &Player, power_ups: &[PowerUp]) -> Vec<usize> {
    power_ups
        .iter()
        .enumerate()
        .filter(|(_, p)| collides(player, *p))
        .map(|(i, _)| i)
        .collect()
}
