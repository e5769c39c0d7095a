//! Shape generation for 2D primitives
//!
//! Everything is emitted as a triangle list in arena coordinates.

use glam::Vec2;
use std::f32::consts::PI;

use super::vertex::{Vertex, colors};

fn lerp_color(a: [f32; 4], b: [f32; 4], t: f32) -> [f32; 4] {
    let t = t.clamp(0.0, 1.0);
    [
        a[0] + (b[0] - a[0]) * t,
        a[1] + (b[1] - a[1]) * t,
        a[2] + (b[2] - a[2]) * t,
        a[3] + (b[3] - a[3]) * t,
    ]
}

/// Point on a circle at angle `theta`
#[inline]
fn on_circle(center: Vec2, radius: f32, theta: f32) -> Vec2 {
    center + Vec2::new(theta.cos(), theta.sin()) * radius
}

/// Generate vertices for a filled circle
pub fn circle(center: Vec2, radius: f32, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    let segments = segments.max(3);
    let mut vertices = Vec::with_capacity((segments * 3) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;
        let p1 = on_circle(center, radius, theta1);
        let p2 = on_circle(center, radius, theta2);

        // Triangle from center to edge
        vertices.push(Vertex::new(center.x, center.y, color));
        vertices.push(Vertex::new(p1.x, p1.y, color));
        vertices.push(Vertex::new(p2.x, p2.y, color));
    }

    vertices
}

/// Generate vertices for a ring (hollow circle). Inner and outer edges may
/// carry different colors, which gives a cheap radial fade.
pub fn ring(
    center: Vec2,
    inner_radius: f32,
    outer_radius: f32,
    inner_color: [f32; 4],
    outer_color: [f32; 4],
    segments: u32,
) -> Vec<Vertex> {
    let segments = segments.max(3);
    let mut vertices = Vec::with_capacity((segments * 6) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        let inner1 = on_circle(center, inner_radius, theta1);
        let outer1 = on_circle(center, outer_radius, theta1);
        let inner2 = on_circle(center, inner_radius, theta2);
        let outer2 = on_circle(center, outer_radius, theta2);

        // Two triangles per segment
        vertices.push(Vertex::new(inner1.x, inner1.y, inner_color));
        vertices.push(Vertex::new(outer1.x, outer1.y, outer_color));
        vertices.push(Vertex::new(inner2.x, inner2.y, inner_color));

        vertices.push(Vertex::new(inner2.x, inner2.y, inner_color));
        vertices.push(Vertex::new(outer1.x, outer1.y, outer_color));
        vertices.push(Vertex::new(outer2.x, outer2.y, outer_color));
    }

    vertices
}

/// Soft halo around a circle, fading from `color` to transparent over `blur`
pub fn glow(center: Vec2, radius: f32, color: [f32; 4], blur: f32, segments: u32) -> Vec<Vertex> {
    ring(
        center,
        radius,
        radius + blur,
        colors::with_alpha(color, color[3] * 0.5),
        colors::with_alpha(color, 0.0),
        segments,
    )
}

/// Axis-aligned rectangle filled with a linear gradient running from the
/// `min` corner (`from`) to the `max` corner (`to`)
pub fn diagonal_gradient_rect(min: Vec2, max: Vec2, from: [f32; 4], to: [f32; 4]) -> Vec<Vertex> {
    let span = max - min;
    let len_sq = span.length_squared();
    let color_at = |p: Vec2| {
        if len_sq <= f32::EPSILON {
            from
        } else {
            lerp_color(from, to, (p - min).dot(span) / len_sq)
        }
    };

    let tl = min;
    let tr = Vec2::new(max.x, min.y);
    let bl = Vec2::new(min.x, max.y);
    let br = max;

    [tl, tr, bl, bl, tr, br]
        .into_iter()
        .map(|p| Vertex::new(p.x, p.y, color_at(p)))
        .collect()
}

/// Thick line segment as a quad
pub fn line(a: Vec2, b: Vec2, width: f32, color: [f32; 4]) -> Vec<Vertex> {
    let dir = (b - a).normalize_or_zero();
    // Perpendicular for width
    let perp = Vec2::new(-dir.y, dir.x) * (width * 0.5);

    let a1 = a + perp;
    let a2 = a - perp;
    let b1 = b + perp;
    let b2 = b - perp;

    vec![
        Vertex::new(a1.x, a1.y, color),
        Vertex::new(a2.x, a2.y, color),
        Vertex::new(b1.x, b1.y, color),
        Vertex::new(b1.x, b1.y, color),
        Vertex::new(a2.x, a2.y, color),
        Vertex::new(b2.x, b2.y, color),
    ]
}
