//! Bounce Dodge - survive as long as you can among bouncing balls
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, spawning, collisions, effects)
//! - `tuning`: Data-driven game balance and variant selection
//! - `renderer`: WebGPU rendering of state snapshots
//! - `audio`: Sound cues for simulation events
//! - `persistence`: Best survival time storage
//! - `settings`: Player preferences

pub mod audio;
pub mod persistence;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use settings::Settings;
pub use tuning::{ControlScheme, SlowActivation, SpawnTrajectory, Tuning};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep in milliseconds (~60 Hz)
    pub const TICK_MS: f64 = 16.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest frame delta fed to the accumulator (tab switches etc.)
    pub const MAX_FRAME_MS: f64 = 100.0;

    /// Arena dimensions
    pub const ARENA_WIDTH: f32 = 800.0;
    pub const ARENA_HEIGHT: f32 = 600.0;
}

/// Clamp a point so a circle of `radius` centred on it stays inside a
/// `width` x `height` rectangle anchored at the origin.
#[inline]
pub fn clamp_to_arena(pos: Vec2, radius: f32, width: f32, height: f32) -> Vec2 {
    Vec2::new(
        pos.x.clamp(radius, (width - radius).max(radius)),
        pos.y.clamp(radius, (height - radius).max(radius)),
    )
}

/// Whole seconds survived for an elapsed time in milliseconds
#[inline]
pub fn whole_seconds(elapsed_ms: f64) -> u64 {
    (elapsed_ms.max(0.0) / 1000.0).floor() as u64
}
