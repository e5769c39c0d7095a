//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod difficulty;
pub mod effects;
pub mod round;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{Body, collides};
pub use difficulty::Difficulty;
pub use effects::{EffectAction, EffectQueue, ScheduledEvent};
pub use round::RoundResult;
pub use state::{
    Enemy, GameEvent, GamePhase, GameState, HudStats, Player, PowerUp, PowerUpKind,
};
pub use tick::{DirectionKeys, TickInput, tick};
