//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - No rendering, audio, or platform dependencies
//! - Persistence happens at session boundaries, never inside a tick

pub mod collision;
pub mod difficulty;
pub mod particles;
pub mod score;
pub mod spawn;
pub mod state;
pub mod tick;

pub use difficulty::DifficultyParams;
pub use particles::{Particle, ParticlePool};
pub use score::{ActivePowerUp, ScoreBoard};
pub use spawn::Spawner;
pub use state::{
    Basket, EntityKind, FallingEntity, GameEvent, GamePhase, GameState, ObjectKind, PowerUpKind,
    Snapshot,
};
pub use tick::{TickInput, tick};
