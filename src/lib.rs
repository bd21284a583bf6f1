//! Falling Frenzy - a 2D arcade catching game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, spawning, collisions, scoring)
//! - `persistence`: Durable profile storage with atomic replace + backup
//! - `settings`: User preferences read by the audio/render collaborators
//! - `stats`: Cross-session statistics aggregates
//! - `tuning`: Data-driven game balance

pub mod persistence;
pub mod settings;
pub mod sim;
pub mod stats;
pub mod tuning;

pub use settings::Settings;
pub use stats::StatisticsRecord;
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Playfield dimensions
    pub const PLAYFIELD_WIDTH: f32 = 1100.0;
    pub const PLAYFIELD_HEIGHT: f32 = 700.0;

    /// Basket defaults - the basket slides along a fixed row near the bottom
    pub const BASKET_WIDTH: f32 = 100.0;
    pub const BASKET_HEIGHT: f32 = 20.0;
    /// Horizontal basket speed (pixels/sec)
    pub const BASKET_SPEED: f32 = 900.0;
    /// Gap between the basket underside and the bottom of the playfield
    pub const BASKET_Y_OFFSET: f32 = 20.0;

    /// Falling entity defaults (objects and power-ups share a square hitbox)
    pub const ENTITY_SIZE: f32 = 40.0;
    /// Fall speed at session start (pixels/sec)
    pub const FALL_SPEED_BASE: f32 = 300.0;
    /// Fall speed ceiling (pixels/sec)
    pub const FALL_SPEED_MAX: f32 = 900.0;
    /// Fall speed gained per second of play (pixels/sec per sec)
    pub const FALL_SPEED_RAMP: f32 = 0.6;
    /// Per-object random speed variance (fraction of the difficulty speed)
    pub const FALL_SPEED_VARIANCE: f32 = 0.1;
    /// Power-ups drift down slower than objects
    pub const POWERUP_SPEED_FACTOR: f32 = 0.7;

    /// Spawn interval at session start (seconds between spawns)
    pub const SPAWN_INTERVAL_BASE: f32 = 1.0;
    /// Spawn interval floor (seconds)
    pub const SPAWN_INTERVAL_MIN: f32 = 0.5;
    /// Interval shaved off per second of play
    pub const SPAWN_INTERVAL_RAMP: f32 = 0.005;
    /// Spawn columns across the playfield (spreads drops horizontally)
    pub const SPAWN_COLUMNS: u32 = 3;

    /// Scoring
    pub const STARTING_SCORE: i64 = 10;
    pub const MISS_PENALTY: i64 = 1;
    pub const BOMB_DAMAGE: i64 = 3;
    /// Seconds without a catch before the combo breaks
    pub const COMBO_TIMEOUT: f32 = 2.0;

    /// Power-up effect duration (seconds)
    pub const POWERUP_DURATION: f32 = 5.0;
    /// Global fall-speed factor while SlowMotion is active
    pub const SLOW_MOTION_FACTOR: f32 = 0.5;

    /// Particle pool capacity
    pub const MAX_PARTICLES: usize = 256;
    /// Particle lifetime (seconds)
    pub const PARTICLE_LIFETIME: f32 = 0.5;
    /// Particle burst speed range (pixels/sec)
    pub const PARTICLE_SPEED_MIN: f32 = 120.0;
    pub const PARTICLE_SPEED_MAX: f32 = 300.0;
    /// Upward bias applied to burst velocity (pixels/sec)
    pub const PARTICLE_UPWARD_BIAS: f32 = 120.0;
    /// Downward pull on particles (pixels/sec²)
    pub const PARTICLE_GRAVITY: f32 = 1080.0;
    /// Particles per ordinary catch burst
    pub const CATCH_BURST: usize = 10;
}
