//! Game state and core simulation types

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::particles::ParticlePool;
use super::score::ScoreBoard;
use super::spawn::Spawner;
use crate::consts::*;
use crate::stats::SessionTally;
use crate::tuning::Tuning;

/// Current phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Run ended (score drained to zero)
    GameOver,
}

/// Catchable object kinds, ordered from common to hostile
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectKind {
    Red,
    Green,
    Yellow,
    /// Rare, high value
    Purple,
    /// Hostile - catching it costs points, dodging it is free
    Bomb,
}

impl ObjectKind {
    /// Base point value awarded (or deducted) on catch
    pub fn points(self) -> i64 {
        match self {
            ObjectKind::Red => 1,
            ObjectKind::Green => 2,
            ObjectKind::Yellow => 3,
            ObjectKind::Purple => 5,
            ObjectKind::Bomb => -3,
        }
    }

    pub fn is_hostile(self) -> bool {
        self == ObjectKind::Bomb
    }

    /// Display color, consumed by rendering and particle bursts
    pub fn color(self) -> [u8; 3] {
        match self {
            ObjectKind::Red => [255, 60, 60],
            ObjectKind::Green => [60, 255, 100],
            ObjectKind::Yellow => [255, 220, 60],
            ObjectKind::Purple => [180, 60, 255],
            ObjectKind::Bomb => [30, 30, 30],
        }
    }
}

/// Power-up effect kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PowerUpKind {
    /// Halves entity fall speed
    SlowMotion,
    /// Doubles the combo multiplier
    DoublePoints,
    /// Misses cost nothing
    Shield,
    /// Objects near the basket are pulled toward it
    Magnet,
}

impl PowerUpKind {
    /// All effects, for uniform spawn selection
    pub const ALL: [PowerUpKind; 4] = [
        PowerUpKind::SlowMotion,
        PowerUpKind::DoublePoints,
        PowerUpKind::Shield,
        PowerUpKind::Magnet,
    ];

    pub fn color(self) -> [u8; 3] {
        match self {
            PowerUpKind::SlowMotion => [100, 180, 255],
            PowerUpKind::DoublePoints => [255, 215, 0],
            PowerUpKind::Shield => [180, 60, 255],
            PowerUpKind::Magnet => [255, 140, 0],
        }
    }
}

/// What a falling entity is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Object(ObjectKind),
    PowerUp(PowerUpKind),
}

/// A falling entity - square hitbox, top-left anchored position
#[derive(Debug, Clone)]
pub struct FallingEntity {
    pub id: u32,
    pub kind: EntityKind,
    pub pos: Vec2,
    /// Fall speed in pixels/sec, fixed at spawn
    pub speed: f32,
    /// Visual spin (radians), not used by logic
    pub rotation: f32,
    /// Spin rate (radians/sec), assigned at spawn
    pub spin: f32,
    /// Pulse phase driving the scale wobble on special kinds
    pub pulse: f32,
    pub scale: f32,
}

impl FallingEntity {
    pub fn new(id: u32, kind: EntityKind, x: f32, speed: f32, spin: f32) -> Self {
        Self {
            id,
            kind,
            pos: Vec2::new(x, -ENTITY_SIZE),
            speed,
            rotation: 0.0,
            spin,
            pulse: 0.0,
            scale: 1.0,
        }
    }

    /// Advance position and animation by `dt`.
    ///
    /// Pure function of current state and elapsed time; `slow_factor` is the
    /// global slow-motion multiplier (1.0 when inactive).
    pub fn advance(&mut self, dt: f32, slow_factor: f32) {
        self.pos.y += self.speed * slow_factor * dt;
        self.rotation += self.spin * dt;

        // Scale wobble on the rare and hostile kinds
        match self.kind {
            EntityKind::Object(ObjectKind::Purple) => {
                self.pulse += dt * 10.0;
                self.scale = 1.0 + self.pulse.sin() * 0.1;
            }
            EntityKind::Object(ObjectKind::Bomb) => {
                self.pulse += dt * 8.0;
                self.scale = 1.0 + self.pulse.sin() * 0.15;
            }
            _ => {}
        }
    }

    pub fn center(&self) -> Vec2 {
        self.pos + Vec2::splat(ENTITY_SIZE / 2.0)
    }

    /// True once the whole entity has left the bottom of the playfield
    pub fn below_playfield(&self) -> bool {
        self.pos.y > PLAYFIELD_HEIGHT
    }
}

/// The player's basket - top-left anchored, y fixed near the bottom
#[derive(Debug, Clone)]
pub struct Basket {
    pub pos: Vec2,
    pub vel_x: f32,
    pub width: f32,
    pub height: f32,
}

impl Default for Basket {
    fn default() -> Self {
        Self {
            pos: Vec2::new(
                PLAYFIELD_WIDTH / 2.0 - BASKET_WIDTH / 2.0,
                PLAYFIELD_HEIGHT - BASKET_HEIGHT - BASKET_Y_OFFSET,
            ),
            vel_x: 0.0,
            width: BASKET_WIDTH,
            height: BASKET_HEIGHT,
        }
    }
}

impl Basket {
    /// Move horizontally by `direction` (-1, 0, +1), clamped to the playfield
    pub fn advance(&mut self, direction: f32, dt: f32) {
        self.vel_x = direction.clamp(-1.0, 1.0) * BASKET_SPEED;
        self.pos.x = (self.pos.x + self.vel_x * dt).clamp(0.0, PLAYFIELD_WIDTH - self.width);
    }

    pub fn center_x(&self) -> f32 {
        self.pos.x + self.width / 2.0
    }

    pub fn center(&self) -> Vec2 {
        self.pos + Vec2::new(self.width / 2.0, self.height / 2.0)
    }
}

/// One-shot events emitted during a tick, consumed by the audio/render layers
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    ObjectCaught {
        kind: ObjectKind,
        /// Points awarded after the multiplier, floored
        points: i64,
        /// Combo count after this catch
        combo: u32,
    },
    BombCaught {
        penalty: i64,
    },
    ObjectMissed {
        /// True when Shield swallowed the penalty
        shielded: bool,
    },
    PowerUpActivated {
        kind: PowerUpKind,
    },
    GameOver {
        final_score: i64,
    },
}

/// Complete session state, owned by the running game loop
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Session RNG - the only randomness source inside a tick
    pub rng: Pcg32,
    pub tuning: Tuning,
    pub phase: GamePhase,
    /// Gate on tick delivery; not a simulation state
    pub paused: bool,
    /// Unpaused play time in seconds
    pub elapsed: f32,
    pub time_ticks: u64,
    pub basket: Basket,
    pub entities: Vec<FallingEntity>,
    pub particles: ParticlePool,
    pub score: ScoreBoard,
    pub spawner: Spawner,
    pub tally: SessionTally,
    /// Events of the most recent tick
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Create a session with default tuning and no persisted high score
    pub fn new(seed: u64) -> Self {
        Self::with_profile(seed, 0, Tuning::default())
    }

    /// Create a session seeded with the persisted high score and tuning.
    /// The tuning is re-validated here so a caller can't smuggle in values
    /// the spawner would choke on.
    pub fn with_profile(seed: u64, high_score: u64, tuning: Tuning) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            tuning: tuning.sanitized(),
            phase: GamePhase::Playing,
            paused: false,
            elapsed: 0.0,
            time_ticks: 0,
            basket: Basket::default(),
            entities: Vec::new(),
            particles: ParticlePool::with_capacity(MAX_PARTICLES),
            score: ScoreBoard::new(high_score),
            spawner: Spawner::new(),
            tally: SessionTally::default(),
            events: Vec::new(),
        }
    }

    /// Immutable per-tick view for the rendering and audio collaborators
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            basket_pos: self.basket.pos,
            basket_width: self.basket.width,
            entities: self
                .entities
                .iter()
                .map(|e| EntityView {
                    kind: e.kind,
                    pos: e.pos,
                    rotation: e.rotation,
                    scale: e.scale,
                })
                .collect(),
            particles: self.particles.live().copied().collect(),
            score: self.score.score,
            combo: self.score.combo,
            multiplier: self.score.effective_multiplier(),
            high_score: self.score.high_score,
            active_powerup: self.score.active.as_ref().map(|a| (a.kind, a.remaining)),
            paused: self.paused,
            game_over: self.phase == GamePhase::GameOver,
            events: self.events.clone(),
        }
    }
}

/// Render view of one falling entity
#[derive(Debug, Clone, Copy)]
pub struct EntityView {
    pub kind: EntityKind,
    pub pos: Vec2,
    pub rotation: f32,
    pub scale: f32,
}

/// Per-tick output contract: everything the outer layers need, no state diffs
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub basket_pos: Vec2,
    pub basket_width: f32,
    pub entities: Vec<EntityView>,
    pub particles: Vec<super::particles::Particle>,
    pub score: i64,
    pub combo: u32,
    pub multiplier: f32,
    pub high_score: u64,
    /// Active effect and remaining seconds, if any
    pub active_powerup: Option<(PowerUpKind, f32)>,
    pub paused: bool,
    pub game_over: bool,
    pub events: Vec<GameEvent>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basket_stays_inside_playfield() {
        let mut basket = Basket::default();
        for _ in 0..10_000 {
            basket.advance(-1.0, SIM_DT);
        }
        assert_eq!(basket.pos.x, 0.0);

        for _ in 0..10_000 {
            basket.advance(1.0, SIM_DT);
        }
        assert_eq!(basket.pos.x, PLAYFIELD_WIDTH - basket.width);
    }

    #[test]
    fn entity_advance_is_linear_in_speed() {
        let mut e = FallingEntity::new(1, EntityKind::Object(ObjectKind::Red), 100.0, 300.0, 0.0);
        let y0 = e.pos.y;
        e.advance(0.5, 1.0);
        assert!((e.pos.y - (y0 + 150.0)).abs() < 1e-4);
    }

    #[test]
    fn slow_motion_halves_descent() {
        let mut normal =
            FallingEntity::new(1, EntityKind::Object(ObjectKind::Red), 0.0, 300.0, 0.0);
        let mut slowed = normal.clone();
        normal.advance(1.0, 1.0);
        slowed.advance(1.0, SLOW_MOTION_FACTOR);
        assert!((normal.pos.y - (-ENTITY_SIZE + 300.0)).abs() < 1e-4);
        assert!((slowed.pos.y - (-ENTITY_SIZE + 150.0)).abs() < 1e-4);
    }

    #[test]
    fn identical_dt_sequences_reproduce_trajectories() {
        let mut a = FallingEntity::new(7, EntityKind::Object(ObjectKind::Purple), 50.0, 420.0, 2.5);
        let mut b = a.clone();
        for _ in 0..600 {
            a.advance(SIM_DT, 1.0);
            b.advance(SIM_DT, 1.0);
        }
        assert_eq!(a.pos, b.pos);
        assert_eq!(a.rotation, b.rotation);
        assert_eq!(a.scale, b.scale);
    }

    #[test]
    fn point_values_match_kind_table() {
        assert_eq!(ObjectKind::Red.points(), 1);
        assert_eq!(ObjectKind::Green.points(), 2);
        assert_eq!(ObjectKind::Yellow.points(), 3);
        assert_eq!(ObjectKind::Purple.points(), 5);
        assert_eq!(ObjectKind::Bomb.points(), -3);
        assert!(ObjectKind::Bomb.is_hostile());
        assert!(!ObjectKind::Purple.is_hostile());
    }
}
