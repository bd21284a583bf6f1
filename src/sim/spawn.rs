//! Entity spawning
//!
//! One accumulated timer; when it passes the difficulty-scaled interval, one
//! object drops at a column-spread x position. A separate low-probability
//! roll can add a power-up in the same spawn window. The live-entity cap is
//! checked before anything is created, bounding per-tick work.

use rand::Rng;
use rand_pcg::Pcg32;

use super::difficulty::DifficultyParams;
use super::state::{EntityKind, FallingEntity, ObjectKind, PowerUpKind};
use crate::consts::*;
use crate::tuning::Tuning;

#[derive(Debug, Clone)]
pub struct Spawner {
    /// Time accumulated toward the next spawn
    timer: f32,
    next_id: u32,
}

impl Default for Spawner {
    fn default() -> Self {
        Self::new()
    }
}

impl Spawner {
    pub fn new() -> Self {
        Self {
            timer: 0.0,
            next_id: 1,
        }
    }

    fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Run one spawn decision.
    ///
    /// At most one object (plus at most one power-up) per firing; if the live
    /// count has reached the cap the spawn is skipped and the timer keeps
    /// accumulating, so spawning resumes as soon as capacity frees up.
    pub fn update(
        &mut self,
        dt: f32,
        diff: &DifficultyParams,
        tuning: &Tuning,
        rng: &mut Pcg32,
        entities: &mut Vec<FallingEntity>,
    ) {
        self.timer += dt;
        if self.timer < diff.spawn_interval {
            return;
        }

        if entities.len() >= tuning.max_entities {
            // Backpressure: drop this spawn window entirely
            return;
        }
        self.timer = 0.0;

        let object = self.make_object(diff, tuning, rng);
        entities.push(object);

        // Independent power-up roll, sharing the spawn window
        if entities.len() < tuning.max_entities && rng.random_bool(tuning.powerup_chance as f64) {
            let powerup = self.make_powerup(diff, rng);
            entities.push(powerup);
        }
    }

    fn make_object(
        &mut self,
        diff: &DifficultyParams,
        tuning: &Tuning,
        rng: &mut Pcg32,
    ) -> FallingEntity {
        let kind = draw_object_kind(rng, tuning);
        let x = column_spawn_x(rng);
        let variance = rng.random_range(-FALL_SPEED_VARIANCE..FALL_SPEED_VARIANCE);
        let speed = diff.fall_speed * (1.0 + variance);
        let spin = rng.random_range(-5.0..5.0);
        FallingEntity::new(
            self.next_entity_id(),
            EntityKind::Object(kind),
            x,
            speed,
            spin,
        )
    }

    fn make_powerup(&mut self, diff: &DifficultyParams, rng: &mut Pcg32) -> FallingEntity {
        let kind = PowerUpKind::ALL[rng.random_range(0..PowerUpKind::ALL.len())];
        let x = rng.random_range(0.0..PLAYFIELD_WIDTH - ENTITY_SIZE);
        FallingEntity::new(
            self.next_entity_id(),
            EntityKind::PowerUp(kind),
            x,
            diff.fall_speed * POWERUP_SPEED_FACTOR,
            2.0,
        )
    }
}

/// Weighted kind draw: hostile and rare kinds first, remainder uniform
fn draw_object_kind(rng: &mut Pcg32, tuning: &Tuning) -> ObjectKind {
    let roll: f32 = rng.random();
    if roll < tuning.bomb_weight {
        ObjectKind::Bomb
    } else if roll < tuning.bomb_weight + tuning.purple_weight {
        ObjectKind::Purple
    } else {
        match rng.random_range(0..3) {
            0 => ObjectKind::Red,
            1 => ObjectKind::Green,
            _ => ObjectKind::Yellow,
        }
    }
}

/// Pick a spawn x inside one of `SPAWN_COLUMNS` columns, whole entity in bounds
fn column_spawn_x(rng: &mut Pcg32) -> f32 {
    let column_width = PLAYFIELD_WIDTH / SPAWN_COLUMNS as f32;
    let column = rng.random_range(0..SPAWN_COLUMNS) as f32;
    let x = column * column_width + rng.random_range(0.0..(column_width - ENTITY_SIZE).max(1.0));

    debug_assert!(
        (0.0..=PLAYFIELD_WIDTH - ENTITY_SIZE).contains(&x),
        "spawn x out of playfield bounds: {x}"
    );
    x.clamp(0.0, PLAYFIELD_WIDTH - ENTITY_SIZE)
}
