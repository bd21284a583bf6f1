//! Fixed-order simulation tick
//!
//! One tick advances every subsystem in a fixed order: difficulty, spawning,
//! basket input, entity motion, collision resolution, score timers, terminal
//! check. Pause is a gate on tick delivery - a paused tick advances nothing.

use super::collision;
use super::difficulty;
use super::state::{EntityKind, GameEvent, GamePhase, GameState, PowerUpKind};
use crate::consts::*;

/// Resolved input intents for a single tick (deterministic)
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    pub move_left: bool,
    pub move_right: bool,
    /// Toggle the pause gate
    pub pause: bool,
    /// Demo mode - the game steers the basket itself
    pub autopilot: bool,
}

/// Advance the session by one timestep of measured length `dt`
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    state.events.clear();

    if input.pause && state.phase == GamePhase::Playing {
        state.paused = !state.paused;
    }
    if state.paused || state.phase == GamePhase::GameOver {
        return;
    }

    let (move_left, move_right) = if input.autopilot {
        autopilot_steer(state)
    } else {
        (input.move_left, input.move_right)
    };

    state.time_ticks += 1;
    state.elapsed += dt;

    // Difficulty first: this tick's parameters come from time already played
    let diff = difficulty::params(state.elapsed);

    state.spawner.update(
        dt,
        &diff,
        &state.tuning,
        &mut state.rng,
        &mut state.entities,
    );

    let direction = (move_right as i8 - move_left as i8) as f32;
    state.basket.advance(direction, dt);

    let slow_factor = if state.score.is_active(PowerUpKind::SlowMotion) {
        SLOW_MOTION_FACTOR
    } else {
        1.0
    };
    for entity in &mut state.entities {
        entity.advance(dt, slow_factor);
    }
    state.particles.advance(dt);

    // Magnet runs before the overlap tests; it nudges, it never captures
    if state.score.is_active(PowerUpKind::Magnet) {
        collision::apply_magnet(
            &state.basket,
            &mut state.entities,
            state.tuning.magnet_radius,
            state.tuning.magnet_pull,
            dt,
        );
    }
    collision::resolve_frame(
        &state.basket,
        &mut state.entities,
        &mut state.score,
        &mut state.particles,
        &mut state.rng,
        &mut state.tally,
        &mut state.events,
    );

    state.score.advance_timers(dt);

    if state.score.game_over() {
        state.phase = GamePhase::GameOver;
        state.events.push(GameEvent::GameOver {
            final_score: state.score.score,
        });
    }
}

/// Demo-mode steering: chase the deepest catchable entity, dodge bombs
/// that are about to land in the basket.
fn autopilot_steer(state: &GameState) -> (bool, bool) {
    let basket_cx = state.basket.center_x();

    // A bomb close above the basket and inside its span is the priority
    let threat = state.entities.iter().find(|e| {
        matches!(e.kind, EntityKind::Object(k) if k.is_hostile())
            && e.pos.y > state.basket.pos.y - 150.0
            && (e.center().x - basket_cx).abs() < state.basket.width
    });
    if let Some(bomb) = threat {
        let flee_left = bomb.center().x >= basket_cx;
        return (flee_left, !flee_left);
    }

    // Otherwise chase whatever catchable entity is closest to the bottom
    let target = state
        .entities
        .iter()
        .filter(|e| match e.kind {
            EntityKind::Object(k) => !k.is_hostile(),
            EntityKind::PowerUp(_) => true,
        })
        .filter(|e| e.pos.y < state.basket.pos.y)
        .max_by(|a, b| {
            a.pos
                .y
                .partial_cmp(&b.pos.y)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

    if let Some(target) = target {
        let dx = target.center().x - basket_cx;
        if dx.abs() > 4.0 {
            return (dx < 0.0, dx > 0.0);
        }
    }
    (false, false)
}
