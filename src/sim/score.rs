//! Score, combo, and power-up bookkeeping
//!
//! The combo is a two-state machine: idle (combo = 0) and active (combo >= 1).
//! A catch inside the decay window extends the streak; window expiry or any
//! miss drops back to idle. The multiplier is a step function of the streak,
//! doubled while DoublePoints is active.

use crate::consts::*;
use super::state::PowerUpKind;

/// The single active power-up slot: kind plus remaining seconds
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActivePowerUp {
    pub kind: PowerUpKind,
    pub remaining: f32,
}

/// Session scoring state
#[derive(Debug, Clone)]
pub struct ScoreBoard {
    /// Current score; drops to zero or below only at the moment of game over
    pub score: i64,
    /// Best score seen, session peak included; never decreases
    pub high_score: u64,
    /// Consecutive catches without a miss or window expiry
    pub combo: u32,
    /// Session-best combo, reported to statistics at session end
    pub best_combo: u32,
    /// Seconds left in the decay window; meaningful only while combo > 0
    combo_left: f32,
    /// At most one effect at a time; a fresh catch replaces/refreshes it
    pub active: Option<ActivePowerUp>,
}

impl ScoreBoard {
    /// Start a session carrying the persisted high score
    pub fn new(high_score: u64) -> Self {
        Self {
            score: STARTING_SCORE,
            high_score,
            combo: 0,
            best_combo: 0,
            combo_left: 0.0,
            active: None,
        }
    }

    /// Multiplier from the combo streak alone
    pub fn combo_multiplier(&self) -> f32 {
        match self.combo {
            0..=2 => 1.0,
            3..=4 => 1.5,
            5..=9 => 2.0,
            _ => 2.5,
        }
    }

    /// Combo multiplier with the DoublePoints factor composed in
    pub fn effective_multiplier(&self) -> f32 {
        let double = if self.is_active(PowerUpKind::DoublePoints) {
            2.0
        } else {
            1.0
        };
        self.combo_multiplier() * double
    }

    /// Award a catch worth `points` base value.
    ///
    /// The multiplier is read before the combo increments, so the streak pays
    /// off starting with the catch *after* a tier is reached. Returns the
    /// points actually added (floored).
    pub fn award_catch(&mut self, points: i64) -> i64 {
        let awarded = (points as f32 * self.effective_multiplier()).floor() as i64;
        self.score += awarded;
        if self.score > 0 {
            self.high_score = self.high_score.max(self.score as u64);
        }

        self.combo += 1;
        self.best_combo = self.best_combo.max(self.combo);
        self.combo_left = COMBO_TIMEOUT;
        awarded
    }

    /// Deduct `points` and break the streak (miss or bomb)
    pub fn penalize(&mut self, points: i64) {
        self.score -= points;
        self.reset_combo();
    }

    pub fn reset_combo(&mut self) {
        self.combo = 0;
        self.combo_left = 0.0;
    }

    /// Activate an effect, replacing and refreshing any current one
    pub fn activate(&mut self, kind: PowerUpKind) {
        self.active = Some(ActivePowerUp {
            kind,
            remaining: POWERUP_DURATION,
        });
    }

    pub fn is_active(&self, kind: PowerUpKind) -> bool {
        matches!(self.active, Some(a) if a.kind == kind)
    }

    /// Advance the decay window and the power-up countdown
    pub fn advance_timers(&mut self, dt: f32) {
        if self.combo > 0 {
            self.combo_left -= dt;
            if self.combo_left <= 0.0 {
                self.reset_combo();
            }
        }

        if let Some(active) = &mut self.active {
            active.remaining -= dt;
            if active.remaining <= 0.0 {
                self.active = None;
            }
        }
    }

    /// The terminal condition: the score has drained
    pub fn game_over(&self) -> bool {
        self.score <= 0
    }
}
