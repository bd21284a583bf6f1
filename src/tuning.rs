//! Data-driven game balance
//!
//! The spawn probabilities and magnet parameters are balance knobs, not
//! constants the rules depend on. They can be overridden from a JSON file;
//! anything out of range is replaced with the default and logged, so a bad
//! tuning file can degrade the feel but never the invariants.

use std::path::Path;

use serde::{Deserialize, Serialize};

/// Balance knobs with documented defaults
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Probability a spawned object is the rare Purple (~5%)
    pub purple_weight: f32,
    /// Probability a spawned object is a Bomb (~15%)
    pub bomb_weight: f32,
    /// Chance each spawn window also drops a power-up (~5%)
    pub powerup_chance: f32,
    /// Horizontal attraction radius of the Magnet effect (pixels)
    pub magnet_radius: f32,
    /// Magnet pull rate (pixels/sec)
    pub magnet_pull: f32,
    /// Live-entity cap; spawns are skipped at the cap
    pub max_entities: usize,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            purple_weight: 0.05,
            bomb_weight: 0.15,
            powerup_chance: 0.05,
            magnet_radius: 150.0,
            magnet_pull: 300.0,
            max_entities: 64,
        }
    }
}

impl Tuning {
    /// Validate every knob, replacing bad values with defaults.
    pub fn sanitized(mut self) -> Self {
        let defaults = Tuning::default();

        for (name, value, fallback) in [
            (
                "purple_weight",
                &mut self.purple_weight,
                defaults.purple_weight,
            ),
            ("bomb_weight", &mut self.bomb_weight, defaults.bomb_weight),
            (
                "powerup_chance",
                &mut self.powerup_chance,
                defaults.powerup_chance,
            ),
        ] {
            if !value.is_finite() || !(0.0..=1.0).contains(value) {
                log::warn!("tuning: {name} {value} outside [0,1], using {fallback}");
                *value = fallback;
            }
        }
        if self.purple_weight + self.bomb_weight > 1.0 {
            log::warn!("tuning: kind weights exceed 1.0, using defaults");
            self.purple_weight = defaults.purple_weight;
            self.bomb_weight = defaults.bomb_weight;
        }

        for (name, value, fallback) in [
            (
                "magnet_radius",
                &mut self.magnet_radius,
                defaults.magnet_radius,
            ),
            ("magnet_pull", &mut self.magnet_pull, defaults.magnet_pull),
        ] {
            if !value.is_finite() || *value <= 0.0 {
                log::warn!("tuning: {name} {value} must be positive, using {fallback}");
                *value = fallback;
            }
        }

        if self.max_entities == 0 {
            log::warn!(
                "tuning: max_entities 0 would starve the spawner, using {}",
                defaults.max_entities
            );
            self.max_entities = defaults.max_entities;
        }

        self
    }

    /// Load an override file; missing or corrupt files mean defaults.
    pub fn load(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(text) => match serde_json::from_str::<Tuning>(&text) {
                Ok(tuning) => {
                    log::info!("loaded tuning overrides from {}", path.display());
                    tuning.sanitized()
                }
                Err(err) => {
                    log::warn!("tuning file {} is corrupt ({err}), using defaults", path.display());
                    Tuning::default()
                }
            },
            Err(_) => Tuning::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_pass_sanitization_unchanged() {
        assert_eq!(Tuning::default().sanitized(), Tuning::default());
    }

    #[test]
    fn out_of_range_probabilities_fall_back() {
        let t = Tuning {
            purple_weight: -0.1,
            powerup_chance: 2.0,
            ..Default::default()
        }
        .sanitized();
        assert_eq!(t.purple_weight, Tuning::default().purple_weight);
        assert_eq!(t.powerup_chance, Tuning::default().powerup_chance);
    }

    #[test]
    fn combined_weights_over_one_fall_back() {
        let t = Tuning {
            purple_weight: 0.6,
            bomb_weight: 0.6,
            ..Default::default()
        }
        .sanitized();
        assert_eq!(t.purple_weight, Tuning::default().purple_weight);
        assert_eq!(t.bomb_weight, Tuning::default().bomb_weight);
    }

    #[test]
    fn negative_magnet_parameters_fall_back() {
        let t = Tuning {
            magnet_radius: -10.0,
            magnet_pull: 0.0,
            ..Default::default()
        }
        .sanitized();
        assert_eq!(t.magnet_radius, Tuning::default().magnet_radius);
        assert_eq!(t.magnet_pull, Tuning::default().magnet_pull);
    }

    #[test]
    fn zero_entity_cap_falls_back() {
        let t = Tuning {
            max_entities: 0,
            ..Default::default()
        }
        .sanitized();
        assert_eq!(t.max_entities, Tuning::default().max_entities);
    }

    #[test]
    fn partial_json_keeps_remaining_defaults() {
        let t: Tuning = serde_json::from_str(r#"{"bomb_weight": 0.3}"#)
            .expect("partial tuning should parse");
        assert_eq!(t.bomb_weight, 0.3);
        assert_eq!(t.max_entities, Tuning::default().max_entities);
    }
}
