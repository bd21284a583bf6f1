//! Game settings and preferences
//!
//! Persisted separately from statistics. The simulation core never writes
//! this record - only the (external) settings UI does - but it must tolerate
//! a missing or corrupt file by falling back to these defaults.

use serde::{Deserialize, Serialize};

/// User preferences persisted as `settings.json`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Sound effects volume (0.0 - 1.0)
    pub sound_volume: f32,
    /// Music volume (0.0 - 1.0)
    pub music_volume: f32,
    /// Show FPS counter
    pub show_fps: bool,
    /// Particle effects on catches
    pub particles_enabled: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            sound_volume: 0.7,
            music_volume: 0.5,
            show_fps: false,
            particles_enabled: true,
        }
    }
}

impl Settings {
    /// Clamp out-of-range values back into contract bounds.
    ///
    /// Hand-edited files show up here; a volume of 3.0 becomes 1.0 with a
    /// warning rather than a rejected record.
    pub fn sanitized(mut self) -> Self {
        for (name, volume) in [
            ("sound_volume", &mut self.sound_volume),
            ("music_volume", &mut self.music_volume),
        ] {
            if !volume.is_finite() {
                log::warn!("settings: {name} is not a number, using 0.0");
                *volume = 0.0;
            } else if *volume < 0.0 || *volume > 1.0 {
                let clamped = volume.clamp(0.0, 1.0);
                log::warn!("settings: {name} {volume} outside [0,1], clamping to {clamped}");
                *volume = clamped;
            }
        }
        self
    }
}
