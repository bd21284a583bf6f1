//! Profile persistence with atomic replace and backup rotation
//!
//! Every write goes tmp → save, with the old save rotated to backup first,
//! so an interrupted write can never leave a half-written record. Loads walk
//! a recovery ladder: primary file, then backup, then defaults. A load never
//! fails - corrupt or missing data costs history, not a crash.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::settings::Settings;
use crate::stats::StatisticsRecord;

/// High score file - a single integer, human-readable
const HIGHSCORE_FILE: &str = "highscore.txt";
const SETTINGS_FILE: &str = "settings.json";
const STATISTICS_FILE: &str = "statistics.json";

/// Durable storage for everything that outlives a session
#[derive(Debug, Clone)]
pub struct ProfileStore {
    dir: PathBuf,
}

impl ProfileStore {
    /// Open (creating if needed) the profile directory
    pub fn open(dir: impl Into<PathBuf>) -> io::Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Persisted high score; missing or corrupt means 0, never an error
    pub fn load_high_score(&self) -> u64 {
        self.load_with_backup(HIGHSCORE_FILE, |text| text.trim().parse::<u64>().ok())
            .unwrap_or_else(|| {
                log::info!("no high score on disk, starting at 0");
                0
            })
    }

    pub fn save_high_score(&self, score: u64) -> io::Result<()> {
        self.write_atomic(HIGHSCORE_FILE, score.to_string().as_bytes())?;
        log::info!("high score saved: {score}");
        Ok(())
    }

    pub fn load_settings(&self) -> Settings {
        self.load_with_backup(SETTINGS_FILE, |text| {
            serde_json::from_str::<Settings>(text).ok()
        })
        .map(Settings::sanitized)
        .unwrap_or_else(|| {
            log::info!("using default settings");
            Settings::default()
        })
    }

    pub fn save_settings(&self, settings: &Settings) -> io::Result<()> {
        let json = serde_json::to_string_pretty(settings).map_err(io::Error::other)?;
        self.write_atomic(SETTINGS_FILE, json.as_bytes())?;
        log::info!("settings saved");
        Ok(())
    }

    pub fn load_statistics(&self) -> StatisticsRecord {
        self.load_with_backup(STATISTICS_FILE, |text| {
            serde_json::from_str::<StatisticsRecord>(text).ok()
        })
        .unwrap_or_else(|| {
            log::info!("no statistics on disk, starting fresh");
            StatisticsRecord::default()
        })
    }

    pub fn save_statistics(&self, stats: &StatisticsRecord) -> io::Result<()> {
        let json = serde_json::to_string_pretty(stats).map_err(io::Error::other)?;
        self.write_atomic(STATISTICS_FILE, json.as_bytes())?;
        log::info!("statistics saved ({} games)", stats.games_played);
        Ok(())
    }

    /// Try the primary file, then its backup. `parse` returning `None`
    /// marks the file corrupt.
    fn load_with_backup<T>(&self, name: &str, parse: impl Fn(&str) -> Option<T>) -> Option<T> {
        let primary = self.dir.join(name);
        if let Ok(text) = fs::read_to_string(&primary) {
            if let Some(value) = parse(&text) {
                return Some(value);
            }
            log::warn!("{name} is corrupt, trying backup");
        }

        let backup = backup_path(&primary);
        if let Ok(text) = fs::read_to_string(&backup) {
            if let Some(value) = parse(&text) {
                log::warn!("recovered {name} from backup");
                return Some(value);
            }
            log::warn!("backup of {name} is corrupt too");
        }
        None
    }

    /// Atomic write-and-replace: tmp → save, old save → backup.
    fn write_atomic(&self, name: &str, bytes: &[u8]) -> io::Result<()> {
        let target = self.dir.join(name);
        let tmp = self.dir.join(format!("{name}.tmp"));

        fs::write(&tmp, bytes)?;
        if target.exists() {
            // Rotation is best-effort; a stale backup beats a failed save
            let _ = fs::rename(&target, backup_path(&target));
        }
        fs::rename(&tmp, &target).inspect_err(|_| {
            let _ = fs::remove_file(&tmp);
        })
    }
}

fn backup_path(path: &Path) -> PathBuf {
    let mut os = path.as_os_str().to_owned();
    os.push(".bak");
    PathBuf::from(os)
}
