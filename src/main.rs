//! Falling Frenzy entry point
//!
//! Headless demo driver: loads the profile, runs an autopilot session at a
//! 60 Hz target with measured delta time, and persists statistics and the
//! high score at the session boundary. Rendering and audio attach to the
//! per-tick snapshot; this binary just logs the events they would consume.

use std::env;
use std::path::PathBuf;
use std::thread;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use falling_frenzy::Tuning;
use falling_frenzy::consts::*;
use falling_frenzy::persistence::ProfileStore;
use falling_frenzy::sim::{GameEvent, GamePhase, GameState, TickInput, tick};
use falling_frenzy::stats::StatisticsRecord;

/// Demo session length cap in seconds (counts as an explicit quit)
const DEMO_SESSION_LIMIT: f32 = 120.0;

fn main() {
    env_logger::init();

    let seed = env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or_else(default_seed);
    let data_dir = env::var_os("FALLING_FRENZY_DATA")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("data"));

    let store = match ProfileStore::open(&data_dir) {
        Ok(store) => Some(store),
        Err(err) => {
            log::error!(
                "cannot open profile dir {}: {err}; playing without persistence",
                data_dir.display()
            );
            None
        }
    };

    let mut stats = store
        .as_ref()
        .map(ProfileStore::load_statistics)
        .unwrap_or_default();
    let saved_high_score = store.as_ref().map(ProfileStore::load_high_score).unwrap_or(0);
    if let Some(store) = &store {
        let settings = store.load_settings();
        log::info!(
            "settings: sound {:.1} music {:.1}",
            settings.sound_volume,
            settings.music_volume
        );
    }
    let tuning = Tuning::load(&data_dir.join("tuning.json"));

    let mut state = GameState::with_profile(seed, saved_high_score, tuning);
    log::info!("session start: seed {seed}, high score to beat {saved_high_score}");

    run_session(&mut state);

    let final_score = state.score.score;
    log::info!(
        "session over: score {final_score}, best combo {}, {} caught / {} missed in {:.1}s",
        state.score.best_combo,
        state.tally.catches,
        state.tally.misses,
        state.elapsed
    );

    stats.record_session(
        final_score,
        state.score.best_combo,
        &state.tally,
        state.elapsed,
    );

    if let Some(store) = &store {
        // One retry at process exit if the boundary write failed
        if !persist(store, &stats, &state, saved_high_score) {
            thread::sleep(Duration::from_millis(250));
            persist(store, &stats, &state, saved_high_score);
        }
    }
}

/// Fixed-timestep loop: accumulate measured time, step the sim in SIM_DT
/// chunks, clamp runaway frames to MAX_SUBSTEPS.
fn run_session(state: &mut GameState) {
    let input = TickInput {
        autopilot: true,
        ..Default::default()
    };
    let frame = Duration::from_micros(16_667);
    let mut accumulator = 0.0f32;
    let mut last = Instant::now();

    loop {
        let now = Instant::now();
        let dt = (now - last).as_secs_f32().min(0.1);
        last = now;
        accumulator += dt;

        let mut substeps = 0;
        while accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            tick(state, &input, SIM_DT);
            report_events(state);
            accumulator -= SIM_DT;
            substeps += 1;
        }

        if state.phase == GamePhase::GameOver {
            break;
        }
        if state.elapsed >= DEMO_SESSION_LIMIT {
            log::info!("demo limit reached, quitting session");
            break;
        }
        thread::sleep(frame);
    }
}

/// Log the tick's one-shot events the way an audio layer would consume them
fn report_events(state: &GameState) {
    for event in &state.events {
        match event {
            GameEvent::ObjectCaught {
                kind,
                points,
                combo,
            } => {
                log::debug!("caught {kind:?} +{points} (combo {combo}, score {})", state.score.score);
            }
            GameEvent::BombCaught { penalty } => {
                log::info!("bomb caught! -{penalty} (score {})", state.score.score);
            }
            GameEvent::ObjectMissed { shielded } => {
                log::debug!("miss (shielded: {shielded}, score {})", state.score.score);
            }
            GameEvent::PowerUpActivated { kind } => {
                log::info!("power-up: {kind:?}");
            }
            GameEvent::GameOver { final_score } => {
                log::info!("game over at {final_score}");
            }
        }
    }
}

/// Write the session's records. Returns false if any write failed.
fn persist(
    store: &ProfileStore,
    stats: &StatisticsRecord,
    state: &GameState,
    saved_high_score: u64,
) -> bool {
    let mut ok = true;

    if let Err(err) = store.save_statistics(stats) {
        log::warn!("statistics write failed: {err}");
        ok = false;
    }

    if state.score.high_score > saved_high_score {
        if let Err(err) = store.save_high_score(state.score.high_score) {
            log::warn!("high score write failed: {err}");
            ok = false;
        }
    }

    ok
}

fn default_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0x5EED)
}
