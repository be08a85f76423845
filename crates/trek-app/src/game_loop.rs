//! Game loop: fixed-step headless runs and a real-time loop thread.
//!
//! The real-time engine is created inside its thread, so its boxed
//! collaborators never cross threads. Commands arrive via `mpsc`; the
//! latest snapshot is stored in shared state for polling.

use std::path::PathBuf;
use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use log::{debug, info};

use trek_core::interfaces::{KeyValueStore, PlayerSample, PlayerState, TerrainQuery};
use trek_core::state::SessionSnapshot;
use trek_core::types::SessionTime;
use trek_progression::JsonFileStore;
use trek_sim::{SessionConfig, SessionEngine};
use trek_terrain::{HeightGrid, TerrainError};

use crate::sinks::{LogAudio, LogBanners};
use crate::walker::Walker;

/// Commands sent to the real-time loop thread.
#[derive(Debug, Clone, Copy)]
pub enum LoopCommand {
    /// Replace the player sample used from the next tick on.
    SetPlayer(PlayerSample),
    /// Cancel pending work and stop the loop.
    Shutdown,
}

/// Rolling hills covering the whole coin ring.
pub fn demo_terrain() -> Result<HeightGrid, TerrainError> {
    HeightGrid::from_fn(129, 129, 1.0, |x, z| {
        ((x * 0.05).sin() * (z * 0.07).cos() * 4.0) as f32
    })
}

/// A session wired to the demo sinks.
pub fn new_session(
    config: &SessionConfig,
    terrain: &HeightGrid,
    store: Box<dyn KeyValueStore>,
) -> SessionEngine {
    SessionEngine::new(
        config,
        Some(terrain as &dyn TerrainQuery),
        store,
        Box::new(LogAudio),
        Box::new(LogBanners),
    )
}

/// Run `seconds` of simulated time in fixed steps with a scripted walker,
/// then shut the session down. Returns the last snapshot.
pub fn run_headless(
    engine: &mut SessionEngine,
    walker: &mut Walker,
    tick_rate: u32,
    seconds: f64,
) -> SessionSnapshot {
    let dt = 1.0 / tick_rate.max(1) as f64;
    let mut time = SessionTime::default();
    let mut last = engine.snapshot();
    let mut shown = last.mission.title.clone();
    info!("Mission: {} ({})", shown, last.mission.objective);

    while time.elapsed_secs < seconds {
        time.advance(dt);
        let player = walker.step(Some(&last), dt);
        last = engine.tick(&time, Some(&player));

        if last.mission.title != shown {
            shown = last.mission.title.clone();
            info!("Mission: {} ({})", shown, last.mission.objective);
        }
    }

    engine.shutdown();
    last
}

/// Spawns the real-time loop in a new thread.
///
/// Returns the command sender and the thread handle.
pub fn spawn_game_loop(
    config: SessionConfig,
    terrain: HeightGrid,
    save_dir: PathBuf,
    latest_snapshot: Arc<Mutex<Option<SessionSnapshot>>>,
) -> std::io::Result<(mpsc::Sender<LoopCommand>, JoinHandle<()>)> {
    let (cmd_tx, cmd_rx) = mpsc::channel::<LoopCommand>();

    let handle = std::thread::Builder::new()
        .name("trek-game-loop".into())
        .spawn(move || {
            let store = Box::new(JsonFileStore::new(save_dir));
            let mut engine = new_session(&config, &terrain, store);
            run_game_loop(&mut engine, config.tick_rate, cmd_rx, &latest_snapshot);
        })?;

    Ok((cmd_tx, handle))
}

/// The real-time loop. Runs until Shutdown or channel disconnect.
fn run_game_loop(
    engine: &mut SessionEngine,
    tick_rate: u32,
    cmd_rx: mpsc::Receiver<LoopCommand>,
    latest_snapshot: &Mutex<Option<SessionSnapshot>>,
) {
    let tick_duration = tick_duration(tick_rate);
    let started = Instant::now();
    let mut time = SessionTime::default();
    let mut player: Option<PlayerSample> = None;
    let mut next_tick_time = started;

    loop {
        // 1. Drain all pending commands
        loop {
            match cmd_rx.try_recv() {
                Ok(LoopCommand::SetPlayer(sample)) => player = Some(sample),
                Ok(LoopCommand::Shutdown) | Err(mpsc::TryRecvError::Disconnected) => {
                    engine.shutdown();
                    debug!("Game loop stopped after {} ticks", time.frame);
                    return;
                }
                Err(mpsc::TryRecvError::Empty) => break,
            }
        }

        // 2. Advance one frame on the wall clock
        time.advance(started.elapsed().as_secs_f64() - time.elapsed_secs);
        let snapshot = engine.tick(&time, player.as_ref().map(|p| p as &dyn PlayerState));

        // 3. Store latest snapshot for polling
        if let Ok(mut lock) = latest_snapshot.lock() {
            *lock = Some(snapshot);
        }

        // 4. Sleep until next tick
        next_tick_time += tick_duration;
        let now = Instant::now();
        if next_tick_time > now {
            std::thread::sleep(next_tick_time - now);
        } else if now - next_tick_time > tick_duration * 2 {
            // Too far behind; resync instead of catching up
            next_tick_time = now;
        }
    }
}

/// Nominal duration of one tick.
pub fn tick_duration(tick_rate: u32) -> Duration {
    Duration::from_nanos(1_000_000_000 / tick_rate.max(1) as u64)
}
