//! Headless Terrain Trek session.
//!
//! Usage: `trek-app [CONFIG.json|-] [SECONDS]`. Progression is saved under
//! `$TREK_SAVE_DIR` (default `./saves`).

use std::path::PathBuf;

use anyhow::{Context, Result};
use log::info;

use trek_app::game_loop;
use trek_app::walker::Walker;
use trek_core::types::Position;
use trek_progression::JsonFileStore;
use trek_sim::SessionConfig;

const DEFAULT_SECONDS: f64 = 120.0;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut args = std::env::args().skip(1);
    let config = match args.next() {
        Some(path) if path != "-" => SessionConfig::load(&path)
            .with_context(|| format!("failed to load session config {path}"))?,
        _ => SessionConfig::default(),
    };
    let seconds = match args.next() {
        Some(s) => s
            .parse::<f64>()
            .with_context(|| format!("invalid duration '{s}'"))?,
        None => DEFAULT_SECONDS,
    };

    let save_dir = std::env::var_os("TREK_SAVE_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("saves"));
    let terrain = game_loop::demo_terrain().context("failed to build demo terrain")?;

    let store = Box::new(JsonFileStore::new(&save_dir));
    let mut engine = game_loop::new_session(&config, &terrain, store);
    let mut walker = Walker::new(Position::ZERO);
    let snapshot = game_loop::run_headless(&mut engine, &mut walker, config.tick_rate, seconds);

    info!(
        "{:.0}s played: {}, {}/{} missions, level {}",
        snapshot.time.elapsed_secs,
        snapshot.coin_counter.label,
        snapshot.mission.completed_missions,
        snapshot.mission.total_missions,
        snapshot.stats.level
    );
    println!("{}", serde_json::to_string_pretty(&snapshot.stats)?);
    Ok(())
}
