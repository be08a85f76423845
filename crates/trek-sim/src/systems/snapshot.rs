//! Snapshot system: collects the session's visible state into a
//! `SessionSnapshot`.
//!
//! This system is read-only. It never modifies the world.

use hecs::World;

use trek_core::components::Pickup;
use trek_core::events::AudioEvent;
use trek_core::state::*;
use trek_core::types::{Position, SessionTime};
use trek_missions::MissionController;
use trek_progression::ProgressionTracker;

use crate::coin_field::CoinField;

/// Build a complete snapshot from the current session state.
pub fn build_snapshot(
    time: &SessionTime,
    coins: &CoinField,
    missions: &MissionController,
    tracker: &ProgressionTracker,
    banners: &[BannerView],
    audio_events: Vec<AudioEvent>,
    released_coins: Vec<u32>,
) -> SessionSnapshot {
    SessionSnapshot {
        time: *time,
        coins: coins.views(),
        coin_counter: coins.counter_view(),
        mission: missions.panel_view(time.elapsed_secs),
        stats: tracker.stats_view(),
        banners: banners.to_vec(),
        audio_events,
        released_coins,
    }
}

/// Build CoinView list from all pickup entities, in id order.
pub fn build_coins(world: &World) -> Vec<CoinView> {
    let mut coins: Vec<CoinView> = world
        .query::<(&Pickup, &Position)>()
        .iter()
        .map(|(_, (pickup, pos))| CoinView {
            id: pickup.id,
            position: *pos,
            collected: pickup.collected,
            shatter_progress: pickup.shatter_progress,
        })
        .collect();
    coins.sort_by_key(|c| c.id);
    coins
}
