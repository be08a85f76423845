//! Session snapshot: the complete visible state handed to the presentation
//! layer after each tick.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::events::AudioEvent;
use crate::types::{Position, SessionTime};

/// Complete session state produced after each tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub time: SessionTime,
    pub coins: Vec<CoinView>,
    pub coin_counter: CoinCounterView,
    pub mission: MissionPanelView,
    pub stats: StatsView,
    pub banners: Vec<BannerView>,
    pub audio_events: Vec<AudioEvent>,
    /// Coins whose shatter animation finished this tick; the presentation
    /// layer may drop their meshes.
    pub released_coins: Vec<u32>,
}

/// A coin as seen by the renderer.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CoinView {
    pub id: u32,
    pub position: Position,
    pub collected: bool,
    pub shatter_progress: f64,
}

/// HUD coin counter.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CoinCounterView {
    pub collected: u32,
    pub total: u32,
    pub label: String,
}

/// Mission panel contents.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MissionPanelView {
    pub mode: ControllerMode,
    pub mission_id: Option<u32>,
    pub mission_type: Option<MissionType>,
    pub title: String,
    pub objective: String,
    /// e.g. "3 / 5" or "3 / 5 | ⏱️ 12.4s".
    pub progress_text: String,
    /// Progress in percent, capped at 100.
    pub progress_percent: f64,
    pub completed_missions: u32,
    pub total_missions: u32,
}

/// Character stats panel.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StatsView {
    pub level: u32,
    pub xp: u32,
    pub xp_to_next_level: u32,
    pub xp_percent: f64,
    pub total_coins: u32,
    pub health: f64,
    pub max_health: f64,
    pub health_percent: f64,
    pub stamina: f64,
    pub max_stamina: f64,
    pub stamina_percent: f64,
    pub speed_multiplier: f64,
}

/// A banner currently on screen.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BannerView {
    pub id: u64,
    pub kind: BannerKind,
    pub message: String,
    /// Session time at which the banner is dismissed.
    pub expires_at: f64,
}
