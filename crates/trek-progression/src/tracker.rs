//! Progression tracker: leveling, currency, stamina, persistence.

use log::{info, warn};

use trek_core::constants::*;
use trek_core::enums::BannerKind;
use trek_core::events::{AudioEvent, Feedback};
use trek_core::interfaces::{KeyValueStore, StoreError};
use trek_core::state::StatsView;

use crate::record::ProgressionRecord;

/// Live character progression.
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressionState {
    pub level: u32,
    /// Always below `xp_to_next_level` outside of `add_xp`.
    pub xp: u32,
    pub xp_to_next_level: u32,
    pub total_coins: u32,
    pub health: f64,
    pub max_health: f64,
    pub stamina: f64,
    pub max_stamina: f64,
    pub speed_multiplier: f64,
}

impl Default for ProgressionState {
    fn default() -> Self {
        Self::from_record(&ProgressionRecord::default())
    }
}

impl ProgressionState {
    /// Health and stamina start at the restored maxima.
    pub fn from_record(record: &ProgressionRecord) -> Self {
        Self {
            level: record.level,
            xp: record.xp,
            xp_to_next_level: record.xp_to_next_level,
            total_coins: record.total_coins,
            health: record.max_health,
            max_health: record.max_health,
            stamina: record.max_stamina,
            max_stamina: record.max_stamina,
            speed_multiplier: record.speed,
        }
    }

    pub fn to_record(&self) -> ProgressionRecord {
        ProgressionRecord {
            level: self.level,
            xp: self.xp,
            xp_to_next_level: self.xp_to_next_level,
            total_coins: self.total_coins,
            max_health: self.max_health,
            max_stamina: self.max_stamina,
            speed: self.speed_multiplier,
        }
    }
}

/// Owns the progression state and writes it back to durable storage
/// after every change to a persisted field.
pub struct ProgressionTracker {
    state: ProgressionState,
    store: Box<dyn KeyValueStore>,
    key: String,
}

impl ProgressionTracker {
    /// Restore progression from `store` under the default key.
    pub fn load(store: Box<dyn KeyValueStore>) -> Self {
        Self::load_with_key(store, PROGRESSION_STORAGE_KEY)
    }

    /// Restore progression from `store` under `key`.
    pub fn load_with_key(store: Box<dyn KeyValueStore>, key: &str) -> Self {
        let mut tracker = Self {
            state: ProgressionState::default(),
            store,
            key: key.to_string(),
        };
        tracker.reload();
        tracker
    }

    /// Re-read the durable record, replacing the live state. Missing or
    /// corrupt data falls back to defaults and never fails.
    pub fn reload(&mut self) {
        let record = match self.store.get(&self.key) {
            Ok(Some(json)) => match ProgressionRecord::from_json(&json) {
                Ok(record) => record,
                Err(e) => {
                    warn!("Failed to parse progression record '{}': {e}", self.key);
                    ProgressionRecord::default()
                }
            },
            Ok(None) => {
                warn!("No progression record under '{}', using defaults", self.key);
                ProgressionRecord::default()
            }
            Err(e) => {
                warn!("Failed to load progression '{}': {e}", self.key);
                ProgressionRecord::default()
            }
        };
        self.state = ProgressionState::from_record(&record);
    }

    /// Persist the durable fields. Failures are logged, not returned.
    pub fn save(&mut self) {
        if let Err(e) = self.save_checked() {
            warn!("Failed to save progression '{}': {e}", self.key);
        }
    }

    /// Persist the durable fields, reporting failure to the caller.
    pub fn save_checked(&mut self) -> Result<(), StoreError> {
        let json = self.state.to_record().to_json()?;
        self.store.set(&self.key, &json)
    }

    /// Add xp and roll every whole level it covers. The requirement grows
    /// on every level, so even `u32::MAX` xp settles within a few dozen
    /// iterations.
    pub fn add_xp(&mut self, amount: u32, feedback: &mut Feedback) {
        self.state.xp = self.state.xp.saturating_add(amount);

        while self.state.xp >= self.state.xp_to_next_level {
            self.state.xp -= self.state.xp_to_next_level;
            self.level_up(feedback);
        }

        self.save();
    }

    /// Gain one level: raise the xp requirement, maxima and speed, refill
    /// health and stamina.
    pub fn level_up(&mut self, feedback: &mut Feedback) {
        let s = &mut self.state;
        s.level = s.level.saturating_add(1);
        // The requirement must grow, or the add_xp loop could spin on a
        // requirement of 1 (floor(1 * 1.5) == 1).
        let grown = (s.xp_to_next_level as f64 * LEVEL_XP_GROWTH).floor() as u32;
        s.xp_to_next_level = grown.max(s.xp_to_next_level.saturating_add(1));

        s.max_health += LEVEL_HEALTH_BONUS;
        s.health = s.max_health;
        s.max_stamina += LEVEL_STAMINA_BONUS;
        s.stamina = s.max_stamina;
        s.speed_multiplier += LEVEL_SPEED_BONUS;

        let level = s.level;
        info!("Level up: now level {level}, next at {} xp", s.xp_to_next_level);
        feedback.audio(AudioEvent::LevelUp { level });
        feedback.notify(
            BannerKind::LevelUp { level },
            format!("⬆️ LEVEL UP! ⬆️\n{level}\n{LEVEL_UP_BONUS_TEXT}"),
            LEVEL_UP_BANNER_MS,
        );

        self.save();
    }

    pub fn add_coins(&mut self, amount: u32) {
        self.state.total_coins = self.state.total_coins.saturating_add(amount);
        self.save();
    }

    /// Drain stamina while sprinting, regenerate it otherwise.
    pub fn regulate_stamina(&mut self, dt: f64, sprinting: bool) {
        let s = &mut self.state;
        if sprinting && s.stamina > 0.0 {
            s.stamina = (s.stamina - STAMINA_DRAIN_RATE * dt).max(0.0);
        } else if !sprinting && s.stamina < s.max_stamina {
            s.stamina = (s.stamina + STAMINA_REGEN_RATE * dt).min(s.max_stamina);
        }
    }

    pub fn state(&self) -> &ProgressionState {
        &self.state
    }

    /// Give the store back, e.g. to reopen it in a fresh tracker.
    pub fn into_store(self) -> Box<dyn KeyValueStore> {
        self.store
    }

    pub fn stats_view(&self) -> StatsView {
        let s = &self.state;
        StatsView {
            level: s.level,
            xp: s.xp,
            xp_to_next_level: s.xp_to_next_level,
            xp_percent: percent(s.xp as f64, s.xp_to_next_level as f64),
            total_coins: s.total_coins,
            health: s.health,
            max_health: s.max_health,
            health_percent: percent(s.health, s.max_health),
            stamina: s.stamina,
            max_stamina: s.max_stamina,
            stamina_percent: percent(s.stamina, s.max_stamina),
            speed_multiplier: s.speed_multiplier,
        }
    }
}

fn percent(value: f64, max: f64) -> f64 {
    if max > 0.0 {
        (value / max * 100.0).clamp(0.0, 100.0)
    } else {
        0.0
    }
}
