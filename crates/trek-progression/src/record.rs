//! Durable progression record.
//!
//! Only maxima, level, xp and currency are persisted. Current health and
//! stamina always restart full.

use serde::{Deserialize, Serialize};
use log::warn;
use serde_json::{Map, Value};

use trek_core::constants::*;

/// JSON shape stored under the progression key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressionRecord {
    pub level: u32,
    pub xp: u32,
    pub xp_to_next_level: u32,
    pub total_coins: u32,
    pub max_health: f64,
    pub max_stamina: f64,
    pub speed: f64,
}

impl Default for ProgressionRecord {
    fn default() -> Self {
        Self {
            level: DEFAULT_LEVEL,
            xp: DEFAULT_XP,
            xp_to_next_level: DEFAULT_XP_TO_NEXT_LEVEL,
            total_coins: DEFAULT_TOTAL_COINS,
            max_health: DEFAULT_MAX_HEALTH,
            max_stamina: DEFAULT_MAX_STAMINA,
            speed: DEFAULT_SPEED_MULTIPLIER,
        }
    }
}

impl ProgressionRecord {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Parse a stored record. Fails only if the text is not a JSON object;
    /// inside the object every field falls back to its default on its own
    /// when missing, mistyped, out of range or zero. Counts are floored to
    /// whole numbers before the range check.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let fields: Map<String, Value> = serde_json::from_str(json)?;
        Ok(Self::from_fields(&fields))
    }

    fn from_fields(fields: &Map<String, Value>) -> Self {
        let d = Self::default();
        let level = whole_u32(fields, "level", 1)
            .filter(|l| *l <= MAX_PLAUSIBLE_LEVEL)
            .unwrap_or(d.level);
        let xp_to_next_level =
            whole_u32(fields, "xpToNextLevel", 1).unwrap_or(d.xp_to_next_level);

        // Stored xp is always below its requirement; anything else is corrupt.
        let mut xp = whole_u32(fields, "xp", 0).unwrap_or(d.xp);
        if xp >= xp_to_next_level {
            warn!("Stored xp {xp} is not below requirement {xp_to_next_level}, resetting xp");
            xp = d.xp;
        }

        Self {
            level,
            xp,
            xp_to_next_level,
            total_coins: whole_u32(fields, "totalCoins", 0).unwrap_or(d.total_coins),
            max_health: positive_f64(fields, "maxHealth").unwrap_or(d.max_health),
            max_stamina: positive_f64(fields, "maxStamina").unwrap_or(d.max_stamina),
            speed: positive_f64(fields, "speed").unwrap_or(d.speed),
        }
    }
}

fn positive_f64(fields: &Map<String, Value>, key: &str) -> Option<f64> {
    fields
        .get(key)?
        .as_f64()
        .filter(|n| n.is_finite() && *n > 0.0)
}

/// Floored whole number in `min..=u32::MAX`. Values outside that range are
/// rejected rather than clamped.
fn whole_u32(fields: &Map<String, Value>, key: &str, min: u32) -> Option<u32> {
    let n = fields.get(key)?.as_f64()?.floor();
    let in_range = n.is_finite() && n >= min as f64 && n <= u32::MAX as f64;
    if !in_range {
        warn!("Stored {key} out of range ({n}), using default");
        return None;
    }
    Some(n as u32)
}
