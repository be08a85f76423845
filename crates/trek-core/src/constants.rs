//! Gameplay constants and tuning parameters.

/// Default driver tick rate (Hz).
pub const TICK_RATE: u32 = 60;

// --- Pickups ---

/// Number of coins placed around the origin at session start.
pub const COIN_COUNT: u32 = 20;

/// Minimum horizontal distance of a coin from the origin.
pub const COIN_INNER_RADIUS: f64 = 10.0;

/// Random extra distance added on top of the inner radius.
pub const COIN_SPREAD_RADIUS: f64 = 50.0;

/// Height at which coins float above the sampled terrain.
pub const COIN_FLOAT_HEIGHT: f64 = 2.0;

/// Player-to-coin distance below which a coin is collected.
pub const COLLECTION_RADIUS: f64 = 2.0;

/// XP granted for every collected coin.
pub const COIN_XP_REWARD: u32 = 10;

/// Shatter progress gained per second after collection (0.5 s animation).
pub const SHATTER_RATE: f64 = 2.0;

// --- Missions ---

/// Delay between completing a mission and activating the next one.
pub const MISSION_ADVANCE_DELAY_MS: u64 = 2000;

/// Display time of the mission-complete banner.
pub const MISSION_COMPLETE_BANNER_MS: u64 = 2000;

/// Display time of the all-missions-complete banner.
pub const ALL_COMPLETE_BANNER_MS: u64 = 3000;

/// Speed mission time window in seconds.
pub const SPEED_MISSION_TIME_LIMIT: f64 = 30.0;

// --- Progression ---

/// Key of the durable progression record.
pub const PROGRESSION_STORAGE_KEY: &str = "terrain-trek-progression";

pub const DEFAULT_LEVEL: u32 = 1;
pub const DEFAULT_XP: u32 = 0;
pub const DEFAULT_XP_TO_NEXT_LEVEL: u32 = 100;
pub const DEFAULT_TOTAL_COINS: u32 = 0;
pub const DEFAULT_MAX_HEALTH: f64 = 100.0;
pub const DEFAULT_MAX_STAMINA: f64 = 100.0;
pub const DEFAULT_SPEED_MULTIPLIER: f64 = 1.0;

/// Multiplier applied to the XP requirement on every level-up (floored).
pub const LEVEL_XP_GROWTH: f64 = 1.5;

/// Highest level a stored record may claim. Anything above is treated
/// as corrupt and falls back to the default.
pub const MAX_PLAUSIBLE_LEVEL: u32 = 1000;

/// Max health gained per level.
pub const LEVEL_HEALTH_BONUS: f64 = 10.0;

/// Max stamina gained per level.
pub const LEVEL_STAMINA_BONUS: f64 = 5.0;

/// Speed multiplier gained per level.
pub const LEVEL_SPEED_BONUS: f64 = 0.05;

/// Bonus line shown on the level-up banner.
pub const LEVEL_UP_BONUS_TEXT: &str = "+10 Max Health | +5 Max Stamina | +5% Speed";

/// Display time of the level-up banner.
pub const LEVEL_UP_BANNER_MS: u64 = 2500;

/// Stamina drained per second while sprinting.
pub const STAMINA_DRAIN_RATE: f64 = 20.0;

/// Stamina regenerated per second while not sprinting.
pub const STAMINA_REGEN_RATE: f64 = 15.0;
