//! Narrow interfaces to the collaborators the session layer does not own:
//! terrain, player, clock, audio, banners and durable storage.

use thiserror::Error;

use crate::types::Position;

/// Terrain height lookup by horizontal coordinate.
pub trait TerrainQuery {
    /// Height of the ground at (x, z), or `None` if the terrain is not
    /// available there.
    fn height_at(&self, x: f64, z: f64) -> Option<f64>;
}

impl<F> TerrainQuery for F
where
    F: Fn(f64, f64) -> Option<f64>,
{
    fn height_at(&self, x: f64, z: f64) -> Option<f64> {
        self(x, z)
    }
}

/// Read-only view of the player, polled every tick.
pub trait PlayerState {
    fn position(&self) -> Position;
    fn is_sprinting(&self) -> bool;
}

/// A plain player sample, for hosts that copy state out each frame.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PlayerSample {
    pub position: Position,
    pub sprinting: bool,
}

impl PlayerSample {
    pub fn new(position: Position, sprinting: bool) -> Self {
        Self {
            position,
            sprinting,
        }
    }
}

impl PlayerState for PlayerSample {
    fn position(&self) -> Position {
        self.position
    }

    fn is_sprinting(&self) -> bool {
        self.sprinting
    }
}

/// Monotonic session clock.
pub trait SessionClock {
    /// Seconds since the session started.
    fn elapsed(&self) -> f64;
    /// Duration of the last frame in seconds.
    fn delta(&self) -> f64;
}

/// Fire-and-forget sound triggers.
pub trait AudioNotifier {
    fn play_collect(&mut self);

    fn play_level_up(&mut self) {}

    fn play_mission_complete(&mut self) {}
}

/// On-screen banner presentation.
pub trait NotificationSink {
    fn present(&mut self, message: &str, duration_ms: u64);
}

/// Errors from a durable key-value store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to serialize record: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// Generic durable string store keyed by name.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}
