//! ECS components for hecs entities.
//!
//! Components are plain data structs with no methods.
//! Game logic lives in systems, not components.

use serde::{Deserialize, Serialize};

/// A collectible coin. Paired with a `Position` on the same entity;
/// the position never changes after spawn.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Pickup {
    /// Stable id assigned at generation (generation index).
    pub id: u32,
    /// One-way: once true it never resets.
    pub collected: bool,
    /// Session time of collection, set once.
    pub collection_time: Option<f64>,
    /// Disappearance animation progress in [0, 1].
    pub shatter_progress: f64,
    /// Whether the sweep has already reported this coin as fully shattered.
    #[serde(default)]
    pub released: bool,
}
