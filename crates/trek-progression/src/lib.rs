//! Character progression for Terrain Trek.
//!
//! Level/xp/currency/health/stamina/speed tracking, the leveling formula,
//! stamina regulation, and the durable record that survives reloads.

pub mod record;
pub mod storage;
pub mod tracker;

pub use trek_core as core;
pub use record::ProgressionRecord;
pub use storage::{JsonFileStore, MemoryStore};
pub use tracker::{ProgressionState, ProgressionTracker};
