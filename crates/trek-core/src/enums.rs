//! Enumeration types used throughout the session layer.

use serde::{Deserialize, Serialize};

/// Objective category; decides how progress is computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MissionType {
    /// Reach a cumulative coin count.
    Collect,
    /// Travel a straight-line distance from where the mission started.
    Reach,
    /// Reach a coin count inside a time window, retrying on timeout.
    Speed,
}

/// Per-mission lifecycle. `Completed` is terminal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum MissionStatus {
    #[default]
    NotStarted,
    Active,
    Completed,
}

/// Controller-level mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ControllerMode {
    /// No mission is active yet, or the last one completed and the next
    /// is waiting on its presentation delay.
    #[default]
    Advancing,
    /// Exactly one mission is active.
    HasActiveMission,
    /// Every mission is completed.
    AllComplete,
}

/// How Collect/Speed missions read the coin counter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CollectProgress {
    /// Progress is the session-wide collected count, shared by all missions.
    #[default]
    Cumulative,
    /// Progress counts only coins collected since the mission started.
    PerMission,
}

/// What a banner announces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum BannerKind {
    MissionComplete { mission_id: u32 },
    AllMissionsComplete,
    LevelUp { level: u32 },
}
