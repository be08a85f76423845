//! Mission data model.
//!
//! Owned by `MissionController`, not stored as ECS entities.

use serde::{Deserialize, Serialize};

use trek_core::enums::{MissionStatus, MissionType};
use trek_core::types::{Position, Reward};

/// Mission type together with its type-specific state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum MissionKind {
    Collect,
    Reach {
        /// Player position captured when the mission became active.
        start_position: Option<Position>,
    },
    Speed {
        /// Start of the current attempt (seconds).
        start_time: Option<f64>,
        /// Attempt window in seconds.
        time_limit: f64,
    },
}

impl MissionKind {
    pub fn mission_type(&self) -> MissionType {
        match self {
            MissionKind::Collect => MissionType::Collect,
            MissionKind::Reach { .. } => MissionType::Reach,
            MissionKind::Speed { .. } => MissionType::Speed,
        }
    }
}

/// One objective in the fixed mission sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mission {
    pub id: u32,
    pub kind: MissionKind,
    pub title: String,
    pub objective: String,
    /// Threshold `progress` must reach.
    pub target: f64,
    /// Type-dependent: coins or distance.
    pub progress: f64,
    pub reward: Reward,
    pub status: MissionStatus,
    /// Collected count when the current attempt began. Only read when
    /// collect progress is counted per mission.
    #[serde(default)]
    pub collect_baseline: u32,
}

impl Mission {
    pub fn new(
        id: u32,
        kind: MissionKind,
        title: &str,
        objective: &str,
        target: f64,
        reward: Reward,
    ) -> Self {
        Self {
            id,
            kind,
            title: title.to_string(),
            objective: objective.to_string(),
            target,
            progress: 0.0,
            reward,
            status: MissionStatus::NotStarted,
            collect_baseline: 0,
        }
    }

    pub fn mission_type(&self) -> MissionType {
        self.kind.mission_type()
    }

    pub fn is_completed(&self) -> bool {
        self.status == MissionStatus::Completed
    }

    pub fn is_active(&self) -> bool {
        self.status == MissionStatus::Active
    }
}
