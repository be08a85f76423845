//! The fixed, ordered mission list.

use trek_core::constants::SPEED_MISSION_TIME_LIMIT;
use trek_core::types::Reward;

use crate::mission::{Mission, MissionKind};

/// Build the mission sequence. Order defines objective sequencing.
pub fn default_missions() -> Vec<Mission> {
    vec![
        Mission::new(
            1,
            MissionKind::Collect,
            "Coin Collector",
            "Collect 5 coins",
            5.0,
            Reward::new(100, 10),
        ),
        Mission::new(
            2,
            MissionKind::Collect,
            "Treasure Hunter",
            "Collect 10 coins",
            10.0,
            Reward::new(250, 25),
        ),
        Mission::new(
            3,
            MissionKind::Reach {
                start_position: None,
            },
            "Explorer",
            "Travel 100 meters from spawn",
            100.0,
            Reward::new(150, 15),
        ),
        Mission::new(
            4,
            MissionKind::Collect,
            "Gold Rush",
            "Collect all 20 coins",
            20.0,
            Reward::new(500, 100),
        ),
        Mission::new(
            5,
            MissionKind::Speed {
                start_time: None,
                time_limit: SPEED_MISSION_TIME_LIMIT,
            },
            "Speed Demon",
            "Collect 5 coins in 30 seconds",
            5.0,
            Reward::new(300, 50),
        ),
    ]
}
