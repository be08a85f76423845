//! Fundamental geometric and timing types.

use serde::{Deserialize, Serialize};

use crate::interfaces::SessionClock;

/// World-space position. x and z are horizontal, y is up.
pub type Position = glam::DVec3;

/// Reward granted when a mission completes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reward {
    pub xp: u32,
    pub coins: u32,
}

impl Reward {
    pub const fn new(xp: u32, coins: u32) -> Self {
        Self { xp, coins }
    }
}

/// Session time tracking, advanced once per frame by the host loop.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionTime {
    /// Frames advanced since the session started.
    pub frame: u64,
    /// Elapsed session time in seconds.
    pub elapsed_secs: f64,
    /// Duration of the last frame in seconds.
    pub delta_secs: f64,
}

impl SessionTime {
    /// Advance by one frame of `dt` seconds. Negative deltas are treated as zero.
    pub fn advance(&mut self, dt: f64) {
        let dt = dt.max(0.0);
        self.frame += 1;
        self.delta_secs = dt;
        self.elapsed_secs += dt;
    }
}

impl SessionClock for SessionTime {
    fn elapsed(&self) -> f64 {
        self.elapsed_secs
    }

    fn delta(&self) -> f64 {
        self.delta_secs
    }
}
