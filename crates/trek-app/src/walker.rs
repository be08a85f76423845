//! Scripted player for headless runs.
//!
//! Heads for the nearest uncollected coin in the last snapshot, sprinting
//! in short bursts while stamina allows. With no coins left it walks
//! straight out from the spawn point.

use trek_core::interfaces::PlayerSample;
use trek_core::state::SessionSnapshot;
use trek_core::types::Position;

/// Base walking speed in meters per second.
pub const WALK_SPEED: f64 = 6.0;
/// Speed factor while sprinting.
pub const SPRINT_FACTOR: f64 = 1.6;
/// Length of one sprint-then-walk cycle in seconds.
const BURST_PERIOD: f64 = 5.0;
/// Seconds of each cycle spent sprinting.
const BURST_LENGTH: f64 = 2.0;
/// Sprint only while stamina is above this percentage.
const MIN_SPRINT_STAMINA: f64 = 25.0;

#[derive(Debug, Clone)]
pub struct Walker {
    position: Position,
    clock: f64,
    sprinting: bool,
}

impl Walker {
    pub fn new(start: Position) -> Self {
        Self {
            position: start,
            clock: 0.0,
            sprinting: false,
        }
    }

    pub fn position(&self) -> Position {
        self.position
    }

    /// Move for `dt` seconds given the last snapshot and return the
    /// player sample for the next tick.
    pub fn step(&mut self, last: Option<&SessionSnapshot>, dt: f64) -> PlayerSample {
        self.clock += dt;

        let (speed_multiplier, stamina_percent) = last
            .map(|s| (s.stats.speed_multiplier, s.stats.stamina_percent))
            .unwrap_or((1.0, 100.0));
        let in_burst = self.clock % BURST_PERIOD < BURST_LENGTH;
        self.sprinting = in_burst && stamina_percent > MIN_SPRINT_STAMINA;

        let mut speed = WALK_SPEED * speed_multiplier;
        if self.sprinting {
            speed *= SPRINT_FACTOR;
        }
        let reach = speed * dt;

        match last.and_then(|s| nearest_coin(s, self.position)) {
            Some(target) => {
                let to_target = target - self.position;
                let distance = to_target.length();
                if distance <= reach {
                    self.position = target;
                } else {
                    self.position += to_target / distance * reach;
                }
            }
            None => {
                let outward = Position::new(self.position.x, 0.0, self.position.z)
                    .try_normalize()
                    .unwrap_or(Position::Z);
                self.position += outward * reach;
            }
        }

        PlayerSample::new(self.position, self.sprinting)
    }
}

/// Closest uncollected coin to `from`.
fn nearest_coin(snapshot: &SessionSnapshot, from: Position) -> Option<Position> {
    snapshot
        .coins
        .iter()
        .filter(|c| !c.collected)
        .map(|c| c.position)
        .min_by(|a, b| a.distance_squared(from).total_cmp(&b.distance_squared(from)))
}
