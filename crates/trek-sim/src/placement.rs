//! Coin placement: a ring of pickups around the spawn point, resting a
//! fixed height above the sampled terrain.

use std::f64::consts::TAU;

use hecs::{Entity, World};
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use trek_core::components::Pickup;
use trek_core::constants::*;
use trek_core::interfaces::TerrainQuery;
use trek_core::types::Position;

/// Ring layout parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub count: u32,
    /// Minimum horizontal distance from the origin.
    pub inner_radius: f64,
    /// Width of the band beyond `inner_radius` that coins are scattered over.
    pub spread_radius: f64,
    /// Height above the ground.
    pub float_height: f64,
}

impl Default for Placement {
    fn default() -> Self {
        Self {
            count: COIN_COUNT,
            inner_radius: COIN_INNER_RADIUS,
            spread_radius: COIN_SPREAD_RADIUS,
            float_height: COIN_FLOAT_HEIGHT,
        }
    }
}

/// Position of coin `index`: evenly spaced by angle, random distance
/// within the band, height from the terrain (0 where it has none).
pub fn ring_position(
    placement: &Placement,
    index: u32,
    rng: &mut ChaCha8Rng,
    terrain: Option<&dyn TerrainQuery>,
) -> Position {
    let angle = TAU * index as f64 / placement.count as f64;
    let distance = placement.inner_radius + rng.gen::<f64>() * placement.spread_radius;
    let x = angle.cos() * distance;
    let z = angle.sin() * distance;

    let ground = terrain
        .and_then(|t| t.height_at(x, z))
        .filter(|h| h.is_finite())
        .unwrap_or(0.0);

    Position::new(x, ground + placement.float_height, z)
}

/// Spawn one `(Pickup, Position)` entity per coin. Ids follow the
/// generation index, so the returned entities are indexed by coin id.
pub fn spawn_coins(
    world: &mut World,
    placement: &Placement,
    rng: &mut ChaCha8Rng,
    terrain: Option<&dyn TerrainQuery>,
) -> Vec<Entity> {
    (0..placement.count)
        .map(|id| {
            let position = ring_position(placement, id, rng, terrain);
            world.spawn((
                Pickup {
                    id,
                    ..Default::default()
                },
                position,
            ))
        })
        .collect()
}
