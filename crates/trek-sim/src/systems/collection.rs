//! Proximity check between the player and uncollected coins.

use hecs::World;

use trek_core::components::Pickup;
use trek_core::types::Position;

/// Fill `hits` with the ids of uncollected coins strictly closer than
/// `radius` to `player`, in id order. Read-only; the caller collects them.
pub fn find_in_range(world: &World, player: Position, radius: f64, hits: &mut Vec<u32>) {
    hits.clear();

    for (_entity, (pos, pickup)) in world.query::<(&Position, &Pickup)>().iter() {
        if !pickup.collected && pos.distance(player) < radius {
            hits.push(pickup.id);
        }
    }

    hits.sort_unstable();
}
