//! Sweep system: reports fully shattered coins to the presentation layer.
//!
//! Second half of the mark-then-remove cycle. Coin entities are never
//! despawned; a coin is flagged `released` the first time it is reported
//! so the renderer drops its mesh exactly once.

use hecs::World;

use trek_core::components::Pickup;

/// Flag newly finished coins as released and return their ids in id order.
pub fn run(world: &mut World) -> Vec<u32> {
    let mut released = Vec::new();

    for (_entity, pickup) in world.query_mut::<&mut Pickup>() {
        if pickup.collected && pickup.shatter_progress >= 1.0 && !pickup.released {
            pickup.released = true;
            released.push(pickup.id);
        }
    }

    released.sort_unstable();
    released
}
