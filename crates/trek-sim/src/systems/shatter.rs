//! Shatter animation: advances collected coins toward full disappearance.

use hecs::World;

use trek_core::components::Pickup;
use trek_core::constants::SHATTER_RATE;

/// Advance `shatter_progress` for every collected coin that has not
/// finished: `min((now - collection_time) * SHATTER_RATE, 1)`.
/// Progress never moves backwards, even if `now` does.
pub fn run(world: &mut World, now: f64) {
    for (_entity, pickup) in world.query_mut::<&mut Pickup>() {
        if !pickup.collected || pickup.shatter_progress >= 1.0 {
            continue;
        }
        let Some(collected_at) = pickup.collection_time else {
            continue;
        };
        let progress = ((now - collected_at) * SHATTER_RATE).min(1.0);
        pickup.shatter_progress = pickup.shatter_progress.max(progress);
    }
}
