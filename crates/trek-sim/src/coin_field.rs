//! Coin field: owns the pickup entities, detects collection and advances
//! their disappearance animation.

use hecs::{Entity, World};
use log::{debug, trace, warn};
use rand_chacha::ChaCha8Rng;

use trek_core::components::Pickup;
use trek_core::constants::{COIN_XP_REWARD, COLLECTION_RADIUS};
use trek_core::events::{AudioEvent, Feedback};
use trek_core::interfaces::TerrainQuery;
use trek_core::state::{CoinCounterView, CoinView};
use trek_core::types::Position;
use trek_progression::ProgressionTracker;

use crate::placement::{self, Placement};
use crate::systems;

pub struct CoinField {
    world: World,
    /// Coin entities indexed by coin id.
    index: Vec<Entity>,
    collected_count: u32,
    collection_radius: f64,
    generated: bool,
    hit_buffer: Vec<u32>,
}

impl Default for CoinField {
    fn default() -> Self {
        Self::new(COLLECTION_RADIUS)
    }
}

impl CoinField {
    /// An empty field. Call `generate` once to place the coins.
    pub fn new(collection_radius: f64) -> Self {
        Self {
            world: World::new(),
            index: Vec::new(),
            collected_count: 0,
            collection_radius,
            generated: false,
            hit_buffer: Vec::new(),
        }
    }

    /// Place the coins. Runs once; later calls are ignored.
    pub fn generate(
        &mut self,
        placement: &Placement,
        rng: &mut ChaCha8Rng,
        terrain: Option<&dyn TerrainQuery>,
    ) {
        if self.generated {
            warn!("Coin field already generated, ignoring");
            return;
        }
        if terrain.is_none() {
            debug!("No terrain available, coins placed at float height");
        }
        self.index = placement::spawn_coins(&mut self.world, placement, rng, terrain);
        self.generated = true;
        debug!("Generated {} coins", self.index.len());
    }

    /// Collect every uncollected coin within the collection radius of
    /// `player`. Returns how many were collected.
    pub fn check_collisions(
        &mut self,
        player: Position,
        now: f64,
        tracker: &mut ProgressionTracker,
        feedback: &mut Feedback,
    ) -> u32 {
        let mut hits = std::mem::take(&mut self.hit_buffer);
        systems::collection::find_in_range(&self.world, player, self.collection_radius, &mut hits);

        let mut collected = 0;
        for &id in &hits {
            if self.collect(id, now, tracker, feedback) {
                collected += 1;
            }
        }

        self.hit_buffer = hits;
        collected
    }

    /// Collect one coin: mark it, grant XP and queue the collect sound.
    /// No-op returning false if the coin is unknown or already collected.
    pub fn collect(
        &mut self,
        id: u32,
        now: f64,
        tracker: &mut ProgressionTracker,
        feedback: &mut Feedback,
    ) -> bool {
        let Some(&entity) = self.index.get(id as usize) else {
            return false;
        };
        let Ok(mut pickup) = self.world.get::<&mut Pickup>(entity) else {
            return false;
        };
        if pickup.collected {
            return false;
        }

        pickup.collected = true;
        pickup.collection_time = Some(now);
        pickup.shatter_progress = 0.0;
        drop(pickup);

        self.collected_count += 1;
        debug!(
            "Coin {id} collected at {now:.2}s ({}/{})",
            self.collected_count,
            self.total()
        );

        feedback.audio(AudioEvent::CoinCollect { coin_id: id });
        tracker.add_xp(COIN_XP_REWARD, feedback);
        true
    }

    /// Per-frame update: collect coins near the player (if any), then
    /// advance shatter animations.
    pub fn update(
        &mut self,
        now: f64,
        player: Option<Position>,
        tracker: &mut ProgressionTracker,
        feedback: &mut Feedback,
    ) {
        if !self.generated {
            trace!("Coin field not generated, skipping update");
            return;
        }
        if let Some(pos) = player {
            self.check_collisions(pos, now, tracker, feedback);
        }
        systems::shatter::run(&mut self.world, now);
    }

    /// Ids of coins whose animation finished since the last sweep.
    pub fn sweep(&mut self) -> Vec<u32> {
        systems::sweep::run(&mut self.world)
    }

    pub fn is_generated(&self) -> bool {
        self.generated
    }

    /// Coins collected this session.
    pub fn collected_count(&self) -> u32 {
        self.collected_count
    }

    pub fn total(&self) -> u32 {
        self.index.len() as u32
    }

    pub fn collection_radius(&self) -> f64 {
        self.collection_radius
    }

    /// Copy of a coin's state.
    pub fn pickup(&self, id: u32) -> Option<Pickup> {
        let entity = *self.index.get(id as usize)?;
        self.world.get::<&Pickup>(entity).ok().map(|p| *p)
    }

    pub fn position(&self, id: u32) -> Option<Position> {
        let entity = *self.index.get(id as usize)?;
        self.world.get::<&Position>(entity).ok().map(|p| *p)
    }

    /// Read-only access to the coin world.
    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn views(&self) -> Vec<CoinView> {
        systems::snapshot::build_coins(&self.world)
    }

    pub fn counter_view(&self) -> CoinCounterView {
        CoinCounterView {
            collected: self.collected_count,
            total: self.total(),
            label: format!("💰 Coins: {}", self.collected_count),
        }
    }
}
