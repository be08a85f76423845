//! Session engine: the per-frame orchestration of the gameplay layer.
//!
//! `SessionEngine` owns the coin field, the progression tracker and the
//! mission controller, runs them in order once per frame, forwards their
//! feedback to the injected audio and banner sinks, and produces
//! `SessionSnapshot`s. Completely headless; the host supplies the clock
//! and the player.

use log::{info, trace};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use trek_core::events::{AudioEvent, Feedback, Notification};
use trek_core::interfaces::{
    AudioNotifier, KeyValueStore, NotificationSink, PlayerState, SessionClock, TerrainQuery,
};
use trek_core::schedule::TaskQueue;
use trek_core::state::{BannerView, SessionSnapshot};
use trek_core::types::SessionTime;
use trek_missions::{MissionContext, MissionController};
use trek_progression::ProgressionTracker;

use crate::coin_field::CoinField;
use crate::config::SessionConfig;
use crate::systems;

/// The session engine. Owns all gameplay-progress state.
pub struct SessionEngine {
    coins: CoinField,
    tracker: ProgressionTracker,
    missions: MissionController,
    time: SessionTime,
    /// Feedback raised outside a tick, flushed on the next one.
    feedback: Feedback,
    banners: Vec<BannerView>,
    /// Banner ids keyed by dismissal deadline.
    banner_tasks: TaskQueue<u64>,
    next_banner_id: u64,
    audio: Box<dyn AudioNotifier>,
    notifications: Box<dyn NotificationSink>,
}

impl SessionEngine {
    /// Start a session: place the coins, load progression from `store`
    /// and activate the first mission.
    pub fn new(
        config: &SessionConfig,
        terrain: Option<&dyn TerrainQuery>,
        store: Box<dyn KeyValueStore>,
        audio: Box<dyn AudioNotifier>,
        notifications: Box<dyn NotificationSink>,
    ) -> Self {
        let mut rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };

        let mut coins = CoinField::new(config.collection_radius);
        coins.generate(&config.placement(), &mut rng, terrain);

        let tracker = ProgressionTracker::load(store);

        let mut feedback = Feedback::new();
        let mut missions = MissionController::new(config.mission_config());
        missions.start_next(
            &MissionContext {
                collected_count: Some(coins.collected_count()),
                ..Default::default()
            },
            &mut feedback,
        );

        info!(
            "Session started: {} coins, level {}, {} missions",
            coins.total(),
            tracker.state().level,
            missions.missions().len()
        );

        Self {
            coins,
            tracker,
            missions,
            time: SessionTime::default(),
            feedback,
            banners: Vec::new(),
            banner_tasks: TaskQueue::new(),
            next_banner_id: 0,
            audio,
            notifications,
        }
    }

    /// Advance the session by one frame and return the resulting snapshot.
    ///
    /// Order: coin collection and animation, stamina regulation, mission
    /// progress. A missing player skips the player-dependent steps.
    pub fn tick(
        &mut self,
        clock: &dyn SessionClock,
        player: Option<&dyn PlayerState>,
    ) -> SessionSnapshot {
        let now = clock.elapsed();
        let dt = clock.delta().max(0.0);
        self.time = SessionTime {
            frame: self.time.frame + 1,
            elapsed_secs: now,
            delta_secs: dt,
        };

        let player_pos = player.map(|p| p.position());

        self.coins
            .update(now, player_pos, &mut self.tracker, &mut self.feedback);

        if let Some(p) = player {
            self.tracker.regulate_stamina(dt, p.is_sprinting());
        }

        let ctx = MissionContext {
            now,
            dt,
            collected_count: self
                .coins
                .is_generated()
                .then(|| self.coins.collected_count()),
            player_position: player_pos,
        };
        self.missions
            .update(&ctx, &mut self.tracker, &mut self.feedback);

        let released = self.coins.sweep();
        self.expire_banners(now);
        let audio_events = self.dispatch_feedback(now);

        trace!(
            "Tick {} at {now:.3}s: {} coins collected",
            self.time.frame,
            self.coins.collected_count()
        );

        systems::snapshot::build_snapshot(
            &self.time,
            &self.coins,
            &self.missions,
            &self.tracker,
            &self.banners,
            audio_events,
            released,
        )
    }

    /// Snapshot of the current state without advancing.
    pub fn snapshot(&self) -> SessionSnapshot {
        systems::snapshot::build_snapshot(
            &self.time,
            &self.coins,
            &self.missions,
            &self.tracker,
            &self.banners,
            Vec::new(),
            Vec::new(),
        )
    }

    /// Cancel every pending deferred task and clear the banners. Nothing
    /// scheduled before this call fires afterwards.
    pub fn shutdown(&mut self) -> usize {
        let cancelled = self.missions.shutdown() + self.banner_tasks.cancel_all();
        self.banners.clear();
        info!("Session shut down, {cancelled} pending task(s) cancelled");
        cancelled
    }

    pub fn coins(&self) -> &CoinField {
        &self.coins
    }

    pub fn tracker(&self) -> &ProgressionTracker {
        &self.tracker
    }

    pub fn missions(&self) -> &MissionController {
        &self.missions
    }

    pub fn time(&self) -> SessionTime {
        self.time
    }

    pub fn banners(&self) -> &[BannerView] {
        &self.banners
    }

    /// Drop banners whose display time is over.
    fn expire_banners(&mut self, now: f64) {
        for id in self.banner_tasks.pop_due(now) {
            self.banners.retain(|b| b.id != id);
        }
    }

    /// Forward this tick's feedback to the sinks in emission order and
    /// return the audio events for the snapshot.
    fn dispatch_feedback(&mut self, now: f64) -> Vec<AudioEvent> {
        let Feedback {
            audio,
            notifications,
        } = std::mem::take(&mut self.feedback);

        for event in &audio {
            match event {
                AudioEvent::CoinCollect { .. } => self.audio.play_collect(),
                AudioEvent::LevelUp { .. } => self.audio.play_level_up(),
                AudioEvent::MissionComplete { .. } => self.audio.play_mission_complete(),
            }
        }

        for notification in notifications {
            self.notifications
                .present(&notification.message, notification.duration_ms);
            self.show_banner(notification, now);
        }

        audio
    }

    fn show_banner(&mut self, notification: Notification, now: f64) {
        let id = self.next_banner_id;
        self.next_banner_id += 1;
        self.banner_tasks
            .schedule_in(now, notification.duration_ms, id);
        self.banners.push(BannerView {
            id,
            kind: notification.kind,
            message: notification.message,
            expires_at: now + notification.duration_ms as f64 / 1000.0,
        });
    }
}
