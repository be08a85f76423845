//! Mission controller: one active mission at a time, rewards on
//! completion, deferred advance to the next mission.
//!
//! Mission lifecycle: NotStarted → Active → Completed (terminal).
//! Controller: Advancing ⇄ HasActiveMission → AllComplete.

use log::{debug, info};
use serde::{Deserialize, Serialize};

use trek_core::constants::*;
use trek_core::enums::{BannerKind, CollectProgress, ControllerMode, MissionStatus};
use trek_core::events::{AudioEvent, Feedback};
use trek_core::schedule::TaskQueue;
use trek_core::state::MissionPanelView;
use trek_progression::ProgressionTracker;

use crate::catalog;
use crate::mission::{Mission, MissionKind};
use crate::progress::{self, MissionContext};

/// Deferred controller actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissionTask {
    /// Activate the first incomplete mission.
    StartNext,
}

/// Tunables for the controller.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MissionConfig {
    pub collect_progress: CollectProgress,
    /// Delay after a completion before the next mission activates.
    pub advance_delay_ms: u64,
}

impl Default for MissionConfig {
    fn default() -> Self {
        Self {
            collect_progress: CollectProgress::default(),
            advance_delay_ms: MISSION_ADVANCE_DELAY_MS,
        }
    }
}

pub struct MissionController {
    missions: Vec<Mission>,
    /// Index of the mission currently shown; stays on a just-completed
    /// mission until the advance task fires.
    current: Option<usize>,
    completed_missions: u32,
    mode: ControllerMode,
    tasks: TaskQueue<MissionTask>,
    config: MissionConfig,
}

impl MissionController {
    /// Controller over the default mission list. Call `start_next` to
    /// activate the first mission.
    pub fn new(config: MissionConfig) -> Self {
        Self::with_missions(config, catalog::default_missions())
    }

    /// Controller over a custom mission list.
    pub fn with_missions(config: MissionConfig, missions: Vec<Mission>) -> Self {
        Self {
            missions,
            current: None,
            completed_missions: 0,
            mode: ControllerMode::Advancing,
            tasks: TaskQueue::new(),
            config,
        }
    }

    /// Replace the mission list with the fixed definitions.
    pub fn generate_missions(&mut self) {
        self.missions = catalog::default_missions();
        self.current = None;
    }

    /// Activate the first incomplete mission in list order, or enter
    /// `AllComplete` if none is left.
    pub fn start_next(&mut self, ctx: &MissionContext, feedback: &mut Feedback) {
        let Some(idx) = self.missions.iter().position(|m| !m.is_completed()) else {
            self.current = None;
            if self.mode != ControllerMode::AllComplete {
                self.mode = ControllerMode::AllComplete;
                info!("All {} missions complete", self.missions.len());
                feedback.notify(
                    BannerKind::AllMissionsComplete,
                    "🎉 ALL MISSIONS COMPLETE! 🎉\nCongratulations, Explorer!",
                    ALL_COMPLETE_BANNER_MS,
                );
            }
            return;
        };

        let mission = &mut self.missions[idx];
        mission.status = MissionStatus::Active;
        mission.collect_baseline = ctx.collected_count.unwrap_or(0);
        match &mut mission.kind {
            MissionKind::Collect => {}
            MissionKind::Reach { start_position } => {
                *start_position = ctx.player_position;
            }
            MissionKind::Speed { start_time, .. } => {
                *start_time = Some(ctx.now);
                mission.progress = 0.0;
            }
        }
        info!("Mission {} started: {}", mission.id, mission.title);

        self.current = Some(idx);
        self.mode = ControllerMode::HasActiveMission;
    }

    /// Fire due deferred tasks, then recompute the active mission's
    /// progress and complete it if the target is reached.
    pub fn update(
        &mut self,
        ctx: &MissionContext,
        tracker: &mut ProgressionTracker,
        feedback: &mut Feedback,
    ) {
        for task in self.tasks.pop_due(ctx.now) {
            debug!("Mission task fired: {task:?}");
            match task {
                MissionTask::StartNext => self.start_next(ctx, feedback),
            }
        }

        let Some(idx) = self.current else {
            return;
        };
        let mission = &mut self.missions[idx];
        if mission.is_completed() {
            return;
        }

        let previous = mission.progress;
        let update = progress::evaluate(mission, ctx, self.config.collect_progress);
        mission.progress = update.progress;

        if let Some(pos) = update.captured_start {
            if let MissionKind::Reach { start_position } = &mut mission.kind {
                *start_position = Some(pos);
            }
        }
        if update.restarted {
            if let MissionKind::Speed { start_time, .. } = &mut mission.kind {
                *start_time = Some(ctx.now);
            }
            // Coins picked up on the timeout tick count toward the new attempt.
            mission.collect_baseline = match self.config.collect_progress {
                CollectProgress::PerMission => {
                    mission.collect_baseline.saturating_add(previous as u32)
                }
                CollectProgress::Cumulative => ctx.collected_count.unwrap_or(0),
            };
            debug!("Mission {} timed out, retrying", mission.id);
        }

        if update.reached {
            let id = mission.id;
            self.complete(id, ctx.now, tracker, feedback);
        }
    }

    /// Complete the active mission, grant its reward and schedule the
    /// advance to the next mission. Returns false if `mission_id` is not the
    /// active mission.
    pub fn complete(
        &mut self,
        mission_id: u32,
        now: f64,
        tracker: &mut ProgressionTracker,
        feedback: &mut Feedback,
    ) -> bool {
        let Some(idx) = self.current else {
            return false;
        };
        let mission = &mut self.missions[idx];
        if mission.id != mission_id || !mission.is_active() {
            return false;
        }

        mission.status = MissionStatus::Completed;
        self.completed_missions += 1;
        let reward = mission.reward;
        info!(
            "Mission {} complete: {} (+{} xp, +{} coins)",
            mission.id, mission.title, reward.xp, reward.coins
        );

        tracker.add_xp(reward.xp, feedback);
        tracker.add_coins(reward.coins);

        feedback.audio(AudioEvent::MissionComplete { mission_id });
        feedback.notify(
            BannerKind::MissionComplete { mission_id },
            format!(
                "🏆 MISSION COMPLETE! 🏆\n+{} XP | +{} 💰",
                reward.xp, reward.coins
            ),
            MISSION_COMPLETE_BANNER_MS,
        );

        self.mode = ControllerMode::Advancing;
        self.tasks
            .schedule_in(now, self.config.advance_delay_ms, MissionTask::StartNext);
        true
    }

    /// Cancel every pending deferred task. Returns how many were dropped.
    pub fn shutdown(&mut self) -> usize {
        let cancelled = self.tasks.cancel_all();
        if cancelled > 0 {
            info!("Mission controller shut down, {cancelled} pending task(s) cancelled");
        }
        cancelled
    }

    /// Regenerate the mission list and start over from the first mission.
    pub fn reset(&mut self, ctx: &MissionContext, feedback: &mut Feedback) {
        self.shutdown();
        self.generate_missions();
        self.completed_missions = 0;
        self.mode = ControllerMode::Advancing;
        self.start_next(ctx, feedback);
    }

    pub fn missions(&self) -> &[Mission] {
        &self.missions
    }

    /// The mission shown on the panel, which may have just completed.
    pub fn current_mission(&self) -> Option<&Mission> {
        self.current.map(|idx| &self.missions[idx])
    }

    /// The mission in the `Active` state, if any.
    pub fn active_mission(&self) -> Option<&Mission> {
        self.current_mission().filter(|m| m.is_active())
    }

    pub fn mode(&self) -> ControllerMode {
        self.mode
    }

    pub fn completed_missions(&self) -> u32 {
        self.completed_missions
    }

    pub fn pending_tasks(&self) -> usize {
        self.tasks.len()
    }

    pub fn config(&self) -> &MissionConfig {
        &self.config
    }

    /// Build the mission panel contents for the presentation layer.
    pub fn panel_view(&self, now: f64) -> MissionPanelView {
        let mut view = MissionPanelView {
            mode: self.mode,
            completed_missions: self.completed_missions,
            total_missions: self.missions.len() as u32,
            ..Default::default()
        };

        if self.mode == ControllerMode::AllComplete {
            view.title = "All Missions Complete!".to_string();
            view.objective = "You are a true explorer!".to_string();
            view.progress_percent = 100.0;
            return view;
        }

        let Some(m) = self.current_mission() else {
            view.title = "No Active Mission".to_string();
            return view;
        };

        view.mission_id = Some(m.id);
        view.mission_type = Some(m.mission_type());
        view.title = m.title.clone();
        view.objective = m.objective.clone();
        view.progress_text = format!("{} / {}", m.progress.floor(), m.target);
        if let MissionKind::Speed {
            start_time: Some(start),
            time_limit,
        } = &m.kind
        {
            let remaining = (*time_limit - (now - *start)).max(0.0);
            view.progress_text.push_str(&format!(" | ⏱️ {remaining:.1}s"));
        }
        view.progress_percent = if m.target > 0.0 {
            (m.progress / m.target * 100.0).min(100.0)
        } else {
            100.0
        };
        view
    }
}
