//! Per-type progress evaluation.
//!
//! Pure functions that compute a mission's new progress from the current
//! tick's inputs. No controller state is touched here.

use trek_core::enums::CollectProgress;
use trek_core::types::Position;

use crate::mission::{Mission, MissionKind};

/// Inputs for one controller tick.
#[derive(Debug, Clone, Copy, Default)]
pub struct MissionContext {
    /// Session time in seconds.
    pub now: f64,
    /// Last frame duration in seconds.
    pub dt: f64,
    /// Session-wide collected coin count, if a coin field exists.
    pub collected_count: Option<u32>,
    /// Current player position, if a player exists.
    pub player_position: Option<Position>,
}

/// Result of evaluating one mission.
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressUpdate {
    pub progress: f64,
    /// Reach start position captured late because no player existed at start.
    pub captured_start: Option<Position>,
    /// Speed attempt timed out and restarts at `now`.
    pub restarted: bool,
    pub reached: bool,
}

/// Evaluate a mission's progress for this tick.
pub fn evaluate(mission: &Mission, ctx: &MissionContext, mode: CollectProgress) -> ProgressUpdate {
    let mut update = ProgressUpdate {
        progress: mission.progress,
        captured_start: None,
        restarted: false,
        reached: false,
    };

    match &mission.kind {
        MissionKind::Collect => {
            if let Some(count) = ctx.collected_count {
                update.progress = counted(count, mission.collect_baseline, mode);
            }
        }
        MissionKind::Reach { start_position } => match (start_position, ctx.player_position) {
            (Some(start), Some(pos)) => update.progress = pos.distance(*start),
            (None, Some(pos)) => {
                update.captured_start = Some(pos);
                update.progress = 0.0;
            }
            (_, None) => {}
        },
        MissionKind::Speed {
            start_time,
            time_limit,
        } => {
            if let Some(count) = ctx.collected_count {
                let elapsed = ctx.now - start_time.unwrap_or(ctx.now);
                // Judged against the progress recorded before this tick, so
                // coins landing after the window closed do not rescue it. The
                // controller carries those coins into the retry.
                if elapsed > *time_limit && mission.progress < mission.target {
                    update.progress = 0.0;
                    update.restarted = true;
                } else {
                    update.progress = counted(count, mission.collect_baseline, mode);
                }
            }
        }
    }

    update.reached = !update.restarted && update.progress >= mission.target;
    update
}

/// Coin progress under the configured counting mode.
pub fn counted(count: u32, baseline: u32, mode: CollectProgress) -> f64 {
    match mode {
        CollectProgress::Cumulative => count as f64,
        CollectProgress::PerMission => count.saturating_sub(baseline) as f64,
    }
}
