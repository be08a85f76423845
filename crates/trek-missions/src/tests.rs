//! Tests for mission sequencing, per-type progress and deferred advance.

use trek_core::constants::*;
use trek_core::enums::{BannerKind, CollectProgress, ControllerMode, MissionStatus, MissionType};
use trek_core::events::{AudioEvent, Feedback};
use trek_core::types::Position;
use trek_progression::{MemoryStore, ProgressionTracker};

use crate::catalog::default_missions;
use crate::controller::{MissionConfig, MissionController};
use crate::mission::{Mission, MissionKind};
use crate::progress::MissionContext;

fn ctx(now: f64, collected: u32) -> MissionContext {
    MissionContext {
        now,
        dt: 1.0 / 60.0,
        collected_count: Some(collected),
        player_position: Some(Position::ZERO),
    }
}

fn ctx_at(now: f64, collected: u32, pos: Position) -> MissionContext {
    MissionContext {
        player_position: Some(pos),
        ..ctx(now, collected)
    }
}

fn tracker() -> ProgressionTracker {
    ProgressionTracker::load(Box::new(MemoryStore::new()))
}

fn catalog_mission(id: u32) -> Mission {
    default_missions()
        .into_iter()
        .find(|m| m.id == id)
        .expect("mission in catalog")
}

fn started(missions: Vec<Mission>, start: &MissionContext) -> MissionController {
    let mut controller = MissionController::with_missions(MissionConfig::default(), missions);
    controller.start_next(start, &mut Feedback::new());
    controller
}

fn speed_start_time(controller: &MissionController) -> Option<f64> {
    match controller.current_mission()?.kind {
        MissionKind::Speed { start_time, .. } => start_time,
        _ => None,
    }
}

// ---- Catalog ----

#[test]
fn test_catalog_order_and_thresholds() {
    let missions = default_missions();
    let summary: Vec<(u32, MissionType, f64, u32, u32)> = missions
        .iter()
        .map(|m| (m.id, m.mission_type(), m.target, m.reward.xp, m.reward.coins))
        .collect();
    assert_eq!(
        summary,
        vec![
            (1, MissionType::Collect, 5.0, 100, 10),
            (2, MissionType::Collect, 10.0, 250, 25),
            (3, MissionType::Reach, 100.0, 150, 15),
            (4, MissionType::Collect, 20.0, 500, 100),
            (5, MissionType::Speed, 5.0, 300, 50),
        ]
    );
    assert!(missions.iter().all(|m| m.status == MissionStatus::NotStarted));
    assert!(matches!(
        missions[4].kind,
        MissionKind::Speed { time_limit, .. } if time_limit == 30.0
    ));
}

#[test]
fn test_mission_kind_serde_tag() {
    let json = serde_json::to_string(&MissionKind::Collect).unwrap();
    assert_eq!(json, r#"{"type":"collect"}"#);
    let back: Mission = serde_json::from_str(&serde_json::to_string(&catalog_mission(3)).unwrap()).unwrap();
    assert_eq!(back, catalog_mission(3));
}

// ---- Sequencing ----

#[test]
fn test_start_next_activates_first_mission() {
    let controller = started(default_missions(), &ctx(0.0, 0));
    assert_eq!(controller.mode(), ControllerMode::HasActiveMission);
    let active = controller.active_mission().unwrap();
    assert_eq!(active.id, 1);
    assert_eq!(active.status, MissionStatus::Active);
    assert_eq!(
        controller.missions().iter().filter(|m| m.is_active()).count(),
        1,
        "exactly one mission is active"
    );
}

#[test]
fn test_collect_completion_grants_reward() {
    let mut controller = started(default_missions(), &ctx(0.0, 0));
    let mut tracker = tracker();
    let mut fb = Feedback::new();

    controller.update(&ctx(1.0, 4), &mut tracker, &mut fb);
    assert_eq!(controller.current_mission().unwrap().progress, 4.0);
    assert!(fb.is_empty());

    controller.update(&ctx(2.0, 5), &mut tracker, &mut fb);

    let m = controller.current_mission().unwrap();
    assert_eq!(m.status, MissionStatus::Completed);
    assert_eq!(controller.completed_missions(), 1);
    assert_eq!(controller.mode(), ControllerMode::Advancing);
    assert!(controller.active_mission().is_none());

    // 100 xp is exactly one level from a fresh tracker.
    assert_eq!(tracker.state().level, 2);
    assert_eq!(tracker.state().total_coins, 10);

    let kinds: Vec<BannerKind> = fb.notifications.iter().map(|n| n.kind).collect();
    assert_eq!(
        kinds,
        vec![
            BannerKind::LevelUp { level: 2 },
            BannerKind::MissionComplete { mission_id: 1 }
        ]
    );
    let banner = &fb.notifications[1];
    assert_eq!(banner.duration_ms, MISSION_COMPLETE_BANNER_MS);
    assert!(banner.message.contains("MISSION COMPLETE"));
    assert!(banner.message.contains("+100 XP | +10"));
    assert!(fb.audio.contains(&AudioEvent::MissionComplete { mission_id: 1 }));
}

#[test]
fn test_next_mission_waits_for_delay() {
    let mut controller = started(default_missions(), &ctx(0.0, 0));
    let mut tracker = tracker();
    let mut fb = Feedback::new();

    controller.update(&ctx(10.0, 5), &mut tracker, &mut fb);
    assert_eq!(controller.pending_tasks(), 1);

    controller.update(&ctx(11.9, 5), &mut tracker, &mut fb);
    assert_eq!(controller.current_mission().unwrap().id, 1);
    assert_eq!(controller.mode(), ControllerMode::Advancing);

    controller.update(&ctx(12.0, 5), &mut tracker, &mut fb);
    assert_eq!(controller.active_mission().unwrap().id, 2);
    assert_eq!(controller.active_mission().unwrap().progress, 5.0);
    assert_eq!(controller.pending_tasks(), 0);
}

#[test]
fn test_completed_mission_is_not_reevaluated() {
    let mut controller = started(default_missions(), &ctx(0.0, 0));
    let mut tracker = tracker();
    let mut fb = Feedback::new();

    controller.update(&ctx(1.0, 5), &mut tracker, &mut fb);
    let coins_after = tracker.state().total_coins;
    controller.update(&ctx(1.5, 9), &mut tracker, &mut fb);

    assert_eq!(controller.current_mission().unwrap().progress, 5.0);
    assert_eq!(controller.completed_missions(), 1);
    assert_eq!(tracker.state().total_coins, coins_after);
}

#[test]
fn test_cumulative_counter_completes_later_mission_instantly() {
    let mut controller = started(default_missions(), &ctx(0.0, 0));
    let mut tracker = tracker();
    let mut fb = Feedback::new();

    // Twelve coins land before the first mission is even checked.
    controller.update(&ctx(1.0, 12), &mut tracker, &mut fb);
    assert_eq!(controller.completed_missions(), 1);

    // Mission 2 (10 coins) activates and completes on the same tick.
    controller.update(&ctx(3.0, 12), &mut tracker, &mut fb);
    assert_eq!(controller.completed_missions(), 2);
    assert_eq!(controller.current_mission().unwrap().id, 2);
    assert!(controller.current_mission().unwrap().is_completed());
}

#[test]
fn test_per_mission_counting_uses_baseline() {
    let config = MissionConfig {
        collect_progress: CollectProgress::PerMission,
        ..Default::default()
    };
    let mut controller = MissionController::with_missions(config, default_missions());
    let mut tracker = tracker();
    let mut fb = Feedback::new();
    controller.start_next(&ctx(0.0, 0), &mut fb);

    controller.update(&ctx(1.0, 12), &mut tracker, &mut fb);
    assert_eq!(controller.completed_missions(), 1);

    controller.update(&ctx(3.0, 12), &mut tracker, &mut fb);
    let m = controller.active_mission().expect("mission 2 stays active");
    assert_eq!(m.id, 2);
    assert_eq!(m.progress, 0.0);

    controller.update(&ctx(4.0, 21), &mut tracker, &mut fb);
    assert_eq!(controller.active_mission().unwrap().progress, 9.0);
    controller.update(&ctx(5.0, 22), &mut tracker, &mut fb);
    assert_eq!(controller.completed_missions(), 2);
}

// ---- Reach ----

#[test]
fn test_reach_three_four_five() {
    let mut controller = started(vec![catalog_mission(3)], &ctx_at(0.0, 0, Position::ZERO));
    let mut tracker = tracker();
    let mut fb = Feedback::new();

    controller.update(
        &ctx_at(5.0, 0, Position::new(30.0, 0.0, 40.0)),
        &mut tracker,
        &mut fb,
    );
    assert!((controller.current_mission().unwrap().progress - 50.0).abs() < 1e-12);

    controller.update(
        &ctx_at(9.0, 0, Position::new(60.0, 0.0, 80.0)),
        &mut tracker,
        &mut fb,
    );
    let m = controller.current_mission().unwrap();
    assert_eq!(m.progress, 100.0);
    assert!(m.is_completed(), "exactly meeting the target completes");
}

#[test]
fn test_reach_measures_from_assignment_position() {
    let start = Position::new(10.0, 5.0, 10.0);
    let mut controller = started(vec![catalog_mission(3)], &ctx_at(0.0, 0, start));
    let mut tracker = tracker();
    let mut fb = Feedback::new();

    controller.update(&ctx_at(1.0, 0, Position::new(10.0, 5.0, 109.0)), &mut tracker, &mut fb);
    let m = controller.current_mission().unwrap();
    assert!((m.progress - 99.0).abs() < 1e-9);
    assert!(m.is_active());
    assert_eq!(m.kind, MissionKind::Reach { start_position: Some(start) });
}

#[test]
fn test_reach_without_player_captures_start_later() {
    let no_player = MissionContext {
        player_position: None,
        ..ctx(0.0, 0)
    };
    let mut controller = started(vec![catalog_mission(3)], &no_player);
    let mut tracker = tracker();
    let mut fb = Feedback::new();

    let later = MissionContext { now: 1.0, ..no_player };
    controller.update(&later, &mut tracker, &mut fb);
    assert_eq!(controller.current_mission().unwrap().progress, 0.0);

    let spawn = Position::new(3.0, 0.0, 3.0);
    controller.update(&ctx_at(2.0, 0, spawn), &mut tracker, &mut fb);
    assert_eq!(
        controller.current_mission().unwrap().kind,
        MissionKind::Reach { start_position: Some(spawn) }
    );

    controller.update(&ctx_at(3.0, 0, spawn + Position::new(100.0, 0.0, 0.0)), &mut tracker, &mut fb);
    assert!(controller.current_mission().unwrap().is_completed());
}

// ---- Speed ----

#[test]
fn test_speed_timeout_restarts_in_place() {
    let mut controller = started(vec![catalog_mission(5)], &ctx(0.0, 0));
    let mut tracker = tracker();
    let mut fb = Feedback::new();

    controller.update(&ctx(10.0, 2), &mut tracker, &mut fb);
    assert_eq!(controller.current_mission().unwrap().progress, 2.0);

    controller.update(&ctx(30.5, 4), &mut tracker, &mut fb);
    let m = controller.current_mission().unwrap();
    assert_eq!(m.progress, 0.0);
    assert!(m.is_active(), "a timed-out speed mission never fails");
    assert_eq!(speed_start_time(&controller), Some(30.5));
    assert_eq!(controller.completed_missions(), 0);
}

#[test]
fn test_speed_target_reached_after_limit_restarts() {
    let mut controller = started(vec![catalog_mission(5)], &ctx(0.0, 0));
    let mut tracker = tracker();
    let mut fb = Feedback::new();

    // Fifth coin arrives at startTime + 31s; the timeout is seen on this tick.
    controller.update(&ctx(31.0, 5), &mut tracker, &mut fb);

    let m = controller.current_mission().unwrap();
    assert!(!m.is_completed());
    assert_eq!(m.progress, 0.0);
    assert_eq!(speed_start_time(&controller), Some(31.0));
    assert!(fb.notifications.is_empty());
}

#[test]
fn test_speed_cumulative_count_satisfies_retry() {
    let mut controller = started(vec![catalog_mission(5)], &ctx(0.0, 0));
    let mut tracker = tracker();
    let mut fb = Feedback::new();

    controller.update(&ctx(31.0, 5), &mut tracker, &mut fb);
    assert!(!controller.current_mission().unwrap().is_completed());

    // The shared counter already meets the target on the next attempt.
    controller.update(&ctx(31.1, 5), &mut tracker, &mut fb);
    assert!(controller.current_mission().unwrap().is_completed());
}

#[test]
fn test_speed_within_window_completes() {
    let mut controller = started(vec![catalog_mission(5)], &ctx(100.0, 0));
    let mut tracker = tracker();
    let mut fb = Feedback::new();

    controller.update(&ctx(110.0, 3), &mut tracker, &mut fb);
    controller.update(&ctx(129.9, 5), &mut tracker, &mut fb);

    assert!(controller.current_mission().unwrap().is_completed());
    assert_eq!(tracker.state().total_coins, 50);
}

#[test]
fn test_speed_per_mission_retry_rebases() {
    let config = MissionConfig {
        collect_progress: CollectProgress::PerMission,
        ..Default::default()
    };
    let mut controller = MissionController::with_missions(config, vec![catalog_mission(5)]);
    let mut tracker = tracker();
    let mut fb = Feedback::new();
    controller.start_next(&ctx(0.0, 20), &mut fb);

    controller.update(&ctx(20.0, 23), &mut tracker, &mut fb);
    assert_eq!(controller.current_mission().unwrap().progress, 3.0);

    controller.update(&ctx(31.0, 24), &mut tracker, &mut fb);
    assert_eq!(controller.current_mission().unwrap().progress, 0.0);

    // The coin picked up on the timeout tick carries into the retry.
    controller.update(&ctx(32.0, 25), &mut tracker, &mut fb);
    assert_eq!(controller.current_mission().unwrap().progress, 2.0);
    assert!(!controller.current_mission().unwrap().is_completed());
}

// ---- Terminal states, shutdown, reset ----

#[test]
fn test_start_next_when_all_complete() {
    let mut missions = default_missions();
    for m in &mut missions {
        m.status = MissionStatus::Completed;
    }
    let mut controller = MissionController::with_missions(MissionConfig::default(), missions);
    let mut tracker = tracker();
    let mut fb = Feedback::new();

    controller.start_next(&ctx(0.0, 0), &mut fb);
    assert_eq!(controller.mode(), ControllerMode::AllComplete);
    assert!(controller.current_mission().is_none());
    assert_eq!(fb.notifications.len(), 1);
    assert_eq!(fb.notifications[0].kind, BannerKind::AllMissionsComplete);
    assert_eq!(fb.notifications[0].duration_ms, ALL_COMPLETE_BANNER_MS);

    // Further calls are harmless and do not repeat the banner.
    controller.update(&ctx(1.0, 20), &mut tracker, &mut fb);
    controller.start_next(&ctx(2.0, 20), &mut fb);
    assert_eq!(controller.mode(), ControllerMode::AllComplete);
    assert_eq!(fb.notifications.len(), 1);
}

#[test]
fn test_full_sequence() {
    let mut controller = started(default_missions(), &ctx(0.0, 0));
    let mut tracker = tracker();
    let mut fb = Feedback::new();

    // Walk north at 10 m/s with every coin already collected.
    let mut now = 0.0;
    while controller.mode() != ControllerMode::AllComplete && now < 60.0 {
        now += 0.5;
        let pos = Position::new(0.0, 0.0, now * 10.0);
        controller.update(&ctx_at(now, 20, pos), &mut tracker, &mut fb);
    }

    assert_eq!(controller.mode(), ControllerMode::AllComplete);
    assert_eq!(controller.completed_missions(), 5);
    assert!(controller.missions().iter().all(Mission::is_completed));
    assert_eq!(tracker.state().total_coins, 10 + 25 + 15 + 100 + 50);
    let all_complete = fb
        .notifications
        .iter()
        .filter(|n| n.kind == BannerKind::AllMissionsComplete)
        .count();
    assert_eq!(all_complete, 1);
}

#[test]
fn test_reach_start_snapshotted_after_delay() {
    let mut missions = default_missions();
    missions[0].status = MissionStatus::Completed;
    missions[1].status = MissionStatus::Completed;
    let mut controller = MissionController::with_missions(MissionConfig::default(), missions);
    let mut fb = Feedback::new();

    let pos = Position::new(7.0, 1.0, -2.0);
    controller.start_next(&ctx_at(0.0, 10, pos), &mut fb);
    assert_eq!(
        controller.active_mission().unwrap().kind,
        MissionKind::Reach { start_position: Some(pos) }
    );
}

#[test]
fn test_shutdown_cancels_pending_advance() {
    let mut controller = started(default_missions(), &ctx(0.0, 0));
    let mut tracker = tracker();
    let mut fb = Feedback::new();

    controller.update(&ctx(1.0, 5), &mut tracker, &mut fb);
    assert_eq!(controller.shutdown(), 1);

    controller.update(&ctx(10.0, 5), &mut tracker, &mut fb);
    assert_eq!(controller.current_mission().unwrap().id, 1);
    assert_eq!(controller.mode(), ControllerMode::Advancing);
    assert_eq!(controller.shutdown(), 0);
}

#[test]
fn test_reset_starts_over() {
    let mut controller = started(default_missions(), &ctx(0.0, 0));
    let mut tracker = tracker();
    let mut fb = Feedback::new();
    controller.update(&ctx(1.0, 5), &mut tracker, &mut fb);

    controller.reset(&ctx(2.0, 0), &mut fb);

    assert_eq!(controller.completed_missions(), 0);
    assert_eq!(controller.pending_tasks(), 0);
    assert_eq!(controller.active_mission().unwrap().id, 1);
    assert!(controller.missions().iter().skip(1).all(|m| m.status == MissionStatus::NotStarted));
}

#[test]
fn test_complete_is_idempotent() {
    let mut controller = started(default_missions(), &ctx(0.0, 0));
    let mut tracker = tracker();
    let mut fb = Feedback::new();

    assert!(controller.complete(1, 0.5, &mut tracker, &mut fb));
    assert!(!controller.complete(1, 0.6, &mut tracker, &mut fb));
    assert!(!controller.complete(99, 0.6, &mut tracker, &mut fb));
    assert_eq!(controller.completed_missions(), 1);
    assert_eq!(tracker.state().total_coins, 10);
    assert_eq!(controller.pending_tasks(), 1);
}

#[test]
fn test_complete_only_accepts_active_mission() {
    let mut controller = started(default_missions(), &ctx(0.0, 0));
    let mut tracker = tracker();
    let mut fb = Feedback::new();

    assert!(!controller.complete(2, 0.5, &mut tracker, &mut fb));

    assert_eq!(controller.mode(), ControllerMode::HasActiveMission);
    assert_eq!(controller.completed_missions(), 0);
    assert_eq!(controller.pending_tasks(), 0);
    assert_eq!(controller.missions()[1].status, MissionStatus::NotStarted);
    assert!(fb.is_empty());
    assert_eq!(tracker.state().total_coins, 0);
}

#[test]
fn test_complete_ignored_while_advancing() {
    let mut controller = started(vec![catalog_mission(5)], &ctx(0.0, 0));
    let mut tracker = tracker();
    let mut fb = Feedback::new();

    controller.update(&ctx(10.0, 5), &mut tracker, &mut fb);
    assert_eq!(controller.mode(), ControllerMode::Advancing);
    assert!(!controller.complete(5, 10.5, &mut tracker, &mut fb));
    assert_eq!(controller.pending_tasks(), 1);
}

#[test]
fn test_missing_coin_field_is_noop() {
    let mut controller = started(default_missions(), &ctx(0.0, 0));
    let mut tracker = tracker();
    let mut fb = Feedback::new();
    let no_coins = MissionContext {
        collected_count: None,
        ..ctx(1.0, 0)
    };
    controller.update(&no_coins, &mut tracker, &mut fb);
    assert_eq!(controller.current_mission().unwrap().progress, 0.0);
    assert!(controller.active_mission().is_some());
}

// ---- Panel ----

#[test]
fn test_panel_view_collect() {
    let mut controller = started(default_missions(), &ctx(0.0, 0));
    controller.update(&ctx(1.0, 3), &mut tracker(), &mut Feedback::new());

    let view = controller.panel_view(1.0);
    assert_eq!(view.title, "Coin Collector");
    assert_eq!(view.objective, "Collect 5 coins");
    assert_eq!(view.progress_text, "3 / 5");
    assert_eq!(view.progress_percent, 60.0);
    assert_eq!(view.mission_type, Some(MissionType::Collect));
    assert_eq!(view.total_missions, 5);
}

#[test]
fn test_panel_view_speed_timer() {
    let mut controller = started(vec![catalog_mission(5)], &ctx(10.0, 0));
    controller.update(&ctx(22.3, 2), &mut tracker(), &mut Feedback::new());

    let view = controller.panel_view(22.3);
    assert_eq!(view.progress_text, "2 / 5 | ⏱️ 17.7s");
}

#[test]
fn test_panel_view_reach_floors_progress() {
    let mut controller = started(vec![catalog_mission(3)], &ctx_at(0.0, 0, Position::ZERO));
    controller.update(
        &ctx_at(1.0, 0, Position::new(0.0, 0.0, 42.9)),
        &mut tracker(),
        &mut Feedback::new(),
    );
    assert_eq!(controller.panel_view(1.0).progress_text, "42 / 100");
}

#[test]
fn test_panel_view_all_complete() {
    let mut controller = MissionController::with_missions(MissionConfig::default(), Vec::new());
    controller.start_next(&ctx(0.0, 0), &mut Feedback::new());
    let view = controller.panel_view(0.0);
    assert_eq!(view.title, "All Missions Complete!");
    assert_eq!(view.objective, "You are a true explorer!");
    assert!(view.progress_text.is_empty());
}
