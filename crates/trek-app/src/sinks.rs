//! Audio and banner sinks that write to the log instead of a speaker or
//! a screen.

use log::{debug, info};

use trek_core::interfaces::{AudioNotifier, NotificationSink};

/// Logs every sound trigger at debug level.
#[derive(Debug, Default)]
pub struct LogAudio;

impl AudioNotifier for LogAudio {
    fn play_collect(&mut self) {
        debug!("♪ collect");
    }

    fn play_level_up(&mut self) {
        debug!("♪ level up");
    }

    fn play_mission_complete(&mut self) {
        debug!("♪ mission complete");
    }
}

/// Logs each banner on one line.
#[derive(Debug, Default)]
pub struct LogBanners;

impl NotificationSink for LogBanners {
    fn present(&mut self, message: &str, duration_ms: u64) {
        info!("[banner {duration_ms}ms] {}", message.replace('\n', " · "));
    }
}
