//! Events emitted by the session for audio and UI feedback.

use serde::{Deserialize, Serialize};

use crate::enums::BannerKind;

/// Audio events for the presentation sound system.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum AudioEvent {
    /// A coin was picked up.
    CoinCollect { coin_id: u32 },
    /// The character gained a level.
    LevelUp { level: u32 },
    /// A mission was completed.
    MissionComplete { mission_id: u32 },
}

/// A message for the on-screen banner sink.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub kind: BannerKind,
    pub message: String,
    pub duration_ms: u64,
}

/// Per-tick buffer of audio events and notifications.
///
/// Components push into it during a tick; the engine drains it into the
/// injected sinks in emission order.
#[derive(Debug, Clone, Default)]
pub struct Feedback {
    pub audio: Vec<AudioEvent>,
    pub notifications: Vec<Notification>,
}

impl Feedback {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn audio(&mut self, event: AudioEvent) {
        self.audio.push(event);
    }

    pub fn notify(&mut self, kind: BannerKind, message: impl Into<String>, duration_ms: u64) {
        self.notifications.push(Notification {
            kind,
            message: message.into(),
            duration_ms,
        });
    }

    pub fn is_empty(&self) -> bool {
        self.audio.is_empty() && self.notifications.is_empty()
    }
}
