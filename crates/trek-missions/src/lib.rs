//! Mission sequencing for Terrain Trek.
//!
//! Fixed mission definitions, per-type progress evaluation and the
//! controller that keeps exactly one mission active, grants rewards and
//! advances the sequence after a presentation delay.

pub mod catalog;
pub mod controller;
pub mod mission;
pub mod progress;

pub use trek_core as core;
pub use controller::{MissionConfig, MissionController, MissionTask};
pub use mission::{Mission, MissionKind};
pub use progress::MissionContext;

#[cfg(test)]
mod tests;
