//! Session engine for Terrain Trek.
//!
//! Owns the coin field on a hecs ECS world, drives progression and
//! missions once per frame, and produces `SessionSnapshot`s for the
//! presentation layer.

pub mod coin_field;
pub mod config;
pub mod engine;
pub mod placement;
pub mod systems;

pub use trek_core as core;
pub use coin_field::CoinField;
pub use config::{ConfigError, SessionConfig};
pub use engine::SessionEngine;
