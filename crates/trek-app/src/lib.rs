//! Terrain Trek headless driver.
//!
//! Wires the session engine to a demo heightmap, a scripted walker,
//! log-backed audio and banner sinks and a JSON save directory, and runs
//! it either as a fixed-step batch or as a real-time loop thread.

pub mod game_loop;
pub mod sinks;
pub mod walker;

pub use trek_core as core;
