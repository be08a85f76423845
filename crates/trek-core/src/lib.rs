//! Core types and definitions for the Terrain Trek session layer.
//!
//! This crate defines the vocabulary shared across all other crates:
//! constants, enums, events, the pickup component, collaborator traits,
//! the deferred task queue and snapshot views. It has no dependency on
//! any rendering, audio or input runtime.

pub mod components;
pub mod constants;
pub mod enums;
pub mod events;
pub mod interfaces;
pub mod schedule;
pub mod state;
pub mod types;
