//! Terrain height sources for Terrain Trek.
//!
//! The session layer never generates terrain; it only samples heights.
//! This crate provides a heightmap grid implementing `TerrainQuery`.

pub use trek_core as core;

pub mod grid;

pub use grid::{HeightGrid, TerrainError};
