//! ECS systems that operate on the coin world each tick.
//!
//! Systems are free functions over `&World` or `&mut World`. They hold no
//! state of their own; everything lives in components.

pub mod collection;
pub mod shatter;
pub mod snapshot;
pub mod sweep;
