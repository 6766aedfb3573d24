//! Space Invaders simulation core.
//!
//! Everything here is frame-stepped and free of terminal I/O; the binary
//! supplies input, rendering, audio and a score store.

pub mod actors;
pub mod audio;
pub mod barrier;
pub mod collision;
pub mod entities;
pub mod error;
pub mod fleet;
pub mod persistence;
pub mod projectiles;
pub mod session;
pub mod settings;
pub mod stats;
