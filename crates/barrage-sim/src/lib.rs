//! Match simulation for BARRAGE.
//!
//! Owns the hecs ECS world and the destructible terrain, runs the turn loop
//! one tick at a time, and produces MatchSnapshots for the frontend.

pub mod engine;
pub mod systems;
pub mod turn;
pub mod world_setup;

pub use barrage_core as core;
pub use engine::MatchEngine;
