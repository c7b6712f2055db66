//! Destructible terrain for BARRAGE.
//!
//! Occupancy grid, procedural generation, irregular craters,
//! and floating-terrain cleanup.

pub use barrage_core as core;

pub mod crater;
pub mod field;
pub mod generate;
mod sanitize;

// Re-export key types for convenience.
pub use crater::CraterLobe;
pub use field::TerrainField;
pub use generate::generate;

#[cfg(test)]
mod tests;
